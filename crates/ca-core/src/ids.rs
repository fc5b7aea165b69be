//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into parallel `Vec`s via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — the integer type's `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the engine's storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a roadmap vertex.  Goal vertices occupy the prefix
    /// `0..goal_count`; `VertexId(g.0 as u32)` for a `GoalId` `g` is the
    /// goal's own vertex.
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a goal vertex within the roadmap's goal prefix, and the
    /// column index into each waypoint's distance table.
    pub struct GoalId(u16);
}

impl GoalId {
    /// The goal's own vertex in the roadmap (goals are the vertex prefix).
    #[inline]
    pub fn vertex(self) -> VertexId {
        VertexId(self.0 as u32)
    }
}
