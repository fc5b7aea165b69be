//! Plain data row types written by trace backends.

/// One agent's position at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub agent_id:  u32,
    pub tick:      u64,
    /// Engine global time at the snapshot, in seconds.
    pub time_secs: f32,
    pub x:         f32,
    pub y:         f32,
}
