//! Unit tests for ca-engine.

#[cfg(test)]
mod geometry {
    use approx::assert_relative_eq;
    use ca_core::Vec2;

    use crate::geometry::{dist_sq_point_segment, dist_sq_segment_segment, segments_intersect};

    #[test]
    fn point_segment_interior_projection() {
        let d = dist_sq_point_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_relative_eq!(d, 9.0, max_relative = 1e-6);
    }

    #[test]
    fn point_segment_clamps_to_endpoint() {
        let d = dist_sq_point_segment(Vec2::new(-3.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_relative_eq!(d, 25.0, max_relative = 1e-6);
    }

    #[test]
    fn point_degenerate_segment() {
        let p = Vec2::new(1.0, 1.0);
        let d = dist_sq_point_segment(Vec2::new(4.0, 5.0), p, p);
        assert_relative_eq!(d, 25.0, max_relative = 1e-6);
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn collinear_disjoint_segments_do_not_intersect() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ));
    }

    #[test]
    fn collinear_overlapping_segments_intersect() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, 0.0),
        ));
    }

    #[test]
    fn segment_segment_distance() {
        // Crossing: zero.
        assert_eq!(
            dist_sq_segment_segment(
                Vec2::new(-1.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 1.0),
            ),
            0.0
        );
        // Parallel horizontals 2 apart.
        let d = dist_sq_segment_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(10.0, 2.0),
        );
        assert_relative_eq!(d, 4.0, max_relative = 1e-6);
    }
}

#[cfg(test)]
mod kinematic {
    use approx::assert_relative_eq;
    use ca_core::Vec2;
    use ca_roadmap::VisibilityOracle;

    use crate::{AgentDefaults, CrowdEngine, EngineError, KinematicEngine};

    #[test]
    fn agents_use_current_defaults() {
        let mut engine = KinematicEngine::new(0.25);
        let a = engine.add_agent(Vec2::ZERO);
        engine.set_defaults(AgentDefaults { radius: 5.0, max_speed: 1.0 });
        let b = engine.add_agent(Vec2::ZERO);

        assert_eq!(engine.agent_count(), 2);
        assert_eq!(engine.agent_radius(a), 2.0);
        assert_eq!(engine.agent_radius(b), 5.0);
    }

    #[test]
    fn step_integrates_preferred_velocity() {
        let mut engine = KinematicEngine::new(0.5);
        let a = engine.add_agent(Vec2::new(1.0, 1.0));
        engine.set_preferred_velocity(a, Vec2::new(1.0, 0.0));
        engine.step();
        engine.step();
        assert_eq!(engine.agent_position(a), Vec2::new(2.0, 1.0));
        assert_relative_eq!(engine.global_time_secs(), 1.0, max_relative = 1e-6);
    }

    #[test]
    fn speed_clamped_to_max() {
        let mut engine = KinematicEngine::new(1.0);
        engine.set_defaults(AgentDefaults { radius: 2.0, max_speed: 2.0 });
        let a = engine.add_agent(Vec2::ZERO);
        engine.set_preferred_velocity(a, Vec2::new(10.0, 0.0));
        engine.step();
        assert_relative_eq!(engine.agent_position(a).x, 2.0, max_relative = 1e-6);
    }

    #[test]
    fn degenerate_obstacle_rejected() {
        let mut engine = KinematicEngine::new(0.25);
        assert!(matches!(
            engine.add_obstacle(&[Vec2::ZERO]),
            Err(EngineError::DegenerateObstacle { vertices: 1 })
        ));
    }

    #[test]
    fn polygon_decomposed_into_edges() {
        let mut engine = KinematicEngine::new(0.25);
        engine
            .add_obstacle(&[
                Vec2::new(0.0, 0.0),
                Vec2::new(4.0, 0.0),
                Vec2::new(4.0, 4.0),
                Vec2::new(0.0, 4.0),
            ])
            .unwrap();
        assert_eq!(engine.obstacle_count(), 4);

        // A lone wall contributes one segment, not a closed loop.
        engine
            .add_obstacle(&[Vec2::new(10.0, 0.0), Vec2::new(10.0, 4.0)])
            .unwrap();
        assert_eq!(engine.obstacle_count(), 5);
    }

    #[test]
    fn obstacle_blocks_sight_line() {
        let mut engine = KinematicEngine::new(0.25);
        engine
            .add_obstacle(&[Vec2::new(5.0, -10.0), Vec2::new(5.0, 10.0)])
            .unwrap();

        let left = Vec2::new(0.0, 0.0);
        let right = Vec2::new(10.0, 0.0);
        assert!(!engine.query_visibility(left, right, 1.0));
        // Parallel to the wall, well clear of it.
        assert!(engine.query_visibility(Vec2::new(0.0, -5.0), Vec2::new(0.0, 5.0), 1.0));
    }

    #[test]
    fn clearance_widens_the_blocked_corridor() {
        let mut engine = KinematicEngine::new(0.25);
        engine
            .add_obstacle(&[Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0)])
            .unwrap();

        // Sight line passes 2 units below the wall's lower endpoint.
        let a = Vec2::new(0.0, -2.0);
        let b = Vec2::new(10.0, -2.0);
        assert!(engine.query_visibility(a, b, 1.0));
        assert!(!engine.query_visibility(a, b, 3.0));
    }

    #[test]
    fn empty_world_fully_visible() {
        let engine = KinematicEngine::new(0.25);
        assert!(engine.query_visibility(Vec2::ZERO, Vec2::new(100.0, 100.0), 10.0));
    }
}
