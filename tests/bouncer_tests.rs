use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shatterfx::math::Color;
use shatterfx::sim::{Bouncer, BouncerParams, BouncingBody, KineticBody};

fn bouncing(position: Vec3, velocity: Vec3) -> BouncingBody {
    BouncingBody::new(
        KineticBody::new(position, velocity),
        BouncerParams::default().colors(),
    )
}

#[cfg(test)]
mod bouncer_tests {
    use super::*;

    #[test]
    fn test_crossing_reflects_and_cycles_color() {
        let mut body = bouncing(Vec3::new(2.6, 0.0, 0.0), Vec3::new(0.05, 0.0, 0.0));
        let reflections = Bouncer::new(2.5).step(&mut body);

        assert_eq!(reflections, 1);
        assert_eq!(body.body.velocity.x, -0.05);
        assert_eq!(body.color_index(), 1);
        assert_eq!(body.color(), Color::from_hex(0xffd700));
    }

    #[test]
    fn test_palette_wraps() {
        let bouncer = Bouncer::new(1.0);
        let mut body = bouncing(Vec3::new(1.5, 0.0, 0.0), Vec3::ZERO);
        for _ in 0..6 {
            bouncer.step(&mut body);
        }
        assert_eq!(body.color_index(), 0);
    }

    #[test]
    fn test_stays_near_boundary_over_long_runs() {
        let params = BouncerParams::default();
        let bouncer = Bouncer::new(params.boundary);
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..10 {
            let mut body = params.spawn(&mut rng);
            for _ in 0..5_000 {
                bouncer.step(&mut body);
                let limit = params.boundary + body.body.velocity.abs() * 2.0;
                let position = body.body.position.abs();
                assert!(position.x <= limit.x + 1e-5 && position.y <= limit.y + 1e-5);
                assert_eq!(body.body.position.z, 0.0);
            }
        }
    }

    #[test]
    fn test_body_never_runs_away_once_reflected() {
        let bouncer = Bouncer::new(2.5);
        let mut body = bouncing(Vec3::new(2.45, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0));
        let mut outside_streak = 0;
        for _ in 0..200 {
            bouncer.step(&mut body);
            if body.body.position.x.abs() > 2.5 {
                outside_streak += 1;
            } else {
                outside_streak = 0;
            }
            assert!(outside_streak <= 1);
        }
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        let mut body = BouncingBody::new(KineticBody::new(Vec3::splat(3.0), Vec3::ZERO), Vec::new());
        assert_eq!(body.color(), Color::WHITE);
        Bouncer::new(1.0).step(&mut body);
        assert_eq!(body.color_index(), 0);
    }

    #[test]
    fn test_spawn_moves_in_plane_and_spins() {
        let params = BouncerParams::default();
        let body = params.spawn(&mut StdRng::seed_from_u64(1));
        assert_eq!(body.body.position, Vec3::ZERO);
        assert_eq!(body.body.velocity.z, 0.0);
        assert!(body.body.velocity.abs().max_element() <= params.max_launch_speed);
        assert_eq!(body.body.angular_velocity, Some(Vec3::new(0.02, 0.02, 0.0)));
    }
}
