use glam::{Vec2, Vec3};
use shatterfx::camera::Camera;
use shatterfx::config::SimConfig;
use shatterfx::driver::Driver;
use shatterfx::frame::{FixedFrames, FrameInfo};
use shatterfx::math::{Color, Ray};
use shatterfx::scenes::common::default_model;
use shatterfx::scenes::{DonutEffect, Effect, GalleryEffect, Input, LandingEffect, Signal};
use shatterfx::sim::ExplosionState;
use shatterfx::stage::RecordingStage;

fn seeded(seed: u64) -> SimConfig {
    let mut config = SimConfig::default();
    config.simulation.seed = Some(seed);
    config
}

fn step_frame(n: u64) -> FrameInfo {
    FrameInfo::new(n, n as f32 / 60.0, 1.0 / 60.0)
}

fn aim_at(target: Vec3) -> Ray {
    Camera::new(Vec3::new(0.0, 0.0, 10.0), target, 1.0).ndc_ray(Vec2::ZERO)
}

#[cfg(test)]
mod landing_tests {
    use super::*;

    #[test]
    fn test_clicks_escalate_then_shatter() {
        let config = seeded(1);
        let mut driver = Driver::new(
            Box::new(LandingEffect::new(default_model(), &config)),
            RecordingStage::new(),
            &config,
        );
        assert_eq!(driver.stage().len(), 2);

        let click = Input::Pointer(aim_at(Vec3::ZERO));
        for expected in 1..5 {
            let signals = driver.input(click).to_vec();
            assert!(matches!(signals[..], [Signal::Escalated { clicks, .. }] if clicks == expected));
        }
        let signals = driver.input(click).to_vec();
        assert!(matches!(signals[..], [Signal::Exploded(_)]));

        // Three meshes in the stand-in model, 27 pieces each
        let snapshot = driver.snapshot();
        assert_eq!(snapshot.live_visuals, 2 + 81);
        assert_eq!(snapshot.visible_visuals, 1 + 81);
        assert_eq!(snapshot.theme.as_ref().map(|t| t.background), Some(0xff0000));
        let explosion = snapshot.effect.explosion.unwrap();
        assert_eq!(explosion.state, ExplosionState::Exploded);
        assert_eq!(explosion.fragments, 81);
        assert!(!explosion.model_visible);

        assert!(driver.input(click).is_empty());
        assert!(driver.input(Input::Detonate).is_empty());
        assert_eq!(driver.stage().len(), 83);
    }

    #[test]
    fn test_fragment_visuals_follow_debris() {
        let config = seeded(2);
        let mut effect = LandingEffect::new(default_model(), &config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);
        effect.handle(Input::Detonate, &mut stage);

        for n in 0..30 {
            effect.step(&step_frame(n), &mut stage);
        }

        let fragments = effect.machine().debris().fragments();
        for (handle, fragment) in effect.fragment_handles().iter().zip(fragments) {
            let staged = stage.get(*handle).unwrap();
            assert_eq!(staged.visual.instance.position, fragment.body.position.to_array());
        }
        assert!(!stage.get(effect.model_handle()).unwrap().visible);
    }

    #[test]
    fn test_intact_model_spins_on_stage() {
        let config = seeded(3);
        let mut effect = LandingEffect::new(default_model(), &config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);
        let before = stage.get(effect.model_handle()).unwrap().visual.instance.rotation;
        effect.step(&step_frame(0), &mut stage);
        let after = stage.get(effect.model_handle()).unwrap().visual.instance.rotation;
        assert_ne!(before, after);
    }
}

#[cfg(test)]
mod donut_tests {
    use super::*;

    #[test]
    fn test_click_on_ring_sprays_sparks() {
        let config = seeded(4);
        let mut effect = DonutEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);

        let signals = effect.handle(Input::Pointer(aim_at(effect.focus())), &mut stage);
        let [Signal::Burst { origin, count }] = signals[..] else {
            panic!("expected a burst, got {:?}", signals);
        };
        assert_eq!(count, 20);
        assert_eq!(effect.pool().len(), 20);
        assert_eq!(stage.len(), 21);
        assert!(effect.pool().particles().iter().all(|p| p.body.position == origin));
    }

    #[test]
    fn test_click_through_the_hole_misses() {
        let config = seeded(5);
        let mut effect = DonutEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);

        let centre = effect.position();
        let ray = Ray::new(centre + Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        assert!(effect.handle(Input::Pointer(ray), &mut stage).is_empty());
        let away = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(effect.handle(Input::Pointer(away), &mut stage).is_empty());
        assert!(effect.pool().is_empty());
    }

    #[test]
    fn test_sparks_fade_and_are_removed() {
        let config = seeded(6);
        let mut effect = DonutEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);
        effect.handle(Input::Pointer(aim_at(effect.focus())), &mut stage);

        for n in 0..50 {
            effect.step(&step_frame(n), &mut stage);
        }
        assert!(effect.pool().particles().iter().all(|p| p.opacity() < 1.0));
        assert_eq!(stage.len(), 21);

        for n in 50..120 {
            effect.step(&step_frame(n), &mut stage);
        }
        assert!(effect.pool().is_empty());
        assert_eq!(stage.len(), 1);
        assert_eq!(stage.counters().removed, 20);
        assert_eq!(stage.counters().stale, 0);
    }

    #[test]
    fn test_orbiting_camera_clicks_hit_ring() {
        let config = seeded(12);
        let mut effect = DonutEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);

        for time in [0.0, 7.5, 15.0, 40.0] {
            let camera = effect.camera(time, 16.0 / 9.0);
            let radius = (camera.position - effect.focus()).length();
            assert!((radius - 60.0).abs() < 1e-3, "orbit radius {} at t={}", radius, time);
            assert!((camera.position.y - effect.focus().y).abs() < 1e-4);

            let signals = effect.handle(Input::Pointer(camera.ndc_ray(Vec2::ZERO)), &mut stage);
            assert!(
                matches!(signals[..], [Signal::Burst { .. }]),
                "expected a burst at t={}, got {:?}",
                time,
                signals
            );
        }
        assert_eq!(effect.pool().len(), 80);
    }

    #[test]
    fn test_detonate_does_nothing() {
        let config = seeded(7);
        let mut effect = DonutEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);
        assert!(effect.handle(Input::Detonate, &mut stage).is_empty());
    }
}

#[cfg(test)]
mod gallery_tests {
    use super::*;

    #[test]
    fn test_cube_color_on_stage_matches_palette_index() {
        let config = seeded(8);
        let mut effect = GalleryEffect::new(&config);
        let mut stage = RecordingStage::new();
        effect.setup(&mut stage);
        assert_eq!(effect.visual_count(), 3);

        for n in 0..2_000 {
            effect.step(&step_frame(n), &mut stage);
            let staged = stage.get(effect.cube_handle()).unwrap();
            assert_eq!(staged.visual.material.color, effect.cube().color());
            let position = effect.cube().body.position.abs();
            assert!(position.x <= 2.5 + 0.04 + 1e-5 && position.y <= 2.5 + 0.04 + 1e-5);
        }
        assert_eq!(stage.counters().stale, 0);
    }

    #[test]
    fn test_snapshot_reports_cube() {
        let config = seeded(9);
        let effect = GalleryEffect::new(&config);
        let bouncer = effect.snapshot().bouncer.unwrap();
        assert_eq!(bouncer.color_index, 0);
        assert_eq!(bouncer.color, 0xffa500);
        assert_eq!(Color::from_hex(bouncer.color), effect.cube().color());
    }

    #[test]
    fn test_default_camera_is_fixed() {
        let config = seeded(13);
        let effect = GalleryEffect::new(&config);
        let early = effect.camera(0.0, 1.0);
        let late = effect.camera(30.0, 1.0);
        assert_eq!(early.position, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(early.position, late.position);
    }

    #[test]
    fn test_snapshot_counts_packed_instance_bytes() {
        let config = seeded(14);
        let driver = Driver::new(
            Box::new(GalleryEffect::new(&config)),
            RecordingStage::new(),
            &config,
        );
        let snapshot = driver.snapshot();
        assert_eq!(snapshot.instance_bytes, snapshot.visible_visuals * 64);
        assert_eq!(
            snapshot.instance_bytes,
            driver.stage().instance_bytes().len()
        );
    }

    #[test]
    fn test_driver_runs_fixed_steps() {
        let config = seeded(10);
        let mut driver = Driver::new(
            Box::new(GalleryEffect::new(&config)),
            RecordingStage::new(),
            &config,
        );
        // A 30 Hz display owes two steps per frame
        let steps: u32 = FixedFrames::new(30.0)
            .take(30)
            .map(|frame| driver.frame(&frame))
            .sum();
        assert!((59..=60).contains(&steps));
        assert_eq!(driver.frames(), 30);
    }
}
