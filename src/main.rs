use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use shatterfx::cli::{Cli, SceneKind};
use shatterfx::config::SimConfig;
use shatterfx::driver::Driver;
use shatterfx::frame::FixedFrames;
use shatterfx::loaders::load_model;
use shatterfx::scenes::common::default_model;
use shatterfx::scenes::{DonutEffect, Effect, GalleryEffect, Input, LandingEffect, Signal};
use shatterfx::stage::RecordingStage;

const ASPECT: f32 = 16.0 / 9.0;

fn build_effect(cli: &Cli, config: &SimConfig) -> Result<Box<dyn Effect>> {
    let effect: Box<dyn Effect> = match cli.scene {
        SceneKind::Landing => {
            let model = match &cli.model {
                Some(path) => load_model(path)?,
                None => default_model(),
            };
            Box::new(LandingEffect::new(model, config))
        }
        SceneKind::Donut => Box::new(DonutEffect::new(config)),
        SceneKind::Gallery => Box::new(GalleryEffect::new(config)),
    };
    Ok(effect)
}

fn report(cli: &Cli, signal: &Signal) {
    if cli.quiet {
        return;
    }
    match signal {
        Signal::Escalated { clicks, scale } => {
            println!("click {} -> scale {:.2}", clicks, scale)
        }
        Signal::Exploded(theme) => println!("{} {}", theme.headline, theme.subline),
        Signal::Burst { origin, count } => {
            println!("{} sparks at ({:.2}, {:.2}, {:.2})", count, origin.x, origin.y, origin.z)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    config.validate()?;
    anyhow::ensure!(cli.fps > 0.0, "--fps must be positive");

    let effect = build_effect(&cli, &config)?;
    let mut driver = Driver::new(effect, RecordingStage::new(), &config);

    for frame in FixedFrames::new(cli.fps).take(cli.frames as usize) {
        let clicked = cli
            .click_every
            .is_some_and(|every| every > 0 && frame.number % every == 0);
        if clicked {
            let camera = driver.effect().camera(frame.time, ASPECT);
            driver.input(Input::Pointer(camera.ndc_ray(Vec2::ZERO)));
        }
        if cli.detonate_at == Some(frame.number) {
            driver.input(Input::Detonate);
        }
        for signal in driver.drain_signals() {
            report(&cli, &signal);
        }
        driver.frame(&frame);
    }

    let snapshot = driver.snapshot();
    log::info!(
        "{} frames, {} steps, {} live visuals",
        snapshot.frames,
        snapshot.steps,
        snapshot.live_visuals
    );
    let json = snapshot.to_json()?;
    match &cli.snapshot {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot: {:?}", path))?,
        None if !cli.quiet => println!("{}", json),
        None => {}
    }

    Ok(())
}
