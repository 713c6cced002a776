// cli.rs - Command-line interface configuration
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Clickable model that shatters
    Landing,
    /// Floating torus that sprays sparks
    Donut,
    /// Spinning model, bouncing cube and bobbing pyramid
    Gallery,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "shatterfx")]
#[command(about = "Headless runner for the page effects", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value = "landing")]
    pub scene: SceneKind,

    /// Display frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Display rate the frames are generated at
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// JSON tunables; missing keys keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// glTF model for the landing effect
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Click the centre of the screen every N frames
    #[arg(long = "click-every")]
    pub click_every: Option<u64>,

    /// Press the detonate button on this frame
    #[arg(long = "detonate-at")]
    pub detonate_at: Option<u64>,

    /// Overrides simulation.seed from the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the final snapshot here instead of stdout
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Disable console output
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["shatterfx"]);
        assert_eq!(cli.scene, SceneKind::Landing);
        assert_eq!(cli.frames, 600);
        assert!(cli.click_every.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn scripted_run() {
        let cli = Cli::parse_from([
            "shatterfx",
            "--scene",
            "donut",
            "--frames",
            "120",
            "--click-every",
            "10",
            "--seed",
            "3",
        ]);
        assert_eq!(cli.scene, SceneKind::Donut);
        assert_eq!(cli.frames, 120);
        assert_eq!(cli.click_every, Some(10));
        assert_eq!(cli.seed, Some(3));
    }
}
