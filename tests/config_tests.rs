use std::io::Write;

use shatterfx::config::SimConfig;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"{
                "particles": { "count": 8, "lifetime": 0.5 },
                "bouncer": { "palette": [16711680] },
                "simulation": { "seed": 99 }
            }"#,
        );
        let config = SimConfig::load(file.path()).unwrap();

        assert_eq!(config.particles.count, 8);
        assert_eq!(config.particles.lifetime, 0.5);
        assert_eq!(config.particles.decay, 0.016);
        assert_eq!(config.bouncer.palette, vec![0xff0000]);
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.explosion.threshold, 5);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = SimConfig::load("/no/such/shatterfx.json").unwrap_err();
        assert!(format!("{:#}", err).contains("shatterfx.json"));
    }

    #[test]
    fn test_invalid_values_are_rejected_with_context() {
        let file = write_config(r#"{ "debris": { "damping": 1.5 } }"#);
        let err = SimConfig::load(file.path()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid config file"));
        assert!(message.contains("debris.damping"));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let file = write_config(r#"{ "fragment": { "grid_size": 1700 } }"#);
        let err = SimConfig::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("fragment.grid_size"));
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let file = write_config("{}");
        assert_eq!(SimConfig::load(file.path()).unwrap(), SimConfig::default());
    }
}
