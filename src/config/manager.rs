use super::{cgp::CgpConfig, evolution::EvolutionConfig, traits::ConfigSection};
use crate::error::CgpError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `CGPEVO__CGP__ROWS=6`
pub const ENV_PREFIX: &str = "CGPEVO";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cgp: CgpConfig,
    pub evolution: EvolutionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CgpError> {
        self.cgp.validate()?;
        self.evolution.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, then apply `CGPEVO__*` environment overrides on top
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CgpError> {
        let path = path.as_ref();
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn load_from_str(&self, contents: &str) -> Result<(), CgpError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| CgpError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CgpError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, CgpError> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        toml::to_string_pretty(&*config)
            .map_err(|e| CgpError::Configuration(format!("Failed to serialize: {}", e)))
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), CgpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cgp::MutationVariant;

    #[test]
    fn test_toml_round_trip() {
        let manager = ConfigManager::new();
        manager
            .update(|config| {
                config.cgp.rows = 6;
                config.evolution.seed = Some(7);
            })
            .unwrap();

        let text = manager.to_toml().unwrap();
        let reloaded = ConfigManager::new();
        reloaded.load_from_str(&text).unwrap();

        assert_eq!(reloaded.get().cgp.rows, 6);
        assert_eq!(reloaded.get().evolution.seed, Some(7));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let manager = ConfigManager::new();
        manager
            .load_from_str(
                r#"
                [cgp]
                rows = 3
                columns = 2

                [cgp.mutation]
                strategy = "probabilistic"
                function_mutation_chance = 0.2
                "#,
            )
            .unwrap();

        let config = manager.get();
        assert_eq!(config.cgp.rows, 3);
        assert_eq!(config.cgp.levels_back, 2);
        match config.cgp.mutation {
            MutationVariant::Probabilistic(p) => {
                assert_eq!(p.function_mutation_chance, 0.2);
                assert_eq!(p.output_mutation_chance, 0.1);
            }
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn test_invalid_update_is_rejected_and_not_applied() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.cgp.levels_back = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().cgp.levels_back, 2);
    }
}
