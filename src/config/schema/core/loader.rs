use super::{APP_DIR_NAME, Config};
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_in(&home.join(APP_DIR_NAME))
    }

    /// Load `config.toml` from `dir`, writing defaults on first run.
    /// Environment overrides are applied after reading the file.
    pub fn load_or_init_in(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");

        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create .elite-editor directory")?;
        }

        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.config_dir = dir.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                config_dir: dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
