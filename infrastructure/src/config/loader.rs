//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./atelier.toml` or `./.atelier.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/atelier/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["atelier.toml", ".atelier.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("atelier").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load_without_any_file() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.comfyui.base_url, "http://localhost:8188");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
            [ollama]
            base_url = "http://gpu-box:11434"

            [orchestrator]
            rounds_per_phase = 5
            "#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
        assert_eq!(config.orchestrator.rounds_per_phase, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.orchestrator.history_window, 10);
        assert_eq!(config.models.default, "llama3.2");
    }

    #[test]
    fn partial_models_table_merges_with_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
            [models]
            critic = "mistral"
            "#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.models.critic.as_deref(), Some("mistral"));
        assert_eq!(config.models.default, "llama3.2");
    }
}
