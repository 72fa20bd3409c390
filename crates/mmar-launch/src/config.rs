use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::overrides::Override;

/// Module path of the federated client training entry point.
pub const DEFAULT_MODULE: &str =
    "examples.federated_learning.clara_fl.client.admin_fed_local_train";

/// Client config file, relative to the MMAR root.
pub const DEFAULT_CLIENT_CONFIG: &str = "config/config_fed_client2.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub gpu: GpuConfig,
    pub paths: PathsConfig,
    pub client: ClientConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GpuConfig {
    pub cuda_visible_devices: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Entries joined with `:` into PYTHONPATH at launch. When empty the
    /// variable is left untouched.
    #[serde(default)]
    pub pythonpath: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub interpreter: String,
    pub module: String,
    pub config_file: String,
    /// `KEY=VALUE` pairs appended after `--set`, in declared order.
    #[serde(default)]
    pub overrides: Vec<Override>,
}

impl Config {
    pub fn default_for_client() -> Self {
        Self {
            gpu: GpuConfig {
                cuda_visible_devices: "1".to_string(),
            },
            paths: PathsConfig { pythonpath: vec![] },
            client: ClientConfig {
                interpreter: "python3".to_string(),
                module: DEFAULT_MODULE.to_string(),
                config_file: DEFAULT_CLIENT_CONFIG.to_string(),
                overrides: vec![
                    Override {
                        key: "secure_train".into(),
                        value: "true".into(),
                    },
                    Override {
                        key: "uid".into(),
                        value: "2".into(),
                    },
                ],
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse launch.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(mmar_root: &Path) -> PathBuf {
        mmar_root.join("launch.toml")
    }

    pub fn client_config_path(&self, mmar_root: &Path) -> PathBuf {
        mmar_root.join(&self.client.config_file)
    }
}
