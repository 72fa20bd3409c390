use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::doctor::doctor;
use crate::overrides::Override;
use crate::plan::LaunchPlan;

pub struct Launcher {
    pub mmar_root: PathBuf,
    pub cfg: Config,
}

impl Launcher {
    /// Opens an MMAR root, loading `launch.toml` when present and falling
    /// back to the default client configuration otherwise.
    pub fn open(mmar_root: &str) -> Result<Self> {
        let root = PathBuf::from(shellexpand::tilde(mmar_root).to_string());
        let cfg_path = Config::config_path(&root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            Config::default_for_client()
        };
        Ok(Self {
            mmar_root: root,
            cfg,
        })
    }

    /// Writes the default `launch.toml` into the MMAR root if absent.
    pub fn init(mmar_root: &str) -> Result<PathBuf> {
        let root = PathBuf::from(shellexpand::tilde(mmar_root).to_string());
        let cfg_path = Config::config_path(&root);
        if !cfg_path.exists() {
            Config::default_for_client().save_to(&cfg_path)?;
        }
        Ok(cfg_path)
    }

    pub fn doctor(&self) -> Result<()> {
        doctor(&self.mmar_root, &self.cfg)
    }

    pub fn plan(&self, gpu: Option<&str>, extra: &[Override]) -> LaunchPlan {
        let mut cfg = self.cfg.clone();
        if let Some(gpu) = gpu {
            cfg.gpu.cuda_visible_devices = gpu.to_string();
        }
        LaunchPlan::build(&cfg, &self.mmar_root, extra)
    }

    /// Spawns the client and waits for it. The child's exit code comes back
    /// verbatim; a nonzero code is a result, not an error. The only launcher
    /// errors are spawn/wait failures.
    pub fn run(&self, plan: &LaunchPlan) -> Result<i32> {
        info!(command = %plan.render(), "launching federated client");
        let status = plan
            .command()
            .status()
            .with_context(|| format!("spawn {}", plan.program))?;
        // no code means the child died to a signal
        Ok(status.code().unwrap_or(1))
    }
}
