use anyhow::{anyhow, Result};
use std::path::Path;

use crate::config::Config;

/// Preflight checks. Opt-in only: the launch path itself performs no
/// validation and forwards whatever the client process returns.
pub fn doctor(mmar_root: &Path, cfg: &Config) -> Result<()> {
    if !mmar_root.is_dir() {
        return Err(anyhow!("MMAR root not found: {}", mmar_root.display()));
    }

    let client_cfg = cfg.client_config_path(mmar_root);
    if !client_cfg.is_file() {
        return Err(anyhow!(
            "client config file not found: {}",
            client_cfg.display()
        ));
    }

    for entry in &cfg.paths.pythonpath {
        if !Path::new(entry).is_dir() {
            return Err(anyhow!("PYTHONPATH entry not found: {}", entry));
        }
    }

    let out = std::process::Command::new(&cfg.client.interpreter)
        .arg("--version")
        .output();
    match out {
        Ok(o) if o.status.success() => Ok(()),
        _ => Err(anyhow!(
            "interpreter `{}` not found on PATH",
            cfg.client.interpreter
        )),
    }
}
