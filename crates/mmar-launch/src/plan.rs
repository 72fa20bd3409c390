use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::overrides::Override;

/// The fully resolved launch: environment bindings plus argv. Built once,
/// then either rendered for display or turned into a `Command`.
#[derive(Clone, Debug)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl LaunchPlan {
    pub fn build(cfg: &Config, mmar_root: &Path, extra: &[Override]) -> Self {
        let root = mmar_root.display().to_string();

        let mut envs = vec![(
            "CUDA_VISIBLE_DEVICES".to_string(),
            cfg.gpu.cuda_visible_devices.clone(),
        )];
        if !cfg.paths.pythonpath.is_empty() {
            envs.push(("PYTHONPATH".to_string(), cfg.paths.pythonpath.join(":")));
        }
        envs.push(("MMAR_ROOT".to_string(), root.clone()));

        let mut args = vec![
            "-u".to_string(),
            "-m".to_string(),
            cfg.client.module.clone(),
            "-m".to_string(),
            root,
            "-s".to_string(),
            cfg.client.config_file.clone(),
        ];
        // configured overrides first, then any extra ones from the CLI
        if !cfg.client.overrides.is_empty() || !extra.is_empty() {
            args.push("--set".to_string());
            for o in cfg.client.overrides.iter().chain(extra.iter()) {
                args.push(o.to_string());
            }
        }

        Self {
            program: cfg.client.interpreter.clone(),
            args,
            envs,
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));
        cmd
    }

    /// One-line shell form, env bindings first, for `show` and `--dry-run`.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self
            .envs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}
