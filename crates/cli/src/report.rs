use hyperrect::cfg::GeomCfg;
use serde::Serialize;
use std::process::Command;

/// Build metadata printed by `hyperrect-cli report`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub version: &'static str,
    pub code_rev: String,
    pub defaults: Defaults,
}

#[derive(Debug, Serialize)]
pub struct Defaults {
    pub accuracy: f64,
    pub norm: String,
}

impl Report {
    pub fn collect() -> Self {
        let cfg = GeomCfg::default();
        Self {
            version: hyperrect::VERSION,
            code_rev: current_git_rev(),
            defaults: Defaults {
                accuracy: cfg.accuracy,
                norm: format!("{:?}", cfg.norm),
            },
        }
    }
}

/// Commit id from `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
