//! `RunProfile` and model/config resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use uuid::Uuid;

use crate::lib::{
    errors::ProfileError,
    mlonmcu,
    workspace::{ModelAssets, WorkspaceLayout},
};

const DEFAULT_CONFIG: &str = "config.toml";
const CONFIG_ENV: &str = "KWSFLOW_CONFIG_PATH";

/// KWS models shipped under `target_sw/kws`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KwsModel {
    Kws1,
}

impl KwsModel {
    /// Parse a CLI model identifier.
    pub fn from_arg(value: &str) -> Result<Self, ProfileError> {
        match value {
            "kws_1" => Ok(KwsModel::Kws1),
            _ => Err(ProfileError::UnknownModel {
                value: value.to_string(),
            }),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            KwsModel::Kws1 => "kws_1",
        }
    }
}

/// Named autotuning result sets shipped next to the models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutotuneProfile {
    Default,
}

impl AutotuneProfile {
    /// Parse a CLI autotune identifier.
    pub fn from_arg(value: &str) -> Result<Self, ProfileError> {
        match value {
            "default" => Ok(AutotuneProfile::Default),
            _ => Err(ProfileError::UnknownAutotune {
                value: value.to_string(),
            }),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            AutotuneProfile::Default => "default",
        }
    }
}

/// Compiler optimization level forwarded to the toolchain.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OptLevel {
    #[value(name = "0")]
    O0,
    #[value(name = "2")]
    O2,
    #[value(name = "s")]
    Os,
}

impl OptLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OptLevel::O0 => "0",
            OptLevel::O2 => "2",
            OptLevel::Os => "s",
        }
    }
}

/// Mode-specific invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeRequest {
    Simulate { core_model: String },
    Deploy { wait: bool, flash_only: bool },
}

impl ModeRequest {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModeRequest::Simulate { .. } => "simulate",
            ModeRequest::Deploy { .. } => "deploy",
        }
    }
}

/// Resolved invocation profile. Immutable once built; one per run.
#[derive(Debug, Clone)]
pub struct RunProfile {
    pub run_id: Uuid,
    pub model: KwsModel,
    pub autotune: AutotuneProfile,
    pub optimization: OptLevel,
    pub verbose: bool,
    pub mode: ModeRequest,
    pub layout: WorkspaceLayout,
    pub assets: ModelAssets,
}

impl RunProfile {
    /// Render the shell script executing this profile. Deterministic: equal
    /// profiles yield byte-identical scripts.
    pub fn render_script(&self) -> String {
        let config = mlonmcu::FlowCommandConfig {
            venv_dir: &self.layout.venv_dir,
            gcc_install_dir: &self.layout.gcc_install_dir,
        };
        let args = match &self.mode {
            ModeRequest::Simulate { core_model } => mlonmcu::simulate_args(
                &config,
                &mlonmcu::SimulateRequest {
                    model_file: &self.assets.model_file,
                    autotune_log: &self.assets.autotune_log,
                    optimization: self.optimization.as_str(),
                    core_model,
                    verbose: self.verbose,
                },
            ),
            ModeRequest::Deploy { wait, flash_only } => mlonmcu::deploy_args(
                &config,
                &mlonmcu::DeployRequest {
                    model_file: &self.assets.model_file,
                    autotune_log: &self.assets.autotune_log,
                    project_template_dir: &self.layout.platform_template_dir,
                    optimization: self.optimization.as_str(),
                    wait_for_user: *wait,
                    flash_only: *flash_only,
                    verbose: self.verbose,
                },
            ),
        };
        mlonmcu::render_flow_script(&self.layout.venv_dir, &args)
    }
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = override_path
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
