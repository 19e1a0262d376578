//! CLI argument definitions and `RunProfile` construction.
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::{AutotuneProfile, KwsModel, ModeRequest, OptLevel, RunProfile};
use crate::{
    config::LauncherConfig,
    lib::{
        errors::ProfileError,
        workspace::{ModelAssets, WorkspaceLayout},
    },
};

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Run mlonmcu simulation or deployment for the micro-KWS workload",
    long_about = None
)]
pub struct LaunchArgs {
    /// KWS model to apply.
    pub kws_model: String,
    /// Autotuning configuration to use.
    #[arg(short = 'a', long, global = true, default_value = "default")]
    pub autotune: String,
    /// Increase output verbosity.
    #[arg(short = 'p', long = "print", global = true)]
    pub print: bool,
    /// Compiler optimization level: 0, 2, or s.
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OptLevel::Os)]
    pub optimization: OptLevel,
    /// Path to config.toml (overrides KWSFLOW_CONFIG_PATH).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    /// Mode to run.
    #[command(subcommand)]
    pub mode: ModeArgs,
}

/// Mode subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ModeArgs {
    /// Run the workload on the cycle-accurate simulator.
    Simulate {
        /// Core model to simulate.
        #[arg(short = 'c', long = "core_model", default_value = "esp32c3")]
        core_model: String,
    },
    /// Compile the workload and flash it onto the device.
    Deploy {
        /// Wait for user input before flashing the device.
        #[arg(short = 'w', long)]
        wait: bool,
        /// Only flash the device without connecting to the serial monitor.
        #[arg(short = 'f', long = "flash_only")]
        flash_only: bool,
    },
}

impl LaunchArgs {
    /// Validate enumerated values and resolve the filesystem layout. Fails
    /// before any command is rendered or executed.
    pub fn into_profile(self, config: &LauncherConfig) -> Result<RunProfile, ProfileError> {
        let model = KwsModel::from_arg(&self.kws_model)?;
        let autotune = AutotuneProfile::from_arg(&self.autotune)?;
        let layout = WorkspaceLayout::resolve(&config.install_root);
        let assets = ModelAssets::resolve(&layout, model, autotune);
        let mode = match self.mode {
            ModeArgs::Simulate { core_model } => ModeRequest::Simulate { core_model },
            ModeArgs::Deploy { wait, flash_only } => ModeRequest::Deploy { wait, flash_only },
        };

        Ok(RunProfile {
            run_id: Uuid::new_v4(),
            model,
            autotune,
            optimization: self.optimization,
            verbose: self.print,
            mode,
            layout,
            assets,
        })
    }
}
