//! CLI entrypoint module structure.

pub mod args;
pub mod profile;

pub use args::{LaunchArgs, ModeArgs};
pub use profile::{
    resolve_config_path, AutotuneProfile, KwsModel, ModeRequest, OptLevel, RunProfile,
};
