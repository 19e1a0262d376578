//! Spawn the rendered toolchain script and interpret its exit status.

use tokio::process::Command;
use tracing::info;

use crate::{cli::RunProfile, lib::errors::FlowError};

/// The toolchain locates its workspace state through this variable.
const MLONMCU_HOME_ENV: &str = "MLONMCU_HOME";

/// Exit status of one toolchain invocation. A non-zero code is a reported
/// outcome, not an error: the caller surfaces it and mirrors it as the
/// launcher's own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Toolchain exit code; `None` when the shell died to a signal.
    pub exit_code: Option<i32>,
}

impl FlowOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Execute the profile's flow script through a shell.
///
/// Stdio is inherited so the toolchain's own output streams to the user and
/// deploy mode can prompt before flashing. Blocks until the toolchain
/// terminates; no timeout is enforced.
pub async fn run_flow(profile: &RunProfile) -> Result<FlowOutcome, FlowError> {
    let script = profile.render_script();

    info!(
        target: "kwsflow::flow",
        run_id = %profile.run_id,
        mode = profile.mode.as_str(),
        model = profile.model.as_str(),
        optimization = profile.optimization.as_str(),
        "Starting toolchain flow"
    );

    let mut command = Command::new("bash");
    command.kill_on_drop(true);
    command.arg("-c").arg(&script);
    command.env(MLONMCU_HOME_ENV, &profile.layout.workspace_root);

    let status = command
        .status()
        .await
        .map_err(|source| FlowError::Spawn { source })?;

    Ok(FlowOutcome {
        exit_code: status.code(),
    })
}
