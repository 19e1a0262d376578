//! Shared helpers for building `mlonmcu flow run` command lines.
//!
//! Arguments are assembled as a token list and only joined into a shell line
//! at the end: the venv activation step is the one part of the invocation
//! that strictly requires a shell.

use std::path::Path;

const GCC_NAME: &str = "riscv32-esp-elf";
const FLASH_START: &str = "0x42000000";
const FLASH_SIZE: &str = "0x800000";
const WIFI_CMAKE_DEFS: &str = "\"{'CONFIG_ENABLE_WIFI': 1}\"";

/// Paths every flow invocation depends on regardless of mode.
pub struct FlowCommandConfig<'a> {
    pub venv_dir: &'a Path,
    pub gcc_install_dir: &'a Path,
}

pub struct SimulateRequest<'a> {
    pub model_file: &'a Path,
    pub autotune_log: &'a Path,
    pub optimization: &'a str,
    pub core_model: &'a str,
    pub verbose: bool,
}

pub struct DeployRequest<'a> {
    pub model_file: &'a Path,
    pub autotune_log: &'a Path,
    pub project_template_dir: &'a Path,
    pub optimization: &'a str,
    pub wait_for_user: bool,
    pub flash_only: bool,
    pub verbose: bool,
}

fn as_flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}

/// Argument list for a cycle-accurate ETISS simulation with performance
/// counters enabled.
pub fn simulate_args(
    config: &FlowCommandConfig<'_>,
    request: &SimulateRequest<'_>,
) -> Vec<String> {
    let mut args = vec![
        request.model_file.display().to_string(),
        "--target".into(),
        "etiss_perf".into(),
        "-c".into(),
        "run.export_optional=1".into(),
        "-c".into(),
        format!("etiss_perf.print_outputs={}", as_flag(request.verbose)),
    ];
    push_backend_args(&mut args);
    push_autotune_args(&mut args, request.autotune_log);
    push_gcc_args(&mut args, config.gcc_install_dir);
    for setting in [
        "etiss_perf.fpu=none".to_string(),
        "etiss_perf.atomic=0".to_string(),
        "etiss_perf.compressed=0".to_string(),
    ] {
        args.push("-c".into());
        args.push(setting);
    }
    args.push("-f".into());
    args.push("perf_sim".into());
    for setting in [
        format!("mlif.optimize={}", request.optimization),
        format!("perf_sim.core={}", request.core_model),
        format!("etiss_perf.flash_start={FLASH_START}"),
        format!("etiss_perf.flash_size={FLASH_SIZE}"),
    ] {
        args.push("-c".into());
        args.push(setting);
    }
    if request.verbose {
        args.push("-v".into());
    }
    args
}

/// Argument list for an espidf build-and-flash run on the ESP32-C3 board.
pub fn deploy_args(config: &FlowCommandConfig<'_>, request: &DeployRequest<'_>) -> Vec<String> {
    let mut args = vec![
        request.model_file.display().to_string(),
        "--target".into(),
        "esp32c3".into(),
        "--platform".into(),
        "espidf".into(),
    ];
    for setting in [
        format!("espidf.print_outputs={}", as_flag(request.verbose)),
        format!("esp32c3.print_outputs={}", as_flag(request.verbose)),
        "run.export_optional=1".to_string(),
    ] {
        args.push("-c".into());
        args.push(setting);
    }
    push_backend_args(&mut args);
    push_autotune_args(&mut args, request.autotune_log);
    for setting in [
        format!(
            "espidf.project_template={}",
            request.project_template_dir.display()
        ),
        format!("espidf.wait_for_user={}", as_flag(request.wait_for_user)),
        "espidf.append_sdkconfig_defaults=1".to_string(),
        format!("espidf.flash_only={}", as_flag(request.flash_only)),
    ] {
        args.push("-c".into());
        args.push(setting);
    }
    push_gcc_args(&mut args, config.gcc_install_dir);
    for setting in [
        format!("espidf.optimize={}", request.optimization),
        format!("espidf.extra_cmake_defs={WIFI_CMAKE_DEFS}"),
    ] {
        args.push("-c".into());
        args.push(setting);
    }
    if request.verbose {
        args.push("-v".into());
    }
    args
}

fn push_backend_args(args: &mut Vec<String>) {
    args.push("--backend".into());
    args.push("tvmaotplus".into());
    for setting in ["tvmaotplus.desired_layout=NCHW", "tvmaot.desired_layout=NCHW"] {
        args.push("-c".into());
        args.push(setting.into());
    }
}

fn push_autotune_args(args: &mut Vec<String>, autotune_log: &Path) {
    args.push("-f".into());
    args.push("autotuned".into());
    args.push("-c".into());
    args.push(format!("autotuned.results_file={}", autotune_log.display()));
}

fn push_gcc_args(args: &mut Vec<String>, gcc_install_dir: &Path) {
    args.push("-c".into());
    args.push(format!(
        "riscv_gcc_rv32.install_dir={}",
        gcc_install_dir.display()
    ));
    args.push("-c".into());
    args.push(format!("riscv_gcc_rv32.name={GCC_NAME}"));
}

/// Two-line shell script: venv activation, then the flow invocation.
pub fn render_flow_script(venv_dir: &Path, args: &[String]) -> String {
    format!(
        "source {}/bin/activate\npython3 -m mlonmcu.cli.main flow run {}",
        venv_dir.display(),
        args.join(" ")
    )
}
