//! Deterministic filesystem layout for the toolchain workspace and model
//! assets. Every path here is a pure function of the install root and the
//! selected model.

use std::path::{Path, PathBuf};

use crate::cli::{AutotuneProfile, KwsModel};

/// GCC toolchain installed by espidf inside the workspace deps tree.
const GCC_INSTALL_SUBDIR: &str =
    "deps/install/espidf/tools/riscv32-esp-elf/esp-14.2.0_20241119/riscv32-esp-elf";

/// Report written by the most recent toolchain session.
const LATEST_REPORT_SUBPATH: &str = "temp/sessions/latest/report.csv";

/// Filesystem layout rooted at the launcher install directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub install_root: PathBuf,
    pub mlonmcu_dir: PathBuf,
    pub venv_dir: PathBuf,
    pub workspace_root: PathBuf,
    pub target_sw_dir: PathBuf,
    pub platform_template_dir: PathBuf,
    pub gcc_install_dir: PathBuf,
}

impl WorkspaceLayout {
    /// Derive every toolchain path from the install root.
    pub fn resolve(install_root: &Path) -> Self {
        let mlonmcu_dir = install_root.join("mlonmcu");
        let workspace_root = mlonmcu_dir.join("workspace_kws");
        let target_sw_dir = install_root.join("target_sw");
        Self {
            install_root: install_root.to_path_buf(),
            venv_dir: mlonmcu_dir.join("venv"),
            platform_template_dir: target_sw_dir.join("app/micro_kws_esp32devboard_perf"),
            gcc_install_dir: workspace_root.join(GCC_INSTALL_SUBDIR),
            workspace_root,
            mlonmcu_dir,
            target_sw_dir,
        }
    }
}

/// Model file and autotuning log shipped for one KWS model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssets {
    pub model_file: PathBuf,
    pub autotune_log: PathBuf,
}

impl ModelAssets {
    /// Locate the quantized model and its tuning log under `target_sw/kws`.
    pub fn resolve(layout: &WorkspaceLayout, model: KwsModel, autotune: AutotuneProfile) -> Self {
        let model_dir = layout.target_sw_dir.join("kws").join(model.as_str());
        match (model, autotune) {
            (KwsModel::Kws1, AutotuneProfile::Default) => Self {
                model_file: model_dir.join("micro_kws_student_quantized.tflite"),
                autotune_log: model_dir
                    .join("autotune/micro_kws_student_tuning_log_nchw_best.txt"),
            },
        }
    }
}

/// Path of the latest session report under the workspace root.
pub fn latest_report_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(LATEST_REPORT_SUBPATH)
}
