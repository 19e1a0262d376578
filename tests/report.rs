//! Behavior of session-report parsing against fixture workspaces.

use std::{fs, path::PathBuf};

use tempfile::{tempdir, TempDir};

use kwsflow::{
    cli::ModeRequest,
    lib::errors::ReportError,
    report::{self, RunMetrics},
};

fn workspace_with_report(contents: &str) -> (TempDir, PathBuf) {
    let temp = tempdir().expect("can create temporary directory");
    let workspace = temp.path().join("workspace_kws");
    let session_dir = workspace.join("temp/sessions/latest");
    fs::create_dir_all(&session_dir).expect("can create session directory");
    fs::write(session_dir.join("report.csv"), contents).expect("can write report fixture");
    (temp, workspace)
}

fn simulate_mode() -> ModeRequest {
    ModeRequest::Simulate {
        core_model: "esp32c3".to_string(),
    }
}

#[test]
fn only_the_last_row_is_authoritative() {
    let (_temp, workspace) = workspace_with_report(
        "Run Cycles,Run Instructions,Run CPI\n100,50,2.0\n300,150,2.0\n",
    );

    let metrics = report::parse_latest_report(&workspace).expect("two-row report should parse");

    assert_eq!(
        metrics,
        RunMetrics {
            run_cycles: 300,
            run_instructions: 150,
            run_cpi: 2.0,
        }
    );
}

#[test]
fn surrounding_columns_are_ignored() {
    let (_temp, workspace) = workspace_with_report(
        "Session,Run Cycles,Run Instructions,Run CPI,Validation\n\
         1,123456,65536,1.884155,PASS\n",
    );

    let metrics = report::parse_latest_report(&workspace).expect("report should parse");

    assert_eq!(metrics.run_cycles, 123_456);
    assert_eq!(metrics.run_instructions, 65_536);
    assert!((metrics.run_cpi - 1.884_155).abs() < 1e-9);
}

#[test]
fn header_only_report_has_no_rows() {
    let (_temp, workspace) = workspace_with_report("Run Cycles,Run Instructions,Run CPI\n");

    let error = report::parse_latest_report(&workspace)
        .expect_err("header-only report should be rejected");

    assert!(matches!(error, ReportError::NoRows { .. }), "{error:?}");
}

#[test]
fn missing_workspace_root_is_rejected_before_opening_anything() {
    let error = report::parse_latest_report(std::path::Path::new("/definitely/not/a/workspace"))
        .expect_err("missing workspace should be rejected");

    assert!(
        matches!(error, ReportError::WorkspaceMissing { .. }),
        "{error:?}"
    );
}

#[test]
fn missing_metric_column_names_the_column() {
    let (_temp, workspace) =
        workspace_with_report("Run Cycles,Run Instructions\n100,50\n");

    let error = report::parse_latest_report(&workspace)
        .expect_err("report without the CPI column should be rejected");

    match error {
        ReportError::MissingColumn { column, .. } => assert_eq!(column, "Run CPI"),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn non_numeric_metric_value_names_the_value() {
    let (_temp, workspace) = workspace_with_report(
        "Run Cycles,Run Instructions,Run CPI\nmany,50,2.0\n",
    );

    let error = report::parse_latest_report(&workspace)
        .expect_err("non-numeric cycle count should be rejected");

    match error {
        ReportError::InvalidValue { column, value, .. } => {
            assert_eq!(column, "Run Cycles");
            assert_eq!(value, "many");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn deploy_mode_never_consults_the_filesystem() {
    let mode = ModeRequest::Deploy {
        wait: true,
        flash_only: false,
    };

    let result =
        report::collect_metrics(std::path::Path::new("/definitely/not/a/workspace"), &mode)
            .expect("deploy collection should succeed without a workspace");

    assert_eq!(result, None);
}

#[test]
fn simulate_mode_collects_through_the_same_path() {
    let (_temp, workspace) =
        workspace_with_report("Run Cycles,Run Instructions,Run CPI\n42,21,2.0\n");

    let metrics = report::collect_metrics(&workspace, &simulate_mode())
        .expect("simulate collection should succeed")
        .expect("simulate collection should yield metrics");

    assert_eq!(metrics.run_cycles, 42);
}
