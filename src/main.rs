//! Entry point for kwsflow.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use kwsflow::{
    cli::{resolve_config_path, LaunchArgs, ModeRequest},
    config::LauncherConfig,
    flow,
    lib::telemetry::{self, RunSpan},
    report,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    telemetry::init_tracing()?;
    let args = LaunchArgs::parse();

    let config_path = resolve_config_path(args.config_override.clone())?;
    let config = LauncherConfig::load_or_default(config_path)?;
    let profile = args.into_profile(&config)?;

    match profile.mode {
        ModeRequest::Simulate { .. } => println!("Simulate mode selected."),
        ModeRequest::Deploy { .. } => println!("Deploy mode selected."),
    }

    let span = RunSpan::start(profile.run_id, profile.mode.as_str());
    let outcome = flow::run_flow(&profile).await?;

    if !outcome.success() {
        span.finish("failed", outcome.exit_code);
        return Ok(report_failure(outcome.exit_code));
    }
    span.finish("succeeded", outcome.exit_code);
    println!("\nCommand executed successfully.\n");

    if let Some(metrics) = report::collect_metrics(&profile.layout.workspace_root, &profile.mode)? {
        println!("Results from Simulation");
        println!("Compiler Optimization: {}", profile.optimization.as_str());
        println!("Model Run Cycles: {}", metrics.run_cycles);
        println!("Model Run Instructions: {}", metrics.run_instructions);
        println!("Model Run CPI: {:.6}", metrics.run_cpi);
    }

    Ok(ExitCode::SUCCESS)
}

/// Surface a toolchain failure and mirror its exit code as our own.
fn report_failure(exit_code: Option<i32>) -> ExitCode {
    match exit_code {
        Some(code) => {
            println!("\nCommand failed with exit code: {code}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        None => {
            println!("\nCommand terminated by a signal.");
            ExitCode::FAILURE
        }
    }
}
