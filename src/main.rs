use anyhow::{Context, Result};
use bootstrap::cli::commands::{ListCommand, RunCommand, ValidateCommand};
use bootstrap::cli::output::*;
use bootstrap::cli::{Cli, Command};
use bootstrap::core::config::BootstrapConfig;
use bootstrap::execution::RunReport;
use bootstrap::steps::builtin_factory;
use bootstrap::Bootstrapper;
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd).await?,
        Command::Validate(cmd) => validate_config(cmd)?,
        Command::List(cmd) => list_steps(cmd)?,
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    let path = match &cmd.file {
        Some(file) => PathBuf::from(file),
        None => BootstrapConfig::default_path()
            .context("No config file given and no user config directory available")?,
    };
    let config = BootstrapConfig::from_file(&path)
        .with_context(|| format!("Failed to load bootstrap config from {}", path.display()))?;

    println!(
        "{} Loaded bootstrap: {} ({} steps)",
        INFO,
        style(&config.name).bold(),
        config.steps.len()
    );

    let mut host = Bootstrapper::new(config, builtin_factory());

    let json = cmd.json;
    // Sized once registration has dropped unknown steps
    let progress = if json { None } else { Some(create_progress_bar(0)) };
    let setup_bar = progress.clone();
    let step_bar = progress.clone();
    let pipeline_bar = progress.clone();

    let report = host
        .activate(move |controller| {
            if let Some(bar) = &setup_bar {
                bar.set_length(controller.steps().len() as u64);
            }
            controller.on_step_completed(move |event| {
                if let Some(bar) = &step_bar {
                    bar.println(format_step_completed(event));
                    bar.inc(1);
                }
            });
            controller.on_pipeline_completed(move |event| {
                if let Some(bar) = &pipeline_bar {
                    bar.println(format_pipeline_completed(event));
                    bar.set_position(event.steps as u64);
                    bar.finish();
                }
            });
        })
        .await;

    let report = match report {
        Some(report) => report,
        None if cmd.start => host.run().await,
        None => {
            if let Some(bar) = &progress {
                bar.finish_and_clear();
            }
            println!(
                "{} Auto start is disabled for {}; pass --start to run it",
                WARN,
                style(&host.config().name).bold()
            );
            return Ok(());
        }
    };

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    print_report(&report, json)?;

    if report.fault.is_some() || report.failed_steps().next().is_some() {
        error!("Bootstrap did not complete cleanly");
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!();
    for step in &report.outcomes {
        println!("{}", format_step_report(step));
    }
    println!("\n{}", format_run_summary(report));
    Ok(())
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating bootstrap config...", INFO);

    match BootstrapConfig::from_file(&cmd.file) {
        Ok(config) => {
            let factory = builtin_factory();
            let unknown: Vec<_> = config
                .steps
                .iter()
                .filter(|step| !factory.contains(step))
                .collect();

            println!("{} Bootstrap configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Auto start: {}", style(config.auto_start).cyan());
            println!("  Steps: {}", style(config.steps.len()).cyan());
            for step in &unknown {
                println!(
                    "  {} '{}' is not a built-in step and will be rejected",
                    WARN,
                    style(step).yellow()
                );
            }

            if cmd.json {
                let data = serde_json::json!({
                    "config": config,
                    "unknown_steps": unknown,
                });
                println!("\n{}", serde_json::to_string_pretty(&data)?);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn list_steps(cmd: &ListCommand) -> Result<()> {
    let kinds = builtin_factory().kinds();

    if cmd.json {
        let data = serde_json::json!({ "steps": kinds });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Built-in steps:", INFO);
    for kind in &kinds {
        println!("  {}", style(kind).bold());
    }
    Ok(())
}
