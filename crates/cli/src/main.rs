//! Docflow CLI - simulated deployment and document upload.

mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docflow_core::catalog::{
    COMPLIANCE_PRESETS, INDUSTRIES, MODELS, REGIONS, WORKFLOW_TEMPLATES,
};
use docflow_core::{presets, DeploymentConfig, ProgressState, StageSequence, WizardStep};
use docflow_progress::{
    DriverConfig, FnSink, PresentationBinding, ProgressDriver, ProgressSink, RunOutcome,
    RunStatus,
};

use render::{glyph, Panel, TerminalView};

#[derive(Parser)]
#[command(name = "docflow")]
#[command(about = "AI document processing platform simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a document processing system
    Deploy {
        /// Industry id
        #[arg(long)]
        industry: String,
        /// Use case, one of the industry's use cases
        #[arg(long)]
        use_case: String,
        /// Model id
        #[arg(long, default_value = "llama-3-70b")]
        model: String,
        /// Region id
        #[arg(long)]
        region: String,
        /// Compliance preset id
        #[arg(long)]
        compliance: String,
        /// Organization name
        #[arg(long)]
        organization: String,
        /// Team size
        #[arg(long, default_value = "")]
        team_size: String,
        /// Expected document volume
        #[arg(long, default_value = "")]
        document_volume: String,
        /// Milliseconds between stages
        #[arg(long, default_value_t = presets::DEPLOYMENT_TICK.as_millis() as u64)]
        tick_ms: u64,
        /// Emit JSON lines instead of a progress bar
        #[arg(long)]
        json: bool,
    },
    /// Upload documents
    Upload {
        /// Milliseconds between ticks
        #[arg(long, default_value_t = presets::UPLOAD_TICK.as_millis() as u64)]
        tick_ms: u64,
        /// Percent added per tick
        #[arg(long, default_value_t = presets::UPLOAD_STEP)]
        step: u8,
        /// Emit JSON lines instead of a progress bar
        #[arg(long)]
        json: bool,
    },
    /// List the deployment catalogs and workflow templates
    Catalog,
}

fn init_logging() {
    // stdout carries the rendered view, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            industry,
            use_case,
            model,
            region,
            compliance,
            organization,
            team_size,
            document_volume,
            tick_ms,
            json,
        } => {
            let config = DeploymentConfig {
                industry,
                use_case,
                model,
                region,
                compliance,
                organization,
                team_size,
                document_volume,
            };
            config.validate()?;

            info!(
                "Deploying {} for {} in {}",
                config.model, config.organization, config.region
            );
            println!(
                "Step {}: {}",
                WizardStep::Deploy.number(),
                WizardStep::Deploy.title()
            );

            let driver = ProgressDriver::new(
                DriverConfig::new()
                    .with_tick_interval(Duration::from_millis(tick_ms))
                    .stage_by_stage(),
            );
            let outcome = simulate(
                &driver,
                presets::deployment_stages(),
                Panel::Deployment(config.clone()),
                json,
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string(&serde_json::json!({
                    "outcome": outcome,
                    "config": config,
                }))?);
            }
        }
        Commands::Upload { tick_ms, step, json } => {
            let driver = ProgressDriver::new(
                DriverConfig::new()
                    .with_tick_interval(Duration::from_millis(tick_ms))
                    .with_step(step),
            );
            let outcome = simulate(&driver, presets::upload_stages(), Panel::Upload, json).await?;

            if json {
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Commands::Catalog => {
            println!("Industries:");
            for industry in INDUSTRIES {
                println!("  {} {} ({}) - {}", glyph(industry.icon), industry.name, industry.id, industry.description);
                for use_case in industry.use_cases {
                    println!("      - {}", use_case);
                }
            }

            println!("Models:");
            for model in MODELS {
                let marker = if model.recommended { " *" } else { "" };
                println!(
                    "  {} ({}) {:?} ${}/month{}",
                    model.name, model.id, model.tier, model.monthly_price, marker
                );
                println!("      {}", model.specs);
            }

            println!("Regions:");
            for region in REGIONS {
                println!("  {} ({}) {} {}", region.name, region.id, region.location, region.latency);
            }

            println!("Compliance:");
            for preset in COMPLIANCE_PRESETS {
                println!("  {} ({}) - {}", preset.name, preset.id, preset.description);
            }

            println!("Workflow templates:");
            for template in WORKFLOW_TEMPLATES {
                println!(
                    "  {} {} ({}) {:?}, {:?}, ~{}",
                    glyph(template.icon),
                    template.name,
                    template.id,
                    template.category,
                    template.difficulty,
                    template.estimated_setup_time
                );
                println!("      {}", template.description);
                for (n, step) in template.steps.iter().enumerate() {
                    println!("      {}. {}", n + 1, step);
                }
            }
        }
    }

    Ok(())
}

/// Run one simulation to completion, or until Ctrl+C.
async fn simulate(
    driver: &ProgressDriver,
    sequence: StageSequence,
    panel: Panel,
    json: bool,
) -> Result<RunOutcome> {
    let sink: Arc<dyn ProgressSink> = if json {
        Arc::new(FnSink(|state: &ProgressState| {
            if let Ok(line) = serde_json::to_string(state) {
                println!("{}", line);
            }
        }))
    } else {
        Arc::new(PresentationBinding::new(TerminalView::new(std::io::stdout(), panel)))
    };

    let handle = driver.start(sequence, sink)?;

    let outcome = tokio::select! {
        outcome = handle.wait() => outcome,
        _ = tokio::signal::ctrl_c() => {
            handle.stop();
            warn!("Interrupted, run {} stopped", handle.run_id());
            handle.wait().await
        }
    };

    if !json {
        match outcome.status {
            RunStatus::Completed => {}
            RunStatus::Stopped => {
                println!();
                println!("Stopped at {}%: {}", outcome.last.percent, outcome.last.label);
            }
            RunStatus::Aborted => {
                println!();
                println!("Aborted at {}%: {}", outcome.last.percent, outcome.last.label);
            }
        }
    }

    Ok(outcome)
}
