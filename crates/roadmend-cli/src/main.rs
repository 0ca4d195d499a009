//! CLI binary for roadmend: find places cut off from the regional center and
//! plan which blocked roads to reopen.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roadmend_analysis::components::analyze;
use roadmend_analysis::error::AnalysisError;
use roadmend_analysis::export::{ExportFormat, ExportOptions, export};
use roadmend_analysis::report::{self, Report};
use roadmend_analysis::restore::{RestoreOptions, restore};
use roadmend_core::config::RoadmendConfig;
use roadmend_core::storage::{self, NetworkFormat};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roadmend", about = "Road network connectivity and restoration planner")]
struct Cli {
    /// Configuration file (defaults to ./roadmend.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List places that cannot reach the regional center, one group per line
    Disconnected {
        /// Road network file (text or .json)
        input: PathBuf,
    },

    /// Print the roads to restore and their total cost
    Restore {
        /// Road network file (text or .json)
        input: PathBuf,
    },

    /// Analyze a network and write the full report to a file
    Solve {
        /// Road network file (text or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Report destination
        #[arg(short, long)]
        output: PathBuf,

        /// Write the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the network as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Road network file (text or .json)
        input: PathBuf,

        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Highlight the roads chosen by the restoration planner
        #[arg(long)]
        with_plan: bool,
    },

    /// Show network statistics
    Info {
        /// Road network file (text or .json)
        input: PathBuf,
    },

    /// Check that a network file parses and can be restored
    Validate {
        /// Road network file (text or .json)
        input: PathBuf,
    },

    /// Rewrite a network file in another format (chosen by extension)
    Convert {
        /// Source file
        input: PathBuf,

        /// Destination file; `.json` writes JSON, anything else the text format
        output: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<RoadmendConfig> {
    let config = match &cli.config {
        Some(path) => RoadmendConfig::load_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            RoadmendConfig::load(&cwd)?
        }
    };
    tracing::debug!(
        "center category '{}', {} strategy, costs in {}",
        config.analysis.center_category,
        config.analysis.strategy,
        config.report.cost_unit
    );
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Disconnected { input } => cmd_disconnected(&config, &input),
        Commands::Restore { input } => cmd_restore(&config, &input),
        Commands::Solve {
            input,
            output,
            json,
        } => cmd_solve(&config, &input, &output, json),
        Commands::Export {
            input,
            format,
            with_plan,
        } => cmd_export(&config, &input, &format, with_plan),
        Commands::Info { input } => cmd_info(&config, &input),
        Commands::Validate { input } => cmd_validate(&config, &input),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
    }
}

fn cmd_disconnected(config: &RoadmendConfig, input: &Path) -> Result<()> {
    let graph = storage::load(input)?;
    let partition = analyze(&graph, &config.analysis.center_category)?;

    if partition.is_connected() {
        eprintln!("Every place can reach the regional center.");
        return Ok(());
    }
    print!("{}", report::render_disconnected(&partition));
    Ok(())
}

fn cmd_restore(config: &RoadmendConfig, input: &Path) -> Result<()> {
    let graph = storage::load(input)?;
    let plan = restore(&graph, &RestoreOptions::from(&config.analysis))?;

    if plan.is_empty() {
        eprintln!("No roads need to be restored.");
        return Ok(());
    }
    print!("{}", report::render_plan(&plan, &config.report.cost_unit));
    Ok(())
}

fn cmd_solve(config: &RoadmendConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let graph = storage::load(input)?;
    let report = Report::build(
        &graph,
        &RestoreOptions::from(&config.analysis),
        &config.report.cost_unit,
    )?;

    let content = if json {
        report.to_json().context("failed to serialize report")?
    } else {
        report.to_text()
    };
    storage::write_output(output, &content)?;

    match report.total_cost() {
        Some(cost) => eprintln!(
            "Report written to {} ({} road(s) to restore, {} {})",
            output.display(),
            report_road_count(&report),
            cost,
            config.report.cost_unit
        ),
        None => eprintln!(
            "Report written to {} (restoration impossible)",
            output.display()
        ),
    }
    Ok(())
}

fn report_road_count(report: &Report) -> usize {
    match &report.restoration {
        report::Restoration::Planned { roads, .. } => roads.len(),
        report::Restoration::Impossible { .. } => 0,
    }
}

fn cmd_export(config: &RoadmendConfig, input: &Path, format: &str, with_plan: bool) -> Result<()> {
    let Some(export_format) = ExportFormat::from_name(format) else {
        anyhow::bail!("Unknown export format: {}. Use 'dot' or 'mermaid'.", format);
    };

    let graph = storage::load(input)?;
    let plan = if with_plan {
        Some(restore(&graph, &RestoreOptions::from(&config.analysis))?)
    } else {
        None
    };

    let options = ExportOptions {
        center_category: &config.analysis.center_category,
        plan: plan.as_ref(),
    };
    print!("{}", export(&graph, export_format, &options));
    Ok(())
}

fn cmd_info(config: &RoadmendConfig, input: &Path) -> Result<()> {
    let graph = storage::load(input)?;
    let category = &config.analysis.center_category;

    println!("Network: {}", input.display());
    println!("Places: {}", graph.place_count());
    println!("Roads: {}", graph.road_count());
    println!(
        "Blocked roads: {} (total cost {} {})",
        graph.blocked_count(),
        graph.total_blocked_cost(),
        config.report.cost_unit
    );
    println!("Regional centers: {}", graph.regional_centers(category).count());

    match analyze(&graph, category) {
        Ok(partition) => {
            println!("Components: {}", partition.component_count());
            println!("Central component: {} place(s)", partition.central.len());
            println!(
                "Disconnected: {} place(s) in {} group(s)",
                partition.disconnected_places().len(),
                partition.isolated.len()
            );
        }
        Err(err) => println!("Components: unavailable ({})", err),
    }
    Ok(())
}

fn cmd_validate(config: &RoadmendConfig, input: &Path) -> Result<()> {
    let graph = storage::load(input)?;
    let category = &config.analysis.center_category;
    let mut issues = 0;

    // 1. Regional centers
    let centers = graph.regional_centers(category).count();
    if centers == 0 {
        println!("ERROR: no place of category '{}'", category);
        issues += 1;
    } else if centers > 1 {
        println!(
            "WARN: {} places of category '{}'; the first one anchors the center",
            centers, category
        );
    }

    // 2. Places without any road
    for place in graph.places().filter(|p| graph.neighbors(p).next().is_none()) {
        println!("WARN: place without roads: {}", place);
    }

    // 3. Reachability with every blocked road reopened
    if centers > 0 {
        match restore(&graph, &RestoreOptions::from(&config.analysis)) {
            Ok(_) => {}
            Err(AnalysisError::RestorationImpossible { stranded, .. }) => {
                for place in stranded {
                    println!("ERROR: unreachable even with all roads open: {}", place);
                    issues += 1;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    if issues > 0 {
        anyhow::bail!("found {} issue(s) in {}", issues, input.display());
    }

    eprintln!("Network is valid. No issues found.");
    eprintln!(
        "  {} places, {} roads, {} blocked",
        graph.place_count(),
        graph.road_count(),
        graph.blocked_count()
    );
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<()> {
    let graph = storage::load(input)?;
    let kind = NetworkFormat::from_path(output);
    storage::save_as(output, &graph, kind)?;

    eprintln!(
        "Converted {} -> {} ({:?}, {} places, {} roads)",
        input.display(),
        output.display(),
        kind,
        graph.place_count(),
        graph.road_count()
    );
    Ok(())
}
