//! `launchdash` - CLI for the launch records dashboard
//!
//! This binary serves the dashboard over HTTP and prints the dashboard's
//! charts from the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use launchdash::chart::{PieChart, ScatterChart};
use launchdash::cli::{
    Cli, Command, ConfigCommand, OutputFormat, PieCommand, ScatterCommand, ServeCommand,
    SitesCommand, SummaryCommand,
};
use launchdash::{
    init_logging, payload_outcome_scatter, site_outcome_pie, ChartSpec, Config, DashboardLayout,
    DashboardServer, LaunchTable,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // `config` reads configuration files itself, so it must not fail early on
    // an invalid default file
    let (path, data) = (cli.config, cli.data);
    match cli.command {
        Command::Config(config_cmd) => handle_config(path, data, config_cmd),
        Command::Serve(serve_cmd) => handle_serve(load_config(path, data)?, serve_cmd).await,
        Command::Sites(sites_cmd) => handle_sites(&load_config(path, data)?, &sites_cmd),
        Command::Summary(summary_cmd) => handle_summary(&load_config(path, data)?, &summary_cmd),
        Command::Pie(pie_cmd) => handle_pie(&load_config(path, data)?, &pie_cmd),
        Command::Scatter(scatter_cmd) => handle_scatter(&load_config(path, data)?, &scatter_cmd),
    }
}

/// Load configuration, then apply the command-line data override.
fn load_config(path: Option<PathBuf>, data: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = Config::load_from(path)?;
    if let Some(data) = data {
        config.data.path = Some(data);
    }
    Ok(config)
}

fn load_table(config: &Config) -> anyhow::Result<LaunchTable> {
    let path = config.data_path();
    LaunchTable::load(&path, &config.data.columns).map_err(|err| {
        let context = if err.is_data_error() {
            format!("launch data in {} was rejected", path.display())
        } else {
            format!("could not read launch data from {}", path.display())
        };
        anyhow::Error::new(err).context(context)
    })
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    // Fail before binding rather than serve an empty dashboard
    let table = load_table(&config)?;
    let layout = DashboardLayout::new(&config.dashboard, &table);

    DashboardServer::new(config.server, table, layout)
        .start()
        .await?;
    Ok(())
}

fn handle_sites(config: &Config, cmd: &SitesCommand) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let layout = DashboardLayout::new(&config.dashboard, &table);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&layout.site_options)?);
    } else {
        for option in &layout.site_options {
            println!("{:<16} {}", option.value, option.label);
        }
    }
    Ok(())
}

fn handle_summary(config: &Config, cmd: &SummaryCommand) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let summary = table.summary();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Launch data summary");
    println!("-------------------");
    println!("Source:        {}", config.data_path().display());
    println!("Records:       {}", summary.records);
    println!("Successes:     {}", summary.successes);
    println!("Sites:         {}", summary.sites.join(", "));
    match (summary.payload_min_kg, summary.payload_max_kg) {
        (Some(min), Some(max)) => println!("Payload (kg):  {min} - {max}"),
        _ => println!("Payload (kg):  n/a"),
    }
    println!("Fingerprint:   {}", summary.fingerprint);
    Ok(())
}

fn handle_pie(config: &Config, cmd: &PieCommand) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let spec = site_outcome_pie(&table, &cmd.selection());
    print_chart(&spec, cmd.format)
}

fn handle_scatter(config: &Config, cmd: &ScatterCommand) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let layout = DashboardLayout::new(&config.dashboard, &table);
    let range = cmd.range(layout.initial_range());
    let spec = payload_outcome_scatter(&table, &cmd.selection(), range);
    print_chart(&spec, cmd.format)
}

fn print_chart(spec: &ChartSpec, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(spec)?),
        OutputFormat::Plotly => println!("{}", serde_json::to_string_pretty(&spec.to_plotly())?),
        OutputFormat::Plain => match spec {
            ChartSpec::Pie(pie) => print_pie(pie),
            ChartSpec::Scatter(scatter) => print_scatter(scatter),
        },
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn print_pie(pie: &PieChart) {
    println!("{}", pie.title);
    println!("{}", "-".repeat(pie.title.len()));
    if pie.slices.is_empty() {
        println!("(no data)");
        return;
    }

    let total = pie.total();
    for slice in &pie.slices {
        let share = if total == 0 {
            0.0
        } else {
            slice.value as f64 * 100.0 / total as f64
        };
        let color = slice
            .color
            .as_deref()
            .map(|c| format!("  [{c}]"))
            .unwrap_or_default();
        println!("{:<16} {:>6}  {share:5.1}%{color}", slice.label, slice.value);
    }
}

fn print_scatter(scatter: &ScatterChart) {
    println!("{}", scatter.title);
    println!("{}", "-".repeat(scatter.title.len()));
    if scatter.series.is_empty() {
        println!("(no data)");
        return;
    }

    for series in &scatter.series {
        println!("{} ({} launches)", series.name, series.points.len());
        for point in &series.points {
            println!("  {:>10.1} kg  class={}  {}", point.x, point.y, point.site);
        }
    }
    println!("Total points: {}", scatter.point_count());
}

fn handle_config(
    config_path: Option<PathBuf>,
    data: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = &load_config(config_path, data)?;
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let columns = &config.data.columns;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Data]");
                println!("  Path:               {}", config.data_path().display());
                println!("  Site column:        {}", columns.site);
                println!("  Outcome column:     {}", columns.outcome);
                println!("  Payload column:     {}", columns.payload);
                println!("  Booster column:     {}", columns.booster_category);
                println!();
                println!("[Server]");
                println!("  Address:            {}", config.server.socket_addr());
                println!(
                    "  CORS origins:       {}",
                    if config.server.cors_origins.is_empty() {
                        "any".to_string()
                    } else {
                        config.server.cors_origins.join(", ")
                    }
                );
                println!();
                println!("[Dashboard]");
                println!("  Title:              {}", config.dashboard.title);
                println!(
                    "  Slider:             {} - {} (step {}, marks every {})",
                    config.dashboard.slider_min,
                    config.dashboard.slider_max,
                    config.dashboard.slider_step,
                    config.dashboard.mark_interval
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration at {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
