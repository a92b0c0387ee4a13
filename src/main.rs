//! Dayline Viewer CLI
//!
//! Per-person daily activity timelines from CSV data.

use clap::{Parser, Subcommand};
use dayline_viewer::{
    config::Config,
    dataset::{scan_dataset, Dataset},
    render::chart_page,
    timeline::{build_timeline, summarize},
    CSV_FORMAT_HELP, VERSION,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dayline")]
#[command(version = VERSION)]
#[command(about = "Per-person daily activity timelines from CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive viewer over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Port to bind to (0 for random)
        #[arg(long, default_value = "7700")]
        port: u16,

        /// CSV file to serve (defaults to the configured dataset)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Render timelines to SVG or HTML files
    Render {
        /// Person to render (defaults to everyone)
        #[arg(long, short)]
        person: Option<String>,

        /// CSV file to read (defaults to the configured dataset)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output directory for rendered charts
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format (svg, html, or json)
        #[arg(long, default_value = "svg")]
        format: String,
    },

    /// List the people found in a dataset
    People {
        /// CSV file to read (defaults to the configured dataset)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Scan a dataset for reversed or overlapping records
    Check {
        /// CSV file to scan (defaults to the configured dataset)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Display the expected CSV format
    Format,

    /// Show or change configuration
    Config {
        /// Set the default dataset path
        #[arg(long)]
        set_data: Option<PathBuf>,

        /// Clear the default dataset path (fall back to the bundled sample)
        #[arg(long)]
        clear_data: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve { port, data } => {
            cmd_serve(port, data);
        }
        Commands::Render {
            person,
            data,
            output,
            format,
        } => {
            cmd_render(person, data, output, &format);
        }
        Commands::People { data } => {
            cmd_people(data);
        }
        Commands::Check { data } => {
            cmd_check(data);
        }
        Commands::Format => {
            cmd_format();
        }
        Commands::Config {
            set_data,
            clear_data,
        } => {
            cmd_config(set_data, clear_data);
        }
    }
}

/// Resolve and load the dataset a command should work on.
///
/// Resolution order: explicit `--data` path, then the configured default
/// dataset, then the bundled sample.
fn load_dataset(data: Option<PathBuf>, config: &Config) -> Dataset {
    let path = data.or_else(|| config.default_dataset.clone());

    let result = match &path {
        Some(path) => Dataset::from_csv_path(path),
        None => Dataset::bundled(),
    };

    match result {
        Ok(dataset) => {
            match &path {
                Some(path) => println!(
                    "Loaded {} records for {} people from {:?}",
                    dataset.record_count(),
                    dataset.person_count(),
                    path
                ),
                None => println!(
                    "Loaded {} records for {} people from the bundled sample",
                    dataset.record_count(),
                    dataset.person_count()
                ),
            }
            dataset
        }
        Err(e) => {
            eprintln!("Error loading dataset: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "server")]
fn cmd_serve(port: u16, data: Option<PathBuf>) {
    use dayline_viewer::server::{self, ServerConfig};

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Dayline Viewer v{VERSION}");
    println!();

    let config = Config::load().unwrap_or_default();
    let dataset = load_dataset(data, &config);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error creating runtime: {e}");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig::new(port, config);
    let (addr, shutdown_tx) = match runtime.block_on(server::run(server_config, dataset)) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error starting server: {e}");
            std::process::exit(1);
        }
    };

    println!("Viewer running at http://{addr}");
    println!("Press Ctrl+C to stop");

    let (stop_tx, stop_rx) = std::sync::mpsc::channel::<()>();
    ctrlc_handler(stop_tx);
    let _ = stop_rx.recv();

    println!();
    println!("Shutting down...");
    let _ = shutdown_tx.send(());
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
}

fn cmd_render(
    person: Option<String>,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    format: &str,
) {
    let config = Config::load().unwrap_or_default();
    let dataset = load_dataset(data, &config);
    let renderer = config.chart.renderer();

    let output_dir = match output {
        Some(dir) => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("Error creating output directory: {e}");
                std::process::exit(1);
            }
            dir
        }
        None => {
            if let Err(e) = config.ensure_directories() {
                eprintln!("Error creating export directory: {e}");
                std::process::exit(1);
            }
            config.export_path.clone()
        }
    };

    let people: Vec<String> = match person {
        Some(person) => {
            if dataset.schedule(&person).is_none() {
                eprintln!("Error: unknown person: {person}");
                eprintln!("Run 'dayline people' to list the dataset's people.");
                std::process::exit(1);
            }
            vec![person]
        }
        None => dataset.people().to_vec(),
    };

    let extension = match format {
        "html" => "html",
        "json" => "json",
        _ => "svg",
    };
    let mut rendered = 0;

    for person_id in &people {
        let records = match dataset.schedule(person_id) {
            Some(records) => records,
            None => continue,
        };

        let timeline = match build_timeline(person_id, records, config.day_start_hour) {
            Ok(timeline) => timeline,
            Err(e) => {
                eprintln!("Skipping {person_id}: {e}");
                continue;
            }
        };
        let summary = summarize(&timeline);

        let content = match extension {
            "html" => chart_page(&timeline, &summary, &renderer),
            "json" => {
                let value = serde_json::json!({
                    "person_id": &timeline.person_id,
                    "window": &timeline.window,
                    "segments": &timeline.segments,
                    "summary": &summary,
                });
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
            }
            _ => renderer.render_svg(&timeline),
        };

        let output_path = output_dir.join(format!("timeline_{}.{extension}", safe_file_stem(person_id)));
        if let Err(e) = std::fs::write(&output_path, content) {
            eprintln!("Error writing {output_path:?}: {e}");
            continue;
        }

        println!("Rendered {person_id} to {output_path:?}");
        println!(
            "  {} activities ({} min), {} gaps ({} min), longest gap {} min",
            summary.busy_count,
            summary.busy_minutes,
            summary.gap_count,
            summary.gap_minutes,
            summary.longest_gap_minutes
        );
        rendered += 1;
    }

    if rendered == 0 {
        eprintln!("Nothing rendered.");
        std::process::exit(1);
    }
}

fn cmd_people(data: Option<PathBuf>) {
    let config = Config::load().unwrap_or_default();
    let dataset = load_dataset(data, &config);

    println!();
    for person_id in dataset.people() {
        let count = dataset.schedule(person_id).map(|r| r.len()).unwrap_or(0);
        println!("  {person_id} ({count} records)");
    }
}

fn cmd_check(data: Option<PathBuf>) {
    let config = Config::load().unwrap_or_default();
    let dataset = load_dataset(data, &config);

    let report = scan_dataset(&dataset);
    println!();
    println!("{}", report.summary());

    if !report.is_clean() {
        std::process::exit(1);
    }
}

fn cmd_format() {
    println!("{CSV_FORMAT_HELP}");
}

fn cmd_config(set_data: Option<PathBuf>, clear_data: bool) {
    let mut config = Config::load().unwrap_or_default();

    if clear_data {
        config.default_dataset = None;
        if let Err(e) = config.save() {
            eprintln!("Error saving config: {e}");
            std::process::exit(1);
        }
        println!("Default dataset cleared; the bundled sample will be used.");
        println!();
    }

    if let Some(path) = set_data {
        if !path.exists() {
            eprintln!("Error: {path:?} does not exist");
            std::process::exit(1);
        }
        config.default_dataset = Some(path.clone());
        if let Err(e) = config.save() {
            eprintln!("Error saving config: {e}");
            std::process::exit(1);
        }
        println!("Default dataset set to {path:?}");
        println!();
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Turn a person id into a safe file name stem.
fn safe_file_stem(person_id: &str) -> String {
    person_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Set up Ctrl+C handler.
#[cfg(feature = "server")]
fn ctrlc_handler(stop_tx: std::sync::mpsc::Sender<()>) {
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .expect("Error setting Ctrl+C handler");
}
