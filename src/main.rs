use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crimp_quality::commands::{default_output_path, run_dates, run_export, run_parse, run_search};
use crimp_quality::config::{init_config, Config};
use crimp_quality::dates::{DateParser, DateRange};
use crimp_quality::logging::init_logging;
use crimp_quality::models::Column;
use crimp_quality::reports::ExportFormat;
use crimp_quality::SearchOptions;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "crimp-quality")]
#[command(about = "Merge crimp, pull-off and wire-length production logs into quality reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct RangeArgs {
    /// Root of the <YYYY>/<MM>/<DD> log tree (defaults to the configured root)
    #[arg(long)]
    root: Option<PathBuf>,
    /// First day to scan (YYYY-MM-DD, default today)
    #[arg(long)]
    from: Option<String>,
    /// Last day to scan (YYYY-MM-DD, default today)
    #[arg(long)]
    to: Option<String>,
    /// Keep only rows containing this text in any column
    #[arg(long)]
    filter: Option<String>,
    /// Sort by column (e.g. Article, Crimp_H, PullForce)
    #[arg(long)]
    sort: Option<Column>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a date range and show merged records
    Search {
        #[command(flatten)]
        range: RangeArgs,
        /// Show at most N rows in the table
        #[arg(long)]
        limit: Option<usize>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Parse a single log file
    Parse {
        /// Path to the log file
        file: PathBuf,
        /// Date stamped on the records (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Search a date range and export the records
    Export {
        #[command(flatten)]
        range: RangeArgs,
        /// csv or html
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Output file (default: quality_raw_data_<today>.csv / quality_report_<today>.html)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List days that have a log file
    Dates {
        /// Root of the <YYYY>/<MM>/<DD> log tree (defaults to the configured root)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Search {
        range: RangeArgs::default(),
        limit: None,
        json: false,
    });
    let json = matches!(
        command,
        Commands::Search { json: true, .. } | Commands::Parse { json: true, .. } | Commands::Dates { json: true, .. }
    );

    let config = match init_config() {
        Ok(config) => config,
        Err(e) => handle_error(e, json),
    };

    if config.logging.output != "console" {
        if let Err(e) = std::fs::create_dir_all(&config.paths.log_directory) {
            eprintln!(
                "Warning: cannot create log directory {}: {}",
                config.paths.log_directory.display(),
                e
            );
        }
    }
    let _guard = init_logging(&config.logging, &config.paths.log_directory);

    if let Err(e) = run(command, config) {
        handle_error(e, json);
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    let pretty = config.output.json_pretty;

    match command {
        Commands::Search { range, limit, json } => {
            let options = search_options(range, config)?;
            run_search(&options, limit.or(config.output.display_limit), json, pretty)
        }
        Commands::Parse { file, date, json } => {
            let date = match date {
                Some(d) => DateParser::format(DateParser::parse(&d)?),
                None => DateParser::format(today()),
            };
            run_parse(&file, &date, json, pretty)
        }
        Commands::Export {
            range,
            format,
            output,
        } => {
            let options = search_options(range, config)?;
            let output = output.unwrap_or_else(|| default_output_path(format, today()));
            let written = run_export(&options, format, &output)?;
            println!("Exported {} records to {}", written, output.display());
            Ok(())
        }
        Commands::Dates { root, json } => {
            let root = root.unwrap_or_else(|| config.paths.log_root.clone());
            run_dates(&root, &config.scan.file_name, json)
        }
    }
}

fn search_options(args: RangeArgs, config: &Config) -> Result<SearchOptions> {
    let from = match args.from {
        Some(d) => DateParser::parse(&d)?,
        None => today(),
    };
    let to = match args.to {
        Some(d) => DateParser::parse(&d)?,
        None => today(),
    };

    Ok(SearchOptions {
        root: args.root.unwrap_or_else(|| config.paths.log_root.clone()),
        file_name: config.scan.file_name.clone(),
        range: DateRange::new(from, to)?,
        filter: args.filter,
        sort: args.sort.map(|column| (column, args.desc)),
    })
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn handle_error(e: anyhow::Error, json: bool) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("Error: {:#}", e);
    }
    process::exit(1);
}
