use crate::{config::Config, nessus::ScanReport, report};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};
use vulnboard_db_sqlite::Connections;
use vulnboard_entities::time::Timestamp;
use vulnboard_webserver as webserver;

#[derive(Debug, Parser)]
#[command(version, about = "Comment board for security training labs")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the comment board (default)
    Serve {
        /// Port of the web server
        #[arg(long)]
        port: Option<u16>,

        /// URL to the database
        #[arg(long, value_name = "DATABASE_URL")]
        db_url: Option<String>,
    },
    /// Fail if a scan summary reports blocking vulnerabilities
    CheckReport {
        /// JSON file that maps severities to counts
        #[arg(value_name = "REPORT_SUMMARY")]
        report: PathBuf,

        /// Severities that block a deployment
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = report::DEFAULT_BLOCKING_SEVERITIES.iter().map(ToString::to_string)
        )]
        blocking: Vec<String>,
    },
    /// Convert a Nessus XML export into a Markdown report
    NessusReport {
        #[arg(value_name = "FILE.nessus")]
        file: PathBuf,

        /// Markdown output [default: FILE.md]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write a severity summary for check-report
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Serve {
        port: None,
        db_url: None,
    });
    match command {
        Command::Serve { port, db_url } => {
            let mut cfg = Config::try_load_from_file_or_default(args.config_file.as_ref())?;
            if let Some(port) = port {
                cfg.webserver.port = port;
            }
            if let Some(db_url) = db_url {
                cfg.db.conn_sqlite = db_url;
            }
            serve(cfg)
        }
        Command::CheckReport { report, blocking } => {
            process::exit(report::check_report(&report, &blocking));
        }
        Command::NessusReport {
            file,
            output,
            summary,
        } => nessus_report(&file, output, summary),
    }
}

fn nessus_report(file: &Path, output: Option<PathBuf>, summary: Option<PathBuf>) -> Result<()> {
    let scan = ScanReport::load(file)?;
    let generated_at = Timestamp::now();
    let output = output.unwrap_or_else(|| file.with_extension("md"));
    fs::write(&output, scan.to_markdown(generated_at).to_string())?;
    info!("Wrote Markdown report to {}", output.display());
    println!("Markdown generado: {}", output.display());
    if let Some(summary) = summary {
        let counts = scan.normalized_counts();
        report::write_summary(&summary, &counts, generated_at.unix_timestamp())?;
        println!("Resumen escrito en {}: {counts:?}", summary.display());
    }
    Ok(())
}

fn serve(cfg: Config) -> Result<()> {
    let Config { db, webserver, lab } = cfg;
    info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        db.conn_sqlite, db.conn_pool_size
    );
    let connections = Connections::init(&db.conn_sqlite, db.conn_pool_size.into())?;

    let web_cfg = webserver::Cfg {
        address: webserver.address,
        port: webserver.port,
        workers: webserver.workers,
        enable_lab_probes: lab.enable_probes,
    };
    webserver::run(connections, web_cfg);
    Ok(())
}
