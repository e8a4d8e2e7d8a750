// sslcheck - Apache TLS deployment auditor
// Licensed under GPL-3.0

use anyhow::Result;
use clap::Parser;
use sslcheck::output::{json, terminal};
use sslcheck::{Args, AuditConfig, Auditor, OutputFormat};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr so the report on stdout stays clean
    let log_level = match args.output.verbose {
        0 => std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse::<Level>().ok())
            .unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.output.no_color {
        colored::control::set_override(false);
    }

    if let Some(path) = &args.config_example {
        AuditConfig::example().save_to_file(path)?;
        println!("Example audit configuration saved to: {}", path.display());
        return Ok(());
    }

    let auditor = Auditor::new(AuditConfig::from_args(&args)?);
    let config = auditor.config();
    info!(
        "Starting SSL checks for {}:{} ({})",
        config.hostname,
        config.port,
        config.apache_conf.display()
    );

    let results = auditor.run().await?;

    match args.output.format {
        OutputFormat::Terminal => print!("{}", terminal::render(&results)),
        OutputFormat::Json => println!("{}", json::generate_json(&results, args.output.json_pretty)?),
    }

    if let Some(path) = &args.output.json {
        json::write_json_file(&results, path, args.output.json_pretty)?;
        info!("JSON report written to {}", path.display());
    }

    Ok(())
}
