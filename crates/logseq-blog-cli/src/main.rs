mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use logseq_blog_config::Config;
use logseq_blog_engine::{ConversionReport, Converter, PublishError};
use std::process;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    let config = match Config::load_from_path(&config_path) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let Some(output) = cli.output.clone().or(config.output_path) else {
        eprintln!("Error: No output path provided and none configured");
        eprintln!("Usage: logseq-blog <INPUT> <OUTPUT>");
        eprintln!(
            "Or set output_path in the config file at {}",
            config_path.display()
        );
        process::exit(1);
    };

    let converter = Converter::new(output)
        .with_publish_statuses(config.publish_statuses)
        .with_default_language(config.default_language)
        .with_include_drafts(cli.include_drafts)
        .with_dry_run(cli.dry_run);

    if cli.input.is_dir() {
        let batch = converter
            .convert_dir(&cli.input)
            .with_context(|| format!("Failed to scan {}", cli.input.display()))?;
        for (_, report) in &batch.converted {
            print_report(report);
        }
        log::info!(
            "{} posts written, {} files without posts, {} files failed",
            batch.written_count(),
            batch.empty.len(),
            batch.failures.len()
        );
        if batch.has_failures() {
            for (path, e) in &batch.failures {
                eprintln!("Error: {}: {e}", path.display());
            }
            process::exit(1);
        }
    } else {
        match converter.convert_file(&cli.input) {
            Ok(report) => {
                print_report(&report);
                if !report.failed.is_empty() {
                    process::exit(1);
                }
            }
            Err(e @ PublishError::NoPostFound(_)) => {
                eprintln!("{e}");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_report(report: &ConversionReport) {
    for post in &report.written {
        println!("{}", post.path.display());
    }
    for post in &report.failed {
        eprintln!("Error: '{}': {}", post.title, post.error);
    }
}
