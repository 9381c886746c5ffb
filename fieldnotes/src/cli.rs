// src/cli.rs
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::core::batch::{discover, inspect, publish_batch};
use crate::core::publisher::Publisher;
use crate::models::{BatchSummary, PublishOutcome, StagedNote};
use crate::report::{
    OutputFormat, PublishReport, format_conversion, format_outcome, format_staged,
    format_summary, to_structured,
};
use crate::site::index::generate_index;
use crate::site::render::{ConversionReport, PandocRenderer, convert};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ./fieldnotes.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log every step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show staged documents with their metadata
    List,

    /// Publish staged documents, then render them and refresh the index
    Publish {
        /// Staged markdown files to publish
        #[arg(required_unless_present = "all")]
        paths: Vec<PathBuf>,

        /// Publish every staged document
        #[arg(short, long, conflicts_with = "paths")]
        all: bool,

        /// Report what would happen without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip HTML rendering and index generation
        #[arg(long)]
        no_convert: bool,
    },

    /// Render published documents to HTML (all of them when no paths are given)
    Convert {
        paths: Vec<PathBuf>,
    },

    /// Regenerate the index page
    Index,
}

/// Executes one CLI invocation.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a scan or write fails,
/// or any document in a `publish` run failed.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::List => list(&config, args.format),
        Command::Publish {
            paths,
            all,
            dry_run,
            no_convert,
        } => {
            let sources = if all { discover(&config)? } else { paths };
            publish(&config, &sources, dry_run, no_convert, args.format)
        }
        Command::Convert { paths } => {
            let selection = (!paths.is_empty()).then_some(paths.as_slice());
            let renderer = PandocRenderer::from_config(&config.render);
            let report = convert(&config, &renderer, selection)?;
            emit(args.format, &report, || format_conversion(&report))
        }
        Command::Index => {
            let written = generate_index(&config)?;
            emit(args.format, &written, || {
                written.as_ref().map_or_else(
                    || "No published pages found\n".to_owned(),
                    |path| format!("✓ Generated: {}\n", path.display()),
                )
            })
        }
    }
}

fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let notes: Vec<StagedNote> = discover(config)?
        .iter()
        .map(PathBuf::as_path)
        .map(inspect)
        .collect();
    emit(format, &notes, || format_staged(&notes))
}

fn publish(
    config: &Config,
    sources: &[PathBuf],
    dry_run: bool,
    no_convert: bool,
    format: OutputFormat,
) -> Result<()> {
    if sources.is_empty() {
        info!("Nothing to publish");
    }

    let publisher = Publisher::new(config.clone())?;
    let outcomes = publish_batch(&publisher, sources, dry_run);
    let summary = BatchSummary::from_outcomes(&outcomes);

    let rendered = if dry_run || no_convert {
        Ok((None, None))
    } else {
        render_published(config, &outcomes)
    };
    let (conversion, index, render_error) = match rendered {
        Ok((conversion, index)) => (conversion, index, None),
        Err(err) => (None, None, Some(err)),
    };
    let render_message = render_error.as_ref().map(|err| format!("{err:#}"));

    let report = PublishReport {
        outcomes: &outcomes,
        summary: summary.clone(),
        conversion: conversion.as_ref(),
        index: index.as_deref(),
        render_error: render_message.as_deref(),
    };
    emit(format, &report, || {
        let mut text: String = outcomes.iter().map(format_outcome).collect();
        if let Some(conversion) = &conversion {
            text.push_str(&format_conversion(conversion));
        }
        if let Some(index) = &index {
            text.push_str(&format!("✓ Generated: {}\n", index.display()));
        }
        if let Some(message) = &render_message {
            text.push_str(&format!("✗ Rendering stopped: {message}\n"));
        }
        text.push_str(&format_summary(
            &summary,
            conversion.as_ref().map(|c| c.converted.len()),
        ));
        text
    })?;

    if let Some(err) = render_error {
        return Err(err.context("Documents were published but rendering failed"));
    }
    if summary.failed > 0 {
        bail!("{} of {} document(s) failed to publish", summary.failed, summary.total());
    }
    Ok(())
}

fn render_published(
    config: &Config,
    outcomes: &[PublishOutcome],
) -> Result<(Option<ConversionReport>, Option<PathBuf>)> {
    let published: Vec<PathBuf> = outcomes
        .iter()
        .filter(|outcome| outcome.success)
        .filter_map(|outcome| outcome.destination_path.clone())
        .collect();
    if published.is_empty() {
        return Ok((None, None));
    }

    let renderer = PandocRenderer::from_config(&config.render);
    let conversion = convert(config, &renderer, Some(published.as_slice()))?;
    let index = generate_index(config)?;
    Ok((Some(conversion), index))
}

fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: serde::Serialize,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Text => print!("{}", text()),
        OutputFormat::Json | OutputFormat::Yaml => println!("{}", to_structured(value, format)?),
    }
    Ok(())
}

