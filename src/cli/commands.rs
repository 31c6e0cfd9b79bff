//! Subcommand definitions and handlers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::render;
use crate::config::Config;
use crate::registry::{CorpusRecord, FilterField, Registry, filter_by, resolve};
use crate::retrieval;

/// Corpus is a command line tool that lists and downloads textual corpora.
#[derive(Parser, Debug)]
#[command(name = "corpus", version, about = "Lists and downloads textual corpora")]
pub struct Cli {
    /// Get extra information about what's happening behind the scenes
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Turn on debugging messages
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List corpora available for download
    List {
        /// Comma-separated centuries to display, e.g. 16th,17th
        #[arg(long, value_delimiter = ',')]
        centuries: Option<Vec<String>>,

        /// Comma-separated categories to display, e.g. literature,classics
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// Comma-separated languages to display, e.g. en,fr
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,

        /// Render the listing as an HTML table
        #[arg(long)]
        html: bool,
    },

    /// Show full detail for one corpus
    Show {
        /// Corpus shortname, as printed by `corpus list`
        shortname: String,
    },

    /// Re-fetch the corpus list from the remote registry
    Update,

    /// Download a corpus
    Download {
        /// Corpus shortname, as printed by `corpus list`
        shortname: String,

        /// Download destination (defaults to the configured download directory)
        destination: Option<PathBuf>,

        /// Comma-separated markup type(s), in case there are multiple markup
        /// types in a corpus, e.g. --markup TEI,HTML
        #[arg(long, value_delimiter = ',')]
        markup: Option<Vec<String>>,
    },
}

/// Run one parsed subcommand against the given configuration.
pub async fn run_command(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::List {
            centuries,
            categories,
            languages,
            html,
        } => cmd_list(config, centuries, categories, languages, html).await,
        Command::Show { shortname } => cmd_show(config, &shortname).await,
        Command::Update => cmd_update(config).await,
        Command::Download {
            shortname,
            destination,
            markup,
        } => cmd_download(config, &shortname, destination, markup).await,
    }
}

async fn cmd_list(
    config: &Config,
    centuries: Option<Vec<String>>,
    categories: Option<Vec<String>>,
    languages: Option<Vec<String>>,
    html: bool,
) -> anyhow::Result<()> {
    let registry = Registry::load(config).await?;
    let mut records: Vec<&CorpusRecord> = registry.records().iter().collect();

    for (field, values) in [
        (FilterField::Centuries, centuries),
        (FilterField::Categories, categories),
        (FilterField::Languages, languages),
    ] {
        if let Some(values) = values {
            records = filter_by(&records, field, &values);
        }
    }

    if html {
        println!("{}", render::html_table(&records));
    } else {
        print!("{}", render::text_table(&records));
        println!("\n{} corpora found.", records.len());
    }

    Ok(())
}

async fn cmd_show(config: &Config, shortname: &str) -> anyhow::Result<()> {
    let registry = Registry::load(config).await?;
    let record = registry.lookup(shortname)?;

    println!("{} ({})", record.title, record.shortname);
    if let Some(centuries) = &record.centuries {
        println!("  Centuries: {centuries}");
    }
    if let Some(categories) = &record.categories {
        println!("  Categories: {categories}");
    }
    if let Some(languages) = &record.languages {
        println!("  Languages: {languages}");
    }

    println!("\nText:");
    for variant in record.text.all_variants() {
        println!("  Markup: {}", variant.markup);
        println!("  Format: {}", variant.file_format);
        for url in variant.url.urls() {
            println!("  URL: {url}");
        }
        println!();
    }

    Ok(())
}

async fn cmd_update(config: &Config) -> anyhow::Result<()> {
    let path = Registry::update(config).await?;
    println!("Corpus list updated at {}", path.display());
    Ok(())
}

async fn cmd_download(
    config: &Config,
    shortname: &str,
    destination: Option<PathBuf>,
    markup: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let registry = Registry::load(config).await?;
    let record = registry.lookup(shortname)?;

    let destination = destination.unwrap_or_else(|| config.download_dir.clone());
    let jobs = resolve(record, markup.as_deref(), &destination)?;

    if jobs.is_empty() {
        println!("Nothing to download for '{shortname}'.");
        return Ok(());
    }

    // Jobs run strictly one after another; a failed job is reported and the
    // rest of the batch still runs.
    let total = jobs.len();
    let mut failures = 0usize;
    for job in &jobs {
        println!(
            "Downloading corpus {} ({}) to {} from {}",
            shortname,
            job.format,
            job.destination.display(),
            job.url
        );
        if let Err(e) = retrieval::dispatch(job).await {
            eprintln!("{e}");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} retrieval job(s) failed");
    }

    println!("Downloaded {} to {}", shortname, destination.display());
    Ok(())
}
