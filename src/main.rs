mod config;
mod export;
mod loader;
mod models;
mod pipeline;
mod scraper;
mod utils;

#[cfg(test)]
mod test_fixtures;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;
use crate::loader::discover_input_files;
use crate::pipeline::Pipeline;
use crate::scraper::cleaner::PRICE_UNAVAILABLE;

#[derive(Parser)]
#[command(
    name = "shopee-sheet",
    about = "Saved Shopee search pages → deduplicated product spreadsheet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the saved search pages (default: current dir)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, deduplicate and write the spreadsheet (default)
    Export {
        /// Spreadsheet path (default: produtos_shopee.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the exported rows as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Skip thumbnail downloads; image cells stay empty
        #[arg(long)]
        no_images: bool,
    },

    /// Print the deduplicated listings without writing any file
    List {
        #[arg(long)]
        json: bool,

        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show the input files that would be processed
    Files,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "shopee_sheet=info,warn",
        1 => "shopee_sheet=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.dir {
        config.input.dir = dir;
    }

    let command = cli.command.unwrap_or(Command::Export {
        output: None,
        csv: None,
        no_images: false,
    });

    match command {
        Command::Export { output, csv, no_images } => {
            let _t = utils::Timer::start("Spreadsheet export");
            if let Some(output) = output {
                config.export.output_path = output;
            }
            if csv.is_some() {
                config.export.csv_path = csv;
            }
            if no_images {
                config.export.embed_images = false;
            }

            let stats = Pipeline::new(config).run().await?;
            info!(
                "Done: {} files | {} records | {} unique | {} images ({} failed) | output: {}",
                stats.files_found,
                stats.records_extracted,
                stats.unique_products,
                stats.images_embedded,
                stats.image_failures,
                stats
                    .output
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "—".into()),
            );
        }

        Command::List { json, limit } => {
            let harvest = Pipeline::new(config).collect()?;
            let shown = &harvest.products[..limit
                .unwrap_or(harvest.products.len())
                .min(harvest.products.len())];

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else if !shown.is_empty() {
                println!("{:>4}  {:<40} {:>12} {:>10} {:>6}", "#", "Produto", "Valor", "Vendidos", "Nota");
                println!("{}", "─".repeat(78));
                for (i, p) in shown.iter().enumerate() {
                    println!(
                        "{:>4}  {:<40} {:>12} {:>10} {:>6.1}",
                        i + 1,
                        utils::preview(&p.name, 40),
                        p.price
                            .map(|v| format!("{:.2}", v))
                            .unwrap_or_else(|| PRICE_UNAVAILABLE.into()),
                        utils::fmt_number(p.units_sold),
                        p.rating,
                    );
                }
                println!("{}", "─".repeat(78));
                println!(
                    "{} unique of {} extracted from {} files",
                    harvest.products.len(),
                    harvest.records_extracted,
                    harvest.files.len()
                );
            }
        }

        Command::Files => {
            let files = discover_input_files(&config.input)?;
            if files.is_empty() {
                println!(
                    "No files matching {}*.{} in {}",
                    config.input.file_prefix,
                    config.input.file_extension,
                    config.input.dir.display()
                );
            } else {
                println!("{} files:", files.len());
                for f in &files {
                    println!("  {}", f.display());
                }
            }
        }
    }

    Ok(())
}
