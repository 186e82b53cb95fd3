//! QuickDOM CLI
//!
//! A headless page loader for testing and debugging: fetch (or read) a
//! document, run it through the acquisition pipeline, and print the
//! resulting tree.

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use quickdom_browser::PageLoader;
use quickdom_dom::{DocumentTree, print_tree};
use quickdom_html::{available_parsers, default_parser, parser_by_name};
use quickdom_net::{Fetcher, FetcherConfig};
use std::fs;
use std::path::PathBuf;

/// Load a page and print its parsed tree.
#[derive(Parser)]
#[command(name = "quickdom", version, about)]
struct Args {
    /// URL (http/https) or local HTML file to load
    input: String,

    /// Directory for cached media files
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Parser strategy to run; defaults to the widest available
    #[arg(long)]
    parser: Option<String>,

    /// Dump the tree as JSON instead of the indented pretty-print
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let parser = match &args.parser {
        Some(name) => parser_by_name(name).with_context(|| {
            let known: Vec<_> = available_parsers().iter().map(|p| p.name()).collect();
            format!(
                "unknown parser strategy '{name}' (available on this target: {})",
                known.join(", ")
            )
        })?,
        None => default_parser(),
    };
    let strategy = parser.name();

    let tree: DocumentTree = if args.input.starts_with("http://")
        || args.input.starts_with("https://")
    {
        let fetcher = Fetcher::new(FetcherConfig {
            cache_dir: args.cache_dir,
            ..FetcherConfig::default()
        })?;
        let loader = PageLoader::with_fetcher(fetcher, parser);
        loader.load_page(&args.input)
    } else {
        // Local files are parsed without media resolution; there is no
        // base URL to resolve their references against.
        let html = fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read '{}'", args.input))?;
        parser.parse(html.as_bytes())
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    println!("{}", "=== Document Tree ===".green().bold());
    print_tree(&tree, tree.root(), 0);

    println!();
    println!(
        "{} node(s), '{strategy}' strategy",
        tree.len().saturating_sub(1)
    );

    Ok(())
}
