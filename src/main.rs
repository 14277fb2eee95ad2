//! Skein main entry point
//!
//! A thin command-line harness around the crawler library: crawl a site and
//! print one line per visited page.

use anyhow::Context;
use clap::Parser;
use skein::crawler::{crawl, CrawlResult};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Skein: a same-origin web crawler
///
/// Starting from URL, Skein fetches every reachable page on the same host
/// and prints each page's address together with the assets (images,
/// scripts, stylesheets) it references.
#[derive(Parser, Debug)]
#[command(name = "skein")]
#[command(about = "A same-origin web crawler", long_about = None)]
struct Cli {
    /// The address to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let start = Url::parse(&cli.url).with_context(|| format!("invalid start URL: {}", cli.url))?;

    crawl(start, Handle::current(), print_result)
        .await
        .context("crawl failed to start")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skein=info,warn"),
            1 => EnvFilter::new("skein=debug,info"),
            2 => EnvFilter::new("skein=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints one sink message; pages go to stdout, failures to stderr
fn print_result(result: CrawlResult) {
    match result {
        CrawlResult::Page { address, assets } => {
            println!("{}", address);
            for asset in assets {
                println!("  asset: {}", asset);
            }
        }
        CrawlResult::Failed { address, error } => {
            eprintln!("{}: {}", address, error);
        }
    }
}
