//! Crawl orchestrator - recursive branch spawning
//!
//! This module contains the per-address state machine and the top-level
//! `crawl` entry point. Each address claimed from the visit ledger becomes
//! one branch: claim, fetch, parse, emit a result, then fan out one child
//! branch per unseen link. The branches form the task tree that the
//! completion collector flattens.

use crate::crawler::collector::{settle, TaskNode};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::crawler::ledger::VisitLedger;
use crate::crawler::parser::analyze_page;
use crate::SkeinError;
use reqwest::Client;
use std::sync::Arc;
use tokio::runtime::Handle;
use url::Url;

/// One message delivered to the result sink
///
/// Exactly one `CrawlResult` is emitted per address whose fetch was
/// attempted, except addresses answered with a non-200 status, which emit
/// nothing.
#[derive(Debug)]
pub enum CrawlResult {
    /// The page was fetched and analyzed
    Page {
        /// The page's normalized address
        address: Url,
        /// Asset references found on the page, in document order
        assets: Vec<Url>,
    },

    /// The branch could not produce a page
    Failed {
        /// The address whose fetch or parse failed
        address: Url,
        /// What went wrong
        error: SkeinError,
    },
}

impl CrawlResult {
    /// The address this result is about
    pub fn address(&self) -> &Url {
        match self {
            CrawlResult::Page { address, .. } => address,
            CrawlResult::Failed { address, .. } => address,
        }
    }
}

/// State shared by every branch of one crawl invocation
struct CrawlContext<F> {
    client: Client,
    ledger: VisitLedger,
    executor: Handle,
    sink: F,
}

/// Visits one address as an independent branch of the crawl
///
/// Spawns the branch on the crawl's executor and returns its node in the
/// task tree. The branch:
///
/// 1. Claims the address in the visit ledger; if another branch already
///    claimed it, terminates with no further action.
/// 2. Fetches the address. A transport failure emits a `Failed` result and
///    terminates the branch; failures never propagate to siblings.
/// 3. A non-200 status terminates the branch silently; the claim stays
///    spent so no other branch retries the address.
/// 4. On 200, analyzes the body, emits a `Page` result (assets only; links
///    are not part of the result), and spawns one child branch per link not
///    already present in the ledger. That membership check is best-effort;
///    each child's own claim is the authoritative dedup gate.
fn visit<F>(ctx: Arc<CrawlContext<F>>, address: Url) -> TaskNode
where
    F: Fn(CrawlResult) + Send + Sync + 'static,
{
    let executor = ctx.executor.clone();
    TaskNode::Spawned(executor.spawn(async move {
        if !ctx.ledger.claim(&address) {
            tracing::debug!("already claimed: {}", address);
            return TaskNode::Settled;
        }

        let body = match fetch_url(&ctx.client, &address).await {
            Ok(FetchOutcome::Page { body }) => body,
            Ok(FetchOutcome::Skipped { status }) => {
                tracing::debug!("skipping {}: HTTP {}", address, status);
                return TaskNode::Settled;
            }
            Err(error) => {
                tracing::warn!("fetch failed for {}: {}", address, error);
                (ctx.sink)(CrawlResult::Failed { address, error });
                return TaskNode::Settled;
            }
        };

        let parsed = match analyze_page(&body, &address) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!("parse failed for {}: {}", address, error);
                (ctx.sink)(CrawlResult::Failed { address, error });
                return TaskNode::Settled;
            }
        };

        tracing::debug!(
            "visited {}: {} assets, {} links",
            address,
            parsed.assets.len(),
            parsed.links.len()
        );
        (ctx.sink)(CrawlResult::Page {
            address,
            assets: parsed.assets,
        });

        let children: Vec<TaskNode> = parsed
            .links
            .into_iter()
            .filter(|link| !ctx.ledger.contains(link))
            .map(|link| visit(Arc::clone(&ctx), link))
            .collect();

        TaskNode::Siblings(children)
    }))
}

/// Crawls everything reachable from a start address
///
/// Fetches the start page, reports its assets to `on_result`, then
/// recursively follows every unseen same-host link, delivering one message
/// per visited address. The returned future resolves only once every
/// spawned branch, at every depth, has settled; it carries no other value.
///
/// Work is dispatched onto `executor` explicitly; the orchestrator never
/// relies on an ambient runtime. The sink may be invoked concurrently from
/// multiple branches and must not assume any call ordering.
///
/// No branch failure is fatal: transport and parse failures are delivered
/// through the sink and the crawl continues elsewhere.
///
/// # Arguments
///
/// * `start` - The address to crawl from
/// * `executor` - The runtime handle to spawn branches on
/// * `on_result` - The sink receiving one message per visited or failed
///   address
///
/// # Example
///
/// ```no_run
/// use skein::crawler::crawl;
/// use tokio::runtime::Handle;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let start = Url::parse("http://localhost:8000/")?;
/// crawl(start, Handle::current(), |result| {
///     println!("{:?}", result);
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn crawl<F>(start: Url, executor: Handle, on_result: F) -> crate::Result<()>
where
    F: Fn(CrawlResult) + Send + Sync + 'static,
{
    tracing::info!("starting crawl at {}", start);

    // One connection pool for the whole run, shared by every branch
    let client = build_http_client()?;

    let ctx = Arc::new(CrawlContext {
        client,
        ledger: VisitLedger::new(),
        executor,
        sink: on_result,
    });

    let root = visit(ctx, start);
    settle(root).await;

    tracing::info!("crawl complete");
    Ok(())
}
