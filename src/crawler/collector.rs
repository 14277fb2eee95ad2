//! Completion collector for the crawl's task tree
//!
//! Each visited address spawns one asynchronous unit of work, and each unit
//! may spawn further units for the links it discovers, so a crawl produces a
//! tree of tasks whose shape is unknown until it has finished growing. The
//! collector is the generic "await and flatten" combinator that resolves
//! once every unit at every depth has settled.

use futures::future::{join_all, BoxFuture};
use tokio::task::JoinHandle;

/// One node in the runtime task tree
#[derive(Debug)]
pub enum TaskNode {
    /// A spawned unit of work that yields the rest of its subtree
    Spawned(JoinHandle<TaskNode>),

    /// An ordered collection of sibling subtrees
    Siblings(Vec<TaskNode>),

    /// A terminal: this branch has nothing further in flight
    Settled,
}

/// Waits until every task in the tree, at every depth, has settled
///
/// Recursively unwraps the tree: a collection of siblings is settled when
/// each member is; a spawned unit is settled when its handle resolves and
/// the subtree it yields is settled in turn. The future must be boxed
/// because the recursion depth is only discovered at runtime.
///
/// A unit that failed (panicked) is treated as settled after logging, so
/// the collector always resolves; individual branch failures are reported
/// through the result sink, not through the tree.
pub fn settle(node: TaskNode) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        match node {
            TaskNode::Settled => {}
            TaskNode::Siblings(children) => {
                join_all(children.into_iter().map(settle)).await;
            }
            TaskNode::Spawned(handle) => match handle.await {
                Ok(subtree) => settle(subtree).await,
                Err(e) => tracing::error!("crawl task failed to settle cleanly: {}", e),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn counting_leaf(executor: &Handle, counter: Arc<AtomicUsize>, delay_ms: u64) -> TaskNode {
        TaskNode::Spawned(executor.spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            TaskNode::Settled
        }))
    }

    #[tokio::test]
    async fn test_settled_leaf_resolves_immediately() {
        settle(TaskNode::Settled).await;
    }

    #[tokio::test]
    async fn test_waits_for_every_depth() {
        let executor = Handle::current();
        let counter = Arc::new(AtomicUsize::new(0));

        // A unit that, once awaited, yields two further units
        let inner_a = counting_leaf(&executor, Arc::clone(&counter), 20);
        let inner_b = counting_leaf(&executor, Arc::clone(&counter), 5);
        let root_counter = Arc::clone(&counter);
        let root = TaskNode::Spawned(executor.spawn(async move {
            root_counter.fetch_add(1, Ordering::SeqCst);
            TaskNode::Siblings(vec![inner_a, inner_b])
        }));

        settle(root).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_sibling_collection_settles() {
        settle(TaskNode::Siblings(Vec::new())).await;
    }

    #[tokio::test]
    async fn test_panicked_unit_still_settles() {
        let executor = Handle::current();
        let counter = Arc::new(AtomicUsize::new(0));

        let panicking = TaskNode::Spawned(executor.spawn(async {
            panic!("branch blew up");
        }));
        let surviving = counting_leaf(&executor, Arc::clone(&counter), 10);

        settle(TaskNode::Siblings(vec![panicking, surviving])).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
