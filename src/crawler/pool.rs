//! Worker pool
//!
//! A fixed number of workers, each looping on the frontier until it closes.
//! Every dequeued URL runs in its own short-lived task so that a panic in
//! one pipeline is contained to that URL; the visit guard has already
//! reported its completion by the time the worker sees the join error.

use crate::crawler::fetcher::Transport;
use crate::crawler::pipeline::Pipeline;
use crate::crawler::session::CrawlSession;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fixed-size set of concurrent workers
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    /// Creates a pool of `size` workers (at least one)
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs all workers until the frontier closes
    ///
    /// Blocks until every worker has exited.
    ///
    /// # Returns
    ///
    /// The number of URLs processed across all workers
    pub async fn run<T: Transport>(
        &self,
        session: Arc<CrawlSession>,
        pipeline: Arc<Pipeline<T>>,
    ) -> u64 {
        let mut workers = JoinSet::new();
        for id in 0..self.size {
            workers.spawn(worker(id, Arc::clone(&session), Arc::clone(&pipeline)));
        }

        let mut processed = 0;
        while let Some(result) = workers.join_next().await {
            match result {
                Ok(count) => processed += count,
                Err(e) => tracing::error!("Worker exited abnormally: {}", e),
            }
        }
        processed
    }
}

async fn worker<T: Transport>(
    id: usize,
    session: Arc<CrawlSession>,
    pipeline: Arc<Pipeline<T>>,
) -> u64 {
    tracing::trace!("Worker {} started", id);
    let mut processed = 0;

    while let Some(url) = session.next_url().await {
        let task = {
            let session = Arc::clone(&session);
            let pipeline = Arc::clone(&pipeline);
            let url = url.clone();
            tokio::spawn(async move { pipeline.process(&session, url).await })
        };

        if let Err(e) = task.await {
            tracing::error!("Pipeline for {} aborted: {}", url, e);
        }
        processed += 1;
    }

    tracing::trace!("Worker {} exiting after {} URLs", id, processed);
    processed
}
