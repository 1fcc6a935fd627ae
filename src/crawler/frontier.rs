//! Frontier: the shared queue of admitted URLs awaiting a worker
//!
//! Unbounded FIFO with many producers and many consumers. `push` never
//! waits, `pop` suspends while the queue is empty and returns `None` once the
//! frontier has been closed and drained.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<Url>,
    closed: bool,
}

/// Multi-producer, multi-consumer work queue
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    available: Notify,
}

impl Frontier {
    /// Constructs a new, empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    // Never held across an await.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a URL without blocking
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The URL will be delivered to exactly one `pop`
    /// * `Err(Url)` - The frontier is closed; the caller gets the URL back
    pub fn push(&self, url: Url) -> Result<(), Url> {
        {
            let mut state = self.lock();
            if state.closed {
                return Err(url);
            }
            state.queue.push_back(url);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Waits for the next URL
    ///
    /// Returns `None` once the frontier is closed and no entry remains.
    pub async fn pop(&self) -> Option<Url> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            // Register before checking so a concurrent push or close between
            // the check and the await still wakes us.
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(url) = state.queue.pop_front() {
                    return Some(url);
                }
                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Closes the frontier and wakes every waiting consumer
    ///
    /// Closing twice is harmless.
    pub fn close(&self) {
        self.lock().closed = true;
        self.available.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of URLs waiting for a worker
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
