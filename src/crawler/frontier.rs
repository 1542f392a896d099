//! Crawl frontier
//!
//! FIFO queue of pending URLs plus the dedupe sets that guard it:
//! - `queued` holds every URL currently waiting in the queue
//! - `visited` holds every URL that has been dequeued and marked
//!
//! A URL is queued at most once at a time and never re-queued once visited.

use std::collections::{HashSet, VecDeque};

/// Breadth-first crawl frontier
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, oldest first
    queue: VecDeque<String>,

    /// Membership index for `queue`
    queued: HashSet<String>,

    /// URLs already dequeued and marked
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with a single URL
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Enqueues `url` unless it is already queued or visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was added
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }

        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the oldest queued URL
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    /// Marks `url` as visited
    ///
    /// # Returns
    ///
    /// `false` if it had already been visited
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Number of URLs waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Consumes the frontier, keeping only the visited set
    pub fn into_visited(self) -> HashSet<String> {
        self.visited
    }
}
