//! Compensation stack for multi-step mutations
//!
//! Each completed step registers the action that undoes it. When a later step
//! fails, the registered actions run in reverse order before the original
//! error is handed back to the caller. A failing compensation is logged and
//! never replaces the original error.

use std::fmt::Display;
use std::future::Future;

use club_core::RepoResult;
use futures::future::BoxFuture;
use tracing::{debug, error, warn};

type Undo<'a> = Box<dyn FnOnce() -> BoxFuture<'a, RepoResult<()>> + Send + 'a>;

/// Ordered stack of undo actions for one operation
pub struct Saga<'a> {
    name: &'static str,
    steps: Vec<(&'static str, Undo<'a>)>,
}

impl<'a> Saga<'a> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Record the undo action for a step that just completed
    pub fn push<F, Fut>(&mut self, label: &'static str, undo: F)
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = RepoResult<()>> + Send + 'a,
    {
        self.steps.push((label, Box::new(move || Box::pin(undo()))));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Await a step; on failure unwind everything recorded so far
    pub async fn step<T, E, Fut>(&mut self, fut: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        match fut.await {
            Ok(value) => Ok(value),
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Unwind and hand back `err` unchanged
    pub async fn fail<E: Display>(&mut self, err: E) -> E {
        warn!(saga = self.name, error = %err, "Operation failed, compensating");
        self.rollback().await;
        err
    }

    /// Run every recorded undo action, newest first
    ///
    /// Returns the number of compensating actions that failed.
    pub async fn rollback(&mut self) -> usize {
        let mut failures = 0;
        while let Some((label, undo)) = self.steps.pop() {
            match undo().await {
                Ok(()) => debug!(saga = self.name, step = label, "Compensated"),
                Err(e) => {
                    failures += 1;
                    error!(
                        saga = self.name,
                        step = label,
                        error = %e,
                        "Compensating action failed"
                    );
                }
            }
        }
        failures
    }

    /// Keep every completed step
    pub fn commit(mut self) {
        debug!(saga = self.name, steps = self.steps.len(), "Committed");
        self.steps.clear();
    }
}

impl Drop for Saga<'_> {
    fn drop(&mut self) {
        if !self.steps.is_empty() {
            warn!(
                saga = self.name,
                steps = self.steps.len(),
                "Saga dropped without commit or rollback"
            );
        }
    }
}

impl std::fmt::Debug for Saga<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.steps.iter().map(|(label, _)| *label).collect();
        f.debug_struct("Saga")
            .field("name", &self.name)
            .field("steps", &labels)
            .finish()
    }
}
