//! Async-to-UI Bridge
//!
//! The UI is an immediate-mode loop; all I/O runs on one shared tokio
//! runtime. A handler spawns its future as a [`Job`] and polls the result
//! channel once per frame, so the UI thread never blocks. A job whose
//! view has been dismissed simply completes into a dropped receiver.

use crate::app::api::ApiClient;
use crate::app::config::Config;
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// A spawned unit of async work whose result is polled from the UI loop.
pub struct Job<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Job<T> {
    /// Spawn `future` on the runtime and return the polling handle.
    pub fn spawn<F>(runtime: &tokio::runtime::Handle, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        runtime.spawn(async move {
            // The receiver may be gone if the view was dismissed; the
            // result is discarded without touching any state.
            let _ = tx.send(future.await);
        });
        Self { rx }
    }

    /// Non-blocking poll. Returns the result exactly once.
    pub fn poll(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Take a finished job's result out of an `Option<Job<T>>` slot, clearing
/// the slot when the job completed.
pub fn poll_slot<T: Send + 'static>(slot: &mut Option<Job<T>>) -> Option<T> {
    let result = slot.as_ref().and_then(Job::poll);
    if result.is_some() {
        *slot = None;
    }
    result
}

/// Everything a feature component needs to talk to the outside world,
/// passed in at composition time: the API client (carrying the session)
/// and the runtime the work runs on.
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub config: Config,
    runtime: tokio::runtime::Handle,
}

impl Services {
    pub fn new(api: ApiClient, config: Config, runtime: tokio::runtime::Handle) -> Self {
        Self {
            api,
            config,
            runtime,
        }
    }

    pub fn spawn<T, F>(&self, future: F) -> Job<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        Job::spawn(&self.runtime, future)
    }

    pub fn runtime(&self) -> &tokio::runtime::Handle {
        &self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_job_delivers_result_once() {
        let job = Job::spawn(&tokio::runtime::Handle::current(), async { 41 + 1 });
        let mut result = None;
        for _ in 0..100 {
            if let Some(value) = job.poll() {
                result = Some(value);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(result, Some(42));
        assert_eq!(job.poll(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_poll_slot_clears_on_completion() {
        let mut slot = Some(Job::spawn(&tokio::runtime::Handle::current(), async {
            "done"
        }));
        let mut result = None;
        for _ in 0..100 {
            if let Some(value) = poll_slot(&mut slot) {
                result = Some(value);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(result, Some("done"));
        assert!(slot.is_none());
    }
}
