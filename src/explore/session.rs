use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, MutexGuard};

use super::Explorer;
use crate::record::Record;
use crate::source::{FetchError, RecordSource};

/// One explorer view plus the fetch that populates it.
///
/// Starting a session issues exactly one fetch on a background thread. The
/// thread only holds a [`Weak`] reference to the explorer: once every owner
/// of the session is gone the fetch result is dropped on the floor instead of
/// being written into a defunct view. There is no cancellation, retry or
/// re-fetch.
#[derive(Debug)]
pub struct Session {
    explorer: Arc<Mutex<Explorer>>,
    fetch: Option<JoinHandle<()>>,
    origin: String,
}

impl Session {
    /// Create the view and start its one-shot fetch.
    pub fn start<S: RecordSource>(source: S) -> std::io::Result<Self> {
        let explorer = Arc::new(Mutex::new(Explorer::new()));
        let origin = source.describe();
        let target = Arc::downgrade(&explorer);

        let fetch = thread::Builder::new()
            .name("fetch-experiments".to_string())
            .spawn(move || {
                let guard = LoadingGuard { target };
                let outcome = source.fetch();
                settle_if_alive(&guard.target, outcome);
            })?;

        Ok(Self {
            explorer,
            fetch: Some(fetch),
            origin,
        })
    }

    /// Block until the fetch has settled. Returns immediately afterwards.
    pub fn wait_settled(&mut self) {
        let Some(handle) = self.fetch.take() else {
            return;
        };

        if handle.join().is_err() {
            tracing::error!("fetch thread for {} panicked", self.origin);
        }
    }

    /// Lock the explorer for reading or mutation.
    pub fn lock(&self) -> MutexGuard<'_, Explorer> {
        self.explorer.lock()
    }

    /// Where the records come from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// A non-owning handle to the explorer.
    pub fn downgrade(&self) -> Weak<Mutex<Explorer>> {
        Arc::downgrade(&self.explorer)
    }
}

/// Ends the loading state if the fetch thread exits without settling, as
/// when the source panics. Runs during unwinding, before any join.
struct LoadingGuard {
    target: Weak<Mutex<Explorer>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let Some(explorer) = self.target.upgrade() else {
            return;
        };
        let mut explorer = explorer.lock();
        if explorer.is_loading() {
            tracing::error!("fetch ended without a result");
            explorer.abandon_fetch();
        }
    }
}

fn settle_if_alive(
    target: &Weak<Mutex<Explorer>>,
    outcome: Result<Vec<Record>, FetchError>,
) {
    match target.upgrade() {
        Some(explorer) => explorer.lock().settle(outcome),
        None => tracing::debug!("explorer discarded before fetch settled; dropping result"),
    }
}
