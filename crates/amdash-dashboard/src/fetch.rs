/*
[INPUT]:  Concurrent fetches that target the same piece of view state
[OUTPUT]: Latest-only result slot; superseded fetches are cancelled and dropped
[POS]:    Runtime layer - fetch sequencing
[UPDATE]: When changing cancellation or staleness semantics
*/

use std::future::Future;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle for one in-flight fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    cancel: CancellationToken,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    current: CancellationToken,
    value: Option<T>,
}

/// Holds the value of the most recently started fetch.
#[derive(Debug)]
pub struct LatestOnly<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for LatestOnly<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestOnly<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                generation: 0,
                current: CancellationToken::new(),
                value: None,
            }),
        }
    }

    /// Start a fetch, cancelling whichever one was in flight.
    pub fn begin(&self) -> FetchTicket {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.current.cancel();
        slot.generation += 1;
        slot.current = CancellationToken::new();
        FetchTicket {
            generation: slot.generation,
            cancel: slot.current.clone(),
        }
    }

    /// Store `value` if `ticket` is still the newest. Returns whether it was kept.
    pub fn complete(&self, ticket: &FetchTicket, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.generation != ticket.generation || ticket.is_cancelled() {
            debug!(
                ticket = ticket.generation,
                latest = slot.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        slot.value = Some(value);
        true
    }

    pub fn generation(&self) -> u64 {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).generation
    }

    /// Cancel the in-flight fetch, if any
    pub fn cancel(&self) {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .current
            .cancel();
    }
}

impl<T: Clone> LatestOnly<T> {
    pub fn latest(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .value
            .clone()
    }

    /// Run `fetch` under a fresh ticket.
    ///
    /// Resolves to `None` when a newer fetch started first, either because the
    /// ticket was cancelled mid-flight or because the result arrived too late.
    pub async fn fetch_latest<F, E>(&self, fetch: F) -> Result<Option<T>, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let ticket = self.begin();
        tokio::select! {
            _ = ticket.cancelled() => Ok(None),
            result = fetch => {
                let value = result?;
                if self.complete(&ticket, value.clone()) {
                    Ok(Some(value))
                } else {
                    Ok(None)
                }
            }
        }
    }
}
