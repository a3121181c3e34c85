//! Caller-driven cancellation of in-flight requests.
//!
//! A [`CancelHandle`] fires the paired [`CancelSignal`]. Clients bound to a
//! signal race every request against it and fail with
//! [`Error::Cancelled`](crate::Error::Cancelled) once it fires.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Error, Result};

/// Create a linked handle/signal pair.
#[must_use]
pub fn cancellation() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx: Arc::new(tx) }, CancelSignal { rx })
}

/// Fires the paired [`CancelSignal`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancel every request bound to the paired signal.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes cancellation requested through a [`CancelHandle`].
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Returns true once the handle has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when the handle fires. Never resolves if the handle is
    /// dropped without firing.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Run `fut` unless the signal fires first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the signal fired before or during `fut`.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            () = self.cancelled() => Err(Error::Cancelled),
            out = fut => out,
        }
    }
}
