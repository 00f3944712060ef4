//! Caller-controlled cancellation.
//!
//! Every [`Store`](crate::Store) operation takes a [`Cancellation`] and races
//! its store I/O against it. A cancellation fires when its deadline passes or
//! when the paired [`CancelHandle`] is triggered, whichever comes first.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use ledger::Cancellation;
//!
//! // Never fires.
//! let _none = Cancellation::none();
//!
//! // Fires after 500ms or on `handle.cancel()`.
//! let (handle, cancel) = Cancellation::signal();
//! let cancel = cancel.with_timeout(Duration::from_millis(500));
//! handle.cancel();
//! assert!(cancel.is_cancelled());
//! ```

use std::{future::Future, time::Duration};

use tokio::{sync::watch, time::Instant};

use crate::{LedgerError, ResultLedger};

#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    deadline: Option<Instant>,
    signal: Option<watch::Receiver<bool>>,
}

/// Triggers the [`Cancellation`] created alongside it by
/// [`Cancellation::signal`].
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Cancellation {
    /// A cancellation that never fires.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Fires at `deadline`.
    #[must_use]
    pub fn at(deadline: Instant) -> Self {
        Self::none().with_deadline(deadline)
    }

    /// Fires once `timeout` has elapsed from now.
    #[must_use]
    pub fn timeout(timeout: Duration) -> Self {
        Self::none().with_timeout(timeout)
    }

    /// Returns a cancellation fired by the returned handle.
    #[must_use]
    pub fn signal() -> (CancelHandle, Self) {
        let (sender, receiver) = watch::channel(false);
        (
            CancelHandle { sender },
            Self {
                deadline: None,
                signal: Some(receiver),
            },
        )
    }

    /// Adds a deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn is_cancelled(&self) -> bool {
        let expired = self
            .deadline
            .is_some_and(|deadline| deadline <= Instant::now());
        let signalled = self.signal.as_ref().is_some_and(|rx| *rx.borrow());
        expired || signalled
    }

    /// Resolves when the cancellation fires. Pending forever for
    /// [`Cancellation::none`].
    pub async fn cancelled(&self) {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        let signal = async {
            match &self.signal {
                Some(rx) => {
                    let mut rx = rx.clone();
                    // A dropped handle can no longer cancel.
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            () = deadline => {}
            () = signal => {}
        }
    }

    /// Drives `fut` unless the cancellation fires first.
    ///
    /// An already fired cancellation wins over a ready future.
    pub async fn run<F, T, E>(&self, fut: F) -> ResultLedger<T>
    where
        F: Future<Output = Result<T, E>>,
        LedgerError: From<E>,
    {
        tokio::select! {
            biased;
            () = self.cancelled() => Err(LedgerError::Cancelled),
            result = fut => result.map_err(LedgerError::from),
        }
    }
}
