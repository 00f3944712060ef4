use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::{Cancellation, LedgerError, Queries, ResultLedger};

use super::Store;

/// Boxed future returned by a unit of work.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

impl Store {
    /// Runs `work` inside one database transaction.
    ///
    /// `work` gets a [`Queries`] bound to the transaction. If it returns
    /// `Ok` the transaction is committed and the commit outcome is returned;
    /// if it returns `Err`, or `cancel` fires first, the transaction is rolled
    /// back. A failed rollback is reported as [`LedgerError::Rollback`]
    /// carrying both errors.
    ///
    /// The commit itself is not raced against `cancel`.
    ///
    /// ```rust,no_run
    /// # async fn demo(store: ledger::Store) -> Result<(), ledger::LedgerError> {
    /// use ledger::Cancellation;
    ///
    /// let entry = store
    ///     .exec_tx(&Cancellation::none(), |q| {
    ///         Box::pin(async move { q.create_entry(1, 100).await })
    ///     })
    ///     .await?;
    /// # let _ = entry;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn exec_tx<T, F>(&self, cancel: &Cancellation, work: F) -> ResultLedger<T>
    where
        T: Send,
        F: for<'c> FnOnce(Queries<'c, DatabaseTransaction>) -> BoxFuture<'c, ResultLedger<T>>
            + Send,
    {
        let txn = cancel.run(self.database.begin()).await?;

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = work(Queries::new(&txn)) => Some(result),
        };

        match outcome {
            Some(Ok(value)) => {
                txn.commit().await?;
                tracing::debug!("transaction committed");
                Ok(value)
            }
            Some(Err(err)) => Err(rollback(txn, err).await),
            None => Err(rollback(txn, LedgerError::Cancelled).await),
        }
    }
}

/// Rolls `txn` back and returns the error the caller should see.
async fn rollback(txn: DatabaseTransaction, cause: LedgerError) -> LedgerError {
    match txn.rollback().await {
        Ok(()) => {
            tracing::warn!(error = %cause, "transaction rolled back");
            cause
        }
        Err(rollback) => {
            tracing::error!(
                error = %cause,
                rollback_error = %rollback,
                "transaction rollback failed"
            );
            LedgerError::Rollback {
                source: Box::new(cause),
                rollback,
            }
        }
    }
}
