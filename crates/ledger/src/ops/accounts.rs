use crate::{Account, Cancellation, CreateAccountParams, ListParams, ResultLedger};

use super::Store;

impl Store {
    pub async fn create_account(
        &self,
        params: CreateAccountParams,
        cancel: &Cancellation,
    ) -> ResultLedger<Account> {
        let account = cancel.run(self.queries().create_account(params)).await?;
        tracing::debug!(account_id = account.id, "account created");
        Ok(account)
    }

    /// Reads the current row; balances are never cached.
    pub async fn account(&self, id: i64, cancel: &Cancellation) -> ResultLedger<Account> {
        cancel.run(self.queries().get_account(id)).await
    }

    pub async fn list_accounts(
        &self,
        page: ListParams,
        cancel: &Cancellation,
    ) -> ResultLedger<Vec<Account>> {
        cancel.run(self.queries().list_accounts(page)).await
    }

    /// Overwrites an account balance outside the ledger.
    ///
    /// No entry is recorded, so the balance stops matching the sum of the
    /// account's entries. Meant for administrative corrections only.
    pub async fn update_account(
        &self,
        id: i64,
        balance: i64,
        cancel: &Cancellation,
    ) -> ResultLedger<Account> {
        let account = cancel
            .run(self.queries().update_account(id, balance))
            .await?;
        tracing::warn!(account_id = id, balance, "account balance overwritten");
        Ok(account)
    }

    /// Fails with a foreign-key [`Constraint`] while entries or transfers
    /// still reference the account. [`is_not_found`] is true for that error
    /// as well, so match on the variant here.
    ///
    /// [`Constraint`]: crate::LedgerError::Constraint
    /// [`is_not_found`]: crate::LedgerError::is_not_found
    pub async fn delete_account(&self, id: i64, cancel: &Cancellation) -> ResultLedger<()> {
        cancel.run(self.queries().delete_account(id)).await?;
        tracing::debug!(account_id = id, "account deleted");
        Ok(())
    }
}
