use crate::{Cancellation, Entry, ListParams, ListTransfersParams, ResultLedger, Transfer};

use super::Store;

impl Store {
    pub async fn entry(&self, id: i64, cancel: &Cancellation) -> ResultLedger<Entry> {
        cancel.run(self.queries().get_entry(id)).await
    }

    /// Entries of one account, oldest first.
    pub async fn list_entries(
        &self,
        account_id: i64,
        page: ListParams,
        cancel: &Cancellation,
    ) -> ResultLedger<Vec<Entry>> {
        cancel
            .run(self.queries().list_entries(account_id, page))
            .await
    }

    pub async fn transfer(&self, id: i64, cancel: &Cancellation) -> ResultLedger<Transfer> {
        cancel.run(self.queries().get_transfer(id)).await
    }

    pub async fn list_transfers(
        &self,
        params: ListTransfersParams,
        cancel: &Cancellation,
    ) -> ResultLedger<Vec<Transfer>> {
        cancel.run(self.queries().list_transfers(params)).await
    }
}
