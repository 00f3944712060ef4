use sea_orm::ConnectionTrait;

use crate::{Account, Cancellation, Queries, ResultLedger, TransferTxParams, TransferTxResult};

use super::Store;

impl Store {
    /// Moves `params.amount` from one account to the other.
    ///
    /// Within a single transaction it creates the transfer record, a debit
    /// entry for the source, a credit entry for the destination, and applies
    /// both balance changes. Either everything is persisted or nothing is.
    ///
    /// Non-positive amounts and self-transfers are rejected before a
    /// transaction is opened. Conflicts reported by the store are returned
    /// as-is; nothing is retried.
    pub async fn transfer_tx(
        &self,
        params: TransferTxParams,
        cancel: &Cancellation,
    ) -> ResultLedger<TransferTxResult> {
        params.validate()?;

        let result = self
            .exec_tx(cancel, move |q| Box::pin(run_transfer(q, params)))
            .await?;

        tracing::info!(
            transfer_id = result.transfer.id,
            from_account_id = params.from_account_id,
            to_account_id = params.to_account_id,
            amount = params.amount,
            "transfer committed"
        );
        Ok(result)
    }
}

async fn run_transfer<C: ConnectionTrait>(
    q: Queries<'_, C>,
    params: TransferTxParams,
) -> ResultLedger<TransferTxResult> {
    let TransferTxParams {
        from_account_id,
        to_account_id,
        amount,
    } = params;

    let transfer = q
        .create_transfer(from_account_id, to_account_id, amount)
        .await?;
    let from_entry = q.create_entry(from_account_id, -amount).await?;
    let to_entry = q.create_entry(to_account_id, amount).await?;

    // Lock order: smaller account id first, whatever the direction. Two
    // opposite transfers between the same pair then queue on the same row
    // instead of each holding the row the other one needs.
    let (from_account, to_account) = if from_account_id < to_account_id {
        add_money(q, from_account_id, -amount, to_account_id, amount).await?
    } else {
        let (to_account, from_account) =
            add_money(q, to_account_id, amount, from_account_id, -amount).await?;
        (from_account, to_account)
    };

    Ok(TransferTxResult {
        transfer,
        from_account,
        to_account,
        from_entry,
        to_entry,
    })
}

/// Applies `amount1` to `account_id1`, then `amount2` to `account_id2`.
async fn add_money<C: ConnectionTrait>(
    q: Queries<'_, C>,
    account_id1: i64,
    amount1: i64,
    account_id2: i64,
    amount2: i64,
) -> ResultLedger<(Account, Account)> {
    let account1 = q.add_account_balance(account_id1, amount1).await?;
    let account2 = q.add_account_balance(account_id2, amount2).await?;
    Ok((account1, account2))
}
