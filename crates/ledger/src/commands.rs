//! Parameter and result structs for ledger operations.
//!
//! These types group the arguments of store calls and keep call sites
//! readable. The transfer types serialize with snake_case keys so they can be
//! exchanged as JSON unchanged.

use serde::{Deserialize, Serialize};

use crate::{Account, Entry, LedgerError, ResultLedger, Transfer};

/// Create an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: String,
}

impl CreateAccountParams {
    #[must_use]
    pub fn new(owner: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance: 0,
            currency: currency.into(),
        }
    }

    #[must_use]
    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }
}

/// Pagination for list operations, ordered by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub limit: u64,
    pub offset: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

impl ListParams {
    #[must_use]
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }
}

/// List transfers leaving `from_account_id` or entering `to_account_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransfersParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    #[serde(flatten)]
    pub page: ListParams,
}

impl ListTransfersParams {
    /// Every transfer touching `account_id`, in either direction.
    #[must_use]
    pub fn touching(account_id: i64, page: ListParams) -> Self {
        Self {
            from_account_id: account_id,
            to_account_id: account_id,
            page,
        }
    }
}

/// Move `amount` from one account to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferTxParams {
    #[must_use]
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    /// Reject transfers that would produce a reversed-sign or zero-sum record.
    pub(crate) fn validate(&self) -> ResultLedger<()> {
        if self.amount <= 0 {
            return Err(LedgerError::InvalidTransfer(format!(
                "amount must be > 0, got {}",
                self.amount
            )));
        }
        if self.from_account_id == self.to_account_id {
            return Err(LedgerError::InvalidTransfer(
                "from_account_id and to_account_id must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything a successful transfer wrote.
///
/// Account snapshots hold the balance right after this transfer's increment;
/// later transfers may have changed it by the time the caller reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_non_positive_amounts() {
        for amount in [0, -1, i64::MIN] {
            let err = TransferTxParams::new(1, 2, amount).validate().unwrap_err();
            assert!(matches!(err, LedgerError::InvalidTransfer(_)), "{err}");
        }
    }

    #[test]
    fn validate_rejects_self_transfer() {
        let err = TransferTxParams::new(4, 4, 10).validate().unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTransfer(
                "from_account_id and to_account_id must differ".to_string()
            )
        );
    }

    #[test]
    fn validate_accepts_either_direction() {
        assert!(TransferTxParams::new(1, 2, 1).validate().is_ok());
        assert!(TransferTxParams::new(2, 1, i64::MAX).validate().is_ok());
    }

    #[test]
    fn params_use_snake_case_keys() {
        let params: TransferTxParams =
            serde_json::from_str(r#"{"from_account_id":1,"to_account_id":2,"amount":10}"#)
                .unwrap();
        assert_eq!(params, TransferTxParams::new(1, 2, 10));
    }
}
