//! Double-entry ledger backed by a relational store.
//!
//! [`Store`] is the entry point. It moves money between accounts with
//! [`Store::transfer_tx`], which writes a [`Transfer`], two balancing
//! [`Entry`] rows and both account balances inside one database transaction.
//! Concurrent transfers between the same accounts, in either direction, never
//! deadlock against each other: balances are always updated smaller account
//! id first.
//!
//! Any other multi-statement unit of work can reuse the same guarantees
//! through [`Store::exec_tx`].

pub use cancel::{CancelHandle, Cancellation};
pub use commands::{
    CreateAccountParams, ListParams, ListTransfersParams, TransferTxParams, TransferTxResult,
};
pub use error::LedgerError;
pub use ops::{BoxFuture, Store};
pub use queries::Queries;

pub mod accounts;
pub mod entries;
pub mod transfers;

mod cancel;
mod commands;
mod error;
mod ops;
mod queries;

pub type Account = accounts::Model;
pub type Entry = entries::Model;
pub type Transfer = transfers::Model;

type ResultLedger<T> = Result<T, LedgerError>;
