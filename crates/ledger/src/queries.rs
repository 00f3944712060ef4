//! Row-level access to the ledger tables.
//!
//! [`Queries`] runs one statement per call against whatever connection it is
//! bound to. Bound to the pool ([`DatabaseConnection`]) every call commits on
//! its own; bound to a [`DatabaseTransaction`] every call joins that
//! transaction. Any [`ConnectionTrait`] implementor can be bound.
//!
//! [`DatabaseConnection`]: sea_orm::DatabaseConnection
//! [`DatabaseTransaction`]: sea_orm::DatabaseTransaction

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*,
    sea_query::Expr,
};

use crate::{
    Account, CreateAccountParams, Entry, LedgerError, ListParams, ListTransfersParams,
    ResultLedger, Transfer, accounts, entries, transfers,
};

pub struct Queries<'a, C> {
    conn: &'a C,
}

impl<C> Clone for Queries<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Queries<'_, C> {}

impl<'a, C> Queries<'a, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// The connection statements run on, for work the accessor does not
    /// cover.
    pub fn connection(&self) -> &'a C {
        self.conn
    }

    // ── accounts ────────────────────────────────────────────────────────────

    pub async fn create_account(&self, params: CreateAccountParams) -> ResultLedger<Account> {
        let model = accounts::ActiveModel {
            owner: ActiveValue::Set(params.owner),
            balance: ActiveValue::Set(params.balance),
            currency: ActiveValue::Set(params.currency),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn get_account(&self, id: i64) -> ResultLedger<Account> {
        accounts::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| account_not_found(id))
    }

    pub async fn list_accounts(&self, page: ListParams) -> ResultLedger<Vec<Account>> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(self.conn)
            .await?)
    }

    /// Overwrites the balance. Administrative use only: transfers go through
    /// [`add_account_balance`](Self::add_account_balance).
    pub async fn update_account(&self, id: i64, balance: i64) -> ResultLedger<Account> {
        let updated = accounts::Entity::update_many()
            .col_expr(accounts::Column::Balance, Expr::value(balance))
            .filter(accounts::Column::Id.eq(id))
            .exec_with_returning(self.conn)
            .await?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| account_not_found(id))
    }

    /// Adds `delta` to the balance and returns the updated row.
    ///
    /// Runs as a single `UPDATE .. SET balance = balance + delta .. RETURNING`
    /// so the only lock taken is the row lock of the update itself.
    pub async fn add_account_balance(&self, id: i64, delta: i64) -> ResultLedger<Account> {
        let updated = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(delta),
            )
            .filter(accounts::Column::Id.eq(id))
            .exec_with_returning(self.conn)
            .await?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| account_not_found(id))
    }

    pub async fn delete_account(&self, id: i64) -> ResultLedger<()> {
        let result = accounts::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(account_not_found(id));
        }
        Ok(())
    }

    // ── entries ─────────────────────────────────────────────────────────────

    pub async fn create_entry(&self, account_id: i64, amount: i64) -> ResultLedger<Entry> {
        let model = entries::ActiveModel {
            account_id: ActiveValue::Set(account_id),
            amount: ActiveValue::Set(amount),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn get_entry(&self, id: i64) -> ResultLedger<Entry> {
        entries::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("entry {id}")))
    }

    pub async fn list_entries(&self, account_id: i64, page: ListParams) -> ResultLedger<Vec<Entry>> {
        Ok(entries::Entity::find()
            .filter(entries::Column::AccountId.eq(account_id))
            .order_by_asc(entries::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(self.conn)
            .await?)
    }

    // ── transfers ───────────────────────────────────────────────────────────

    pub async fn create_transfer(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> ResultLedger<Transfer> {
        let model = transfers::ActiveModel {
            from_account_id: ActiveValue::Set(from_account_id),
            to_account_id: ActiveValue::Set(to_account_id),
            amount: ActiveValue::Set(amount),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    pub async fn get_transfer(&self, id: i64) -> ResultLedger<Transfer> {
        transfers::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("transfer {id}")))
    }

    pub async fn list_transfers(&self, params: ListTransfersParams) -> ResultLedger<Vec<Transfer>> {
        Ok(transfers::Entity::find()
            .filter(
                Condition::any()
                    .add(transfers::Column::FromAccountId.eq(params.from_account_id))
                    .add(transfers::Column::ToAccountId.eq(params.to_account_id)),
            )
            .order_by_asc(transfers::Column::Id)
            .limit(params.page.limit)
            .offset(params.page.offset)
            .all(self.conn)
            .await?)
    }
}

fn account_not_found(id: i64) -> LedgerError {
    LedgerError::NotFound(format!("account {id}"))
}
