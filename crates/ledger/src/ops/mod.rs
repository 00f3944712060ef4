use sea_orm::DatabaseConnection;

use crate::Queries;

mod accounts;
mod ledger;
mod transfer;
mod tx;

pub use tx::BoxFuture;

/// The ledger façade.
///
/// Wraps a pooled [`DatabaseConnection`] without owning its lifecycle: the
/// caller opens the pool, runs migrations, and closes it. Cloning a `Store`
/// is cheap and every clone shares the same pool, so one store can serve many
/// concurrent tasks.
#[derive(Clone, Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// The wrapped connection pool.
    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Row access outside any explicit transaction.
    fn queries(&self) -> Queries<'_, DatabaseConnection> {
        Queries::new(&self.database)
    }
}
