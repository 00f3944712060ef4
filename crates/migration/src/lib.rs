//! Schema of the ledger store: `accounts`, `entries` and `transfers`.
//!
//! Apply it with `Migrator::up(&db, None)` before handing the connection to
//! the ledger.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000001_init::Migration)]
    }
}
