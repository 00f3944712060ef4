#![allow(dead_code)]

use std::path::PathBuf;

use ledger::{Account, Cancellation, CreateAccountParams, Store};
use migration::MigratorTrait;
use rand::{Rng, SeedableRng, distributions::Alphanumeric, rngs::StdRng, seq::SliceRandom};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

const CURRENCIES: [&str; 3] = ["USD", "EUR", "CAD"];

/// In-memory SQLite lives inside a single connection, so the pool is capped
/// at one.
pub async fn store_with_db() -> (Store, DatabaseConnection) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    (Store::new(db.clone()), db)
}

/// File-backed SQLite with a real pool, for tests that need several
/// transactions in flight at once.
pub async fn store_with_file_db() -> (Store, DatabaseConnection, PathBuf) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("ledger_{}.db", Uuid::new_v4()));
    let mut options = ConnectOptions::new(format!("sqlite:{}?mode=rwc", path.display()));
    options.max_connections(8).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    (Store::new(db.clone()), db, path)
}

pub async fn cleanup_file_db(db: DatabaseConnection, path: PathBuf) {
    db.close().await.unwrap();
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_int(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

pub fn random_owner(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

pub fn random_money(rng: &mut impl Rng) -> i64 {
    random_int(rng, 0, 1000)
}

pub fn random_currency(rng: &mut impl Rng) -> String {
    CURRENCIES
        .choose(rng)
        .copied()
        .unwrap_or("EUR")
        .to_string()
}

pub fn random_account_params(rng: &mut impl Rng) -> CreateAccountParams {
    CreateAccountParams::new(random_owner(rng), random_currency(rng)).balance(random_money(rng))
}

pub async fn create_random_account(store: &Store, rng: &mut impl Rng) -> Account {
    let params = random_account_params(rng);
    let account = store
        .create_account(params.clone(), &Cancellation::none())
        .await
        .unwrap();

    assert_eq!(account.owner, params.owner);
    assert_eq!(account.balance, params.balance);
    assert_eq!(account.currency, params.currency);
    assert_ne!(account.id, 0);
    account
}

pub async fn create_account_with_balance(store: &Store, balance: i64) -> Account {
    store
        .create_account(
            CreateAccountParams::new("owner", "EUR").balance(balance),
            &Cancellation::none(),
        )
        .await
        .unwrap()
}
