use std::{process::ExitCode, time::Duration};

use clap::Parser;
use ledger::{Cancellation, CreateAccountParams, ListTransfersParams, Store, TransferTxParams};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use serde::Serialize;

use cli::{AccountCommand, Cli, Command, LedgerCommand, MigrateAction};
use error::Result;
use settings::Settings;

mod cli;
mod error;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    // stdout carries the JSON output, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "bank={level},ledger={level},migration={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, mut settings: Settings) -> Result<()> {
    if let Some(url) = cli.database_url {
        settings.database.url = url;
    }
    let db = connect(&settings.database).await?;

    let result = match cli.command {
        Command::Migrate { action } => migrate(&db, action).await,
        Command::Ledger(command) => {
            if settings.database.migrate {
                Migrator::up(&db, None).await?;
            }
            execute(Store::new(db.clone()), command).await
        }
    };

    db.close().await?;
    result
}

async fn connect(config: &settings::Database) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(config.sqlx_logging);
    // Every in-memory SQLite connection is a separate database.
    if config.url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = sea_orm::Database::connect(options).await?;
    tracing::debug!("database connection pool established");
    Ok(db)
}

async fn migrate(db: &DatabaseConnection, action: MigrateAction) -> Result<()> {
    match action {
        MigrateAction::Up => Migrator::up(db, None).await?,
        MigrateAction::Down => Migrator::down(db, None).await?,
        MigrateAction::Fresh => Migrator::fresh(db).await?,
        MigrateAction::Status => Migrator::status(db).await?,
    }
    tracing::info!(?action, "migration finished");
    Ok(())
}

async fn execute(store: Store, command: LedgerCommand) -> Result<()> {
    let cancel = interrupt_cancellation();

    match command {
        LedgerCommand::Account(account) => match account.command {
            AccountCommand::Create(args) => {
                let params =
                    CreateAccountParams::new(args.owner, args.currency).balance(args.balance);
                print_json(&store.create_account(params, &cancel).await?)
            }
            AccountCommand::Get { id } => print_json(&store.account(id, &cancel).await?),
            AccountCommand::List(page) => {
                print_json(&store.list_accounts((&page).into(), &cancel).await?)
            }
        },
        LedgerCommand::Transfer(args) => {
            let cancel = match args.timeout_ms {
                Some(ms) => cancel.with_timeout(Duration::from_millis(ms)),
                None => cancel,
            };
            let params = TransferTxParams::new(args.from, args.to, args.amount);
            print_json(&store.transfer_tx(params, &cancel).await?)
        }
        LedgerCommand::Entries(args) => print_json(
            &store
                .list_entries(args.account, (&args.page).into(), &cancel)
                .await?,
        ),
        LedgerCommand::Transfers(args) => {
            let params = ListTransfersParams::touching(args.account, (&args.page).into());
            print_json(&store.list_transfers(params, &cancel).await?)
        }
    }
}

/// Cancellation fired by Ctrl-C, so an interrupted transfer rolls back.
fn interrupt_cancellation() -> Cancellation {
    let (handle, cancel) = Cancellation::signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            handle.cancel();
        }
    });
    cancel
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
