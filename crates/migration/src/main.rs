//! Standalone schema runner: `migration [up|down|fresh|status] [steps]`.
//!
//! Connects to `DATABASE_URL`, or to the local SQLite ledger file when unset.
//! `up` without a step count applies everything pending; `down` without one
//! reverts only the latest migration.

use std::{process::ExitCode, str::FromStr};

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DbErr};

const DEFAULT_DATABASE_URL: &str = "sqlite:./bank.db?mode=rwc";
const USAGE: &str = "usage: migration [up|down|fresh|status] [steps]";

#[derive(Clone, Copy, Debug)]
enum Action {
    Up,
    Down,
    Fresh,
    Status,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown action `{other}`")),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let action = args.next().as_deref().unwrap_or("up").parse::<Action>();
    let steps = args.next().map(|steps| steps.parse::<u32>()).transpose();

    let (action, steps) = match (action, steps) {
        (Ok(action), Ok(steps)) => (action, steps),
        (Err(err), _) => return usage(&err),
        (_, Err(err)) => return usage(&format!("invalid step count: {err}")),
    };

    let url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    match run(&url, action, steps).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("migration {action:?} failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str, action: Action, steps: Option<u32>) -> Result<(), DbErr> {
    let db = Database::connect(url).await?;
    match action {
        Action::Up => Migrator::up(&db, steps).await?,
        Action::Down => Migrator::down(&db, steps.or(Some(1))).await?,
        Action::Fresh => Migrator::fresh(&db).await?,
        Action::Status => Migrator::status(&db).await?,
    }
    db.close().await
}

fn usage(reason: &str) -> ExitCode {
    eprintln!("{reason}\n{USAGE}");
    ExitCode::from(2)
}
