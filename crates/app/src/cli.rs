use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bank")]
#[command(about = "Accounts and double-entry transfers on a relational store")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,

    /// Override the configured database URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply or inspect schema migrations.
    Migrate {
        #[arg(value_enum, default_value_t = MigrateAction::Up)]
        action: MigrateAction,
    },
    #[command(flatten)]
    Ledger(LedgerCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MigrateAction {
    Up,
    Down,
    Fresh,
    Status,
}

#[derive(Subcommand, Debug)]
pub enum LedgerCommand {
    Account(Account),
    /// Move money between two accounts.
    Transfer(TransferArgs),
    /// List the entries of an account.
    Entries(HistoryArgs),
    /// List the transfers touching an account.
    Transfers(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct Account {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    Create(AccountCreateArgs),
    Get {
        #[arg(long)]
        id: i64,
    },
    List(PageArgs),
}

#[derive(Args, Debug)]
pub struct AccountCreateArgs {
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub currency: String,
    /// Opening balance in minor units.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub balance: i64,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[arg(long)]
    pub from: i64,
    #[arg(long)]
    pub to: i64,
    /// Amount in minor units.
    #[arg(long, allow_negative_numbers = true)]
    pub amount: i64,
    /// Give up (and roll back) after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[arg(long)]
    pub account: i64,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long, default_value_t = 50)]
    pub limit: u64,
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

impl From<&PageArgs> for ledger::ListParams {
    fn from(page: &PageArgs) -> Self {
        ledger::ListParams::new(page.limit, page.offset)
    }
}
