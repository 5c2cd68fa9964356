//! Terminal front end for the merchant portal.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use merchant_portal::auth::BlockingAuthenticator;
use merchant_portal::filter::{
    DatePreset, DateRange, TransactionFilter, search_merchants, search_terminals,
};
use merchant_portal::format::{format_amount, format_date, format_timestamp};
use merchant_portal::models::{
    AccountStatus, MerchantAccount, MerchantId, NaiveDate, TerminalId, TerminalRecord,
    Transaction, TransactionId, TransactionStatus,
};
use merchant_portal::portal::{PREVIEW_LIMIT, Portal};
use merchant_portal::records::RecordStore;
use merchant_portal::storage::{BlockingSessionStore, FileSessionStore};
use owo_colors::OwoColorize;

/// Environment variable that may hold the login password.
const PASSWORD_ENV: &str = "MERCHANT_PORTAL_PASSWORD";

/// Currency shown for a terminal without transactions.
const FALLBACK_CURRENCY: &str = "AED";

/// Placeholder for absent values.
const EMPTY: &str = "\u{2014}";

/// Merchant portal: browse merchant accounts, terminals and transactions.
#[derive(Debug, Parser)]
#[command(name = "merchant-portal", version, about)]
struct Cli {
    /// Override the session directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Record set to load instead of the bundled sample data.
    #[arg(long, global = true, value_name = "FILE")]
    records: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and persist the session.
    Login {
        /// Login email.
        email: String,
        /// Password (falls back to MERCHANT_PORTAL_PASSWORD).
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the persisted session.
    Logout,
    /// Show the logged-in merchant.
    #[command(alias = "whoami")]
    Profile,
    /// Show headline figures and recent transactions.
    Dashboard,
    /// List merchant accounts.
    Mids {
        /// Case-insensitive match on MID or payment channel.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one merchant account.
    Mid {
        /// Merchant ID.
        mid: String,
    },
    /// List the terminals of a merchant account.
    Tids {
        /// Merchant ID.
        mid: String,
        /// Case-insensitive match on TID.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one terminal.
    Tid {
        /// Merchant ID.
        mid: String,
        /// Terminal ID.
        tid: String,
    },
    /// List transactions, newest first, optionally filtered.
    Transactions(TransactionArgs),
    /// Show one transaction.
    Transaction {
        /// Transaction ID.
        id: String,
    },
}

/// Arguments for the `transactions` subcommand.
#[derive(Debug, Default, Args)]
struct TransactionArgs {
    /// Merchant ID (exact match).
    #[arg(long)]
    mid: Option<String>,
    /// Terminal ID (exact match).
    #[arg(long)]
    tid: Option<String>,
    /// Status: success, failed or pending.
    #[arg(long, value_parser = parse_status)]
    status: Option<TransactionStatus>,
    /// First day (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last day (inclusive, YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Date preset: today, yesterday, last7days or last30days.
    #[arg(long, value_parser = parse_preset, conflicts_with_all = ["from", "to"])]
    preset: Option<DatePreset>,
    /// Case-insensitive match on MID, TID, amount, status, type, card type
    /// or card last-4.
    #[arg(long)]
    search: Option<String>,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses a transaction status for clap.
fn parse_status(s: &str) -> Result<TransactionStatus, String> {
    s.parse().map_err(|err| format!("{err}"))
}

/// Parses a date preset for clap.
fn parse_preset(s: &str) -> Result<DatePreset, String> {
    s.parse().map_err(|err| format!("{err}"))
}

/// Resolves the password from the flag or the environment, printing a
/// hint when neither is set.
fn read_password(flag: Option<String>) -> io::Result<Option<String>> {
    if let Some(password) = flag {
        return Ok(Some(password));
    }
    match std::env::var(PASSWORD_ENV) {
        Ok(val) if !val.is_empty() => Ok(Some(val)),
        _ => {
            let mut err = io::stderr().lock();
            writeln!(err, "{} no password given", "error:".red().bold())?;
            writeln!(
                err,
                "  {} pass --password or set {}",
                "hint:".cyan(),
                PASSWORD_ENV.bold()
            )?;
            Ok(None)
        }
    }
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let records = match load_records(cli.records.as_deref()) {
        Ok(records) => records,
        Err(err) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let store = match create_storage(cli.data_dir) {
        Ok(store) => store,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize session storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut auth = BlockingAuthenticator::new(&records, store);
    let _restored = auth.restore_session();

    dispatch(&mut auth, cli.command, Utc::now().date_naive())
}

/// Loads the record set from `path`, or the bundled sample data.
fn load_records(path: Option<&Path>) -> merchant_portal::error::Result<RecordStore> {
    path.map_or_else(RecordStore::sample, RecordStore::from_path)
}

/// Creates the session store, using `data_dir` if provided or the default
/// XDG data directory otherwise.
fn create_storage(data_dir: Option<PathBuf>) -> merchant_portal::error::Result<FileSessionStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileSessionStore::default_dir()?,
    };
    FileSessionStore::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: BlockingSessionStore>(
    auth: &mut BlockingAuthenticator<'_, S>,
    command: Command,
    today: NaiveDate,
) -> io::Result<ExitCode> {
    match command {
        Command::Login { email, password } => cmd_login(auth, &email, password),
        Command::Logout => cmd_logout(auth),
        Command::Profile => with_portal(auth, cmd_profile),
        Command::Dashboard => with_portal(auth, cmd_dashboard),
        Command::Mids { search } => {
            with_portal(auth, |portal| cmd_mids(portal, search.as_deref()))
        }
        Command::Mid { mid } => with_portal(auth, |portal| cmd_mid(portal, &MerchantId::from(mid))),
        Command::Tids { mid, search } => with_portal(auth, |portal| {
            cmd_tids(portal, &MerchantId::from(mid), search.as_deref())
        }),
        Command::Tid { mid, tid } => with_portal(auth, |portal| {
            cmd_tid(portal, &MerchantId::from(mid), &TerminalId::from(tid))
        }),
        Command::Transactions(args) => {
            with_portal(auth, |portal| cmd_transactions(portal, &args, today))
        }
        Command::Transaction { id } => {
            with_portal(auth, |portal| cmd_transaction(portal, &TransactionId::from(id)))
        }
    }
}

/// Runs `op` against the session's portal, or reports that nobody is
/// logged in.
fn with_portal<S, F>(auth: &BlockingAuthenticator<'_, S>, op: F) -> io::Result<ExitCode>
where
    S: BlockingSessionStore,
    F: FnOnce(Portal<'_>) -> io::Result<ExitCode>,
{
    if let Some(portal) = auth.portal() {
        return op(portal);
    }
    let mut err = io::stderr().lock();
    writeln!(err, "{} not logged in", "error:".red().bold())?;
    writeln!(
        err,
        "  {} run {}",
        "hint:".cyan(),
        "merchant-portal login <EMAIL>".bold()
    )?;
    Ok(ExitCode::FAILURE)
}

/// Prints a not-found error for `label`.
fn not_found(label: &str, id: &dyn core::fmt::Display) -> io::Result<ExitCode> {
    writeln!(
        io::stderr().lock(),
        "{} {label} not found: {id}",
        "error:".red().bold()
    )?;
    Ok(ExitCode::FAILURE)
}

/// Executes the `login` subcommand.
fn cmd_login<S: BlockingSessionStore>(
    auth: &mut BlockingAuthenticator<'_, S>,
    email: &str,
    password_flag: Option<String>,
) -> io::Result<ExitCode> {
    let Some(password) = read_password(password_flag)? else {
        return Ok(ExitCode::FAILURE);
    };
    match auth.try_login(email, &password) {
        Ok(identity) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Logged in as".green().bold(),
                identity.display_name.bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} login failed: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `logout` subcommand.
fn cmd_logout<S: BlockingSessionStore>(
    auth: &mut BlockingAuthenticator<'_, S>,
) -> io::Result<ExitCode> {
    let cleared = auth.try_logout();
    writeln!(io::stdout().lock(), "{}", "Logged out.".green().bold())?;
    match cleared {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            let mut out = io::stderr().lock();
            writeln!(
                out,
                "{} session was not cleared on disk: {err}",
                "warning:".yellow().bold()
            )?;
            writeln!(
                out,
                "  {} it will be restored on the next run",
                "hint:".cyan()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `profile` subcommand.
fn cmd_profile(portal: Portal<'_>) -> io::Result<ExitCode> {
    let identity = portal.identity();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Profile".green().bold())?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "Merchant:".bold(), identity.display_name)?;
    writeln!(out, "  {} {}", "Email:".bold(), identity.email)?;
    let primary = identity
        .merchant_id
        .as_ref()
        .map_or_else(|| EMPTY.to_owned(), ToString::to_string);
    writeln!(out, "  {} {primary}", "Primary MID:".bold())?;
    writeln!(out, "  {} {}", "MIDs:".bold(), identity.accounts.len())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard(portal: Portal<'_>) -> io::Result<ExitCode> {
    let dashboard = portal.dashboard();
    let summary = dashboard.summary;
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        "Dashboard".green().bold(),
        format_args!("(welcome back, {})", dashboard.merchant_name).dimmed()
    )?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Metric").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    let rows: [(&str, String); 9] = [
        ("Total MIDs", dashboard.total_merchants.to_string()),
        ("Active MIDs", dashboard.active_merchants.to_string()),
        ("Total TIDs", dashboard.total_terminals.to_string()),
        ("Active TIDs", dashboard.active_terminals.to_string()),
        ("Total sales", format!("{:.2}", summary.total_sales)),
        ("Transactions", summary.total_transactions.to_string()),
        ("Successful", summary.successful_transactions.to_string()),
        ("Failed", summary.failed_transactions.to_string()),
        ("Success rate", format!("{:.1}%", summary.success_rate())),
    ];
    for (name, value) in rows {
        _ = table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    writeln!(out, "{table}")?;
    drop(out);

    print_transactions_table("Recent Transactions", &dashboard.recent)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `mids` subcommand.
fn cmd_mids(portal: Portal<'_>, search: Option<&str>) -> io::Result<ExitCode> {
    let accounts = search_merchants(portal.accounts(), search.unwrap_or_default());
    print_accounts_table(&accounts)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `mid` subcommand.
fn cmd_mid(portal: Portal<'_>, merchant_id: &MerchantId) -> io::Result<ExitCode> {
    let Some(overview) = portal.merchant_overview(merchant_id) else {
        return not_found("merchant", merchant_id);
    };
    let account = overview.account;
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        account.merchant_id.green().bold(),
        format_args!("({})", account.payment_channel).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "Status:".bold(), colored_account_status(account.status))?;
    writeln!(out, "  {} {}", "Created:".bold(), format_date(account.created_date))?;
    writeln!(
        out,
        "  {} {}",
        "Total transactions:".bold(),
        account.total_transaction_count
    )?;
    writeln!(out)?;
    drop(out);

    let terminals: Vec<&TerminalRecord> = account.terminals.iter().collect();
    print_terminals_table(&terminals)?;
    let preview: Vec<Transaction> = overview
        .transactions
        .iter()
        .take(PREVIEW_LIMIT)
        .cloned()
        .collect();
    print_transactions_table(
        &format!("Recent Transactions ({} total)", overview.transactions.len()),
        &preview,
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `tids` subcommand.
fn cmd_tids(
    portal: Portal<'_>,
    merchant_id: &MerchantId,
    search: Option<&str>,
) -> io::Result<ExitCode> {
    let Some(account) = portal.merchant(merchant_id) else {
        return not_found("merchant", merchant_id);
    };
    let terminals = search_terminals(&account.terminals, search.unwrap_or_default());
    print_terminals_table(&terminals)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `tid` subcommand.
fn cmd_tid(
    portal: Portal<'_>,
    merchant_id: &MerchantId,
    terminal_id: &TerminalId,
) -> io::Result<ExitCode> {
    let Some(overview) = portal.terminal_overview(merchant_id, terminal_id) else {
        return not_found("terminal", terminal_id);
    };
    let terminal = overview.terminal;
    let currency = overview
        .transactions
        .first()
        .map_or(FALLBACK_CURRENCY, |tx| tx.currency.as_str());
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        terminal.terminal_id.green().bold(),
        format_args!("(MID {})", overview.account.merchant_id).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "Status:".bold(), colored_account_status(terminal.status))?;
    writeln!(
        out,
        "  {} {}",
        "Activated:".bold(),
        format_date(terminal.activation_date)
    )?;
    writeln!(
        out,
        "  {} {}",
        "Success volume:".bold(),
        format_amount(overview.success_volume, currency)
    )?;
    writeln!(out, "  {} {}%", "Success rate:".bold(), overview.success_rate)?;
    writeln!(out)?;
    drop(out);

    let preview: Vec<Transaction> = overview
        .transactions
        .iter()
        .take(PREVIEW_LIMIT)
        .cloned()
        .collect();
    print_transactions_table(
        &format!("Recent Transactions ({} total)", overview.transactions.len()),
        &preview,
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Builds a [`TransactionFilter`] from CLI arguments.
fn build_transaction_filter(args: &TransactionArgs, today: NaiveDate) -> TransactionFilter {
    let mut filter = TransactionFilter::new();
    if let Some(mid) = args.mid.as_deref() {
        filter = filter.merchant(MerchantId::from(mid));
    }
    if let Some(tid) = args.tid.as_deref() {
        filter = filter.terminal(TerminalId::from(tid));
    }
    if let Some(status) = args.status {
        filter = filter.status(status);
    }
    if let Some(preset) = args.preset {
        filter = filter.preset(preset, today);
    } else {
        filter = filter.date_range(DateRange::new(args.from, args.to));
    }
    if let Some(text) = args.search.as_deref() {
        filter = filter.search(text);
    }
    filter
}

/// Executes the `transactions` subcommand.
fn cmd_transactions(
    portal: Portal<'_>,
    args: &TransactionArgs,
    today: NaiveDate,
) -> io::Result<ExitCode> {
    let filter = build_transaction_filter(args, today);
    let txs = portal.transactions(&filter);
    print_transactions_table("Transactions", &txs)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `transaction` subcommand.
fn cmd_transaction(portal: Portal<'_>, id: &TransactionId) -> io::Result<ExitCode> {
    let Some(tx) = portal.transaction(id) else {
        return not_found("transaction", id);
    };
    print_transaction_details(tx)?;
    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Colors an account or terminal status.
fn colored_account_status(status: AccountStatus) -> String {
    if status.is_active() {
        status.as_str().green().to_string()
    } else {
        status.as_str().dimmed().to_string()
    }
}

/// Table cell for an account or terminal status.
fn account_status_cell(status: AccountStatus) -> Cell {
    let color = if status.is_active() {
        Color::Green
    } else {
        Color::DarkGrey
    };
    Cell::new(status).fg(color)
}

/// Table cell for a transaction status.
fn transaction_status_cell(status: TransactionStatus) -> Cell {
    let color = match status {
        TransactionStatus::Success => Color::Green,
        TransactionStatus::Failed => Color::Red,
        TransactionStatus::Pending => Color::Yellow,
    };
    Cell::new(status).fg(color)
}

/// Prints merchant accounts in a table.
fn print_accounts_table(accounts: &[&MerchantAccount]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if accounts.is_empty() {
        writeln!(out, "{}", "No merchant accounts found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("MID").fg(Color::Cyan),
        Cell::new("Channel").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Created").fg(Color::Cyan),
        Cell::new("TIDs").fg(Color::Cyan),
        Cell::new("Transactions").fg(Color::Cyan),
    ]);

    for account in accounts {
        _ = table.add_row(vec![
            Cell::new(&account.merchant_id),
            Cell::new(&account.payment_channel),
            account_status_cell(account.status),
            Cell::new(format_date(account.created_date)),
            Cell::new(account.terminals.len()),
            Cell::new(account.total_transaction_count),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Merchant Accounts".green().bold(),
        format_args!("({})", accounts.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints terminals in a table.
fn print_terminals_table(terminals: &[&TerminalRecord]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if terminals.is_empty() {
        writeln!(out, "{}", "No terminals found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("TID").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Activated").fg(Color::Cyan),
        Cell::new("Transactions").fg(Color::Cyan),
    ]);

    for terminal in terminals {
        _ = table.add_row(vec![
            Cell::new(&terminal.terminal_id),
            account_status_cell(terminal.status),
            Cell::new(format_date(terminal.activation_date)),
            Cell::new(terminal.total_transaction_count),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Terminals".green().bold(),
        format_args!("({})", terminals.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints transactions in a table under `title`.
fn print_transactions_table(title: &str, txs: &[Transaction]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("MID").fg(Color::Cyan),
        Cell::new("TID").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Card").fg(Color::Cyan),
    ]);

    for tx in txs {
        _ = table.add_row(vec![
            Cell::new(&tx.id),
            Cell::new(format_timestamp(tx)),
            Cell::new(&tx.merchant_id),
            Cell::new(&tx.terminal_id),
            Cell::new(format_amount(tx.amount, &tx.currency)),
            transaction_status_cell(tx.status),
            Cell::new(format!("{} \u{2022}\u{2022}\u{2022}\u{2022} {}", tx.card_type, tx.card_last4)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format_args!("({})", txs.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints every field of a transaction.
fn print_transaction_details(tx: &Transaction) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        format_amount(tx.amount, &tx.currency).green().bold(),
        format_args!("({})", tx.status).dimmed()
    )?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    let kind = tx.kind.map_or_else(|| EMPTY.to_owned(), |kind| kind.to_string());
    let rows: [(&str, String); 9] = [
        ("Transaction ID", tx.id.to_string()),
        ("Date", format_timestamp(tx)),
        ("MID", tx.merchant_id.to_string()),
        ("TID", tx.terminal_id.to_string()),
        ("Type", kind),
        ("Payment method", tx.payment_method.clone()),
        ("Card", format!("{} ending {}", tx.card_type, tx.card_last4)),
        (
            "Auth code",
            tx.auth_code.clone().unwrap_or_else(|| EMPTY.to_owned()),
        ),
        (
            "Failure reason",
            tx.failure_reason.clone().unwrap_or_else(|| EMPTY.to_owned()),
        ),
    ];
    for (name, value) in rows {
        _ = table.add_row(vec![Cell::new(name).fg(Color::Cyan), Cell::new(value)]);
    }
    for (key, value) in tx.additional_info.iter().flatten() {
        _ = table.add_row(vec![Cell::new(key).fg(Color::Cyan), Cell::new(value)]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
