//! Cashflow Dashboard CLI
//!
//! Loads a ledger from a local JSON row dump or a remote HTTP endpoint,
//! applies filters, and writes the requested page (or the entire filtered
//! set) as semicolon-delimited CSV to stdout. The KPI summary is logged.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- rows.json status=Pago page=2 > page2.csv
//! cargo run -- https://example.test/ledger client=acme --all > export.csv
//! ```
//!
//! Filter keys: `from`, `to`, `account`, `type`, `status`, `movement`,
//! `paid-by`, `client`, `search`; paging keys: `page`, `page-size`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: set to `info` or `debug` to control logging verbosity

use cashflow_dashboard::query::{filter_transactions, run_query};
use cashflow_dashboard::{
    export, DashboardError, FilterState, HttpSource, JsonFileSource, Movement, PageRequest,
    Result, Status, TransactionSource, TransactionStore, DEFAULT_PAGE_SIZE,
};
use log::info;
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct CliArgs {
    source: String,
    filter: FilterState,
    page: PageRequest,
    export_all: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let source = args.first().ok_or(DashboardError::MissingArgument)?.clone();

    let mut filter = FilterState::new();
    let mut page = 1usize;
    let mut page_size = DEFAULT_PAGE_SIZE;
    let mut export_all = false;

    for arg in &args[1..] {
        if arg == "--all" {
            export_all = true;
            continue;
        }
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| DashboardError::UnknownArgument(arg.clone()))?;
        match key {
            "from" => filter.start_date = Some(value.to_string()),
            "to" => filter.end_date = Some(value.to_string()),
            "account" => filter.bank_account = Some(value.to_string()),
            "type" => filter.kind = Some(value.to_string()),
            "status" => filter.status = Some(Status::parse_label(value)),
            "movement" => filter.movement = Some(Movement::parse_label(value)),
            "paid-by" => filter.paid_by = Some(value.to_string()),
            "client" => filter.client = Some(value.to_string()),
            "search" => filter.search = Some(value.to_string()),
            "page" => page = parse_number(key, value)?,
            "page-size" => page_size = parse_number(key, value)?,
            _ => return Err(DashboardError::UnknownArgument(arg.clone())),
        }
    }

    Ok(CliArgs {
        source,
        filter,
        page: PageRequest::new(page, page_size),
        export_all,
    })
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| DashboardError::InvalidArgument {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let source: Box<dyn TransactionSource> = if cli.source.starts_with("http://")
        || cli.source.starts_with("https://")
    {
        Box::new(HttpSource::new(&cli.source))
    } else {
        Box::new(JsonFileSource::new(&cli.source))
    };

    let mut store = TransactionStore::new(source);
    store.load()?;

    let snapshot = store.snapshot();
    let stdout = io::stdout();
    let handle = stdout.lock();

    if cli.export_all {
        let rows = filter_transactions(&snapshot, &cli.filter);
        info!("Exporting {} of {} transactions", rows.len(), snapshot.len());
        export::write_csv(&rows, handle)?;
    } else {
        let result = run_query(&snapshot, &cli.filter, cli.page);
        info!(
            "Page {}/{} ({} rows of {}), paid {} received {} balance {}",
            result.page,
            result.total_pages,
            result.data.len(),
            result.total,
            result.kpi.total_paid,
            result.kpi.total_received,
            result.kpi.balance
        );
        export::write_csv(&result.data, handle)?;
    }

    Ok(())
}
