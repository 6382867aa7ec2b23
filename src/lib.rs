//! # Cashflow Dashboard
//!
//! Data core of a small-business cash-flow dashboard: loads a ledger of
//! payables/receivables from a spreadsheet-shaped source, caches it in an
//! owned store, and answers filter/paginate/aggregate queries over the
//! snapshot.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`,
//!   so KPI totals are exact
//! - **Defensive ingestion**: malformed dates and amounts degrade to
//!   sentinels at load time; queries never fail
//! - **Wholesale replacement**: the cache is swapped as a single `Arc`
//!   assignment, never mutated in place
//! - **Pure queries**: filtering, aggregation and paging are side-effect
//!   free and idempotent
//!
//! ## Example
//!
//! ```no_run
//! use cashflow_dashboard::{FilterState, JsonFileSource, PageRequest, TransactionStore};
//! use cashflow_dashboard::query::run_query;
//!
//! let mut store = TransactionStore::new(JsonFileSource::new("rows.json"));
//! store.load().unwrap();
//!
//! let snapshot = store.snapshot();
//! let result = run_query(&snapshot, &FilterState::new(), PageRequest::default());
//! println!("{} of {} rows, balance {}", result.data.len(), result.total, result.kpi.balance);
//! ```

pub mod auth;
pub mod error;
pub mod export;
pub mod money;
pub mod query;
pub mod source;
pub mod store;
pub mod transaction;

pub use auth::{AuthError, UserDirectory, UserRecord};
pub use error::{DashboardError, Result};
pub use money::Money;
pub use query::{FilterState, Kpi, PageRequest, QueryResult, DEFAULT_PAGE_SIZE};
pub use source::{HttpSource, JsonFileSource, SheetRow, TransactionSource};
pub use store::{FetchTicket, OptionField, StoreEvent, TransactionStore};
pub use transaction::{LedgerView, Movement, Status, Transaction};
