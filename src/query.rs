//! The filter/aggregate engine: pure queries over a ledger snapshot.
//!
//! Given the cached collection, a partial filter, and paging parameters,
//! produces a deterministic page slice plus KPI totals over the entire
//! filtered set. No side effects; identical inputs give identical output.

use crate::money::Money;
use crate::transaction::{Movement, Status, Transaction};
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Optional predicates over the ledger, AND-combined.
///
/// Empty strings count as unset, so a cleared text input behaves like no
/// filter at all. Date bounds are inclusive ISO strings; undated entries
/// (empty-string sentinel) never match a bounded range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Entry date lower bound, inclusive.
    pub start_date: Option<String>,

    /// Entry date upper bound, inclusive.
    pub end_date: Option<String>,

    /// Exact bank account match.
    pub bank_account: Option<String>,

    /// Exact "type" label match.
    pub kind: Option<String>,

    /// Exact status match.
    pub status: Option<Status>,

    /// Exact movement match.
    pub movement: Option<Movement>,

    /// Exact paid-by match.
    pub paid_by: Option<String>,

    /// Case-insensitive substring match on the client name.
    pub client: Option<String>,

    /// Case-insensitive substring match over all field values.
    pub search: Option<String>,
}

impl FilterState {
    /// Creates an empty filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    #[must_use]
    pub fn with_bank_account(mut self, account: impl Into<String>) -> Self {
        self.bank_account = Some(account.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = Some(movement);
        self
    }

    #[must_use]
    pub fn with_paid_by(mut self, paid_by: impl Into<String>) -> Self {
        self.paid_by = Some(paid_by.into());
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns true if the filter matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        set(&self.start_date).is_none()
            && set(&self.end_date).is_none()
            && set(&self.bank_account).is_none()
            && set(&self.kind).is_none()
            && self.status.is_none()
            && self.movement.is_none()
            && set(&self.paid_by).is_none()
            && set(&self.client).is_none()
            && set(&self.search).is_none()
    }

    /// Whether a transaction satisfies every set predicate.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if set(&self.start_date).is_some() || set(&self.end_date).is_some() {
            if tx.date.is_empty() {
                return false;
            }
            if let Some(start) = set(&self.start_date) {
                if tx.date.as_str() < start {
                    return false;
                }
            }
            if let Some(end) = set(&self.end_date) {
                if tx.date.as_str() > end {
                    return false;
                }
            }
        }

        if let Some(account) = set(&self.bank_account) {
            if tx.bank_account != account {
                return false;
            }
        }
        if let Some(kind) = set(&self.kind) {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if tx.status != status {
                return false;
            }
        }
        if let Some(movement) = self.movement {
            if tx.movement != movement {
                return false;
            }
        }
        if let Some(paid_by) = set(&self.paid_by) {
            if tx.paid_by != paid_by {
                return false;
            }
        }
        if let Some(client) = set(&self.client) {
            if !tx.client.to_lowercase().contains(&client.to_lowercase()) {
                return false;
            }
        }
        if let Some(search) = set(&self.search) {
            if !tx.search_haystack().contains(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Treats empty strings as unset.
fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 1-indexed page request. Zero values normalize to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        PageRequest {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Aggregate figures over a filtered set. `balance` is always
/// `total_received - total_paid`, decimal-exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpi {
    pub total_paid: Money,
    pub total_received: Money,
    pub balance: Money,
}

impl Kpi {
    fn over<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Self {
        let mut total_paid = Money::ZERO;
        let mut total_received = Money::ZERO;
        for tx in transactions {
            total_paid += tx.value_paid;
            total_received += tx.value_received;
        }
        Kpi {
            total_paid,
            total_received,
            balance: total_received - total_paid,
        }
    }
}

/// One page of query results plus totals over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// The requested page slice, in original relative order.
    pub data: Vec<Transaction>,

    /// Count of transactions matching the filter, across all pages.
    pub total: usize,

    pub page: usize,
    pub page_size: usize,

    /// `ceil(total / page_size)`; 0 for an empty filtered set.
    pub total_pages: usize,

    /// Totals over the entire filtered set, not just this page.
    pub kpi: Kpi,
}

/// The full filtered set in original relative order. Export path.
pub fn filter_transactions(transactions: &[Transaction], filter: &FilterState) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect()
}

/// Filters, aggregates, and pages a ledger snapshot.
///
/// A page past the end returns an empty slice with `total`/`total_pages`
/// still reflecting the whole filtered set.
pub fn run_query(
    transactions: &[Transaction],
    filter: &FilterState,
    page: PageRequest,
) -> QueryResult {
    let matched: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .collect();

    let total = matched.len();
    let total_pages = total.div_ceil(page.page_size);
    let kpi = Kpi::over(matched.iter().copied());

    let start = (page.page - 1).saturating_mul(page.page_size);
    let data: Vec<Transaction> = matched
        .iter()
        .skip(start)
        .take(page.page_size)
        .map(|tx| (*tx).clone())
        .collect();

    QueryResult {
        data,
        total,
        page: page.page,
        page_size: page.page_size,
        total_pages,
        kpi,
    }
}
