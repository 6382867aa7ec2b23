//! Ledger record model: the normalized transaction and its closed enums.

use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Settlement state of a ledger entry.
///
/// Wire labels follow the exporting sheet: `Pago`, `Pendente`, `Agendado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Settled ("Pago").
    #[serde(rename = "Pago")]
    Paid,

    /// Awaiting settlement ("Pendente").
    #[serde(rename = "Pendente")]
    Pending,

    /// Scheduled for a future date ("Agendado").
    #[serde(rename = "Agendado")]
    Scheduled,
}

impl Status {
    /// The sheet label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Paid => "Pago",
            Status::Pending => "Pendente",
            Status::Scheduled => "Agendado",
        }
    }

    /// Parses a sheet label, accepting the boolean-like "SIM" column value
    /// as settled. Anything unrecognized reads as pending.
    pub fn parse_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pago" | "sim" => Status::Paid,
            "agendado" => Status::Scheduled,
            _ => Status::Pending,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a ledger entry: inflow ("Entrada") or outflow ("Saída").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    #[serde(rename = "Entrada")]
    Inflow,

    #[serde(rename = "Saída")]
    Outflow,
}

impl Movement {
    /// The sheet label for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::Inflow => "Entrada",
            Movement::Outflow => "Saída",
        }
    }

    /// Parses a sheet label. The exporting column is two-state, so any
    /// label other than "Entrada" reads as an outflow.
    pub fn parse_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "entrada" => Movement::Inflow,
            _ => Movement::Outflow,
        }
    }
}

impl std::fmt::Display for Movement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column layout of a ledger table view.
///
/// Resolved once when a view is configured, from the ledger's "type" label.
/// Render paths branch on this variant, never on the raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerView {
    /// Outgoing bills: due date, paid-by and value-paid columns.
    Payable,

    /// Incoming receipts: client and value-received columns.
    Receivable,

    /// Both directions in one table.
    Mixed,
}

impl LedgerView {
    /// Classifies a free-text "type" label into a layout variant.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("pagar") {
            LedgerView::Payable
        } else if label.contains("receber") {
            LedgerView::Receivable
        } else {
            LedgerView::Mixed
        }
    }
}

/// A normalized cash-flow ledger entry.
///
/// Records are created wholesale when a snapshot is loaded from the source
/// and are never mutated individually; a refresh replaces the whole set.
///
/// `date` and `due_date` are ISO `YYYY-MM-DD` strings, so lexicographic
/// comparison is chronological. A value the source could not parse is the
/// empty string, set at ingestion time.
///
/// Exactly one of `value_paid`/`value_received` is expected to be nonzero
/// depending on `movement`, but the source does not enforce it and neither
/// does this type; both are carried as loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique entry id.
    pub id: String,

    /// Entry date, ISO string (or empty).
    pub date: String,

    /// Due date, ISO string (or empty).
    pub due_date: String,

    /// Bank account label.
    pub bank_account: String,

    /// Free-text "type" label from the ledger sheet.
    pub kind: String,

    /// Settlement state.
    pub status: Status,

    /// Client or counterparty name.
    pub client: String,

    /// Who settled the entry.
    pub paid_by: String,

    /// Inflow or outflow.
    pub movement: Movement,

    /// Amount paid out. Non-negative.
    pub value_paid: Money,

    /// Amount received. Non-negative.
    pub value_received: Money,
}

impl Transaction {
    /// Days this entry is past due as of `today`.
    ///
    /// `None` for settled entries, entries with no parseable due date, and
    /// entries not yet due.
    pub fn overdue_days(&self, today: NaiveDate) -> Option<i64> {
        if self.status == Status::Paid {
            return None;
        }
        let due = NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok()?;
        let days = (today - due).num_days();
        (days > 0).then_some(days)
    }

    /// Lowercase concatenation of every field value, for free-text search.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {} {} {}",
            self.id,
            self.date,
            self.due_date,
            self.bank_account,
            self.kind,
            self.status,
            self.client,
            self.paid_by,
            self.movement,
            self.value_paid,
            self.value_received,
        )
        .to_lowercase()
    }
}
