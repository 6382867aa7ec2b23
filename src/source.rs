//! Ledger sources: the spreadsheet wire contract and how rows reach the store.
//!
//! The exporting sheet speaks camelCase field names with currency strings,
//! `DD/MM/YYYY` dates and boolean-like status cells. All coercions happen
//! here, once, at ingestion time; query code only ever sees normalized
//! [`Transaction`] values.

use crate::error::Result;
use crate::money::Money;
use crate::transaction::{Movement, Status, Transaction};
use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::str::FromStr;

/// Raw row as exported by the spreadsheet backend.
///
/// Field names and value shapes are the exporting sheet's contract, not
/// part of the core model. Every field is defaulted so partial rows still
/// deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetRow {
    pub id: String,
    pub date: String,
    pub due_date: String,
    pub bank_account: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub client: String,
    pub paid_by: String,
    pub movement: String,
    pub value_paid: String,
    pub value_received: String,
}

impl SheetRow {
    /// Normalizes the raw row into a ledger [`Transaction`].
    ///
    /// Malformed dates collapse to the empty-string sentinel and malformed
    /// or negative amounts to zero, with a warning. Normalization never
    /// fails: bad cells degrade, they do not drop the row.
    pub fn normalize(self) -> Transaction {
        Transaction {
            date: normalize_date(&self.date),
            due_date: normalize_date(&self.due_date),
            status: Status::parse_label(&self.status),
            movement: Movement::parse_label(&self.movement),
            value_paid: parse_currency(&self.value_paid, &self.id, "valuePaid"),
            value_received: parse_currency(&self.value_received, &self.id, "valueReceived"),
            id: self.id,
            bank_account: self.bank_account,
            kind: self.kind,
            client: self.client,
            paid_by: self.paid_by,
        }
    }
}

/// Normalizes a sheet date cell to an ISO `YYYY-MM-DD` string.
///
/// Accepts ISO dates, `DD/MM/YYYY`, and ISO datetime strings (the date
/// part is kept). Anything else becomes the empty-string sentinel, so
/// lexicographic comparison stays chronological for every stored date.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return date.format("%Y-%m-%d").to_string();
    }
    // Datetime exports keep their date prefix.
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    if !raw.is_empty() {
        warn!("Unparseable date '{}', storing as undated", raw);
    }
    String::new()
}

/// Parses a sheet currency cell ("R$ 1.234,56", "1.234,56", "1234.56").
///
/// Empty cells are zero. Malformed values and negative amounts also read
/// as zero, logged against the owning row.
fn parse_currency(raw: &str, row_id: &str, field: &str) -> Money {
    let cleaned = raw.trim().trim_start_matches("R$").trim();
    if cleaned.is_empty() {
        return Money::ZERO;
    }

    // Comma-decimal form: strip thousands dots, swap the comma.
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };

    match Decimal::from_str(&normalized) {
        Ok(value) if value.is_sign_negative() => {
            warn!("Row {}: negative {} '{}', clamping to zero", row_id, field, raw);
            Money::ZERO
        }
        Ok(value) => Money::new(value),
        Err(_) => {
            warn!("Row {}: unparseable {} '{}', using zero", row_id, field, raw);
            Money::ZERO
        }
    }
}

/// Where ledger rows come from.
///
/// The store is generic over this seam; tests inject in-memory sources and
/// the CLI picks HTTP or a local dump at startup.
pub trait TransactionSource {
    /// Fetches the full row set, normalized.
    fn fetch(&self) -> Result<Vec<Transaction>>;
}

impl<T: TransactionSource + ?Sized> TransactionSource for Box<T> {
    fn fetch(&self) -> Result<Vec<Transaction>> {
        (**self).fetch()
    }
}

/// Remote tabular source: an HTTP endpoint returning a JSON array of rows.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    /// Creates a source for the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl TransactionSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Transaction>> {
        let rows: Vec<SheetRow> = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(rows.into_iter().map(SheetRow::normalize).collect())
    }
}

/// Local source: the same JSON row payload read from a file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl TransactionSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Transaction>> {
        let file = File::open(&self.path)?;
        let rows: Vec<SheetRow> = serde_json::from_reader(BufReader::new(file))?;
        Ok(rows.into_iter().map(SheetRow::normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2025-03-10"), "2025-03-10");
        assert_eq!(normalize_date("10/03/2025"), "2025-03-10");
        assert_eq!(normalize_date(" 2025-03-10 "), "2025-03-10");
        assert_eq!(normalize_date("2025-03-10T14:30:00.000Z"), "2025-03-10");
    }

    #[test]
    fn test_normalize_date_sentinel() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("not a date"), "");
        assert_eq!(normalize_date("31/02/2025"), "");
    }

    #[test]
    fn test_parse_currency_forms() {
        assert_eq!(parse_currency("1234.56", "r", "f").to_string(), "1234.56");
        assert_eq!(parse_currency("1.234,56", "r", "f").to_string(), "1234.56");
        assert_eq!(
            parse_currency("R$ 1.234,56", "r", "f").to_string(),
            "1234.56"
        );
        assert_eq!(parse_currency("0,50", "r", "f").to_string(), "0.50");
        assert_eq!(parse_currency("", "r", "f"), Money::ZERO);
    }

    #[test]
    fn test_parse_currency_defensive() {
        assert_eq!(parse_currency("abc", "r", "f"), Money::ZERO);
        assert_eq!(parse_currency("-10,00", "r", "f"), Money::ZERO);
    }

    #[test]
    fn test_normalize_row_coercions() {
        let row = SheetRow {
            id: "TX-9".to_string(),
            date: "05/01/2025".to_string(),
            due_date: "garbage".to_string(),
            bank_account: "Itau".to_string(),
            kind: "Contas a Pagar".to_string(),
            status: "SIM".to_string(),
            client: "Acme".to_string(),
            paid_by: "Maria".to_string(),
            movement: "Saída".to_string(),
            value_paid: "R$ 2.500,00".to_string(),
            value_received: String::new(),
        };

        let tx = row.normalize();
        assert_eq!(tx.date, "2025-01-05");
        assert_eq!(tx.due_date, "");
        assert_eq!(tx.status, Status::Paid);
        assert_eq!(tx.movement, Movement::Outflow);
        assert_eq!(tx.value_paid.to_string(), "2500.00");
        assert!(tx.value_received.is_zero());
    }

    #[test]
    fn test_partial_row_deserializes() {
        let tx: SheetRow =
            serde_json::from_str(r#"{"id":"A","valuePaid":"10,00"}"#).unwrap();
        let tx = tx.normalize();
        assert_eq!(tx.id, "A");
        assert_eq!(tx.value_paid.to_string(), "10.00");
        assert_eq!(tx.status, Status::Pending);
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"T1","date":"2025-02-01","status":"Pago","movement":"Entrada","valueReceived":"100,00"}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let rows = source.fetch().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "T1");
        assert_eq!(rows[0].movement, Movement::Inflow);
        assert_eq!(rows[0].value_received.to_string(), "100.00");
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("definitely/not/here.json");
        assert!(source.fetch().is_err());
    }
}
