//! CSV export of a filtered ledger set.
//!
//! Semicolon-delimited with a fixed column order and decimal-comma
//! amounts, matching what the spreadsheet tooling on the other end
//! expects to re-import.

use crate::error::Result;
use crate::transaction::Transaction;
use chrono::{DateTime, Local};
use std::io::Write;

/// Export column order. Fixed; reorder nothing.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "ID",
    "Date",
    "Bank Account",
    "Type",
    "Status",
    "Client",
    "Paid By",
    "Movement",
    "Value Paid",
    "Value Received",
];

/// Writes the transactions as semicolon-delimited CSV.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS)?;

    for tx in transactions {
        csv_writer.write_record([
            tx.id.as_str(),
            tx.date.as_str(),
            tx.bank_account.as_str(),
            tx.kind.as_str(),
            tx.status.as_str(),
            tx.client.as_str(),
            tx.paid_by.as_str(),
            tx.movement.as_str(),
            &tx.value_paid.to_comma_string(),
            &tx.value_received.to_comma_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export filename templated with the current timestamp, e.g.
/// `transactions_2025-03-10_143005.csv`.
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("transactions_{}.csv", now.format("%Y-%m-%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::transaction::{Movement, Status};
    use chrono::TimeZone;
    use std::str::FromStr;

    fn sample() -> Transaction {
        Transaction {
            id: "TX-1".to_string(),
            date: "2025-03-10".to_string(),
            due_date: "2025-03-20".to_string(),
            bank_account: "Itau".to_string(),
            kind: "Contas a Pagar".to_string(),
            status: Status::Paid,
            client: "Acme Ltda".to_string(),
            paid_by: "Maria".to_string(),
            movement: Movement::Outflow,
            value_paid: Money::from_str("1234.56").unwrap(),
            value_received: Money::ZERO,
        }
    }

    #[test]
    fn test_export_header_and_delimiter() {
        let mut out = Vec::new();
        write_csv(&[sample()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "ID;Date;Bank Account;Type;Status;Client;Paid By;Movement;Value Paid;Value Received"
        );
    }

    #[test]
    fn test_export_row_uses_decimal_comma() {
        let mut out = Vec::new();
        write_csv(&[sample()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "TX-1;2025-03-10;Itau;Contas a Pagar;Pago;Acme Ltda;Maria;Saída;1234,56;0,00"
        );
    }

    #[test]
    fn test_export_empty_set_is_header_only() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_filename_template() {
        let when = Local.with_ymd_and_hms(2025, 3, 10, 14, 30, 5).unwrap();
        assert_eq!(export_filename(when), "transactions_2025-03-10_143005.csv");
    }
}
