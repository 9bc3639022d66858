//! CSV format handling for ledger commands and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger commands
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, LedgerCommand};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, account, counterparty, amount.
/// `counterparty` is only meaningful for transfers, and `amount` is optional
/// for creations.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op: String,
    pub account: String,
    pub counterparty: Option<String>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a LedgerCommand
///
/// Only the shape of the row is checked here. Values such as empty ids or
/// negative amounts are passed through for the ledger to reject.
///
/// # Errors
///
/// Returns a message when the type is unknown, an amount is not an integer,
/// or a transfer lacks its counterparty or amount.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerCommand, String> {
    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => match amount_str.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                return Err(format!(
                    "Invalid amount '{}' for account '{}'",
                    amount_str, csv_record.account
                ))
            }
        },
        _ => None,
    };

    match csv_record.op.to_lowercase().as_str() {
        "create" => Ok(LedgerCommand::Create {
            account: csv_record.account,
            initial_balance: amount,
        }),
        "transfer" => {
            let to = csv_record
                .counterparty
                .filter(|to| !to.trim().is_empty())
                .ok_or_else(|| {
                    format!("Transfer from '{}' requires a counterparty", csv_record.account)
                })?;
            let amount = amount.ok_or_else(|| {
                format!("Transfer from '{}' requires an amount", csv_record.account)
            })?;
            Ok(LedgerCommand::Transfer {
                from: csv_record.account,
                to,
                amount,
            })
        }
        _ => Err(format!(
            "Invalid command type: '{}' for account '{}'",
            csv_record.op, csv_record.account
        )),
    }
}

/// Write account states to CSV format
///
/// Writes accounts with columns: account, balance.
/// Accounts are sorted by id for deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer
            .write_record([account.id.as_str(), &account.balance().to_string()])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
