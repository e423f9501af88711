//! Text formatting of transactions and summaries for display.
//!
//! Signs are only applied here: stored amounts are always positive and the
//! direction comes from the transaction type.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, OffsetDateTime, UtcOffset, macros::format_description};

use crate::{
    money::Money,
    summary::Summary,
    transaction::{DayGroup, Transaction, TransactionType},
};

/// Shown in place of a blank category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Format `amount` as dollars, e.g. "$1,234.50" or "-$3.00".
pub fn format_currency(amount: Money) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    let cents = amount.cents().unsigned_abs();
    let dollars = get_thousands_separator_formatter().fmt_string(cents / 100);

    format!("{sign}${dollars}.{:02}", cents % 100)
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}

/// The amount with an explicit direction, "+$12.50" for income and
/// "-$12.50" for expenses.
pub fn format_signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.transaction_type {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };

    format!("{sign}{}", format_currency(transaction.amount.abs()))
}

/// The category to show for `transaction`.
pub fn category_label(transaction: &Transaction) -> &str {
    match transaction.category.trim() {
        "" => UNCATEGORIZED_LABEL,
        category => category,
    }
}

/// A short local date such as "Oct 18".
pub fn format_short_date(date: OffsetDateTime, local_offset: UtcOffset) -> String {
    let local_date = date.to_offset(local_offset).date();

    local_date
        .format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| local_date.to_string())
}

/// A long heading for a day of history, e.g. "Saturday, October 18th, 2026".
pub fn format_day_heading(date: Date) -> String {
    let day = date.day();

    format!(
        "{}, {} {day}{}, {}",
        date.weekday(),
        date.month(),
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u8) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// One line of a transaction list, e.g.
/// `#12    Oct 18  Groceries        Weekly shop          -$45.99`.
pub fn render_transaction_line(transaction: &Transaction, local_offset: UtcOffset) -> String {
    format!(
        "{:<6} {:<7} {:<16} {:<24} {:>12}",
        format!("#{}", transaction.id),
        format_short_date(transaction.date, local_offset),
        category_label(transaction),
        transaction.description,
        format_signed_amount(transaction),
    )
}

/// The balance, income and expense totals, one per line.
pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Total Balance  {}\nIncome         {}\nExpenses       {}",
        format_currency(summary.balance),
        format_currency(summary.total_income),
        format_currency(summary.total_expense),
    )
}

/// Day headings followed by the transactions of each day.
pub fn render_history(groups: &[DayGroup], local_offset: UtcOffset) -> String {
    let mut lines = Vec::new();

    for group in groups {
        lines.push(format_day_heading(group.date));

        for transaction in &group.transactions {
            lines.push(format!(
                "  {}",
                render_transaction_line(transaction, local_offset)
            ));
        }
    }

    lines.join("\n")
}
