//! Grouping logic for transaction history (day groups).

use serde::Serialize;
use time::{Date, UtcOffset};

use crate::transaction::Transaction;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// The transactions that happened on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    /// The day in the viewer's timezone.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// The transactions of that day, in the order they were given.
    pub transactions: Vec<Transaction>,
}

/// Split `transactions` into groups by the local day they happened on.
///
/// Expects `transactions` sorted by date, e.g. newest first as returned by
/// the store. Consecutive transactions on the same day end up in the same
/// group, so the groups keep the order of the input.
pub fn group_by_day(transactions: Vec<Transaction>, local_offset: UtcOffset) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();

    for transaction in transactions {
        let date = transaction.date.to_offset(local_offset).date();

        match days.last_mut() {
            Some(current) if current.date == date => current.transactions.push(transaction),
            _ => days.push(DayGroup {
                date,
                transactions: vec![transaction],
            }),
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use time::{
        OffsetDateTime, UtcOffset,
        macros::{date, datetime, offset},
    };

    use crate::{
        money::Money,
        transaction::{Transaction, TransactionType, group_by_day},
    };

    fn transaction_at(id: i64, date: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            amount: Money::from_cents(100),
            transaction_type: TransactionType::Expense,
            date,
            description: format!("transaction {id}"),
            category: "General".to_owned(),
        }
    }

    #[test]
    fn serializes_day_as_calendar_date() {
        let groups = group_by_day(
            vec![transaction_at(7, datetime!(2026-10-18 09:30 UTC))],
            UtcOffset::UTC,
        );

        let json = serde_json::to_value(&groups).unwrap();

        assert_eq!(json[0]["date"], "2026-10-18");
        assert_eq!(json[0]["transactions"][0]["id"], 7);
        assert_eq!(json[0]["transactions"][0]["date"], "2026-10-18T09:30:00Z");
    }

    #[test]
    fn empty_history_has_no_groups() {
        assert_eq!(group_by_day(vec![], UtcOffset::UTC), vec![]);
    }

    #[test]
    fn groups_consecutive_transactions_on_the_same_day() {
        let transactions = vec![
            transaction_at(4, datetime!(2025-10-05 18:00 UTC)),
            transaction_at(3, datetime!(2025-10-05 08:00 UTC)),
            transaction_at(2, datetime!(2025-10-03 12:00 UTC)),
            transaction_at(1, datetime!(2025-09-30 23:59 UTC)),
        ];

        let groups = group_by_day(transactions, UtcOffset::UTC);

        let summary: Vec<_> = groups
            .iter()
            .map(|group| {
                (
                    group.date,
                    group.transactions.iter().map(|t| t.id).collect::<Vec<_>>(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                (date!(2025 - 10 - 05), vec![4, 3]),
                (date!(2025 - 10 - 03), vec![2]),
                (date!(2025 - 09 - 30), vec![1]),
            ]
        );
    }

    #[test]
    fn uses_the_local_day() {
        // 11pm UTC on the 4th is already the 5th in New Zealand.
        let transactions = vec![
            transaction_at(2, datetime!(2025-10-05 01:00 UTC)),
            transaction_at(1, datetime!(2025-10-04 23:00 UTC)),
        ];

        let groups = group_by_day(transactions, offset!(+13));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, date!(2025 - 10 - 05));
    }
}
