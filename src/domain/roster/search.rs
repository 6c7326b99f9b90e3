//! Case-insensitive search filters for the roster and payment tables.

use super::{Member, PaymentWithMember};

/// Filters members by case-insensitive substring match on the name.
///
/// An empty or whitespace-only query keeps everything.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return members.iter().collect();
    }
    members
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&q))
        .collect()
}

/// Filters payments by case-insensitive match across member name, method,
/// amount, and recorded date; any single hit qualifies.
///
/// The amount matches against its plain decimal rendering and the date
/// against `DD/MM/YYYY`.
pub fn filter_payments<'a>(
    payments: &'a [PaymentWithMember],
    query: &str,
) -> Vec<&'a PaymentWithMember> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return payments.iter().collect();
    }
    payments
        .iter()
        .filter(|p| {
            let name = p.member_name.as_deref().unwrap_or("").to_lowercase();
            let method = p.payment.method.display_name().to_lowercase();
            let amount = p.payment.amount.to_decimal_string();
            let date = p
                .payment
                .recorded_at
                .as_datetime()
                .format("%d/%m/%Y")
                .to_string();
            name.contains(&q) || method.contains(&q) || amount.contains(&q) || date.contains(&q)
        })
        .collect()
}
