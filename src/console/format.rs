use rust_decimal::Decimal;

use crate::account::TransactionRecord;

/// Two decimals with thousands separators, e.g. `-1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_record(record: &TransactionRecord) -> String {
    format!(
        "{} - {} - $ {}",
        record.timestamp().format("%Y-%m-%d %H:%M:%S"),
        record.kind(),
        format_amount(record.amount())
    )
}
