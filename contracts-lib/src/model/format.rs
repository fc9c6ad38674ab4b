//! Display formatting for contract fields.

use chrono::Datelike;
use chrono::NaiveDate;

const PLACEHOLDER: &str = "-";

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn parse_date(date: &str) -> Option<NaiveDate> {
    // Timestamps such as 2024-01-15T10:00:00Z keep only their date part.
    let date_part = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Formats `YYYY-MM-DD` as `DD/MM/YYYY`; empty input gives `-`.
///
/// Input that doesn't split into three dash-separated parts is returned as is.
pub fn short_date(date: &str) -> String {
    if date.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let parts: Vec<&str> = date.splitn(3, '-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => date.to_string(),
    }
}

/// Formats a date as `15 de enero de 2024`; missing or invalid input gives `-`.
pub fn long_date(date: Option<&str>) -> String {
    let Some(date) = date.and_then(parse_date) else {
        return PLACEHOLDER.to_string();
    };
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_ES[date.month0() as usize],
        date.year()
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

fn split_amount(value: f64, decimals: usize) -> (bool, String, String) {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };
    (value < 0.0, int_part, frac_part)
}

/// Formats an amount for the contracts list: `USD 10,000` or `EUR 1,234.5`.
///
/// Up to three decimals are kept, trailing zeros dropped.
pub fn list_amount(currency: &str, value: f64) -> String {
    let (negative, int_part, frac_part) = split_amount(value, 3);
    let frac = frac_part.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    let mut amount = format!("{}{}", sign, group_digits(&int_part, ','));
    if !frac.is_empty() {
        amount.push('.');
        amount.push_str(frac);
    }
    format!("{} {}", currency, amount)
}

/// Formats an amount for the detail view: `USD 10.000,00`.
pub fn detail_amount(currency: &str, value: f64) -> String {
    let (negative, int_part, frac_part) = split_amount(value, 2);
    let sign = if negative { "-" } else { "" };
    format!(
        "{} {}{},{}",
        currency,
        sign,
        group_digits(&int_part, '.'),
        frac_part
    )
}

/// Returns `true` when the date text parses as a calendar date.
pub fn is_valid_date(date: &str) -> bool {
    parse_date(date).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-15"), "15/03/2024");
        assert_eq!(short_date(""), "-");
        assert_eq!(short_date("pronto"), "pronto");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(Some("2024-01-05")), "05 de enero de 2024");
        assert_eq!(long_date(Some("2024-12-31T23:00:00Z")), "31 de diciembre de 2024");
        assert_eq!(long_date(None), "-");
        assert_eq!(long_date(Some("n/a")), "-");
    }

    #[test]
    fn test_list_amount() {
        assert_eq!(list_amount("USD", 10000.0), "USD 10,000");
        assert_eq!(list_amount("EUR", 1234.5), "EUR 1,234.5");
        assert_eq!(list_amount("MXN", 999.0), "MXN 999");
        assert_eq!(list_amount("USD", -1500000.0), "USD -1,500,000");
    }

    #[test]
    fn test_detail_amount() {
        assert_eq!(detail_amount("USD", 10000.0), "USD 10.000,00");
        assert_eq!(detail_amount("EUR", 0.5), "EUR 0,50");
    }
}
