//! Number parsing and currency display for Brazilian-real amounts.
//!
//! Amounts arrive either as plain machine numbers (`1234.56`) or in the
//! pt-BR layout users type (`1.234,56`, `R$ 1.000,00`). Display always uses
//! the pt-BR layout with two decimals.

use super::error::{ApiError, ApiResult};

/// Rounds half away from zero to two decimals. Display only.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats `value` as `R$ 1.234,56`; negative amounts as `-R$ 1,00`.
///
/// Non-finite values render as `R$ inf` / `R$ NaN` rather than a made-up amount.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("R$ {value}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (digits, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let is_zero = digits.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction}")
}

/// Parses a user-entered amount or percentage.
///
/// A comma is the decimal separator and dots group thousands. Without a
/// comma a single dot is a decimal point and several dots group thousands,
/// except after an `R$` prefix, where `1.500` is read as one thousand five
/// hundred. A `%` suffix and surrounding whitespace are ignored.
pub fn parse_amount(field: &'static str, raw: &str) -> ApiResult<f64> {
    let malformed = || ApiError::MalformedNumber {
        field,
        value: raw.to_string(),
    };

    let text = raw.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    let (currency, text) = match text.strip_prefix("R$") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    let text = text.strip_suffix('%').unwrap_or(text).trim_end();

    if text.is_empty()
        || !text
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == '.' || ch == ',')
    {
        return Err(malformed());
    }

    let normalized = match text.split_once(',') {
        Some((integer, fraction)) => {
            if integer.is_empty()
                || fraction.is_empty()
                || fraction.contains([',', '.'])
                || !is_grouped(integer)
            {
                return Err(malformed());
            }
            format!("{}.{fraction}", integer.replace('.', ""))
        }
        None if text.matches('.').count() > 1 || (currency && is_grouped(text)) => {
            if !is_grouped(text) {
                return Err(malformed());
            }
            text.replace('.', "")
        }
        None => text.to_string(),
    };

    let value: f64 = normalized.parse().map_err(|_| malformed())?;
    Ok(if negative { -value } else { value })
}

/// Either ungrouped digits or `1.234.567` style groups of three.
fn is_grouped(integer: &str) -> bool {
    let mut groups = integer.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    if !integer.contains('.') {
        return !head.is_empty();
    }
    (1..=3).contains(&head.len()) && groups.all(|group| group.len() == 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> f64 {
        parse_amount("amount", raw).expect("valid amount")
    }

    #[test]
    fn parse_amount_accepts_machine_numbers() {
        assert_eq!(parsed("1234.56"), 1_234.56);
        assert_eq!(parsed("  42 "), 42.0);
        assert_eq!(parsed("0.5"), 0.5);
    }

    #[test]
    fn parse_amount_accepts_pt_br_layout() {
        assert_eq!(parsed("1.234,56"), 1_234.56);
        assert_eq!(parsed("1234,5"), 1_234.5);
        assert_eq!(parsed("R$ 1.000.000,00"), 1_000_000.0);
        assert_eq!(parsed("1.000.000"), 1_000_000.0);
        assert_eq!(parsed("0,75%"), 0.75);
        assert_eq!(parsed("-R$ 10,00"), -10.0);
    }

    #[test]
    fn parse_amount_reads_single_dot_group_after_currency_prefix() {
        assert_eq!(parsed("R$ 1.500"), 1_500.0);
        assert_eq!(parsed("R$ 12.000"), 12_000.0);
        assert_eq!(parsed("R$ 1.5"), 1.5);
        assert_eq!(parsed("R$ 1234.56"), 1_234.56);
        assert_eq!(parsed("1.500"), 1.5);
    }

    #[test]
    fn parse_amount_rejects_malformed_strings() {
        for raw in ["", "abc", "1,2,3", "12,34.5", "1.23.4", "12.3456,00", ",5", "7,", "R$", "1e5"] {
            let err = parse_amount("initialCapital", raw).expect_err(raw);
            assert!(
                matches!(err, ApiError::MalformedNumber { field: "initialCapital", .. }),
                "unexpected error for {raw:?}: {err}"
            );
        }
    }

    #[test]
    fn round_cents_rounds_half_away_from_zero() {
        assert_eq!(round_cents(1_126.825_030_131_2), 1_126.83);
        assert_eq!(round_cents(203.010_000_000_1), 203.01);
        assert_eq!(round_cents(-0.126), -0.13);
    }

    #[test]
    fn format_brl_groups_thousands_and_uses_comma_decimals() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(3.01), "R$ 3,01");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
        assert_eq!(format_brl(1_126.825_03), "R$ 1.126,83");
        assert_eq!(format_brl(1_234_567.8), "R$ 1.234.567,80");
        assert_eq!(format_brl(-1.0), "-R$ 1,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn format_brl_handles_amounts_beyond_integer_cents() {
        assert_eq!(format_brl(1e20), "R$ 100.000.000.000.000.000.000,00");
        assert_eq!(format_brl(f64::INFINITY), "R$ inf");
        assert_eq!(format_brl(f64::NAN), "R$ NaN");
    }
}
