use std::fmt::Write;

use clap::ValueEnum;

use super::format::format_brl;
use crate::core::ProjectionResult;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LedgerView {
    Monthly,
    Annual,
}

const AMOUNT_WIDTH: usize = 20;

/// Plain-text report: summary lines followed by one table row per ledger entry.
pub fn render_report(result: &ProjectionResult, view: LedgerView) -> String {
    let mut out = String::new();
    summary_line(&mut out, "Final value", result.final_value);
    summary_line(&mut out, "Total contributed", result.total_contributed);
    summary_line(&mut out, "Total interest", result.total_interest);
    if let Some(real_value) = result.inflation_adjusted_final_value {
        summary_line(&mut out, "Inflation-adjusted value", real_value);
    }
    if let Some(real_gain) = result.real_gain {
        summary_line(&mut out, "Real gain", real_gain);
    }
    out.push('\n');

    let period = match view {
        LedgerView::Monthly => "Month",
        LedgerView::Annual => "Year",
    };
    let _ = writeln!(
        out,
        "{period:>6}{:>w$}{:>w$}{:>w$}",
        "Total contributed",
        "Accrued interest",
        "Total value",
        w = AMOUNT_WIDTH
    );

    match view {
        LedgerView::Monthly => {
            for entry in &result.monthly_ledger {
                table_row(
                    &mut out,
                    entry.month,
                    entry.total_contributed,
                    entry.accrued_interest,
                    entry.total_value,
                );
            }
        }
        LedgerView::Annual => {
            for entry in &result.annual_ledger {
                table_row(
                    &mut out,
                    entry.year,
                    entry.total_contributed,
                    entry.accrued_interest,
                    entry.total_value,
                );
            }
        }
    }
    out
}

fn summary_line(out: &mut String, label: &str, value: f64) {
    let _ = writeln!(out, "{:<26}{}", format!("{label}:"), format_brl(value));
}

fn table_row(out: &mut String, period: u32, contributed: f64, interest: f64, total: f64) {
    let _ = writeln!(
        out,
        "{period:>6}{:>w$}{:>w$}{:>w$}",
        format_brl(contributed),
        format_brl(interest),
        format_brl(total),
        w = AMOUNT_WIDTH
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Duration, ProjectionInput, Rate, project};

    fn scenario(inflation: f64) -> ProjectionResult {
        let mut input = ProjectionInput::new(0.0, 100.0, Rate::monthly(1.0), Duration::months(18));
        input.annual_inflation_pct = inflation;
        project(&input).expect("valid input")
    }

    #[test]
    fn monthly_view_has_one_row_per_month() {
        let report = render_report(&scenario(0.0), LedgerView::Monthly);
        let lines: Vec<&str> = report.lines().collect();

        // 3 summary lines, a blank line, the header, then 18 rows.
        assert_eq!(lines.len(), 3 + 1 + 1 + 18);
        assert!(lines[0].starts_with("Final value:"));
        assert!(lines[4].trim_start().starts_with("Month"));
        assert!(lines[5].trim_start().starts_with("1 "));
        assert!(lines[5].ends_with("R$ 101,00"));
        assert!(lines[6].ends_with("R$ 203,01"));
        assert!(!report.contains("Real gain"));
    }

    #[test]
    fn annual_view_includes_partial_year_and_inflation_lines() {
        let report = render_report(&scenario(4.5), LedgerView::Annual);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 5 + 1 + 1 + 2);
        assert!(lines[3].starts_with("Inflation-adjusted value:"));
        assert!(lines[4].starts_with("Real gain:"));
        assert!(lines[6].trim_start().starts_with("Year"));
        assert!(lines[8].trim_start().starts_with("2 "));
        assert!(lines[8].contains("R$ 1.800,00"));
    }
}
