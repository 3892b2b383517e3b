use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    Monthly,
    Annual,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Months,
    Years,
}

/// Interest rate as a percentage in its stated unit, e.g. `12` annual.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub value: f64,
    pub unit: RateUnit,
}

impl Rate {
    pub fn monthly(value: f64) -> Self {
        Self {
            value,
            unit: RateUnit::Monthly,
        }
    }

    pub fn annual(value: f64) -> Self {
        Self {
            value,
            unit: RateUnit::Annual,
        }
    }

    /// Rate applied once per simulated month, as a fraction (1% -> 0.01).
    pub fn monthly_fraction(self) -> f64 {
        match self.unit {
            RateUnit::Annual => self.value / 12.0 / 100.0,
            RateUnit::Monthly => self.value / 100.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn months(value: u32) -> Self {
        Self {
            value,
            unit: DurationUnit::Months,
        }
    }

    pub fn years(value: u32) -> Self {
        Self {
            value,
            unit: DurationUnit::Years,
        }
    }

    /// Horizon in whole months, `None` when a year count overflows.
    pub fn total_months(self) -> Option<u32> {
        match self.unit {
            DurationUnit::Years => self.value.checked_mul(12),
            DurationUnit::Months => Some(self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub initial_capital: f64,
    pub monthly_contribution: f64,
    /// Percent increase applied to the monthly contribution at each year boundary.
    pub annual_contribution_growth_pct: f64,
    pub rate: Rate,
    pub duration: Duration,
    /// Zero disables the inflation-adjusted figures.
    pub annual_inflation_pct: f64,
}

impl ProjectionInput {
    pub fn new(
        initial_capital: f64,
        monthly_contribution: f64,
        rate: Rate,
        duration: Duration,
    ) -> Self {
        Self {
            initial_capital,
            monthly_contribution,
            annual_contribution_growth_pct: 0.0,
            rate,
            duration,
            annual_inflation_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub month: u32,
    pub total_contributed: f64,
    pub accrued_interest: f64,
    pub total_value: f64,
}

impl MonthlyEntry {
    pub(crate) fn new(month: u32, total_contributed: f64, total_value: f64) -> Self {
        Self {
            month,
            total_contributed,
            accrued_interest: total_value - total_contributed,
            total_value,
        }
    }
}

/// Snapshot of the last simulated month of a year; the final year may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualEntry {
    pub year: u32,
    pub total_contributed: f64,
    pub accrued_interest: f64,
    pub total_value: f64,
}

impl AnnualEntry {
    pub(crate) fn snapshot(year: u32, entry: &MonthlyEntry) -> Self {
        Self {
            year,
            total_contributed: entry.total_contributed,
            accrued_interest: entry.accrued_interest,
            total_value: entry.total_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub final_value: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub monthly_ledger: Vec<MonthlyEntry>,
    pub annual_ledger: Vec<AnnualEntry>,
    pub inflation_adjusted_final_value: Option<f64>,
    pub real_gain: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annual_rate_is_split_across_twelve_months() {
        assert!((Rate::annual(12.0).monthly_fraction() - 0.01).abs() < 1e-12);
        assert!((Rate::monthly(1.5).monthly_fraction() - 0.015).abs() < 1e-12);
    }

    #[test]
    fn duration_converts_years_to_months() {
        assert_eq!(Duration::years(3).total_months(), Some(36));
        assert_eq!(Duration::months(7).total_months(), Some(7));
        assert_eq!(Duration::years(u32::MAX).total_months(), None);
    }

    #[test]
    fn units_serialize_lowercase() {
        let json = serde_json::to_string(&Rate::annual(6.0)).expect("rate should serialize");
        assert_eq!(json, r#"{"value":6.0,"unit":"annual"}"#);
        let unit: DurationUnit = serde_json::from_str(r#""years""#).expect("unit should parse");
        assert_eq!(unit, DurationUnit::Years);
    }
}
