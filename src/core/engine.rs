use super::error::ProjectionError;
use super::types::{AnnualEntry, MonthlyEntry, ProjectionInput, ProjectionResult};

/// Longest horizon accepted by [`project`], 1200 years of months.
pub const MAX_PROJECTION_MONTHS: u32 = 14_400;

const MONTHS_PER_YEAR: u32 = 12;

/// Runs the monthly compound-interest simulation for `input`.
///
/// Each month the (possibly escalated) contribution is added first and
/// interest is applied afterwards. The contribution escalates at the start of
/// months 13, 25, 37, ... Values keep full precision between months; rounding
/// for display is left to the caller.
pub fn project(input: &ProjectionInput) -> Result<ProjectionResult, ProjectionError> {
    let months = validate(input)?;
    let monthly_rate = input.rate.monthly_fraction();
    let contribution_growth = 1.0 + input.annual_contribution_growth_pct / 100.0;

    let mut value = input.initial_capital;
    let mut contributed = input.initial_capital;
    let mut contribution = input.monthly_contribution;
    let mut monthly_ledger = Vec::with_capacity(months as usize);
    let mut annual_ledger = Vec::with_capacity(years_spanned(months) as usize);

    for month in 1..=months {
        if escalates_at(month) {
            contribution *= contribution_growth;
        }

        value += contribution;
        contributed += contribution;
        value *= 1.0 + monthly_rate;

        if !contributed.is_finite() {
            return Err(overflow("monthly contribution", month));
        }
        if !value.is_finite() {
            return Err(overflow("interest rate", month));
        }

        let entry = MonthlyEntry::new(month, contributed, value);
        if month % MONTHS_PER_YEAR == 0 {
            annual_ledger.push(AnnualEntry::snapshot(month / MONTHS_PER_YEAR, &entry));
        }
        monthly_ledger.push(entry);
    }

    if months % MONTHS_PER_YEAR != 0 {
        if let Some(last) = monthly_ledger.last() {
            annual_ledger.push(AnnualEntry::snapshot(years_spanned(months), last));
        }
    }

    let (inflation_adjusted_final_value, real_gain) =
        match deflate(value, months, input.annual_inflation_pct) {
            Some(real_value) => (Some(real_value), Some(real_value - contributed)),
            None => (None, None),
        };

    tracing::debug!(
        months,
        final_value = value,
        total_contributed = contributed,
        "projection complete"
    );

    Ok(ProjectionResult {
        final_value: value,
        total_contributed: contributed,
        total_interest: value - contributed,
        monthly_ledger,
        annual_ledger,
        inflation_adjusted_final_value,
        real_gain,
    })
}

/// Checks every field and returns the horizon in months.
///
/// [`project`] runs this itself; input layers call it to reject a request
/// before doing any other work.
pub fn validate(input: &ProjectionInput) -> Result<u32, ProjectionError> {
    for (field, amount) in [
        ("initial capital", input.initial_capital),
        ("monthly contribution", input.monthly_contribution),
        (
            "annual contribution growth",
            input.annual_contribution_growth_pct,
        ),
        ("interest rate", input.rate.value),
        ("annual inflation", input.annual_inflation_pct),
    ] {
        if !amount.is_finite() {
            return Err(ProjectionError::invalid(field, "must be a finite number"));
        }
        if amount < 0.0 {
            return Err(ProjectionError::invalid(field, "must be >= 0"));
        }
    }

    if input.duration.value < 1 {
        return Err(ProjectionError::invalid("duration", "must be >= 1"));
    }

    match input.duration.total_months() {
        Some(months) if months <= MAX_PROJECTION_MONTHS => Ok(months),
        _ => Err(ProjectionError::invalid(
            "duration",
            format!("must not exceed {MAX_PROJECTION_MONTHS} months"),
        )),
    }
}

fn overflow(field: &'static str, month: u32) -> ProjectionError {
    ProjectionError::invalid(
        field,
        format!("projection overflows the representable range at month {month}"),
    )
}

fn escalates_at(month: u32) -> bool {
    month > 1 && (month - 1) % MONTHS_PER_YEAR == 0
}

fn years_spanned(months: u32) -> u32 {
    months.div_ceil(MONTHS_PER_YEAR)
}

/// Deflates `nominal` by compounded annual inflation over a possibly
/// fractional number of years. `None` when inflation is disabled.
fn deflate(nominal: f64, months: u32, annual_inflation_pct: f64) -> Option<f64> {
    if annual_inflation_pct <= 0.0 {
        return None;
    }
    let years = f64::from(months) / f64::from(MONTHS_PER_YEAR);
    let deflator = (1.0 + annual_inflation_pct / 100.0).powf(years);
    Some(nominal / deflator)
}
