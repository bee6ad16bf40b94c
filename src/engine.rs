//! Project price computation engine.
//!
//! The `engine` module holds the pure pricing core: working-day
//! enumeration over a date range, the hours × rate base price, and
//! the optional payment-method discount.  [`calculate_project_price`]
//! is the single authoritative composition of the three steps; every
//! caller (the HTTP handlers, the batch run) delegates to it.  The
//! batch entry point [`run_quotes`] uses the [`rayon`] crate to
//! parallelise per-project calculations across multiple CPU cores.
//!
//! Nothing here validates inputs.  Negative rates or out-of-range
//! discount percentages pass through the arithmetic unchanged, and an
//! inverted date range counts zero days rather than raising an error.

use crate::models::{
    DateRange, PriceResult, ProjectQuote, QuoteRunInput, QuoteRunResult, RateConfig, WeekdayName,
};
use crate::settings::{BillingSettings, DiscountPolicy};
use anyhow::Result;
use chrono::Datelike;
use rayon::prelude::*;
use std::collections::HashSet;

/// Counts the calendar days in `range` (both endpoints inclusive)
/// whose weekday name is in `working_days`.
///
/// Iterates one day at a time in ascending order, so the cost is
/// O(days in range).  Ranges are user-entered and project-scale, so
/// this is accepted; the loop is bounded even for absurd ranges
/// because iteration stops at the end of chrono's representable
/// dates.  If `range.start > range.end` the loop body never runs and
/// the count is 0.
pub fn count_working_days(range: &DateRange, working_days: &HashSet<WeekdayName>) -> u32 {
    let mut total = 0;
    let mut day = range.start;
    while day <= range.end {
        if working_days.contains(&WeekdayName::from(day.weekday())) {
            total += 1;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    total
}

/// Turns a working-day count into total hours and a base price.
///
/// Returns `(total_hours, base_price)`.  No rounding is applied;
/// formatting for display is a presentation concern.
pub fn compute_price(working_days_count: u32, rate: &RateConfig) -> (f64, f64) {
    let total_hours = f64::from(working_days_count) * rate.hours_per_day;
    let base_price = total_hours * rate.hourly_rate;
    (total_hours, base_price)
}

/// Applies a percentage discount to a base price.
///
/// A zero percentage returns `base_price` exactly and a
/// one-hundred-percent discount returns exactly zero; the
/// multiplicative form guarantees both, where the subtractive
/// `base - base * pct / 100` can overshoot by an ulp.  The percentage
/// is not clamped; callers decide whether values outside `[0, 100]`
/// are meaningful.
pub fn apply_discount(base_price: f64, discount_percentage: f64) -> f64 {
    if discount_percentage == 0.0 {
        return base_price;
    }
    base_price * (1.0 - discount_percentage / 100.0)
}

/// Computes the full price for one project: working-day count, hours,
/// base price and discounted price.
///
/// This is the one entry point external callers should use; it has no
/// failure modes of its own and is deterministic for identical
/// inputs.
pub fn calculate_project_price(
    range: &DateRange,
    working_days: &HashSet<WeekdayName>,
    rate: &RateConfig,
    discount_percentage: f64,
) -> PriceResult {
    let total_days = count_working_days(range, working_days);
    let (total_hours, base_price) = compute_price(total_days, rate);
    let discounted_price = apply_discount(base_price, discount_percentage);
    PriceResult {
        total_days,
        total_hours,
        base_price,
        discount_percentage,
        discounted_price,
    }
}

/// Quotes a batch of projects against a single settings record.
///
/// Per-project rate fields fall back to the settings defaults when
/// absent, and the discount percentage for each project is resolved
/// through `policy`.  Projects are priced in parallel; results come
/// back in input order.
pub fn run_quotes(
    input: QuoteRunInput,
    settings: &BillingSettings,
    policy: &dyn DiscountPolicy,
) -> Result<QuoteRunResult> {
    let results: Vec<ProjectQuote> = input
        .projects
        .into_par_iter()
        .map(|project| {
            let range = DateRange::new(project.start_date, project.end_date);
            let working_days: HashSet<WeekdayName> =
                project.working_days.iter().copied().collect();
            let rate = RateConfig {
                hourly_rate: project.hourly_rate.unwrap_or(settings.default_hourly_rate),
                hours_per_day: project
                    .hours_per_day
                    .unwrap_or(settings.default_hours_per_day),
            };
            let pct = policy.discount_percentage(project.payment_method, settings);
            let price = calculate_project_price(&range, &working_days, &rate, pct);
            ProjectQuote {
                name: project.name,
                price,
            }
        })
        .collect();
    Ok(QuoteRunResult { results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, ProjectSpec};
    use crate::settings::PixDiscount;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekdays() -> HashSet<WeekdayName> {
        [
            WeekdayName::Monday,
            WeekdayName::Tuesday,
            WeekdayName::Wednesday,
            WeekdayName::Thursday,
            WeekdayName::Friday,
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn full_week_counts_five_weekdays() {
        // 2024-01-01 is a Monday, 2024-01-07 a Sunday.
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 7));
        assert_eq!(count_working_days(&range, &weekdays()), 5);
    }

    #[test]
    fn inverted_range_counts_zero() {
        let range = DateRange::new(date(2024, 1, 7), date(2024, 1, 1));
        assert_eq!(count_working_days(&range, &weekdays()), 0);
    }

    #[test]
    fn empty_working_day_set_counts_zero() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(count_working_days(&range, &HashSet::new()), 0);
    }

    #[test]
    fn single_day_range_counts_one_iff_member() {
        let monday = DateRange::new(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(count_working_days(&monday, &weekdays()), 1);
        let saturday = DateRange::new(date(2024, 1, 6), date(2024, 1, 6));
        assert_eq!(count_working_days(&saturday, &weekdays()), 0);
    }

    #[test]
    fn base_price_is_days_times_hours_times_rate() {
        let rate = RateConfig {
            hourly_rate: 50.0,
            hours_per_day: 6.0,
        };
        let (hours, base) = compute_price(5, &rate);
        assert_eq!(hours, 30.0);
        assert_eq!(base, 1500.0);
    }

    #[test]
    fn zero_discount_returns_base_exactly() {
        let base = 1234.567;
        assert_eq!(apply_discount(base, 0.0), base);
    }

    #[test]
    fn discount_of_twenty_percent() {
        assert_eq!(apply_discount(1500.0, 20.0), 1200.0);
    }

    #[test]
    fn full_discount_yields_zero() {
        assert_eq!(apply_discount(1500.0, 100.0), 0.0);
        // Exact zero must hold for bases that do not divide evenly,
        // not just round amounts.
        assert_eq!(apply_discount(0.0070007, 100.0), 0.0);
        assert_eq!(apply_discount(1234.567, 100.0), 0.0);
    }

    #[test]
    fn negative_inputs_pass_through() {
        // Validation is the caller's job; arithmetic must not reject.
        let rate = RateConfig {
            hourly_rate: -50.0,
            hours_per_day: 6.0,
        };
        let (_, base) = compute_price(5, &rate);
        assert_eq!(base, -1500.0);
        assert_eq!(apply_discount(100.0, 150.0), -50.0);
    }

    #[test]
    fn composite_matches_manual_composition() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 7));
        let rate = RateConfig {
            hourly_rate: 50.0,
            hours_per_day: 6.0,
        };
        let result = calculate_project_price(&range, &weekdays(), &rate, 20.0);
        assert_eq!(result.total_days, 5);
        assert_eq!(result.total_hours, 30.0);
        assert_eq!(result.base_price, 1500.0);
        assert_eq!(result.discount_percentage, 20.0);
        assert_eq!(result.discounted_price, 1200.0);
    }

    #[test]
    fn batch_run_applies_settings_defaults_and_pix_discount() {
        let settings = BillingSettings {
            default_hourly_rate: 50.0,
            default_hours_per_day: 6.0,
            pix_discount_percentage: 20.0,
            ..BillingSettings::default()
        };
        let input = QuoteRunInput {
            projects: vec![
                ProjectSpec {
                    name: "pix".into(),
                    start_date: date(2024, 1, 1),
                    end_date: date(2024, 1, 7),
                    working_days: weekdays().into_iter().collect(),
                    hourly_rate: None,
                    hours_per_day: None,
                    payment_method: Some(PaymentMethod::Pix),
                },
                ProjectSpec {
                    name: "card".into(),
                    start_date: date(2024, 1, 1),
                    end_date: date(2024, 1, 7),
                    working_days: weekdays().into_iter().collect(),
                    hourly_rate: Some(100.0),
                    hours_per_day: None,
                    payment_method: Some(PaymentMethod::CreditCard),
                },
            ],
        };
        let result = run_quotes(input, &settings, &PixDiscount).unwrap();
        assert_eq!(result.results.len(), 2);
        let pix = &result.results[0];
        assert_eq!(pix.name, "pix");
        assert_eq!(pix.price.base_price, 1500.0);
        assert_eq!(pix.price.discounted_price, 1200.0);
        let card = &result.results[1];
        assert_eq!(card.price.base_price, 3000.0);
        assert_eq!(card.price.discounted_price, 3000.0);
    }
}
