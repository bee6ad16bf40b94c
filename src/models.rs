//! Data models for the Price Engine.
//!
//! The `models` module defines a set of serialisable structs and
//! enums representing date ranges, billing rates, payment methods and
//! price results.  These data types derive `Serialize` and
//! `Deserialize` so that they can be easily persisted or transmitted
//! over a network.  They form the basis of the engine’s input and
//! output structures.  Wire field names use camelCase to match the
//! JSON records exchanged by the surrounding application.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
///
/// Both endpoints are plain calendar dates; time-of-day never enters
/// the engine.  A range whose `start` is after its `end` is legal and
/// simply contains no days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive start date of the range.
    pub start: NaiveDate,
    /// Inclusive end date of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Convenience constructor.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// A weekday drawn from the fixed English vocabulary Monday–Sunday.
///
/// Serialised as the full English day name (`"Monday"`, …), which is
/// the representation the surrounding application stores in its
/// project and settings records.  The mapping from [`chrono::Weekday`]
/// is fixed and locale-independent, so the same date always yields the
/// same name regardless of the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekdayName {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl From<Weekday> for WeekdayName {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => WeekdayName::Monday,
            Weekday::Tue => WeekdayName::Tuesday,
            Weekday::Wed => WeekdayName::Wednesday,
            Weekday::Thu => WeekdayName::Thursday,
            Weekday::Fri => WeekdayName::Friday,
            Weekday::Sat => WeekdayName::Saturday,
            Weekday::Sun => WeekdayName::Sunday,
        }
    }
}

/// The billing rate applied to a project.
///
/// Neither field is validated by the engine; negative values pass
/// through arithmetically and produce negative prices.  Rejecting
/// them, if desired, is the caller's responsibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateConfig {
    /// The amount charged per hour of work.
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    /// The number of billable hours in one working day.
    #[serde(rename = "hoursPerDay")]
    pub hours_per_day: f64,
}

/// How the client pays.  Only [`PaymentMethod::Pix`] flags discount
/// eligibility; the other variants exist so that project records
/// round-trip without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Brazilian instant payment; eligible for the configured discount.
    Pix,
    /// Bank transfer.
    BankTransfer,
    /// Credit card.
    CreditCard,
    /// Any other arrangement.
    Other,
}

/// The result of a price calculation for a single project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// Number of working days in the range (days whose weekday name is
    /// in the project's working-day set).
    pub total_days: u32,
    /// Total billable hours (`total_days * hours_per_day`).
    pub total_hours: f64,
    /// Undiscounted price (`total_hours * hourly_rate`).
    pub base_price: f64,
    /// The discount percentage that was applied; `0.0` when the
    /// payment method carries no discount.
    pub discount_percentage: f64,
    /// Price after the discount.  Equal to `base_price` when
    /// `discount_percentage` is zero.
    pub discounted_price: f64,
}

/// A single project to be quoted.
///
/// `hourly_rate` and `hours_per_day` may be omitted, in which case the
/// defaults from the caller's [`BillingSettings`] apply.  The
/// working-day list is treated as a set: order is irrelevant and
/// duplicates have no effect.
///
/// [`BillingSettings`]: crate::settings::BillingSettings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    /// Human-readable project name, echoed back in the quote.
    pub name: String,
    /// Inclusive start date of the project.
    pub start_date: NaiveDate,
    /// Inclusive end date of the project.
    pub end_date: NaiveDate,
    /// The weekdays on which work happens.
    pub working_days: Vec<WeekdayName>,
    /// Hourly rate; falls back to the settings default when absent.
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    /// Hours per working day; falls back to the settings default when
    /// absent.
    #[serde(default)]
    pub hours_per_day: Option<f64>,
    /// How the client pays, if known.  Determines discount
    /// eligibility.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Input to a batch quote run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRunInput {
    /// The projects to be quoted in this run.
    pub projects: Vec<ProjectSpec>,
}

/// The price computed for one project inside a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectQuote {
    /// The project name, as supplied in the input.
    pub name: String,
    /// The computed price.
    pub price: PriceResult,
}

/// The aggregate result of a batch quote run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRunResult {
    /// Individual quotes, in input order.
    pub results: Vec<ProjectQuote>,
}
