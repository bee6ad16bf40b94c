//! Billing settings and discount policies.
//!
//! The `settings` module defines the freelancer's default billing
//! preferences and the abstraction for payment-method discounts.  In
//! the surrounding application these preferences live in a per-user
//! settings record; the engine never reads them ambiently.  Instead a
//! [`BillingSettings`] value is loaded once (from a JSON file or a
//! caller-supplied record) and passed explicitly into every
//! calculation, keeping the engine a pure function of its arguments.

use crate::models::{PaymentMethod, WeekdayName};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A freelancer's default billing preferences.
///
/// Per-project values, when present, override these defaults; see
/// [`ProjectSpec`](crate::models::ProjectSpec).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSettings {
    /// Hourly rate used when a project does not specify one.
    pub default_hourly_rate: f64,
    /// Hours per working day used when a project does not specify one.
    pub default_hours_per_day: f64,
    /// Default working days for new projects.  Note that an empty
    /// working-day list on a project is taken at face value (zero
    /// working days); these defaults are for callers building project
    /// forms, and are stored here so settings records round-trip.
    pub default_working_days: Vec<WeekdayName>,
    /// Discount percentage granted when the client pays via PIX.
    /// Not clamped; values outside `[0, 100]` pass through the
    /// arithmetic unchanged.
    pub pix_discount_percentage: f64,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            default_hourly_rate: 0.0,
            default_hours_per_day: 0.0,
            default_working_days: vec![
                WeekdayName::Monday,
                WeekdayName::Tuesday,
                WeekdayName::Wednesday,
                WeekdayName::Thursday,
                WeekdayName::Friday,
            ],
            pix_discount_percentage: 0.0,
        }
    }
}

/// Errors raised while loading settings from disk.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file was not valid JSON for [`BillingSettings`].
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load billing settings from a JSON file.
///
/// The file must contain a single [`BillingSettings`] object; see
/// `settings/default.json` for an example.  Callers that want to fall
/// back to [`BillingSettings::default`] on a missing file should do so
/// themselves rather than swallowing parse errors.
pub fn load_settings_from_file(path: &Path) -> Result<BillingSettings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&data)?;
    Ok(settings)
}

/// A discount policy decides what percentage, if any, a payment
/// method earns.  The engine itself only ever sees the resulting
/// number, so eligibility rules stay out of the arithmetic.
///
/// Policies must be thread-safe (`Send + Sync`) because the batch
/// quote run may consult them concurrently across multiple threads.
pub trait DiscountPolicy: Send + Sync {
    /// Returns the discount percentage for the given payment method.
    /// `None` means the method was not supplied by the caller.
    fn discount_percentage(
        &self,
        method: Option<PaymentMethod>,
        settings: &BillingSettings,
    ) -> f64;
}

/// The application's standard policy: PIX earns the configured
/// percentage, every other method (or no method at all) earns none.
pub struct PixDiscount;

impl DiscountPolicy for PixDiscount {
    fn discount_percentage(
        &self,
        method: Option<PaymentMethod>,
        settings: &BillingSettings,
    ) -> f64 {
        match method {
            Some(PaymentMethod::Pix) => settings.pix_discount_percentage,
            _ => 0.0,
        }
    }
}

/// A policy that never grants a discount, regardless of payment
/// method.  Useful for callers that want base prices only.
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn discount_percentage(
        &self,
        _method: Option<PaymentMethod>,
        _settings: &BillingSettings,
    ) -> f64 {
        0.0
    }
}
