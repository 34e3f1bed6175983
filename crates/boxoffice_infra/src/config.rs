//! Deployment configuration defaults.
//!
//! Every tunable the deployment can set resolves through one path: an
//! explicit runtime value wins, otherwise the shipped default applies,
//! and a missing value with no default MUST fail-closed. Purchase
//! policy values mirror the core's process-wide constants — the core
//! is the source of truth; the table exists so deployment tooling sees
//! every knob in one place.

use std::fmt;

use boxoffice_core::policy::MAX_TICKETS_PER_PURCHASE;

/// All deployment-resolvable configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigParam {
    // Purchase policy (mirrors core constants)
    MaxTicketsPerPurchase,
    AdultPriceUnits,
    ChildPriceUnits,
    InfantPriceUnits,

    // Receipt journal
    ReceiptQueueMax,
    ReceiptLineMaxBytes,
}

/// Every parameter, for exhaustive resolution checks.
pub const ALL_PARAMS: [ConfigParam; 6] = [
    ConfigParam::MaxTicketsPerPurchase,
    ConfigParam::AdultPriceUnits,
    ConfigParam::ChildPriceUnits,
    ConfigParam::InfantPriceUnits,
    ConfigParam::ReceiptQueueMax,
    ConfigParam::ReceiptLineMaxBytes,
];

/// Stable config-file name for a parameter.
pub fn param_name(param: ConfigParam) -> &'static str {
    match param {
        ConfigParam::MaxTicketsPerPurchase => "max_tickets_per_purchase",
        ConfigParam::AdultPriceUnits => "adult_price_units",
        ConfigParam::ChildPriceUnits => "child_price_units",
        ConfigParam::InfantPriceUnits => "infant_price_units",
        ConfigParam::ReceiptQueueMax => "receipt_queue_max",
        ConfigParam::ReceiptLineMaxBytes => "receipt_line_max_bytes",
    }
}

/// Error when a required parameter is missing and has no default.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingConfigError {
    pub param_name: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config fail-closed: '{}' is missing and has no shipped default ({})",
            self.param_name, self.reason
        )
    }
}

impl std::error::Error for MissingConfigError {}

/// Returns the shipped default for a parameter, or `None` if the
/// parameter has no default and must fail-closed when missing.
pub fn shipped_default(param: ConfigParam) -> Option<f64> {
    match param {
        ConfigParam::MaxTicketsPerPurchase => Some(f64::from(MAX_TICKETS_PER_PURCHASE)),
        ConfigParam::AdultPriceUnits => Some(20.0),
        ConfigParam::ChildPriceUnits => Some(10.0),
        ConfigParam::InfantPriceUnits => Some(0.0),
        ConfigParam::ReceiptQueueMax => Some(1024.0),
        ConfigParam::ReceiptLineMaxBytes => Some(8192.0),
    }
}

/// Resolve a parameter: explicit runtime value wins, then the shipped
/// default; otherwise fail-closed. Non-finite and negative runtime
/// values fail-closed rather than resolving to an unusable bound.
pub fn resolve_config_value(
    param: ConfigParam,
    runtime_value: Option<f64>,
) -> Result<f64, MissingConfigError> {
    if let Some(value) = runtime_value {
        if !value.is_finite() {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is non-finite (NaN or Infinity); fail-closed",
            });
        }
        if value < 0.0 {
            return Err(MissingConfigError {
                param_name: param_name(param),
                reason: "value is negative; all config params must be non-negative",
            });
        }
        return Ok(value);
    }
    shipped_default(param).ok_or(MissingConfigError {
        param_name: param_name(param),
        reason: "no shipped default; caller must fail-closed",
    })
}
