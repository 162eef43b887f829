//! Shared result type for the premium calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// The outcome of one premium calculation.
///
/// `hours` is the quantity the premium was priced on (zero for premiums that
/// are not hour-based). `pay` is already rounded to whole won and is zero when
/// the contract does not grant the premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumResult {
    /// Hours the premium applies to.
    pub hours: Decimal,
    /// Premium amount, rounded to whole won.
    pub pay: Decimal,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

impl PremiumResult {
    /// Returns true if the premium pays anything.
    pub fn is_paid(&self) -> bool {
        self.pay > Decimal::ZERO
    }
}
