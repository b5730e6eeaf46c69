//! Cart pricing calculations.
//!
//! Totals are a pure function of the entries and the pricing inputs:
//!
//! ```text
//! subtotal        = sum(per_unit_with_add_ons * quantity)
//! tax_amount      = subtotal * tax_rate / 100
//! discount_amount = discount_rate / 100 * (subtotal + delivery_charge + tax_amount)
//! grand_total     = subtotal + tax_amount + delivery_charge - discount_amount
//! ```
//!
//! The discount applies to the tax- and delivery-inclusive amount, not to the
//! subtotal alone.

use crate::cart::CartEntry;
use crate::error::CommerceError;
use crate::ids::EntryId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Inputs besides the entries. Missing values count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Tax rate in percent.
    pub tax_rate: Option<f64>,
    /// Discount rate in percent.
    pub discount_rate: Option<f64>,
    /// Delivery charge for the current order type.
    pub delivery_charge: Option<Money>,
}

impl PricingInputs {
    /// Tax rate in percent; missing, negative or non-finite rates are zero.
    pub fn effective_tax_rate(&self) -> f64 {
        sanitize_rate(self.tax_rate)
    }

    /// Discount rate in percent, capped at 100.
    pub fn effective_discount_rate(&self) -> f64 {
        sanitize_rate(self.discount_rate).min(100.0)
    }
}

fn sanitize_rate(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => 0.0,
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingSnapshot {
    pub currency: Currency,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax rate applied, in percent.
    pub tax_rate: f64,
    pub tax_amount: Money,
    /// Discount rate applied, in percent.
    pub discount_rate: f64,
    pub discount_amount: Money,
    pub delivery_charge: Money,
    /// Final payable amount.
    pub grand_total: Money,
    /// Sum of quantities across all lines.
    pub item_count: i64,
    /// Per-line breakdown.
    pub lines: Vec<LinePricing>,
}

impl PricingSnapshot {
    /// Pricing of an empty cart with no delivery charge.
    pub fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            currency,
            subtotal: zero,
            tax_rate: 0.0,
            tax_amount: zero,
            discount_rate: 0.0,
            discount_amount: zero,
            delivery_charge: zero,
            grand_total: zero,
            item_count: 0,
            lines: Vec::new(),
        }
    }

    /// Derive totals from entries and inputs.
    pub fn compute(
        entries: &[CartEntry],
        inputs: &PricingInputs,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let lines = entries
            .iter()
            .map(LinePricing::for_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.line_total), currency)?;
        let item_count = entries
            .iter()
            .try_fold(0_i64, |acc, e| acc.checked_add(e.quantity))
            .ok_or(CommerceError::Overflow)?;

        let tax_rate = inputs.effective_tax_rate();
        let tax_amount = subtotal.percentage(tax_rate);

        let delivery_charge = inputs.delivery_charge.unwrap_or(Money::zero(currency));

        let discount_rate = inputs.effective_discount_rate();
        let discount_base = subtotal.try_add(&delivery_charge)?.try_add(&tax_amount)?;
        let discount_amount = discount_base.percentage(discount_rate);

        let grand_total = subtotal
            .try_add(&tax_amount)?
            .try_add(&delivery_charge)?
            .try_subtract(&discount_amount)?;

        Ok(Self {
            currency,
            subtotal,
            tax_rate,
            tax_amount,
            discount_rate,
            discount_amount,
            delivery_charge,
            grand_total,
            item_count,
            lines,
        })
    }

    pub fn has_discount(&self) -> bool {
        self.discount_amount.is_positive()
    }

    pub fn is_free_delivery(&self) -> bool {
        self.delivery_charge.is_zero()
    }

    /// Amount saved through the discount.
    pub fn savings(&self) -> Money {
        self.discount_amount
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub entry_id: EntryId,
    /// Per-unit price including add-ons.
    pub unit_total: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl LinePricing {
    fn for_entry(entry: &CartEntry) -> Result<Self, CommerceError> {
        Ok(Self {
            entry_id: entry.id.clone(),
            unit_total: entry.total_per_unit_with_add_ons,
            quantity: entry.quantity,
            line_total: entry.line_total()?,
        })
    }
}
