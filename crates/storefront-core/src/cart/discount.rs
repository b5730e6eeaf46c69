//! Promo codes and the discount they resolve to.

use std::collections::HashMap;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A discount code that has been resolved and applied to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    /// The code as the customer entered it, normalized.
    pub code: String,
    /// Percentage off, 0 to 100.
    pub percent: f64,
}

impl AppliedDiscount {
    pub fn new(code: impl Into<String>, percent: f64) -> Result<Self, CommerceError> {
        let code = normalize_code(&code.into());
        validate_percent(&code, percent)?;
        Ok(Self { code, percent })
    }
}

/// Known promo codes mapped to their percentage.
///
/// Codes are matched case-insensitively after trimming.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromoCatalog {
    codes: HashMap<String, f64>,
}

impl PromoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from code/percent pairs.
    pub fn from_codes<I, C>(codes: I) -> Result<Self, CommerceError>
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<String>,
    {
        let mut catalog = Self::new();
        for (code, percent) in codes {
            catalog.insert(code, percent)?;
        }
        Ok(catalog)
    }

    /// Register a code.
    pub fn insert(&mut self, code: impl Into<String>, percent: f64) -> Result<(), CommerceError> {
        let code = normalize_code(&code.into());
        if code.is_empty() {
            return Err(CommerceError::Validation(
                "promo code must not be empty".to_string(),
            ));
        }
        validate_percent(&code, percent)?;
        self.codes.insert(code, percent);
        Ok(())
    }

    /// Resolve a customer-entered code.
    ///
    /// An empty code means no discount. An unknown code is an error.
    pub fn resolve(&self, code: &str) -> Result<Option<AppliedDiscount>, CommerceError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Ok(None);
        }
        self.codes
            .get(&code)
            .map(|percent| {
                Some(AppliedDiscount {
                    code: code.clone(),
                    percent: *percent,
                })
            })
            .ok_or(CommerceError::InvalidDiscountCode(code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn validate_percent(code: &str, percent: f64) -> Result<(), CommerceError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(CommerceError::Validation(format!(
            "promo code {} has percentage {} outside 0..=100",
            code, percent
        )));
    }
    Ok(())
}
