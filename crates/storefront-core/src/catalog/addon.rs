//! Add-on groups and the customer's choice among them.

use std::collections::BTreeMap;

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A selectable modifier on a product (e.g., a drink choice).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnOption {
    /// Display label, also used for line identity in the cart.
    pub label: String,
    /// Extra charge per unit when selected.
    pub price: Money,
    /// Whether the option is selected.
    #[serde(default)]
    pub selected: bool,
}

impl AddOnOption {
    /// Create an unselected option.
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            label: label.into(),
            price,
            selected: false,
        }
    }

    /// Create a free option.
    pub fn free(label: impl Into<String>, currency: Currency) -> Self {
        Self::new(label, Money::zero(currency))
    }
}

/// A group of add-on options under one heading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnGroup {
    /// Group heading (e.g., "Soft Drink 345ML").
    pub heading: String,
    /// At least one option must be chosen.
    #[serde(default)]
    pub required: bool,
    /// Hint labels such as "select any 2".
    #[serde(default)]
    pub labels: Vec<String>,
    /// Options in display order.
    #[serde(default)]
    pub options: Vec<AddOnOption>,
}

impl AddOnGroup {
    /// Create an empty group.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            required: false,
            labels: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_option(mut self, option: AddOnOption) -> Self {
        self.options.push(option);
        self
    }

    /// Maximum number of options a customer may pick from this group.
    ///
    /// A "select any N" label sets the limit explicitly. Without one, a
    /// required group is a single choice and an optional group allows any
    /// number of its options.
    pub fn max_selectable(&self) -> usize {
        let from_label = self.labels.iter().find_map(|label| {
            let lower = label.to_lowercase();
            if !lower.contains("any") {
                return None;
            }
            lower
                .split(|c: char| !c.is_ascii_digit())
                .find(|part| !part.is_empty())
                .and_then(|digits| digits.parse::<usize>().ok())
        });

        match from_label {
            Some(n) => n,
            None if self.required => 1,
            None => self.options.len(),
        }
    }

    /// Find an option by label.
    pub fn option(&self, label: &str) -> Option<&AddOnOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

/// The options a customer picked, keyed by group heading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddOnSelection {
    picks: BTreeMap<String, Vec<String>>,
}

impl AddOnSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pick, builder style.
    pub fn pick(mut self, heading: impl Into<String>, label: impl Into<String>) -> Self {
        self.push(heading, label);
        self
    }

    /// Add a pick. Picking the same label twice has no effect.
    pub fn push(&mut self, heading: impl Into<String>, label: impl Into<String>) {
        let label = label.into();
        let labels = self.picks.entry(heading.into()).or_default();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    /// Parse a `Heading=Label` pick.
    pub fn parse_pick(pick: &str) -> Result<(String, String), CommerceError> {
        match pick.split_once('=') {
            Some((heading, label)) if !heading.trim().is_empty() && !label.trim().is_empty() => {
                Ok((heading.trim().to_string(), label.trim().to_string()))
            }
            _ => Err(CommerceError::InvalidAddOnSelection(format!(
                "expected Heading=Label, got '{}'",
                pick
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.picks.values().all(|labels| labels.is_empty())
    }

    /// Labels picked under a heading.
    pub fn labels_for(&self, heading: &str) -> &[String] {
        self.picks.get(heading).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Headings that have at least one pick.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.picks
            .iter()
            .filter(|(_, labels)| !labels.is_empty())
            .map(|(heading, _)| heading.as_str())
    }

    /// Check this selection against a product's groups and return the chosen
    /// options, marked selected, in group then option order.
    pub fn resolve(&self, groups: &[AddOnGroup]) -> Result<Vec<AddOnOption>, CommerceError> {
        if let Some(unknown) = self
            .headings()
            .find(|heading| !groups.iter().any(|g| g.heading == *heading))
        {
            return Err(CommerceError::InvalidAddOnSelection(format!(
                "unknown add-on group '{}'",
                unknown
            )));
        }

        let mut chosen = Vec::new();
        for group in groups {
            let labels = self.labels_for(&group.heading);

            if group.required && labels.is_empty() {
                return Err(CommerceError::InvalidAddOnSelection(format!(
                    "'{}' requires a choice",
                    group.heading
                )));
            }

            let max = group.max_selectable();
            if labels.len() > max {
                return Err(CommerceError::InvalidAddOnSelection(format!(
                    "'{}' allows at most {} choice(s), got {}",
                    group.heading,
                    max,
                    labels.len()
                )));
            }

            if let Some(missing) = labels.iter().find(|l| group.option(l).is_none()) {
                return Err(CommerceError::InvalidAddOnSelection(format!(
                    "'{}' has no option '{}'",
                    group.heading, missing
                )));
            }

            chosen.extend(
                group
                    .options
                    .iter()
                    .filter(|option| labels.contains(&option.label))
                    .map(|option| AddOnOption {
                        selected: true,
                        ..option.clone()
                    }),
            );
        }

        Ok(chosen)
    }
}
