//! Cart line identity.
//!
//! Two entries are the same line when they are for the same product and the
//! same set of add-on labels was selected. Selection order does not matter.

use std::collections::BTreeSet;

use crate::cart::{CartCandidate, CartEntry};
use crate::ids::{EntryId, ProductId};

/// Identity of a cart line: product plus the set of selected add-on labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineIdentity {
    product_id: ProductId,
    add_ons: BTreeSet<String>,
}

impl LineIdentity {
    pub fn new<I, L>(product_id: ProductId, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            product_id,
            add_ons: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Identity of an entry already in the cart.
    pub fn of_entry(entry: &CartEntry) -> Self {
        Self::new(
            entry.product_id.clone(),
            entry
                .add_ons
                .iter()
                .filter(|o| o.selected)
                .map(|o| o.label.clone()),
        )
    }

    /// Identity a candidate would have once added.
    pub fn of_candidate(candidate: &CartCandidate) -> Self {
        Self::new(
            candidate.product_id.clone(),
            candidate
                .add_ons
                .iter()
                .filter(|o| o.selected)
                .map(|o| o.label.clone()),
        )
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Selected labels in sorted order.
    pub fn add_on_labels(&self) -> impl Iterator<Item = &str> {
        self.add_ons.iter().map(String::as_str)
    }

    pub fn has_add_ons(&self) -> bool {
        !self.add_ons.is_empty()
    }

    /// Check whether an entry is this line.
    pub fn matches(&self, entry: &CartEntry) -> bool {
        entry.product_id == self.product_id && Self::of_entry(entry).add_ons == self.add_ons
    }

    /// Stable entry id derived from the identity.
    ///
    /// A product without add-ons keeps its product id, so callers that only
    /// know the product can still address the line. `\\`, `[`, `]` and `,`
    /// inside the product id or a label are backslash-escaped, so distinct
    /// identities never share an id.
    pub fn entry_id(&self) -> EntryId {
        let mut id = String::new();
        push_escaped(&mut id, self.product_id.as_str());
        if self.add_ons.is_empty() {
            return EntryId::new(id);
        }
        id.push('[');
        for (i, label) in self.add_on_labels().enumerate() {
            if i > 0 {
                id.push(',');
            }
            push_escaped(&mut id, label);
        }
        id.push(']');
        EntryId::new(id)
    }
}

fn push_escaped(out: &mut String, part: &str) {
    for c in part.chars() {
        if matches!(c, '\\' | '[' | ']' | ',') {
            out.push('\\');
        }
        out.push(c);
    }
}
