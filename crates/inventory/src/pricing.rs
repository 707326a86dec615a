//! Totals and discounts.
//!
//! The discount factor is not stored on entities. It is read from a
//! [`PricingPolicy`] at the moment a discount is applied, so a policy change
//! affects every later discount, including for entities built earlier.

use std::collections::BTreeMap;

use stockroom_core::{ValidationError, ValueObject};

use crate::item::{InventoryEntity, Item, ItemKind};

/// Pay rate after a 20% discount.
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.8;

/// Multiplier applied to a unit price; finite and never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DiscountFactor(f64);

impl DiscountFactor {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::new(
                "discount_factor",
                value,
                "must be a finite number greater than or equal to zero",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for DiscountFactor {
    fn default() -> Self {
        Self(DEFAULT_DISCOUNT_FACTOR)
    }
}

impl ValueObject for DiscountFactor {}

/// `unit_price * quantity`. Never mutates.
pub fn total_price(item: &Item) -> f64 {
    item.unit_price() * item.quantity() as f64
}

/// Discount factors per kind.
///
/// A kind without an override uses its parent's factor, falling back to the
/// base factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingPolicy {
    base: DiscountFactor,
    overrides: BTreeMap<ItemKind, DiscountFactor>,
}

impl PricingPolicy {
    pub fn new(base: DiscountFactor) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    pub fn base_factor(&self) -> DiscountFactor {
        self.base
    }

    pub fn set_base_factor(&mut self, factor: DiscountFactor) {
        self.base = factor;
    }

    pub fn set_override(&mut self, kind: ItemKind, factor: DiscountFactor) {
        self.overrides.insert(kind, factor);
    }

    pub fn clear_override(&mut self, kind: ItemKind) -> Option<DiscountFactor> {
        self.overrides.remove(&kind)
    }

    pub fn factor_for(&self, kind: ItemKind) -> DiscountFactor {
        let mut current = Some(kind);
        while let Some(kind) = current {
            if let Some(factor) = self.overrides.get(&kind) {
                return *factor;
            }
            current = kind.parent();
        }
        self.base
    }

    /// Multiplies the entity's unit price by its kind's current factor and
    /// returns the new price.
    ///
    /// The previous price is not kept; repeated calls compound.
    pub fn apply_discount(&self, entity: &mut InventoryEntity) -> f64 {
        let factor = self.factor_for(entity.kind());
        let item = entity.base_mut();
        let discounted = item.unit_price() * factor.value();
        item.set_unit_price(discounted);
        discounted
    }
}
