use serde::Serialize;

use stockroom_core::{Entity, ItemId, ValidationError};

/// Runtime kind of an inventory entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Item,
    Phone,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Item => "Item",
            ItemKind::Phone => "Phone",
        }
    }

    /// The kind this kind extends, if any.
    pub fn parent(self) -> Option<ItemKind> {
        match self {
            ItemKind::Item => None,
            ItemKind::Phone => Some(ItemKind::Item),
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Command: create a base item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl NewItem {
    /// Quantity defaults to zero.
    pub fn new(name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 0,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty("name"));
        }
        if !self.unit_price.is_finite() {
            return Err(ValidationError::new(
                "unit_price",
                self.unit_price,
                "must be a finite number",
            ));
        }
        if self.unit_price < 0.0 {
            return Err(ValidationError::negative("unit_price", self.unit_price));
        }
        if self.quantity < 0 {
            return Err(ValidationError::negative("quantity", self.quantity));
        }
        Ok(())
    }
}

/// Command: create a phone (an item with a broken-unit count).
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhone {
    pub item: NewItem,
    pub broken_units: i64,
}

impl NewPhone {
    /// Broken units default to zero.
    pub fn new(item: NewItem) -> Self {
        Self {
            item,
            broken_units: 0,
        }
    }

    pub fn with_broken_units(mut self, broken_units: i64) -> Self {
        self.broken_units = broken_units;
        self
    }

    /// Validates the base fields first, then the phone's own fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.item.validate()?;
        if self.broken_units < 0 {
            return Err(ValidationError::negative("broken_units", self.broken_units));
        }
        Ok(())
    }
}

/// Base inventory record.
///
/// Only constructed from a validated [`NewItem`]; `unit_price` changes only
/// through a discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    unit_price: f64,
    quantity: i64,
}

impl Item {
    pub(crate) fn create(cmd: NewItem) -> Result<Self, ValidationError> {
        cmd.validate()?;
        Ok(Self::from_validated(cmd))
    }

    fn from_validated(cmd: NewItem) -> Self {
        Self {
            id: ItemId::new(),
            name: cmd.name,
            unit_price: cmd.unit_price,
            quantity: cmd.quantity,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
    }
}

/// Specialized record: a phone extends an item with `broken_units`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phone {
    #[serde(flatten)]
    item: Item,
    broken_units: i64,
}

impl Phone {
    /// Every field, base and derived, is validated before anything is built.
    pub(crate) fn create(cmd: NewPhone) -> Result<Self, ValidationError> {
        cmd.validate()?;
        Ok(Self {
            item: Item::from_validated(cmd.item),
            broken_units: cmd.broken_units,
        })
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn broken_units(&self) -> i64 {
        self.broken_units
    }
}

/// Any registered entity, base or specialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum InventoryEntity {
    Item(Item),
    Phone(Phone),
}

impl InventoryEntity {
    pub fn kind(&self) -> ItemKind {
        match self {
            InventoryEntity::Item(_) => ItemKind::Item,
            InventoryEntity::Phone(_) => ItemKind::Phone,
        }
    }

    /// The base fields shared by every kind.
    pub fn base(&self) -> &Item {
        match self {
            InventoryEntity::Item(item) => item,
            InventoryEntity::Phone(phone) => &phone.item,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut Item {
        match self {
            InventoryEntity::Item(item) => item,
            InventoryEntity::Phone(phone) => &mut phone.item,
        }
    }

    pub fn as_phone(&self) -> Option<&Phone> {
        match self {
            InventoryEntity::Phone(phone) => Some(phone),
            InventoryEntity::Item(_) => None,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.base().id
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    pub fn unit_price(&self) -> f64 {
        self.base().unit_price()
    }

    pub fn quantity(&self) -> i64 {
        self.base().quantity()
    }

    pub fn total_price(&self) -> f64 {
        crate::pricing::total_price(self.base())
    }

    /// Renders `Kind('name', price, quantity)` using the runtime kind.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl Entity for InventoryEntity {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.base().id
    }

    fn kind_name(&self) -> &'static str {
        self.kind().name()
    }
}

impl core::fmt::Display for InventoryEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let base = self.base();
        write!(
            f,
            "{}('{}', {:?}, {})",
            self.kind_name(),
            base.name,
            base.unit_price,
            base.quantity
        )
    }
}

impl From<Item> for InventoryEntity {
    fn from(value: Item) -> Self {
        InventoryEntity::Item(value)
    }
}

impl From<Phone> for InventoryEntity {
    fn from(value: Phone) -> Self {
        InventoryEntity::Phone(value)
    }
}
