//! Constructor and entry point: owns one registry and one pricing policy.

use std::io;
use std::path::Path;

use stockroom_core::ValidationError;

use crate::error::{InventoryError, InventoryResult};
use crate::item::{InventoryEntity, Item, NewItem, NewPhone, Phone};
use crate::loader::{self, ItemRow, LoaderOptions};
use crate::pricing::PricingPolicy;
use crate::registry::{EntityHandle, Registry};

/// An independent inventory.
///
/// Every successful construction lands in this inventory's registry;
/// nothing is shared between two `Inventory` values.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    registry: Registry,
    pricing: PricingPolicy,
    loader: LoaderOptions,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_loader_options(mut self, loader: LoaderOptions) -> Self {
        self.loader = loader;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Policy changes apply to every later discount, including on entities
    /// that already exist.
    pub fn pricing_mut(&mut self) -> &mut PricingPolicy {
        &mut self.pricing
    }

    /// Validates and registers a base item.
    pub fn create_item(&mut self, cmd: NewItem) -> Result<EntityHandle, ValidationError> {
        let item = Item::create(cmd)?;
        Ok(self.register(item.into()))
    }

    /// Validates base and phone fields, then registers. A failure on any
    /// field leaves the registry untouched.
    pub fn create_phone(&mut self, cmd: NewPhone) -> Result<EntityHandle, ValidationError> {
        let phone = Phone::create(cmd)?;
        Ok(self.register(phone.into()))
    }

    fn register(&mut self, entity: InventoryEntity) -> EntityHandle {
        tracing::debug!(
            item_id = %entity.id_typed(),
            kind = %entity.kind(),
            name = entity.name(),
            "registering inventory entity"
        );
        self.registry.register(entity)
    }

    pub fn get(&self, handle: EntityHandle) -> InventoryResult<&InventoryEntity> {
        self.registry
            .get(handle)
            .ok_or(InventoryError::UnknownHandle(handle))
    }

    pub fn total_price(&self, handle: EntityHandle) -> InventoryResult<f64> {
        Ok(self.get(handle)?.total_price())
    }

    /// Applies the current discount factor for the entity's kind and returns
    /// the new unit price.
    pub fn apply_discount(&mut self, handle: EntityHandle) -> InventoryResult<f64> {
        let entity = self
            .registry
            .get_mut(handle)
            .ok_or(InventoryError::UnknownHandle(handle))?;
        let price = self.pricing.apply_discount(entity);
        tracing::debug!(%handle, unit_price = price, "discount applied");
        Ok(price)
    }

    /// Applies one discount to every registered entity.
    pub fn apply_discount_all(&mut self) {
        for entity in self.registry.entities_mut() {
            self.pricing.apply_discount(entity);
        }
    }

    pub fn load_rows<I>(&mut self, rows: I) -> InventoryResult<Vec<EntityHandle>>
    where
        I: IntoIterator<Item = ItemRow>,
    {
        let options = self.loader;
        loader::load_rows(self, rows, options)
    }

    /// Streams a headed CSV into this inventory. Records before a failing
    /// one stay registered.
    pub fn load_csv<R: io::Read>(&mut self, reader: R) -> InventoryResult<Vec<EntityHandle>> {
        let options = self.loader;
        loader::load_csv(self, reader, options)
    }

    pub fn load_csv_path(&mut self, path: &Path) -> InventoryResult<Vec<EntityHandle>> {
        let options = self.loader;
        loader::load_csv_path(self, path, options)
    }

    /// One descriptor per registered entity, in registry order.
    pub fn descriptors(&self) -> Vec<String> {
        self.registry.all().iter().map(InventoryEntity::descriptor).collect()
    }
}
