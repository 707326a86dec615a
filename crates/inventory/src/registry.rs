//! Append-only registry of constructed entities.

use serde::Serialize;

use stockroom_core::{Entity, ItemId};

use crate::item::InventoryEntity;

/// Position of an entity in its [`Registry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(usize);

impl EntityHandle {
    pub fn position(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every entity constructed so far, in construction order.
///
/// No removal, no reordering, no deduplication and no capacity limit.
/// Entries only arrive through the constructor in [`crate::Inventory`].
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Registry {
    entities: Vec<InventoryEntity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&mut self, entity: InventoryEntity) -> EntityHandle {
        let handle = EntityHandle(self.entities.len());
        self.entities.push(entity);
        handle
    }

    pub fn all(&self) -> &[InventoryEntity] {
        &self.entities
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&InventoryEntity> {
        self.entities.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut InventoryEntity> {
        self.entities.get_mut(handle.0)
    }

    pub(crate) fn entities_mut(&mut self) -> impl Iterator<Item = &mut InventoryEntity> {
        self.entities.iter_mut()
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<(EntityHandle, &InventoryEntity)> {
        self.entities
            .iter()
            .enumerate()
            .find(|(_, entity)| *entity.id() == id)
            .map(|(idx, entity)| (EntityHandle(idx), entity))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &InventoryEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(idx, entity)| (EntityHandle(idx), entity))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, NewItem, NewPhone, Phone};

    fn test_item(name: &str) -> InventoryEntity {
        Item::create(NewItem::new(name, 10.0).with_quantity(1))
            .unwrap()
            .into()
    }

    fn test_phone(name: &str) -> InventoryEntity {
        Phone::create(NewPhone::new(NewItem::new(name, 500.0)))
            .unwrap()
            .into()
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.all().is_empty());
    }

    #[test]
    fn register_appends_in_order_across_kinds() {
        let mut registry = Registry::new();
        let a = registry.register(test_item("Phone"));
        let b = registry.register(test_phone("jscPhonev10"));
        let c = registry.register(test_item("Cable"));

        assert_eq!((a.position(), b.position(), c.position()), (0, 1, 2));
        let names: Vec<_> = registry.all().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Phone", "jscPhonev10", "Cable"]);
    }

    #[test]
    fn register_does_not_deduplicate() {
        let mut registry = Registry::new();
        let entity = test_item("Mouse");
        registry.register(entity.clone());
        registry.register(entity);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_by_handle_and_id() {
        let mut registry = Registry::new();
        registry.register(test_item("Keyboard"));
        let phone = test_phone("Pixel");
        let id = phone.id_typed();
        let handle = registry.register(phone);

        assert_eq!(registry.get(handle).unwrap().name(), "Pixel");
        let (found, entity) = registry.find_by_id(id).unwrap();
        assert_eq!(found, handle);
        assert_eq!(entity.name(), "Pixel");
        assert!(registry.get(EntityHandle(7)).is_none());
    }

    #[test]
    fn iter_yields_handles_in_order() {
        let mut registry = Registry::new();
        registry.register(test_item("a"));
        registry.register(test_item("b"));
        let handles: Vec<_> = registry.iter().map(|(h, _)| h.position()).collect();
        assert_eq!(handles, vec![0, 1]);
    }
}
