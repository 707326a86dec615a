//! Inventory domain module.
//!
//! Validated inventory entities (base items and phones), an append-only
//! registry, pricing/discount rules and bulk loading from tabular rows.
//! No global state: each [`Inventory`] owns its registry and pricing policy.

pub mod error;
pub mod inventory;
pub mod item;
pub mod loader;
pub mod pricing;
pub mod registry;

pub use error::{InventoryError, InventoryResult};
pub use inventory::Inventory;
pub use item::{InventoryEntity, Item, ItemKind, NewItem, NewPhone, Phone};
pub use loader::{
    CsvRows, ItemRow, LoaderOptions, is_whole_number, load_csv, load_csv_path, load_rows,
};
pub use pricing::{DEFAULT_DISCOUNT_FACTOR, DiscountFactor, PricingPolicy, total_price};
pub use registry::{EntityHandle, Registry};

pub use stockroom_core::{ConversionError, Entity, ItemId, ValidationError};
