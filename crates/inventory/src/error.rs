//! Errors surfaced by the inventory crate.

use thiserror::Error;

use stockroom_core::{ConversionError, ValidationError};

use crate::registry::EntityHandle;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The CSV source could not be read or did not have the expected columns.
    #[error("failed to read item rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("no entity registered at {0}")]
    UnknownHandle(EntityHandle),
}
