//! Bulk construction from tabular rows.
//!
//! Rows are processed strictly in order. The first row that fails to read,
//! coerce or validate aborts the batch; rows before it stay registered.

use std::io;
use std::path::Path;

use stockroom_core::ConversionError;

use crate::error::{InventoryError, InventoryResult};
use crate::inventory::Inventory;
use crate::item::NewItem;
use crate::registry::EntityHandle;

/// One record of textual fields, as read from a CSV with a
/// `name,price,quantity` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemRow {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Coerces `price` to a real number and `quantity` to an integer.
    ///
    /// Range checks are left to the constructor.
    pub fn coerce(&self, options: LoaderOptions) -> Result<NewItem, ConversionError> {
        let unit_price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity, options)?;
        Ok(NewItem::new(self.name.clone(), unit_price).with_quantity(quantity))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Accept quantities written as whole floats (`"5.0"`).
    pub accept_whole_floats: bool,
}

/// True for finite floats with no fractional part (`5.0`, `-2.0`).
pub fn is_whole_number(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

fn parse_price(text: &str) -> Result<f64, ConversionError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::new("price", text, "real number"))
}

fn parse_quantity(text: &str, options: LoaderOptions) -> Result<i64, ConversionError> {
    let trimmed = text.trim();
    if let Ok(quantity) = trimmed.parse::<i64>() {
        return Ok(quantity);
    }
    if options.accept_whole_floats {
        if let Ok(value) = trimmed.parse::<f64>() {
            if is_whole_number(value) && value.abs() < i64::MAX as f64 {
                return Ok(value as i64);
            }
        }
    }
    Err(ConversionError::new("quantity", text, "integer"))
}

/// Constructs one entity per row through `inventory`, in order.
///
/// Returns the handles of the new entities. On failure nothing is rolled
/// back and later rows are never touched.
pub fn load_rows<I>(
    inventory: &mut Inventory,
    rows: I,
    options: LoaderOptions,
) -> InventoryResult<Vec<EntityHandle>>
where
    I: IntoIterator<Item = ItemRow>,
{
    load_each(inventory, rows.into_iter().map(Ok), options)
}

/// Streams a headed CSV into `inventory`, building each record as soon as
/// it is read. A short or unreadable record stops the load at that record.
pub fn load_csv<R: io::Read>(
    inventory: &mut Inventory,
    reader: R,
    options: LoaderOptions,
) -> InventoryResult<Vec<EntityHandle>> {
    let rows = CsvRows::new(reader)?;
    load_each(inventory, rows, options)
}

pub fn load_csv_path(
    inventory: &mut Inventory,
    path: &Path,
    options: LoaderOptions,
) -> InventoryResult<Vec<EntityHandle>> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    load_csv(inventory, file, options)
}

fn load_each<I>(
    inventory: &mut Inventory,
    rows: I,
    options: LoaderOptions,
) -> InventoryResult<Vec<EntityHandle>>
where
    I: IntoIterator<Item = InventoryResult<ItemRow>>,
{
    let mut handles = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let handle = row
            .and_then(|row| {
                row.coerce(options)
                    .map_err(|err| InventoryError::from(err.at_row(idx)))
            })
            .and_then(|cmd| Ok(inventory.create_item(cmd)?))
            .inspect_err(|err| {
                tracing::warn!(
                    row = idx,
                    loaded = handles.len(),
                    error = %err,
                    "item load aborted"
                );
            })?;
        handles.push(handle);
    }

    tracing::info!(
        rows = handles.len(),
        total = inventory.registry().len(),
        "item rows loaded"
    );
    Ok(handles)
}

/// Column positions of the three row fields, located by header name.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: Option<usize>,
    price: Option<usize>,
    quantity: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);
        Self {
            name: find("name"),
            price: find("price"),
            quantity: find("quantity"),
        }
    }
}

/// Lazily yields the records of a headed CSV as [`ItemRow`]s.
///
/// Records are read with `flexible` lengths so that a short record surfaces
/// as a [`ConversionError`] naming the missing field rather than a reader
/// error. Field text is kept as-is; numeric fields are trimmed on coercion.
pub struct CsvRows<R> {
    records: csv::StringRecordsIntoIter<R>,
    columns: Columns,
    row: usize,
}

impl<R: io::Read> CsvRows<R> {
    pub fn new(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);
        let columns = Columns::from_headers(rdr.headers()?);
        Ok(Self {
            records: rdr.into_records(),
            columns,
            row: 0,
        })
    }

    fn to_row(
        &self,
        record: &csv::StringRecord,
        row: usize,
    ) -> Result<ItemRow, ConversionError> {
        let field = |column: Option<usize>, name: &'static str, expected: &'static str| {
            column
                .and_then(|idx| record.get(idx))
                .map(str::to_string)
                .ok_or_else(|| ConversionError::new(name, "", expected).at_row(row))
        };
        Ok(ItemRow {
            name: field(self.columns.name, "name", "text")?,
            price: field(self.columns.price, "price", "real number")?,
            quantity: field(self.columns.quantity, "quantity", "integer")?,
        })
    }
}

impl<R: io::Read> Iterator for CsvRows<R> {
    type Item = InventoryResult<ItemRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let row = self.row;
        self.row += 1;
        Some(match record {
            Ok(record) => self.to_row(&record, row).map_err(InventoryError::from),
            Err(err) => Err(err.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[(&str, &str, &str)]) -> Vec<ItemRow> {
        data.iter()
            .map(|(name, price, quantity)| ItemRow::new(*name, *price, *quantity))
            .collect()
    }

    fn csv_rows(data: &str) -> Vec<ItemRow> {
        CsvRows::new(data.as_bytes())
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn loads_well_formed_rows_in_order() {
        let mut inventory = Inventory::new();
        let handles = load_rows(
            &mut inventory,
            rows(&[("Phone", "100", "1"), ("Laptop", "1000.5", "3"), ("Cable", "10", "5")]),
            LoaderOptions::default(),
        )
        .unwrap();

        assert_eq!(handles.len(), 3);
        assert_eq!(inventory.registry().len(), 3);

        let loaded: Vec<_> = inventory
            .registry()
            .all()
            .iter()
            .map(|e| (e.name().to_string(), e.unit_price(), e.quantity()))
            .collect();
        assert_eq!(
            loaded,
            vec![
                ("Phone".to_string(), 100.0, 1),
                ("Laptop".to_string(), 1000.5, 3),
                ("Cable".to_string(), 10.0, 5),
            ]
        );
    }

    #[test]
    fn non_numeric_price_aborts_remaining_rows() {
        let mut inventory = Inventory::new();
        let err = load_rows(
            &mut inventory,
            rows(&[("Phone", "100", "1"), ("Laptop", "abc", "3"), ("Cable", "10", "5")]),
            LoaderOptions::default(),
        )
        .unwrap_err();

        match err {
            InventoryError::Conversion(e) => {
                assert_eq!(e.field, "price");
                assert_eq!(e.value, "abc");
                assert_eq!(e.row, Some(1));
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }

        let names: Vec<_> = inventory.registry().all().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Phone"]);
    }

    #[test]
    fn negative_value_row_aborts_with_validation_error() {
        let mut inventory = Inventory::new();
        let err = load_rows(
            &mut inventory,
            rows(&[("Mouse", "50", "5"), ("Keyboard", "75", "-5"), ("Cable", "10", "5")]),
            LoaderOptions::default(),
        )
        .unwrap_err();

        match err {
            InventoryError::Validation(e) => assert_eq!(e.field, "quantity"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert_eq!(inventory.registry().len(), 1);
    }

    #[test]
    fn repeated_loads_accumulate() {
        let mut inventory = Inventory::new();
        let batch = rows(&[("Phone", "100", "1"), ("Laptop", "1000", "3")]);
        load_rows(&mut inventory, batch.clone(), LoaderOptions::default()).unwrap();
        let second = load_rows(&mut inventory, batch, LoaderOptions::default()).unwrap();

        assert_eq!(inventory.registry().len(), 4);
        assert_eq!(second[0].position(), 2);
    }

    #[test]
    fn quantity_must_be_an_integer_by_default() {
        let err = ItemRow::new("Cable", "10", "5.0")
            .coerce(LoaderOptions::default())
            .unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(err.expected, "integer");
    }

    #[test]
    fn whole_float_quantities_are_accepted_when_enabled() {
        let options = LoaderOptions {
            accept_whole_floats: true,
        };
        let cmd = ItemRow::new("Cable", "10", "5.0").coerce(options).unwrap();
        assert_eq!(cmd.quantity, 5);

        let err = ItemRow::new("Cable", "10", "5.5").coerce(options).unwrap_err();
        assert_eq!(err.field, "quantity");
    }

    #[test]
    fn is_whole_number_ignores_fractions_and_non_finite() {
        assert!(is_whole_number(5.0));
        assert!(is_whole_number(-2.0));
        assert!(!is_whole_number(5.5));
        assert!(!is_whole_number(f64::NAN));
        assert!(!is_whole_number(f64::INFINITY));
    }

    #[test]
    fn coerce_trims_numeric_fields_only() {
        let cmd = ItemRow::new(" Mouse ", " 50 ", " 5 ")
            .coerce(LoaderOptions::default())
            .unwrap();
        assert_eq!(cmd.name, " Mouse ");
        assert_eq!(cmd.unit_price, 50.0);
        assert_eq!(cmd.quantity, 5);
    }

    #[test]
    fn csv_rows_parse_headed_csv() {
        let data = "name,price,quantity\n\"Phone\",100,1\n\"Laptop\",1000,3\n\"Keyboard\",75,5\n";
        assert_eq!(
            csv_rows(data),
            rows(&[("Phone", "100", "1"), ("Laptop", "1000", "3"), ("Keyboard", "75", "5")])
        );
    }

    #[test]
    fn csv_rows_keep_surrounding_whitespace_in_names() {
        let data = "name,price,quantity\n\" Phone \",100,1\n";
        assert_eq!(csv_rows(data), rows(&[(" Phone ", "100", "1")]));
    }

    #[test]
    fn csv_rows_locate_columns_by_header() {
        let data = "quantity,name,price\n3,Laptop,1000\n";
        assert_eq!(csv_rows(data), rows(&[("Laptop", "1000", "3")]));
    }

    #[test]
    fn short_csv_record_keeps_earlier_rows() {
        let data = "name,price,quantity\nPhone,100,1\nLaptop,1000\nCable,10,5\n";
        let mut inventory = Inventory::new();
        let err = load_csv(&mut inventory, data.as_bytes(), LoaderOptions::default()).unwrap_err();

        match err {
            InventoryError::Conversion(e) => {
                assert_eq!(e.field, "quantity");
                assert_eq!(e.row, Some(1));
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }
        assert_eq!(inventory.descriptors(), vec!["Item('Phone', 100.0, 1)"]);
    }

    #[test]
    fn missing_column_fails_the_first_row() {
        let data = "name,price\nPhone,100\n";
        let mut inventory = Inventory::new();
        let err = load_csv(&mut inventory, data.as_bytes(), LoaderOptions::default()).unwrap_err();

        match err {
            InventoryError::Conversion(e) => {
                assert_eq!(e.field, "quantity");
                assert_eq!(e.row, Some(0));
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }
        assert!(inventory.registry().is_empty());
    }

    #[test]
    fn invalid_utf8_record_keeps_earlier_rows() {
        let mut data = b"name,price,quantity\nPhone,100,1\n".to_vec();
        data.extend_from_slice(b"Lap\xfftop,1000,3\n");
        let mut inventory = Inventory::new();
        let err = load_csv(&mut inventory, data.as_slice(), LoaderOptions::default()).unwrap_err();

        assert!(matches!(err, InventoryError::Csv(_)));
        assert_eq!(inventory.registry().len(), 1);
    }
}
