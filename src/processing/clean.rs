// Cleaning steps that turn a raw retail table into a dataset
// Author: Gabriel Demetrios Lafis

use log::{info, warn};

use crate::data::{
    column_type, DataSource, DataType, Dataset, Field, RawTable, SchemaValidator, Value,
    INVOICE_DATE, NON_NULL_COLUMNS, QUANTITY, REVENUE, UNIT_PRICE,
};
use crate::utils::{parse_datetime, parse_decimal, parse_integer};
use super::{Pipeline, ProcessingError, TableProcessor};

/// Timestamp layouts tried when none are configured
pub const DEFAULT_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a string column into timestamps; unparseable values become null
pub struct ParseDateTimes {
    column: String,
    formats: Vec<String>,
}

impl ParseDateTimes {
    pub fn new(column: &str, formats: Vec<String>) -> Self {
        ParseDateTimes {
            column: column.to_string(),
            formats,
        }
    }
}

impl TableProcessor for ParseDateTimes {
    fn process(&self, mut input: RawTable) -> Result<RawTable, ProcessingError> {
        let idx = input.column_index(&self.column)?;

        for row in &mut input.rows {
            if let Some(value) = row.get_mut(idx) {
                *value = match value {
                    Value::String(s) => parse_datetime(s, &self.formats)
                        .map(Value::DateTime)
                        .unwrap_or(Value::Null),
                    Value::DateTime(dt) => Value::DateTime(*dt),
                    _ => Value::Null,
                };
            }
        }

        input.schema.fields[idx].data_type = DataType::DateTime;
        Ok(input)
    }

    fn name(&self) -> &str {
        "parse_datetimes"
    }
}

/// Coerce the numeric retail columns that exist in the table
///
/// Integer columns accept `6` and `6.0`; anything that is not a number
/// becomes null.
pub struct ParseNumbers;

impl TableProcessor for ParseNumbers {
    fn process(&self, mut input: RawTable) -> Result<RawTable, ProcessingError> {
        let targets: Vec<(usize, DataType)> = input
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| (i, column_type(&field.name)))
            .filter(|(_, data_type)| matches!(data_type, DataType::Integer | DataType::Decimal))
            .collect();

        for row in &mut input.rows {
            for &(idx, data_type) in &targets {
                if let Some(value) = row.get_mut(idx) {
                    *value = coerce_number(value, data_type);
                }
            }
        }

        for &(idx, data_type) in &targets {
            input.schema.fields[idx].data_type = data_type;
        }

        Ok(input)
    }

    fn name(&self) -> &str {
        "parse_numbers"
    }
}

fn coerce_number(value: &Value, data_type: DataType) -> Value {
    match (value, data_type) {
        (Value::String(s), DataType::Integer) => parse_integer(s).map(Value::Integer),
        (Value::String(s), DataType::Decimal) => parse_decimal(s).map(Value::Decimal),
        (Value::Integer(i), DataType::Integer) => Some(Value::Integer(*i)),
        (Value::Integer(i), DataType::Decimal) => Some(Value::Decimal((*i).into())),
        (Value::Decimal(d), DataType::Decimal) => Some(Value::Decimal(*d)),
        _ => None,
    }
    .unwrap_or(Value::Null)
}

/// Drop every row holding a null in any of the given columns
pub struct DropMissing {
    columns: Vec<String>,
}

impl DropMissing {
    pub fn new(columns: &[&str]) -> Self {
        DropMissing {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TableProcessor for DropMissing {
    fn process(&self, mut input: RawTable) -> Result<RawTable, ProcessingError> {
        let indices = self
            .columns
            .iter()
            .map(|c| input.column_index(c))
            .collect::<Result<Vec<_>, _>>()?;

        input
            .rows
            .retain(|row| indices.iter().all(|&i| row.get(i).map_or(false, |v| !v.is_null())));

        Ok(input)
    }

    fn name(&self) -> &str {
        "drop_missing"
    }
}

/// Drop every row whose integer column is zero or negative
pub struct DropNonPositive {
    column: String,
}

impl DropNonPositive {
    pub fn new(column: &str) -> Self {
        DropNonPositive {
            column: column.to_string(),
        }
    }
}

impl TableProcessor for DropNonPositive {
    fn process(&self, mut input: RawTable) -> Result<RawTable, ProcessingError> {
        let idx = input.column_index(&self.column)?;

        input
            .rows
            .retain(|row| matches!(row.get(idx), Some(Value::Integer(q)) if *q > 0));

        Ok(input)
    }

    fn name(&self) -> &str {
        "drop_non_positive"
    }
}

/// Append `Revenue = Quantity × UnitPrice`
pub struct DeriveRevenue;

impl TableProcessor for DeriveRevenue {
    fn process(&self, input: RawTable) -> Result<RawTable, ProcessingError> {
        let qty_idx = input.column_index(QUANTITY)?;
        let price_idx = input.column_index(UNIT_PRICE)?;

        let mut schema = input.schema;
        schema
            .fields
            .push(Field::new(REVENUE.to_string(), DataType::Decimal, false));

        let mut result = RawTable::new(schema);

        for (position, mut row) in input.rows.into_iter().enumerate() {
            let quantity = row.get(qty_idx).and_then(Value::as_decimal);
            let price = row.get(price_idx).and_then(Value::as_decimal);

            match quantity.zip(price).and_then(|(q, p)| q.checked_mul(p)) {
                Some(revenue) => {
                    row.values.push(Value::Decimal(revenue));
                    result.add_row(row)?;
                }
                None => warn!("Dropping row {}: revenue cannot be computed", position),
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "derive_revenue"
    }
}

/// The cleaning steps, in order
pub fn cleaning_pipeline(date_formats: &[String]) -> Pipeline {
    let formats = if date_formats.is_empty() {
        DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
    } else {
        date_formats.to_vec()
    };

    Pipeline::new("clean")
        .add(ParseDateTimes::new(INVOICE_DATE, formats))
        .add(ParseNumbers)
        .add(DropMissing::new(&NON_NULL_COLUMNS))
        .add(DropNonPositive::new(QUANTITY))
        .add(DeriveRevenue)
}

/// Read a source once and clean it into an immutable dataset
pub fn load_dataset<S: DataSource + ?Sized>(
    source: &S,
    date_formats: &[String],
) -> Result<Dataset, ProcessingError> {
    let table = source.read()?;
    SchemaValidator::validate_required(&table.schema)?;

    let rows_read = table.len();
    let cleaned = cleaning_pipeline(date_formats).execute(table)?;
    let dataset = Dataset::from_table(source.name(), &cleaned)?;

    info!(
        "Loaded '{}': {} rows read, {} retained",
        source.name(),
        rows_read,
        dataset.len()
    );

    Ok(dataset)
}
