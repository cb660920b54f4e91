// Spreadsheet data source implementation
// Author: Gabriel Demetrios Lafis

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use log::debug;

use super::{DataError, DataSource, RawTable, Row, SchemaBuilder, Value};

/// Spreadsheet data source reading the first worksheet
///
/// The first row holds the column names. Works with `.xlsx`, `.xlsm`,
/// `.xls`, `.xlsb` and `.ods` workbooks.
pub struct XlsxSource {
    path: PathBuf,
    name: String,
}

impl XlsxSource {
    /// Create a new spreadsheet data source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        XlsxSource {
            name: path.to_string_lossy().to_string(),
            path,
        }
    }
}

impl DataSource for XlsxSource {
    fn read(&self) -> Result<RawTable, DataError> {
        if !self.path.exists() {
            return Err(DataError::SourceNotFound(self.path.clone()));
        }

        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DataError::Parse(format!("Spreadsheet error: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DataError::Parse("Workbook has no worksheets".to_string()))?
            .map_err(|e| DataError::Parse(format!("Spreadsheet error: {}", e)))?;

        let mut rows = range.rows();

        let schema = match rows.next() {
            Some(header) => header
                .iter()
                .fold(SchemaBuilder::new(), |builder, cell| {
                    builder.add_string(cell.to_string().trim())
                })
                .build(),
            None => SchemaBuilder::new().build(),
        };
        let width = schema.fields.len();

        let mut table = RawTable::new(schema);

        for cells in rows {
            let values: Vec<Value> = (0..width)
                .map(|i| cells.get(i).map_or(Value::Null, cell_value))
                .collect();

            table.add_row(Row::new(values))?;
        }

        debug!("Read {} rows from '{}'", table.len(), self.name);

        Ok(table)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Map a worksheet cell onto the same string-first model as a CSV cell
///
/// Only date-formatted cells are typed here; numbers keep their text form
/// so cleaning coerces them exactly like a CSV export.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::DateTime(dt) => dt.as_datetime().map_or(Value::Null, Value::DateTime),
        Data::Int(i) => Value::String(i.to_string()),
        Data::Float(f) => Value::String(f.to_string()),
        Data::Bool(b) => Value::String(b.to_string()),
    }
}
