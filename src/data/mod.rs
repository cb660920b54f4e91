// Data module for raw tables, sources and the cleaned retail dataset
// Author: Gabriel Demetrios Lafis

mod csv;
mod record;
mod schema;
mod xlsx;

pub use self::csv::*;
pub use record::*;
pub use schema::*;
pub use xlsx::*;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// Represents a generic tabular data source
pub trait DataSource {
    /// Read the whole source into a raw table
    fn read(&self) -> Result<RawTable, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Parse a format from a file extension
    pub fn from_extension(ext: &str) -> Result<Self, DataError> {
        match ext.to_lowercase().as_str() {
            "csv" | "txt" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Spreadsheet),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Detect the format of a file from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }
}

/// Open the data source matching the file extension of `path`
///
/// `delimiter` only applies to CSV files.
pub fn open_source<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Box<dyn DataSource>, DataError> {
    let path = path.as_ref();
    Ok(match SourceFormat::from_path(path)? {
        SourceFormat::Csv => Box::new(CsvSource::new(path, delimiter)),
        SourceFormat::Spreadsheet => Box::new(XlsxSource::new(path)),
    })
}

/// A table as read from a source, before any cleaning
#[derive(Debug, Clone)]
pub struct RawTable {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl RawTable {
    /// Create a new empty table
    pub fn new(schema: Schema) -> Self {
        RawTable {
            schema,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Row) -> Result<(), DataError> {
        if row.values.len() != self.schema.fields.len() {
            return Err(DataError::SchemaMismatch {
                expected: self.schema.fields.len(),
                found: row.values.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    /// Get the number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the named column, or `MissingColumn`
    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }
}

/// Represents a row in a raw table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row with the given values
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    /// Get a reference to a value by index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a mutable reference to a value by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }
}

/// Represents a single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Decimal(Decimal),
    String(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

/// Represents a schema for a raw table
#[derive(Debug, Clone)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema with the given fields
    pub fn new(fields: Vec<Field>) -> Self {
        Schema { fields }
    }

    /// Get the position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Represents a field in a schema
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl Field {
    /// Create a new field
    pub fn new(name: String, data_type: DataType, nullable: bool) -> Self {
        Field {
            name,
            data_type,
            nullable,
        }
    }
}

/// Represents a data type for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Decimal,
    String,
    DateTime,
}

/// Represents an error in the data module
#[derive(Debug, Error)]
pub enum DataError {
    #[error("File '{}' not found. Please check the path and try again.", .0.display())]
    SourceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Required column '{0}' is missing from the source")]
    MissingColumn(String),
    #[error("Unsupported input format '{0}'; expected a CSV or spreadsheet file")]
    UnsupportedFormat(String),
    #[error("Schema mismatch: expected {expected} values, found {found}")]
    SchemaMismatch { expected: usize, found: usize },
}

impl From<::csv::Error> for DataError {
    fn from(err: ::csv::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}
