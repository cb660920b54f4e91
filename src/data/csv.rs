// CSV data source implementation
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;

use super::{DataError, DataSource, RawTable, Row, SchemaBuilder, Value};

/// CSV data source
pub struct CsvSource {
    path: PathBuf,
    name: String,
    delimiter: char,
}

impl CsvSource {
    /// Create a new CSV data source
    pub fn new<P: AsRef<Path>>(path: P, delimiter: char) -> Self {
        let path = path.as_ref().to_path_buf();
        CsvSource {
            name: path.to_string_lossy().to_string(),
            path,
            delimiter,
        }
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<RawTable, DataError> {
        if !self.path.exists() {
            return Err(DataError::SourceNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        // Every column starts as a nullable string; cleaning assigns types
        let schema = csv_reader
            .byte_headers()?
            .iter()
            .fold(SchemaBuilder::new(), |builder, name| {
                builder.add_string(decode_field(name).trim_start_matches('\u{feff}').trim())
            })
            .build();
        let width = schema.fields.len();

        let mut table = RawTable::new(schema);

        for result in csv_reader.byte_records() {
            let record = result?;

            // Short records are padded with nulls, long ones truncated
            let values: Vec<Value> = (0..width)
                .map(|i| match record.get(i) {
                    Some(field) if !field.is_empty() => Value::String(decode_field(field)),
                    _ => Value::Null,
                })
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

/// Decode a raw field as UTF-8, falling back to Latin-1
///
/// Retail exports are often written in ISO-8859-1, where every byte is the
/// code point of the same value.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
