// Retail column set and schema validation
// Author: Gabriel Demetrios Lafis

use super::{DataError, DataType, Field, Schema};

pub const INVOICE_NO: &str = "InvoiceNo";
pub const STOCK_CODE: &str = "StockCode";
pub const DESCRIPTION: &str = "Description";
pub const QUANTITY: &str = "Quantity";
pub const INVOICE_DATE: &str = "InvoiceDate";
pub const UNIT_PRICE: &str = "UnitPrice";
pub const CUSTOMER_ID: &str = "CustomerID";
pub const COUNTRY: &str = "Country";
pub const BRAND: &str = "Brand";
pub const REVENUE: &str = "Revenue";

/// Columns every retail source must provide
pub const REQUIRED_COLUMNS: [&str; 8] = [
    INVOICE_NO,
    STOCK_CODE,
    DESCRIPTION,
    QUANTITY,
    INVOICE_DATE,
    UNIT_PRICE,
    CUSTOMER_ID,
    COUNTRY,
];

/// Columns that must hold a value for a row to survive cleaning
pub const NON_NULL_COLUMNS: [&str; 7] = [
    INVOICE_NO,
    STOCK_CODE,
    DESCRIPTION,
    QUANTITY,
    INVOICE_DATE,
    UNIT_PRICE,
    CUSTOMER_ID,
];

/// Target type of each typed retail column; everything else stays a string
pub fn column_type(name: &str) -> DataType {
    match name {
        QUANTITY | CUSTOMER_ID => DataType::Integer,
        UNIT_PRICE | REVENUE => DataType::Decimal,
        INVOICE_DATE => DataType::DateTime,
        _ => DataType::String,
    }
}

/// Schema validator for the fixed retail column set
pub struct SchemaValidator;

impl SchemaValidator {
    /// Check that every required column is present
    pub fn validate_required(schema: &Schema) -> Result<(), DataError> {
        match REQUIRED_COLUMNS.iter().find(|name| !schema.contains(name)) {
            Some(missing) => Err(DataError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Schema builder for creating schemas
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Add a field to the schema
    pub fn add_field(mut self, name: &str, data_type: DataType, nullable: bool) -> Self {
        self.fields.push(Field::new(name.to_string(), data_type, nullable));
        self
    }

    /// Add a nullable string field
    pub fn add_string(self, name: &str) -> Self {
        self.add_field(name, DataType::String, true)
    }

    /// Build the schema
    pub fn build(self) -> Schema {
        Schema::new(self.fields)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
