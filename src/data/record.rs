// Cleaned transaction records and the immutable dataset
// Author: Gabriel Demetrios Lafis

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use log::warn;
use rust_decimal::Decimal;

use super::schema::{
    BRAND, COUNTRY, CUSTOMER_ID, DESCRIPTION, INVOICE_DATE, INVOICE_NO, QUANTITY, REVENUE,
    STOCK_CODE, UNIT_PRICE,
};
use super::{DataError, RawTable, Row};

pub type CustomerId = i64;

/// A single cleaned transaction line
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: CustomerId,
    pub country: Option<String>,
    pub brand: Option<String>,
    /// quantity × unit price, fixed at load time
    pub revenue: Decimal,
}

impl Record {
    /// Calendar date of the invoice
    pub fn date(&self) -> NaiveDate {
        self.invoice_date.date()
    }

    /// Day of the week the invoice was issued on
    pub fn weekday(&self) -> Weekday {
        self.invoice_date.weekday()
    }
}

/// Positions of the retail columns inside a cleaned raw table
struct ColumnIndex {
    invoice_no: usize,
    stock_code: usize,
    description: usize,
    quantity: usize,
    invoice_date: usize,
    unit_price: usize,
    customer_id: usize,
    country: usize,
    revenue: usize,
    brand: Option<usize>,
}

impl ColumnIndex {
    fn resolve(table: &RawTable) -> Result<Self, DataError> {
        Ok(ColumnIndex {
            invoice_no: table.column_index(INVOICE_NO)?,
            stock_code: table.column_index(STOCK_CODE)?,
            description: table.column_index(DESCRIPTION)?,
            quantity: table.column_index(QUANTITY)?,
            invoice_date: table.column_index(INVOICE_DATE)?,
            unit_price: table.column_index(UNIT_PRICE)?,
            customer_id: table.column_index(CUSTOMER_ID)?,
            country: table.column_index(COUNTRY)?,
            revenue: table.column_index(REVENUE)?,
            brand: table.schema.index_of(BRAND),
        })
    }

    fn record(&self, row: &Row) -> Option<Record> {
        let text = |i: usize| row.get(i).and_then(|v| v.as_str()).map(str::to_string);

        Some(Record {
            invoice_no: text(self.invoice_no)?,
            stock_code: text(self.stock_code)?,
            description: text(self.description)?,
            quantity: row.get(self.quantity)?.as_integer()?,
            invoice_date: row.get(self.invoice_date)?.as_datetime()?,
            unit_price: row.get(self.unit_price)?.as_decimal()?,
            customer_id: row.get(self.customer_id)?.as_integer()?,
            country: text(self.country),
            brand: self.brand.and_then(text),
            revenue: row.get(self.revenue)?.as_decimal()?,
        })
    }
}

/// The full in-memory collection of cleaned records
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    records: Vec<Record>,
    has_brand: bool,
}

impl Dataset {
    pub fn new(source: &str, records: Vec<Record>, has_brand: bool) -> Self {
        Dataset {
            source: source.to_string(),
            records,
            has_brand,
        }
    }

    /// Build the dataset from a table that has already been cleaned
    pub fn from_table(source: &str, table: &RawTable) -> Result<Self, DataError> {
        let index = ColumnIndex::resolve(table)?;

        let mut records = Vec::with_capacity(table.len());
        for (position, row) in table.rows.iter().enumerate() {
            match index.record(row) {
                Some(record) => records.push(record),
                None => warn!("Skipping row {} with untyped required values", position),
            }
        }

        Ok(Dataset::new(source, records, index.brand.is_some()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a brand column
    pub fn has_brand(&self) -> bool {
        self.has_brand
    }
}

/// English weekday name, independent of the host locale
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
