// Read-only queries against a cleaned dataset
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::data::{CustomerId, Dataset, Record};
use crate::utils::{parse_user_date, parse_user_integer};
use super::{rank_by, top_n, Aggregate, CountDistinct, GroupBy, Mean, RecordFilter, Sum};

/// Number of groups reported by the "top" queries unless configured otherwise
pub const DEFAULT_TOP_N: usize = 5;

/// Represents a recoverable query failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} information is not available in the dataset.")]
    FeatureUnavailable(String),
    #[error("The {0} is too large to compute.")]
    Overflow(String),
}

/// Countries ranked by number of distinct invoices
pub fn top_countries(dataset: &Dataset, limit: usize) -> Result<Vec<(String, usize)>, QueryError> {
    let groups = GroupBy::new(dataset.records(), |r: &Record| r.country.clone());
    Ok(top_n(groups.aggregate(|r| r.invoice_no.as_str(), &CountDistinct)?, limit))
}

/// Product descriptions ranked by total quantity sold
pub fn top_products(dataset: &Dataset, limit: usize) -> Result<Vec<(String, i64)>, QueryError> {
    let groups = GroupBy::new(dataset.records(), |r: &Record| Some(r.description.clone()));
    Ok(top_n(groups.aggregate(|r| r.quantity, &Sum)?, limit))
}

/// Brands ranked by mean unit price
pub fn top_brands(dataset: &Dataset, limit: usize) -> Result<Vec<(String, Decimal)>, QueryError> {
    if !dataset.has_brand() {
        return Err(QueryError::FeatureUnavailable("Brand".to_string()));
    }

    let groups = GroupBy::new(dataset.records(), |r: &Record| r.brand.clone());
    Ok(top_n(groups.aggregate(|r| r.unit_price, &Mean)?, limit))
}

/// Distinct descriptions sold under an exact stock code
pub fn search_by_code(dataset: &Dataset, code: &str) -> Vec<String> {
    let matches = RecordFilter::stock_code_equals(code).apply(dataset);
    distinct(matches.iter().map(|r| r.description.as_str()))
}

/// Distinct stock codes whose description contains `fragment`, ignoring case
pub fn search_by_name(dataset: &Dataset, fragment: &str) -> Vec<String> {
    let matches = RecordFilter::description_contains(fragment).apply(dataset);
    distinct(matches.iter().map(|r| r.stock_code.as_str()))
}

pub fn parse_customer_id(text: &str) -> Result<CustomerId, QueryError> {
    parse_user_integer(text, "CustomerID").map_err(QueryError::InvalidInput)
}

/// Records of one customer, in dataset order
pub fn orders_for_customer(dataset: &Dataset, customer_id: CustomerId) -> Vec<&Record> {
    RecordFilter::customer_equals(customer_id).apply(dataset)
}

/// Records of the customer id typed by the user
pub fn orders_by_customer<'a>(dataset: &'a Dataset, text: &str) -> Result<Vec<&'a Record>, QueryError> {
    let customer_id = parse_customer_id(text)?;
    Ok(orders_for_customer(dataset, customer_id))
}

pub fn parse_query_date(text: &str) -> Result<NaiveDate, QueryError> {
    parse_user_date(text).map_err(QueryError::InvalidInput)
}

/// Records invoiced on a calendar date, in dataset order
pub fn orders_on(dataset: &Dataset, date: NaiveDate) -> Vec<&Record> {
    RecordFilter::on_date(date).apply(dataset)
}

/// Records invoiced on the `YYYY-MM-DD` date typed by the user
pub fn orders_by_date<'a>(dataset: &'a Dataset, text: &str) -> Result<Vec<&'a Record>, QueryError> {
    let date = parse_query_date(text)?;
    Ok(orders_on(dataset, date))
}

/// Sum of revenue over every record
pub fn total_revenue(dataset: &Dataset) -> Result<Decimal, QueryError> {
    let mut total = Decimal::ZERO;
    for record in dataset.records() {
        Sum.update(&mut total, record.revenue)?;
    }
    Ok(total)
}

/// Distinct invoices per day of week, busiest first
///
/// Only days that occur in the dataset are listed. Ties keep Monday-first
/// order.
pub fn orders_by_weekday(dataset: &Dataset) -> Result<Vec<(Weekday, usize)>, QueryError> {
    let groups = GroupBy::new(dataset.records(), |r: &Record| Some(r.weekday()));
    Ok(rank_by(
        groups.aggregate(|r| r.invoice_no.as_str(), &CountDistinct)?,
        None,
        |a, b| a.num_days_from_monday().cmp(&b.num_days_from_monday()),
    ))
}

fn distinct<'a, I: Iterator<Item = &'a str>>(values: I) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
