// Filter operations over cleaned records
// Author: Gabriel Demetrios Lafis

use chrono::NaiveDate;
use log::debug;

use crate::data::{CustomerId, Dataset, Record};

/// Keep records matching a predicate
pub struct RecordFilter {
    name: String,
    predicate: Box<dyn Fn(&Record) -> bool>,
}

impl RecordFilter {
    /// Create a new filter with a predicate function
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + 'static,
    {
        RecordFilter {
            name: name.to_string(),
            predicate: Box::new(predicate),
        }
    }

    /// Exact, case-sensitive stock code match
    pub fn stock_code_equals(code: &str) -> Self {
        let code = code.to_string();
        Self::new(&format!("stock_code_equals_{}", code), move |record| {
            record.stock_code == code
        })
    }

    /// Case-insensitive substring match on the description
    pub fn description_contains(fragment: &str) -> Self {
        let fragment = fragment.to_lowercase();
        Self::new(&format!("description_contains_{}", fragment), move |record| {
            record.description.to_lowercase().contains(&fragment)
        })
    }

    pub fn customer_equals(customer_id: CustomerId) -> Self {
        Self::new(&format!("customer_equals_{}", customer_id), move |record| {
            record.customer_id == customer_id
        })
    }

    /// Records invoiced on the given calendar date
    pub fn on_date(date: NaiveDate) -> Self {
        Self::new(&format!("on_date_{}", date), move |record| record.date() == date)
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }

    /// Matching records, in dataset order
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        let matched: Vec<&Record> = dataset
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect();

        debug!("Filter '{}' matched {} of {} records", self.name, matched.len(), dataset.len());
        matched
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
