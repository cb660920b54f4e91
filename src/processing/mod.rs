// Processing module for cleaning and querying retail data
// Author: Gabriel Demetrios Lafis

mod aggregate;
mod clean;
mod filter;
mod query;

pub use aggregate::*;
pub use clean::*;
pub use filter::*;
pub use query::*;

use log::debug;
use thiserror::Error;

use crate::data::{DataError, RawTable};

/// A single step that turns one raw table into another
pub trait TableProcessor {
    /// Process a table and return the transformed table
    fn process(&self, input: RawTable) -> Result<RawTable, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;
}

/// Represents an error in the processing module
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Pipeline for chaining multiple processors
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn TableProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: TableProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Number of steps in the pipeline
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Execute the pipeline on a table
    pub fn execute(&self, input: RawTable) -> Result<RawTable, ProcessingError> {
        let mut current = input;

        for processor in &self.processors {
            let before = current.len();
            current = processor.process(current)?;
            debug!(
                "[{}] step '{}': {} -> {} rows",
                self.name,
                processor.name(),
                before,
                current.len()
            );
        }

        Ok(current)
    }
}

impl TableProcessor for Pipeline {
    fn process(&self, input: RawTable) -> Result<RawTable, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
