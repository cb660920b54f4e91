// Retail Explorer
// Author: Gabriel Demetrios Lafis

//! # Retail Explorer
//!
//! An interactive command-line explorer for invoice-level retail
//! transaction data.
//!
//! ## Features
//!
//! - Loading a spreadsheet or CSV export with the fixed retail column set
//! - Cleaning: timestamp and number coercion, dropping incomplete rows and
//!   returns, deriving revenue
//! - Read-only queries: top countries, products and brands, product search,
//!   customer and date lookups, total revenue, orders per weekday
//! - A numbered-menu shell over any reader/writer pair
//!
//! ## Example
//!
//! ```no_run
//! use retail_explorer::{
//!     data::XlsxSource,
//!     processing::{load_dataset, top_countries, total_revenue},
//! };
//!
//! let source = XlsxSource::new("onlineRetail.xlsx");
//! let dataset = load_dataset(&source, &[]).unwrap();
//!
//! println!("Revenue: {}", total_revenue(&dataset).unwrap());
//! for (country, orders) in top_countries(&dataset, 5).unwrap() {
//!     println!("{}: {}", country, orders);
//! }
//! ```

pub mod cli;
pub mod data;
pub mod processing;
pub mod utils;

// Re-export main types
pub use cli::Shell;
pub use data::{open_source, CsvSource, Dataset, Record, XlsxSource};
pub use processing::load_dataset;
pub use utils::{AppError, AppResult, Config};
