// Interactive command-line interface
// Author: Gabriel Demetrios Lafis

mod render;
mod shell;

pub use render::*;
pub use shell::*;

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::processing::QueryError;
use crate::utils::{AppError, AppResult};

/// A menu entry the user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    TopCountries,
    TopProducts,
    TopBrands,
    SearchProduct,
    CustomerOrders,
    OrdersByDate,
    TotalRevenue,
    WeekdayFrequency,
    Exit,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Command; 9] = [
        Command::TopCountries,
        Command::TopProducts,
        Command::TopBrands,
        Command::SearchProduct,
        Command::CustomerOrders,
        Command::OrdersByDate,
        Command::TotalRevenue,
        Command::WeekdayFrequency,
        Command::Exit,
    ];

    /// The text typed to select the command
    pub fn key(self) -> &'static str {
        match self {
            Command::TopCountries => "1",
            Command::TopProducts => "2",
            Command::TopBrands => "3",
            Command::SearchProduct => "4",
            Command::CustomerOrders => "5",
            Command::OrdersByDate => "6",
            Command::TotalRevenue => "7",
            Command::WeekdayFrequency => "8",
            Command::Exit => "9",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::TopCountries => "Top countries with the most orders",
            Command::TopProducts => "Top products by quantity sold",
            Command::TopBrands => "Top brands by average unit price",
            Command::SearchProduct => "Search for product (by ID or name)",
            Command::CustomerOrders => "Show orders by a specific customer (CustomerID)",
            Command::OrdersByDate => "Show products purchased on a specific date",
            Command::TotalRevenue => "Show total revenue of the store",
            Command::WeekdayFrequency => "Show most frequent day of week for orders",
            Command::Exit => "Exit",
        }
    }
}

impl FromStr for Command {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| QueryError::InvalidInput(format!("'{}' is not a menu choice", s)))
    }
}

/// What the shell does after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command implementation
pub type Handler<'d, R, W> = fn(&mut Shell<'d, R, W>) -> AppResult<Flow>;

/// Mapping from every command to exactly one handler
pub struct CommandTable<'d, R, W> {
    handlers: HashMap<Command, Handler<'d, R, W>>,
}

impl<'d, R: BufRead, W: Write> CommandTable<'d, R, W> {
    /// Build a table, rejecting duplicate or missing bindings
    pub fn new(bindings: Vec<(Command, Handler<'d, R, W>)>) -> AppResult<Self> {
        let mut handlers = HashMap::with_capacity(bindings.len());

        for (command, handler) in bindings {
            if handlers.insert(command, handler).is_some() {
                return Err(AppError::CommandTable(format!(
                    "command {:?} is bound more than once",
                    command
                )));
            }
        }

        if let Some(missing) = Command::ALL.iter().find(|c| !handlers.contains_key(*c)) {
            return Err(AppError::CommandTable(format!(
                "command {:?} has no handler",
                missing
            )));
        }

        Ok(CommandTable { handlers })
    }

    /// The table used by the interactive shell
    pub fn standard() -> AppResult<Self> {
        Self::new(
            Command::ALL
                .iter()
                .map(|&command| (command, Self::standard_handler(command)))
                .collect(),
        )
    }

    fn standard_handler(command: Command) -> Handler<'d, R, W> {
        match command {
            Command::TopCountries => Shell::top_countries,
            Command::TopProducts => Shell::top_products,
            Command::TopBrands => Shell::top_brands,
            Command::SearchProduct => Shell::search_product,
            Command::CustomerOrders => Shell::customer_orders,
            Command::OrdersByDate => Shell::orders_by_date,
            Command::TotalRevenue => Shell::total_revenue,
            Command::WeekdayFrequency => Shell::weekday_frequency,
            Command::Exit => Shell::exit,
        }
    }

    pub fn handler(&self, command: Command) -> Option<Handler<'d, R, W>> {
        self.handlers.get(&command).copied()
    }
}
