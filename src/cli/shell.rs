// Interactive menu loop over a line-based reader and a writer
// Author: Gabriel Demetrios Lafis

use std::io::{BufRead, Write};

use log::debug;

use crate::data::{weekday_name, Dataset};
use crate::processing::{self, QueryError};
use crate::utils::{AppError, AppResult};
use super::{
    format_currency, paint, render_ranking, render_records, Command, CommandTable, Flow, Tone,
    CUSTOMER_COLUMNS, DATE_COLUMNS,
};

/// The interactive explorer session
///
/// The shell only borrows the dataset; every command is a read-only query.
/// Query failures are reported and the menu is shown again, while I/O
/// failures on the console end the session. Output is plain unless colour
/// is switched on with [`Shell::with_color`].
pub struct Shell<'d, R, W> {
    dataset: &'d Dataset,
    commands: CommandTable<'d, R, W>,
    input: R,
    output: W,
    top_n: usize,
    color: bool,
}

impl<'d, R: BufRead, W: Write> Shell<'d, R, W> {
    /// Create a shell; fails if the command table is incomplete
    pub fn new(dataset: &'d Dataset, input: R, output: W, top_n: usize) -> AppResult<Self> {
        Ok(Shell {
            dataset,
            commands: CommandTable::standard()?,
            input,
            output,
            top_n,
            color: false,
        })
    }

    /// Colour headings, prompts and errors with ANSI escapes
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            self.print_menu()?;

            let line = match self.prompt("Choose an option: ")? {
                Some(line) => line,
                None => {
                    writeln!(self.output)?;
                    return Ok(());
                }
            };

            let handler = match line.parse::<Command>() {
                Ok(command) => {
                    debug!("Running command {:?}", command);
                    self.commands.handler(command)
                }
                Err(_) => None,
            };

            let handler = match handler {
                Some(handler) => handler,
                None => {
                    self.say(Tone::Error, "Invalid choice, please try again.")?;
                    continue;
                }
            };

            match handler(self) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(AppError::Query(err)) => self.report(&err)?,
                Err(err) => return Err(err),
            }
        }
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_menu(&mut self) -> AppResult<()> {
        writeln!(self.output)?;
        self.say(Tone::MenuTitle, "--- Menu ---")?;
        for command in Command::ALL {
            self.say(Tone::MenuEntry, &format!("{}. {}", command.key(), command.label()))?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Write one line in the colour of `tone`
    fn say(&mut self, tone: Tone, text: &str) -> AppResult<()> {
        writeln!(self.output, "{}", paint(text, tone, self.color))?;
        Ok(())
    }

    /// Show a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", paint(message, Tone::Prompt, self.color))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &QueryError) -> AppResult<()> {
        self.say(Tone::Error, &err.to_string())
    }

    pub(crate) fn top_countries(&mut self) -> AppResult<Flow> {
        let rows = processing::top_countries(self.dataset, self.top_n)?;

        if rows.is_empty() {
            self.say(Tone::Error, "No orders in the dataset.")?;
        } else {
            let heading = format!("Top {} countries by number of unique orders:", self.top_n);
            self.say(Tone::Heading, &heading)?;
            writeln!(self.output, "{}", render_ranking(&rows))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn top_products(&mut self) -> AppResult<Flow> {
        let rows = processing::top_products(self.dataset, self.top_n)?;

        if rows.is_empty() {
            self.say(Tone::Error, "No products in the dataset.")?;
        } else {
            let heading = format!("Top {} products by quantity sold:", self.top_n);
            self.say(Tone::Heading, &heading)?;
            writeln!(self.output, "{}", render_ranking(&rows))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn top_brands(&mut self) -> AppResult<Flow> {
        let rows: Vec<(String, String)> = processing::top_brands(self.dataset, self.top_n)?
            .into_iter()
            .map(|(brand, price)| (brand, format_currency(price)))
            .collect();

        if rows.is_empty() {
            self.say(Tone::Error, "No brands in the dataset.")?;
        } else {
            let heading = format!("Top {} brands by average unit price:", self.top_n);
            self.say(Tone::Heading, &heading)?;
            writeln!(self.output, "{}", render_ranking(&rows))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn search_product(&mut self) -> AppResult<Flow> {
        self.say(Tone::Submenu, "Search product by:")?;
        self.say(Tone::Submenu, "1. StockCode (ID)")?;
        self.say(Tone::Submenu, "2. Product Name")?;

        let choice = match self.prompt("Your choice: ")? {
            Some(choice) => choice,
            None => return Ok(Flow::Exit),
        };

        match choice.as_str() {
            "1" => {
                let code = match self.prompt("Enter StockCode: ")? {
                    Some(code) => code,
                    None => return Ok(Flow::Exit),
                };
                let names = processing::search_by_code(self.dataset, &code);
                self.print_list(&names, "Product name(s):", "Product not found.")?;
            }
            "2" => {
                let fragment =
                    match self.prompt("Enter part or full product name (case insensitive): ")? {
                        Some(fragment) => fragment,
                        None => return Ok(Flow::Exit),
                    };
                let codes = processing::search_by_name(self.dataset, &fragment);
                self.print_list(&codes, "Matching StockCodes:", "No product matches found.")?;
            }
            _ => self.say(Tone::Error, "Invalid choice.")?,
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn customer_orders(&mut self) -> AppResult<Flow> {
        let text = match self.prompt("Enter CustomerID: ")? {
            Some(text) => text,
            None => return Ok(Flow::Exit),
        };

        let customer_id = processing::parse_customer_id(&text)?;
        let orders = processing::orders_for_customer(self.dataset, customer_id);

        if orders.is_empty() {
            self.say(Tone::Error, "No orders found for this CustomerID.")?;
        } else {
            self.say(Tone::Heading, &format!("Orders for CustomerID {}:", customer_id))?;
            writeln!(self.output, "{}", render_records(&orders, &CUSTOMER_COLUMNS))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn orders_by_date(&mut self) -> AppResult<Flow> {
        let text = match self.prompt("Enter date (YYYY-MM-DD): ")? {
            Some(text) => text,
            None => return Ok(Flow::Exit),
        };

        let date = processing::parse_query_date(&text)?;
        let orders = processing::orders_on(self.dataset, date);

        // Echo the date as typed
        if orders.is_empty() {
            self.say(Tone::Error, &format!("No orders found on {}.", text))?;
        } else {
            self.say(Tone::Heading, &format!("Orders on {}:", text))?;
            writeln!(self.output, "{}", render_records(&orders, &DATE_COLUMNS))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn total_revenue(&mut self) -> AppResult<Flow> {
        let total = processing::total_revenue(self.dataset)?;
        let line = format!("Total revenue of the store: {}", format_currency(total));
        self.say(Tone::Heading, &line)?;
        Ok(Flow::Continue)
    }

    pub(crate) fn weekday_frequency(&mut self) -> AppResult<Flow> {
        let rows: Vec<(&str, usize)> = processing::orders_by_weekday(self.dataset)?
            .into_iter()
            .map(|(day, count)| (weekday_name(day), count))
            .collect();

        if rows.is_empty() {
            self.say(Tone::Error, "No orders in the dataset.")?;
        } else {
            self.say(Tone::Heading, "Number of unique orders by day of the week:")?;
            writeln!(self.output, "{}", render_ranking(&rows))?;
        }

        Ok(Flow::Continue)
    }

    pub(crate) fn exit(&mut self) -> AppResult<Flow> {
        self.say(Tone::Farewell, "Exiting... Goodbye!")?;
        Ok(Flow::Exit)
    }

    fn print_list(&mut self, items: &[String], heading: &str, empty: &str) -> AppResult<()> {
        if items.is_empty() {
            self.say(Tone::Error, empty)?;
        } else {
            self.say(Tone::Heading, heading)?;
            for item in items {
                writeln!(self.output, "{}", item)?;
            }
        }
        Ok(())
    }
}
