// Interactive shell, command table and rendering tests
// Author: Gabriel Demetrios Lafis

use std::io::{Cursor, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use retail_explorer::{
    cli::{format_currency, paint, Command, CommandTable, Flow, Handler, Tone},
    data::{CsvSource, Dataset},
    processing::{load_dataset, QueryError},
    utils::AppResult,
    Shell,
};

type TestShell<'d> = Shell<'d, Cursor<&'static [u8]>, Vec<u8>>;

fn fixture(with_brand: bool) -> Dataset {
    let mut file = NamedTempFile::new().unwrap();
    let brand_header = if with_brand { ",Brand" } else { "" };
    let brand = if with_brand { ",Acme" } else { "" };

    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country{}",
        brand_header
    )
    .unwrap();
    writeln!(file, "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01 08:26:00,2.55,17850,United Kingdom{}", brand).unwrap();
    writeln!(file, "536366,22633,HAND WARMER UNION JACK,600,2010-12-01 08:28:00,1.85,17850,United Kingdom{}", brand).unwrap();
    writeln!(file, "536367,84406B,CREAM CUPID HEARTS COAT HANGER,8,2010-12-02 08:34:00,2.75,13047,France{}", brand).unwrap();

    load_dataset(&CsvSource::new(file.path(), ','), &[]).unwrap()
}

/// Feed `input` to a shell and return everything it printed
fn run_shell(dataset: &Dataset, input: &'static str) -> String {
    let mut shell: TestShell<'_> =
        Shell::new(dataset, Cursor::new(input.as_bytes()), Vec::new(), 5).unwrap();
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn test_exit_command() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "9\n");

    assert!(output.contains("--- Menu ---"));
    assert!(output.contains("9. Exit"));
    assert!(output.contains("Exiting... Goodbye!"));
}

#[test]
fn test_end_of_input_ends_session() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "");

    assert!(output.contains("Choose an option: "));
    assert!(!output.contains("Goodbye"));
}

#[test]
fn test_invalid_choice_reprompts() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "x\n10\n9\n");

    assert_eq!(output.matches("Invalid choice, please try again.").count(), 2);
    assert_eq!(output.matches("--- Menu ---").count(), 3);
}

#[test]
fn test_total_revenue_command() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "7\n9\n");

    // 15.30 + 1110.00 + 22.00
    assert!(output.contains("Total revenue of the store: 1,147.30"));
}

#[test]
fn test_top_countries_command() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "1\n9\n");

    assert!(output.contains("Top 5 countries by number of unique orders:"));
    assert!(output.contains("United Kingdom  2"));
    assert!(output.contains("France          1"));
}

#[test]
fn test_brand_unavailable_is_recovered() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "3\n7\n9\n");

    assert!(output.contains("Brand information is not available in the dataset."));
    assert!(output.contains("Total revenue of the store"));
}

#[test]
fn test_brand_ranking() {
    let dataset = fixture(true);
    let output = run_shell(&dataset, "3\n9\n");

    assert!(output.contains("Top 5 brands by average unit price:"));
    assert!(output.contains("Acme  2.38"));
}

#[test]
fn test_search_commands() {
    let dataset = fixture(false);

    let by_code = run_shell(&dataset, "4\n1\n85123A\n9\n");
    assert!(by_code.contains("Product name(s):\nWHITE HANGING HEART T-LIGHT HOLDER"));

    let by_name = run_shell(&dataset, "4\n2\nunion\n9\n");
    assert!(by_name.contains("Matching StockCodes:\n22633"));

    let missing = run_shell(&dataset, "4\n1\nNOPE\n4\n2\nteapot\n9\n");
    assert!(missing.contains("Product not found."));
    assert!(missing.contains("No product matches found."));

    let invalid = run_shell(&dataset, "4\n3\n9\n");
    assert!(invalid.contains("Invalid choice.\n"));
}

#[test]
fn test_customer_orders_command() {
    let dataset = fixture(false);

    let found = run_shell(&dataset, "5\n17850\n9\n");
    assert!(found.contains("Orders for CustomerID 17850:"));
    assert!(found.contains("InvoiceNo  StockCode"));
    assert!(found.contains("2010-12-01 08:28:00"));

    let none = run_shell(&dataset, "5\n999\n9\n");
    assert!(none.contains("No orders found for this CustomerID."));

    let invalid = run_shell(&dataset, "5\nabc\n9\n");
    assert!(invalid.contains("Invalid input: 'abc' is not a valid CustomerID"));
    assert!(invalid.contains("Exiting... Goodbye!"));
}

#[test]
fn test_orders_by_date_command() {
    let dataset = fixture(false);

    let found = run_shell(&dataset, "6\n2010-12-02\n9\n");
    assert!(found.contains("Orders on 2010-12-02:"));
    assert!(found.contains("CREAM CUPID HEARTS COAT HANGER"));

    let none = run_shell(&dataset, "6\n2011-01-01\n9\n");
    assert!(none.contains("No orders found on 2011-01-01."));

    let invalid = run_shell(&dataset, "6\n2010/12/02\n9\n");
    assert!(invalid.contains("Invalid input: '2010/12/02' is not a date in YYYY-MM-DD format"));

    // The date is echoed as typed
    let short = run_shell(&dataset, "6\n2010-12-2\n6\n2010-12-5\n9\n");
    assert!(short.contains("Orders on 2010-12-2:"));
    assert!(short.contains("No orders found on 2010-12-5."));
}

#[test]
fn test_weekday_command() {
    let dataset = fixture(false);
    let output = run_shell(&dataset, "8\n9\n");

    assert!(output.contains("Number of unique orders by day of the week:"));
    assert!(output.contains("Wednesday  2"));
    assert!(output.contains("Thursday   1"));
}

#[test]
fn test_command_parsing() {
    assert_eq!(Command::from_str("1"), Ok(Command::TopCountries));
    assert_eq!(Command::from_str(" 9 "), Ok(Command::Exit));
    assert!(matches!(Command::from_str("10"), Err(QueryError::InvalidInput(_))));
    assert!(matches!(Command::from_str(""), Err(QueryError::InvalidInput(_))));

    let keys: Vec<&str> = Command::ALL.iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
}

fn noop(_: &mut TestShell<'_>) -> AppResult<Flow> {
    Ok(Flow::Continue)
}

fn bindings<'d>() -> Vec<(Command, Handler<'d, Cursor<&'static [u8]>, Vec<u8>>)> {
    Command::ALL
        .iter()
        .map(|&command| (command, noop as Handler<'d, Cursor<&'static [u8]>, Vec<u8>>))
        .collect()
}

#[test]
fn test_command_table_validation() {
    assert!(CommandTable::new(bindings()).is_ok());

    let mut duplicated = bindings();
    duplicated.push(duplicated[0]);
    assert!(CommandTable::new(duplicated).is_err());

    let mut incomplete = bindings();
    incomplete.pop();
    assert!(CommandTable::new(incomplete).is_err());

    assert!(CommandTable::<Cursor<&'static [u8]>, Vec<u8>>::standard().is_ok());
}

#[test]
fn test_format_currency() {
    assert_eq!(format_currency(Decimal::new(123450, 2)), "1,234.50");
    assert_eq!(format_currency(Decimal::ZERO), "0.00");
    assert_eq!(format_currency(Decimal::new(1234567891, 3)), "1,234,567.89");
    assert_eq!(format_currency(Decimal::new(-12345, 1)), "-1,234.50");
    assert_eq!(format_currency(Decimal::new(999, 0)), "999.00");
    assert_eq!(format_currency(Decimal::new(1005, 3)), "1.01");
}

#[test]
fn test_overflow_is_recovered() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country"
    )
    .unwrap();
    for invoice in 1..=2 {
        writeln!(
            file,
            "{},A1,BULK ORDER,9000000000000000000,2021-01-05 09:00:00,8000000000,100,UK",
            invoice
        )
        .unwrap();
    }
    let dataset = load_dataset(&CsvSource::new(file.path(), ','), &[]).unwrap();

    let output = run_shell(&dataset, "7\n2\n1\n9\n");
    assert_eq!(output.matches("The sum is too large to compute.").count(), 2);
    assert!(output.contains("UK  2"));
    assert!(output.contains("Exiting... Goodbye!"));
}

#[test]
fn test_colored_output() {
    let dataset = fixture(false);
    let mut shell: TestShell<'_> =
        Shell::new(&dataset, Cursor::new("7\nx\n9\n".as_bytes()), Vec::new(), 5)
            .unwrap()
            .with_color(true);
    shell.run().unwrap();
    let output = String::from_utf8(shell.into_output()).unwrap();

    assert!(output.contains("\x1B[93m--- Menu ---\x1B[0m"));
    assert!(output.contains("\x1B[96m9. Exit\x1B[0m"));
    assert!(output.contains("\x1B[94mChoose an option: \x1B[0m"));
    assert!(output.contains("\x1B[92mTotal revenue of the store: 1,147.30\x1B[0m"));
    assert!(output.contains("\x1B[31mInvalid choice, please try again.\x1B[0m"));
    assert!(output.contains("\x1B[33mExiting... Goodbye!\x1B[0m"));

    assert!(!run_shell(&dataset, "7\n9\n").contains('\x1B'));
    assert_eq!(paint("Product not found.", Tone::Error, false), "Product not found.");
}
