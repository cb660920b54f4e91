// Text rendering of query results
// Author: Gabriel Demetrios Lafis

use std::fmt::Display;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::data::Record;

/// Columns that can appear in a record listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    InvoiceNo,
    StockCode,
    Description,
    Quantity,
    InvoiceDate,
    UnitPrice,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::InvoiceNo => "InvoiceNo",
            Column::StockCode => "StockCode",
            Column::Description => "Description",
            Column::Quantity => "Quantity",
            Column::InvoiceDate => "InvoiceDate",
            Column::UnitPrice => "UnitPrice",
        }
    }

    fn numeric(self) -> bool {
        matches!(self, Column::Quantity | Column::UnitPrice)
    }

    fn cell(self, record: &Record) -> String {
        match self {
            Column::InvoiceNo => record.invoice_no.clone(),
            Column::StockCode => record.stock_code.clone(),
            Column::Description => record.description.clone(),
            Column::Quantity => record.quantity.to_string(),
            Column::InvoiceDate => record.invoice_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            Column::UnitPrice => record.unit_price.to_string(),
        }
    }
}

/// Columns shown for a customer's orders
pub const CUSTOMER_COLUMNS: [Column; 6] = [
    Column::InvoiceNo,
    Column::StockCode,
    Column::Description,
    Column::Quantity,
    Column::InvoiceDate,
    Column::UnitPrice,
];

/// Columns shown for a day's orders
pub const DATE_COLUMNS: [Column; 5] = [
    Column::InvoiceNo,
    Column::StockCode,
    Column::Description,
    Column::Quantity,
    Column::UnitPrice,
];

/// Render records as an aligned text table with a header line
pub fn render_records(records: &[&Record], columns: &[Column]) -> String {
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|record| columns.iter().map(|c| c.cell(record)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(render_line(
        columns.iter().map(|c| c.header().to_string()),
        columns,
        &widths,
    ));
    for row in cells {
        lines.push(render_line(row.into_iter(), columns, &widths));
    }

    lines.join("\n")
}

fn render_line<I: Iterator<Item = String>>(cells: I, columns: &[Column], widths: &[usize]) -> String {
    cells
        .zip(columns.iter().zip(widths))
        .map(|(cell, (column, &width))| {
            if column.numeric() {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render `(label, value)` pairs as two aligned columns
pub fn render_ranking<K: Display, V: Display>(rows: &[(K, V)]) -> String {
    let labels: Vec<String> = rows.iter().map(|(k, _)| k.to_string()).collect();
    let values: Vec<String> = rows.iter().map(|(_, v)| v.to_string()).collect();

    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);

    labels
        .iter()
        .zip(&values)
        .map(|(label, value)| {
            format!(
                "{:<lw$}  {:>vw$}",
                label,
                value,
                lw = label_width,
                vw = value_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two decimals with thousands separators, e.g. `1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Colour roles of shell output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    MenuTitle,
    MenuEntry,
    Heading,
    Submenu,
    Error,
    Prompt,
    Farewell,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::MenuTitle => "\x1B[93m",
            Tone::MenuEntry => "\x1B[96m",
            Tone::Heading => "\x1B[92m",
            Tone::Submenu => "\x1B[95m",
            Tone::Error => "\x1B[31m",
            Tone::Prompt => "\x1B[94m",
            Tone::Farewell => "\x1B[33m",
        }
    }
}

/// Wrap `text` in the ANSI colour of `tone`; unchanged when `enabled` is false
pub fn paint(text: &str, tone: Tone, enabled: bool) -> String {
    if enabled {
        format!("{}{}\x1B[0m", tone.ansi(), text)
    } else {
        text.to_string()
    }
}
