//! Summary rendering.

use core::str::FromStr;
use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockkeep_inventory::InventorySummary;

use crate::error::ConsoleError;

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// How the summary report is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown report format {0:?} (expected \"text\" or \"json\")")]
pub struct ParseReportFormatError(pub String);

impl FromStr for ReportFormat {
    type Err = ParseReportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ParseReportFormatError(other.to_owned())),
        }
    }
}

/// Currency amount formatting: `.` groups thousands, `,` separates
/// decimals, halves round to even.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub fraction_digits: u32,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_owned(),
            fraction_digits: 0,
        }
    }
}

impl MoneyFormat {
    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(self.fraction_digits);

        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut out = String::new();
        if rounded < Decimal::ZERO {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(integer));
        if !fraction.is_empty() {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Write the summary in `format`.
pub fn render<W: Write>(
    summary: &InventorySummary,
    format: ReportFormat,
    money: &MoneyFormat,
    out: &mut W,
) -> Result<(), ConsoleError> {
    match format {
        ReportFormat::Text => render_text(summary, money, out)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn render_text<W: Write>(summary: &InventorySummary, money: &MoneyFormat, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== INVENTORY SUMMARY ===")?;
    writeln!(out, "Distinct products: {}", summary.product_count())?;
    writeln!(out, "Total items: {}", summary.total_items())?;
    writeln!(out, "Total value: {}", money.format(summary.total_value()))?;

    writeln!(out)?;
    writeln!(out, "Top by stock:")?;
    for product in summary.top_by_stock() {
        writeln!(out, " - {product}")?;
    }

    writeln!(out)?;
    writeln!(out, "Low stock:")?;
    if summary.low_stock().is_empty() {
        writeln!(out, " - (none)")?;
    }
    for product in summary.low_stock() {
        writeln!(out, " - {product}")?;
    }
    writeln!(out, "==============================")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockkeep_products::{NewProduct, Product};

    fn prod(code: &str, price: Decimal, stock: i64) -> Product {
        Product::create(NewProduct::new(code, format!("Prod {code}")).price(price).stock(stock)).unwrap()
    }

    fn fixture() -> InventorySummary {
        InventorySummary::new(
            3,
            13,
            dec!(7200.00),
            vec![prod("R2", dec!(500), 10), prod("R1", dec!(1000), 2)],
            vec![prod("R3", dec!(200), 1)],
        )
    }

    #[test]
    fn money_groups_thousands_and_rounds() {
        let clp = MoneyFormat::default();
        assert_eq!(clp.format(dec!(7200.00)), "$7.200");
        assert_eq!(clp.format(dec!(0)), "$0");
        assert_eq!(clp.format(dec!(999)), "$999");
        assert_eq!(clp.format(dec!(1234567)), "$1.234.567");
        assert_eq!(clp.format(dec!(2.5)), "$2");
        assert_eq!(clp.format(dec!(3.5)), "$4");

        let usd = MoneyFormat {
            symbol: "US$".into(),
            fraction_digits: 2,
        };
        assert_eq!(usd.format(dec!(1234567.891)), "US$1.234.567,89");
        assert_eq!(usd.format(dec!(5)), "US$5,00");
        assert_eq!(usd.format(dec!(-1000.5)), "-US$1.000,50");
    }

    #[test]
    fn text_report_has_key_lines() {
        let mut out = Vec::new();
        render_text(&fixture(), &MoneyFormat::default(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("INVENTORY SUMMARY"));
        assert!(out.contains("Distinct products: 3"));
        assert!(out.contains("Total items: 13"));
        assert!(out.contains("Total value: $7.200"));
        assert!(out.contains("Top by stock:"));
        assert!(out.contains("Low stock:"));

        let top = out.find(" - R2").unwrap();
        let second = out.find(" - R1").unwrap();
        let low = out.find(" - R3").unwrap();
        assert!(top < second && second < low);
        assert!(!out.contains("(none)"));
    }

    #[test]
    fn text_report_placeholder_for_empty_low_stock() {
        let summary = InventorySummary::new(0, 0, Decimal::ZERO, Vec::new(), Vec::new());
        let mut out = Vec::new();
        render_text(&summary, &MoneyFormat::default(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains(" - (none)"));
    }

    #[test]
    fn json_report_serializes_summary() {
        let mut out = Vec::new();
        render(&fixture(), ReportFormat::Json, &MoneyFormat::default(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["product_count"], 3);
        assert_eq!(value["total_items"], 13);
        assert_eq!(value["total_value"], "7200.00");
        assert_eq!(value["top_by_stock"][0]["code"], "R2");
        assert_eq!(value["low_stock"][0]["code"], "R3");
    }

    #[test]
    fn report_format_parses() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        let err = "xml".parse::<ReportFormat>().unwrap_err();
        assert_eq!(err, ParseReportFormatError("xml".to_owned()));
        assert!(err.to_string().contains("\"text\" or \"json\""));
    }
}
