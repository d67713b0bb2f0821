//! Wide price CSV loading.
//!
//! ```text
//! date,SPY,XLK,XLE
//! 2024-01-02,472.65,192.10,83.41
//! 2024-01-03,468.79,,82.90
//! ```
//!
//! The first column holds `YYYY-MM-DD` dates; every other column is one
//! instrument. Empty cells are missing observations. Rows may come in any
//! order; each column is sorted by date before validation.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use rrg_core::data::InMemoryProvider;
use rrg_core::domain::PriceSeries;

pub fn load_wide_csv(path: &Path) -> Result<InMemoryProvider> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open price file {}", path.display()))?;
    read_wide_csv(file, &format!("csv:{}", path.display()))
}

pub fn read_wide_csv<R: Read>(reader: R, name: &str) -> Result<InMemoryProvider> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        bail!("price file needs a date column and at least one instrument column");
    }
    let symbols: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    for (i, symbol) in symbols.iter().enumerate() {
        if symbol.is_empty() {
            bail!("column {} has an empty header", i + 2);
        }
        if symbols[..i].contains(symbol) {
            bail!("duplicate column '{symbol}' in price file header");
        }
    }
    let mut columns: Vec<Vec<(NaiveDate, f64)>> = vec![Vec::new(); symbols.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let line = row + 2;
        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("line {line}: bad date '{raw_date}'"))?;

        for (col, cell) in record.iter().skip(1).enumerate().take(symbols.len()) {
            if cell.is_empty() {
                continue;
            }
            let price: f64 = cell
                .parse()
                .with_context(|| format!("line {line}: bad price '{cell}' for {}", symbols[col]))?;
            columns[col].push((date, price));
        }
    }

    let mut provider = InMemoryProvider::new(name);
    for (symbol, mut pairs) in symbols.into_iter().zip(columns) {
        pairs.sort_by_key(|(date, _)| *date);
        let count = pairs.len();
        let series = PriceSeries::from_pairs(symbol.as_str(), pairs)
            .with_context(|| format!("invalid series for {symbol}"))?;
        debug!(%symbol, observations = count, "series loaded");
        provider.insert(series);
    }

    Ok(provider)
}
