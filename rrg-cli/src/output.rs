//! Report rendering: human table, JSON, or signal CSV.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use rrg_core::domain::Signal;
use rrg_core::{CycleReport, InstrumentFailure, RunReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// What gets rendered: every cycle, or only the most recent one.
#[derive(Debug, Serialize)]
struct View<'a> {
    config_fingerprint: &'a str,
    method: &'a str,
    benchmark: &'a str,
    cycles: &'a [CycleReport],
    failures: &'a [InstrumentFailure],
}

impl<'a> View<'a> {
    fn new(report: &'a RunReport, latest: bool) -> Self {
        let cycles = if latest {
            let start = report.cycles.len().saturating_sub(1);
            &report.cycles[start..]
        } else {
            &report.cycles[..]
        };
        Self {
            config_fingerprint: &report.config_fingerprint,
            method: &report.method,
            benchmark: report.benchmark.as_str(),
            cycles,
            failures: &report.failures,
        }
    }

    fn signals(&self) -> impl Iterator<Item = &'a Signal> {
        let cycles: &'a [CycleReport] = self.cycles;
        cycles.iter().flat_map(|c| c.signals.iter())
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &RunReport,
    format: OutputFormat,
    latest: bool,
) -> Result<()> {
    let view = View::new(report, latest);
    match format {
        OutputFormat::Table => write_table(out, &view),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for signal in view.signals() {
                writer.serialize(signal)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(out: &mut W, view: &View<'_>) -> Result<()> {
    writeln!(
        out,
        "benchmark {}  method {}  config {}",
        view.benchmark,
        view.method,
        &view.config_fingerprint[..view.config_fingerprint.len().min(12)]
    )?;

    for cycle in view.cycles {
        writeln!(out)?;
        writeln!(out, "{}", cycle.date)?;
        writeln!(
            out,
            "  {:<8} {:>9} {:>9}  {:<10} {:<22} {:<7} {:<10} signals",
            "symbol", "rs_ratio", "rs_mom", "quadrant", "transition", "grade", "heading"
        )?;
        for rotation in &cycle.rotations {
            let transition = rotation
                .transition
                .filter(|t| t.is_rotation())
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".into());
            let heading = rotation
                .heading
                .map(|h| h.toward.to_string())
                .unwrap_or_else(|| "-".into());
            let signals: Vec<String> = cycle
                .signals
                .iter()
                .filter(|s| s.instrument == rotation.instrument)
                .map(|s| format!("{}({})", s.kind, s.rule))
                .collect();

            writeln!(
                out,
                "  {:<8} {:>9.4} {:>9.4}  {:<10} {:<22} {:<7} {:<10} {}",
                rotation.instrument.as_str(),
                rotation.point.rs_ratio,
                rotation.point.rs_momentum,
                rotation.quadrant.as_str(),
                transition,
                rotation.strength.to_string(),
                heading,
                signals.join(" ")
            )?;
        }
    }

    if !view.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "failures")?;
        for failure in view.failures {
            writeln!(
                out,
                "  {:<8} {:?}: {}",
                failure.instrument.as_str(),
                failure.category,
                failure.message
            )?;
        }
    }

    Ok(())
}
