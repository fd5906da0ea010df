//! Writes a [`ResultSet`] out as a paginated text report or as JSON.

use crate::scheduler::{ResultSet, Workload};
use anyhow::{Context, Result};
use std::{fs, path::Path};

pub const REPORT_TITLE: &str = "CPU Scheduling Results";
pub const LINES_PER_PAGE: usize = 40;
const PAGE_BREAK: char = '\u{c}';

/// The report body, one entry per line, before pagination.
fn report_lines(results: &ResultSet, workload: Option<&Workload>) -> Vec<String> {
    let mut lines = vec![REPORT_TITLE.to_owned(), String::new()];

    if let Some(workload) = workload {
        lines.push("Generated Processes:".to_owned());
        lines.extend(workload.processes().iter().map(|process| {
            format!(
                "Process {}: Burst Time = {}",
                process.pid(),
                process.burst_time()
            )
        }));
        lines.push(String::new());
    }

    for (algorithm, records) in results.iter() {
        lines.push(format!("{algorithm} Scheduling Results:"));
        lines.extend(records.iter().map(|record| {
            format!(
                "Process {}: Completion Time = {}",
                record.process_id, record.completion_time
            )
        }));
        if let Some(average) = results.average_completion_time(algorithm) {
            lines.push(format!("Average Completion Time = {average:.2}"));
        }
        lines.push(String::new());
    }

    lines
}

/// Splits the report into pages of at most [`LINES_PER_PAGE`] body lines, each
/// followed by a `Page n of m` footer.
pub fn paginate(lines: &[String]) -> Vec<String> {
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };
    let total = pages.len();

    pages
        .into_iter()
        .enumerate()
        .map(|(index, body)| {
            let mut page = String::new();
            for line in body {
                page.push_str(line);
                page.push('\n');
            }
            page.push_str(&format!("\nPage {} of {}\n", index + 1, total));
            page
        })
        .collect()
}

pub fn render_report(results: &ResultSet, workload: Option<&Workload>) -> String {
    let pages = paginate(&report_lines(results, workload));
    pages.join(&PAGE_BREAK.to_string())
}

pub fn write_report(path: &Path, results: &ResultSet, workload: Option<&Workload>) -> Result<()> {
    fs::write(path, render_report(results, workload))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    log::info!("exported {} algorithms to {}", results.len(), path.display());
    Ok(())
}

pub fn write_json(path: &Path, results: &ResultSet) -> Result<()> {
    let json = serde_json::to_string_pretty(results).context("failed to serialize results")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    log::info!("exported results as JSON to {}", path.display());
    Ok(())
}
