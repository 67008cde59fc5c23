//! Headless text report for `--print-summary`

use crate::Settings;
use kml_analyzer_lib::presentation::{EMPTY_DETAIL_MESSAGE, EMPTY_SUMMARY_MESSAGE};
use kml_analyzer_lib::LoadedDocument;
use std::fmt::Write;
use std::process::ExitCode;

/// Load `--kml-file`, print both tables to stdout and report success
pub fn print_summary(settings: &Settings) -> ExitCode {
    let Some(path) = &settings.kml_file else {
        eprintln!("--print-summary needs --kml-file");
        return ExitCode::FAILURE;
    };

    match LoadedDocument::load(path) {
        Ok(document) => {
            print!("{}", render_report(&document));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {}", path.display(), e);
            eprintln!("{}", crate::app::state::error_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// Summary and detail tables as aligned plain text
pub fn render_report(document: &LoadedDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "KML Element Summary ({})", document.source_name());
    let summary: Vec<[String; 2]> = document
        .summary_rows()
        .into_iter()
        .map(|row| [row.label.to_string(), row.count.to_string()])
        .collect();
    write_table(&mut out, ["Element Type", "Count"], &summary, EMPTY_SUMMARY_MESSAGE);

    out.push('\n');

    let _ = writeln!(out, "Detailed KML Element Information");
    let detail: Vec<[String; 3]> = document
        .records()
        .iter()
        .map(|record| {
            [
                record.name.clone(),
                record.kind.label().to_string(),
                record.length.to_string(),
            ]
        })
        .collect();
    write_table(
        &mut out,
        ["Name", "Type", "Length (km)"],
        &detail,
        EMPTY_DETAIL_MESSAGE,
    );

    out
}

fn write_table<const N: usize>(
    out: &mut String,
    header: [&str; N],
    rows: &[[String; N]],
    empty_message: &str,
) {
    if rows.is_empty() {
        let _ = writeln!(out, "  {}", empty_message);
        return;
    }

    let mut widths = header.map(|title| title.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut write_row = |cells: [&str; N]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "  {}", line.trim_end());
    };

    write_row(header);
    for row in rows {
        write_row(row.each_ref().map(String::as_str));
    }
}
