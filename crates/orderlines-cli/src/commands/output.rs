//! Rendering extracted records as JSON, CSV or a terminal table.

use console::{measure_text_width, pad_str, Alignment, Style};

use orderlines_core::extract::Layout;
use orderlines_core::models::item::ItemRecord;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// One CSV table per layout
    Csv,
    /// Aligned table per layout
    Table,
}

impl OutputFormat {
    /// File extension used when writing to a directory.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Table => "txt",
        }
    }
}

/// Render records. `styled` adds terminal colors to tables; pass `false`
/// for anything written to a file.
pub fn render(
    records: &[ItemRecord],
    format: OutputFormat,
    styled: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Table => Ok(format_table(records, styled)),
    }
}

/// Records grouped by layout, groups in order of first appearance.
fn group_by_layout(records: &[ItemRecord]) -> Vec<(Layout, Vec<&ItemRecord>)> {
    let mut groups: Vec<(Layout, Vec<&ItemRecord>)> = Vec::new();

    for record in records {
        let layout = record.layout();
        match groups.iter_mut().find(|(l, _)| *l == layout) {
            Some((_, group)) => group.push(record),
            None => groups.push((layout, vec![record])),
        }
    }

    groups
}

fn format_csv(records: &[ItemRecord]) -> anyhow::Result<String> {
    let mut sections = Vec::new();

    for (_, group) in group_by_layout(records) {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(group[0].columns())?;
        for record in group {
            wtr.write_record(record.cells())?;
        }
        sections.push(String::from_utf8(wtr.into_inner()?)?);
    }

    Ok(sections.join("\n"))
}

fn format_table(records: &[ItemRecord], styled: bool) -> String {
    let paint = |style: Style| if styled { style } else { style.force_styling(false) };
    let title_style = paint(Style::new().bold());
    let header_style = paint(Style::new().cyan());

    if records.is_empty() {
        return format!("{}\n", paint(Style::new().yellow()).apply_to("No line items found."));
    }

    let mut output = String::new();

    for (layout, group) in group_by_layout(records) {
        let columns = group[0].columns();
        let rows: Vec<Vec<String>> = group.iter().map(|r| r.cells()).collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(column.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let title = format!(
            "{} ({}) - {} item{}",
            layout,
            layout.vendor(),
            rows.len(),
            if rows.len() == 1 { "" } else { "s" }
        );
        output.push_str(&format!("{}\n", title_style.apply_to(title)));

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| {
                header_style
                    .apply_to(pad_str(column, *width, Alignment::Left, None))
                    .to_string()
            })
            .collect();
        output.push_str(header.join("  ").trim_end());
        output.push('\n');

        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
                .collect();
            output.push_str(cells.join("  ").trim_end());
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
