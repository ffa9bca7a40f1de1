//! Delimited export of metrics and raw series
//!
//! Files start with a UTF-8 byte order mark so spreadsheet applications
//! detect the encoding. Column order of the metrics export is fixed:
//!
//! keyword, growth rate, recent interest, diagnosis, rationale, caution,
//! volatility, action, target audience, positioning, risk note, category

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analytics::correlation::{moving_average, normalize_table};
use crate::analytics::growth::GrowthMetricsRow;
use crate::error::Result;
use crate::i18n::label;
use crate::models::TimeSeriesTable;

/// UTF-8 byte order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Default file name of the metrics export
pub const METRICS_FILE_NAME: &str = "edutrend_analysis.csv";

/// Default file name of the raw series export
pub const RAW_FILE_NAME: &str = "edutrend_raw.csv";

const METRICS_COLUMNS: &[&str] = &[
    "keyword",
    "growth_rate",
    "recent_interest",
    "diagnosis",
    "rationale",
    "caution",
    "volatility",
    "action",
    "audience",
    "positioning",
    "risk_note",
    "category",
];

/// Transformation applied to raw series before export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawTransform {
    #[default]
    Raw,
    /// Min-max scaled to 0-100 per keyword
    Normalized,
    /// Trailing moving average; leading cells are empty
    Smoothed(usize),
}

/// Localized metrics header
pub fn metrics_header(locale: &str) -> Vec<String> {
    METRICS_COLUMNS
        .iter()
        .map(|column| label(&format!("export.header.{column}"), locale))
        .collect()
}

fn metrics_record(row: &GrowthMetricsRow, locale: &str) -> Vec<String> {
    let growth = if row.is_low_base() {
        "N/A".to_string()
    } else {
        format!("{:.1}", row.growth_rate)
    };

    vec![
        row.keyword.clone(),
        growth,
        format!("{:.1}", row.recent_interest),
        row.diagnosis.label(locale),
        row.diagnosis.rationale(locale),
        row.diagnosis.caution(locale),
        row.volatility.label(locale),
        row.action.label(locale),
        row.planning.audience_label(locale),
        row.planning.positioning_label(locale),
        row.action.risk_note(locale),
        label(row.category.label_key(), locale),
    ]
}

/// Write the metrics table (without BOM) to any writer
pub fn write_metrics_csv<W: Write>(
    writer: W,
    rows: &[GrowthMetricsRow],
    locale: &str,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(metrics_header(locale))?;
    for row in rows {
        csv_writer.write_record(metrics_record(row, locale))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the raw series table (without BOM) to any writer
pub fn write_raw_csv<W: Write>(
    writer: W,
    table: &TimeSeriesTable,
    transform: RawTransform,
) -> Result<()> {
    let columns: Vec<Vec<Option<f64>>> = match transform {
        RawTransform::Raw => table
            .columns()
            .iter()
            .map(|c| c.values.iter().copied().map(Some).collect())
            .collect(),
        RawTransform::Normalized => normalize_table(table)
            .columns()
            .iter()
            .map(|c| c.values.iter().copied().map(Some).collect())
            .collect(),
        RawTransform::Smoothed(window) => table
            .columns()
            .iter()
            .map(|c| moving_average(&c.values, window))
            .collect::<std::result::Result<_, _>>()?,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(table.keywords().map(str::to_string));
    csv_writer.write_record(&header)?;

    for (i, date) in table.dates().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        for column in &columns {
            record.push(match column[i] {
                Some(value) => format!("{value:.2}"),
                None => String::new(),
            });
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn create_with_bom(path: &Path) -> Result<BufWriter<File>> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(UTF8_BOM)?;
    Ok(writer)
}

/// Export growth metrics to a BOM-prefixed CSV file
pub fn export_metrics_csv(path: &Path, rows: &[GrowthMetricsRow], locale: &str) -> Result<()> {
    let writer = create_with_bom(path)?;
    write_metrics_csv(writer, rows, locale)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported metrics");
    Ok(())
}

/// Export raw series to a BOM-prefixed CSV file
pub fn export_raw_csv(path: &Path, table: &TimeSeriesTable, transform: RawTransform) -> Result<()> {
    let writer = create_with_bom(path)?;
    write_raw_csv(writer, table, transform)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        keywords = table.keyword_count(),
        "Exported raw series"
    );
    Ok(())
}
