//! # Report Rendering
//!
//! Turns an [`AnalysisOutcome`] into a localized report, rendered as aligned
//! plain text or as JSON. The harmfulness scale and the reference table have
//! their own listings.

use crate::errors::AppResult;
use crate::harmfulness::{harmfulness_scale, SeverityLevel};
use crate::localization::LocalizationManager;
use crate::reference_table::{AdditiveRecord, ReferenceTable};
use crate::text_processing::AnalysisOutcome;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected text or json", other)),
        }
    }
}

/// Overall status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The reference table is empty, nothing can be identified
    NoReferenceData,
    NoInput,
    NoMatches,
    Matches,
}

impl ReportStatus {
    fn message_key(self) -> &'static str {
        match self {
            ReportStatus::NoReferenceData => "report-no-reference-data",
            ReportStatus::NoInput => "report-no-input",
            ReportStatus::NoMatches => "report-no-matches",
            ReportStatus::Matches => "report-found",
        }
    }
}

/// One matched additive with its tier details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub code: String,
    pub name: String,
    /// Tag as it appears in the reference table
    pub severity_level: String,
    /// Localized tier description, or the "unknown severity" message
    pub description: String,
    pub color: Option<String>,
    pub gauge_asset: Option<&'static str>,
}

impl ReportLine {
    fn from_record(record: &AdditiveRecord, language: &str, l10n: &LocalizationManager) -> Self {
        let severity = record.severity();
        Self {
            code: record.code.clone(),
            name: record.name.clone(),
            severity_level: record.severity_level.clone(),
            description: describe(severity, language, l10n),
            color: severity.map(SeverityLevel::color_hex),
            gauge_asset: severity.map(SeverityLevel::gauge_asset),
        }
    }
}

fn describe(severity: Option<SeverityLevel>, language: &str, l10n: &LocalizationManager) -> String {
    match severity {
        Some(level) => l10n.get_message_in_language(&level.message_key(), language, None),
        None => l10n.get_message_in_language("report-unknown-severity", language, None),
    }
}

/// Localized analysis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: ReportStatus,
    pub language: String,
    pub message: String,
    pub additives: Vec<ReportLine>,
}

impl Report {
    /// Build a report for one analysis against the given table
    pub fn build(
        outcome: &AnalysisOutcome,
        table: &ReferenceTable,
        language: &str,
        l10n: &LocalizationManager,
    ) -> Self {
        let status = match outcome {
            AnalysisOutcome::NoInput => ReportStatus::NoInput,
            _ if table.is_empty() => ReportStatus::NoReferenceData,
            AnalysisOutcome::NoMatches => ReportStatus::NoMatches,
            AnalysisOutcome::Matches(_) => ReportStatus::Matches,
        };

        let additives: Vec<ReportLine> = outcome
            .records()
            .iter()
            .map(|record| ReportLine::from_record(record, language, l10n))
            .collect();

        let count = additives.len().to_string();
        let message = l10n.get_message_with_args_in_language(
            status.message_key(),
            language,
            &[("count", count.as_str())],
        );

        Self {
            status,
            language: language.to_string(),
            message,
            additives,
        }
    }

    pub fn render(&self, format: OutputFormat, l10n: &LocalizationManager) -> AppResult<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text(l10n)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Aligned plain-text rendering
    pub fn render_text(&self, l10n: &LocalizationManager) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", l10n.get_message_in_language("report-title", &self.language, None));
        let _ = writeln!(out, "{}", self.message);

        if self.additives.is_empty() {
            return out;
        }

        let header = [
            l10n.get_message_in_language("report-header-code", &self.language, None),
            l10n.get_message_in_language("report-header-name", &self.language, None),
            l10n.get_message_in_language("report-header-severity", &self.language, None),
            l10n.get_message_in_language("report-header-description", &self.language, None),
        ];
        let rows: Vec<[String; 4]> = self
            .additives
            .iter()
            .map(|line| {
                [
                    line.code.clone(),
                    line.name.clone(),
                    line.severity_level.clone(),
                    line.description.clone(),
                ]
            })
            .collect();

        out.push('\n');
        write_table(&mut out, &header, &rows);
        out
    }
}

/// Localized listing of the seven harmfulness tiers
pub fn render_scale(language: &str, format: OutputFormat, l10n: &LocalizationManager) -> AppResult<String> {
    #[derive(Serialize)]
    struct ScaleLine {
        severity_level: SeverityLevel,
        description: String,
        color: String,
        gauge_asset: &'static str,
    }

    let lines: Vec<ScaleLine> = harmfulness_scale()
        .iter()
        .map(|tier| ScaleLine {
            severity_level: tier.severity_level,
            description: describe(Some(tier.severity_level), language, l10n),
            color: tier.color_hex(),
            gauge_asset: tier.gauge_asset(),
        })
        .collect();

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&lines)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", l10n.get_message_in_language("scale-title", language, None));
    out.push('\n');
    let header = [
        l10n.get_message_in_language("report-header-severity", language, None),
        l10n.get_message_in_language("report-header-description", language, None),
    ];
    let rows: Vec<[String; 2]> = lines
        .iter()
        .map(|line| [line.severity_level.to_string(), line.description.clone()])
        .collect();
    write_table(&mut out, &header, &rows);
    Ok(out)
}

/// Listing of every record in a reference table
pub fn render_table(
    table: &ReferenceTable,
    language: &str,
    format: OutputFormat,
    l10n: &LocalizationManager,
) -> AppResult<String> {
    if format == OutputFormat::Json {
        let records: Vec<&AdditiveRecord> = table.records().collect();
        return Ok(serde_json::to_string_pretty(&records)?);
    }

    let count = table.len().to_string();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        l10n.get_message_with_args_in_language("table-title", language, &[("count", count.as_str())])
    );

    if table.is_empty() {
        return Ok(out);
    }

    out.push('\n');
    let header = [
        l10n.get_message_in_language("report-header-code", language, None),
        l10n.get_message_in_language("report-header-name", language, None),
        l10n.get_message_in_language("report-header-severity", language, None),
    ];
    let rows: Vec<[String; 3]> = table
        .records()
        .map(|r| [r.code.clone(), r.name.clone(), r.severity_level.clone()])
        .collect();
    write_table(&mut out, &header, &rows);
    Ok(out)
}

/// Write rows padded to the widest cell of each column; the last column is not padded
fn write_table<const N: usize>(out: &mut String, header: &[String; N], rows: &[[String; N]]) {
    let mut widths = [0usize; N];
    for row in std::iter::once(header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in std::iter::once(header).chain(rows.iter()) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == N {
                line.push_str(cell);
            } else {
                let pad = widths[i] - cell.chars().count();
                line.push_str(cell);
                line.push_str(&" ".repeat(pad + 2));
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}
