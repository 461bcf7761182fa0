//! # Text Processing Module
//!
//! This module matches free-form ingredient text against a [`ReferenceTable`] of
//! food additives.
//!
//! ## Algorithm
//!
//! 1. Split the text on `,` `;` `:` and trim every token
//! 2. Lower-case each token and tighten E-number spellings (`E 621` -> `e621`)
//! 3. A table record matches a token when its lower-cased name or code occurs
//!    anywhere inside the token
//! 4. Of all matching records, keep the one with the longest name; ties go to
//!    the record that comes first in the table
//! 5. Mask the kept record's name and code inside the token and repeat step 4,
//!    so a token naming two separate additives yields both while a short key
//!    nested in a longer name is never reported
//! 6. Deduplicate by code, keeping the order in which codes were first found
//!
//! ## Outcomes
//!
//! [`AnalysisOutcome`] keeps "no input" and "nothing found" apart, while
//! [`AnalysisOutcome::into_records`] gives the same empty list for both.

use crate::errors::{AppError, AppResult};
use crate::reference_table::{AdditiveRecord, ReferenceTable, TableEntry};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, trace};

lazy_static! {
    /// `e`, optional whitespace, three digits and an optional letter
    static ref E_NUMBER_PATTERN: Regex =
        Regex::new(r"e\s*([0-9]{3}[a-z]?)").expect("Invalid E-number regex pattern");
}

/// Default token delimiters
pub const DEFAULT_DELIMITERS: [char; 3] = [',', ';', ':'];

/// Configuration options for additive matching
#[derive(Clone, Debug, PartialEq)]
pub struct MatcherConfig {
    /// Characters that separate ingredient tokens
    pub delimiters: Vec<char>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl MatcherConfig {
    /// Validate matcher configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        if self.delimiters.is_empty() {
            return Err(AppError::Config(
                "delimiters cannot be empty".to_string(),
            ));
        }

        if let Some(c) = self
            .delimiters
            .iter()
            .find(|c| c.is_alphanumeric() || c.is_whitespace())
        {
            return Err(AppError::Config(format!(
                "delimiter '{}' must not be alphanumeric or whitespace",
                c.escape_default()
            )));
        }

        Ok(())
    }
}

/// Result of analyzing one piece of ingredient text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "additives", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// The text held no non-empty token
    NoInput,
    /// Tokens were present but none matched the table
    NoMatches,
    /// Distinct matched additives, in order of first encounter
    Matches(Vec<AdditiveRecord>),
}

impl AnalysisOutcome {
    /// Matched records; empty for both `NoInput` and `NoMatches`
    pub fn records(&self) -> &[AdditiveRecord] {
        match self {
            AnalysisOutcome::Matches(records) => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Vec<AdditiveRecord> {
        match self {
            AnalysisOutcome::Matches(records) => records,
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Short label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisOutcome::NoInput => "no_input",
            AnalysisOutcome::NoMatches => "no_matches",
            AnalysisOutcome::Matches(_) => "matches",
        }
    }
}

/// Split text into trimmed tokens on any of the given delimiters
///
/// Empty tokens are kept so callers can tell blank input apart.
pub fn tokenize<'a>(text: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    text.split(|c: char| delimiters.contains(&c))
        .map(str::trim)
        .collect()
}

/// Lower-case a token and tighten E-number spellings
///
/// ```
/// use food_additives::text_processing::normalize_token;
///
/// assert_eq!(normalize_token("Contains E 621"), "contains e621");
/// assert_eq!(normalize_token("E150a colour"), "e150a colour");
/// ```
pub fn normalize_token(token: &str) -> String {
    let lower = token.to_lowercase();
    E_NUMBER_PATTERN.replace_all(&lower, "e${1}").into_owned()
}

/// Additive matcher with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct AdditiveMatcher {
    config: MatcherConfig,
}

impl AdditiveMatcher {
    /// Create a matcher with the default delimiters and limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a validated custom configuration
    pub fn with_config(config: MatcherConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Analyze ingredient text against a reference table
    pub fn analyze(&self, input: &str, table: &ReferenceTable) -> AnalysisOutcome {
        let start = Instant::now();
        let tokens = tokenize(input, &self.config.delimiters);

        let outcome = if tokens.iter().all(|token| token.is_empty()) {
            debug!("Ingredient text has no tokens");
            AnalysisOutcome::NoInput
        } else {
            let found = collect_matches(&tokens, table);
            if found.is_empty() {
                AnalysisOutcome::NoMatches
            } else {
                AnalysisOutcome::Matches(found)
            }
        };

        info!(
            outcome = outcome.label(),
            tokens = tokens.len(),
            input_chars = input.chars().count(),
            additives_found = outcome.len(),
            table_size = table.len(),
            "Ingredient analysis complete"
        );
        crate::observability::record_analysis_metrics(
            outcome.label(),
            tokens.len(),
            outcome.len(),
            start.elapsed(),
        );

        outcome
    }
}

/// Analyze ingredient text with the default matcher configuration
pub fn analyze(input: &str, table: &ReferenceTable) -> AnalysisOutcome {
    AdditiveMatcher::new().analyze(input, table)
}

/// Replaces matched keys; never part of a table key
const MASK: &str = "\u{0}";

/// Matched records for every non-empty token, deduplicated by code
fn collect_matches(tokens: &[&str], table: &ReferenceTable) -> Vec<AdditiveRecord> {
    let mut found: Vec<AdditiveRecord> = Vec::new();
    let mut seen_codes: HashSet<&str> = HashSet::new();

    for token in tokens.iter().filter(|token| !token.is_empty()) {
        let normalized = normalize_token(token);
        let entries = token_matches(&normalized, table.entries());
        if entries.is_empty() {
            trace!(token = %normalized, "No additive in token");
            continue;
        }

        for entry in entries {
            debug!(token = %normalized, code = %entry.record.code, "Matched additive");
            if seen_codes.insert(entry.code_key.as_str()) {
                found.push(entry.record.clone());
            }
        }
    }

    found
}

/// Longest-name matches in one token, masking each selection before the next search
fn token_matches<'t>(normalized: &str, entries: &'t [TableEntry]) -> Vec<&'t TableEntry> {
    let mut remaining = normalized.to_string();
    let mut selected = Vec::new();

    // A selected entry has no key left in `remaining`, so it cannot be picked twice
    while selected.len() < entries.len() {
        let Some(entry) = longest_match(&remaining, entries) else {
            break;
        };
        remaining = remaining
            .replace(entry.name_key.as_str(), MASK)
            .replace(entry.code_key.as_str(), MASK);
        selected.push(entry);
    }

    selected
}

/// Matching entry with the longest name; the earliest entry wins a tie
fn longest_match<'t>(normalized: &str, entries: &'t [TableEntry]) -> Option<&'t TableEntry> {
    let mut best: Option<&TableEntry> = None;

    for entry in entries {
        let matches =
            normalized.contains(entry.name_key.as_str()) || normalized.contains(entry.code_key.as_str());
        if matches && best.map_or(true, |b| entry.name_len > b.name_len) {
            best = Some(entry);
        }
    }

    best
}
