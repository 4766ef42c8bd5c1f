//! Core data types flowing through the acquisition pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Which of the two remote sources a request or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Market page (price, volume, rank, history). The viewer opens this one.
    Primary,
    /// Mining difficulty page.
    Secondary,
}

impl SourceId {
    pub fn name(&self) -> &'static str {
        match self {
            SourceId::Primary => "coinmarketcap",
            SourceId::Secondary => "coinwarz",
        }
    }
}

/// One fetch to perform, built fresh for every search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRequest {
    pub id: SourceId,
    pub url: String,
}

impl SourceRequest {
    /// Substitute `query` into a URL template containing `{query}`.
    pub fn from_template(id: SourceId, template: &str, query: &str) -> Self {
        Self {
            id,
            url: template.replace("{query}", query),
        }
    }
}

/// Closed set of fields a search can produce.
///
/// The declaration order is the presentation order of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    CurrentValue,
    CurrentVolume,
    CurrentRank,
    AlternatePrice,
    PriceHistory,
    CurrentDifficulty,
    Difficulties,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CurrentValue => "current_value",
            FieldKey::CurrentVolume => "current_volume",
            FieldKey::CurrentRank => "current_rank",
            FieldKey::AlternatePrice => "alternate_price",
            FieldKey::PriceHistory => "price_history",
            FieldKey::CurrentDifficulty => "current_difficulty",
            FieldKey::Difficulties => "difficulties",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price movement direction, classified from the page's caret icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Icon class the market page uses for a rising value.
pub const UP_ICON: &str = "icon-Caret-up";

impl Direction {
    /// Binary classification: only the up caret is `Up`, everything else is `Down`.
    pub fn from_icon(token: &str) -> Self {
        if token == UP_ICON {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "+",
            Direction::Down => "-",
        }
    }
}

/// An amount with its direction and percent change, e.g. the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub amount: String,
    pub direction: Direction,
    pub percent: String,
}

/// Price against a reference asset. `change` holds the raw text fragments
/// of the percent change, rendered back-to-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub amount: String,
    pub direction: Direction,
    pub change: Vec<String>,
}

/// Raw text tokens of the five price-history rows: the intraday slider
/// first, then the 7d, 30d, 90d and 52w table rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub rows: Vec<Vec<String>>,
}

/// A single extracted field. One variant per [`FieldKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum RawField {
    CurrentValue(Quote),
    CurrentVolume(Quote),
    CurrentRank(String),
    AlternatePrice(Comparison),
    PriceHistory(PriceHistory),
    CurrentDifficulty(String),
    /// Relative changes over 1, 7, 30 and 90 days, e.g. `"2.0%"`.
    Difficulties(Vec<String>),
}

impl RawField {
    pub fn key(&self) -> FieldKey {
        match self {
            RawField::CurrentValue(_) => FieldKey::CurrentValue,
            RawField::CurrentVolume(_) => FieldKey::CurrentVolume,
            RawField::CurrentRank(_) => FieldKey::CurrentRank,
            RawField::AlternatePrice(_) => FieldKey::AlternatePrice,
            RawField::PriceHistory(_) => FieldKey::PriceHistory,
            RawField::CurrentDifficulty(_) => FieldKey::CurrentDifficulty,
            RawField::Difficulties(_) => FieldKey::Difficulties,
        }
    }
}

/// Outcome of one source fetch. Produced exactly once per [`SourceRequest`].
#[derive(Debug)]
pub struct SourceResult {
    pub id: SourceId,
    pub url: String,
    pub outcome: Result<Vec<RawField>, SourceError>,
}

impl SourceResult {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Fields of every successful source, keyed by [`FieldKey`].
///
/// Keys never collide across sources, so merging is independent of the
/// order results arrive in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedFields {
    fields: BTreeMap<FieldKey, RawField>,
}

impl MergedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: RawField) {
        self.fields.insert(field.key(), field);
    }

    pub fn get(&self, key: FieldKey) -> Option<&RawField> {
        self.fields.get(&key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate in [`FieldKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = &RawField> {
        self.fields.values()
    }
}

impl FromIterator<RawField> for MergedFields {
    fn from_iter<I: IntoIterator<Item = RawField>>(iter: I) -> Self {
        let mut merged = MergedFields::new();
        for field in iter {
            merged.insert(field);
        }
        merged
    }
}

/// One line of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub key: String,
    pub text: String,
}

impl ReportLine {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// A complete report, ready for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub query: String,
    /// The market page URL, opened from the viewer.
    pub primary_url: String,
    pub lines: Vec<ReportLine>,
}
