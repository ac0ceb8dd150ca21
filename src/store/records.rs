//! On-disk participant records and their normalization
//!
//! Records mirror what a collection form produces: a participant id, a
//! display name, and offer/want lists that may be spread over several
//! uploads. Items either carry a ready `full_name` or the raw model and
//! version fields it is derived from.

use std::fmt;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::common::ConfigBuilder;
use crate::core::{Item, Participant};
use crate::error::{BarterWheelError, JsonParseError, TomlParseError};

/// A single offer or want entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemRecord {
    /// A bare label, used as the canonical identifier
    Label(String),
    Fields {
        #[serde(default)]
        full_name: Option<String>,
        #[serde(default, alias = "MODELO", alias = "modelo")]
        model: Option<String>,
        #[serde(default, alias = "VERSION")]
        version: Option<String>,
    },
}

impl ItemRecord {
    /// Derive the canonical item, or `None` when no identifier can be built
    ///
    /// A non-blank `full_name` wins; otherwise model and version are joined
    /// as `"MODEL - VERSION"`.
    pub fn normalize(&self) -> Option<Item> {
        match self {
            ItemRecord::Label(label) => Item::new(label),
            ItemRecord::Fields {
                full_name,
                model,
                version,
            } => full_name
                .as_deref()
                .and_then(Item::new)
                .or_else(|| Item::from_parts(model.as_deref()?, version.as_deref()?)),
        }
    }
}

/// One upload batch of a participant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadRecord {
    #[serde(default)]
    pub offers: Vec<ItemRecord>,
    #[serde(default)]
    pub wants: Vec<ItemRecord>,
}

/// Participant ids may be stored as text or as numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Text(text) => write!(f, "{}", text.trim()),
            RecordId::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantRecord {
    #[serde(alias = "agency_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub offers: Vec<ItemRecord>,
    #[serde(default)]
    pub wants: Vec<ItemRecord>,
    #[serde(default)]
    pub uploads: Vec<UploadRecord>,
}

/// A participant built from a record, plus how many items were unusable
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub participant: Participant,
    pub dropped_items: usize,
}

impl ParticipantRecord {
    /// Build the participant, merging top-level and upload lists in order
    pub fn normalize(self) -> Result<NormalizedRecord, BarterWheelError> {
        let mut dropped_items = 0;

        let mut collect = |records: Vec<&ItemRecord>| -> Vec<Item> {
            records
                .into_iter()
                .filter_map(|record| {
                    let item = record.normalize();
                    if item.is_none() {
                        dropped_items += 1;
                    }
                    item
                })
                .collect()
        };

        let offers = collect(
            self.offers
                .iter()
                .chain(self.uploads.iter().flat_map(|upload| &upload.offers))
                .collect(),
        );
        let wants = collect(
            self.wants
                .iter()
                .chain(self.uploads.iter().flat_map(|upload| &upload.wants))
                .collect(),
        );

        let participant = Participant::builder()
            .with_id(&self.id.to_string())
            .with_name(self.name)
            .with_offer_items(offers)
            .with_want_items(wants)
            .build()?;

        Ok(NormalizedRecord {
            participant,
            dropped_items,
        })
    }
}

/// Document form of a record file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordDocument {
    #[serde(default)]
    pub participants: Vec<ParticipantRecord>,
}

/// Parse a JSON record file: either an array of records or a document with a
/// `participants` array
pub fn parse_json(path: &Path, content: &str) -> Result<Vec<ParticipantRecord>, BarterWheelError> {
    let parsed = if content.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<ParticipantRecord>>(content)
    } else {
        serde_json::from_str::<RecordDocument>(content).map(|document| document.participants)
    };

    parsed.map_err(|e| {
        let span = span_at(content, e.line(), e.column());
        BarterWheelError::JsonParseError(Box::new(JsonParseError {
            file: path.display().to_string(),
            source_code: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            source: e,
        }))
    })
}

/// Parse a TOML record file made of `[[participants]]` tables
pub fn parse_toml(path: &Path, content: &str) -> Result<Vec<ParticipantRecord>, BarterWheelError> {
    toml::from_str::<RecordDocument>(content)
        .map(|document| document.participants)
        .map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            BarterWheelError::TomlParseError(Box::new(TomlParseError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.to_string()),
                span,
                source: e,
            }))
        })
}

/// Byte offset of a 1-based line/column position, as a one-byte span
fn span_at(content: &str, line: usize, column: usize) -> Option<SourceSpan> {
    if line == 0 {
        return None;
    }

    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(content.len());
    Some(SourceSpan::new(offset.into(), 1))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("round.json")
    }

    #[test]
    fn test_item_prefers_full_name() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"full_name": "Corolla - XEi", "MODELO": "Civic", "VERSION": "EXL"}"#,
        )
        .unwrap();

        assert_eq!(record.normalize().unwrap().label(), "Corolla - XEi");
    }

    #[test]
    fn test_item_derived_from_model_and_version() {
        let record: ItemRecord =
            serde_json::from_str(r#"{"MODELO": " civic ", "VERSION": "exl"}"#).unwrap();

        assert_eq!(record.normalize().unwrap().label(), "CIVIC - EXL");
    }

    #[test]
    fn test_item_blank_full_name_falls_back() {
        let record: ItemRecord =
            serde_json::from_str(r#"{"full_name": " ", "model": "Onix", "version": "LT"}"#)
                .unwrap();

        assert_eq!(record.normalize().unwrap().label(), "ONIX - LT");
    }

    #[test]
    fn test_item_without_identifier_is_none() {
        let record: ItemRecord = serde_json::from_str(r#"{"MODELO": "Civic"}"#).unwrap();
        assert!(record.normalize().is_none());

        let record: ItemRecord = serde_json::from_str(r#""   ""#).unwrap();
        assert!(record.normalize().is_none());
    }

    #[test]
    fn test_record_merges_uploads_and_counts_dropped_items() {
        let json = r#"[{
            "agency_id": 42,
            "name": "North Agency",
            "offers": ["X"],
            "uploads": [
                {"offers": [{"MODELO": "Civic", "VERSION": "EXL"}], "wants": [{"MODELO": "Onix"}]},
                {"wants": ["Y"]}
            ]
        }]"#;

        let records = parse_json(&path(), json).unwrap();
        let normalized = records.into_iter().next().unwrap().normalize().unwrap();

        let participant = normalized.participant;
        assert_eq!(participant.id(), "42");
        assert_eq!(participant.name(), "North Agency");
        let offers: Vec<&str> = participant.offers().iter().map(Item::label).collect();
        assert_eq!(offers, vec!["X", "CIVIC - EXL"]);
        let wants: Vec<&str> = participant.wants().iter().map(Item::label).collect();
        assert_eq!(wants, vec!["Y"]);
        assert_eq!(normalized.dropped_items, 1);
    }

    #[test]
    fn test_parse_json_document_form() {
        let json = r#"{"participants": [{"id": "a"}, {"id": "b", "wants": ["X"]}]}"#;

        let records = parse_json(&path(), json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.to_string(), "b");
    }

    #[test]
    fn test_parse_json_error_has_span() {
        let json = "[\n  {\"id\": \"a\",}\n]";

        let error = parse_json(&path(), json).unwrap_err();

        match error {
            BarterWheelError::JsonParseError(e) => {
                assert_eq!(e.file, "round.json");
                assert!(e.span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_toml_records() {
        let toml = r#"
[[participants]]
id = "a"
name = "Alpha"
offers = ["X", { MODELO = "Civic", VERSION = "EXL" }]
wants = ["Y"]

[[participants]]
agency_id = "b"
"#;

        let records = parse_toml(Path::new("round.toml"), toml).unwrap();

        assert_eq!(records.len(), 2);
        let first = records[0].clone().normalize().unwrap();
        assert_eq!(first.participant.offers().len(), 2);
        assert_eq!(records[1].id.to_string(), "b");
    }

    #[test]
    fn test_parse_toml_error() {
        let error = parse_toml(Path::new("round.toml"), "[[participants]\nid = ").unwrap_err();

        assert!(matches!(error, BarterWheelError::TomlParseError(_)));
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let records = parse_json(&path(), r#"[{"id": "  "}]"#).unwrap();

        let error = records.into_iter().next().unwrap().normalize().unwrap_err();

        assert!(matches!(error, BarterWheelError::ConfigurationError { .. }));
    }
}
