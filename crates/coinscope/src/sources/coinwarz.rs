//! Difficulty page: current mining difficulty and its relative changes.

use crate::document::{at_least, descend, following_siblings, nth, own_text, Document};
use crate::error::ExtractionResult;
use crate::schema::DIFFICULTY_PERIODS;
use crate::types::{FieldKey, RawField};

use super::numeric;

const CURRENT_LABEL: &str = "strong";
const CURRENT_MARKER: &str = "Current";
const SUMMARY: &str = r#"div[class="diff-summary-section"] > div > span"#;

pub fn extract(doc: &Document) -> ExtractionResult<Vec<RawField>> {
    Ok(vec![
        RawField::CurrentDifficulty(current_difficulty(doc)?),
        RawField::Difficulties(difficulties(doc)?),
    ])
}

fn current_difficulty(doc: &Document) -> ExtractionResult<String> {
    let field = FieldKey::CurrentDifficulty;
    let labels: Vec<_> = doc
        .select(CURRENT_LABEL)?
        .into_iter()
        .filter(|el| {
            own_text(*el)
                .first()
                .is_some_and(|t| t.contains(CURRENT_MARKER))
        })
        .collect();
    let values: Vec<String> = labels
        .into_iter()
        .flat_map(|label| descend(following_siblings(label, "div"), &["span", "strong"]))
        .flat_map(own_text)
        .collect();

    let query = "strong:contains(Current) ~ div > span > strong";
    numeric(field, nth(field, query, values, 0)?)
}

fn difficulties(doc: &Document) -> ExtractionResult<Vec<String>> {
    let field = FieldKey::Difficulties;
    let changes = at_least(field, SUMMARY, doc.own_texts(SUMMARY)?, DIFFICULTY_PERIODS.len())?;
    changes
        .into_iter()
        .take(DIFFICULTY_PERIODS.len())
        .map(|change| numeric(field, change))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;

    const FIXTURE: &str = include_str!("../../tests/fixtures/coinwarz.html");

    #[test]
    fn test_extracts_difficulty_fields() {
        let fields = extract(&Document::parse(FIXTURE)).unwrap();
        assert_eq!(
            fields,
            vec![
                RawField::CurrentDifficulty("20,000,000".into()),
                RawField::Difficulties(vec![
                    "2.0%".into(),
                    "5.0%".into(),
                    "10.0%".into(),
                    "15.0%".into(),
                ]),
            ]
        );
    }

    #[test]
    fn test_missing_current_label() {
        let page = FIXTURE.replace("Current Bitcoin Difficulty", "Bitcoin Difficulty");
        let err = extract(&Document::parse(&page)).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Missing {
                field: FieldKey::CurrentDifficulty,
                ..
            }
        ));
    }

    #[test]
    fn test_current_marker_only_in_first_text() {
        let page = FIXTURE.replace(
            "<strong>Current Bitcoin Difficulty</strong>",
            "<strong>Bitcoin <em>BTC</em> Current Difficulty</strong>",
        );
        let err = extract(&Document::parse(&page)).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Missing {
                field: FieldKey::CurrentDifficulty,
                ..
            }
        ));
    }

    #[test]
    fn test_too_few_periods() {
        let page = FIXTURE.replacen(r#"<div class="diff-summary"><span>"#, "<div><p>", 1);
        let err = extract(&Document::parse(&page)).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::TooFew {
                field: FieldKey::Difficulties,
                expected: 4,
                found: 3,
                ..
            }
        ));
    }
}
