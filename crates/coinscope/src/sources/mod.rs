//! Source-specific field extraction.
//!
//! Each source reads its page in one fallible pass: either every field of
//! its schema comes back, or an [`ExtractionError`] describes the first
//! lookup that failed.

pub mod coinmarketcap;
pub mod coinwarz;

use crate::document::Document;
use crate::error::{ExtractionError, ExtractionResult};
use crate::format::parse_number;
use crate::types::{FieldKey, RawField, SourceId};

/// Default URL template of the market page.
pub const COINMARKETCAP_URL: &str = "https://coinmarketcap.com/currencies/{query}";

/// Default URL template of the difficulty page.
pub const COINWARZ_URL: &str = "https://www.coinwarz.com/mining/{query}/difficulty-chart";

/// Parse `body` and extract the fields of source `id`.
pub fn extract_page(id: SourceId, body: &str) -> ExtractionResult<Vec<RawField>> {
    let doc = Document::parse(body);
    extract(id, &doc)
}

/// Extract the fields of source `id` from an already parsed page.
pub fn extract(id: SourceId, doc: &Document) -> ExtractionResult<Vec<RawField>> {
    match id {
        SourceId::Primary => coinmarketcap::extract(doc),
        SourceId::Secondary => coinwarz::extract(doc),
    }
}

/// Reject values the formatter would not be able to use as a number.
pub(crate) fn numeric(field: FieldKey, value: String) -> ExtractionResult<String> {
    match parse_number(&value) {
        Some(_) => Ok(value),
        None => Err(ExtractionError::Malformed { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric() {
        assert_eq!(
            numeric(FieldKey::CurrentValue, "$1,234.50".into()).unwrap(),
            "$1,234.50"
        );
        assert!(matches!(
            numeric(FieldKey::CurrentDifficulty, "soon".into()),
            Err(ExtractionError::Malformed { .. })
        ));
        assert_eq!(
            numeric(FieldKey::CurrentValue, "abc5xyz".into()),
            Err(ExtractionError::Malformed {
                field: FieldKey::CurrentValue,
                value: "abc5xyz".into(),
            })
        );
    }

    #[test]
    fn test_empty_page_fails_both_sources() {
        let empty = "<html><body></body></html>";
        assert!(extract_page(SourceId::Primary, empty).is_err());
        assert!(extract_page(SourceId::Secondary, empty).is_err());
    }
}
