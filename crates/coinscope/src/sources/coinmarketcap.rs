//! Market page: price, volume, rank, reference-asset price and price history.

use scraper::ElementRef;

use crate::document::{all_text, at_least, descend, following_siblings, nth, own_text, Document};
use crate::error::{ExtractionError, ExtractionResult};
use crate::schema::{
    CHANGE_TOKENS, COMPARISON_WORD, INTRADAY_ROW, RANK_WORD, VOLUME_BLOCK, WINDOW_ROW,
};
use crate::types::{Comparison, Direction, FieldKey, PriceHistory, Quote, RawField};

use super::numeric;

const PRICE_AMOUNT: &str = r#"div[class*="priceTitle"] > div > span"#;
const PRICE_ICON: &str = r#"div[class*="priceTitle"] > span > span"#;
const PRICE_CHANGE: &str = r#"div[class*="priceTitle"] > span"#;
const STATS_ITEM: &str = r#"div[class="statsBlock"] > div > div[class="statsItemRight"]"#;
const RANK_PILL: &str = r#"div[class="namePill namePillPrimary"]"#;
const ALT_PRICE: &str = r#"div[class*="alternatePrices"] > p"#;
const ALT_ICON: &str = r#"div[class*="alternatePrices"] > p > span > span"#;
const ALT_CHANGE: &str = r#"div[class*="alternatePrices"] > p > span"#;
const SLIDER: &str = r#"div[class*="sliderSection"]"#;
const HISTORY_CAPTION: &str = "caption";
const HISTORY_TITLE: &str = "Price History";

/// Extract every market-page field, or fail on the first missing one.
pub fn extract(doc: &Document) -> ExtractionResult<Vec<RawField>> {
    Ok(vec![
        RawField::CurrentValue(current_value(doc)?),
        RawField::CurrentVolume(current_volume(doc)?),
        RawField::CurrentRank(current_rank(doc)?),
        RawField::AlternatePrice(alternate_price(doc)?),
        RawField::PriceHistory(price_history(doc)?),
    ])
}

fn class_of(el: ElementRef<'_>) -> Option<String> {
    el.value().attr("class").map(str::to_string)
}

fn current_value(doc: &Document) -> ExtractionResult<Quote> {
    let field = FieldKey::CurrentValue;
    let amount = nth(field, PRICE_AMOUNT, doc.own_texts(PRICE_AMOUNT)?, 0)?;
    let icon = nth(field, PRICE_ICON, doc.attrs(PRICE_ICON, "class")?, 0)?;
    let percent = nth(field, PRICE_CHANGE, doc.own_texts(PRICE_CHANGE)?, 0)?;

    Ok(Quote {
        amount: numeric(field, amount)?,
        direction: Direction::from_icon(&icon),
        percent: numeric(field, percent)?,
    })
}

fn current_volume(doc: &Document) -> ExtractionResult<Quote> {
    let field = FieldKey::CurrentVolume;
    let block = nth(field, STATS_ITEM, doc.select(STATS_ITEM)?, VOLUME_BLOCK)?;

    let amounts: Vec<String> = descend(vec![block], &["div"])
        .into_iter()
        .flat_map(own_text)
        .collect();
    let icons: Vec<String> = descend(vec![block], &["span", "span"])
        .into_iter()
        .filter_map(class_of)
        .collect();
    let changes: Vec<String> = descend(vec![block], &["span"])
        .into_iter()
        .flat_map(own_text)
        .take(CHANGE_TOKENS)
        .collect();

    let amount = nth(field, "div", amounts, 0)?;
    let icon = nth(field, "span > span", icons, 0)?;
    let percent = nth(field, "span", changes, 0)?;

    Ok(Quote {
        amount: numeric(field, amount)?,
        direction: Direction::from_icon(&icon),
        percent: numeric(field, percent)?,
    })
}

fn current_rank(doc: &Document) -> ExtractionResult<String> {
    let field = FieldKey::CurrentRank;
    let rank = nth(field, RANK_PILL, doc.own_texts(RANK_PILL)?, 0)?;
    let words = rank.split_whitespace().count();
    if words <= RANK_WORD {
        return Err(ExtractionError::TooFew {
            field,
            query: RANK_PILL.to_string(),
            expected: RANK_WORD + 1,
            found: words,
        });
    }
    Ok(rank)
}

fn alternate_price(doc: &Document) -> ExtractionResult<Comparison> {
    let field = FieldKey::AlternatePrice;
    let text = nth(field, ALT_PRICE, doc.own_texts(ALT_PRICE)?, 0)?;
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let amount = nth(field, ALT_PRICE, words, COMPARISON_WORD)?;
    let icon = nth(field, ALT_ICON, doc.attrs(ALT_ICON, "class")?, 0)?;
    let change: Vec<String> = doc
        .select(ALT_CHANGE)?
        .into_iter()
        .flat_map(all_text)
        .take(CHANGE_TOKENS)
        .collect();

    Ok(Comparison {
        amount,
        direction: Direction::from_icon(&icon),
        change,
    })
}

fn price_history(doc: &Document) -> ExtractionResult<PriceHistory> {
    let field = FieldKey::PriceHistory;

    let intraday: Vec<String> = doc.select(SLIDER)?.into_iter().flat_map(all_text).collect();
    let intraday = at_least(field, SLIDER, intraday, INTRADAY_ROW.min_tokens())?;

    let captions: Vec<ElementRef<'_>> = doc
        .select(HISTORY_CAPTION)?
        .into_iter()
        .filter(|caption| own_text(*caption).iter().any(|t| t.contains(HISTORY_TITLE)))
        .collect();
    let bodies: Vec<ElementRef<'_>> = captions
        .into_iter()
        .flat_map(|caption| following_siblings(caption, "tbody"))
        .collect();
    let query = "caption ~ tbody > tr";
    let rows = at_least(field, query, descend(bodies, &["tr"]), 4)?;

    let mut history = vec![intraday];
    for row in rows.into_iter().take(4) {
        history.push(at_least(field, query, all_text(row), WINDOW_ROW.min_tokens())?);
    }

    Ok(PriceHistory { rows: history })
}
