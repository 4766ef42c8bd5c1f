//! Derived-metric formatter: merged raw fields to ordered report lines.
//!
//! Pure and infallible. A value that cannot be parsed renders as `n/a`;
//! extractors reject such pages up front, so this only happens for
//! hand-built inputs.

use crate::schema::{
    RowLayout, CHANGE_TOKENS, DIFFICULTY_PERIODS, INTRADAY_LABEL, INTRADAY_ROW, RANK_WORD,
    WINDOW_KEYS, WINDOW_ROW,
};
use crate::types::{
    Comparison, FieldKey, MergedFields, PriceHistory, Quote, RawField, ReportLine,
};

const UNAVAILABLE: &str = "n/a";

/// Parse a displayed number.
///
/// Accepts an optional sign (`-`, `+` or U+2212), an optional leading `$`,
/// `,` thousands separators and an optional trailing `%`. Anything else
/// makes the value unparsable.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let first = s.chars().next()?;
    let (negative, s) = match first {
        '-' | '\u{2212}' => (true, &s[first.len_utf8()..]),
        '+' => (false, &s[1..]),
        _ => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();

    let digits: String = s.chars().filter(|c| *c != ',').collect();
    if !digits.bytes().any(|b| b.is_ascii_digit())
        || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        return None;
    }
    let value = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

/// Absolute change implied by `percent` of `base`. `None` when either side
/// is unparsable or the product overflows.
pub fn delta(percent: &str, base: &str) -> Option<f64> {
    Some(parse_number(percent)? / 100.0 * parse_number(base)?).filter(|v| v.is_finite())
}

/// Render with two decimals and `,` thousands separators.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn render(value: Option<f64>) -> String {
    value
        .map(group_thousands)
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Accumulates lines in presentation order.
#[derive(Debug, Default)]
struct ReportBuilder {
    lines: Vec<ReportLine>,
}

impl ReportBuilder {
    fn push(&mut self, key: &str, text: String) {
        self.lines.push(ReportLine::new(key, text));
    }

    fn quote(&mut self, key: &str, label: &str, quote: &Quote) {
        let change = render(delta(&quote.percent, &quote.amount));
        self.push(
            key,
            format!(
                "{label}: {} {}({}%|${change})",
                quote.amount,
                quote.direction.symbol(),
                quote.percent
            ),
        );
    }

    fn comparison(&mut self, cmp: &Comparison) {
        let change: String = cmp.change.iter().take(CHANGE_TOKENS).map(String::as_str).collect();
        self.push(
            "alternate_price",
            format!(
                "Coin Comparison: {} {}{change}",
                cmp.amount,
                cmp.direction.symbol()
            ),
        );
    }

    fn rank(&mut self, raw: &str) {
        let ordinal = raw.split_whitespace().nth(RANK_WORD).unwrap_or(raw.trim());
        self.push("current_rank", format!("Current Rank: {ordinal}"));
    }

    fn history_row(&mut self, key: &str, row: &[String], layout: RowLayout, label: &str) {
        let token = |i: usize| row.get(i).map(String::as_str).unwrap_or(UNAVAILABLE);
        let label = layout.label.map(&token).unwrap_or(label);
        self.push(
            key,
            format!("{label}: {} / {}", token(layout.low), token(layout.high)),
        );
    }

    fn price_history(&mut self, history: &PriceHistory) {
        let mut rows = history.rows.iter();
        if let Some(intraday) = rows.next() {
            self.history_row("24h", intraday, INTRADAY_ROW, INTRADAY_LABEL);
        }
        for (key, row) in WINDOW_KEYS.iter().zip(rows) {
            self.history_row(key, row, WINDOW_ROW, key);
        }
    }

    fn difficulties(&mut self, base: &str, changes: &[String]) {
        for ((key, label), raw) in DIFFICULTY_PERIODS.iter().zip(changes) {
            let absolute = render(delta(raw, base));
            self.push(key, format!("{label} Difficulty: {raw} | {absolute}"));
        }
    }

    fn finish(self) -> Vec<ReportLine> {
        self.lines
    }
}

/// Build the report lines for a set of merged fields.
///
/// Lines follow [`FieldKey`] order regardless of which source
/// finished first. Relative difficulty lines need the current difficulty as
/// their base and are dropped entirely when it is missing.
pub fn format(fields: &MergedFields) -> Vec<ReportLine> {
    let mut report = ReportBuilder::default();
    let base_difficulty = match fields.get(FieldKey::CurrentDifficulty) {
        Some(RawField::CurrentDifficulty(value)) => Some(value.as_str()),
        _ => None,
    };

    for field in fields.iter() {
        match field {
            RawField::CurrentValue(quote) => report.quote("current_value", "Current Value", quote),
            RawField::CurrentVolume(quote) => {
                report.quote("current_volume", "Current Volume", quote)
            }
            RawField::CurrentRank(raw) => report.rank(raw),
            RawField::AlternatePrice(cmp) => report.comparison(cmp),
            RawField::PriceHistory(history) => report.price_history(history),
            RawField::CurrentDifficulty(value) => {
                report.push("current_difficulty", format!("Current Difficulty: {value}"))
            }
            RawField::Difficulties(changes) => {
                if let Some(base) = base_difficulty {
                    report.difficulties(base, changes);
                }
            }
        }
    }

    report.finish()
}
