use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::model::{Dataset, Row, Value};
use super::schema::RowParser;

/// Field holding the hexadecimal value converted at load time.
pub const HEX_FIELD: usize = 1;

/// Divisor applied to the hex integer in [`HEX_FIELD`].
pub const HEX_SCALE: f64 = 1000.0;

/// Load-time knobs that do not depend on the row schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Keep only rows whose first field is exactly this character.
    pub head_ch: Option<char>,
}

impl LoadOptions {
    pub fn with_head(head_ch: char) -> Self {
        LoadOptions {
            head_ch: Some(head_ch),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

impl Dataset {
    /// Load a trace file.
    ///
    /// A path that cannot be opened, or that names a directory, gives an
    /// empty dataset, not an error. Any other failure (bad CSV, bad hex in field 1) aborts the whole load.
    pub fn load<P>(path: &Path, options: &LoadOptions, parser: &P) -> Result<Dataset, DataError>
    where
        P: RowParser + ?Sized,
    {
        let file = match File::open(path).and_then(|f| f.metadata().map(|m| (f, m))) {
            Ok((_, meta)) if meta.is_dir() => {
                log::warn!("{} is a directory; using empty dataset", path.display());
                return Ok(Dataset::default());
            }
            Ok((file, _)) => file,
            Err(e) => {
                log::warn!("Cannot open {}: {e}; using empty dataset", path.display());
                return Ok(Dataset::default());
            }
        };
        let dataset = Self::from_reader(file, options, parser)?;
        log::info!("Loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse headerless comma-separated records from `reader`.
    pub fn from_reader<R, P>(reader: R, options: &LoadOptions, parser: &P) -> Result<Dataset, DataError>
    where
        R: Read,
        P: RowParser + ?Sized,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(b',')
            .from_reader(reader);

        let head = options.head_ch.map(String::from);
        let mut rows = Vec::new();
        let (mut filtered, mut dropped) = (0usize, 0usize);

        for (rec_no, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(rec_no as u64 + 1);

            if let Some(head) = &head {
                if record.get(0) != Some(head.as_str()) {
                    filtered += 1;
                    continue;
                }
            }

            let mut row: Row = record.iter().map(Value::from).collect();
            let text = record
                .get(HEX_FIELD)
                .ok_or(DataError::MissingField { line, index: HEX_FIELD })?;
            let value = parse_scaled_hex(text).ok_or_else(|| DataError::Hex {
                line,
                text: text.to_string(),
            })?;
            row[HEX_FIELD] = Value::Number(value);

            match parser.parse_row(row) {
                Some(row) if !row.is_empty() => rows.push(row),
                _ => {
                    log::trace!("Line {line}: row rejected by schema");
                    dropped += 1;
                }
            }
        }

        log::debug!(
            "Kept {} rows ({filtered} filtered by head, {dropped} rejected by schema)",
            rows.len()
        );
        Ok(Dataset::from_rows(rows))
    }
}

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

/// Parse a base-16 integer and scale it by 1/1000.
///
/// Surrounding whitespace, a leading sign, a `0x`/`0X` prefix and single
/// underscores between digits (or right after the prefix) are accepted.
/// Returns `None` for anything else, and for values too large to be finite.
pub fn parse_scaled_hex(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(after) => after.strip_prefix('_').unwrap_or(after),
        None => rest,
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.bytes().all(|b| b.is_ascii_hexdigit() || b == b'_')
    {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();

    // u128 rounds once; longer values fall back to accumulating in f64.
    let integer = match u128::from_str_radix(&digits, 16) {
        Ok(v) => v as f64,
        Err(_) => digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0.0, |acc, d| acc * 16.0 + f64::from(d)),
    };
    let magnitude = integer / HEX_SCALE;
    if !magnitude.is_finite() {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::PassThrough;

    fn load_str(text: &str, options: &LoadOptions) -> Result<Dataset, DataError> {
        Dataset::from_reader(text.as_bytes(), options, &PassThrough)
    }

    #[test]
    fn hex_accepts_python_style_forms() {
        assert_eq!(parse_scaled_hex("05"), Some(0.005));
        assert_eq!(parse_scaled_hex("0a"), Some(0.01));
        assert_eq!(parse_scaled_hex(" FF "), Some(0.255));
        assert_eq!(parse_scaled_hex("0x3e8"), Some(1.0));
        assert_eq!(parse_scaled_hex("-3E8"), Some(-1.0));
        assert_eq!(parse_scaled_hex("0"), Some(0.0));
        assert_eq!(parse_scaled_hex("1_0"), Some(0.016));
        assert_eq!(parse_scaled_hex("0x_1"), Some(0.001));
    }

    #[test]
    fn hex_longer_than_u128_still_parses() {
        let v = parse_scaled_hex(&"f".repeat(40)).unwrap();
        let expected = 1.461501637330903e45;
        assert!(((v - expected) / expected).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn hex_too_large_for_f64_is_malformed() {
        assert_eq!(parse_scaled_hex(&"f".repeat(300)), None);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert_eq!(parse_scaled_hex(""), None);
        assert_eq!(parse_scaled_hex("0x"), None);
        assert_eq!(parse_scaled_hex("-+5"), None);
        assert_eq!(parse_scaled_hex("12g"), None);
        assert_eq!(parse_scaled_hex("1.5"), None);
        assert_eq!(parse_scaled_hex("_1"), None);
        assert_eq!(parse_scaled_hex("1_"), None);
        assert_eq!(parse_scaled_hex("1__0"), None);
        assert_eq!(parse_scaled_hex("0x__1"), None);
    }

    #[test]
    fn converts_field_one() {
        let ds = load_str("A,05\nB,0a\n", &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0][1], Value::Number(0.005));
        assert_eq!(ds.rows()[1][1], Value::Number(0.010));
        assert_eq!(ds.rows()[1][0], Value::from("B"));
    }

    #[test]
    fn head_filter_keeps_matching_rows_only() {
        let ds = load_str("A,1\nB,2\nA,3\nAB,4\n", &LoadOptions::with_head('A')).unwrap();
        let firsts: Vec<_> = ds.rows().iter().map(|r| r[0].clone()).collect();
        assert_eq!(firsts, vec![Value::from("A"), Value::from("A")]);
        assert_eq!(ds.column(1).unwrap(), vec![0.001, 0.003]);
    }

    #[test]
    fn filtered_rows_are_not_hex_checked() {
        let ds = load_str("B,zz\nA,10\n", &LoadOptions::with_head('A')).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn bad_hex_aborts_whole_load() {
        let err = load_str("A,10\nA,xyz\nA,20\n", &LoadOptions::default()).unwrap_err();
        match err {
            DataError::Hex { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "xyz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_field_one_is_an_error() {
        let err = load_str("A,10\nA\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataError::MissingField { line: 2, index: 1 }));
    }

    #[test]
    fn parser_can_drop_rows() {
        let keep_small = |row: Row| (row[1].as_f64()? < 0.1).then_some(row);
        let ds = Dataset::from_reader(
            "A,10\nA,ffff\nA,20\n".as_bytes(),
            &LoadOptions::default(),
            &keep_small,
        )
        .unwrap();
        assert_eq!(ds.column(1).unwrap(), vec![0.016, 0.032]);
    }

    #[test]
    fn empty_row_from_parser_is_dropped() {
        let empty = |_row: Row| Some(Row::new());
        let ds = Dataset::from_reader("A,1\nA,2\n".as_bytes(), &LoadOptions::default(), &empty)
            .unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn rows_may_differ_in_width() {
        let ds = load_str("A,1,x\nA,2\n", &LoadOptions::default()).unwrap();
        assert_eq!(ds.rows()[0].len(), 3);
        assert_eq!(ds.rows()[1].len(), 2);
        assert_eq!(ds.max_fields(), 3);
    }
}
