//! Tabular loader: header resolution, cell normalization, parse warnings.

use crate::StoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use kin_core::config::LoadConfig;
use kin_core::record::{QaRecord, MISSING_QUESTION, MISSING_TITLE};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Records loaded from one source, plus every cell that had to be defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub source: Option<PathBuf>,
    pub records: Vec<QaRecord>,
    pub warnings: Vec<ParseWarning>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A cell that failed to parse and was replaced with its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based data row (the header is row 0).
    pub row: usize,
    /// Canonical column name, `#<index>` for an unmapped column, or `*` for
    /// a row that could not be split at all.
    pub column: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    DocId,
    Category,
    Title,
    Question,
    Answer,
    ViewCount,
    Likes,
    Dislikes,
    AnswerSeq,
    CollectedAt,
}

const ALL_COLUMNS: &[Column] = &[
    Column::DocId,
    Column::Category,
    Column::Title,
    Column::Question,
    Column::Answer,
    Column::ViewCount,
    Column::Likes,
    Column::Dislikes,
    Column::AnswerSeq,
    Column::CollectedAt,
];

impl Column {
    fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header spellings; the first is canonical.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::DocId => &["doc_id"],
            Column::Category => &["category"],
            Column::Title => &["title"],
            Column::Question => &["question_text", "question"],
            Column::Answer => &["answer_text", "answer"],
            Column::ViewCount => &["view_count", "views"],
            Column::Likes => &["likes"],
            Column::Dislikes => &["dislikes"],
            Column::AnswerSeq => &["answer_seq", "answer_no"],
            Column::CollectedAt => &["collected_at"],
        }
    }

    fn required(self) -> bool {
        self != Column::Category
    }
}

/// Header position of every known column.
struct ColumnMap {
    positions: Vec<(Column, Option<usize>)>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, StoreError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let positions: Vec<(Column, Option<usize>)> = ALL_COLUMNS
            .iter()
            .map(|&col| {
                let pos = col
                    .aliases()
                    .iter()
                    .find_map(|alias| normalized.iter().position(|h| h == alias));
                (col, pos)
            })
            .collect();

        let missing: Vec<String> = positions
            .iter()
            .filter(|(col, pos)| col.required() && pos.is_none())
            .map(|(col, _)| col.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::DataMalformed { missing });
        }

        Ok(Self { positions })
    }

    fn column_at(&self, idx: usize) -> Option<Column> {
        self.positions
            .iter()
            .find(|(_, pos)| *pos == Some(idx))
            .map(|(col, _)| *col)
    }

    fn get<'r>(&self, row: &'r StringRecord, col: Column) -> &'r str {
        self.positions
            .iter()
            .find(|(c, _)| *c == col)
            .and_then(|(_, pos)| *pos)
            .and_then(|idx| row.get(idx))
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a dataset from disk. A missing file is `DataUnavailable`.
pub fn load(path: &Path, config: &LoadConfig) -> Result<Dataset, StoreError> {
    if !path.exists() {
        return Err(StoreError::DataUnavailable(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)
        .map_err(|e| StoreError::Io(format!("failed to read {}: {e}", path.display())))?;
    let mut dataset = parse_records(bytes.as_slice(), config)?;
    dataset.source = Some(path.to_path_buf());
    debug!(
        path = %path.display(),
        records = dataset.len(),
        warnings = dataset.warnings.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Like [`load`], but a missing source degrades to an empty dataset.
/// Structural errors are still returned.
pub fn load_or_empty(path: &Path, config: &LoadConfig) -> Result<Dataset, StoreError> {
    match load(path, config) {
        Err(StoreError::DataUnavailable(p)) => {
            warn!(path = %p.display(), "data source unavailable, using empty dataset");
            Ok(Dataset::empty())
        }
        other => other,
    }
}

/// Parse delimited text into records.
pub fn parse_records<R: Read>(reader: R, config: &LoadConfig) -> Result<Dataset, StoreError> {
    if !config.delimiter.is_ascii() {
        return Err(StoreError::Csv(format!(
            "delimiter must be ASCII, got {:?}",
            config.delimiter
        )));
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| StoreError::Csv(format!("failed to read header: {e}")))?
        .clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (idx, result) in rdr.byte_records().enumerate() {
        let row_no = idx + 1;
        match result {
            Ok(raw) => {
                let row = decode_row(&columns, &raw, row_no, &mut warnings);
                records.push(normalize_row(&columns, &row, row_no, &mut warnings));
            }
            Err(e) => {
                warn!(row = row_no, "skipping unreadable row: {e}");
                warnings.push(ParseWarning {
                    row: row_no,
                    column: "*".into(),
                    value: e.to_string(),
                });
            }
        }
    }

    Ok(Dataset {
        source: None,
        records,
        warnings,
    })
}

/// Decode a row cell by cell. Invalid UTF-8 is replaced with U+FFFD and
/// noted against its column; the rest of the row is kept.
fn decode_row(
    columns: &ColumnMap,
    raw: &ByteRecord,
    row_no: usize,
    warnings: &mut Vec<ParseWarning>,
) -> StringRecord {
    raw.iter()
        .enumerate()
        .map(|(idx, cell)| match std::str::from_utf8(cell) {
            Ok(text) => text.to_string(),
            Err(_) => {
                let text = String::from_utf8_lossy(cell).into_owned();
                let column = columns
                    .column_at(idx)
                    .map_or_else(|| format!("#{idx}"), |c| c.name().to_string());
                warn!(row = row_no, column = %column, "invalid UTF-8, undecodable bytes replaced");
                warnings.push(ParseWarning {
                    row: row_no,
                    column,
                    value: text.clone(),
                });
                text
            }
        })
        .collect()
}

fn normalize_row(
    columns: &ColumnMap,
    row: &StringRecord,
    row_no: usize,
    warnings: &mut Vec<ParseWarning>,
) -> QaRecord {
    let mut note = |col: Column, value: &str| {
        warn!(row = row_no, column = col.name(), value, "unparseable value, using default");
        warnings.push(ParseWarning {
            row: row_no,
            column: col.name().to_string(),
            value: value.to_string(),
        });
    };

    let mut count = |col: Column| -> u64 {
        let raw = columns.get(row, col);
        parse_count(raw).unwrap_or_else(|| {
            note(col, raw);
            0
        })
    };
    let view_count = count(Column::ViewCount);
    let likes = count(Column::Likes);
    let dislikes = count(Column::Dislikes);

    let raw_seq = columns.get(row, Column::AnswerSeq);
    let answer_seq = parse_seq(raw_seq).unwrap_or_else(|| {
        note(Column::AnswerSeq, raw_seq);
        0
    });

    let raw_date = columns.get(row, Column::CollectedAt);
    let collected_at = if raw_date.trim().is_empty() {
        None
    } else {
        let parsed = parse_date(raw_date);
        if parsed.is_none() {
            note(Column::CollectedAt, raw_date);
        }
        parsed
    };

    let category = columns.get(row, Column::Category).trim();

    QaRecord {
        doc_id: columns.get(row, Column::DocId).trim().to_string(),
        category: (!category.is_empty()).then(|| category.to_string()),
        title: text_or(columns.get(row, Column::Title), MISSING_TITLE),
        question_text: text_or(columns.get(row, Column::Question), MISSING_QUESTION),
        answer_text: text_or(columns.get(row, Column::Answer), ""),
        view_count,
        likes,
        dislikes,
        answer_seq,
        collected_at,
    }
}

fn text_or(raw: &str, placeholder: &str) -> String {
    if raw.trim().is_empty() {
        placeholder.to_string()
    } else {
        raw.to_string()
    }
}

/// Blank is a missing value (0); anything else must be a non-negative number.
fn parse_count(raw: &str) -> Option<u64> {
    let t = raw.trim();
    if t.is_empty() {
        return Some(0);
    }
    if let Ok(n) = t.parse::<u64>() {
        return Some(n);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Some(f as u64),
        _ => None,
    }
}

fn parse_seq(raw: &str) -> Option<i64> {
    let t = raw.trim();
    if t.is_empty() {
        return Some(0);
    }
    if let Ok(n) = t.parse::<i64>() {
        return Some(n);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f as i64),
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(t).ok().map(|dt| dt.date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
