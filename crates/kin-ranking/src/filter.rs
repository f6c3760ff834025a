//! Search and category filters.

use kin_core::record::QaRecord;

/// Queries shorter than this (in characters) return everything.
pub const MIN_QUERY_CHARS: usize = 2;

/// Category name meaning "no category filter".
pub const ALL_CATEGORIES: &str = "전체";

/// Case-sensitive substring match against title or question text.
pub fn filter_records(records: &[QaRecord], query: &str) -> Vec<QaRecord> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.title.contains(query) || r.question_text.contains(query))
        .cloned()
        .collect()
}

/// Exact category match; `None` or `"전체"` keeps every record.
pub fn filter_by_category(records: &[QaRecord], category: Option<&str>) -> Vec<QaRecord> {
    match category {
        None | Some(ALL_CATEGORIES) => records.to_vec(),
        Some(wanted) => records
            .iter()
            .filter(|r| r.category.as_deref() == Some(wanted))
            .cloned()
            .collect(),
    }
}

/// Distinct categories in first-seen order.
pub fn categories(records: &[QaRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in records.iter().filter_map(|r| r.category.as_deref()) {
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
