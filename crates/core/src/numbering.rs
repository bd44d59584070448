use chrono::{DateTime, Utc};

/// Date-scoped prefix shared by every quote an organization generates on a
/// given UTC day.
pub fn date_prefix(as_of: DateTime<Utc>) -> String {
    format!("Q-{}", as_of.format("%Y%m%d"))
}

/// Human-readable quote number: `Q-{YYYYMMDD}-{NNNN}`. The caller supplies
/// the count of quotes already carrying the prefix for this organization;
/// the engine never scans storage itself. Two concurrent calls can compute
/// the same number for the same organization and day; the storage layer's
/// uniqueness constraint and a caller retry resolve that race.
pub fn next_quote_number(as_of: DateTime<Utc>, existing_count_for_prefix: u64) -> String {
    format!("{}-{:04}", date_prefix(as_of), existing_count_for_prefix + 1)
}
