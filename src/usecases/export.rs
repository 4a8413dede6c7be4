//! CSV Export - Reservation Download Rendering
//!
//! Renders the reservation collection plus an aggregate summary block
//! as comma-separated text. Fields are quoted and escaped RFC-4180
//! style, so free-text descriptions containing commas, quotes, or
//! newlines no longer break the column layout.

use chrono::Utc;

use crate::domain::reservation::{ReservationRecord, ReservationStats};

/// Header row for the data section.
const HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Phone",
    "Date",
    "Service Type",
    "Description",
    "Status",
    "Created At",
];

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the full export document: header, one row per record, a
/// blank line, then the summary block of aggregate counts.
pub fn render_reservations_csv(
    reservations: &[ReservationRecord],
    stats: &ReservationStats,
) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');

    for r in reservations {
        let fields = [
            r.id.clone(),
            r.name.clone(),
            r.phone.clone(),
            r.reservation_date.to_string(),
            r.service_type.clone(),
            r.demand_description.clone(),
            r.status.to_string(),
            r.created_at.to_rfc3339(),
        ];
        out.push_str(&csv_row(&fields));
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Summary\n");
    out.push_str(&format!("Total,{}\n", stats.total));
    out.push_str(&format!("Pending,{}\n", stats.pending));
    out.push_str(&format!("Confirmed,{}\n", stats.confirmed));
    out.push_str(&format!("Completed,{}\n", stats.completed));
    out.push_str(&format!("Cancelled,{}\n", stats.cancelled));
    out
}

/// Suggested download filename, dated today (UTC).
pub fn export_filename() -> String {
    format!("reservations-{}.csv", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::ReservationStatus;

    fn record(description: &str) -> ReservationRecord {
        ReservationRecord::new(
            "Wang Fang".into(),
            "13800138000".into(),
            "2026-09-15".parse().unwrap(),
            "home-care".into(),
            description.into(),
        )
    }

    /// Minimal RFC-4180 row parser for round-trip assertions.
    fn parse_row(row: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = row.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    fields.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn test_plain_fields_unquoted() {
        assert_eq!(csv_field("home-care"), "home-care");
    }

    #[test]
    fn test_embedded_comma_is_quoted() {
        assert_eq!(csv_field("visit, weekly"), "\"visit, weekly\"");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_comma_in_description_keeps_column_count() {
        let r = record("needs help, twice a week, with \"meals\"");
        let stats = ReservationStats::collect(std::slice::from_ref(&r));
        let csv = render_reservations_csv(&[r.clone()], &stats);

        let data_row = csv.lines().nth(1).unwrap();
        let fields = parse_row(data_row);
        assert_eq!(fields.len(), HEADER.len());
        assert_eq!(fields[5], "needs help, twice a week, with \"meals\"");
        assert_eq!(fields[6], "pending");
    }

    #[test]
    fn test_summary_block_counts() {
        let mut cancelled = record("x");
        cancelled.status = ReservationStatus::Cancelled;
        let rows = vec![record("a"), record("b"), cancelled];
        let stats = ReservationStats::collect(&rows);
        let csv = render_reservations_csv(&rows, &stats);

        assert!(csv.contains("\nSummary\n"));
        assert!(csv.contains("Total,3\n"));
        assert!(csv.contains("Pending,2\n"));
        assert!(csv.contains("Cancelled,1\n"));
        // Blank line separates data from summary
        assert!(csv.contains("\n\nSummary"));
    }

    #[test]
    fn test_export_filename_shape() {
        let name = export_filename();
        assert!(name.starts_with("reservations-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "reservations-2026-01-01.csv".len());
    }
}
