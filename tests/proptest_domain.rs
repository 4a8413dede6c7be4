//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify validation, the status table, and CSV
//! escaping across random inputs.

use proptest::prelude::*;

use silverage_store::domain::reservation::ReservationStatus;
use silverage_store::domain::validate::{is_valid_phone, require_non_blank};
use silverage_store::usecases::export::render_reservations_csv;

// ── Phone validation ────────────────────────────────────────

proptest! {
    /// Every 11-digit number starting 1[3-9] is accepted.
    #[test]
    fn phone_accepts_all_cn_mobile_shapes(phone in "1[3-9][0-9]{9}") {
        prop_assert!(is_valid_phone(&phone));
    }

    /// Wrong lengths are always rejected, whatever the digits.
    #[test]
    fn phone_rejects_wrong_lengths(
        digits in "[0-9]{1,20}",
    ) {
        prop_assume!(digits.len() != 11);
        prop_assert!(!is_valid_phone(&digits));
    }

    /// A second digit outside 3-9 is always rejected.
    #[test]
    fn phone_rejects_bad_prefix(
        second in "[0-2]",
        rest in "[0-9]{9}",
    ) {
        let phone = format!("1{second}{rest}");
        prop_assert!(!is_valid_phone(&phone));
    }
}

// ── Required-field check ────────────────────────────────────

proptest! {
    /// Whitespace-only input is always a missing field; anything with
    /// a visible character passes and comes back trimmed.
    #[test]
    fn require_non_blank_trims_or_rejects(s in "\\PC{0,40}") {
        match require_non_blank(&s, "field") {
            Ok(trimmed) => {
                prop_assert_eq!(trimmed, s.trim());
                prop_assert!(!trimmed.is_empty());
            }
            Err(_) => prop_assert!(s.trim().is_empty()),
        }
    }
}

// ── Status state machine ────────────────────────────────────

fn any_status() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Pending),
        Just(ReservationStatus::Confirmed),
        Just(ReservationStatus::Completed),
        Just(ReservationStatus::Cancelled),
    ]
}

proptest! {
    /// Display and FromStr are inverses.
    #[test]
    fn status_display_parse_round_trip(status in any_status()) {
        let parsed: ReservationStatus = status.to_string().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }

    /// Terminal states accept only themselves.
    #[test]
    fn terminal_states_admit_no_exit(next in any_status()) {
        for terminal in [ReservationStatus::Completed, ReservationStatus::Cancelled] {
            prop_assert_eq!(terminal.can_transition_to(next), next == terminal);
        }
    }
}

// ── CSV escaping ────────────────────────────────────────────

/// Minimal RFC-4180 row parser used to check round trips.
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
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

proptest! {
    /// Whatever printable text the free-text fields contain (commas
    /// and quotes included), every data row keeps exactly 8 columns
    /// and the description survives verbatim.
    #[test]
    fn export_rows_keep_column_structure(
        name in "[ -~]{1,20}",
        description in "[ -~]{1,40}",
    ) {
        prop_assume!(!name.trim().is_empty());
        prop_assume!(!description.trim().is_empty());

        let record = silverage_store::domain::reservation::ReservationRecord::new(
            name.clone(),
            "13800138000".into(),
            "2026-09-15".parse().unwrap(),
            "home-care".into(),
            description.clone(),
        );
        let stats = silverage_store::domain::reservation::ReservationStats::collect(
            std::slice::from_ref(&record),
        );
        let csv = render_reservations_csv(&[record], &stats);

        let data_row = csv.lines().nth(1).unwrap();
        let fields = parse_row(data_row);
        prop_assert_eq!(fields.len(), 8);
        prop_assert_eq!(fields[1].as_str(), name.as_str());
        prop_assert_eq!(fields[5].as_str(), description.as_str());
    }
}
