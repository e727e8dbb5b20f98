//! Property-Based Tests for aixsuma
//!
//! These tests verify:
//! - OS level classification for every well-formed level
//! - SUMA summary parsing
//! - Schedule field validation

use proptest::prelude::*;

use aixsuma::report::RunReport;
use aixsuma::{classify, normalize_oslevel, RequestType};

// =============================================================================
// OS level Property Tests
// =============================================================================

fn year() -> impl Strategy<Value = u32> {
    1000u32..=9999
}

fn classify_quiet(level: &str, last_sp: bool) -> Result<RequestType, String> {
    classify(level, last_sp, &mut RunReport::new()).map_err(|e| e.to_string())
}

proptest! {
    /// Fully specified SPs are SP requests whatever last_sp says
    #[test]
    fn full_sp_is_sp(
        y in year(),
        tl in 0u32..100,
        sp in 1u32..100,
        build in 0u32..10000,
        last_sp in any::<bool>(),
    ) {
        let level = format!("{:04}-{:02}-{:02}-{:04}", y, tl, sp, build);
        prop_assert_eq!(classify_quiet(&level, last_sp), Ok(RequestType::Sp));
    }

    /// A bare TL is a TL request unless last_sp asks for its last SP
    #[test]
    fn bare_tl_follows_last_sp(y in year(), tl in 0u32..100, last_sp in any::<bool>()) {
        let level = format!("{:04}-{:02}", y, tl);
        let expected = if last_sp { RequestType::Sp } else { RequestType::Tl };
        prop_assert_eq!(classify_quiet(&level, last_sp), Ok(expected));
    }

    /// TL levels with a zero SP suffix stay TL requests
    #[test]
    fn zero_sp_suffix_is_tl(
        y in year(),
        tl in 0u32..100,
        long in any::<bool>(),
        last_sp in any::<bool>(),
    ) {
        let suffix = if long { "-00-0000" } else { "-00" };
        let level = format!("{:04}-{:02}{}", y, tl, suffix);
        prop_assert_eq!(classify_quiet(&level, last_sp), Ok(RequestType::Tl));
    }

    /// Anything without the YYYY-TT shape is rejected
    #[test]
    fn malformed_levels_rejected(level in "[0-9]{1,3}(-[0-9]{1,2}){0,2}|[a-z]{3,8}-[0-9]{2}") {
        prop_assume!(level.trim() != "" && level != "Latest");
        prop_assert!(classify_quiet(&level, false).is_err());
        prop_assert!(normalize_oslevel(&level).is_err());
    }

    /// Well-formed levels with a nonzero TL pass normalization unchanged
    #[test]
    fn normalize_keeps_valid_levels(
        y in year(),
        tl in 1u32..100,
        sp in 0u32..100,
        build in 0u32..10000,
    ) {
        let level = format!("{:04}-{:02}-{:02}-{:04}", y, tl, sp, build);
        prop_assert_eq!(normalize_oslevel(&level).ok(), Some(level));
    }

    /// Any casing of "latest" normalizes to the canonical spelling
    #[test]
    fn normalize_latest_any_case(mask in prop::collection::vec(any::<bool>(), 6)) {
        let raw: String = "latest"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let normalized = normalize_oslevel(&raw).ok();
        prop_assert_eq!(normalized.as_deref(), Some("Latest"));
    }
}

// =============================================================================
// Transfer summary Property Tests
// =============================================================================

use aixsuma::TransferSummary;

proptest! {
    /// Counters printed by SUMA are read back
    #[test]
    fn summary_reads_counters(
        d in any::<u32>(),
        f in any::<u32>(),
        s in any::<u32>(),
        indent in 1usize..12,
    ) {
        let pad = " ".repeat(indent);
        let out = format!(
            "Summary:\n{pad}{d}    downloaded\n{pad}{f}    failed\n{pad}{s}    skipped\n"
        );
        let summary = TransferSummary::parse(&out);
        prop_assert_eq!(summary.downloaded, u64::from(d));
        prop_assert_eq!(summary.failed, u64::from(f));
        prop_assert_eq!(summary.skipped, u64::from(s));
        prop_assert_eq!(summary.is_empty(), d == 0 && s == 0);
    }

    /// Arbitrary output never panics the parser
    #[test]
    fn summary_parse_total(out in "\\PC*") {
        let _ = TransferSummary::parse(&out);
    }
}

// =============================================================================
// Schedule Property Tests
// =============================================================================

use aixsuma::schedule::{check_time, validate_schedule};

proptest! {
    /// Numbers are accepted exactly when in range
    #[test]
    fn check_time_range(value in 0u32..200, min in 0u32..50, span in 0u32..50) {
        let max = min + span;
        prop_assert_eq!(check_time(&value.to_string(), min, max), value >= min && value <= max);
    }

    /// Wildcard is always accepted
    #[test]
    fn check_time_wildcard(min in 0u32..50, max in 0u32..50) {
        prop_assert!(check_time("*", min, max));
    }

    /// Signs, letters and blanks are never accepted
    #[test]
    fn check_time_rejects_non_digits(value in "[-+a-z ]{1,2}[0-9]{0,2}") {
        prop_assert!(!check_time(&value, 0, 99));
    }

    /// In-range five-field schedules validate
    #[test]
    fn valid_schedules_accepted(
        minute in 0u32..60,
        hour in 0u32..24,
        day in 1u32..32,
        month in 1u32..13,
        weekday in 0u32..7,
        wild in prop::collection::vec(any::<bool>(), 5),
    ) {
        let fields = [minute, hour, day, month, weekday];
        let spec = fields
            .iter()
            .zip(wild)
            .map(|(v, w)| if w { "*".to_string() } else { v.to_string() })
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert!(validate_schedule(&spec).is_ok());
    }

    /// Anything but five fields is rejected
    #[test]
    fn wrong_field_count_rejected(count in 0usize..10) {
        prop_assume!(count != 5);
        let spec = vec!["*"; count].join(" ");
        prop_assert!(validate_schedule(&spec).is_err());
    }
}
