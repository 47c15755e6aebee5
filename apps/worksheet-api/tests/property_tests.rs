//! Property-based tests for worksheet-api
//!
//! Tests output naming, URL shapes and pipeline value ranges using proptest.

use proptest::prelude::*;
use uuid::Uuid;
use worksheet_core::{clamp_task_count, grid_height_mm, sanitize};

// ============================================================
// Output Id and URL Shapes
// ============================================================

/// Output ids as produced for primary worksheets and variant-2 runs.
fn output_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("worksheet"), Just("variant2")]
        .prop_map(|prefix| format!("{prefix}_{}", Uuid::new_v4()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn output_ids_match_expected_pattern(id in output_id()) {
        let pattern = regex::Regex::new(
            r"^(worksheet|variant2)_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
        ).unwrap();
        prop_assert!(pattern.is_match(&id));
    }

    #[test]
    fn output_ids_are_safe_path_segments(id in output_id()) {
        prop_assert!(!id.contains('/'));
        prop_assert!(!id.contains('\\'));
        prop_assert!(!id.contains(".."));
        prop_assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    #[test]
    fn served_urls_stay_under_generated(id in output_id()) {
        let pdf_url = format!("/generated/{id}.pdf");
        let keys_url = format!("/generated/{id}_keys.pdf");
        prop_assert!(pdf_url.starts_with("/generated/"));
        prop_assert!(keys_url.starts_with("/generated/"));
        prop_assert!(keys_url.ends_with("_keys.pdf"));
    }

    // ============================================================
    // Layout Parameter Ranges
    // ============================================================

    #[test]
    fn clamped_task_count_is_always_in_range(requested in proptest::option::of(any::<u32>())) {
        let count = clamp_task_count(requested);
        prop_assert!((1..=6).contains(&count));
    }

    #[test]
    fn grid_height_is_printable_for_every_valid_count(count in 1u32..=6) {
        let height = grid_height_mm(count);
        prop_assert!(height >= 10);
        prop_assert!(height <= 175);
    }

    #[test]
    fn more_tasks_never_get_taller_fields(count in 1u32..6) {
        prop_assert!(grid_height_mm(count) >= grid_height_mm(count + 1));
    }

    // ============================================================
    // Markup Sanitation at the API Boundary
    // ============================================================

    #[test]
    fn provider_markup_never_reaches_compile_fenced(body in "[ -~а-яА-Я\n]{0,200}") {
        let fenced = format!("```latex\n{body}\n```");
        let cleaned = sanitize(&fenced);
        prop_assert!(!cleaned.starts_with("```"));
        prop_assert!(!cleaned.ends_with("```"));
    }

    #[test]
    fn history_limit_clamp_is_total(limit in any::<i64>()) {
        let clamped = limit.clamp(1, 500);
        prop_assert!((1..=500).contains(&clamped));
    }
}

// ============================================================
// Unit Tests (non-property)
// ============================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn variant2_prefix_differs_from_primary() {
        let primary = format!("worksheet_{}", Uuid::new_v4());
        let variant = format!("variant2_{}", Uuid::new_v4());
        assert!(primary.starts_with("worksheet_"));
        assert!(variant.starts_with("variant2_"));
        assert_ne!(&primary[..9], &variant[..9]);
    }

    #[test]
    fn default_task_count_gets_reference_height() {
        assert_eq!(grid_height_mm(clamp_task_count(None)), 48);
    }
}
