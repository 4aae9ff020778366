//! Property tests for the mood aggregate and reply priority.

use mindful_core::{Dispatcher, MoodRating, MoodTracker, Page, PageKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mood_average_matches_ratings(ratings in prop::collection::vec(1u8..=5, 1..50)) {
        let mut tracker = MoodTracker::mount(&Page::builtin(PageKind::Product, &[])).unwrap();
        for r in &ratings {
            tracker.submit_rating(MoodRating::new(*r).unwrap());
        }
        let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
        let expected = sum as f64 / ratings.len() as f64;
        let summary = tracker.last_summary().unwrap();

        prop_assert!((summary.average - expected).abs() < 1e-9);
        prop_assert!((summary.percentage - expected / 5.0 * 100.0).abs() < 1e-9);
        prop_assert!(summary.average >= 1.0 && summary.average <= 5.0);
    }

    // Power-of-two counts keep every average exact in binary, so the shown
    // text must equal the exact average rounded half-up to tenths.
    #[test]
    fn mood_text_rounds_half_up(
        ratings in (0u32..6).prop_flat_map(|p| prop::collection::vec(1u8..=5, 1usize << p))
    ) {
        let mut tracker = MoodTracker::mount(&Page::builtin(PageKind::Product, &[])).unwrap();
        for r in &ratings {
            tracker.submit_rating(MoodRating::new(*r).unwrap());
        }
        let sum: u64 = ratings.iter().map(|r| *r as u64).sum();
        let n = ratings.len() as u64;
        let tenths = (20 * sum + n) / (2 * n);
        prop_assert_eq!(
            tracker.last_summary().unwrap().text(),
            format!(
                "Today: {}/5  •  Average: {}.{}/5",
                ratings.last().unwrap(),
                tenths / 10,
                tenths % 10
            )
        );
    }

    #[test]
    fn demo_breath_always_wins(prefix in "[a-z ]{0,12}", suffix in "[a-z ]{0,12}") {
        let input = format!("{prefix}mood goal BREATH{suffix}");
        prop_assert_eq!(Dispatcher::demo().matching_rule(&input), Some(0));
    }

    #[test]
    fn coach_priority_follows_table(text in "[a-z ]{0,30}") {
        let d = Dispatcher::coach();
        let lowered = text.to_lowercase();
        let expected = if lowered.contains("chat") {
            Some(0)
        } else if lowered.contains("medit") || lowered.contains("timer") {
            Some(1)
        } else if lowered.contains("mood") || lowered.contains("track") {
            Some(2)
        } else if lowered.contains("contact") || lowered.contains("book") {
            Some(3)
        } else {
            None
        };
        prop_assert_eq!(d.matching_rule(&text), expected);
    }
}
