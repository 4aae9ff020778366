//! Mood check-in tracker.
//!
//! Ratings are folded into a running total and count; individual samples are
//! not kept. Everything resets when the page is rebuilt.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;
use crate::page::{ids, Page};

/// A check-in rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodRating(u8);

impl MoodRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "mood".into(),
                value: value as i64,
                min: Self::MIN as i64,
                max: Self::MAX as i64,
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MoodRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodRating> for u8 {
    fn from(r: MoodRating) -> u8 {
        r.0
    }
}

/// What the result area shows after a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub rating: MoodRating,
    pub count: u32,
    pub average: f64,
    /// `average / 5 * 100`
    pub percentage: f64,
}

impl MoodSummary {
    /// CSS width of the mood bar.
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn text(&self) -> String {
        format!(
            "Today: {}/5  •  Average: {}/5",
            self.rating.value(),
            format_tenths(self.average)
        )
    }
}

/// One decimal place, with exact halves rounded up.
///
/// `{:.1}` rounds an exactly representable tie such as 2.25 to even ("2.2");
/// the page has always shown "2.3". Only x.25 and x.75 can be exact ties, so
/// `value * 4` being an odd integer identifies them.
pub fn format_tenths(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        format!("{:.1}", (value * 10.0).ceil() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoodTracker {
    total: u32,
    count: u32,
    selection: Option<MoodRating>,
    last: Option<MoodSummary>,
}

impl MoodTracker {
    pub fn mount(page: &Page) -> Option<Self> {
        if !page.has_all(&[ids::MOOD_FORM, ids::MOOD_BAR, ids::MOOD_RESULT]) {
            return None;
        }
        Some(Self::default())
    }

    /// Tick one of the radio buttons.
    pub fn select(&mut self, rating: MoodRating) {
        self.selection = Some(rating);
    }

    pub fn selection(&self) -> Option<MoodRating> {
        self.selection
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total as f64 / self.count as f64)
    }

    /// Summary currently rendered, if anything was submitted yet.
    pub fn last_summary(&self) -> Option<&MoodSummary> {
        self.last.as_ref()
    }

    /// Form submit. Without a selection nothing happens. Otherwise the rating
    /// is folded in, the summary re-rendered and the selection cleared.
    pub fn submit(&mut self) -> Option<Event> {
        let rating = self.selection.take()?;
        self.total += rating.value() as u32;
        self.count += 1;

        let average = self.total as f64 / self.count as f64;
        let summary = MoodSummary {
            rating,
            count: self.count,
            average,
            percentage: average / 5.0 * 100.0,
        };
        debug!(rating = rating.value(), average, "mood recorded");

        let event = Event::MoodRecorded {
            rating: rating.value(),
            count: summary.count,
            average: summary.average,
            percentage: summary.percentage,
        };
        self.last = Some(summary);
        Some(event)
    }

    pub fn submit_rating(&mut self, rating: MoodRating) -> Option<Event> {
        self.select(rating);
        self.submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageKind;

    fn tracker() -> MoodTracker {
        MoodTracker::mount(&Page::builtin(PageKind::Product, &[])).unwrap()
    }

    fn r(v: u8) -> MoodRating {
        MoodRating::new(v).unwrap()
    }

    #[test]
    fn rating_bounds() {
        assert!(MoodRating::new(0).is_err());
        assert!(MoodRating::new(6).is_err());
        assert_eq!(MoodRating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn submit_without_selection_is_silent() {
        let mut t = tracker();
        assert!(t.submit().is_none());
        assert_eq!(t.count(), 0);
        assert!(t.last_summary().is_none());
    }

    #[test]
    fn running_average_and_bar() {
        let mut t = tracker();
        t.submit_rating(r(4));
        t.submit_rating(r(5));
        t.submit_rating(r(2));
        let s = t.last_summary().unwrap();
        assert_eq!(s.count, 3);
        assert!((s.average - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.text(), "Today: 2/5  •  Average: 3.7/5");
        assert!((s.percentage - (11.0 / 3.0) / 5.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn exact_half_average_rounds_up() {
        let mut t = tracker();
        for v in [2, 2, 2, 3] {
            t.submit_rating(r(v));
        }
        assert_eq!(t.last_summary().unwrap().text(), "Today: 3/5  •  Average: 2.3/5");
    }

    #[test]
    fn format_tenths_ties_and_non_ties() {
        assert_eq!(format_tenths(2.25), "2.3");
        assert_eq!(format_tenths(3.75), "3.8");
        assert_eq!(format_tenths(4.5), "4.5");
        assert_eq!(format_tenths(11.0 / 3.0), "3.7");
        assert_eq!(format_tenths(1.0), "1.0");
    }

    #[test]
    fn selection_clears_after_submit() {
        let mut t = tracker();
        t.select(r(3));
        assert!(t.submit().is_some());
        assert!(t.selection().is_none());
        assert!(t.submit().is_none());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn bar_width_of_perfect_score() {
        let mut t = tracker();
        t.submit_rating(r(5));
        assert_eq!(t.last_summary().unwrap().bar_width(), "100%");
    }

    #[test]
    fn rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<MoodRating>("7").is_err());
        assert_eq!(serde_json::from_str::<MoodRating>("3").unwrap(), r(3));
    }

    #[test]
    fn not_mounted_without_bar() {
        let page = Page::new("x").with_elements([ids::MOOD_FORM, ids::MOOD_RESULT]);
        assert!(MoodTracker::mount(&page).is_none());
    }
}
