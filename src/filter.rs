//! Listing filter engine.
//!
//! Every listing page runs the same pipeline over the catalog:
//!
//! 1. visibility gate (pending events are never listed),
//! 2. category partition (skipped on the home page),
//! 3. free-text search over title, location and tags,
//! 4. free/paid selection according to the page's [`FreePolicy`],
//! 5. date window ([`DateWindow::Day`] containment or [`DateWindow::Range`] overlap).
//!
//! Each stage keeps catalog order; nothing is re-sorted. Pages differ only by
//! the declarative [`ListingPage`] settings, so there is one implementation of
//! the cascade instead of one per page.
use crate::model::Event;
use crate::model::date::{day_of_year_in, day_of_year_or_missing, next_week_bounds};
use crate::model::event::Category;
use crate::pagination::PaginationStrategy;
use chrono::NaiveDate;
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    None,
    /// A single day-of-year; matches events whose span contains it.
    Day(i32),
    /// Inclusive day-of-year bounds; matches events whose span overlaps them.
    Range { start: i32, end: i32 },
}

impl DateWindow {
    /// `start_doy`/`end_doy` use `MISSING_DAY` for absent dates.
    pub fn admits(&self, start_doy: i32, end_doy: i32) -> bool {
        match *self {
            DateWindow::None => true,
            DateWindow::Day(d) => start_doy <= d && d <= end_doy,
            DateWindow::Range { start, end } => start_doy <= end && end_doy >= start,
        }
    }

    pub fn admits_event(&self, event: &Event) -> bool {
        if *self == DateWindow::None {
            return true;
        }
        let start = day_of_year_or_missing(event.date_start.as_deref());
        let end = day_of_year_or_missing(event.date_end.as_deref());
        self.admits(start, end)
    }
}

/// The quick date selections offered by every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum DateShortcut {
    Today,
    Tomorrow,
    NextWeek,
}

impl DateShortcut {
    pub fn resolve(&self, today: NaiveDate) -> DateWindow {
        match self {
            DateShortcut::Today => DateWindow::Day(day_of_year_in(today, 0) as i32),
            DateShortcut::Tomorrow => DateWindow::Day(day_of_year_in(today, 1) as i32),
            DateShortcut::NextWeek => {
                let (start, end) = next_week_bounds(today);
                DateWindow::Range {
                    start: start as i32,
                    end: end as i32,
                }
            }
        }
    }
}

impl fmt::Display for DateShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateShortcut::Today => write!(f, "Today"),
            DateShortcut::Tomorrow => write!(f, "Tomorrow"),
            DateShortcut::NextWeek => write!(f, "Next week"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_query: String,
    pub free_only: bool,
    pub date_window: DateWindow,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Selects `window`, or clears it when it is already the active one.
    pub fn toggle_date_window(&mut self, window: DateWindow) {
        if self.date_window == window {
            self.date_window = DateWindow::None;
        } else {
            self.date_window = window;
        }
    }
}

/// How a page treats the free-only toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreePolicy {
    /// Toggle on: free events only. Toggle off: everything.
    Optional,
    /// Toggle on: free events only. Toggle off: paid events only.
    Exclusive,
}

impl FreePolicy {
    pub fn admits(&self, event: &Event, free_only: bool) -> bool {
        match (self, free_only) {
            (_, true) => event.is_free(),
            (FreePolicy::Optional, false) => true,
            (FreePolicy::Exclusive, false) => !event.is_free(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum ListingPage {
    #[default]
    Home,
    Activities,
    Culture,
    Food,
}

impl ListingPage {
    /// The category this page is restricted to. Home lists every category.
    pub fn partition(&self) -> Option<Category> {
        match self {
            ListingPage::Home => None,
            ListingPage::Activities => Some(Category::Activities),
            ListingPage::Culture => Some(Category::Culture),
            ListingPage::Food => Some(Category::Food),
        }
    }

    pub fn free_policy(&self) -> FreePolicy {
        match self {
            ListingPage::Activities => FreePolicy::Exclusive,
            _ => FreePolicy::Optional,
        }
    }

    pub fn pagination(&self) -> PaginationStrategy {
        match self {
            ListingPage::Activities => PaginationStrategy::RevealAll,
            _ => PaginationStrategy::Incremental,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "home" | "all" => Some(ListingPage::Home),
            "activities" | "attivita" => Some(ListingPage::Activities),
            "culture" | "cultura" => Some(ListingPage::Culture),
            "food" | "foods" => Some(ListingPage::Food),
            _ => None,
        }
    }
}

impl fmt::Display for ListingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingPage::Home => write!(f, "Home"),
            ListingPage::Activities => write!(f, "Activities"),
            ListingPage::Culture => write!(f, "Culture"),
            ListingPage::Food => write!(f, "Food"),
        }
    }
}

/// Filters `catalog` for `page`, preserving catalog order.
pub fn apply_criteria<'a>(
    catalog: &'a [Event],
    criteria: &FilterCriteria,
    page: ListingPage,
) -> Vec<&'a Event> {
    let partition = page.partition();
    let free_policy = page.free_policy();
    let query_lower = (!criteria.search_query.is_empty()).then(|| criteria.search_query.to_lowercase());

    catalog
        .iter()
        .filter(|e| e.is_publicly_visible())
        .filter(|e| partition.is_none_or(|c| e.belongs_to(c)))
        .filter(|e| {
            query_lower
                .as_deref()
                .is_none_or(|q| e.matches_lowered_query(q))
        })
        .filter(|e| free_policy.admits(e, criteria.free_only))
        .filter(|e| criteria.date_window.admits_event(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_window_with_missing_dates() {
        let w = DateWindow::Day(100);
        assert!(w.admits(90, 110));
        assert!(!w.admits(-1, -1));
        // A missing start sits below every day, so only the end bound decides.
        assert!(w.admits(-1, 120));
        assert!(!w.admits(95, -1));
    }

    #[test]
    fn test_range_overlap_edges() {
        let w = DateWindow::Range { start: 160, end: 166 };
        assert!(w.admits(166, 170));
        assert!(w.admits(150, 160));
        assert!(!w.admits(167, 170));
        assert!(!w.admits(150, 159));
        assert!(!w.admits(-1, -1));
    }

    #[test]
    fn test_toggle_same_window_clears() {
        let mut c = FilterCriteria::default();
        c.toggle_date_window(DateWindow::Day(5));
        assert_eq!(c.date_window, DateWindow::Day(5));
        c.toggle_date_window(DateWindow::Day(6));
        assert_eq!(c.date_window, DateWindow::Day(6));
        c.toggle_date_window(DateWindow::Day(6));
        assert_eq!(c.date_window, DateWindow::None);
    }
}
