// Property tests for the filter pipeline, pagination and day-of-year conversion.
use chrono::{Datelike, Duration, NaiveDate};
use eventdeck::filter::{DateWindow, FilterCriteria, ListingPage, apply_criteria};
use eventdeck::model::Event;
use eventdeck::model::date::{day_of_year, day_of_year_or_missing, format_event_date};
use eventdeck::model::event::{ACTIVITIES_COLOR, CULTURE_COLOR, FOOD_COLOR};
use eventdeck::pagination::{PaginationStrategy, PaginationWindow};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None::<String>),
        1 => Just(Some("garbage".to_string())),
        8 => (0i64..365).prop_map(|offset| {
            let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            Some(format_event_date(base + Duration::days(offset)))
        }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    (
        prop_oneof![Just(None::<bool>), Just(Some(true)), Just(Some(false))],
        prop_oneof![
            Just(None::<String>),
            Just(Some("0".to_string())),
            Just(Some("15".to_string()))
        ],
        prop_oneof![
            Just(None::<String>),
            Just(Some(FOOD_COLOR.to_string())),
            Just(Some(ACTIVITIES_COLOR.to_string())),
            Just(Some(CULTURE_COLOR.to_string())),
        ],
        proptest::option::of("[a-cA-C ]{0,6}"),
        arb_date(),
        arb_date(),
    )
        .prop_map(|(reviewed, price, color, title, date_start, date_end)| Event {
            reviewed,
            price,
            color,
            title,
            date_start,
            date_end,
            ..Default::default()
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(arb_event(), 0..40).prop_map(|mut events| {
        for (i, e) in events.iter_mut().enumerate() {
            e.id = i.to_string();
        }
        events
    })
}

fn arb_window() -> impl Strategy<Value = DateWindow> {
    prop_oneof![
        Just(DateWindow::None),
        (1i32..=366).prop_map(DateWindow::Day),
        (1i32..=366, 0i32..30).prop_map(|(start, len)| DateWindow::Range {
            start,
            end: start + len
        }),
    ]
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    ("[a-cA-C]{0,2}", any::<bool>(), arb_window()).prop_map(|(search_query, free_only, date_window)| {
        FilterCriteria {
            search_query,
            free_only,
            date_window,
        }
    })
}

fn arb_page() -> impl Strategy<Value = ListingPage> {
    prop_oneof![
        Just(ListingPage::Home),
        Just(ListingPage::Activities),
        Just(ListingPage::Culture),
        Just(ListingPage::Food),
    ]
}

proptest! {
    #[test]
    fn prop_result_is_ordered_subsequence(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        page in arb_page(),
    ) {
        let result = apply_criteria(&catalog, &criteria, page);
        let positions: Vec<usize> = result.iter().map(|e| e.id.parse().unwrap()).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for e in &result {
            prop_assert!(catalog.contains(*e));
        }
    }

    #[test]
    fn prop_pending_never_listed(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        page in arb_page(),
    ) {
        let result = apply_criteria(&catalog, &criteria, page);
        prop_assert!(result.iter().all(|e| e.reviewed != Some(false)));
    }

    #[test]
    fn prop_day_window_is_interval_containment(
        catalog in arb_catalog(),
        day in 1i32..=366,
    ) {
        let criteria = FilterCriteria { date_window: DateWindow::Day(day), ..Default::default() };
        let result = apply_criteria(&catalog, &criteria, ListingPage::Home);
        let expected: Vec<&Event> = catalog
            .iter()
            .filter(|e| e.reviewed != Some(false))
            .filter(|e| {
                let s = day_of_year_or_missing(e.date_start.as_deref());
                let t = day_of_year_or_missing(e.date_end.as_deref());
                s <= day && day <= t
            })
            .collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn prop_range_window_is_interval_overlap(
        catalog in arb_catalog(),
        start in 1i32..=366,
        len in 0i32..30,
    ) {
        let end = start + len;
        let criteria = FilterCriteria {
            date_window: DateWindow::Range { start, end },
            ..Default::default()
        };
        let result = apply_criteria(&catalog, &criteria, ListingPage::Home);
        let expected: Vec<&Event> = catalog
            .iter()
            .filter(|e| e.reviewed != Some(false))
            .filter(|e| {
                let s = day_of_year_or_missing(e.date_start.as_deref());
                let t = day_of_year_or_missing(e.date_end.as_deref());
                s <= end && t >= start
            })
            .collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn prop_reset_exposes_first_page(total in 0usize..100, page_size in 1usize..20) {
        let mut window = PaginationWindow::new(page_size, PaginationStrategy::Incremental);
        window.reset(total);
        prop_assert_eq!(window.visible_count(), total.min(page_size));
    }

    #[test]
    fn prop_show_more_is_monotonic_then_idempotent(
        total in 0usize..100,
        page_size in 1usize..20,
        presses in 0usize..15,
    ) {
        let mut window = PaginationWindow::new(page_size, PaginationStrategy::Incremental);
        window.reset(total);
        let mut previous = window.visible_count();
        for _ in 0..presses {
            window.show_more();
            let now = window.visible_count();
            prop_assert!(now >= previous);
            prop_assert!(now <= total);
            if previous == total {
                prop_assert_eq!(now, previous);
            }
            previous = now;
        }
    }

    #[test]
    fn prop_day_of_year_advances_by_one(offset in 0i64..364, year in 1990i32..2100) {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap() + Duration::days(offset);
        let next = start + Duration::days(1);
        prop_assume!(next.year() == year);
        let a = day_of_year(&format_event_date(start)).unwrap();
        let b = day_of_year(&format_event_date(next)).unwrap();
        prop_assert_eq!(b, a + 1);
    }
}

#[test]
fn test_day_of_year_covers_whole_year() {
    for (year, days) in [(2023, 365u32), (2024, 366u32)] {
        let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let mut seen = Vec::new();
        while date.year() == year {
            seen.push(day_of_year(&format_event_date(date)).unwrap());
            date += Duration::days(1);
        }
        assert_eq!(seen.len() as u32, days);
        assert_eq!(seen, (1..=days).collect::<Vec<_>>());
    }
}
