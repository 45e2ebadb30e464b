// Shared fixtures for integration tests.
#![allow(dead_code)]
use eventdeck::model::Event;
use eventdeck::model::event::{ACTIVITIES_COLOR, CULTURE_COLOR, FOOD_COLOR};

pub fn event(id: &str, title: &str) -> Event {
    Event {
        id: id.to_string(),
        title: Some(title.to_string()),
        reviewed: Some(true),
        ..Default::default()
    }
}

/// The two-event catalog used throughout: a free food fair and a paid concert.
pub fn sagra_and_concerto() -> Vec<Event> {
    vec![
        Event {
            location: Some("Piazza del Duomo".into()),
            date_start: Some("10-06-2024".into()),
            date_end: Some("12-06-2024".into()),
            price: Some("0".into()),
            color: Some(FOOD_COLOR.into()),
            tags: Some(vec!["cibo".into()]),
            ..event("sagra", "Sagra")
        },
        Event {
            location: Some("Teatro Comunale".into()),
            date_start: Some("10-06-2024".into()),
            date_end: Some("10-06-2024".into()),
            price: Some("20".into()),
            color: Some(ACTIVITIES_COLOR.into()),
            ..event("concerto", "Concerto")
        },
    ]
}

pub fn culture(id: &str, title: &str) -> Event {
    Event {
        color: Some(CULTURE_COLOR.into()),
        ..event(id, title)
    }
}

pub fn titles(events: &[&Event]) -> Vec<String> {
    events
        .iter()
        .map(|e| e.title.clone().unwrap_or_default())
        .collect()
}

pub fn owned_titles(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|e| e.title.clone().unwrap_or_default())
        .collect()
}
