// Event proposals as entered by a user, before moderation.
use crate::error::{EventError, EventResult};
use crate::model::date::form_date_to_event_date;
use crate::model::event::{Category, Event};
use serde::{Deserialize, Serialize};

/// Raw proposal form. Dates are `YYYY-MM-DD` as produced by a date input;
/// `category` is one of `foods`, `activities`, `cultures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "tag", default)]
    pub tags: Vec<String>,
    pub description: String,
    pub date_start: String,
    pub date_end: String,
    pub price: String,
    pub location: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl EventDraft {
    /// Lists every required field that is blank. Ok when none are.
    pub fn validate(&self) -> EventResult<()> {
        let required: [(&'static str, &str); 7] = [
            ("title", self.title.as_str()),
            ("location", self.location.as_str()),
            ("description", self.description.as_str()),
            ("dateStart", self.date_start.as_str()),
            ("dateEnd", self.date_end.as_str()),
            ("price", self.price.as_str()),
            ("category", self.category.as_str()),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(EventError::ValidationFailure { missing });
        }
        if Category::from_form_value(&self.category).is_none() {
            return Err(EventError::ValidationFailure {
                missing: vec!["category"],
            });
        }
        Ok(())
    }

    /// Validates and converts into the stored event shape.
    ///
    /// The result is always pending moderation and has no id; the backend assigns one.
    pub fn into_event(self) -> EventResult<Event> {
        self.validate()?;
        let category = Category::from_form_value(&self.category).ok_or(
            EventError::ValidationFailure {
                missing: vec!["category"],
            },
        )?;

        Ok(Event {
            id: String::new(),
            title: Some(self.title.trim().to_string()),
            long_title: None,
            image: (!self.image.trim().is_empty()).then(|| self.image.trim().to_string()),
            tags: Some(self.tags),
            description: Some(self.description),
            date_start: Some(form_date_to_event_date(&self.date_start)?),
            date_end: Some(form_date_to_event_date(&self.date_end)?),
            price: Some(self.price.trim().to_string()),
            location: Some(self.location.trim().to_string()),
            color: Some(category.color().to_string()),
            reviewed: Some(false),
            article: self.article.filter(|a| !a.trim().is_empty()),
        })
    }
}
