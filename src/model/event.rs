// Core data types for catalog events, categories and favourites.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum::EnumIter;

pub const FOOD_COLOR: &str = "#822225";
pub const ACTIVITIES_COLOR: &str = "#F2B85A";
pub const CULTURE_COLOR: &str = "#4E614E";

/// The listing category an event belongs to.
///
/// On the wire a category is identified only by its colour tag, so the
/// mapping below is the single place that knows which colour means what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Activities,
    Culture,
}

impl Category {
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => FOOD_COLOR,
            Category::Activities => ACTIVITIES_COLOR,
            Category::Culture => CULTURE_COLOR,
        }
    }

    pub fn from_color(color: &str) -> Option<Self> {
        match color {
            FOOD_COLOR => Some(Category::Food),
            ACTIVITIES_COLOR => Some(Category::Activities),
            CULTURE_COLOR => Some(Category::Culture),
            _ => None,
        }
    }

    /// Parses the category names used by the proposal form.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "foods" | "food" => Some(Category::Food),
            "activities" | "activity" => Some(Category::Activities),
            "cultures" | "culture" => Some(Category::Culture),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Food => write!(f, "Food"),
            Category::Activities => write!(f, "Activities"),
            Category::Culture => write!(f, "Culture"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Published,
    Pending,
    /// Stored before moderation existed. Treated as visible.
    Legacy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_opaque_id"
    )]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "tag", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl Event {
    pub fn review_state(&self) -> ReviewState {
        match self.reviewed {
            Some(true) => ReviewState::Published,
            Some(false) => ReviewState::Pending,
            None => ReviewState::Legacy,
        }
    }

    /// Public listings show published and legacy events, never pending ones.
    pub fn is_publicly_visible(&self) -> bool {
        self.review_state() != ReviewState::Pending
    }

    pub fn is_free(&self) -> bool {
        self.price.as_deref() == Some("0")
    }

    pub fn category(&self) -> Option<Category> {
        self.color.as_deref().and_then(Category::from_color)
    }

    pub fn belongs_to(&self, category: Category) -> bool {
        self.color.as_deref() == Some(category.color())
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Default Title")
    }

    pub fn favorite_entry(&self) -> FavoriteEntry {
        FavoriteEntry {
            id: (!self.id.is_empty()).then(|| self.id.clone()),
            title: self.title.clone().unwrap_or_default(),
            image: self.image.clone(),
            color: self.color.clone(),
        }
    }
}

/// Summary of an event stored in a user's favourites list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_id"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FavoriteEntry {
    /// Two entries refer to the same event when their ids match.
    /// Entries written before ids were recorded fall back to the title.
    pub fn same_event(&self, other: &FavoriteEntry) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.title == other.title,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub mail: String,
    #[serde(default)]
    pub events: Vec<FavoriteEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Profile {
    pub fn new(mail: &str) -> Self {
        Self {
            mail: mail.to_string(),
            events: Vec::new(),
            role: None,
        }
    }

    /// Adds the entry if absent, removes it if present. Returns true when added.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> bool {
        if let Some(idx) = self.events.iter().position(|e| e.same_event(&entry)) {
            self.events.remove(idx);
            false
        } else {
            self.events.push(entry);
            true
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

// Document ids arrive either as strings or as numbers depending on the store.
fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}
