// Presentation helpers shared by every shell that renders events.
use crate::model::event::Event;

pub const PREVIEW_ELLIPSIS: &str = "[...]";

/// Keeps the first `max_words` space-separated words, appending `[...]` when cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > max_words {
        let mut s = words[..max_words].join(" ");
        s.push_str(PREVIEW_ELLIPSIS);
        s
    } else {
        text.to_string()
    }
}

pub trait EventDisplay {
    fn price_label(&self) -> Option<String>;
    fn date_label(&self) -> String;
    fn preview(&self, max_words: usize) -> String;
}

impl EventDisplay for Event {
    fn price_label(&self) -> Option<String> {
        match self.price.as_deref() {
            None | Some("") => None,
            Some("0") => Some("Free entry".to_string()),
            Some(p) => Some(format!("{}€", p)),
        }
    }

    fn date_label(&self) -> String {
        match (self.date_start.as_deref(), self.date_end.as_deref()) {
            (Some(s), Some(e)) if s == e => s.to_string(),
            (Some(s), Some(e)) => format!("{} → {}", s, e),
            (Some(s), None) => s.to_string(),
            (None, Some(e)) => format!("until {}", e),
            (None, None) => String::new(),
        }
    }

    fn preview(&self, max_words: usize) -> String {
        self.description
            .as_deref()
            .map(|d| truncate_words(d, max_words))
            .unwrap_or_default()
    }
}
