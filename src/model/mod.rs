pub mod date;
pub mod display;
pub mod draft;
pub mod event;
pub mod matcher;

pub use draft::EventDraft;
pub use event::{Category, Event, FavoriteEntry, Profile, ReviewState};
