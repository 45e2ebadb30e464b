// Crate root library declaration and module exports.
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod moderation;
pub mod pagination;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{EventError, EventResult};
