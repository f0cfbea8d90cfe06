//! travel-diary - Local travel journal
//!
//! Records trip entries (date, place, notes) with an optional photo and
//! doodle, keeps them in a single JSON document next to their PNG assets,
//! and asks an AI chat service for trip narratives and travel ideas.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DiaryError;
