//! Read-only backing data for the capability handlers.
//!
//! Everything in this module is constructed once at startup and never
//! mutated, which is what lets handlers run concurrently without locks.

mod documents;
mod knowledge;
mod web;

pub use documents::{Document, DocumentStore};
pub use knowledge::KnowledgeBase;
pub use web::{SearchHit, SearchIndex};
