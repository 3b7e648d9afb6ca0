//! Adaptive review engine: owns the review item collection and drives
//! the evaluate-then-schedule control flow on top of `review-core`.
//!
//! Transport, authentication and speech-to-text integration live in the
//! embedding application; this crate only exposes plain data and an
//! in-process service API.

pub mod error;
pub mod maintenance;
pub mod models;
pub mod service;
pub mod store;

pub use error::{EngineError, Result};
pub use models::{DueDigest, ItemKind, NewReviewItem, OwnerStats, ReviewHistory, ReviewItem};
pub use service::{AttemptInput, AttemptOutcome, ReviewService};
pub use store::{memory::MemoryStore, ReviewItemStore};
