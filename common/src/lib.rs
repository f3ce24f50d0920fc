//! Shared pieces of the job board scraper: the `JobRecord` model,
//! job board addressing and the HTML extraction heuristics used by both
//! the live API and the bulk exporter.

pub mod detail;
pub mod extract;
pub mod site;
pub mod text;

mod job;

pub use job::JobRecord;
pub use site::{Site, USER_AGENT};
