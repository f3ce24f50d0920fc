use serde::{Deserialize, Serialize};

/// One job posting scraped from a listing page.
///
/// `link` is always absolute and identifies the record within a run.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub location: String,
    pub description: String,
}

impl JobRecord {
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
