use queries::EntitySummary;
use serde::Serialize;

use crate::forms::{GENRES, STATES};

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SummaryItem {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<EntitySummary> for SummaryItem {
    fn from(summary: EntitySummary) -> Self {
        SummaryItem {
            id: summary.id,
            name: summary.name,
            num_upcoming_shows: summary.num_upcoming_shows,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SummaryItem>,
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchContext {
    pub results: SearchResults,
    pub search_term: String,
}

impl SearchContext {
    pub fn new(search_term: String, found: Vec<EntitySummary>) -> Self {
        let data: Vec<SummaryItem> = found.into_iter().map(SummaryItem::from).collect();
        SearchContext {
            results: SearchResults {
                count: data.len(),
                data,
            },
            search_term,
        }
    }
}

/// Options for the state and genre selects of the venue and artist forms.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct FormChoices {
    pub states: &'static [&'static str],
    pub genres: &'static [&'static str],
}

impl Default for FormChoices {
    fn default() -> Self {
        FormChoices {
            states: STATES,
            genres: GENRES,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Choice {
    pub id: i32,
    pub name: String,
}
