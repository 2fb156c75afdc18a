use std::sync::Arc;

use shared::domain::Film;
use tracing::debug;

pub const SORT_BUTTON_ID: &str = "sort-by-box-office";
pub const SEARCH_INPUT_ID: &str = "search";

pub type View = Vec<Film>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortButtonLabel {
    NextAscending,
    NextDescending,
}

impl SortButtonLabel {
    pub fn text(self) -> &'static str {
        match self {
            Self::NextAscending => "Sort by Box Office (Ascending)",
            Self::NextDescending => "Sort by Box Office (Descending)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub sort_descending: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            sort_descending: true,
        }
    }
}

/// Every view is derived from the base captured at construction, never from
/// a previous view, so search and sort do not compose.
#[derive(Debug, Clone)]
pub struct FilterController {
    base: Arc<[Film]>,
    state: FilterState,
}

impl FilterController {
    pub fn new(base: Vec<Film>) -> Self {
        Self {
            base: base.into(),
            state: FilterState::default(),
        }
    }

    pub fn base(&self) -> &[Film] {
        &self.base
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn on_search_input(&mut self, raw: &str) -> View {
        self.state.search_query = raw.to_lowercase();
        let view = search(&self.base, &self.state.search_query);
        debug!(
            query = %self.state.search_query,
            matched = view.len(),
            "search applied"
        );
        view
    }

    pub fn on_sort_activated(&mut self) -> (View, SortButtonLabel) {
        let descending = self.state.sort_descending;
        let view = sort_by_rank(&self.base, descending);
        let label = if descending {
            SortButtonLabel::NextAscending
        } else {
            SortButtonLabel::NextDescending
        };
        self.state.sort_descending = !descending;
        debug!(descending, "sort applied");
        (view, label)
    }
}

/// `query` must already be lower-cased.
pub fn search(films: &[Film], query: &str) -> View {
    films
        .iter()
        .filter(|film| {
            film.title_text().to_lowercase().contains(query)
                || film.director_text().to_lowercase().contains(query)
        })
        .cloned()
        .collect()
}

pub fn sort_by_rank(films: &[Film], descending: bool) -> View {
    let mut sorted = films.to_vec();
    if descending {
        sorted.sort_by(|a, b| b.cmp_rank(a));
    } else {
        sorted.sort_by(|a, b| a.cmp_rank(b));
    }
    sorted
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
