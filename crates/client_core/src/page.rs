use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    filter::{FilterController, SortButtonLabel},
    loader::{self, DatasetSource},
    render::{render, Container},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Ready,
    SearchInput(String),
    SortClicked,
}

pub struct Page<C: Container> {
    container: C,
    sort_label: Option<SortButtonLabel>,
    controller: Option<FilterController>,
    loaded: bool,
}

impl<C: Container> Page<C> {
    pub fn new(container: C) -> Self {
        Self {
            container,
            sort_label: None,
            controller: None,
            loaded: false,
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn sort_label(&self) -> Option<SortButtonLabel> {
        self.sort_label
    }

    /// Before the first activation the button offers a descending sort.
    pub fn sort_button_label(&self) -> SortButtonLabel {
        self.sort_label.unwrap_or(SortButtonLabel::NextDescending)
    }

    pub fn controller(&self) -> Option<&FilterController> {
        self.controller.as_ref()
    }

    pub async fn ready(&mut self, source: &dyn DatasetSource) {
        if self.loaded {
            warn!("page already loaded; ignoring repeated ready signal");
            return;
        }
        self.loaded = true;

        let Some(films) = loader::load(source).await else {
            return;
        };
        render(&mut self.container, &films);
        self.controller = Some(FilterController::new(films));
    }

    /// Interactions before the dataset is captured are dropped.
    pub fn interact(&mut self, event: &PageEvent) {
        let Some(controller) = self.controller.as_mut() else {
            debug!(?event, "no dataset captured; interaction ignored");
            return;
        };
        match event {
            PageEvent::SearchInput(value) => {
                let view = controller.on_search_input(value);
                render(&mut self.container, &view);
            }
            PageEvent::SortClicked => {
                let (view, label) = controller.on_sort_activated();
                self.sort_label = Some(label);
                render(&mut self.container, &view);
            }
            PageEvent::Ready => {}
        }
    }

    pub async fn dispatch(&mut self, event: PageEvent, source: &dyn DatasetSource) {
        match event {
            PageEvent::Ready => self.ready(source).await,
            other => self.interact(&other),
        }
    }
}

/// `on_update` runs after every event; the loop ends when all senders drop.
pub async fn run_event_loop<C, F>(
    page: &mut Page<C>,
    source: &dyn DatasetSource,
    mut events: mpsc::Receiver<PageEvent>,
    mut on_update: F,
) where
    C: Container,
    F: FnMut(&Page<C>),
{
    while let Some(event) = events.recv().await {
        page.dispatch(event, source).await;
        on_update(page);
    }
    info!("page event stream closed");
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
