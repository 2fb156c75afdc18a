use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::{domain::Film, error::LoadError};

use crate::{
    render::HtmlContainer,
    test_support::film,
};

struct StaticSource {
    films: Option<Vec<Film>>,
    fetches: Arc<AtomicUsize>,
}

impl StaticSource {
    fn ok(films: Vec<Film>) -> Self {
        Self {
            films: Some(films),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            films: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Film>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.films
            .clone()
            .ok_or_else(|| LoadError::Request("connection refused".into()))
    }

    fn describe(&self) -> String {
        "static".into()
    }
}

fn card_titles(page: &Page<HtmlContainer>) -> Vec<String> {
    page.container()
        .cards()
        .iter()
        .map(|card| card.title.clone())
        .collect()
}

#[tokio::test]
async fn ready_renders_full_dataset() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0), film("B", "Y", 1.0)]);
    let mut page = Page::new(HtmlContainer::new());
    page.ready(&source).await;

    assert_eq!(card_titles(&page), ["A", "B"]);
    assert!(page.controller().is_some());
    assert_eq!(page.sort_label(), None);
}

#[tokio::test]
async fn fetch_failure_leaves_page_empty_and_inert() {
    let source = StaticSource::failing();
    let mut page = Page::new(HtmlContainer::new());
    page.ready(&source).await;
    assert!(page.container().cards().is_empty());
    assert!(page.controller().is_none());

    page.interact(&PageEvent::SortClicked);
    page.interact(&PageEvent::SearchInput(String::new()));
    assert!(page.container().cards().is_empty());
    assert_eq!(page.sort_label(), None);
}

#[tokio::test]
async fn dataset_is_fetched_once_per_page() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0)]);
    let mut page = Page::new(HtmlContainer::new());
    page.dispatch(PageEvent::Ready, &source).await;
    page.dispatch(PageEvent::Ready, &source).await;
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn interactions_before_ready_are_dropped() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0), film("B", "Y", 1.0)]);
    let mut page = Page::new(HtmlContainer::new());
    page.interact(&PageEvent::SortClicked);
    page.ready(&source).await;

    page.interact(&PageEvent::SortClicked);
    assert_eq!(
        page.sort_label().map(SortButtonLabel::text),
        Some("Sort by Box Office (Ascending)")
    );
}

#[tokio::test]
async fn sort_then_search_rerenders_from_base() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0), film("B", "Y", 1.0)]);
    let mut page = Page::new(HtmlContainer::new());
    page.ready(&source).await;

    page.interact(&PageEvent::SortClicked);
    assert_eq!(card_titles(&page), ["A", "B"]);
    page.interact(&PageEvent::SortClicked);
    assert_eq!(card_titles(&page), ["B", "A"]);
    assert_eq!(page.sort_label(), Some(SortButtonLabel::NextDescending));

    page.interact(&PageEvent::SearchInput("X".into()));
    assert_eq!(card_titles(&page), ["A"]);
    page.interact(&PageEvent::SearchInput("no match".into()));
    assert!(card_titles(&page).is_empty());
}

#[tokio::test]
async fn event_loop_processes_events_until_sender_drops() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0), film("B", "Y", 1.0)]);
    let mut page = Page::new(HtmlContainer::new());
    let (tx, rx) = mpsc::channel(8);

    tx.send(PageEvent::Ready).await.expect("send");
    tx.send(PageEvent::SortClicked).await.expect("send");
    tx.send(PageEvent::SortClicked).await.expect("send");
    tx.send(PageEvent::SearchInput("y".into())).await.expect("send");
    drop(tx);

    let mut snapshots = Vec::new();
    run_event_loop(&mut page, &source, rx, |page| {
        snapshots.push(card_titles(page).join(","));
    })
    .await;

    assert_eq!(snapshots, ["A,B", "A,B", "B,A", "B"]);
}

#[tokio::test]
async fn sort_button_label_defaults_to_descending_then_flips() {
    let source = StaticSource::ok(vec![film("A", "X", 3.0)]);
    let mut page = Page::new(HtmlContainer::new());
    assert_eq!(page.sort_button_label(), SortButtonLabel::NextDescending);

    page.ready(&source).await;
    page.interact(&PageEvent::SortClicked);
    assert_eq!(page.sort_button_label(), SortButtonLabel::NextAscending);
}
