use super::*;
use std::io::Write as _;

const DATASET: &str = r#"[
    {"title":"A","director":"X","rank":3},
    {"title":"B","director":"Y","rank":1}
]"#;

async fn loaded_page<C>(container: C) -> (Page<C>, tempfile::NamedTempFile)
where
    C: client_core::Container,
{
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(DATASET.as_bytes()).expect("write");
    let mut page = Page::new(container);
    page.ready(&FileSource::new(file.path())).await;
    (page, file)
}

#[tokio::test]
async fn html_snapshot_shows_sort_button_label_flips() {
    let (mut page, _file) = loaded_page(HtmlContainer::new()).await;

    let before = html_snapshot(&page);
    assert!(before
        .starts_with("<button id=\"sort-by-box-office\">Sort by Box Office (Descending)</button>"));
    assert!(before.contains("<div id=\"films-container\">"));

    page.interact(&PageEvent::SortClicked);
    let after = html_snapshot(&page);
    assert!(after.contains(">Sort by Box Office (Ascending)</button>"));
    assert!(after.find("<h2>A</h2>") < after.find("<h2>B</h2>"));

    page.interact(&PageEvent::SortClicked);
    let again = html_snapshot(&page);
    assert!(again.contains(">Sort by Box Office (Descending)</button>"));
    assert!(again.find("<h2>B</h2>") < again.find("<h2>A</h2>"));
}

#[tokio::test]
async fn text_snapshot_prefixes_label_once_sorted() {
    let (mut page, _file) = loaded_page(TextContainer::new()).await;
    assert!(text_snapshot(&page).starts_with("A\n"));

    page.interact(&PageEvent::SortClicked);
    assert!(text_snapshot(&page).starts_with("[Sort by Box Office (Ascending)]\nA\n"));
}

#[tokio::test]
async fn snapshots_replace_output_file_contents() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("page.html");
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send("first".to_string()).expect("send");
    tx.send("second".to_string()).expect("send");
    drop(tx);
    write_snapshots(rx, Some(output.clone())).await;

    let written = tokio::fs::read_to_string(&output).await.expect("read");
    assert_eq!(written, "second");
}
