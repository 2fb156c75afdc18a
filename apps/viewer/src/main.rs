use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use client_core::{
    run_event_loop, sort_button_html, DatasetSource, FileSource, HtmlContainer, HttpSource, Page,
    PageEvent, TextContainer,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    sync::mpsc,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod input;

use input::{parse_line, Input, QUIT_COMMAND, SORT_COMMAND};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
}

#[derive(Parser, Debug)]
#[command(about = "Browse a film dataset with search and rank sorting")]
#[command(group(ArgGroup::new("source").required(true).args(["server_url", "file"])))]
struct Args {
    /// Page URL; `films.json?v=1` is resolved relative to it.
    #[arg(long)]
    server_url: Option<String>,
    /// Local dataset file.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
    /// Write the rendered container here after every event instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let source: Box<dyn DatasetSource> = if let Some(url) = &args.server_url {
        Box::new(HttpSource::new(url).with_context(|| format!("invalid --server-url '{url}'"))?)
    } else if let Some(path) = &args.file {
        Box::new(FileSource::new(path))
    } else {
        bail!("one of --server-url or --file is required");
    };

    let (tx, rx) = mpsc::channel(32);
    tx.send(PageEvent::Ready)
        .await
        .context("page event loop closed before start")?;
    tokio::spawn(read_stdin(tx));
    eprintln!("type to search, {SORT_COMMAND} to sort by rank, {QUIT_COMMAND} to exit");

    let (snapshots, pending) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_snapshots(pending, args.output.clone()));
    match args.format {
        Format::Text => {
            let mut page = Page::new(TextContainer::new());
            run_event_loop(&mut page, source.as_ref(), rx, |page| {
                if snapshots.send(text_snapshot(page)).is_err() {
                    error!("snapshot writer stopped");
                }
            })
            .await;
        }
        Format::Html => {
            let mut page = Page::new(HtmlContainer::new());
            run_event_loop(&mut page, source.as_ref(), rx, |page| {
                if snapshots.send(html_snapshot(page)).is_err() {
                    error!("snapshot writer stopped");
                }
            })
            .await;
        }
    }
    drop(snapshots);
    writer.await.context("snapshot writer panicked")?;
    Ok(())
}

/// Feeds stdin lines to the page until EOF or `:quit`.
async fn read_stdin(tx: mpsc::Sender<PageEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                error!(%error, "failed to read stdin");
                break;
            }
        };
        match parse_line(&line) {
            Input::Quit => break,
            Input::Event(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        }
    }
    info!("input closed");
}

fn text_snapshot(page: &Page<TextContainer>) -> String {
    let body = page.container().to_text();
    match page.sort_label() {
        Some(label) => format!("[{}]\n{body}", label.text()),
        None => body,
    }
}

fn html_snapshot(page: &Page<HtmlContainer>) -> String {
    format!(
        "{}{}",
        sort_button_html(page.sort_button_label()),
        page.container().outer_html()
    )
}

/// Each snapshot replaces the previous one in `output`, or is printed.
async fn write_snapshots(mut pending: mpsc::UnboundedReceiver<String>, output: Option<PathBuf>) {
    let mut stdout = tokio::io::stdout();
    while let Some(rendered) = pending.recv().await {
        let result = match &output {
            Some(path) => tokio::fs::write(path, rendered.as_bytes()).await,
            None => print_snapshot(&mut stdout, &rendered).await,
        };
        if let Err(error) = result {
            error!(%error, "failed to write rendered page");
        }
    }
}

async fn print_snapshot(stdout: &mut Stdout, rendered: &str) -> io::Result<()> {
    stdout.write_all(rendered.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
