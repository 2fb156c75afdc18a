use client_core::PageEvent;

pub const SORT_COMMAND: &str = ":sort";
pub const QUIT_COMMAND: &str = ":quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Event(PageEvent),
    Quit,
}

/// Anything that is not a command is typed into the search box verbatim.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.trim() {
        SORT_COMMAND => Input::Event(PageEvent::SortClicked),
        QUIT_COMMAND => Input::Quit,
        _ => Input::Event(PageEvent::SearchInput(line.to_string())),
    }
}
