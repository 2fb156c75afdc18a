pub mod filter;
pub mod loader;
pub mod page;
pub mod render;

pub use filter::{FilterController, FilterState, SortButtonLabel, View};
pub use loader::{load, DatasetSource, FileSource, HttpSource};
pub use page::{run_event_loop, Page, PageEvent};
pub use render::{
    escape_html, render, sort_button_html, Card, Container, HtmlContainer, TextContainer,
};
