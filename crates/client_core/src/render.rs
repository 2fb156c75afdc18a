use shared::domain::Film;

use crate::filter::{SortButtonLabel, SORT_BUTTON_ID};

pub const CONTAINER_ID: &str = "films-container";
pub const CARD_CLASS: &str = "film-card";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Card {
    pub fn from_film(film: &Film) -> Self {
        Self {
            title: film.title_text().to_string(),
            fields: vec![
                ("Year", film.release_year_text()),
                ("Director", film.director_text().to_string()),
                ("Box Office", film.box_office_text().to_string()),
                ("Country", film.country_text().to_string()),
            ],
        }
    }
}

pub trait Container {
    fn clear(&mut self);
    fn append(&mut self, card: Card);
}

pub fn render<C: Container + ?Sized>(container: &mut C, films: &[Film]) {
    container.clear();
    for film in films {
        container.append(Card::from_film(film));
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Default, Clone)]
pub struct HtmlContainer {
    cards: Vec<Card>,
}

impl HtmlContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn inner_html(&self) -> String {
        let mut html = String::new();
        for card in &self.cards {
            html.push_str(&format!(
                "<div class=\"{CARD_CLASS}\">\n    <h2>{}</h2>\n",
                escape_html(&card.title)
            ));
            for (label, value) in &card.fields {
                html.push_str(&format!(
                    "    <p><strong>{label}:</strong> {}</p>\n",
                    escape_html(value)
                ));
            }
            html.push_str("</div>\n");
        }
        html
    }

    pub fn outer_html(&self) -> String {
        format!(
            "<div id=\"{CONTAINER_ID}\">\n{}</div>\n",
            self.inner_html()
        )
    }
}

impl Container for HtmlContainer {
    fn clear(&mut self) {
        self.cards.clear();
    }

    fn append(&mut self, card: Card) {
        self.cards.push(card);
    }
}

#[derive(Debug, Default, Clone)]
pub struct TextContainer {
    cards: Vec<Card>,
}

impl TextContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&card.title);
            out.push('\n');
            for (label, value) in &card.fields {
                out.push_str(&format!("  {label}: {value}\n"));
            }
        }
        out
    }
}

impl Container for TextContainer {
    fn clear(&mut self) {
        self.cards.clear();
    }

    fn append(&mut self, card: Card) {
        self.cards.push(card);
    }
}

pub fn sort_button_html(label: SortButtonLabel) -> String {
    format!(
        "<button id=\"{SORT_BUTTON_ID}\">{}</button>\n",
        escape_html(label.text())
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
