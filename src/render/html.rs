//! HTML form of the display panel.

use askama::Template;
use url::Url;

use super::{DisplayDocument, PageHeading, Section};

/// Helper struct for one list entry.
pub struct EntryView {
    pub name: String,
    pub address: String,
    pub href: String,
}

/// Helper struct for a listing or its fallback line.
pub struct SectionView {
    pub listed: bool,
    pub header: String,
    pub entries: Vec<EntryView>,
    pub fallback: String,
}

/// Heading, language label and weather panel.
#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate<'a> {
    pub heading: &'a str,
    pub selector_label: &'a str,
    pub language: &'a str,
    pub weather: &'a str,
    pub sections: Vec<SectionView>,
}

/// Only http(s) links are emitted as hrefs, exactly as the backend sent them.
fn safe_href(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => link.to_string(),
        _ => "#".to_string(),
    }
}

fn section_view(section: &Section) -> SectionView {
    match section {
        Section::Listing { header, entries } => SectionView {
            listed: true,
            header: header.to_string(),
            entries: entries
                .iter()
                .map(|p| EntryView {
                    name: p.name.clone(),
                    address: p.address.clone(),
                    href: safe_href(&p.link),
                })
                .collect(),
            fallback: String::new(),
        },
        Section::Unavailable(text) => SectionView {
            listed: false,
            header: String::new(),
            entries: Vec::new(),
            fallback: text.to_string(),
        },
    }
}

pub fn render_html(heading: &PageHeading, document: &DisplayDocument) -> askama::Result<String> {
    PanelTemplate {
        heading: heading.heading,
        selector_label: heading.selector_label,
        language: document.language.as_str(),
        weather: &document.weather,
        sections: vec![
            section_view(&document.attractions),
            section_view(&document.places),
        ],
    }
    .render()
}
