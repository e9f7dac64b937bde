//! Terminal display sink.

use std::path::PathBuf;

use console::style;
use tracing::warn;

use crate::coordinator::DisplaySink;
use crate::models::LanguageCode;
use crate::render::{render_html, update_language, DisplayDocument, PageHeading, Section};

/// Prints panel updates to stdout and optionally mirrors them as HTML.
pub struct TerminalSink {
    heading: PageHeading,
    html_out: Option<PathBuf>,
}

impl TerminalSink {
    pub fn new(html_out: Option<PathBuf>) -> Self {
        Self {
            heading: update_language(LanguageCode::default()),
            html_out,
        }
    }

    fn write_html(&self, document: &DisplayDocument) {
        let Some(path) = &self.html_out else {
            return;
        };
        let result = render_html(&self.heading, document)
            .map_err(anyhow::Error::from)
            .and_then(|html| std::fs::write(path, html).map_err(anyhow::Error::from));
        if let Err(e) = result {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

pub fn print_section(section: &Section) {
    match section {
        Section::Listing { header, entries } => {
            println!("\n{}", style(header).bold());
            for place in entries {
                println!(
                    "  {} {} {}",
                    style(&place.name).green(),
                    style(format!("<{}>", place.link)).dim(),
                    place.address
                );
            }
        }
        Section::Unavailable(text) => println!("{}", style(text).yellow()),
    }
}

pub fn print_document(document: &DisplayDocument) {
    println!("\n{}", style(&document.weather).cyan());
    print_section(&document.attractions);
    print_section(&document.places);
}

impl DisplaySink for TerminalSink {
    fn show_heading(&mut self, heading: &PageHeading) {
        self.heading = *heading;
        println!(
            "\n{}  {}",
            style(heading.heading).bold().underlined(),
            style(heading.selector_label).dim()
        );
    }

    fn show_document(&mut self, document: &DisplayDocument) {
        print_document(document);
        self.write_html(document);
    }
}
