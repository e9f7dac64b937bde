//! Render pipeline.
//!
//! Turns a backend result plus a language into the three display blocks:
//! the weather message verbatim, then the attractions and places sections.
//! A section with no entries (absent or empty list alike) becomes a
//! localized fallback line.

mod html;
mod localization;

pub use html::{render_html, PanelTemplate};
pub use localization::{strings, LanguageStrings};

use std::fmt;

use crate::models::{LanguageCode, Place, RecommendationResult};

/// Page title and language-select label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeading {
    pub heading: &'static str,
    pub selector_label: &'static str,
}

/// One display block for a ranked list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Listing {
        header: &'static str,
        entries: Vec<Place>,
    },
    Unavailable(&'static str),
}

impl Section {
    fn build(places: &[Place], header: &'static str, fallback: &'static str) -> Self {
        if places.is_empty() {
            Section::Unavailable(fallback)
        } else {
            Section::Listing {
                header,
                entries: places.to_vec(),
            }
        }
    }
}

/// Everything written to the weather panel for one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDocument {
    pub language: LanguageCode,
    pub weather: String,
    pub attractions: Section,
    pub places: Section,
}

/// Heading and selector label for a language. Pure and idempotent.
pub fn update_language(language: LanguageCode) -> PageHeading {
    let s = strings(language);
    PageHeading {
        heading: s.heading,
        selector_label: s.selector_label,
    }
}

/// Build the display document for a result.
pub fn render(language: LanguageCode, result: &RecommendationResult) -> DisplayDocument {
    let s = strings(language);
    DisplayDocument {
        language,
        weather: result.message.clone(),
        attractions: Section::build(
            &result.attractions,
            s.attractions_header,
            s.attractions_fallback,
        ),
        places: Section::build(&result.places, s.places_header, s.places_fallback),
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Listing { header, entries } => {
                writeln!(f, "{}", header)?;
                for place in entries {
                    writeln!(f, "  - {} <{}> — {}", place.name, place.link, place.address)?;
                }
                Ok(())
            }
            Section::Unavailable(text) => writeln!(f, "{}", text),
        }
    }
}

impl fmt::Display for DisplayDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.weather)?;
        write!(f, "{}", self.attractions)?;
        write!(f, "{}", self.places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str) -> Place {
        Place {
            name: name.to_string(),
            address: format!("{} street", name),
            link: format!("http://example.com/{}", name),
        }
    }

    #[test]
    fn test_update_language_is_idempotent() {
        for code in LanguageCode::ALL {
            assert_eq!(update_language(code), update_language(code));
        }
        assert_eq!(
            update_language(LanguageCode::En).heading,
            "Regional Weather and Recommendation Service"
        );
        assert_eq!(update_language(LanguageCode::Ko).selector_label, "언어:");
    }

    #[test]
    fn test_empty_attractions_use_attractions_fallback() {
        let result = RecommendationResult {
            message: "Sunny".to_string(),
            attractions: Vec::new(),
            places: vec![place("a")],
        };
        let doc = render(LanguageCode::En, &result);
        assert_eq!(
            doc.attractions,
            Section::Unavailable("Failed to retrieve attraction information.")
        );
        assert!(matches!(doc.places, Section::Listing { .. }));
    }

    #[test]
    fn test_listing_keeps_order() {
        let result = RecommendationResult {
            message: "m".to_string(),
            attractions: vec![place("first"), place("second"), place("third")],
            places: Vec::new(),
        };
        let doc = render(LanguageCode::Ja, &result);
        match doc.attractions {
            Section::Listing { header, entries } => {
                assert_eq!(header, "おすすめの観光地");
                let names: Vec<_> = entries.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, vec!["first", "second", "third"]);
            }
            other => panic!("expected listing, got {:?}", other),
        }
        assert_eq!(doc.places, Section::Unavailable("レストラン情報を取得できませんでした。"));
    }

    #[test]
    fn test_weather_message_is_verbatim() {
        let result = RecommendationResult::new("  <b>Clear</b>, 21°C ");
        let doc = render(LanguageCode::Ko, &result);
        assert_eq!(doc.weather, "  <b>Clear</b>, 21°C ");
    }

    #[test]
    fn test_text_form() {
        let result = RecommendationResult {
            message: "Clear, 21°C".to_string(),
            attractions: Vec::new(),
            places: vec![Place {
                name: "Kimchi House".to_string(),
                address: "123 Main".to_string(),
                link: "http://x".to_string(),
            }],
        };
        let text = render(LanguageCode::Ko, &result).to_string();
        assert_eq!(
            text,
            "Clear, 21°C\n명소 정보를 가져오는 데 실패했습니다.\n근처 맛집\n  - Kimchi House <http://x> — 123 Main\n"
        );
    }

    #[test]
    fn test_html_form_escapes_backend_text() {
        let result = RecommendationResult {
            message: "<script>x</script>".to_string(),
            attractions: vec![Place {
                name: "A & B".to_string(),
                address: "1 Road".to_string(),
                link: "javascript:alert(1)".to_string(),
            }],
            places: Vec::new(),
        };
        let doc = render(LanguageCode::En, &result);
        let html = render_html(&update_language(LanguageCode::En), &doc).unwrap();
        assert!(html.contains("Regional Weather and Recommendation Service"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("<h3>Recommended Attractions</h3>"));
        assert!(html.contains("Failed to retrieve restaurant information."));
    }
}
