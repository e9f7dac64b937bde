//! Parser for interactive session commands read from stdin.

use thiserror::Error;

use crate::coordinator::UiEvent;
use crate::models::{Coordinate, LanguageCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Coordinate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Ui(UiEvent),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  click <lat> <lon>   select a point on the map
  lang <KO|EN|JA|ZH|RU>
  track               start location tracking
  stop                stop location tracking
  yes | no            answer the location prompt
  quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match verb.as_str() {
        "click" => {
            let [lat, lon] = args.as_slice() else {
                return Err(InputError::Usage("click <lat> <lon>"));
            };
            let lat: f64 = lat.parse().map_err(|_| InputError::Usage("click <lat> <lon>"))?;
            let lon: f64 = lon.parse().map_err(|_| InputError::Usage("click <lat> <lon>"))?;
            let coordinate =
                Coordinate::new(lat, lon).map_err(|e| InputError::Coordinate(e.to_string()))?;
            SessionCommand::Ui(UiEvent::MapClick(coordinate))
        }
        "lang" | "language" => {
            let [code] = args.as_slice() else {
                return Err(InputError::Usage("lang <KO|EN|JA|ZH|RU>"));
            };
            SessionCommand::Ui(UiEvent::LanguageChanged(
                LanguageCode::from_code_or_default(Some(*code)),
            ))
        }
        "track" | "start" => SessionCommand::Ui(UiEvent::StartTracking),
        "stop" | "cancel" => SessionCommand::Ui(UiEvent::StopTracking),
        "yes" | "y" => SessionCommand::Ui(UiEvent::PermissionDecision(true)),
        "no" | "n" => SessionCommand::Ui(UiEvent::PermissionDecision(false)),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click() {
        assert_eq!(
            parse_command("click 37.50 127.03").unwrap(),
            Some(SessionCommand::Ui(UiEvent::MapClick(
                Coordinate::new(37.50, 127.03).unwrap()
            )))
        );
        assert_eq!(
            parse_command("click 37.5"),
            Err(InputError::Usage("click <lat> <lon>"))
        );
        assert!(matches!(
            parse_command("click 91 0"),
            Err(InputError::Coordinate(_))
        ));
    }

    #[test]
    fn test_lang_unknown_code_means_korean() {
        assert_eq!(
            parse_command("lang en").unwrap(),
            Some(SessionCommand::Ui(UiEvent::LanguageChanged(LanguageCode::En)))
        );
        assert_eq!(
            parse_command("LANG fr").unwrap(),
            Some(SessionCommand::Ui(UiEvent::LanguageChanged(LanguageCode::Ko)))
        );
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# note").unwrap(), None);
        assert_eq!(parse_command("quit").unwrap(), Some(SessionCommand::Quit));
        assert_eq!(
            parse_command("y").unwrap(),
            Some(SessionCommand::Ui(UiEvent::PermissionDecision(true)))
        );
        assert_eq!(
            parse_command("stop").unwrap(),
            Some(SessionCommand::Ui(UiEvent::StopTracking))
        );
        assert_eq!(
            parse_command("teleport"),
            Err(InputError::Unknown("teleport".to_string()))
        );
    }
}
