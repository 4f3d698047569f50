//! Inline button payloads
//!
//! Telegram hands button presses back as an opaque string (max 64 bytes).
//! Payloads are decoded once, at the boundary, into [`CallbackAction`]:
//!
//! - `nav:<key>:<index>` - show page `index` of carousel `key`
//! - `noop` - disabled edge button
//! - `more` / `send` / `reset` - after-save menu of the collecting user

use std::fmt;

use super::registry::CarouselKey;

const NAV_TAG: &str = "nav";
const SEPARATOR: char = ':';
const NOOP: &str = "noop";
const MORE: &str = "more";
const PUBLISH: &str = "send";
const RESET: &str = "reset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Page through a published carousel. The index is clamped on use.
    Navigate { key: CarouselKey, index: i64 },
    Noop,
    More,
    Publish,
    Reset,
    /// Anything that does not decode; answered without side effects.
    Unknown(String),
}

impl CallbackAction {
    pub fn navigate(key: CarouselKey, index: usize) -> Self {
        Self::Navigate {
            key,
            index: i64::try_from(index).unwrap_or(i64::MAX),
        }
    }

    pub fn parse(data: &str) -> Self {
        match data {
            NOOP => return Self::Noop,
            MORE => return Self::More,
            PUBLISH => return Self::Publish,
            RESET => return Self::Reset,
            _ => {}
        }

        let mut parts = data.splitn(3, SEPARATOR);
        let (Some(NAV_TAG), Some(key), Some(index)) = (parts.next(), parts.next(), parts.next()) else {
            return Self::Unknown(data.to_string());
        };

        match (CarouselKey::parse(key), index.parse::<i64>()) {
            (Some(key), Ok(index)) => Self::Navigate { key, index },
            _ => Self::Unknown(data.to_string()),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Self::Navigate { key, index } => format!("{NAV_TAG}{SEPARATOR}{key}{SEPARATOR}{index}"),
            Self::Noop => NOOP.to_string(),
            Self::More => MORE.to_string(),
            Self::Publish => PUBLISH.to_string(),
            Self::Reset => RESET.to_string(),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> CarouselKey {
        CarouselKey::parse(s).unwrap()
    }

    #[test]
    fn test_parse_fixed_literals() {
        assert_eq!(CallbackAction::parse("noop"), CallbackAction::Noop);
        assert_eq!(CallbackAction::parse("more"), CallbackAction::More);
        assert_eq!(CallbackAction::parse("send"), CallbackAction::Publish);
        assert_eq!(CallbackAction::parse("reset"), CallbackAction::Reset);
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(
            CallbackAction::parse("nav:k3x9a1b2:4"),
            CallbackAction::Navigate {
                key: key("k3x9a1b2"),
                index: 4
            }
        );
    }

    #[test]
    fn test_parse_keeps_out_of_range_index() {
        assert_eq!(
            CallbackAction::parse("nav:abc:-3"),
            CallbackAction::Navigate {
                key: key("abc"),
                index: -3
            }
        );
        assert_eq!(
            CallbackAction::parse("nav:abc:999"),
            CallbackAction::Navigate {
                key: key("abc"),
                index: 999
            }
        );
    }

    #[test]
    fn test_parse_malformed() {
        for raw in [
            "",
            "nav",
            "nav:abc",
            "nav::1",
            "nav:abc:x",
            "nav:ab-c:1",
            "nav:abc:1:2",
            "page:abc:1",
            "NOOP",
        ] {
            assert_eq!(CallbackAction::parse(raw), CallbackAction::Unknown(raw.to_string()), "{}", raw);
        }
    }

    #[test]
    fn test_encode_matches_wire_format() {
        assert_eq!(CallbackAction::navigate(key("abcd1234"), 2).encode(), "nav:abcd1234:2");
        assert_eq!(CallbackAction::Noop.encode(), "noop");
        assert_eq!(CallbackAction::Publish.to_string(), "send");
    }

    #[test]
    fn test_encoded_navigation_fits_callback_limit() {
        let longest = CallbackAction::Navigate {
            key: key(&"z".repeat(32)),
            index: i64::MIN,
        };
        assert!(longest.encode().len() <= 64);
        assert_eq!(CallbackAction::parse(&longest.encode()), longest);
    }
}
