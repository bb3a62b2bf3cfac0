//! Attribute names and the loose literal parsing authored data relies on.

use serde::{Deserialize, Serialize};

/// Prefix that marks a skill attribute, e.g. `skill.observation`.
pub const SKILL_PREFIX: &str = "skill.";

/// A named piece of dialogue state, decided once from its authored name.
///
/// Reserved names are matched case-insensitively. Anything that is not
/// reserved is a flag by convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Trust,
    LastTopic,
    /// Skill name with the `skill.` prefix removed.
    Skill(String),
    Flag(String),
}

impl Attribute {
    /// Classify an authored attribute name.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();

        if name.eq_ignore_ascii_case("trust") {
            return Attribute::Trust;
        }
        if name.eq_ignore_ascii_case("last_topic") {
            return Attribute::LastTopic;
        }
        match strip_prefix_ignore_case(name, SKILL_PREFIX) {
            Some(skill) => Attribute::Skill(skill.to_string()),
            None => Attribute::Flag(name.to_string()),
        }
    }

    /// The authored form of this attribute.
    pub fn as_string(&self) -> String {
        match self {
            Attribute::Trust => "trust".to_string(),
            Attribute::LastTopic => "last_topic".to_string(),
            Attribute::Skill(name) => format!("{}{}", SKILL_PREFIX, name),
            Attribute::Flag(name) => name.clone(),
        }
    }

    /// Whether this attribute holds an integer.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Attribute::Trust | Attribute::Skill(_))
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Strip `prefix` from the front of `s`, ignoring ASCII case.
pub fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Parse an integer the way C's `atoi` does.
///
/// Leading whitespace and one sign are accepted, digits are read until the
/// first non-digit, and anything unparseable yields 0. Out-of-range values
/// saturate.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(byte - b'0');
        // Past i32 range already; stop before i64 can overflow.
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse a `true`/`false` literal, ignoring case and surrounding whitespace.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_attributes_ignore_case() {
        assert_eq!(Attribute::parse("trust"), Attribute::Trust);
        assert_eq!(Attribute::parse("TRUST"), Attribute::Trust);
        assert_eq!(Attribute::parse("Last_Topic"), Attribute::LastTopic);
        assert_eq!(
            Attribute::parse("Skill.observation"),
            Attribute::Skill("observation".to_string())
        );
    }

    #[test]
    fn test_unknown_names_are_flags() {
        assert_eq!(
            Attribute::parse("Clue_Cinema_MainDoor"),
            Attribute::Flag("Clue_Cinema_MainDoor".to_string())
        );
        // No dot, so not a skill.
        assert_eq!(
            Attribute::parse("skillful"),
            Attribute::Flag("skillful".to_string())
        );
    }

    #[test]
    fn test_attribute_as_string() {
        assert_eq!(Attribute::Trust.as_string(), "trust");
        assert_eq!(
            Attribute::Skill("lockpicking".to_string()).as_string(),
            "skill.lockpicking"
        );
        assert!(Attribute::Skill("x".to_string()).is_numeric());
        assert!(!Attribute::LastTopic.is_numeric());
    }

    #[test]
    fn test_parse_int_c_style() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  -3"), -3);
        assert_eq!(parse_int("+7"), 7);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999999999999"), i32::MIN);
        assert_eq!(parse_int("-2147483648"), i32::MIN);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" FALSE "), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("1"), None);
    }

    #[test]
    fn test_strip_prefix_ignore_case_short_input() {
        assert_eq!(strip_prefix_ignore_case("sk", SKILL_PREFIX), None);
        assert_eq!(strip_prefix_ignore_case("SKILL.a", SKILL_PREFIX), Some("a"));
    }
}
