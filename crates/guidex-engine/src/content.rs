//! Displayable content for prompts, options, and explanations.
//!
//! Content is an explicit tagged variant: hosts route [`Content::Notation`]
//! through a math-notation renderer and display [`Content::Text`] literally.
//! The legacy character heuristic survives only as the import path for
//! untagged strings, so content type is data, not something re-inferred at
//! every render.

use serde::{Deserialize, Serialize};

/// Displayable content, opaque to the engine's state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, displayed literally.
    Text(String),
    /// Math-notation markup, routed through a notation renderer by hosts.
    Notation(String),
}

impl Content {
    /// Classifies a bare string using the legacy heuristic: anything
    /// containing a backslash or caret is treated as notation markup.
    ///
    /// The heuristic only affects display routing; it never influences
    /// answer judging or any other engine state.
    ///
    /// # Examples
    ///
    /// ```
    /// use guidex_engine::Content;
    ///
    /// assert!(Content::detect(r"\frac{dy}{dx}").is_notation());
    /// assert!(Content::detect("x^2 + 1").is_notation());
    /// assert!(!Content::detect("a 90 degree rotation").is_notation());
    /// ```
    #[must_use]
    pub fn detect(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if looks_like_notation(&raw) {
            Self::Notation(raw)
        } else {
            Self::Text(raw)
        }
    }

    /// Returns the underlying string regardless of variant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Notation(s) => s,
        }
    }

    /// Returns `true` if this content should be routed through a notation
    /// renderer.
    #[must_use]
    pub const fn is_notation(&self) -> bool {
        matches!(self, Self::Notation(_))
    }

    /// Demotes notation to plain text in place, leaving text untouched.
    ///
    /// Used when a sequence is loaded with [`NotationMode::Plain`].
    pub fn make_plain(&mut self) {
        if let Self::Notation(s) = self {
            *self = Self::Text(std::mem::take(s));
        }
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let (kind, value) = match self {
            Self::Text(s) => ("text", s),
            Self::Notation(s) => ("notation", s),
        };
        let mut state = serializer.serialize_struct("Content", 2)?;
        state.serialize_field("kind", kind)?;
        state.serialize_field("value", value)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "snake_case")]
        enum Kind {
            Text,
            Notation,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Tagged { kind: Kind, value: String },
            Plain(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Tagged {
                kind: Kind::Text,
                value,
            } => Ok(Self::Text(value)),
            Repr::Tagged {
                kind: Kind::Notation,
                value,
            } => Ok(Self::Notation(value)),
            // Bare strings are classified with the legacy heuristic.
            Repr::Plain(raw) => Ok(Self::detect(raw)),
        }
    }
}

/// How content in a sequence definition is prepared for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotationMode {
    /// Untagged strings are classified with the notation heuristic (default).
    #[default]
    Auto,
    /// All content is displayed literally; notation rendering is disabled.
    Plain,
}

impl NotationMode {
    /// Returns `true` if notation rendering is enabled for this mode.
    #[must_use]
    pub const fn renders_notation(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// The legacy content heuristic: backslash or caret means notation markup.
fn looks_like_notation(s: &str) -> bool {
    s.contains('\\') || s.contains('^')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_backslash_is_notation() {
        assert_eq!(
            Content::detect(r"\frac{d}{dx}(uv) = u'v + uv'"),
            Content::Notation(r"\frac{d}{dx}(uv) = u'v + uv'".to_string())
        );
    }

    #[test]
    fn test_detect_caret_is_notation() {
        assert!(Content::detect("f(x) = x^3").is_notation());
    }

    #[test]
    fn test_detect_plain_text() {
        let content = Content::detect("Rotate the triangle 90 degrees clockwise");
        assert!(!content.is_notation());
        assert_eq!(content.as_str(), "Rotate the triangle 90 degrees clockwise");
    }

    #[test]
    fn test_detect_empty_string_is_text() {
        assert_eq!(Content::detect(""), Content::Text(String::new()));
    }

    #[test]
    fn test_make_plain_demotes_notation() {
        let mut content = Content::Notation("x^2".to_string());
        content.make_plain();
        assert_eq!(content, Content::Text("x^2".to_string()));
    }

    #[test]
    fn test_make_plain_leaves_text_untouched() {
        let mut content = Content::Text("hello".to_string());
        content.make_plain();
        assert_eq!(content, Content::Text("hello".to_string()));
    }

    #[test]
    fn test_display_shows_raw_string() {
        assert_eq!(Content::Notation("x^2".to_string()).to_string(), "x^2");
        assert_eq!(Content::Text("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_string(&Content::Notation("x^2".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"notation","value":"x^2"}"#);

        let json = serde_json::to_string(&Content::Text("hi".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"text","value":"hi"}"#);
    }

    #[test]
    fn test_deserialization_accepts_tagged_form() {
        let content: Content =
            serde_json::from_str(r#"{"kind":"notation","value":"plain words"}"#).unwrap();
        // Explicit tags win even when the heuristic would disagree.
        assert_eq!(content, Content::Notation("plain words".to_string()));

        let content: Content = serde_json::from_str(r#"{"kind":"text","value":"x^2"}"#).unwrap();
        assert_eq!(content, Content::Text("x^2".to_string()));
    }

    #[test]
    fn test_deserialization_classifies_bare_strings() {
        let content: Content = serde_json::from_str(r#""x^2 - 4""#).unwrap();
        assert!(content.is_notation());

        let content: Content = serde_json::from_str(r#""a plain prompt""#).unwrap();
        assert!(!content.is_notation());
    }

    #[test]
    fn test_roundtrip_preserves_variant() {
        let original = Content::Notation("no special chars here".to_string());
        let json = serde_json::to_string(&original).unwrap();
        let restored: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_notation_mode_default_is_auto() {
        assert_eq!(NotationMode::default(), NotationMode::Auto);
        assert!(NotationMode::Auto.renders_notation());
        assert!(!NotationMode::Plain.renders_notation());
    }

    #[test]
    fn test_notation_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&NotationMode::Auto).unwrap(),
            r#""auto""#
        );
        assert_eq!(
            serde_json::to_string(&NotationMode::Plain).unwrap(),
            r#""plain""#
        );
    }
}
