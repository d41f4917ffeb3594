use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LegoSet – one record of the brickset dump
// ---------------------------------------------------------------------------

/// Group key used for records that carry no `theme`.
///
/// Sets whose theme is literally `"unknown"` land in the same group.
pub const UNKNOWN_THEME: &str = "unknown";

/// A single LEGO set as described in the brickset JSON file.
///
/// Unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegoSet {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// `None` means the set has no subtheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl LegoSet {
    /// A bare record with only a name and theme, handy for building fixtures.
    pub fn new(name: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theme: Some(theme.into()),
            subtheme: None,
            pieces: None,
            tags: None,
        }
    }

    pub fn with_subtheme(mut self, subtheme: impl Into<String>) -> Self {
        self.subtheme = Some(subtheme.into());
        self
    }

    pub fn with_pieces(mut self, pieces: u32) -> Self {
        self.pieces = Some(pieces);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// The grouping key: the theme, or [`UNKNOWN_THEME`] when absent.
    pub fn theme_key(&self) -> &str {
        self.theme.as_deref().unwrap_or(UNKNOWN_THEME)
    }
}
