//! Indentation configuration for printed output.

/// Indentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the canonical SDL style.
    pub const SDL: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to 2 whitespaces
            Self::Spaces(_) => "  ",
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::SDL
    }
}
