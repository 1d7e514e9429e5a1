//! Card color palette.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Color Choice
// ============================================================================

/// Colors a user can pick for the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Olive header on a sand background.
    Green,
    /// Navy header on a periwinkle background.
    Blue,
    /// Coral header on a lavender background.
    Pink,
    /// Maroon header on a terracotta background.
    Red,
}

impl ColorChoice {
    /// Returns all colors in prompt order.
    pub fn all() -> &'static [ColorChoice] {
        &[Self::Green, Self::Blue, Self::Pink, Self::Red]
    }

    /// Returns the lowercase name used on the command line and in the profile.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Pink => "pink",
            Self::Red => "red",
        }
    }

    /// Returns the theme colors for this choice.
    pub fn theme(&self) -> Theme {
        match self {
            Self::Green => Theme {
                wrapper_background: "#E6E1C3",
                header_background: "#C1C72C",
                header_color: "black",
                photo_border_color: "black",
            },
            Self::Blue => Theme {
                wrapper_background: "#5F64D3",
                header_background: "#26175A",
                header_color: "white",
                photo_border_color: "#73448C",
            },
            Self::Pink => Theme {
                wrapper_background: "#879CDF",
                header_background: "#FF8374",
                header_color: "white",
                photo_border_color: "#FEE24C",
            },
            Self::Red => Theme {
                wrapper_background: "#DE9967",
                header_background: "#870603",
                header_color: "white",
                photo_border_color: "white",
            },
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .find(|c| c.name() == wanted)
            .copied()
            .ok_or_else(|| CoreError::UnknownColor(s.trim().to_string()))
    }
}

// ============================================================================
// Theme
// ============================================================================

/// CSS colors used when rendering a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Page background behind the card.
    pub wrapper_background: &'static str,
    /// Card header and stat tile background.
    pub header_background: &'static str,
    /// Text color on the header background.
    pub header_color: &'static str,
    /// Avatar border color.
    pub photo_border_color: &'static str,
}
