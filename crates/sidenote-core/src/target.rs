//! Output targets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The output format a document is being generated for.
///
/// Fixed for a whole run; every tag handler branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// HTML pages.
    #[default]
    Html,
    /// LaTeX source.
    Ltx,
    /// PDF, produced by running the LaTeX output through a TeX engine.
    Pdf,
}

impl Target {
    /// Whether this target goes through the LaTeX path.
    pub fn is_latex(self) -> bool {
        matches!(self, Self::Ltx | Self::Pdf)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Ltx => "ltx",
            Self::Pdf => "pdf",
        }
    }

    /// File extension used for output of this target.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Ltx | Self::Pdf => "tex",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "ltx" | "latex" => Ok(Self::Ltx),
            "pdf" => Ok(Self::Pdf),
            other => Err(CoreError::Target(other.to_string())),
        }
    }
}
