use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// UI platform a document targets. Decides which handlers run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Uwp,
    Wpf,
    XamarinForms,
    #[default]
    Unknown,
}

impl ProjectKind {
    pub fn is_windows(self) -> bool {
        matches!(self, Self::Uwp | Self::Wpf)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uwp => "uwp",
            Self::Wpf => "wpf",
            Self::XamarinForms => "xamarin_forms",
            Self::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project kind `{0}` (expected uwp, wpf, xamarin_forms or unknown)")]
pub struct ParseProjectKindError(String);

impl FromStr for ProjectKind {
    type Err = ParseProjectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "uwp" => Ok(Self::Uwp),
            "wpf" => Ok(Self::Wpf),
            "xamarin_forms" | "xamarin" | "forms" => Ok(Self::XamarinForms),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseProjectKindError(s.to_string())),
        }
    }
}

/// Which project kinds a handler supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Every project kind, including [`ProjectKind::Unknown`].
    Any,
    /// UWP and WPF.
    Windows,
    Uwp,
    XamarinForms,
}

impl Platform {
    pub fn supports(self, project: ProjectKind) -> bool {
        match self {
            Self::Any => true,
            Self::Windows => project.is_windows(),
            Self::Uwp => project == ProjectKind::Uwp,
            Self::XamarinForms => project == ProjectKind::XamarinForms,
        }
    }
}
