//! Architecture tags embedded in test names, e.g. `"k8s-smoke [s390x]"`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref BRACKET_TOKEN: Regex = Regex::new(r"\[([^\[\]]+)\]").unwrap();
}

/// Closed set of architectures the CI runs on. Names without a recognized tag
/// run on the default, `amd64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    #[default]
    Amd64,
    Arm64,
    S390x,
    Ppc64le,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::S390x => "s390x",
            Self::Ppc64le => "ppc64le",
        }
    }

    /// Parse a bare tag (no brackets). Case-insensitive, accepts common aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "amd64" | "x86_64" => Some(Self::Amd64),
            "arm64" | "aarch64" => Some(Self::Arm64),
            "s390x" => Some(Self::S390x),
            "ppc64le" => Some(Self::Ppc64le),
            _ => None,
        }
    }

    /// Leftmost bracketed token naming a known architecture, else the default.
    pub fn from_test_name(name: &str) -> Self {
        BRACKET_TOKEN
            .captures_iter(name)
            .find_map(|caps| caps.get(1).and_then(|m| Self::from_tag(m.as_str())))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
