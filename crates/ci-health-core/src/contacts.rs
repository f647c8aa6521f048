//! Maintainer id to display contact resolution.

use crate::config::MaintainerDirectory;

/// Slack workspace checked first for a member id.
pub const PRIMARY_WORKSPACE: &str = "kata-containers";
/// Workspace used when the primary has no entry.
pub const FALLBACK_WORKSPACE: &str = "cncf";

/// Direct mention of a Slack member id.
pub fn mention(contact_id: &str) -> String {
    format!("<@{contact_id}>")
}

/// Inverse of [`mention`].
pub fn parse_mention(s: &str) -> Option<&str> {
    s.strip_prefix("<@")?
        .strip_suffix('>')
        .filter(|id| !id.is_empty())
}

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(|v| v.trim()).filter(|v| !v.is_empty())
}

pub struct ContactResolver<'a> {
    directory: &'a MaintainerDirectory,
}

impl<'a> ContactResolver<'a> {
    pub fn new(directory: &'a MaintainerDirectory) -> Self {
        Self { directory }
    }

    /// Display contact for one maintainer id.
    pub fn resolve_one(&self, id: &str) -> String {
        let Some(entry) = self.directory.get(id) else {
            return id.to_string();
        };
        if let Some(contact) = non_empty(entry.slack.get(PRIMARY_WORKSPACE))
            .or_else(|| non_empty(entry.slack.get(FALLBACK_WORKSPACE)))
        {
            return mention(contact);
        }
        non_empty(entry.name.as_ref())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// Space-joined contacts, in the given order. Empty input yields `""`.
    pub fn resolve(&self, ids: &[String]) -> String {
        ids.iter()
            .map(|id| self.resolve_one(id))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
