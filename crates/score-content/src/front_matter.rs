//! YAML front matter of documentation sources.
//!
//! All fields are optional. Missing fields are derived from the source path
//! and the document body when the [`Document`](crate::Document) is built.

use serde::{Deserialize, Serialize};

use crate::ContentError;

/// Front matter block at the top of a markdown source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    /// Document id (overrides the path-derived id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Page title (overrides H1 extraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description (overrides the first paragraph).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL slug relative to the docs route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Label used in the sidebar instead of the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,

    /// Ordering within the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,

    /// Sidebar category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_category: Option<String>,
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    pub fn from_yaml(content: &str) -> Result<Self, ContentError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed).map_err(|e| ContentError::FrontMatter(e.to_string()))
    }
}
