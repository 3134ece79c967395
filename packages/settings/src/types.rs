// ABOUTME: Type definitions for settings page responses
// ABOUTME: Back links, confirmation notices and the controller outcome

use serde::{Deserialize, Serialize};

/// Navigation link returning the administrator to the settings page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackLink {
    pub url: String,
    pub label: String,
}

/// Terminal confirmation shown after a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub back_link: BackLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    /// The settings form was assigned to the template
    Rendered,
    /// The submit was applied; the request ends with this notice
    Notice(Notice),
}
