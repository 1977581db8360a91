use serde::Deserialize;

use crate::data_models::{ToolConfigurations, ToolParameters};

/// Body of `POST /api/run`. Accepts either the bare parameters
/// (`{"message": "..."}`) or the full tool call shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RunRequest {
    Full {
        #[serde(default)]
        configurations: ToolConfigurations,
        parameters: ToolParameters,
    },
    Bare(ToolParameters),
}

impl RunRequest {
    pub fn into_parts(self) -> (ToolConfigurations, ToolParameters) {
        match self {
            RunRequest::Full {
                configurations,
                parameters,
            } => (configurations, parameters),
            RunRequest::Bare(parameters) => (ToolConfigurations::default(), parameters),
        }
    }
}
