//! Plan-request file parsing.
//!
//! A planning request is a small TOML document:
//!
//! ```toml
//! subnet = "/27"
//! plan = "dedicated"
//!
//! [[apps]]
//! name = "web"
//! cpu = 1.0
//! ram_gib = 2.0
//! min_replicas = 2
//! max_replicas = 25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::planner::plan;
use crate::types::{AppRequirement, PlanChoice, PlanResult};

/// One planning request: apps, subnet size, and plan choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Subnet size as `/N`, bare `N`, or a dotted-decimal mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default)]
    pub plan: PlanChoice,
    #[serde(default)]
    pub apps: Vec<AppRequirement>,
}

impl PlanRequest {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Run the planner over this request.
    pub fn evaluate(&self) -> ValidationResult<PlanResult> {
        plan(&self.apps, self.subnet.as_deref(), self.plan)
    }
}
