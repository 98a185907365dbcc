//! Domain types for capacity planning.
//!
//! Inputs (`AppRequirement`, `PlanChoice`) are serializable to/from the
//! TOML request file; outputs (`PlanResult` and its rows) serialize to
//! JSON for rendering. Every output type derives `PartialEq` — planning
//! is deterministic and two runs over identical input must compare equal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PlanWarning;

/// Name of an application within one planning request.
pub type AppName = String;

// ── Inputs ─────────────────────────────────────────────────────────

/// Hosting plan for an environment, or (under `Mix`) for a single app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChoice {
    /// Replica-count IP accounting, no node modeling.
    #[default]
    Consumption,
    /// Per-app workload profiles; one IP per node.
    Dedicated,
    /// Per-app choice between the two.
    Mix,
}

impl PlanChoice {
    /// The plan an app is actually accounted under. Per-app tags only
    /// apply under `Mix`; untagged apps default to Consumption.
    pub fn effective_for(self, app: &AppRequirement) -> PlanChoice {
        match self {
            PlanChoice::Mix => app.plan.unwrap_or(PlanChoice::Consumption),
            other => other,
        }
    }
}

impl fmt::Display for PlanChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanChoice::Consumption => "consumption",
            PlanChoice::Dedicated => "dedicated",
            PlanChoice::Mix => "mix",
        };
        f.write_str(s)
    }
}

/// Error parsing a plan choice from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plan choice {0:?} (expected consumption, dedicated, or mix)")]
pub struct ParsePlanError(pub String);

impl FromStr for PlanChoice {
    type Err = ParsePlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumption" => Ok(PlanChoice::Consumption),
            "dedicated" => Ok(PlanChoice::Dedicated),
            "mix" => Ok(PlanChoice::Mix),
            _ => Err(ParsePlanError(s.to_string())),
        }
    }
}

/// Per-replica resource requirement and replica bounds for one app.
///
/// Created per planning request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRequirement {
    pub name: AppName,
    /// vCPU per replica (fractional allowed, e.g. 0.5).
    pub cpu: f64,
    /// Memory per replica in GiB.
    pub ram_gib: f64,
    /// GPUs per replica.
    #[serde(default)]
    pub gpu: u32,
    pub min_replicas: u32,
    pub max_replicas: u32,
    /// Steady-state replica count, the doubling basis for upgrade-phase
    /// estimation. Defaults to `min_replicas`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_replicas: Option<u32>,
    /// Per-app plan tag, meaningful only under `PlanChoice::Mix`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanChoice>,
}

impl AppRequirement {
    /// Effective baseline replica count.
    pub fn baseline(&self) -> u32 {
        self.baseline_replicas.unwrap_or(self.min_replicas)
    }
}

// ── Outputs ────────────────────────────────────────────────────────

/// Replicas of one app hosted on one node instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostedReplicas {
    pub app: AppName,
    pub replicas: u32,
}

/// One node instance and the replicas assigned to it by sequential fill.
///
/// Produced fresh on each planning run. Under the fixed-SKU-per-app
/// packing policy `hosted` holds exactly one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAssignment {
    /// 1-based position in the app's node sequence.
    pub node_index: u32,
    pub hosted: Vec<HostedReplicas>,
}

impl fmt::Display for NodeAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}:", self.node_index)?;
        for (i, h) in self.hosted.iter().enumerate() {
            let sep = if i == 0 { " " } else { " + " };
            write!(f, "{sep}{} x{}", h.app, h.replicas)?;
        }
        Ok(())
    }
}

/// Per-app output row: effective plan, peak accounting, node assignments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppReport {
    pub name: AppName,
    /// The plan this app was accounted under.
    pub plan: PlanChoice,
    /// Peak replica count (`max_replicas`).
    pub replicas: u32,
    /// Resolved node SKU; `None` under Consumption or when nothing fits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<&'static str>,
    /// Replicas one node can host; `None` under Consumption or without a SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_node_capacity: Option<u32>,
    /// Nodes for the peak replica count; `None` under Consumption or
    /// without a SKU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_needed: Option<u32>,
    /// Peak-phase node assignments, empty under Consumption.
    pub assignments: Vec<NodeAssignment>,
    /// IPs this app consumes at peak (replica-chunk IPs under Consumption,
    /// one per node under Dedicated).
    pub ip_cost: u32,
}

/// The full planning result, immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    /// The requested hosting plan.
    pub plan: PlanChoice,
    /// IP demand at peak load (every app at `max_replicas`).
    pub total_ips: u32,
    /// IP demand during a zero-downtime upgrade (two full baseline-sized
    /// revisions running at once).
    pub total_ips_upgrade: u32,
    /// Usable addresses in the target subnet; `None` when the subnet input
    /// was absent or unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_ips: Option<i64>,
    /// Per-app rows in request order.
    pub apps: Vec<AppReport>,
    pub warnings: Vec<PlanWarning>,
}
