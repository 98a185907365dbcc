//! acaplan-core — Azure Container Apps capacity planning.
//!
//! Given per-app resource requirements and a target subnet size, this
//! crate recommends how an environment fits: which workload-profile node
//! each Dedicated app lands on, how many nodes and IPs peak load needs,
//! whether a zero-downtime upgrade still fits the subnet, and which apps
//! cannot be hosted at all. Everything is a pure, synchronous function of
//! its inputs plus the static node catalog; identical requests produce
//! identical results.
//!
//! # Components
//!
//! - **`catalog`** — node SKU table and smallest-fit resolution
//! - **`subnet`** — subnet-size parsing and available-IP accounting
//! - **`validate`** — exhaustive request validation
//! - **`planner`** — two-phase IP/node accounting and warnings
//! - **`request`** — the TOML request-file model
//!
//! # Accounting
//!
//! ```text
//! consumption: ip_cost = ceil(replicas / 10)
//! dedicated:   sku     = smallest catalog fit (cpu, ram, gpu)
//!              per_node = min(floor(sku.cpu/cpu), floor(sku.ram/ram),
//!                             gpu > 0 ? floor(sku.gpu/gpu) : inf)
//!              ip_cost = nodes = ceil(replicas / per_node)
//!
//! peak phase    uses max_replicas
//! upgrade phase uses 2 * baseline (two revisions side by side)
//! both totals compare against 2^(32-prefix) - 14 usable addresses
//! ```

pub mod catalog;
pub mod error;
pub mod planner;
pub mod request;
pub mod subnet;
pub mod types;
pub mod validate;

pub use catalog::{CATALOG, NodeSku, find_smallest_fit};
pub use error::{PlanWarning, ValidationError, ValidationErrors, ValidationResult};
pub use planner::{CONSUMPTION_REPLICAS_PER_IP, nodes_needed, plan};
pub use request::PlanRequest;
pub use subnet::{AZURE_RESERVED_IPS, available_ips, parse_prefix_len};
pub use types::{
    AppName, AppReport, AppRequirement, HostedReplicas, NodeAssignment, ParsePlanError,
    PlanChoice, PlanResult,
};
pub use validate::{CONSUMPTION_MAX_CPU, CONSUMPTION_MAX_RAM_GIB, validate};
