//! Structured validation errors and planning warnings.
//!
//! Two kinds only. Validation errors block plan computation entirely and
//! are collected exhaustively, one per violated rule. Warnings are
//! non-fatal: they ride inside `PlanResult` and the affected app's
//! contribution is reported as zero. There is no third, fatal category.

use serde::Serialize;
use thiserror::Error;

/// Result alias for operations gated by request validation.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// A single violated validation rule, carrying the app and the offending
/// values.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("app {app}: cpu per replica must be positive (got {cpu})")]
    CpuNotPositive { app: String, cpu: f64 },

    #[error("app {app}: ram per replica must be positive (got {ram_gib} GiB)")]
    RamNotPositive { app: String, ram_gib: f64 },

    #[error("app {app}: min replicas {min} exceeds max replicas {max}")]
    ReplicaRangeInverted { app: String, min: u32, max: u32 },

    #[error("app {app}: baseline replicas {baseline} outside {min}..={max}")]
    BaselineOutOfRange { app: String, baseline: u32, min: u32, max: u32 },

    #[error("app {app}: a per-app plan must be consumption or dedicated, not mix")]
    MixNotAssignable { app: String },

    #[error("app {app}: consumption plan allows at most {limit} vCPU per replica (got {cpu})")]
    ConsumptionCpuExceeded { app: String, cpu: f64, limit: f64 },

    #[error("app {app}: consumption plan allows at most {limit} GiB per replica (got {ram_gib})")]
    ConsumptionRamExceeded { app: String, ram_gib: f64, limit: f64 },

    #[error("app {app}: consumption plan does not offer GPUs (requested {gpu})")]
    ConsumptionGpuUnsupported { app: String, gpu: u32 },
}

/// Every validation error found in one request, in app order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A non-fatal planning warning.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// No catalog SKU satisfies the app's per-replica requirement.
    #[error("app {app}: no node type fits {cpu} vCPU / {ram_gib} GiB / {gpu} GPU per replica")]
    NoFittingSku { app: String, cpu: f64, ram_gib: f64, gpu: u32 },

    /// A resolved SKU cannot host even one replica.
    #[error("app {app}: node type {sku} cannot host a single replica")]
    ZeroNodeCapacity { app: String, sku: String },

    /// The subnet input matched none of the three accepted forms.
    #[error("subnet size {input:?} not recognized; available IPs unknown")]
    SubnetNotRecognized { input: String },

    #[error("peak load needs {required} IPs but the subnet provides {available}")]
    PeakExceedsSubnet { required: u32, available: i64 },

    #[error("upgrade phase needs {required} IPs but the subnet provides {available}")]
    UpgradeExceedsSubnet { required: u32, available: i64 },
}
