//! Request validation.
//!
//! All rules are checked for every app and every violation is collected;
//! nothing short-circuits. Any error blocks plan computation entirely —
//! the planner never returns a partial plan over invalid input.

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::types::{AppRequirement, PlanChoice};

/// Largest vCPU-per-replica the Consumption plan accepts.
pub const CONSUMPTION_MAX_CPU: f64 = 4.0;
/// Largest GiB-per-replica the Consumption plan accepts.
pub const CONSUMPTION_MAX_RAM_GIB: f64 = 8.0;

/// Check every app against resource and replica-range rules, plus the
/// Consumption limits for apps that will be accounted under Consumption.
pub fn validate(apps: &[AppRequirement], choice: PlanChoice) -> ValidationResult<()> {
    let mut errors = Vec::new();

    for app in apps {
        // `!(x > 0.0)` also catches NaN.
        if !(app.cpu > 0.0) {
            errors.push(ValidationError::CpuNotPositive {
                app: app.name.clone(),
                cpu: app.cpu,
            });
        }
        if !(app.ram_gib > 0.0) {
            errors.push(ValidationError::RamNotPositive {
                app: app.name.clone(),
                ram_gib: app.ram_gib,
            });
        }

        if app.min_replicas > app.max_replicas {
            errors.push(ValidationError::ReplicaRangeInverted {
                app: app.name.clone(),
                min: app.min_replicas,
                max: app.max_replicas,
            });
        }
        if let Some(baseline) = app.baseline_replicas
            && !(app.min_replicas..=app.max_replicas).contains(&baseline)
        {
            errors.push(ValidationError::BaselineOutOfRange {
                app: app.name.clone(),
                baseline,
                min: app.min_replicas,
                max: app.max_replicas,
            });
        }

        if choice == PlanChoice::Mix && app.plan == Some(PlanChoice::Mix) {
            errors.push(ValidationError::MixNotAssignable { app: app.name.clone() });
        }

        if choice.effective_for(app) == PlanChoice::Consumption {
            if app.cpu > CONSUMPTION_MAX_CPU {
                errors.push(ValidationError::ConsumptionCpuExceeded {
                    app: app.name.clone(),
                    cpu: app.cpu,
                    limit: CONSUMPTION_MAX_CPU,
                });
            }
            if app.ram_gib > CONSUMPTION_MAX_RAM_GIB {
                errors.push(ValidationError::ConsumptionRamExceeded {
                    app: app.name.clone(),
                    ram_gib: app.ram_gib,
                    limit: CONSUMPTION_MAX_RAM_GIB,
                });
            }
            if app.gpu > 0 {
                errors.push(ValidationError::ConsumptionGpuUnsupported {
                    app: app.name.clone(),
                    gpu: app.gpu,
                });
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(ValidationErrors(errors)) }
}
