//! The capacity planner.
//!
//! Runs the same per-app accounting twice — once at peak load (every app
//! at `max_replicas`) and once for the zero-downtime upgrade phase (two
//! full baseline-sized revisions, so the effective baseline doubled) —
//! then compares both IP totals against the subnet's usable addresses.
//!
//! Packing policy: fixed SKU per app. Every Dedicated app resolves its
//! own smallest fitting SKU and fills its own node sequence; apps are
//! never co-packed onto shared nodes.

use tracing::{debug, warn};

use crate::catalog::{NodeSku, find_smallest_fit};
use crate::error::{PlanWarning, ValidationResult};
use crate::subnet::{available_ips, parse_prefix_len};
use crate::types::{
    AppReport, AppRequirement, HostedReplicas, NodeAssignment, PlanChoice, PlanResult,
};
use crate::validate::validate;

/// Replicas served per IP under the Consumption plan.
pub const CONSUMPTION_REPLICAS_PER_IP: u32 = 10;

/// Nodes required for `replicas` at `per_node_capacity` replicas per node.
///
/// Zero capacity yields zero nodes; the planner attaches a warning in
/// that case rather than failing.
pub fn nodes_needed(replicas: u32, per_node_capacity: u32) -> u32 {
    if per_node_capacity == 0 {
        0
    } else {
        replicas.div_ceil(per_node_capacity)
    }
}

/// Compute a capacity plan for a set of apps on a subnet.
///
/// Pure and deterministic: identical inputs produce an identical
/// `PlanResult`. Validation errors block the computation entirely;
/// per-app unsatisfiable requirements and subnet overruns degrade to
/// warnings inside the result.
pub fn plan(
    apps: &[AppRequirement],
    subnet: Option<&str>,
    choice: PlanChoice,
) -> ValidationResult<PlanResult> {
    validate(apps, choice)?;

    let mut warnings = Vec::new();

    let available = match subnet {
        Some(input) => match parse_prefix_len(input) {
            Some(prefix) => Some(available_ips(prefix)),
            None => {
                warnings.push(PlanWarning::SubnetNotRecognized { input: input.to_string() });
                None
            }
        },
        None => None,
    };

    let mut total_ips: u32 = 0;
    let mut total_ips_upgrade: u32 = 0;
    let mut reports = Vec::with_capacity(apps.len());

    for app in apps {
        let effective = choice.effective_for(app);

        // Fit and per-node capacity depend only on the per-replica
        // requirement, so resolve once and share across both phases.
        let fit = match effective {
            PlanChoice::Dedicated => {
                let sku = find_smallest_fit(app.cpu, app.ram_gib, app.gpu);
                if sku.is_none() {
                    warn!(
                        app = %app.name,
                        cpu = app.cpu,
                        ram_gib = app.ram_gib,
                        gpu = app.gpu,
                        "no node type fits the per-replica requirement"
                    );
                    warnings.push(PlanWarning::NoFittingSku {
                        app: app.name.clone(),
                        cpu: app.cpu,
                        ram_gib: app.ram_gib,
                        gpu: app.gpu,
                    });
                }
                sku
            }
            _ => None,
        };
        let capacity = fit.map(|sku| sku.replica_capacity(app));
        if let (Some(sku), Some(0)) = (fit, capacity) {
            warnings.push(PlanWarning::ZeroNodeCapacity {
                app: app.name.clone(),
                sku: sku.name.to_string(),
            });
        }

        let peak = account_phase(app, effective, fit, capacity, app.max_replicas);
        let upgrade = account_phase(
            app,
            effective,
            fit,
            capacity,
            app.baseline().saturating_mul(2),
        );

        total_ips = total_ips.saturating_add(peak.ip_cost);
        total_ips_upgrade = total_ips_upgrade.saturating_add(upgrade.ip_cost);

        debug!(
            app = %app.name,
            plan = %effective,
            peak_ips = peak.ip_cost,
            upgrade_ips = upgrade.ip_cost,
            "accounted app"
        );

        reports.push(AppReport {
            name: app.name.clone(),
            plan: effective,
            replicas: app.max_replicas,
            sku: fit.map(|sku| sku.name),
            per_node_capacity: capacity,
            nodes_needed: peak.nodes,
            assignments: peak.assignments,
            ip_cost: peak.ip_cost,
        });
    }

    if let Some(available) = available {
        if i64::from(total_ips) > available {
            warn!(required = total_ips, available, "peak IP demand exceeds the subnet");
            warnings.push(PlanWarning::PeakExceedsSubnet { required: total_ips, available });
        }
        if i64::from(total_ips_upgrade) > available {
            warn!(
                required = total_ips_upgrade,
                available, "upgrade-phase IP demand exceeds the subnet"
            );
            warnings.push(PlanWarning::UpgradeExceedsSubnet {
                required: total_ips_upgrade,
                available,
            });
        }
    }

    Ok(PlanResult {
        plan: choice,
        total_ips,
        total_ips_upgrade,
        available_ips: available,
        apps: reports,
        warnings,
    })
}

/// One phase of accounting for one app at a given replica count.
struct PhaseAccount {
    nodes: Option<u32>,
    assignments: Vec<NodeAssignment>,
    ip_cost: u32,
}

fn account_phase(
    app: &AppRequirement,
    effective: PlanChoice,
    fit: Option<&'static NodeSku>,
    capacity: Option<u32>,
    replicas: u32,
) -> PhaseAccount {
    match effective {
        PlanChoice::Dedicated => match (fit, capacity) {
            (Some(_), Some(capacity)) => {
                let nodes = nodes_needed(replicas, capacity);
                PhaseAccount {
                    nodes: Some(nodes),
                    assignments: fill_nodes(&app.name, replicas, capacity),
                    ip_cost: nodes,
                }
            }
            // Nothing fits: zero contribution, reported as n/a.
            _ => PhaseAccount { nodes: None, assignments: Vec::new(), ip_cost: 0 },
        },
        // Mix resolves to a concrete plan in effective_for.
        _ => PhaseAccount {
            nodes: None,
            assignments: Vec::new(),
            ip_cost: replicas.div_ceil(CONSUMPTION_REPLICAS_PER_IP),
        },
    }
}

/// Sequential bin-fill: node k hosts replicas
/// `[(k-1)*capacity + 1, min(k*capacity, replicas)]`.
fn fill_nodes(app: &str, replicas: u32, capacity: u32) -> Vec<NodeAssignment> {
    let nodes = nodes_needed(replicas, capacity);
    (1..=nodes)
        .map(|k| {
            let placed_before = (k - 1) * capacity;
            NodeAssignment {
                node_index: k,
                hosted: vec![HostedReplicas {
                    app: app.to_string(),
                    replicas: capacity.min(replicas - placed_before),
                }],
            }
        })
        .collect()
}
