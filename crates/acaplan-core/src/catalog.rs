//! Workload-profile node catalog and smallest-fit resolution.
//!
//! The catalog is the fixed table of node SKUs an environment can run on.
//! It is stored pre-sorted ascending by `(gpu, cpu * ram_gib)`: all CPU/RAM
//! SKUs first, GPU SKUs after them. Smallest-fit resolution is therefore a
//! plain front-to-back scan, and an app that needs no GPU only lands on a
//! GPU SKU when no CPU/RAM SKU is large enough. A test asserts the stored
//! order matches the sort key.

use serde::Serialize;

use crate::types::AppRequirement;

/// One deployable node SKU with its fixed per-node capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeSku {
    pub name: &'static str,
    /// vCPU capacity.
    pub cpu: f64,
    /// Memory capacity in GiB.
    pub ram_gib: f64,
    /// GPU count.
    pub gpu: u32,
}

const fn sku(name: &'static str, cpu: f64, ram_gib: f64, gpu: u32) -> NodeSku {
    NodeSku { name, cpu, ram_gib, gpu }
}

/// The workload-profile catalog, ascending by `(gpu, cpu * ram_gib)`.
pub const CATALOG: [NodeSku; 11] = [
    sku("D4", 4.0, 16.0, 0),
    sku("E4", 4.0, 32.0, 0),
    sku("D8", 8.0, 32.0, 0),
    sku("E8", 8.0, 64.0, 0),
    sku("D16", 16.0, 64.0, 0),
    sku("E16", 16.0, 128.0, 0),
    sku("D32", 32.0, 128.0, 0),
    sku("E32", 32.0, 256.0, 0),
    sku("NC24-A100", 24.0, 220.0, 1),
    sku("NC48-A100", 48.0, 440.0, 2),
    sku("NC96-A100", 96.0, 880.0, 4),
];

/// Find the smallest catalog SKU that satisfies a single replica's
/// requirement on every axis.
///
/// The GPU axis is only enforced when the replica asks for GPUs; a
/// zero-GPU requirement qualifies on any SKU. Returns `None` when no
/// catalog entry fits, which callers treat as a per-app warning rather
/// than a fatal error.
pub fn find_smallest_fit(cpu: f64, ram_gib: f64, gpu: u32) -> Option<&'static NodeSku> {
    CATALOG
        .iter()
        .find(|sku| sku.cpu >= cpu && sku.ram_gib >= ram_gib && (gpu == 0 || sku.gpu >= gpu))
}

impl NodeSku {
    /// How many replicas of `app` one node of this SKU can host.
    ///
    /// The minimum over the CPU, RAM, and GPU axes; an axis the app does
    /// not consume is unconstrained.
    pub fn replica_capacity(&self, app: &AppRequirement) -> u32 {
        let cpu = axis_capacity(self.cpu, app.cpu);
        let ram = axis_capacity(self.ram_gib, app.ram_gib);
        let gpu = if app.gpu > 0 { self.gpu / app.gpu } else { u32::MAX };
        cpu.min(ram).min(gpu)
    }
}

/// Whole replicas that fit on one axis. A non-positive per-replica
/// requirement leaves the axis unconstrained.
fn axis_capacity(capacity: f64, per_replica: f64) -> u32 {
    if per_replica <= 0.0 {
        return u32::MAX;
    }
    // The epsilon absorbs decimal-fraction noise (0.3/0.1 is 2.999... in
    // binary floats); real capacity steps are orders of magnitude larger.
    let count = (capacity / per_replica + 1e-9).floor();
    if count >= u32::MAX as f64 { u32::MAX } else { count as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppRequirement, PlanChoice};

    fn make_app(cpu: f64, ram_gib: f64, gpu: u32) -> AppRequirement {
        AppRequirement {
            name: "app".to_string(),
            cpu,
            ram_gib,
            gpu,
            min_replicas: 1,
            max_replicas: 1,
            baseline_replicas: None,
            plan: None,
        }
    }

    #[test]
    fn catalog_order_matches_capacity_key() {
        let mut sorted: Vec<&NodeSku> = CATALOG.iter().collect();
        sorted.sort_by(|a, b| {
            (a.gpu, a.cpu * a.ram_gib)
                .partial_cmp(&(b.gpu, b.cpu * b.ram_gib))
                .unwrap()
        });
        let stored: Vec<&str> = CATALOG.iter().map(|s| s.name).collect();
        let computed: Vec<&str> = sorted.iter().map(|s| s.name).collect();
        assert_eq!(stored, computed);
    }

    #[test]
    fn smallest_fit_prefers_small_sku() {
        let sku = find_smallest_fit(1.0, 2.0, 0).unwrap();
        assert_eq!(sku.name, "D4");
    }

    #[test]
    fn ram_heavy_requirement_picks_e_series() {
        // D32 has 128 GiB and does not fit 200 GiB; E32 is the smallest
        // CPU/RAM SKU that does. The GPU family must not be considered.
        let sku = find_smallest_fit(20.0, 200.0, 0).unwrap();
        assert_eq!(sku.name, "E32");
    }

    #[test]
    fn gpu_requirement_skips_cpu_skus() {
        let sku = find_smallest_fit(1.0, 2.0, 1).unwrap();
        assert_eq!(sku.name, "NC24-A100");
    }

    #[test]
    fn oversized_gpu_requirement_has_no_fit() {
        // Largest catalog GPU count is 4.
        assert!(find_smallest_fit(1.0, 2.0, 8).is_none());
    }

    #[test]
    fn oversized_cpu_requirement_falls_through_to_gpu_sku() {
        // No CPU/RAM SKU offers 64 vCPU; NC96-A100 does.
        let sku = find_smallest_fit(64.0, 64.0, 0).unwrap();
        assert_eq!(sku.name, "NC96-A100");
    }

    #[test]
    fn replica_capacity_is_min_over_axes() {
        let e32 = find_smallest_fit(20.0, 200.0, 0).unwrap();
        // floor(32/20) = 1, floor(256/200) = 1.
        assert_eq!(e32.replica_capacity(&make_app(20.0, 200.0, 0)), 1);

        let d4 = find_smallest_fit(1.0, 2.0, 0).unwrap();
        // floor(4/1) = 4, floor(16/2) = 8 — CPU is the binding axis.
        assert_eq!(d4.replica_capacity(&make_app(1.0, 2.0, 0)), 4);
    }

    #[test]
    fn replica_capacity_counts_gpus() {
        let nc96 = find_smallest_fit(1.0, 1.0, 4).unwrap();
        assert_eq!(nc96.name, "NC96-A100");
        assert_eq!(nc96.replica_capacity(&make_app(1.0, 1.0, 4)), 1);
        assert_eq!(nc96.replica_capacity(&make_app(1.0, 1.0, 2)), 2);
    }

    #[test]
    fn fractional_cpu_divides_cleanly() {
        let d4 = find_smallest_fit(0.5, 1.0, 0).unwrap();
        assert_eq!(d4.name, "D4");
        // floor(4/0.5) = 8, floor(16/1) = 16.
        assert_eq!(d4.replica_capacity(&make_app(0.5, 1.0, 0)), 8);
    }

    #[test]
    fn axis_capacity_survives_decimal_noise() {
        // 0.3/0.1 is 2.999... in binary floats; the count is still 3.
        assert_eq!(axis_capacity(0.3, 0.1), 3);
    }

    #[test]
    fn exact_fit_qualifies() {
        let sku = find_smallest_fit(4.0, 16.0, 0).unwrap();
        assert_eq!(sku.name, "D4");
    }

    #[test]
    fn per_app_plan_tag_does_not_affect_fit() {
        let mut app = make_app(1.0, 2.0, 0);
        app.plan = Some(PlanChoice::Dedicated);
        let sku = find_smallest_fit(app.cpu, app.ram_gib, app.gpu).unwrap();
        assert_eq!(sku.replica_capacity(&app), 4);
    }
}
