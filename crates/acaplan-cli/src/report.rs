//! Human-readable plan rendering.

use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use acaplan_core::{AppReport, PlanResult, PlanWarning};

/// Node assignments shown per row before eliding the rest.
const MAX_ASSIGNMENTS_SHOWN: usize = 3;

pub fn format_report(result: &PlanResult) -> String {
    let mut out = String::new();

    let available = match result.available_ips {
        Some(ips) => ips.to_string(),
        None => "unknown".to_string(),
    };

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Container Apps Capacity Plan            ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  {:<14}{:<26}║\n", "Plan:", result.plan.to_string()));
    out.push_str(&format!("║  {:<14}{:<26}║\n", "Peak IPs:", result.total_ips));
    out.push_str(&format!("║  {:<14}{:<26}║\n", "Upgrade IPs:", result.total_ips_upgrade));
    out.push_str(&format!("║  {:<14}{:<26}║\n", "Available:", available));
    out.push_str(&format!("║  {:<14}{:<26}║\n", "Verdict:", verdict(result)));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    if !result.apps.is_empty() {
        let rows: Vec<AppRow> = result.apps.iter().map(AppRow::from).collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push_str("\n\n");
    }

    if result.warnings.is_empty() {
        out.push_str(&format!("{} no warnings\n", "✓".green().bold()));
    } else {
        for warning in &result.warnings {
            out.push_str(&format!("{} {warning}\n", "⚠".yellow().bold()));
        }
    }

    out
}

fn verdict(result: &PlanResult) -> &'static str {
    if result.available_ips.is_none() {
        return "unknown";
    }
    let overruns = result.warnings.iter().any(|w| {
        matches!(
            w,
            PlanWarning::PeakExceedsSubnet { .. } | PlanWarning::UpgradeExceedsSubnet { .. }
        )
    });
    if overruns { "does not fit" } else { "fits" }
}

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "APP")]
    name: String,
    #[tabled(rename = "PLAN")]
    plan: String,
    #[tabled(rename = "REPLICAS")]
    replicas: u32,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "PER NODE")]
    per_node: String,
    #[tabled(rename = "NODES")]
    nodes: String,
    #[tabled(rename = "IPS")]
    ips: u32,
    #[tabled(rename = "ASSIGNMENTS")]
    assignments: String,
}

impl From<&AppReport> for AppRow {
    fn from(app: &AppReport) -> Self {
        let or_na = |value: Option<u32>| match value {
            Some(v) => v.to_string(),
            None => "n/a".to_string(),
        };
        AppRow {
            name: app.name.clone(),
            plan: app.plan.to_string(),
            replicas: app.replicas,
            sku: app.sku.unwrap_or("n/a").to_string(),
            per_node: or_na(app.per_node_capacity),
            nodes: or_na(app.nodes_needed),
            ips: app.ip_cost,
            assignments: format_assignments(app),
        }
    }
}

fn format_assignments(app: &AppReport) -> String {
    if app.assignments.is_empty() {
        return "-".to_string();
    }
    let mut shown: Vec<String> = app
        .assignments
        .iter()
        .take(MAX_ASSIGNMENTS_SHOWN)
        .map(|a| a.to_string())
        .collect();
    let hidden = app.assignments.len().saturating_sub(MAX_ASSIGNMENTS_SHOWN);
    if hidden > 0 {
        shown.push(format!("(+{hidden} more)"));
    }
    shown.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use acaplan_core::{AppRequirement, PlanChoice, plan};

    fn make_app(name: &str, cpu: f64, ram_gib: f64, min: u32, max: u32) -> AppRequirement {
        AppRequirement {
            name: name.to_string(),
            cpu,
            ram_gib,
            gpu: 0,
            min_replicas: min,
            max_replicas: max,
            baseline_replicas: None,
            plan: None,
        }
    }

    #[test]
    fn report_shows_totals_and_verdict() {
        let apps = vec![make_app("web", 1.0, 2.0, 2, 25)];
        let result = plan(&apps, Some("/27"), PlanChoice::Consumption).unwrap();
        let text = format_report(&result);

        assert!(text.contains("consumption"));
        assert!(text.contains("Peak IPs:"));
        assert!(text.contains("fits"));
        assert!(text.contains("18"));
        assert!(text.contains("no warnings"));
        assert!(text.contains("web"));
    }

    #[test]
    fn report_flags_an_overrun() {
        let apps = vec![make_app("web", 1.0, 2.0, 2, 25)];
        let result = plan(&apps, Some("/28"), PlanChoice::Consumption).unwrap();
        let text = format_report(&result);

        assert!(text.contains("does not fit"));
        assert!(text.contains("peak load needs 3 IPs"));
    }

    #[test]
    fn report_handles_unknown_subnet() {
        let apps = vec![make_app("web", 1.0, 2.0, 1, 5)];
        let result = plan(&apps, None, PlanChoice::Consumption).unwrap();
        let text = format_report(&result);

        assert!(text.contains("unknown"));
    }

    #[test]
    fn dedicated_rows_show_sku_and_assignments() {
        let apps = vec![make_app("warehouse", 20.0, 200.0, 1, 5)];
        let result = plan(&apps, Some("/24"), PlanChoice::Dedicated).unwrap();
        let text = format_report(&result);

        assert!(text.contains("E32"));
        assert!(text.contains("node 1: warehouse x1"));
        // Five single-replica nodes collapse to three shown plus a count.
        assert!(text.contains("(+2 more)"));
    }

    #[test]
    fn consumption_rows_use_placeholders() {
        let apps = vec![make_app("web", 1.0, 2.0, 1, 5)];
        let result = plan(&apps, None, PlanChoice::Consumption).unwrap();
        let row = AppRow::from(&result.apps[0]);

        assert_eq!(row.sku, "n/a");
        assert_eq!(row.nodes, "n/a");
        assert_eq!(row.assignments, "-");
        assert_eq!(row.ips, 1);
    }
}
