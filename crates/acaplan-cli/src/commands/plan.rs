use std::path::Path;

use anyhow::Context;
use tracing::info;

use acaplan_core::{PlanChoice, PlanRequest};

use crate::output::{self, OutputFormat};
use crate::report;

pub fn run(
    file: &Path,
    subnet: Option<String>,
    plan: Option<PlanChoice>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut request = PlanRequest::from_file(file)
        .with_context(|| format!("reading request file {}", file.display()))?;

    // CLI flags win over the file.
    if subnet.is_some() {
        request.subnet = subnet;
    }
    if let Some(plan) = plan {
        request.plan = plan;
    }

    info!(
        file = %file.display(),
        apps = request.apps.len(),
        plan = %request.plan,
        "loaded planning request"
    );

    let result = match request.evaluate() {
        Ok(result) => result,
        Err(errors) => {
            for error in errors.iter() {
                output::print_error(&error.to_string());
            }
            anyhow::bail!("request failed validation with {} error(s)", errors.len());
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print!("{}", report::format_report(&result)),
    }

    Ok(())
}
