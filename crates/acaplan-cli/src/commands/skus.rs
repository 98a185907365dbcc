use tabled::{Table, Tabled, settings::Style};

use acaplan_core::{CATALOG, NodeSku};

use crate::output::OutputFormat;

#[derive(Tabled)]
struct SkuRow {
    #[tabled(rename = "SKU")]
    name: &'static str,
    #[tabled(rename = "VCPU")]
    cpu: f64,
    #[tabled(rename = "RAM GIB")]
    ram_gib: f64,
    #[tabled(rename = "GPU")]
    gpu: u32,
}

impl From<&NodeSku> for SkuRow {
    fn from(sku: &NodeSku) -> Self {
        SkuRow { name: sku.name, cpu: sku.cpu, ram_gib: sku.ram_gib, gpu: sku.gpu }
    }
}

pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&CATALOG)?),
        OutputFormat::Text => {
            let rows: Vec<SkuRow> = CATALOG.iter().map(SkuRow::from).collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}
