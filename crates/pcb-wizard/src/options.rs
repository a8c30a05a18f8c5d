//! Listing of the labels each option accepts

use anyhow::Result;
use clap::Args;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::Table;
use pcb_skidl::option_labels;

/// Arguments for the `options` command
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Only list the labels of this settings key
    #[arg(value_name = "KEY")]
    pub key: Option<String>,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Execute the `options` command
pub fn execute(args: OptionsArgs) -> Result<()> {
    let mut tables = option_labels();
    if let Some(key) = &args.key {
        tables.retain(|(table_key, _)| table_key == key);
        if tables.is_empty() {
            anyhow::bail!("Unknown option key '{}'", key);
        }
    }

    if args.json {
        let entries: Vec<_> = tables
            .iter()
            .map(|(key, labels)| serde_json::json!({ "key": key, "labels": labels }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Labels"]);
    for (key, labels) in &tables {
        table.add_row(vec![key.to_string(), labels.join("\n")]);
    }
    println!("{table}");

    Ok(())
}
