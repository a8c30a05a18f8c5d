//! Interactive terminal wizard

use anyhow::{Context, Result};
use clap::Args;
use inquire::{Confirm, Select, Text};
use pcb_skidl::{
    collect, generate, load_settings, option_labels, save_settings, write_atomic, FieldKind,
    FieldValue, Settings, FIELDS,
};
use std::path::PathBuf;

use crate::{DEFAULT_OUTPUT, DEFAULT_SETTINGS};

/// Arguments for the `wizard` command
#[derive(Args, Debug)]
pub struct WizardArgs {
    /// Path of the generated SKiDL program
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Settings file used to pre-fill the answers and saved afterwards
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS, value_hint = clap::ValueHint::FilePath)]
    pub settings: PathBuf,
}

/// Execute the `wizard` command
pub fn execute(args: WizardArgs) -> Result<()> {
    let mut settings = load_settings(&args.settings)
        .with_context(|| format!("Failed to load settings: {}", args.settings.display()))?;
    let tables = option_labels();

    for &(key, kind) in FIELDS {
        let labels = tables
            .iter()
            .find(|(table_key, _)| *table_key == key)
            .map(|(_, labels)| labels);
        let value = match (kind, labels) {
            (FieldKind::Flag, _) => FieldValue::Flag(ask_flag(key, &settings)?),
            (FieldKind::Text, Some(labels)) => FieldValue::Text(select_label(key, labels, &settings)?),
            (FieldKind::Text, None) => FieldValue::Text(ask_text(key, &settings)?),
        };
        settings.set(key, value)?;
    }

    let config = collect(&settings).context("Failed to resolve board options")?;
    let code = generate(&config).context("Failed to generate SKiDL code")?;

    write_atomic(&args.output, &code)
        .with_context(|| format!("Failed to write output file: {}", args.output.display()))?;
    eprintln!("Wrote {}", args.output.display());
    save_settings(&args.settings, &settings)
        .with_context(|| format!("Failed to save settings: {}", args.settings.display()))?;

    Ok(())
}

fn select_label(key: &str, labels: &[&'static str], settings: &Settings) -> Result<String> {
    let current = match settings.get(key) {
        Some(FieldValue::Text(label)) => label,
        _ => String::new(),
    };
    let cursor = labels.iter().position(|label| *label == current).unwrap_or_else(|| {
        log::warn!("Saved value '{}' for {} is not offered, starting at the first", current, key);
        0
    });

    let selected = Select::new(question(key), labels.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))?;
    Ok(selected.to_string())
}

fn ask_flag(key: &str, settings: &Settings) -> Result<bool> {
    let current = matches!(settings.get(key), Some(FieldValue::Flag(true)));
    Confirm::new(question(key))
        .with_default(current)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))
}

fn ask_text(key: &str, settings: &Settings) -> Result<String> {
    let current = match settings.get(key) {
        Some(FieldValue::Text(text)) => text,
        _ => String::new(),
    };
    Text::new(question(key))
        .with_initial_value(&current)
        .prompt()
        .map_err(|e| anyhow::anyhow!("Prompt cancelled: {}", e))
}

/// Prompt shown for a settings key
fn question(key: &str) -> &str {
    match key {
        "mcu" => "Microcontroller:",
        "mcurail" => "Net powering the microcontroller:",
        "icsp" => "Add an ICSP programming header?",
        "powersource" => "Power source:",
        "battery_management" => "Battery charger:",
        "fuse" => "Fuse:",
        "switch" => "Add a power switch?",
        "reset" => "Wire the deep sleep wake pin to reset?",
        "Reset button" => "Add a reset button?",
        "Flash button" => "Add a flash button (ESP only)?",
        "led" => "Add a power LED?",
        "FTDI header" => "Add an FTDI programming header?",
        "usb_connector" => "USB connector:",
        "ina219" => "Add an INA219 current monitor?",
        "DS18B20" => "Add a DS18B20 temperature sensor?",
        "DS18B20U" => "Add a DS18B20U temperature sensor?",
        "usb_uart" => "USB to UART bridge:",
        "common_footprint" => "Resistor, capacitor and LED package:",
        "transistor_footprint" => "Transistor package:",
        "board_footprint" => "Development board outline:",
        "regulator" => "Voltage regulator:",
        "onewire_connector" => "One-wire connector:",
        "autoselect" => "Select between battery and USB power automatically?",
        "generate_labels" => "Label each subcircuit on the board?",
        "board_label" => "Board title (empty for none):",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_question() {
        for (key, _) in FIELDS {
            assert_ne!(question(key), *key, "no question for {key}");
        }
    }

    #[test]
    fn test_reset_question_names_wake_pin() {
        assert!(question("reset").contains("wake pin"));
    }
}
