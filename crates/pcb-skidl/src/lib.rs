//! SKiDL microcontroller board generator
//!
//! Turns a set of wizard selections (MCU, power path, peripherals, footprints)
//! into a self-contained SKiDL Python program that produces a KiCad netlist.

pub mod config;
pub mod emit;
pub mod error;
pub mod form;
pub mod mapping;
pub mod store;

use std::path::Path;

pub use config::{BoardConfig, Features, Settings, FIELDS};
pub use emit::{assemble, generate, Document};
pub use error::{Error, Result};
pub use form::{collect, FieldKind, FieldValue, FormSurface, Overrides};
pub use mapping::option_labels;
pub use store::{load_settings, persist, restore, save_settings, write_atomic};

/// Generate the program for a saved settings file and write it to `output`
pub fn generate_from_settings(settings: &Path, output: &Path) -> Result<()> {
    let config = restore(settings)?;
    let text = generate(&config)?;
    write_atomic(output, &text)?;
    log::info!("Wrote SKiDL program to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_missing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("board.py");
        generate_from_settings(&dir.path().join("settings.yaml"), &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.ends_with("generate_netlist()\n"));
    }
}
