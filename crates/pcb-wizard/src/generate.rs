//! Headless generation from a settings file

use anyhow::{Context, Result};
use clap::Args;
use pcb_skidl::{collect, generate, load_settings, persist, write_atomic, Overrides};
use std::path::PathBuf;

use crate::{DEFAULT_OUTPUT, DEFAULT_SETTINGS};

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path of the generated SKiDL program
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Settings file to start from (a missing file means all defaults)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS, value_hint = clap::ValueHint::FilePath)]
    pub settings: PathBuf,

    /// Override one setting, e.g. --set mcu=ESP-12E or --set led=true
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    pub save: bool,
}

/// Execute the `generate` command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let settings = load_settings(&args.settings)
        .with_context(|| format!("Failed to load settings: {}", args.settings.display()))?;

    let mut form = Overrides::new(&settings);
    for assignment in &args.overrides {
        form.assign(assignment)
            .with_context(|| format!("Invalid override '{}'", assignment))?;
    }

    let config = collect(&form).context("Failed to resolve board options")?;
    let code = generate(&config).context("Failed to generate SKiDL code")?;

    if args.stdout {
        print!("{}", code);
    } else {
        write_atomic(&args.output, &code)
            .with_context(|| format!("Failed to write output file: {}", args.output.display()))?;
        eprintln!("Wrote {}", args.output.display());
    }

    if args.save {
        persist(&args.settings, &config)
            .with_context(|| format!("Failed to save settings: {}", args.settings.display()))?;
    }

    Ok(())
}
