//! Assembly driver - walks the fixed fragment order and renders the program

use std::collections::HashSet;
use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::Fragment;
use super::{avr, board, esp, peripherals, power, uart};
use crate::config::BoardConfig;
use crate::error::{Error, Result};
use crate::mapping::McuFamily;

const HEADER: &str = r#"# Generated by Skimibowi - SKiDL Microcontroller Board Wizard
#
# MIT license
#
# Permission is hereby granted, free of charge, to any person obtaining a copy
# of this software and associated documentation files (the "Software"), to deal
# in the Software without restriction, including without limitation the rights
# to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
# copies of the Software, and to permit persons to whom the Software is
# furnished to do so, subject to the following conditions:
#
# The above copyright notice and this permission notice shall be included in all
# copies or substantial portions of the Software.
#
# THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
# IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
# FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
# AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
# LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
# OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
# SOFTWARE.

"""Creates Kicad netlist file for a microcontroller board"""
"#;

const TRAILER: &str = "generate_netlist()";

type Step = fn(&mut EmitContext, &BoardConfig) -> Option<Fragment>;

/// Every fragment generator, in output order
const STEPS: &[Step] = &[
    mcu,
    power::power_source,
    power::power_switch,
    power::fuse,
    peripherals::reset_button,
    power::battery_manager,
    power::regulator,
    power::autoselect,
    peripherals::onewire,
    peripherals::ina219,
    peripherals::ftdi_header,
    avr::icsp,
    uart::usb_connector,
    power::wiring,
    uart::bridge,
    uart::bridge_reset,
    board::board_footprint,
    board::board_connections,
    board::board_label,
];

/// An assembled program, before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub imports: Vec<&'static str>,
    /// Rendered helper definitions, in registration order
    pub requirements: Vec<String>,
    pub fragments: Vec<Fragment>,
}

/// Run every generator that applies to `config` and check the result
///
/// Fails when a fragment references an identifier no earlier fragment
/// defines, or when two fragments define the same identifier.
pub fn assemble(config: &BoardConfig) -> Result<Document> {
    let mut ctx = EmitContext::new();
    let mut fragments = Vec::new();

    for step in STEPS {
        if let Some(fragment) = step(&mut ctx, config) {
            log::debug!(
                "Emitted fragment '{}' ({} bytes)",
                fragment.name,
                fragment.text.len()
            );
            fragments.push(fragment);
        }
    }

    validate(&fragments)?;

    Ok(Document {
        imports: ctx.import_lines(),
        requirements: ctx.render_all(config.passives),
        fragments,
    })
}

/// Assemble and render the SKiDL program for `config`
pub fn generate(config: &BoardConfig) -> Result<String> {
    Ok(assemble(config)?.render())
}

impl Document {
    pub fn fragment_names(&self) -> Vec<&'static str> {
        self.fragments.iter().map(|fragment| fragment.name).collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(HEADER);
        writeln!(out).unwrap();
        for line in &self.imports {
            writeln!(out, "{}", line).unwrap();
        }
        writeln!(out).unwrap();
        writeln!(out, "set_default_tool(KICAD7)").unwrap();

        for requirement in &self.requirements {
            writeln!(out).unwrap();
            writeln!(out).unwrap();
            write!(out, "{}", requirement).unwrap();
        }

        for fragment in &self.fragments {
            writeln!(out).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{}", fragment.text).unwrap();
        }

        writeln!(out).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "{}", TRAILER).unwrap();
        out
    }
}

// =============================================================================
// Steps
// =============================================================================

fn mcu(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let mcu = config.mcu?;
    Some(match mcu.family {
        McuFamily::EspModule => esp::esp_module(ctx, config, mcu),
        McuFamily::Esp8266Ex => esp::esp8266ex(ctx, config, mcu),
        McuFamily::WemosD1Mini => esp::wemos_d1_mini(ctx, config, mcu),
        McuFamily::ATtiny85 => avr::attiny85(ctx, config, mcu),
        McuFamily::ATmega328P => avr::atmega328p(ctx, config, mcu),
    })
}

// =============================================================================
// Validation
// =============================================================================

fn validate(fragments: &[Fragment]) -> Result<()> {
    let mut defined = HashSet::new();

    for fragment in fragments {
        for &identifier in &fragment.consumes {
            if !defined.contains(identifier) {
                return Err(Error::UndefinedReference {
                    fragment: fragment.name,
                    identifier,
                });
            }
        }
        for &identifier in &fragment.provides {
            if !defined.insert(identifier) {
                return Err(Error::DuplicateDefinition {
                    fragment: fragment.name,
                    identifier,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{MCUS, POWER_SOURCES, UART_BRIDGES};

    #[test]
    fn test_empty_board() {
        let text = generate(&BoardConfig::default()).unwrap();
        assert!(text.starts_with("# Generated by Skimibowi"));
        assert!(text.contains("\"\"\"Creates Kicad netlist file for a microcontroller board\"\"\"\n"));
        assert!(text.contains("from skidl import Part\nfrom skidl import set_default_tool\n"));
        assert!(!text.contains("subcircuit"));
        assert!(text.ends_with("set_default_tool(KICAD7)\n\n\ngenerate_netlist()\n"));
    }

    #[test]
    fn test_helpers_before_body() {
        let mut config = BoardConfig::default();
        config.mcu = MCUS.lookup("ESP-12E").unwrap();
        let text = generate(&config).unwrap();

        assert!(text.contains("from skidl import subcircuit\nfrom skidl import generate_netlist\n"));
        let definition = text.find("def R(value):").unwrap();
        let first_use = text.find("R('10k')").unwrap();
        assert!(definition < first_use);
    }

    #[test]
    fn test_validate_rejects_forward_reference() {
        let fragments = vec![
            Fragment::new("icsp", "").consumes("U1"),
            Fragment::new("mcu", "").provides("U1"),
        ];
        let err = validate(&fragments).unwrap_err();
        assert!(matches!(
            err,
            Error::UndefinedReference {
                fragment: "icsp",
                identifier: "U1"
            }
        ));
    }

    #[test]
    fn test_validate_rejects_redefinition() {
        let fragments = vec![
            Fragment::new("mcu", "").provides("U1"),
            Fragment::new("other", "").provides("U1"),
        ];
        assert!(matches!(
            validate(&fragments),
            Err(Error::DuplicateDefinition {
                fragment: "other",
                ..
            })
        ));
    }

    #[test]
    fn test_fixed_order() {
        let mut config = BoardConfig::default();
        config.mcu = MCUS.lookup("ESP-07").unwrap();
        config.power_source = POWER_SOURCES.lookup("3xAAA - Keystone 2479").unwrap();
        config.usb_uart = UART_BRIDGES.lookup("FT231XS").unwrap();

        let document = assemble(&config).unwrap();
        assert_eq!(
            document.fragment_names(),
            vec!["mcu", "power_source", "wiring", "uart_bridge", "uart_reset"]
        );
    }
}
