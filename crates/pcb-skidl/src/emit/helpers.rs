//! Helper functions emitted ahead of the circuit body

use std::fmt::Write;

use crate::mapping::PassiveFootprints;

/// A Python helper that fragments may call
///
/// Each helper is rendered at most once per document, before any fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    /// `R(value)`, resistor with the default footprint
    Resistor,
    /// `C(value)`, capacitor with the default footprint
    Capacitor,
    /// `L(value)`, inductor with the default footprint
    Inductor,
    /// `Device(library, name)`, part with the footprint taken from the library
    Device,
    /// `D(name)`, diode looked up through `Device`
    Diode,
    /// `subcircuit_label(name)`, silkscreen label footprint
    SubcircuitLabel,
}

impl Helper {
    /// Python name the helper defines
    pub fn name(self) -> &'static str {
        match self {
            Helper::Resistor => "R",
            Helper::Capacitor => "C",
            Helper::Inductor => "L",
            Helper::Device => "Device",
            Helper::Diode => "D",
            Helper::SubcircuitLabel => "subcircuit_label",
        }
    }

    /// Helpers whose definitions this one calls
    pub fn dependencies(self) -> &'static [Helper] {
        match self {
            Helper::Diode => &[Helper::Device],
            _ => &[],
        }
    }

    /// Import lines the helper body needs
    pub fn imports(self) -> &'static [&'static str] {
        match self {
            Helper::Device => &["from skidl import show"],
            _ => &[],
        }
    }

    pub fn render(self, passives: &PassiveFootprints) -> String {
        let mut out = String::new();
        match self {
            Helper::Resistor => passive(&mut out, "R", "resistor", passives.resistor),
            Helper::Capacitor => passive(&mut out, "C", "capacitor", passives.capacitor),
            Helper::Inductor => passive(&mut out, "L", "inductor", passives.inductor),
            Helper::Device => {
                writeln!(out, "def Device(library, name):").unwrap();
                writeln!(
                    out,
                    "    \"\"\"Creates part with the footprint from its library\"\"\""
                )
                .unwrap();
                writeln!(out, "    footprint = show(library, name).F2").unwrap();
                writeln!(
                    out,
                    "    return Part(library, name, value=name, footprint=footprint)"
                )
                .unwrap();
            }
            Helper::Diode => {
                writeln!(out, "def D(name):").unwrap();
                writeln!(out, "    \"\"\"Creates diode\"\"\"").unwrap();
                writeln!(out, "    return Device('Diode', name)").unwrap();
            }
            Helper::SubcircuitLabel => {
                writeln!(out, "def subcircuit_label(name):").unwrap();
                writeln!(out, "    \"\"\"Creates subcircuit label footprint\"\"\"").unwrap();
                writeln!(
                    out,
                    "    Part('./library/Skimibowi.lib', 'Label', ref=\" \", value=name, footprint=f\"Skimibowi:label{{len(name)}}\")"
                )
                .unwrap();
            }
        }
        out
    }
}

fn passive(out: &mut String, name: &str, kind: &str, footprint: &str) {
    writeln!(out, "def {}(value):", name).unwrap();
    writeln!(out, "    \"\"\"Creates default {} footprint\"\"\"", kind).unwrap();
    writeln!(
        out,
        "    return Part('Device', '{}', value=value, footprint='{}')",
        name, footprint
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::PASSIVES;

    #[test]
    fn test_resistor_uses_selected_size() {
        let passives = PASSIVES.require("SMD 0805").unwrap();
        let text = Helper::Resistor.render(passives);
        assert!(text.starts_with("def R(value):\n"));
        assert!(text.contains("footprint='Resistor_SMD:R_0805_2012Metric'"));
    }

    #[test]
    fn test_inductor_uses_inductor_footprint() {
        let passives = PASSIVES.require("SMD 0402").unwrap();
        let text = Helper::Inductor.render(passives);
        assert!(text.contains("Part('Device', 'L'"));
        assert!(text.contains("Inductor_SMD:L_0402_1005Metric"));
    }

    #[test]
    fn test_label_helper_escapes_braces() {
        let passives = PASSIVES.require("THT").unwrap();
        let text = Helper::SubcircuitLabel.render(passives);
        assert!(text.contains("f\"Skimibowi:label{len(name)}\""));
    }

    #[test]
    fn test_diode_depends_on_device() {
        assert_eq!(Helper::Diode.dependencies(), &[Helper::Device]);
        assert_eq!(Helper::Device.imports(), &["from skidl import show"]);
    }
}
