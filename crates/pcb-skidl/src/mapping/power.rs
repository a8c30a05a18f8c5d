//! Power source, charger, regulator and fuse tables

use super::{Labeled, OptionTable};

/// How the power source is represented on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSourceKind {
    /// Battery holder, emitted as a `Device:Battery`
    BatteryHolder,
    /// Two pin connector for an external cell
    Connector,
    /// DC barrel jack
    BarrelJack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSourceInfo {
    pub label: &'static str,
    pub kind: PowerSourceKind,
    pub footprint: &'static str,
}

impl Labeled for PowerSourceInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static POWER_SOURCES: OptionTable<PowerSourceInfo> = OptionTable {
    key: "powersource",
    none: Some("No battery"),
    default: "No battery",
    entries: &[
        PowerSourceInfo {
            label: "2xAA - Keystone 2462",
            kind: PowerSourceKind::BatteryHolder,
            footprint: "Battery:BatteryHolder_Keystone_2462_2xAA",
        },
        PowerSourceInfo {
            label: "3xAA - TruPower BH-331P",
            kind: PowerSourceKind::BatteryHolder,
            footprint: "Battery:BatteryHolder_TruPower_BH-331P_3xAA",
        },
        PowerSourceInfo {
            label: "2xAAA - Keystone 2468",
            kind: PowerSourceKind::BatteryHolder,
            footprint: "Battery:BatteryHolder_Keystone_2468_2xAAA",
        },
        PowerSourceInfo {
            label: "3xAAA - Keystone 2479",
            kind: PowerSourceKind::BatteryHolder,
            footprint: "Battery:BatteryHolder_Keystone_2479_3xAAA",
        },
        PowerSourceInfo {
            label: "18650 - Keystone 1042",
            kind: PowerSourceKind::BatteryHolder,
            footprint: "Battery:BatteryHolder_Keystone_1042_1x18650",
        },
        PowerSourceInfo {
            label: "JST PH S2B",
            kind: PowerSourceKind::Connector,
            footprint: "Connector_JST:JST_PH_S2B-PH-K_1x02_P2.00mm_Horizontal",
        },
        PowerSourceInfo {
            label: "Barrel Jack 2.0/5.5mm",
            kind: PowerSourceKind::BarrelJack,
            footprint: "Connector_BarrelJack:BarrelJack_CUI_PJ-063AH_Horizontal",
        },
    ],
};

/// Li-ion charger ICs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryManager {
    /// Single cell charger, battery feeds the system directly
    Mcp73831,
    /// Load sharing charger, battery sits behind the IC on `+VLipo`
    Mcp73871,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryManagerInfo {
    pub label: &'static str,
    pub chip: BatteryManager,
}

impl Labeled for BatteryManagerInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

impl BatteryManagerInfo {
    /// Net the cell's positive terminal is connected to
    pub fn cell_net(&self) -> &'static str {
        match self.chip {
            BatteryManager::Mcp73831 => "+VBatt",
            BatteryManager::Mcp73871 => "+VLipo",
        }
    }
}

pub static BATTERY_MANAGERS: OptionTable<BatteryManagerInfo> = OptionTable {
    key: "battery_management",
    none: Some("No battery management"),
    default: "No battery management",
    entries: &[
        BatteryManagerInfo {
            label: "MCP73831",
            chip: BatteryManager::Mcp73831,
        },
        BatteryManagerInfo {
            label: "MCP73871",
            chip: BatteryManager::Mcp73871,
        },
    ],
};

/// Linear regulator feeding one of the rails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegulatorInfo {
    pub label: &'static str,
    pub module: &'static str,
    pub part: &'static str,
    pub footprint: &'static str,
    /// Rail the regulator output drives
    pub output: &'static str,
    pub input_pin: &'static str,
    pub output_pin: &'static str,
    /// Enable pin, tied to the input so the regulator is always on
    pub enable_pin: Option<&'static str>,
}

impl Labeled for RegulatorInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

const LD1117_FOOTPRINT: &str = "Package_TO_SOT_SMD:SOT-223-3_TabPin2";
const SOT23_5: &str = "Package_TO_SOT_SMD:SOT-23-5";

pub static REGULATORS: OptionTable<RegulatorInfo> = OptionTable {
    key: "regulator",
    none: Some("No regulator"),
    default: "No regulator",
    entries: &[
        RegulatorInfo {
            label: "LD1117S33TR",
            module: "Regulator_Linear",
            part: "LD1117S33TR_SOT223",
            footprint: LD1117_FOOTPRINT,
            output: "+3V3",
            input_pin: "VI",
            output_pin: "VO",
            enable_pin: None,
        },
        RegulatorInfo {
            label: "LD1117S50TR",
            module: "Regulator_Linear",
            part: "LD1117S50TR_SOT223",
            footprint: LD1117_FOOTPRINT,
            output: "+5V",
            input_pin: "VI",
            output_pin: "VO",
            enable_pin: None,
        },
        RegulatorInfo {
            label: "LP2985-30",
            module: "Regulator_Linear",
            part: "LP2985-3.0",
            footprint: SOT23_5,
            output: "+3V",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: None,
        },
        RegulatorInfo {
            label: "LP2985-33",
            module: "Regulator_Linear",
            part: "LP2985-3.3",
            footprint: SOT23_5,
            output: "+3V3",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: None,
        },
        RegulatorInfo {
            label: "LP2985-50",
            module: "Regulator_Linear",
            part: "LP2985-5.0",
            footprint: SOT23_5,
            output: "+5V",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: None,
        },
        RegulatorInfo {
            label: "AP2112K-3.0",
            module: "Regulator_Linear",
            part: "AP2112K-3.0",
            footprint: SOT23_5,
            output: "+3V",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: Some("EN"),
        },
        RegulatorInfo {
            label: "AP2112K-3.3",
            module: "Regulator_Linear",
            part: "AP2112K-3.3",
            footprint: SOT23_5,
            output: "+3V3",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: Some("EN"),
        },
        RegulatorInfo {
            label: "AP2112K-5.0",
            module: "Regulator_Linear",
            part: "AP2112K-5.0",
            footprint: SOT23_5,
            output: "+5V",
            input_pin: "VIN",
            output_pin: "VOUT",
            enable_pin: Some("EN"),
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseInfo {
    pub label: &'static str,
    pub footprint: &'static str,
}

impl Labeled for FuseInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static FUSES: OptionTable<FuseInfo> = OptionTable {
    key: "fuse",
    none: Some("No fuse"),
    default: "No fuse",
    entries: &[
        FuseInfo {
            label: "Schurter 0031.8201 5x20mm holder",
            footprint: "Fuse:Fuseholder_Cylinder-5x20mm_Schurter_0031_8201_Horizontal_Open",
        },
        FuseInfo {
            label: "SMD 1812",
            footprint: "Fuse:Fuse_1812_4532Metric",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regulator_records() {
        let ld = REGULATORS.require("LD1117S50TR").unwrap();
        assert_eq!(ld.output, "+5V");
        assert_eq!(ld.input_pin, "VI");
        assert_eq!(ld.enable_pin, None);

        let ap = REGULATORS.require("AP2112K-3.3").unwrap();
        assert_eq!(ap.output, "+3V3");
        assert_eq!(ap.enable_pin, Some("EN"));
    }

    #[test]
    fn test_power_source_kinds() {
        assert_eq!(
            POWER_SOURCES.require("JST PH S2B").unwrap().kind,
            PowerSourceKind::Connector
        );
        assert_eq!(
            POWER_SOURCES.require("18650 - Keystone 1042").unwrap().kind,
            PowerSourceKind::BatteryHolder
        );
    }

    #[test]
    fn test_cell_net() {
        let mcp73871 = BATTERY_MANAGERS.require("MCP73871").unwrap();
        assert_eq!(mcp73871.cell_net(), "+VLipo");
        let mcp73831 = BATTERY_MANAGERS.require("MCP73831").unwrap();
        assert_eq!(mcp73831.cell_net(), "+VBatt");
    }
}
