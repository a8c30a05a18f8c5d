//! Passive sizes, transistors, connectors, USB bridges and board outlines

use super::{Labeled, OptionTable};

/// Footprints used for every default passive of one size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveFootprints {
    pub label: &'static str,
    pub resistor: &'static str,
    pub capacitor: &'static str,
    pub inductor: &'static str,
    pub led: &'static str,
}

impl Labeled for PassiveFootprints {
    fn label(&self) -> &'static str {
        self.label
    }
}

macro_rules! smd_passives {
    ($label:literal, $imperial:literal, $metric:literal) => {
        PassiveFootprints {
            label: $label,
            resistor: concat!("Resistor_SMD:R_", $imperial, "_", $metric, "Metric"),
            capacitor: concat!("Capacitor_SMD:C_", $imperial, "_", $metric, "Metric"),
            inductor: concat!("Inductor_SMD:L_", $imperial, "_", $metric, "Metric"),
            led: concat!("LED_SMD:LED_", $imperial, "_", $metric, "Metric"),
        }
    };
}

pub static PASSIVES: OptionTable<PassiveFootprints> = OptionTable {
    key: "common_footprint",
    none: None,
    default: "SMD 1206",
    entries: &[
        PassiveFootprints {
            label: "THT",
            resistor: "Resistor_THT:R_Axial_DIN0309_L9.0mm_D3.2mm_P12.70mm_Horizontal",
            capacitor: "Capacitor_THT:C_Disc_D3.0mm_W1.6mm_P2.50mm",
            inductor: "Inductor_THT:L_Axial_L5.3mm_D2.2mm_P10.16mm_Horizontal_Vishay_IM-1",
            led: "LED_THT:LED_D3.0mm",
        },
        smd_passives!("SMD 0402", "0402", "1005"),
        smd_passives!("SMD 0603", "0603", "1608"),
        smd_passives!("SMD 0805", "0805", "2012"),
        smd_passives!("SMD 1206", "1206", "3216"),
        smd_passives!("SMD 1210", "1210", "3225"),
    ],
};

/// NPN transistor used by the auto-reset circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransistorInfo {
    pub label: &'static str,
    pub library: &'static str,
    pub part: &'static str,
    /// Value for generic symbols that don't carry the part number
    pub value: Option<&'static str>,
    pub footprint: &'static str,
}

impl Labeled for TransistorInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

impl TransistorInfo {
    /// SKiDL `Part(...)` constructor call for this transistor
    pub fn part_call(&self) -> String {
        match self.value {
            Some(value) => format!(
                "Part('{}', '{}', value='{}', footprint='{}')",
                self.library, self.part, value, self.footprint
            ),
            None => format!(
                "Part('{}', '{}', footprint='{}')",
                self.library, self.part, self.footprint
            ),
        }
    }
}

pub static TRANSISTORS: OptionTable<TransistorInfo> = OptionTable {
    key: "transistor_footprint",
    none: None,
    default: "SOT-23",
    entries: &[
        TransistorInfo {
            label: "THT",
            library: "Transistor_BJT",
            part: "PN2222A",
            value: None,
            footprint: "Package_TO_SOT_THT:TO-92_Inline",
        },
        TransistorInfo {
            label: "SOT-223",
            library: "Transistor_BJT",
            part: "PZT2222A",
            value: None,
            footprint: "Package_TO_SOT_SMD:SOT-223",
        },
        TransistorInfo {
            label: "SOT-23",
            library: "Device",
            part: "Q_NPN_BEC",
            value: Some("mmbt2222"),
            footprint: "Package_TO_SOT_SMD:SOT-23",
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbConnectorInfo {
    pub label: &'static str,
    pub part: &'static str,
    pub footprint: &'static str,
}

impl Labeled for UsbConnectorInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static USB_CONNECTORS: OptionTable<UsbConnectorInfo> = OptionTable {
    key: "usb_connector",
    none: Some("No USB connector"),
    default: "No USB connector",
    entries: &[
        UsbConnectorInfo {
            label: "USB B",
            part: "USB_B",
            footprint: "Connector_USB:USB_B_OST_USB-B1HSxx_Horizontal",
        },
        UsbConnectorInfo {
            label: "USB B Mini",
            part: "USB_B_Mini",
            footprint: "Connector_USB:USB_Mini-B_Lumberg_2486_01_Horizontal",
        },
        UsbConnectorInfo {
            label: "USB B Micro",
            part: "USB_B_Micro",
            footprint: "Connector_USB:USB_Micro-B_Amphenol_10103594-0001LF_Horizontal",
        },
        UsbConnectorInfo {
            label: "USB A PCB Trace",
            part: "USB_A",
            footprint: "Skimibowi:usb",
        },
    ],
};

/// USB to UART bridge chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartBridge {
    Ft231xs,
    Ft232rl,
    Cp2102n,
    Cp2104,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UartBridgeInfo {
    pub label: &'static str,
    pub chip: UartBridge,
}

impl Labeled for UartBridgeInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static UART_BRIDGES: OptionTable<UartBridgeInfo> = OptionTable {
    key: "usb_uart",
    none: Some("No USB"),
    default: "No USB",
    entries: &[
        UartBridgeInfo {
            label: "FT231XS",
            chip: UartBridge::Ft231xs,
        },
        UartBridgeInfo {
            label: "FT232RL",
            chip: UartBridge::Ft232rl,
        },
        UartBridgeInfo {
            label: "CP2102N",
            chip: UartBridge::Cp2102n,
        },
        UartBridgeInfo {
            label: "CP2104",
            chip: UartBridge::Cp2104,
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnewireConnectorInfo {
    pub label: &'static str,
    pub footprint: &'static str,
}

impl Labeled for OnewireConnectorInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static ONEWIRE_CONNECTORS: OptionTable<OnewireConnectorInfo> = OptionTable {
    key: "onewire_connector",
    none: Some("No Onewire connector"),
    default: "No Onewire connector",
    entries: &[
        OnewireConnectorInfo {
            label: "1x3 Pin Header",
            footprint: "Connector_PinHeader_2.54mm:PinHeader_1x03_P2.54mm_Vertical",
        },
        OnewireConnectorInfo {
            label: "Screw terminal",
            footprint: "TerminalBlock_TE-Connectivity:TerminalBlock_TE_282834-3_1x03_P2.54mm_Horizontal",
        },
    ],
};

/// Development board form factors the design can be laid out as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    ArduinoUno,
    ArduinoNano,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInfo {
    pub label: &'static str,
    pub kind: BoardKind,
    pub part: &'static str,
    pub footprint: &'static str,
}

impl Labeled for BoardInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static BOARDS: OptionTable<BoardInfo> = OptionTable {
    key: "board_footprint",
    none: Some("No board"),
    default: "No board",
    entries: &[
        BoardInfo {
            label: "Arduino Uno R3",
            kind: BoardKind::ArduinoUno,
            part: "Arduino_Uno_R3",
            footprint: "Module:Arduino_UNO_R3_WithMountingHoles",
        },
        BoardInfo {
            label: "Arduino Nano v3",
            kind: BoardKind::ArduinoNano,
            part: "Arduino_Nano_v3.x",
            footprint: "Module:Arduino_Nano",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smd_passives() {
        let size = PASSIVES.require("SMD 0603").unwrap();
        assert_eq!(size.resistor, "Resistor_SMD:R_0603_1608Metric");
        assert_eq!(size.capacitor, "Capacitor_SMD:C_0603_1608Metric");
        assert_eq!(size.inductor, "Inductor_SMD:L_0603_1608Metric");
        assert_eq!(size.led, "LED_SMD:LED_0603_1608Metric");
    }

    #[test]
    fn test_transistor_part_call() {
        assert_eq!(
            TRANSISTORS.require("SOT-23").unwrap().part_call(),
            "Part('Device', 'Q_NPN_BEC', value='mmbt2222', footprint='Package_TO_SOT_SMD:SOT-23')"
        );
        assert_eq!(
            TRANSISTORS.require("SOT-223").unwrap().part_call(),
            "Part('Transistor_BJT', 'PZT2222A', footprint='Package_TO_SOT_SMD:SOT-223')"
        );
    }

    #[test]
    fn test_usb_connectors() {
        let micro = USB_CONNECTORS.require("USB B Micro").unwrap();
        assert_eq!(micro.part, "USB_B_Micro");
        assert!(USB_CONNECTORS.lookup("No USB connector").unwrap().is_none());
    }
}
