//! Microcontroller and supply rail tables

use super::{Labeled, OptionTable};

/// Microcontroller families that need different supporting circuitry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McuFamily {
    /// ESP-07 / ESP-12 style modules with on-board flash and antenna
    EspModule,
    /// Bare ESP8266EX chip, needs crystal, antenna and external flash
    Esp8266Ex,
    /// Wemos D1 Mini development module
    WemosD1Mini,
    ATtiny85,
    ATmega328P,
}

impl McuFamily {
    /// Espressif based parts, which reset through the DTR/RTS transistor pair
    pub fn is_esp(self) -> bool {
        matches!(
            self,
            McuFamily::EspModule | McuFamily::Esp8266Ex | McuFamily::WemosD1Mini
        )
    }

    /// Microchip AVR parts, programmed over ICSP
    pub fn is_avr(self) -> bool {
        matches!(self, McuFamily::ATtiny85 | McuFamily::ATmega328P)
    }

    /// Pin used as the one-wire data line
    pub fn onewire_pin(self) -> &'static str {
        match self {
            McuFamily::EspModule | McuFamily::Esp8266Ex => "GPIO2",
            McuFamily::WemosD1Mini => "D4",
            McuFamily::ATtiny85 => "PB3",
            McuFamily::ATmega328P => "PD2",
        }
    }

    /// SDA and SCL pins, `None` when the MCU fragment already wires the bus
    pub fn i2c_pins(self) -> Option<(&'static str, &'static str)> {
        match self {
            McuFamily::EspModule | McuFamily::Esp8266Ex => Some(("GPIO4", "GPIO5")),
            McuFamily::WemosD1Mini => Some(("D2", "D1")),
            McuFamily::ATtiny85 => Some(("PB0", "PB2")),
            McuFamily::ATmega328P => None,
        }
    }

    /// Pin joined to the `RST` net
    pub fn reset_pin(self) -> &'static str {
        match self {
            McuFamily::EspModule | McuFamily::WemosD1Mini => "RST",
            McuFamily::Esp8266Ex => "EXT_RSTB",
            McuFamily::ATtiny85 => "PB5",
            McuFamily::ATmega328P => "RESET",
        }
    }

    /// Strapping pin held low to enter the serial bootloader
    pub fn boot_pin(self) -> Option<&'static str> {
        match self {
            McuFamily::EspModule | McuFamily::Esp8266Ex => Some("GPIO0"),
            McuFamily::WemosD1Mini => Some("D3"),
            McuFamily::ATtiny85 | McuFamily::ATmega328P => None,
        }
    }

    /// Deep sleep wake-up output, wired to `RST` by the reset line option
    pub fn wake_pin(self) -> Option<&'static str> {
        match self {
            McuFamily::EspModule => Some("GPIO16"),
            McuFamily::Esp8266Ex => Some("XPD_DCDC"),
            McuFamily::WemosD1Mini => Some("D0"),
            McuFamily::ATtiny85 | McuFamily::ATmega328P => None,
        }
    }

    /// Hardware UART TX and RX pins
    pub fn serial_pins(self) -> Option<(&'static str, &'static str)> {
        match self {
            McuFamily::EspModule | McuFamily::WemosD1Mini => Some(("TX", "RX")),
            McuFamily::Esp8266Ex => Some(("U0TXD", "U0RXD")),
            McuFamily::ATmega328P => Some(("PD1", "PD0")),
            McuFamily::ATtiny85 => None,
        }
    }

    /// MISO, SCK and MOSI pins of the programming header
    pub fn icsp_pins(self) -> Option<[&'static str; 3]> {
        match self {
            McuFamily::ATtiny85 => Some(["PB1", "PB2", "PB0"]),
            McuFamily::ATmega328P => Some(["PB4", "PB5", "PB3"]),
            _ => None,
        }
    }
}

/// A selectable microcontroller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McuInfo {
    /// Wizard label, also the SKiDL part name
    pub label: &'static str,
    pub family: McuFamily,
    pub footprint: &'static str,
}

impl Labeled for McuInfo {
    fn label(&self) -> &'static str {
        self.label
    }
}

pub static MCUS: OptionTable<McuInfo> = OptionTable {
    key: "mcu",
    none: Some("No MCU"),
    default: "No MCU",
    entries: &[
        McuInfo {
            label: "ESP-07",
            family: McuFamily::EspModule,
            footprint: "RF_Module:ESP-07",
        },
        McuInfo {
            label: "ESP-12E",
            family: McuFamily::EspModule,
            footprint: "RF_Module:ESP-12E",
        },
        McuInfo {
            label: "ESP8266EX",
            family: McuFamily::Esp8266Ex,
            footprint: "Package_DFN_QFN:QFN-32-1EP_5x5mm_P0.5mm_EP3.45x3.45mm",
        },
        McuInfo {
            label: "Wemos D1 Mini",
            family: McuFamily::WemosD1Mini,
            footprint: "Module:WEMOS_D1_mini_light",
        },
        McuInfo {
            label: "ATtiny85-20PU",
            family: McuFamily::ATtiny85,
            footprint: "Package_DIP:DIP-8_W7.62mm",
        },
        McuInfo {
            label: "ATtiny85-20SU",
            family: McuFamily::ATtiny85,
            footprint: "Package_SO:SOIJ-8_5.3x5.3mm_P1.27mm",
        },
        McuInfo {
            label: "ATtiny85-20MU",
            family: McuFamily::ATtiny85,
            footprint: "Package_DFN_QFN:QFN-20-1EP_4x4mm_P0.5mm_EP2.6x2.6mm",
        },
        McuInfo {
            label: "ATmega328P-PU",
            family: McuFamily::ATmega328P,
            footprint: "Package_DIP:DIP-28_W7.62mm",
        },
        McuInfo {
            label: "ATmega328P-AU",
            family: McuFamily::ATmega328P,
            footprint: "Package_QFP:TQFP-32_7x7mm_P0.8mm",
        },
        McuInfo {
            label: "ATmega328P-MU",
            family: McuFamily::ATmega328P,
            footprint: "Package_DFN_QFN:QFN-32-1EP_5x5mm_P0.5mm_EP3.1x3.1mm",
        },
    ],
};

/// Named supply net the microcontroller is powered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rail {
    pub net: &'static str,
}

impl Labeled for Rail {
    fn label(&self) -> &'static str {
        self.net
    }
}

pub static RAILS: OptionTable<Rail> = OptionTable {
    key: "mcurail",
    none: None,
    default: "+3V3",
    entries: &[
        Rail { net: "+VBatt" },
        Rail { net: "+VBus" },
        Rail { net: "+3V" },
        Rail { net: "+3V3" },
        Rail { net: "+5V" },
    ],
};
