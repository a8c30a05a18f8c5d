//! Wizard settings and the resolved board configuration
//!
//! [`Settings`] is the flat form that is persisted between sessions: labels and
//! flags keyed by the wizard field names. [`BoardConfig`] is what the emitter
//! consumes: every label resolved against the option tables once, up front.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::form::{FieldKind, FieldValue};
use crate::mapping::{
    BatteryManagerInfo, BoardInfo, FuseInfo, McuFamily, McuInfo, OnewireConnectorInfo,
    PassiveFootprints, PowerSourceInfo, Rail, RegulatorInfo, TransistorInfo, UartBridgeInfo,
    UsbConnectorInfo, BATTERY_MANAGERS, BOARDS, FUSES, MCUS, ONEWIRE_CONNECTORS, PASSIVES,
    POWER_SOURCES, RAILS, REGULATORS, TRANSISTORS, UART_BRIDGES, USB_CONNECTORS,
};

/// Wizard selections as stored in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mcu: String,
    pub mcurail: String,
    pub icsp: bool,
    pub powersource: String,
    pub battery_management: String,
    pub fuse: String,
    pub switch: bool,
    pub reset: bool,
    #[serde(rename = "Reset button")]
    pub reset_button: bool,
    #[serde(rename = "Flash button")]
    pub flash_button: bool,
    pub led: bool,
    #[serde(rename = "FTDI header")]
    pub ftdi_header: bool,
    pub usb_connector: String,
    pub ina219: bool,
    #[serde(rename = "DS18B20")]
    pub ds18b20: bool,
    #[serde(rename = "DS18B20U")]
    pub ds18b20u: bool,
    pub usb_uart: String,
    pub common_footprint: String,
    pub transistor_footprint: String,
    pub board_footprint: String,
    pub regulator: String,
    pub onewire_connector: String,
    pub autoselect: bool,
    pub generate_labels: bool,
    /// Silkscreen title, empty for none
    pub board_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mcu: MCUS.default.to_string(),
            mcurail: RAILS.default.to_string(),
            icsp: false,
            powersource: POWER_SOURCES.default.to_string(),
            battery_management: BATTERY_MANAGERS.default.to_string(),
            fuse: FUSES.default.to_string(),
            switch: false,
            reset: false,
            reset_button: false,
            flash_button: false,
            led: false,
            ftdi_header: false,
            usb_connector: USB_CONNECTORS.default.to_string(),
            ina219: false,
            ds18b20: false,
            ds18b20u: false,
            usb_uart: UART_BRIDGES.default.to_string(),
            common_footprint: PASSIVES.default.to_string(),
            transistor_footprint: TRANSISTORS.default.to_string(),
            board_footprint: BOARDS.default.to_string(),
            regulator: REGULATORS.default.to_string(),
            onewire_connector: ONEWIRE_CONNECTORS.default.to_string(),
            autoselect: false,
            generate_labels: false,
            board_label: String::new(),
        }
    }
}

macro_rules! settings_fields {
    ($($key:literal => $field:ident: $kind:ident,)*) => {
        /// Every settings key with the kind of value it holds, in wizard order
        pub const FIELDS: &[(&str, FieldKind)] = &[$(($key, FieldKind::$kind),)*];

        impl Settings {
            /// Read a field by its settings key
            pub fn get(&self, key: &str) -> Option<FieldValue> {
                match key {
                    $($key => Some(settings_fields!(@get self.$field, $kind)),)*
                    _ => None,
                }
            }

            /// Write a field by its settings key
            pub fn set(&mut self, key: &str, value: FieldValue) -> Result<()> {
                match key {
                    $($key => {
                        self.$field = settings_fields!(@take value, $key, $kind);
                        Ok(())
                    })*
                    _ => Err(Error::UnknownField { key: key.to_string() }),
                }
            }
        }
    };
    (@get $field:expr, Text) => { FieldValue::Text($field.clone()) };
    (@get $field:expr, Flag) => { FieldValue::Flag($field) };
    (@take $value:ident, $key:literal, Text) => { $value.into_text($key)? };
    (@take $value:ident, $key:literal, Flag) => { $value.into_flag($key)? };
}

settings_fields! {
    "mcu" => mcu: Text,
    "mcurail" => mcurail: Text,
    "icsp" => icsp: Flag,
    "powersource" => powersource: Text,
    "battery_management" => battery_management: Text,
    "fuse" => fuse: Text,
    "switch" => switch: Flag,
    "reset" => reset: Flag,
    "Reset button" => reset_button: Flag,
    "Flash button" => flash_button: Flag,
    "led" => led: Flag,
    "FTDI header" => ftdi_header: Flag,
    "usb_connector" => usb_connector: Text,
    "ina219" => ina219: Flag,
    "DS18B20" => ds18b20: Flag,
    "DS18B20U" => ds18b20u: Flag,
    "usb_uart" => usb_uart: Text,
    "common_footprint" => common_footprint: Text,
    "transistor_footprint" => transistor_footprint: Text,
    "board_footprint" => board_footprint: Text,
    "regulator" => regulator: Text,
    "onewire_connector" => onewire_connector: Text,
    "autoselect" => autoselect: Flag,
    "generate_labels" => generate_labels: Flag,
    "board_label" => board_label: Text,
}

impl Settings {
    /// Resolve every label against the option tables
    pub fn resolve(&self) -> Result<BoardConfig> {
        Ok(BoardConfig {
            mcu: MCUS.lookup(&self.mcu)?,
            rail: RAILS.require(&self.mcurail)?,
            power_source: POWER_SOURCES.lookup(&self.powersource)?,
            battery_manager: BATTERY_MANAGERS.lookup(&self.battery_management)?,
            fuse: FUSES.lookup(&self.fuse)?,
            regulator: REGULATORS.lookup(&self.regulator)?,
            passives: PASSIVES.require(&self.common_footprint)?,
            transistor: TRANSISTORS.require(&self.transistor_footprint)?,
            usb_connector: USB_CONNECTORS.lookup(&self.usb_connector)?,
            usb_uart: UART_BRIDGES.lookup(&self.usb_uart)?,
            onewire_connector: ONEWIRE_CONNECTORS.lookup(&self.onewire_connector)?,
            board: BOARDS.lookup(&self.board_footprint)?,
            features: Features {
                icsp: self.icsp,
                power_switch: self.switch,
                reset_line: self.reset,
                reset_button: self.reset_button,
                flash_button: self.flash_button,
                led: self.led,
                ftdi_header: self.ftdi_header,
                ina219: self.ina219,
                ds18b20: self.ds18b20,
                ds18b20u: self.ds18b20u,
                autoselect: self.autoselect,
                subcircuit_labels: self.generate_labels,
            },
            board_label: normalize_label(&self.board_label),
        })
    }
}

/// On/off options of the wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub icsp: bool,
    pub power_switch: bool,
    pub reset_line: bool,
    pub reset_button: bool,
    pub flash_button: bool,
    pub led: bool,
    pub ftdi_header: bool,
    pub ina219: bool,
    pub ds18b20: bool,
    pub ds18b20u: bool,
    pub autoselect: bool,
    pub subcircuit_labels: bool,
}

/// Fully resolved board configuration consumed by the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub mcu: Option<&'static McuInfo>,
    pub rail: &'static Rail,
    pub power_source: Option<&'static PowerSourceInfo>,
    pub battery_manager: Option<&'static BatteryManagerInfo>,
    pub fuse: Option<&'static FuseInfo>,
    pub regulator: Option<&'static RegulatorInfo>,
    pub passives: &'static PassiveFootprints,
    pub transistor: &'static TransistorInfo,
    pub usb_connector: Option<&'static UsbConnectorInfo>,
    pub usb_uart: Option<&'static UartBridgeInfo>,
    pub onewire_connector: Option<&'static OnewireConnectorInfo>,
    pub board: Option<&'static BoardInfo>,
    pub features: Features,
    /// Trimmed and never empty, see [`BoardConfig::set_board_label`]
    board_label: Option<String>,
}

fn normalize_label(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}

impl Default for BoardConfig {
    fn default() -> Self {
        Settings::default()
            .resolve()
            .expect("default settings resolve against the option tables")
    }
}

impl BoardConfig {
    /// Silkscreen title, `None` when the board has none
    pub fn board_label(&self) -> Option<&str> {
        self.board_label.as_deref()
    }

    /// Set the silkscreen title; surrounding whitespace is dropped and a blank
    /// title clears it
    pub fn set_board_label(&mut self, label: &str) {
        self.board_label = normalize_label(label);
    }

    pub fn mcu_family(&self) -> Option<McuFamily> {
        self.mcu.map(|mcu| mcu.family)
    }

    /// Net that feeds the board: the battery net, or the USB bus without one
    pub fn supply_net(&self) -> Option<&'static str> {
        if self.power_source.is_some() {
            Some("+VBatt")
        } else if self.usb_connector.is_some() {
            Some("+VBus")
        } else {
            None
        }
    }

    /// Whether anything sits on the one-wire bus
    pub fn has_onewire(&self) -> bool {
        self.features.ds18b20 || self.features.ds18b20u || self.onewire_connector.is_some()
    }

    /// Whether the MCU UART is routed to the tx/rx nets
    pub fn has_serial(&self) -> bool {
        self.usb_uart.is_some() || self.features.ftdi_header
    }

    /// Whether anything drives the `RST` net
    pub fn needs_reset_net(&self) -> bool {
        self.features.reset_line
            || self.features.reset_button
            || self.usb_uart.is_some()
            || self.board.is_some()
    }

    /// Net the power source's positive terminal lands on
    pub fn cell_net(&self) -> &'static str {
        self.battery_manager
            .map(|manager| manager.cell_net())
            .unwrap_or("+VBatt")
    }

    /// Flat settings that resolve back to this configuration
    pub fn to_settings(&self) -> Settings {
        let f = &self.features;
        Settings {
            mcu: MCUS.label_of(self.mcu),
            mcurail: self.rail.net.to_string(),
            icsp: f.icsp,
            powersource: POWER_SOURCES.label_of(self.power_source),
            battery_management: BATTERY_MANAGERS.label_of(self.battery_manager),
            fuse: FUSES.label_of(self.fuse),
            switch: f.power_switch,
            reset: f.reset_line,
            reset_button: f.reset_button,
            flash_button: f.flash_button,
            led: f.led,
            ftdi_header: f.ftdi_header,
            usb_connector: USB_CONNECTORS.label_of(self.usb_connector),
            ina219: f.ina219,
            ds18b20: f.ds18b20,
            ds18b20u: f.ds18b20u,
            usb_uart: UART_BRIDGES.label_of(self.usb_uart),
            common_footprint: self.passives.label.to_string(),
            transistor_footprint: self.transistor.label.to_string(),
            board_footprint: BOARDS.label_of(self.board),
            regulator: REGULATORS.label_of(self.regulator),
            onewire_connector: ONEWIRE_CONNECTORS.label_of(self.onewire_connector),
            autoselect: f.autoselect,
            generate_labels: f.subcircuit_labels,
            board_label: self.board_label.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_resolve() {
        let config = Settings::default().resolve().unwrap();
        assert!(config.mcu.is_none());
        assert_eq!(config.rail.net, "+3V3");
        assert_eq!(config.passives.label, "SMD 1206");
        assert_eq!(config.supply_net(), None);
    }

    #[test]
    fn test_unknown_label_fails() {
        let settings = Settings {
            powersource: "9V - PP3 clip".to_string(),
            ..Settings::default()
        };
        let err = settings.resolve().unwrap_err();
        assert!(matches!(err, Error::UnknownOption { key: "powersource", .. }));
    }

    #[test]
    fn test_resolve_then_flatten() {
        let settings = Settings {
            mcu: "ESP-12E".to_string(),
            mcurail: "+VBatt".to_string(),
            powersource: "2xAAA - Keystone 2468".to_string(),
            regulator: "AP2112K-3.3".to_string(),
            usb_uart: "CP2104".to_string(),
            led: true,
            board_label: "Weather station".to_string(),
            ..Settings::default()
        };
        let config = settings.resolve().unwrap();
        assert_eq!(config.regulator.unwrap().part, "AP2112K-3.3");
        assert_eq!(config.board_label(), Some("Weather station"));
        assert_eq!(config.to_settings(), settings);
    }

    #[test]
    fn test_get_and_set_fields() {
        let mut settings = Settings::default();
        settings
            .set("Reset button", FieldValue::Flag(true))
            .unwrap();
        settings
            .set("mcu", FieldValue::Text("ESP-07".to_string()))
            .unwrap();
        assert!(settings.reset_button);
        assert_eq!(settings.get("mcu"), Some(FieldValue::Text("ESP-07".to_string())));
        assert_eq!(settings.get("no such field"), None);

        let err = settings
            .set("mcu", FieldValue::Flag(true))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidField { key: "mcu", .. }));
    }

    #[test]
    fn test_fields_cover_every_setting() {
        let settings = Settings::default();
        for (key, _) in FIELDS {
            assert!(settings.get(key).is_some(), "{key} not readable");
        }
        assert_eq!(FIELDS.len(), 25);
    }

    #[test]
    fn test_board_label_is_normalized() {
        let mut config = BoardConfig::default();
        config.set_board_label("  Garden sensor \n");
        assert_eq!(config.board_label(), Some("Garden sensor"));
        assert_eq!(config.to_settings().resolve().unwrap(), config);

        config.set_board_label("   ");
        assert_eq!(config.board_label(), None);
        assert_eq!(config.to_settings().board_label, "");
        assert_eq!(config.to_settings().resolve().unwrap(), config);
    }

    #[test]
    fn test_supply_net() {
        let mut config = BoardConfig::default();
        config.usb_connector = USB_CONNECTORS.lookup("USB B Micro").unwrap();
        assert_eq!(config.supply_net(), Some("+VBus"));
        config.power_source = POWER_SOURCES.lookup("JST PH S2B").unwrap();
        assert_eq!(config.supply_net(), Some("+VBatt"));
    }
}
