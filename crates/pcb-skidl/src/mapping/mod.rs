//! Option tables: wizard selection labels → footprints and part records

mod mcu;
mod parts;
mod power;

pub use mcu::{McuFamily, McuInfo, Rail, MCUS, RAILS};
pub use parts::{
    BoardInfo, BoardKind, OnewireConnectorInfo, PassiveFootprints, TransistorInfo, UartBridge,
    UartBridgeInfo, UsbConnectorInfo, BOARDS, ONEWIRE_CONNECTORS, PASSIVES, TRANSISTORS,
    UART_BRIDGES, USB_CONNECTORS,
};
pub use power::{
    BatteryManager, BatteryManagerInfo, FuseInfo, PowerSourceInfo, PowerSourceKind,
    RegulatorInfo, BATTERY_MANAGERS, FUSES, POWER_SOURCES, REGULATORS,
};

use crate::error::{Error, Result};

/// A record that is selected by a human readable label
pub trait Labeled: 'static {
    fn label(&self) -> &'static str;
}

/// Static table mapping the labels offered for one settings key to records
///
/// `none` is the label meaning "feature not present". Families without such a
/// label (the passive size, for instance) always resolve to a record.
#[derive(Debug)]
pub struct OptionTable<T: 'static> {
    /// Settings key the table belongs to
    pub key: &'static str,
    /// Label selecting no record at all
    pub none: Option<&'static str>,
    /// Label used when the settings file does not mention the key
    pub default: &'static str,
    pub entries: &'static [T],
}

impl<T: Labeled> OptionTable<T> {
    /// Resolve an optional feature; the `none` label yields `Ok(None)`
    pub fn lookup(&'static self, label: &str) -> Result<Option<&'static T>> {
        if self.none == Some(label) {
            return Ok(None);
        }
        self.entries
            .iter()
            .find(|entry| entry.label() == label)
            .map(Some)
            .ok_or_else(|| Error::unknown(self.key, label))
    }

    /// Resolve a label that must name a record
    pub fn require(&'static self, label: &str) -> Result<&'static T> {
        self.lookup(label)?
            .ok_or_else(|| Error::unknown(self.key, label))
    }

    /// Label to persist for an optional record
    pub fn label_of(&self, entry: Option<&T>) -> String {
        entry
            .map(Labeled::label)
            .or(self.none)
            .unwrap_or(self.default)
            .to_string()
    }

    /// All labels in presentation order, the `none` label first
    pub fn labels(&self) -> Vec<&'static str> {
        self.none
            .into_iter()
            .chain(self.entries.iter().map(Labeled::label))
            .collect()
    }
}

/// Labels offered for every settings key that is backed by a table
pub fn option_labels() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (MCUS.key, MCUS.labels()),
        (RAILS.key, RAILS.labels()),
        (POWER_SOURCES.key, POWER_SOURCES.labels()),
        (BATTERY_MANAGERS.key, BATTERY_MANAGERS.labels()),
        (FUSES.key, FUSES.labels()),
        (REGULATORS.key, REGULATORS.labels()),
        (PASSIVES.key, PASSIVES.labels()),
        (TRANSISTORS.key, TRANSISTORS.labels()),
        (USB_CONNECTORS.key, USB_CONNECTORS.labels()),
        (UART_BRIDGES.key, UART_BRIDGES.labels()),
        (ONEWIRE_CONNECTORS.key, ONEWIRE_CONNECTORS.labels()),
        (BOARDS.key, BOARDS.labels()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_none_label() {
        assert!(MCUS.lookup("No MCU").unwrap().is_none());
        assert!(REGULATORS.lookup("No regulator").unwrap().is_none());
    }

    #[test]
    fn test_unknown_label() {
        let err = POWER_SOURCES.lookup("9V - PP3 clip").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownOption { key: "powersource", ref value } if value == "9V - PP3 clip"
        ));
    }

    #[test]
    fn test_require_rejects_none_label() {
        assert!(PASSIVES.require("SMD 0805").is_ok());
        assert!(MCUS.require("No MCU").is_err());
    }

    #[test]
    fn test_defaults_resolve() {
        for (key, labels) in option_labels() {
            assert!(!labels.is_empty(), "{key} has no labels");
        }
        assert!(MCUS.lookup(MCUS.default).is_ok());
        assert!(RAILS.lookup(RAILS.default).is_ok());
        assert!(PASSIVES.lookup(PASSIVES.default).is_ok());
        assert!(TRANSISTORS.lookup(TRANSISTORS.default).is_ok());
    }

    #[test]
    fn test_labels_are_unique() {
        for (key, labels) in option_labels() {
            let mut sorted = labels.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), labels.len(), "duplicate label in {key}");
        }
    }

    #[test]
    fn test_label_of_roundtrip() {
        let regulator = REGULATORS.lookup("AP2112K-3.3").unwrap();
        assert_eq!(REGULATORS.label_of(regulator), "AP2112K-3.3");
        assert_eq!(REGULATORS.label_of(None), "No regulator");
    }
}
