//! Boundary between a form-collecting front end and the generator
//!
//! A front end (terminal wizard, GUI, test double) only has to expose its
//! fields by name through [`FormSurface`]; [`collect`] turns that into a
//! resolved [`BoardConfig`].

use std::collections::HashMap;

use crate::config::{BoardConfig, Settings, FIELDS};
use crate::error::{Error, Result};

/// Kind of value a settings field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A label from one of the option tables, or free text
    Text,
    /// A checkbox
    Flag,
}

/// Value read from a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Parse the textual form of a field (as given on a command line)
    pub fn parse(kind: FieldKind, key: &'static str, raw: &str) -> Result<Self> {
        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Flag => parse_flag(raw)
                .map(FieldValue::Flag)
                .ok_or(Error::InvalidField {
                    key,
                    expected: "a boolean",
                }),
        }
    }

    pub(crate) fn into_text(self, key: &'static str) -> Result<String> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Flag(_) => Err(Error::InvalidField {
                key,
                expected: "a text label",
            }),
        }
    }

    pub(crate) fn into_flag(self, key: &'static str) -> Result<bool> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            FieldValue::Text(text) => parse_flag(&text).ok_or(Error::InvalidField {
                key,
                expected: "a boolean",
            }),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Something that exposes wizard fields by name
pub trait FormSurface {
    /// Current value of `name`, `None` when the surface has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;
}

impl FormSurface for Settings {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name)
    }
}

impl FormSurface for HashMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

/// Read every settings field from `form` and resolve the labels
///
/// Fields the form does not provide keep their default, which disables the
/// feature. Labels that no option table knows fail the whole collection.
pub fn collect(form: &dyn FormSurface) -> Result<BoardConfig> {
    let mut settings = Settings::default();
    for &(key, _) in FIELDS {
        if let Some(value) = form.field(key) {
            settings.set(key, value)?;
        }
    }
    settings.resolve()
}

/// `key=value` assignments layered on top of another form
pub struct Overrides<'a> {
    base: &'a dyn FormSurface,
    values: HashMap<&'static str, FieldValue>,
}

impl<'a> Overrides<'a> {
    pub fn new(base: &'a dyn FormSurface) -> Self {
        Self {
            base,
            values: HashMap::new(),
        }
    }

    /// Apply one `key=value` assignment
    pub fn assign(&mut self, assignment: &str) -> Result<()> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| Error::UnknownField {
                key: assignment.to_string(),
            })?;
        let key = key.trim();
        let &(key, kind) = FIELDS
            .iter()
            .find(|(name, _)| *name == key)
            .ok_or_else(|| Error::UnknownField {
                key: key.to_string(),
            })?;
        let value = FieldValue::parse(kind, key, raw.trim())?;
        self.values.insert(key, value);
        Ok(())
    }
}

impl FormSurface for Overrides<'_> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.values
            .get(name)
            .cloned()
            .or_else(|| self.base.field(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_from_map() {
        let form: HashMap<String, FieldValue> = [
            ("mcu", FieldValue::Text("ESP-12E".into())),
            ("mcurail", FieldValue::Text("+VBatt".into())),
            ("led", FieldValue::Flag(true)),
            ("usb_uart", FieldValue::Text("FT231XS".into())),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let config = collect(&form).unwrap();
        assert_eq!(config.mcu.unwrap().label, "ESP-12E");
        assert_eq!(config.rail.net, "+VBatt");
        assert!(config.features.led);
        assert!(!config.features.reset_line);
        assert!(config.usb_uart.is_some());
    }

    #[test]
    fn test_collect_rejects_unknown_label() {
        let form: HashMap<String, FieldValue> =
            [("regulator".to_string(), FieldValue::Text("7805".into()))]
                .into_iter()
                .collect();
        let err = collect(&form).unwrap_err();
        assert!(matches!(err, Error::UnknownOption { key: "regulator", .. }));
    }

    #[test]
    fn test_flag_fields_accept_text() {
        let form: HashMap<String, FieldValue> =
            [("icsp".to_string(), FieldValue::Text("yes".into()))]
                .into_iter()
                .collect();
        assert!(collect(&form).unwrap().features.icsp);
    }

    #[test]
    fn test_overrides_layer_on_settings() {
        let base = Settings {
            mcu: "ATmega328P-AU".to_string(),
            mcurail: "+5V".to_string(),
            ..Settings::default()
        };
        let mut form = Overrides::new(&base);
        form.assign("icsp=true").unwrap();
        form.assign("board_footprint = Arduino Nano v3").unwrap();

        let config = collect(&form).unwrap();
        assert_eq!(config.mcu.unwrap().label, "ATmega328P-AU");
        assert!(config.features.icsp);
        assert_eq!(config.board.unwrap().label, "Arduino Nano v3");
    }

    #[test]
    fn test_overrides_reject_bad_input() {
        let base = Settings::default();
        let mut form = Overrides::new(&base);
        assert!(matches!(
            form.assign("colour=red"),
            Err(Error::UnknownField { .. })
        ));
        assert!(matches!(
            form.assign("led=maybe"),
            Err(Error::InvalidField { key: "led", .. })
        ));
        assert!(matches!(
            form.assign("led"),
            Err(Error::UnknownField { .. })
        ));
    }
}
