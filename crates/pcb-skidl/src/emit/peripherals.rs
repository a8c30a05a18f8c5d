//! Buttons, sensors and headers hanging off the MCU

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, subcircuit, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::McuFamily;

/// Reset push button on the `RST` net
///
/// ESP modules carry their own button inside the MCU subcircuit.
pub fn reset_button(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.reset_button || config.mcu_family() == Some(McuFamily::EspModule) {
        return None;
    }

    let body = "SW_RESET = Part('Switch', 'SW_Push', footprint=\"Button_Switch_SMD:SW_SPST_B3U-1000P\")\n\
                SW_RESET[1] += Net.fetch('RST')\n\
                SW_RESET[2] += Net.fetch('GND')";
    let text = inline("Reset button", body);
    Some(Fragment::new("reset_button", text).provides("SW_RESET"))
}

/// One-wire bus with pull-up, sensors and connector
pub fn onewire(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.has_onewire() {
        return None;
    }
    ctx.require(Helper::Resistor);
    let rail = config.rail.net;
    let features = &config.features;

    let mut body = String::new();
    writeln!(body, "Net.fetch('{}') & R('4k7') & Net.fetch('DQ')", rail).unwrap();

    let sensors = [
        (features.ds18b20, "ds18b20", "DS18B20", "Package_TO_SOT_THT:TO-92_Inline"),
        (features.ds18b20u, "ds18b20u", "DS18B20U", "Package_SO:MSOP-8_3x3mm_P0.65mm"),
    ];
    for (_, var, part, footprint) in sensors.iter().filter(|sensor| sensor.0) {
        writeln!(body).unwrap();
        writeln!(
            body,
            "{} = Part('Sensor_Temperature', '{}', footprint='{}')",
            var, part, footprint
        )
        .unwrap();
        writeln!(body, "{}['VDD'] += Net.fetch('{}')", var, rail).unwrap();
        writeln!(body, "{}['GND'] += Net.fetch('GND')", var).unwrap();
        writeln!(body, "{}['DQ'] += Net.fetch('DQ')", var).unwrap();
    }

    if let Some(connector) = config.onewire_connector {
        writeln!(body).unwrap();
        writeln!(
            body,
            "onewire_conn = Part('Connector', 'Conn_01x03_Male', footprint='{}')",
            connector.footprint
        )
        .unwrap();
        writeln!(body, "onewire_conn[1] += Net.fetch('GND')").unwrap();
        writeln!(body, "onewire_conn[2] += Net.fetch('DQ')").unwrap();
        writeln!(body, "onewire_conn[3] += Net.fetch('{}')", rail).unwrap();
    }

    let mut fragment = Fragment::new("onewire", String::new());
    if let Some(family) = config.mcu_family() {
        writeln!(body).unwrap();
        writeln!(body, "U1['{}'] += Net.fetch('DQ')", family.onewire_pin()).unwrap();
        fragment = fragment.consumes("U1");
    }

    fragment.text = subcircuit(ctx, config, "onewire", "Generate onewire bus", &body);
    Some(fragment)
}

/// INA219 current and voltage monitor on the I2C bus
pub fn ina219(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.ina219 {
        return None;
    }
    ctx.require(Helper::Resistor);
    ctx.require(Helper::Capacitor);
    let rail = config.rail.net;

    let mut body = String::new();
    writeln!(
        body,
        "ina219 = Part('Analog_ADC', 'INA219AxD', footprint='Package_SO:SOIC-8_3.9x4.9mm_P1.27mm')"
    )
    .unwrap();
    writeln!(body, "ina219['Vs'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "ina219['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ina219['SDA'] += Net.fetch('SDA')").unwrap();
    writeln!(body, "ina219['SCL'] += Net.fetch('SCL')").unwrap();
    writeln!(body, "ina219['A0'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ina219['A1'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ina219['IN+'] & R('0.1') & ina219['IN-']").unwrap();
    writeln!(body, "Net.fetch('{}') & C('100nF') & Net.fetch('GND')", rail).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "Net.fetch('{}') & R('10k') & Net.fetch('SDA')", rail).unwrap();
    writeln!(body, "Net.fetch('{}') & R('10k') & Net.fetch('SCL')", rail).unwrap();

    let mut fragment = Fragment::new("ina219", String::new());
    if let Some((sda, scl)) = config.mcu_family().and_then(McuFamily::i2c_pins) {
        writeln!(body).unwrap();
        writeln!(body, "U1['{}'] += Net.fetch('SDA')", sda).unwrap();
        writeln!(body, "U1['{}'] += Net.fetch('SCL')", scl).unwrap();
        fragment = fragment.consumes("U1");
    }

    fragment.text = subcircuit(ctx, config, "ina219", "Generate INA219 current monitor", &body);
    Some(fragment)
}

/// Six pin header for an FTDI serial cable
pub fn ftdi_header(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.ftdi_header {
        return None;
    }

    let mut body = String::new();
    writeln!(
        body,
        "FTDI_HEADER = Part('Connector', 'Conn_01x06_Female', footprint='Connector_PinHeader_2.54mm:PinHeader_1x06_P2.54mm_Vertical')"
    )
    .unwrap();
    writeln!(body, "FTDI_HEADER[1] += Net.fetch('GND')").unwrap();
    writeln!(body, "FTDI_HEADER[3] += Net.fetch('{}')", config.rail.net).unwrap();
    writeln!(body, "FTDI_HEADER[4] += Net.fetch('rx')").unwrap();
    writeln!(body, "FTDI_HEADER[5] += Net.fetch('tx')").unwrap();
    writeln!(body, "FTDI_HEADER[6] += Net.fetch('DTR')").unwrap();

    let text = inline("Generate header for connecting FTDI programmer", &body);
    Some(Fragment::new("ftdi_header", text).provides("FTDI_HEADER"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{MCUS, ONEWIRE_CONNECTORS};

    #[test]
    fn test_reset_button_skipped_for_esp_module() {
        let mut config = BoardConfig::default();
        config.features.reset_button = true;
        config.mcu = MCUS.lookup("ESP-12E").unwrap();
        assert!(reset_button(&mut EmitContext::new(), &config).is_none());

        config.mcu = MCUS.lookup("ATmega328P-AU").unwrap();
        let fragment = reset_button(&mut EmitContext::new(), &config).unwrap();
        assert!(fragment.text.contains("SW_RESET[1] += Net.fetch('RST')"));
    }

    #[test]
    fn test_onewire_bus() {
        let mut config = BoardConfig::default();
        config.mcu = MCUS.lookup("Wemos D1 Mini").unwrap();
        config.features.ds18b20u = true;
        config.onewire_connector = ONEWIRE_CONNECTORS.lookup("Screw terminal").unwrap();

        let mut ctx = EmitContext::new();
        let fragment = onewire(&mut ctx, &config).unwrap();
        assert_eq!(fragment.consumes, vec!["U1"]);
        let text = &fragment.text;
        assert!(text.contains("    Net.fetch('+3V3') & R('4k7') & Net.fetch('DQ')"));
        assert!(text.contains("ds18b20u = Part('Sensor_Temperature', 'DS18B20U'"));
        assert!(!text.contains("'DS18B20',"));
        assert!(text.contains("onewire_conn[2] += Net.fetch('DQ')"));
        assert!(text.contains("U1['D4'] += Net.fetch('DQ')"));
    }

    #[test]
    fn test_onewire_without_mcu() {
        let mut config = BoardConfig::default();
        config.features.ds18b20 = true;
        let fragment = onewire(&mut EmitContext::new(), &config).unwrap();
        assert!(fragment.consumes.is_empty());
        assert!(!fragment.text.contains("U1"));

        let config = BoardConfig::default();
        assert!(onewire(&mut EmitContext::new(), &config).is_none());
    }

    #[test]
    fn test_ina219_i2c_hookup() {
        let mut config = BoardConfig::default();
        config.features.ina219 = true;
        config.mcu = MCUS.lookup("ESP-07").unwrap();
        let fragment = ina219(&mut EmitContext::new(), &config).unwrap();
        assert!(fragment.text.contains("U1['GPIO4'] += Net.fetch('SDA')"));
        assert_eq!(fragment.consumes, vec!["U1"]);

        config.mcu = MCUS.lookup("ATmega328P-PU").unwrap();
        let fragment = ina219(&mut EmitContext::new(), &config).unwrap();
        assert!(fragment.consumes.is_empty());
    }

    #[test]
    fn test_ftdi_header_rail() {
        let mut config = BoardConfig::default();
        config.features.ftdi_header = true;
        let text = ftdi_header(&mut EmitContext::new(), &config).unwrap().text;
        assert!(text.starts_with("# Generate header for connecting FTDI programmer\n\n"));
        assert!(text.contains("FTDI_HEADER[3] += Net.fetch('+3V3')"));
    }
}
