//! AVR microcontrollers and their programming header

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, subcircuit, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::McuInfo;

pub fn atmega328p(ctx: &mut EmitContext, config: &BoardConfig, mcu: &McuInfo) -> Fragment {
    ctx.require(Helper::Resistor);
    let rail = config.rail.net;

    let mut body = String::new();
    writeln!(body, "global U1").unwrap();
    writeln!(
        body,
        "U1 = Part('MCU_Microchip_ATmega', '{}', footprint='{}')",
        mcu.label, mcu.footprint
    )
    .unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['AVCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['RESET'] += Net.fetch('RST')").unwrap();
    writeln!(body, "Net.fetch('RST') & R('10k') & Net.fetch('{}')", rail).unwrap();
    writeln!(body).unwrap();
    writeln!(
        body,
        "resonator = Part('Device', 'Resonator', footprint='Resonator_SMD_muRata_CSTxExxV-3Pin_3.0x1.1mm')"
    )
    .unwrap();
    writeln!(body, "U1['XTAL1'] += resonator[1]").unwrap();
    writeln!(body, "U1['XTAL2'] += resonator[3]").unwrap();
    writeln!(body, "resonator[2] += Net.fetch('GND')").unwrap();
    writeln!(body, "U1['XTAL1'] & R('1M') & U1['XTAL2']").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['PD1'] += Net.fetch('tx')").unwrap();
    writeln!(body, "U1['PD0'] += Net.fetch('rx')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['PC4'] += Net.fetch('SDA')").unwrap();
    writeln!(body, "U1['PC5'] += Net.fetch('SCL')").unwrap();

    if config.features.led {
        writeln!(body).unwrap();
        writeln!(body, "{}", power_led(ctx, config)).unwrap();
    }

    let text = subcircuit(ctx, config, "atmega328p", "Generate ATmega328P subsystem to circuit", &body);
    Fragment::new("mcu", text).provides("U1")
}

pub fn attiny85(ctx: &mut EmitContext, config: &BoardConfig, mcu: &McuInfo) -> Fragment {
    let rail = config.rail.net;

    let mut body = String::new();
    writeln!(body, "global U1").unwrap();
    writeln!(
        body,
        "U1 = Part('MCU_Microchip_ATtiny', '{}', footprint='{}')",
        mcu.label, mcu.footprint
    )
    .unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['GND'] += Net.fetch('GND')").unwrap();

    if config.needs_reset_net() {
        writeln!(body, "U1['{}'] += Net.fetch('RST')", mcu.family.reset_pin()).unwrap();
    }

    if config.features.led {
        writeln!(body).unwrap();
        writeln!(body, "{}", power_led(ctx, config)).unwrap();
    }

    let text = subcircuit(ctx, config, "attiny85", "Generate ATtiny85", &body);
    Fragment::new("mcu", text).provides("U1")
}

fn power_led(ctx: &mut EmitContext, config: &BoardConfig) -> String {
    ctx.require(Helper::Resistor);
    let body = format!(
        "led = Part('Device', 'LED', footprint='{}')\nNet.fetch('GND') & led & R('1k') & Net.fetch('{}')",
        config.passives.led, config.rail.net
    );
    subcircuit(ctx, config, "power_led", "Generate power indicator led", &body)
}

/// In circuit serial programming header, AVR only
pub fn icsp(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.icsp {
        return None;
    }
    let family = config.mcu_family()?;
    let Some([miso, sck, mosi]) = family.icsp_pins() else {
        log::debug!("ICSP header skipped, {:?} is not an AVR", family);
        return None;
    };

    let mut body = String::new();
    writeln!(
        body,
        "ICSP_CONN = Part('Connector_Generic', 'Conn_02x03_Odd_Even', footprint='Connector_PinHeader_2.54mm:PinHeader_2x03_P2.54mm_Vertical')"
    )
    .unwrap();
    writeln!(body, "ICSP_CONN[1] += U1['{}']", miso).unwrap();
    writeln!(body, "ICSP_CONN[2] += Net.fetch('{}')", config.rail.net).unwrap();
    writeln!(body, "ICSP_CONN[3] += U1['{}']", sck).unwrap();
    writeln!(body, "ICSP_CONN[4] += U1['{}']", mosi).unwrap();
    writeln!(body, "ICSP_CONN[5] += U1['{}']", family.reset_pin()).unwrap();
    writeln!(body, "ICSP_CONN[6] += Net.fetch('GND')").unwrap();

    let text = inline("Generate In Circuit Serial Programmer header", &body);
    Some(
        Fragment::new("icsp", text)
            .provides("ICSP_CONN")
            .consumes("U1"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MCUS;

    fn config_for(label: &str) -> BoardConfig {
        let mut config = BoardConfig::default();
        config.mcu = MCUS.lookup(label).unwrap();
        config
    }

    #[test]
    fn test_atmega_nets() {
        let config = config_for("ATmega328P-PU");
        let mut ctx = EmitContext::new();
        let fragment = atmega328p(&mut ctx, &config, config.mcu.unwrap());

        assert_eq!(fragment.provides, vec!["U1"]);
        assert!(fragment.text.contains("U1['PD1'] += Net.fetch('tx')"));
        assert!(fragment.text.contains("U1['PC4'] += Net.fetch('SDA')"));
        assert!(fragment.text.contains("U1['RESET'] += Net.fetch('RST')"));
        assert!(fragment.text.ends_with("atmega328p()"));
    }

    #[test]
    fn test_attiny_reset_only_when_used() {
        let mut config = config_for("ATtiny85-20PU");
        let mut ctx = EmitContext::new();
        let text = attiny85(&mut ctx, &config, config.mcu.unwrap()).text;
        assert!(!text.contains("RST"));

        config.features.reset_button = true;
        let text = attiny85(&mut ctx, &config, config.mcu.unwrap()).text;
        assert!(text.contains("U1['PB5'] += Net.fetch('RST')"));
    }

    #[test]
    fn test_icsp_pins_follow_family() {
        let mut config = config_for("ATtiny85-20SU");
        config.features.icsp = true;
        let mut ctx = EmitContext::new();
        let fragment = icsp(&mut ctx, &config).unwrap();
        assert_eq!(fragment.consumes, vec!["U1"]);
        assert!(fragment.text.contains("ICSP_CONN[1] += U1['PB1']"));
        assert!(fragment.text.contains("ICSP_CONN[5] += U1['PB5']"));
        assert!(fragment.text.contains("ICSP_CONN[2] += Net.fetch('+3V3')"));
    }

    #[test]
    fn test_icsp_skipped_for_esp() {
        let mut config = config_for("ESP-12E");
        config.features.icsp = true;
        assert!(icsp(&mut EmitContext::new(), &config).is_none());

        let mut config = BoardConfig::default();
        config.features.icsp = true;
        assert!(icsp(&mut EmitContext::new(), &config).is_none());
    }
}
