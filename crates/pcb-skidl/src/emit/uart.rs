//! USB connector, USB to UART bridges and the bootloader reset circuits

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, subcircuit, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::UartBridge;

pub fn usb_connector(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let connector = config.usb_connector?;

    let mut body = String::new();
    writeln!(
        body,
        "USB_CONNECTOR = Part('Connector', '{}', footprint='{}')",
        connector.part, connector.footprint
    )
    .unwrap();
    writeln!(body, "USB_CONNECTOR['VBUS'] += Net.fetch('+VBus')").unwrap();
    writeln!(body, "USB_CONNECTOR['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "USB_CONNECTOR['D-'] += Net.fetch('USBD-')").unwrap();
    writeln!(body, "USB_CONNECTOR['D+'] += Net.fetch('USBD+')").unwrap();

    let text = inline("Generate USB connector", &body);
    Some(Fragment::new("usb_connector", text).provides("USB_CONNECTOR"))
}

/// USB to UART bridge chip on the tx/rx, DTR/RTS and USB data nets
pub fn bridge(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let bridge = config.usb_uart?;
    let rail = config.rail.net;

    let (name, doc, body) = match bridge.chip {
        UartBridge::Ft231xs => {
            ctx.require(Helper::Capacitor);
            ("ft231x", "Generate FT231XS usb uart circuitry", ft231xs(rail))
        }
        UartBridge::Ft232rl => {
            ctx.require(Helper::Capacitor);
            ("ft232r", "Generate FT232RL usb uart circuitry", ft232rl(rail))
        }
        UartBridge::Cp2102n => ("cp2102n", "Generate CP2102N usb uart circuitry", cp2102n(rail)),
        UartBridge::Cp2104 => {
            ctx.require(Helper::Resistor);
            ctx.require(Helper::Capacitor);
            ("cp2104", "Generate CP2104 usb uart circuitry", cp2104(rail))
        }
    };

    let text = subcircuit(ctx, config, name, doc, &body);
    Some(Fragment::new("uart_bridge", text))
}

fn ft231xs(rail: &str) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "ft231x = Part('Interface_USB', 'FT231XS', footprint=\"Package_SO:SSOP-20_3.9x8.7mm_P0.635mm\")"
    )
    .unwrap();
    writeln!(body, "ft231x['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "ft231x['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ft231x['TXD'] += Net.fetch('rx')").unwrap();
    writeln!(body, "ft231x['RXD'] += Net.fetch('tx')").unwrap();
    writeln!(body, "ft231x['USBDM'] += Net.fetch('USBD-')").unwrap();
    writeln!(body, "ft231x['USBDP'] += Net.fetch('USBD+')").unwrap();
    writeln!(body, "ft231x['DTR'] += Net.fetch('DTR')").unwrap();
    writeln!(body, "ft231x['RTS'] += Net.fetch('RTS')").unwrap();
    writeln!(body, "Net.fetch('GND') & C('100nF') & ft231x['3V3OUT']").unwrap();
    body
}

fn ft232rl(rail: &str) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "ft232r = Part('Interface_USB', 'FT232RL', footprint=\"Package_SO:SSOP-28_5.3x10.2mm_P0.65mm\")"
    )
    .unwrap();
    writeln!(body, "ft232r['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "ft232r['VCCIO'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "ft232r['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ft232r['TEST'] += Net.fetch('GND')").unwrap();
    writeln!(body, "ft232r['TXD'] += Net.fetch('rx')").unwrap();
    writeln!(body, "ft232r['RXD'] += Net.fetch('tx')").unwrap();
    writeln!(body, "ft232r['USBD-'] += Net.fetch('USBD-')").unwrap();
    writeln!(body, "ft232r['USBD+'] += Net.fetch('USBD+')").unwrap();
    writeln!(body, "ft232r['DTR'] += Net.fetch('DTR')").unwrap();
    writeln!(body, "ft232r['RTS'] += Net.fetch('RTS')").unwrap();
    writeln!(body, "Net.fetch('GND') & C('100nF') & ft232r['3V3OUT']").unwrap();
    body
}

fn cp2102n(rail: &str) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "cp2102n = Part('Interface_USB', 'CP2102N-A01-GQFN24', footprint=\"Package_DFN_QFN:QFN-24-1EP_4x4mm_P0.5mm_EP2.6x2.6mm\")"
    )
    .unwrap();
    writeln!(body, "cp2102n['VDD'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "cp2102n['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "cp2102n['VBUS'] += Net.fetch('+VBus')").unwrap();
    writeln!(body, "cp2102n['D+'] += Net.fetch('USBD+')").unwrap();
    writeln!(body, "cp2102n['D-'] += Net.fetch('USBD-')").unwrap();
    writeln!(body, "cp2102n['TXD'] += Net.fetch('rx')").unwrap();
    writeln!(body, "cp2102n['RXD'] += Net.fetch('tx')").unwrap();
    writeln!(body, "cp2102n['DTR'] += Net.fetch('DTR')").unwrap();
    writeln!(body, "cp2102n['RTS'] += Net.fetch('RTS')").unwrap();
    body
}

fn cp2104(rail: &str) -> String {
    let mut body = String::new();
    writeln!(
        body,
        "cp2104 = Part('Interface_USB', 'CP2104', footprint=\"Package_DFN_QFN:QFN-24-1EP_4x4mm_P0.5mm_EP2.6x2.6mm\")"
    )
    .unwrap();
    writeln!(body, "cp2104['VDD'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "cp2104['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "cp2104['VBUS'] += Net.fetch('+VBus')").unwrap();
    writeln!(body, "cp2104['D+'] += Net.fetch('USBD+')").unwrap();
    writeln!(body, "cp2104['D-'] += Net.fetch('USBD-')").unwrap();
    writeln!(body, "cp2104['TXD'] & R('470') & Net.fetch('rx')").unwrap();
    writeln!(body, "cp2104['RXD'] & R('470') & Net.fetch('tx')").unwrap();
    writeln!(body, "cp2104['DTR'] += Net.fetch('DTR')").unwrap();
    writeln!(body, "cp2104['RTS'] += Net.fetch('RTS')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "cp2104['VPP'] & C('4.7uF') & Net.fetch('GND')").unwrap();
    writeln!(body, "cp2104['VBUS'] & C('1uF') & Net.fetch('GND')").unwrap();
    writeln!(body, "cp2104['VDD'] & C('4.7uF') & Net.fetch('GND')").unwrap();
    writeln!(body, "cp2104['VDD'] & C('100nF') & Net.fetch('GND')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "cp2104['RST'] & R('4k7') & Net.fetch('{}')", rail).unwrap();
    body
}

/// Bootloader entry driven by the bridge's DTR and RTS lines
pub fn bridge_reset(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    config.usb_uart?;
    let family = config.mcu_family()?;

    if family.is_avr() {
        ctx.require(Helper::Capacitor);
        let text = inline(
            "Generate auto-reset for AVR serial bootloader",
            "Net.fetch('DTR') & C('100nF') & Net.fetch('RST')",
        );
        return Some(Fragment::new("uart_reset", text));
    }

    let boot = family.boot_pin()?;
    ctx.require(Helper::Resistor);
    let transistor = config.transistor.part_call();

    let mut body = String::new();
    writeln!(body, "Q1 = {}", transistor).unwrap();
    writeln!(body, "Q2 = {}", transistor).unwrap();
    writeln!(body, "Net.fetch('DTR') & R('10k') & Q1['B']").unwrap();
    writeln!(body, "Net.fetch('RTS') & R('10k') & Q2['B']").unwrap();
    writeln!(body, "Q2['E'] += Net.fetch('DTR')").unwrap();
    writeln!(body, "Q1['E'] += Net.fetch('RTS')").unwrap();
    writeln!(body, "Q1['C'] += Net.fetch('RST')").unwrap();
    writeln!(body, "Q2['C'] += U1['{}']", boot).unwrap();

    let text = subcircuit(ctx, config, "esp_uart_reset", "Generate reset circuitry for ESP", &body);
    Some(Fragment::new("uart_reset", text).consumes("U1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{MCUS, TRANSISTORS, UART_BRIDGES, USB_CONNECTORS};

    fn bridge_config(bridge: &str) -> BoardConfig {
        let mut config = BoardConfig::default();
        config.usb_uart = UART_BRIDGES.lookup(bridge).unwrap();
        config
    }

    #[test]
    fn test_usb_connector() {
        let mut config = BoardConfig::default();
        assert!(usb_connector(&mut EmitContext::new(), &config).is_none());

        config.usb_connector = USB_CONNECTORS.lookup("USB B").unwrap();
        let text = usb_connector(&mut EmitContext::new(), &config).unwrap().text;
        assert!(text.contains("Part('Connector', 'USB_B', footprint='Connector_USB:USB_B_OST_USB-B1HSxx_Horizontal')"));
        assert!(text.contains("USB_CONNECTOR['D+'] += Net.fetch('USBD+')"));
    }

    #[test]
    fn test_bridges_share_nets() {
        for label in ["FT231XS", "FT232RL", "CP2102N", "CP2104"] {
            let config = bridge_config(label);
            let fragment = bridge(&mut EmitContext::new(), &config).unwrap();
            assert!(fragment.consumes.is_empty(), "{label}");
            assert!(fragment.text.contains("Net.fetch('USBD-')"), "{label}");
            assert!(fragment.text.contains("Net.fetch('DTR')"), "{label}");
            assert!(fragment.text.contains("Net.fetch('tx')"), "{label}");
        }
    }

    #[test]
    fn test_cp2104_helpers() {
        let config = bridge_config("CP2104");
        let mut ctx = EmitContext::new();
        bridge(&mut ctx, &config).unwrap();
        assert_eq!(
            ctx.helpers().collect::<Vec<_>>(),
            vec![Helper::Resistor, Helper::Capacitor]
        );
    }

    #[test]
    fn test_esp_reset_pair() {
        let mut config = bridge_config("CP2102N");
        config.mcu = MCUS.lookup("ESP-12E").unwrap();
        config.transistor = TRANSISTORS.require("THT").unwrap();

        let fragment = bridge_reset(&mut EmitContext::new(), &config).unwrap();
        assert_eq!(fragment.consumes, vec!["U1"]);
        assert!(fragment
            .text
            .contains("Q1 = Part('Transistor_BJT', 'PN2222A', footprint='Package_TO_SOT_THT:TO-92_Inline')"));
        assert!(fragment.text.contains("Q2['C'] += U1['GPIO0']"));
    }

    #[test]
    fn test_avr_reset_capacitor() {
        let mut config = bridge_config("FT232RL");
        config.mcu = MCUS.lookup("ATmega328P-MU").unwrap();
        let fragment = bridge_reset(&mut EmitContext::new(), &config).unwrap();
        assert!(fragment.consumes.is_empty());
        assert!(fragment
            .text
            .ends_with("Net.fetch('DTR') & C('100nF') & Net.fetch('RST')"));
    }

    #[test]
    fn test_no_reset_without_bridge_or_mcu() {
        let mut config = BoardConfig::default();
        config.mcu = MCUS.lookup("ESP-12E").unwrap();
        assert!(bridge_reset(&mut EmitContext::new(), &config).is_none());

        let config = bridge_config("FT231XS");
        assert!(bridge_reset(&mut EmitContext::new(), &config).is_none());
    }
}
