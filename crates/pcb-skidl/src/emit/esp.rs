//! ESP8266 based microcontrollers: modules, the bare chip and the Wemos D1 Mini

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, subcircuit, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::{McuFamily, McuInfo};

const PUSH_BUTTON: &str =
    "Part('Switch', 'SW_Push', footprint=\"Button_Switch_SMD:SW_SPST_B3U-1000P\")";

/// ESP-07 / ESP-12E module with boot straps
pub fn esp_module(ctx: &mut EmitContext, config: &BoardConfig, mcu: &McuInfo) -> Fragment {
    ctx.require(Helper::Resistor);
    let rail = config.rail.net;

    let mut body = String::new();
    writeln!(body, "global U1").unwrap();
    writeln!(
        body,
        "U1 = Part('RF_Module', '{}', footprint='{}')",
        mcu.label, mcu.footprint
    )
    .unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "U1['EN'] & R('10k') & Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['GPIO15'] & R('4k7') & Net.fetch('GND')").unwrap();

    for block in esp_options(ctx, config, mcu.family) {
        writeln!(body).unwrap();
        writeln!(body, "{}", block).unwrap();
    }

    if config.features.reset_button {
        let button = format!(
            "sw_reset = {}\nsw_reset[1] += Net.fetch('RST')\nsw_reset[2] += Net.fetch('GND')",
            PUSH_BUTTON
        );
        writeln!(body).unwrap();
        writeln!(
            body,
            "{}",
            inline(
                "Generate button for pulling ESP RST pin to low (e.g. reset)",
                &button
            )
        )
        .unwrap();
    }

    let text = subcircuit(ctx, config, "esp", "Generate ESP-module code to circuit", &body);
    Fragment::new("mcu", text).provides("U1")
}

/// Bare ESP8266EX with antenna, supply filtering, crystal and SPI flash
pub fn esp8266ex(ctx: &mut EmitContext, config: &BoardConfig, mcu: &McuInfo) -> Fragment {
    ctx.require(Helper::Resistor);
    ctx.require(Helper::Capacitor);
    ctx.require(Helper::Inductor);
    let rail = config.rail.net;

    let antenna = subcircuit(
        ctx,
        config,
        "esp8266ex_antenna",
        "Generate ESP8266EX antenna circuit",
        "connector = Part('Connector', 'Conn_Coaxial', footprint='Connector_Coaxial:U.FL_Molex_MCRF_73412-0110_Vertical')\n\
         l = L('2.2nH')\n\
         U1['LNA'] & l & connector & Net.fetch('GND')\n\
         l[1] & C('3.2pF') & Net.fetch('GND')\n\
         l[2] & C('2.4pF') & Net.fetch('GND')",
    );

    let mut vcc = String::new();
    for pin in ["VDDPST", "VDDA", "VDDD"] {
        writeln!(vcc, "U1['{}'] += Net.fetch('{}')", pin, rail).unwrap();
    }
    writeln!(vcc, "Net.fetch('{}') & C('10uF') & Net.fetch('GND')", rail).unwrap();
    writeln!(vcc, "Net.fetch('{}') & C('0.1uF') & Net.fetch('GND')", rail).unwrap();
    writeln!(vcc).unwrap();
    writeln!(vcc, "l = L('4.3nH')").unwrap();
    writeln!(vcc, "Net.fetch('{}') & l & U1['VDD3P3']", rail).unwrap();
    writeln!(vcc, "l[1] & C('10uF') & Net.fetch('GND')").unwrap();
    writeln!(vcc, "l[1] & C('0.1uF') & Net.fetch('GND')").unwrap();
    writeln!(vcc, "l[2] & C('0.1uF') & Net.fetch('GND')").unwrap();
    let vcc = subcircuit(
        ctx,
        config,
        "esp8266ex_vcc",
        "Generate ESP8266EX input voltage circuits",
        &vcc,
    );

    let crystal = subcircuit(
        ctx,
        config,
        "esp8266ex_crystal",
        "Generate ESP8266EX crystal circuit",
        "crystal = Part('Device', 'Crystal_GND24', footprint='Crystal:Crystal_SMD_Abracon_ABM8G-4Pin_3.2x2.5mm')\n\
         crystal[1] += U1['XTAL_IN']\n\
         crystal[3] += U1['XTAL_OUT']\n\
         crystal[2] += Net.fetch('GND')\n\
         crystal[4] += Net.fetch('GND')\n\
         crystal[1] & C('10pF') & Net.fetch('GND')\n\
         crystal[3] & C('10pF') & Net.fetch('GND')",
    );

    let mut body = String::new();
    writeln!(body, "global U1").unwrap();
    writeln!(
        body,
        "U1 = Part('MCU_Espressif', '{}', footprint='{}')",
        mcu.label, mcu.footprint
    )
    .unwrap();
    writeln!(body).unwrap();
    writeln!(body, "{}", antenna).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "{}", vcc).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['RES12K'] & R('12k') & Net.fetch('GND')").unwrap();
    writeln!(body, "U1['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "U1['CHIP_EN'] & R('10k') & Net.fetch('{}')", rail).unwrap();
    writeln!(body, "U1['MTDO'] & R('4k7') & Net.fetch('GND')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "{}", crystal).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "U1['SDIO_DATA_1'] += Net.fetch('SDI/SD1')").unwrap();
    writeln!(body, "U1['SDIO_DATA_0'] += Net.fetch('SDO/SD0')").unwrap();
    writeln!(body, "U1['SDIO_CLK'] & R('200') & Net.fetch('SCK/CLK')").unwrap();
    writeln!(body, "U1['SDIO_CMD'] += Net.fetch('SCS/CMD')").unwrap();
    writeln!(body, "U1['SDIO_DATA_3'] += Net.fetch('SWP/SD3')").unwrap();
    writeln!(body, "U1['SDIO_DATA_2'] += Net.fetch('SHD/SD2')").unwrap();
    writeln!(body).unwrap();
    writeln!(
        body,
        "flash = Part('Memory_Flash', 'W25Q32JVZP', footprint='Package_SON:WSON-8-1EP_6x5mm_P1.27mm_EP3.4x4.3mm')"
    )
    .unwrap();
    writeln!(body, "flash['CS'] += Net.fetch('SCS/CMD')").unwrap();
    writeln!(body, "flash['CLK'] += Net.fetch('SCK/CLK')").unwrap();
    writeln!(body, "flash['IO2'] += Net.fetch('SHD/SD2')").unwrap();
    writeln!(body, "flash['DI'] += Net.fetch('SDI/SD1')").unwrap();
    writeln!(body, "flash['DO'] += Net.fetch('SDO/SD0')").unwrap();
    writeln!(body, "flash['IO3'] += Net.fetch('SWP/SD3')").unwrap();
    writeln!(body, "flash['VCC'] += Net.fetch('{}')", rail).unwrap();
    writeln!(body, "flash['GND'] += Net.fetch('GND')").unwrap();

    for block in esp_options(ctx, config, mcu.family) {
        writeln!(body).unwrap();
        writeln!(body, "{}", block).unwrap();
    }

    let text = subcircuit(
        ctx,
        config,
        "esp8266ex",
        "Generate ESP8266EX mcu to circuit with its supporting circuits",
        &body,
    );
    Fragment::new("mcu", text).provides("U1")
}

/// Wemos D1 Mini module, powered through its 3V3 or 5V pin
pub fn wemos_d1_mini(ctx: &mut EmitContext, config: &BoardConfig, mcu: &McuInfo) -> Fragment {
    let rail = config.rail.net;
    let supply_pin = if rail == "+3V3" { "3V3" } else { "5V" };

    let mut body = String::new();
    writeln!(body, "global U1").unwrap();
    writeln!(
        body,
        "U1 = Part('MCU_Module', 'WeMos_D1_mini', footprint='{}')",
        mcu.footprint
    )
    .unwrap();
    writeln!(body, "U1['{}'] += Net.fetch('{}')", supply_pin, rail).unwrap();
    writeln!(body, "U1['GND'] += Net.fetch('GND')").unwrap();

    for block in esp_options(ctx, config, mcu.family) {
        writeln!(body).unwrap();
        writeln!(body, "{}", block).unwrap();
    }

    let text = subcircuit(ctx, config, "wemos_d1_mini", "Generate Wemos D1 Mini footprint", &body);
    Fragment::new("mcu", text).provides("U1")
}

/// Optional blocks shared by every ESP variant
fn esp_options(ctx: &mut EmitContext, config: &BoardConfig, family: McuFamily) -> Vec<String> {
    let features = &config.features;
    let mut blocks = Vec::new();

    if config.needs_reset_net() {
        let mut block = format!("U1['{}'] += Net.fetch('RST')", family.reset_pin());
        if let (true, Some(wake)) = (features.reset_line, family.wake_pin()) {
            write!(block, "\nU1['{}'] += Net.fetch('RST')", wake).unwrap();
        }
        blocks.push(block);
    }

    let boot = family.boot_pin();
    if let (true, Some(boot)) = (features.led, boot) {
        ctx.require(Helper::Resistor);
        let led = format!(
            "led = Part('Device', 'LED', footprint='{}')\nU1['{}'] & (R('1k') & led & Net.fetch('{}'))",
            config.passives.led, boot, config.rail.net
        );
        blocks.push(subcircuit(
            ctx,
            config,
            "power_led",
            "Generate led connected to ESP GPIO0 that is on after boot",
            &led,
        ));
    }

    if let (true, Some(boot)) = (features.flash_button, boot) {
        let button = format!(
            "sw_flash = {}\nsw_flash[1] += U1['{}']\nsw_flash[2] += Net.fetch('GND')",
            PUSH_BUTTON, boot
        );
        blocks.push(inline(
            "Generate button for pulling ESP GPIO0 low (e.g. flash mode when booting)",
            &button,
        ));
    }

    if let (true, Some((tx, rx))) = (config.has_serial(), family.serial_pins()) {
        let serial = format!(
            "U1['{}'] += Net.fetch('tx')\nU1['{}'] += Net.fetch('rx')",
            tx, rx
        );
        blocks.push(inline("Generate ESP serial networks", &serial));
    }

    blocks
}
