//! Power path: source, switch, fuse, charger, regulator and the wiring between them

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, subcircuit, subcircuit_definition, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::{BatteryManager, PowerSourceKind};

/// Net between the power source and the power switch
const SWITCHED_INPUT: &str = "+VIn";

pub fn power_source(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let source = config.power_source?;
    let positive = if config.features.power_switch {
        SWITCHED_INPUT
    } else {
        config.cell_net()
    };

    let mut body = String::new();
    match source.kind {
        PowerSourceKind::BatteryHolder => {
            writeln!(
                body,
                "BATTERY = Part('Device', 'Battery', footprint='{}')",
                source.footprint
            )
            .unwrap();
            writeln!(body, "BATTERY['+'] += Net.fetch('{}')", positive).unwrap();
            writeln!(body, "BATTERY['-'] += Net.fetch('GND')").unwrap();
        }
        PowerSourceKind::Connector | PowerSourceKind::BarrelJack => {
            let part = match source.kind {
                PowerSourceKind::BarrelJack => "Barrel_Jack",
                _ => "Conn_01x02_Female",
            };
            writeln!(
                body,
                "BATTERY = Part('Connector', '{}', footprint='{}')",
                part, source.footprint
            )
            .unwrap();
            writeln!(body, "BATTERY[1] += Net.fetch('{}')", positive).unwrap();
            writeln!(body, "BATTERY[2] += Net.fetch('GND')").unwrap();
        }
    }

    let text = inline(&format!("Power source: {}", source.label), &body);
    Some(Fragment::new("power_source", text).provides("BATTERY"))
}

/// Slide switch between the power source and the rest of the board
pub fn power_switch(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.power_switch {
        return None;
    }
    if config.power_source.is_none() {
        log::debug!("Power switch skipped, no power source selected");
        return None;
    }

    let mut body = String::new();
    writeln!(
        body,
        "SW_POWER = Part('Switch', 'SW_SPDT', footprint='Button_Switch_THT:SW_Slide_1P2T_CK_OS102011MS2Q')"
    )
    .unwrap();
    writeln!(body, "SW_POWER[2] += Net.fetch('{}')", SWITCHED_INPUT).unwrap();
    writeln!(body, "SW_POWER[1] += Net.fetch('{}')", config.cell_net()).unwrap();

    let text = inline("Power switch", &body);
    Some(Fragment::new("power_switch", text).provides("SW_POWER"))
}

pub fn fuse(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let fuse = config.fuse?;
    let text = inline(
        "Fuse",
        &format!("FUSE = Part('Device', 'Fuse', footprint='{}')", fuse.footprint),
    );
    Some(Fragment::new("fuse", text).provides("FUSE"))
}

/// Li-ion charger fed from the USB bus
pub fn battery_manager(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let manager = config.battery_manager?;
    ctx.require(Helper::Resistor);
    ctx.require(Helper::Capacitor);

    let body = match manager.chip {
        BatteryManager::Mcp73831 => mcp73831(config),
        BatteryManager::Mcp73871 => mcp73871(ctx, config),
    };
    let text = inline(&format!("{} battery management IC", manager.label), &body);
    Some(Fragment::new("battery_manager", text).provides("BATTERYMANAGER"))
}

fn mcp73831(config: &BoardConfig) -> String {
    let cell = config.cell_net();
    let mut body = String::new();
    writeln!(
        body,
        "BATTERYMANAGER = Part('Battery_Management', 'MCP73831-2-OT', footprint='Package_TO_SOT_SMD:SOT-23-5')"
    )
    .unwrap();
    writeln!(body, "BATTERYMANAGER['VDD'] += Net.fetch('+VBus')").unwrap();
    writeln!(body, "BATTERYMANAGER['VBAT'] += Net.fetch('{}')", cell).unwrap();
    writeln!(body, "BATTERYMANAGER['VSS'] += Net.fetch('GND')").unwrap();
    writeln!(body, "Net.fetch('GND') & R('2k') & BATTERYMANAGER['PROG']").unwrap();
    writeln!(body, "Net.fetch('{}') & C('10uF') & Net.fetch('GND')", cell).unwrap();
    writeln!(body, "Net.fetch('+VBus') & C('10uF') & Net.fetch('GND')").unwrap();
    writeln!(body).unwrap();
    writeln!(
        body,
        "BM_LED = Part('Device', 'LED', footprint='{}')",
        config.passives.led
    )
    .unwrap();
    writeln!(body, "BATTERYMANAGER['STAT'] & R('1k') & BM_LED & Net.fetch('+VBus')").unwrap();
    body
}

fn mcp73871(ctx: &mut EmitContext, config: &BoardConfig) -> String {
    let cell = config.cell_net();

    let pull_up = subcircuit_definition(
        ctx,
        config,
        "led_pull_up",
        "Led pulled up to +VBus",
        &format!(
            "bm_led = Part('Device', 'LED', footprint='{}')\nreturn R('1k') & bm_led & Net.fetch('+VBus')",
            config.passives.led
        ),
    );
    let leds = subcircuit(
        ctx,
        config,
        "mcp73871_leds",
        "MCP73871 status leds",
        "BATTERYMANAGER['STAT1'] & led_pull_up()\n\
         BATTERYMANAGER['STAT2'] & led_pull_up()\n\
         BATTERYMANAGER['PG'] & led_pull_up()",
    );

    let mut body = String::new();
    writeln!(body, "{}", pull_up).unwrap();
    writeln!(body).unwrap();
    writeln!(
        body,
        "BATTERYMANAGER = Part('Battery_Management', 'MCP73871-2AA', footprint='Package_DFN_QFN:QFN-20-1EP_4x4mm_P0.5mm_EP2.5x2.5mm')"
    )
    .unwrap();
    for pin in ["IN", "SEL", "PROG2", "TE", "CE"] {
        writeln!(body, "BATTERYMANAGER['{}'] += Net.fetch('+VBus')", pin).unwrap();
    }
    writeln!(body, "BATTERYMANAGER['VSS'] += Net.fetch('GND')").unwrap();
    writeln!(body, "BATTERYMANAGER['OUT'] += Net.fetch('+VBatt')").unwrap();
    writeln!(body, "BATTERYMANAGER['VBAT'] += Net.fetch('{}')", cell).unwrap();
    writeln!(body, "BATTERYMANAGER['Vbat_SENSE'] += Net.fetch('{}')", cell).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "Net.fetch('GND') & R('2k') & BATTERYMANAGER['PROG1']").unwrap();
    writeln!(body, "Net.fetch('GND') & R('100k') & BATTERYMANAGER['PROG3']").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "{}", leds).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "Net.fetch('{}') & C('10uF') & Net.fetch('GND')", cell).unwrap();
    writeln!(body).unwrap();
    writeln!(body, "BM_VPCC_R1 = R('100k')").unwrap();
    writeln!(body, "BM_VPCC_R2 = R('270k')").unwrap();
    writeln!(body, "Net.fetch('GND') & BM_VPCC_R1 & BM_VPCC_R2 & Net.fetch('+VBus')").unwrap();
    writeln!(body, "BATTERYMANAGER['VPCC'] += BM_VPCC_R2[1]").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "BATTERYMANAGER['THERM'] & R('10k') & Net.fetch('GND')").unwrap();
    body
}

/// Linear regulator driving its output rail; the input is hooked up by [`wiring`]
pub fn regulator(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let regulator = config.regulator?;

    let mut body = String::new();
    writeln!(
        body,
        "REGULATOR = Part('{}', '{}', value='{}', footprint='{}')",
        regulator.module, regulator.part, regulator.part, regulator.footprint
    )
    .unwrap();
    writeln!(
        body,
        "REGULATOR['{}'] += Net.fetch('{}')",
        regulator.output_pin, regulator.output
    )
    .unwrap();
    writeln!(body, "REGULATOR['GND'] += Net.fetch('GND')").unwrap();
    if let Some(enable) = regulator.enable_pin {
        writeln!(
            body,
            "REGULATOR['{}'] += REGULATOR['{}']",
            enable, regulator.input_pin
        )
        .unwrap();
    }

    let text = inline(
        "Generate regulator that regulates battery voltage to corresponding voltage rail",
        &body,
    );
    Some(Fragment::new("regulator", text).provides("REGULATOR"))
}

/// Diode letting the USB bus feed the supply net when a battery is present
pub fn autoselect(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    if !config.features.autoselect {
        return None;
    }
    if config.power_source.is_none() {
        log::debug!("Autoselect skipped, the USB bus already is the supply");
        return None;
    }
    let supply = config.supply_net()?;
    ctx.require(Helper::Diode);

    let body = format!(
        "AUTOSELECTOR = D('1N5819')\nNet.fetch('{}') & AUTOSELECTOR & Net.fetch('+VBus')",
        supply
    );
    let text = inline("Power source autoselect", &body);
    Some(Fragment::new("autoselect", text).provides("AUTOSELECTOR"))
}

/// Tie the supply net to the regulator input or straight to the MCU rail
pub fn wiring(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let Some(supply) = config.supply_net() else {
        if config.regulator.is_some() {
            log::warn!("Regulator input left unconnected, no power source or USB connector");
        }
        return None;
    };

    let mut fragment = Fragment::new("wiring", String::new());
    let line = match (config.regulator, config.fuse) {
        (Some(regulator), Some(_)) => {
            fragment = fragment.consumes("REGULATOR").consumes("FUSE");
            format!(
                "REGULATOR['{}'] & FUSE & Net.fetch('{}')",
                regulator.input_pin, supply
            )
        }
        (Some(regulator), None) => {
            fragment = fragment.consumes("REGULATOR");
            format!(
                "REGULATOR['{}'] += Net.fetch('{}')",
                regulator.input_pin, supply
            )
        }
        (None, _) if config.rail.net == supply => {
            if config.fuse.is_some() {
                log::warn!("Fuse left unconnected, {} is fed directly", supply);
            }
            return None;
        }
        (None, Some(_)) => {
            fragment = fragment.consumes("FUSE");
            format!(
                "Net.fetch('{}') & FUSE & Net.fetch('{}')",
                config.rail.net, supply
            )
        }
        (None, None) => format!(
            "rail = Net.fetch('{}')\nrail += Net.fetch('{}')",
            config.rail.net, supply
        ),
    };

    fragment.text = inline("Power network wiring", &line);
    Some(fragment)
}
