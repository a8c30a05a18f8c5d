//! Development board outlines and the silkscreen title

use std::fmt::Write;

use super::context::EmitContext;
use super::fragment::{inline, py_str, Fragment};
use super::helpers::Helper;
use crate::config::BoardConfig;
use crate::mapping::McuFamily;

/// Arduino header pin and the ATmega328P port pin behind it
const ARDUINO_PINS: &[(&str, &str)] = &[
    ("D2", "PD2"),
    ("D3", "PD3"),
    ("D4", "PD4"),
    ("D5", "PD5"),
    ("D6", "PD6"),
    ("D7", "PD7"),
    ("A0", "PC0"),
    ("A1", "PC1"),
    ("A2", "PC2"),
    ("A3", "PC3"),
    ("A4", "PC4"),
    ("A5", "PC5"),
    ("D8", "PB0"),
    ("D9", "PB1"),
    ("D10", "PB2"),
    ("D11", "PB3"),
    ("D12", "PB4"),
    ("D13", "PB5"),
    ("AREF", "AREF"),
];

pub fn board_footprint(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let board = config.board?;

    let mut body = String::new();
    writeln!(
        body,
        "BOARD = Part('MCU_Module', '{}', footprint='{}')",
        board.part, board.footprint
    )
    .unwrap();
    writeln!(body, "BOARD['RESET'] += Net.fetch('RST')").unwrap();
    writeln!(body, "BOARD['+5V'] += Net.fetch('+5V')").unwrap();
    writeln!(body, "BOARD['3V3'] += Net.fetch('+3V3')").unwrap();
    writeln!(body, "BOARD['GND'] += Net.fetch('GND')").unwrap();
    writeln!(body, "BOARD['Vin'] += Net.fetch('Vin')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "BOARD['SDA'] += Net.fetch('SDA')").unwrap();
    writeln!(body, "BOARD['SCL'] += Net.fetch('SCL')").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "BOARD['RX'] += Net.fetch('rx')").unwrap();
    writeln!(body, "BOARD['TX'] += Net.fetch('tx')").unwrap();

    let text = inline(&format!("Generate {} board layout footprint", board.label), &body);
    Some(Fragment::new("board_footprint", text).provides("BOARD"))
}

/// Route the ATmega328P port pins to the matching board headers
pub fn board_connections(_ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    config.board?;
    if config.mcu_family() != Some(McuFamily::ATmega328P) {
        return None;
    }

    let mut body = String::new();
    for (header, port) in ARDUINO_PINS {
        writeln!(body, "BOARD['{}'] += U1['{}']", header, port).unwrap();
    }

    let text = inline("Generate connections from ATmega mcu to Arduino headers", &body);
    Some(
        Fragment::new("board_connections", text)
            .consumes("BOARD")
            .consumes("U1"),
    )
}

/// Title label placed on the board
pub fn board_label(ctx: &mut EmitContext, config: &BoardConfig) -> Option<Fragment> {
    let title = config.board_label()?;
    ctx.require(Helper::SubcircuitLabel);
    let text = inline("Board label", &format!("subcircuit_label({})", py_str(title)));
    Some(Fragment::new("board_label", text))
}
