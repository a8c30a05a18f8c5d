//! SKiDL program emitter

mod avr;
mod board;
mod context;
mod emitter;
mod esp;
mod fragment;
mod helpers;
mod peripherals;
mod power;
mod uart;

pub use context::EmitContext;
pub use emitter::{assemble, generate, Document};
pub use fragment::Fragment;
pub use helpers::Helper;
