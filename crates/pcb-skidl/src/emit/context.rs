//! Per-run registry of helpers and imports

use indexmap::IndexSet;

use super::helpers::Helper;
use crate::mapping::PassiveFootprints;

pub(crate) const SUBCIRCUIT_IMPORT: &str = "from skidl import subcircuit";

/// Imports every generated program needs, after the ones fragments register
const BASE_IMPORTS: &[&str] = &[
    "from skidl import generate_netlist",
    "from skidl import Net",
    "from skidl import Part",
    "from skidl import set_default_tool",
    "from skidl import KICAD7",
];

/// Helpers and imports requested while generating one document
///
/// Both sets keep first-insertion order and ignore repeats. A context lives
/// for a single [`assemble`](super::assemble) call.
#[derive(Debug, Default)]
pub struct EmitContext {
    helpers: IndexSet<Helper>,
    imports: IndexSet<&'static str>,
}

impl EmitContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper, after the helpers it depends on
    pub fn require(&mut self, helper: Helper) {
        if self.helpers.contains(&helper) {
            return;
        }
        for &dependency in helper.dependencies() {
            self.require(dependency);
        }
        for &line in helper.imports() {
            self.import(line);
        }
        self.helpers.insert(helper);
    }

    pub fn import(&mut self, line: &'static str) {
        self.imports.insert(line);
    }

    pub fn helpers(&self) -> impl Iterator<Item = Helper> + '_ {
        self.helpers.iter().copied()
    }

    /// Registered imports followed by the base imports
    pub fn import_lines(&self) -> Vec<&'static str> {
        let mut lines = self.imports.clone();
        lines.extend(BASE_IMPORTS.iter().copied());
        lines.into_iter().collect()
    }

    /// Render every registered helper in registration order
    pub fn render_all(&self, passives: &PassiveFootprints) -> Vec<String> {
        self.helpers
            .iter()
            .map(|helper| helper.render(passives))
            .collect()
    }
}
