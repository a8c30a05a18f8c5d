//! Generated text blocks and the wrappers that shape them

use std::fmt::Write;

use super::context::{EmitContext, SUBCIRCUIT_IMPORT};
use super::helpers::Helper;
use crate::config::BoardConfig;

/// One circuit element of the generated program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: &'static str,
    pub text: String,
    /// Module level identifiers the text defines
    pub provides: Vec<&'static str>,
    /// Identifiers the text expects an earlier fragment to define
    pub consumes: Vec<&'static str>,
}

impl Fragment {
    pub fn new(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
            provides: Vec::new(),
            consumes: Vec::new(),
        }
    }

    pub fn provides(mut self, identifier: &'static str) -> Self {
        self.provides.push(identifier);
        self
    }

    pub fn consumes(mut self, identifier: &'static str) -> Self {
        self.consumes.push(identifier);
        self
    }
}

/// Indent every non-blank line by one level
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single quoted Python string literal, always on one source line
pub(crate) fn py_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => write!(out, "\\x{:02x}", c as u32).unwrap(),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `@subcircuit` function wrapping `body`, followed by its call
pub(crate) fn subcircuit(
    ctx: &mut EmitContext,
    config: &BoardConfig,
    name: &str,
    doc: &str,
    body: &str,
) -> String {
    let mut out = subcircuit_definition(ctx, config, name, doc, body);
    writeln!(out).unwrap();
    writeln!(out).unwrap();
    write!(out, "{}()", name).unwrap();
    out
}

/// `@subcircuit` function wrapping `body`, without calling it
pub(crate) fn subcircuit_definition(
    ctx: &mut EmitContext,
    config: &BoardConfig,
    name: &str,
    doc: &str,
    body: &str,
) -> String {
    ctx.import(SUBCIRCUIT_IMPORT);

    let mut out = String::new();
    writeln!(out, "@subcircuit").unwrap();
    writeln!(out, "def {}():", name).unwrap();
    writeln!(out, "    \"\"\"{}\"\"\"", doc).unwrap();
    if config.features.subcircuit_labels {
        ctx.require(Helper::SubcircuitLabel);
        writeln!(out, "    subcircuit_label({})", py_str(name)).unwrap();
    }
    write!(out, "{}", indent(body.trim())).unwrap();
    out
}

/// Module level code introduced by a comment line
pub(crate) fn inline(doc: &str, body: &str) -> String {
    format!("# {}\n\n{}", doc, body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\n  b"), "    a\n\n      b");
    }

    #[test]
    fn test_py_str_escapes_quotes() {
        assert_eq!(py_str("Bob's board"), "'Bob\\'s board'");
        assert_eq!(py_str("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_py_str_stays_on_one_line() {
        assert_eq!(py_str("Line one\nLine two"), "'Line one\\nLine two'");
        assert_eq!(py_str("a\r\n\tb"), "'a\\r\\n\\tb'");
        assert_eq!(py_str("bell\u{7}"), "'bell\\x07'");
        assert_eq!(py_str("nel\u{85}"), "'nel\\x85'");
        assert_eq!(py_str("Ångström"), "'Ångström'");
    }

    #[test]
    fn test_subcircuit_shape() {
        let mut ctx = EmitContext::new();
        let config = BoardConfig::default();
        let text = subcircuit(&mut ctx, &config, "sensor", "Generate sensor", "x = 1\ny = 2\n");
        assert_eq!(
            text,
            "@subcircuit\ndef sensor():\n    \"\"\"Generate sensor\"\"\"\n    x = 1\n    y = 2\n\nsensor()"
        );
        assert_eq!(ctx.import_lines()[0], SUBCIRCUIT_IMPORT);
        assert_eq!(ctx.helpers().count(), 0);
    }

    #[test]
    fn test_subcircuit_label_line() {
        let mut ctx = EmitContext::new();
        let mut config = BoardConfig::default();
        config.features.subcircuit_labels = true;
        let text = subcircuit_definition(&mut ctx, &config, "fuse", "Fuse", "pass");
        assert!(text.contains("    subcircuit_label('fuse')\n    pass"));
        assert_eq!(
            ctx.helpers().collect::<Vec<_>>(),
            vec![Helper::SubcircuitLabel]
        );
    }

    #[test]
    fn test_inline_comment() {
        assert_eq!(inline("Power switch", "\nsw = 1\n"), "# Power switch\n\nsw = 1");
    }

    #[test]
    fn test_fragment_builder() {
        let fragment = Fragment::new("board", "BOARD = 1")
            .provides("BOARD")
            .consumes("U1");
        assert_eq!(fragment.provides, vec!["BOARD"]);
        assert_eq!(fragment.consumes, vec!["U1"]);
    }
}
