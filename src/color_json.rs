//! Purpose: Render canonical JSON for CLI output, pretty or compact, optionally colored.
//! Exports: `Layout`, `render_json`.
//! Role: Small, pure formatter used by CLI emission paths.
//! Invariants: Without color, pretty output equals `serde_json::to_string_pretty` and
//! compact output equals `serde_json::to_string`.
//! Invariants: Key order is never changed; ANSI escapes appear only when enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

// 8/16-color palette; bright variants lose contrast on some themes.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_NULL: &str = "39";
const COLOR_PUNCT: &str = "39";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Layout {
    Pretty,
    Compact,
}

pub fn render_json(value: &Value, layout: Layout, use_color: bool) -> String {
    let mut out = String::new();
    let mut writer = Writer {
        layout,
        use_color,
        out: &mut out,
    };
    writer.value(value, 0);
    out
}

struct Writer<'a> {
    layout: Layout,
    use_color: bool,
    out: &'a mut String,
}

impl Writer<'_> {
    fn value(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Null => self.colored("null", COLOR_NULL),
            Value::Bool(val) => self.colored(if *val { "true" } else { "false" }, COLOR_BOOL),
            Value::Number(num) => self.colored(&num.to_string(), COLOR_NUMBER),
            Value::String(text) => self.colored(&quote(text), COLOR_STRING),
            Value::Array(items) => self.array(items, indent),
            Value::Object(map) => self.object(map, indent),
        }
    }

    fn array(&mut self, items: &[Value], indent: usize) {
        if items.is_empty() {
            self.colored("[]", COLOR_PUNCT);
            return;
        }
        self.colored("[", COLOR_PUNCT);
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.colored(",", COLOR_PUNCT);
            }
            self.newline(indent + 1);
            self.value(item, indent + 1);
        }
        self.newline(indent);
        self.colored("]", COLOR_PUNCT);
    }

    fn object(&mut self, map: &Map<String, Value>, indent: usize) {
        if map.is_empty() {
            self.colored("{}", COLOR_PUNCT);
            return;
        }
        self.colored("{", COLOR_PUNCT);
        for (idx, (key, value)) in map.iter().enumerate() {
            if idx > 0 {
                self.colored(",", COLOR_PUNCT);
            }
            self.newline(indent + 1);
            self.colored(&quote(key), COLOR_KEY);
            self.colored(":", COLOR_PUNCT);
            if self.layout == Layout::Pretty {
                self.out.push(' ');
            }
            self.value(value, indent + 1);
        }
        self.newline(indent);
        self.colored("}", COLOR_PUNCT);
    }

    fn newline(&mut self, level: usize) {
        if self.layout == Layout::Compact {
            return;
        }
        self.out.push('\n');
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn colored(&mut self, text: &str, color: &str) {
        if !self.use_color {
            self.out.push_str(text);
            return;
        }
        self.out.push_str("\u{1b}[");
        self.out.push_str(color);
        self.out.push('m');
        self.out.push_str(text);
        self.out.push_str("\u{1b}[0m");
    }
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
