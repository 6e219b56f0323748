use std::fmt;

use bytes::Bytes;
use similar::{ChangeTag, TextDiff};

use crate::utils::hex_dump;

const NO_DIFF_MESSAGE: &str = "Compared values have no visual difference.";

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// A comparable value: a metadata field or decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(i64),
    Bytes(Bytes),
}

impl Value {
    /// Numbers become their decimal text; text and bytes are left alone.
    pub fn stringify_number(self) -> Value {
        match self {
            Value::Number(n) => Value::Text(n.to_string()),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bytes(b) => f.write_str(&hex_dump(b)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

/// Equality and rendering utilities the matcher relies on. A test harness can
/// plug in its own to change how values are compared or printed.
pub trait MatcherContext: Send + Sync {
    fn equals(&self, expected: &Value, received: &Value) -> bool;

    /// Renders a diff of two values, expected first.
    fn diff(&self, expected: &Value, received: &Value) -> String;

    fn print_diff_or_stringify(
        &self,
        expected: &str,
        received: &str,
        expected_label: &str,
        received_label: &str,
    ) -> String;

    fn dim(&self, text: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContext {
    colors: bool,
}

impl DefaultContext {
    pub fn plain() -> Self {
        Self { colors: false }
    }

    pub fn colored() -> Self {
        Self { colors: true }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn expected_color(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn received_color(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

impl MatcherContext for DefaultContext {
    fn equals(&self, expected: &Value, received: &Value) -> bool {
        expected == received
    }

    fn diff(&self, expected: &Value, received: &Value) -> String {
        if expected == received {
            return self.dim(NO_DIFF_MESSAGE);
        }

        let expected_text = expected.to_string();
        let received_text = received.to_string();
        let old: Vec<&str> = expected_text.split('\n').collect();
        let new: Vec<&str> = received_text.split('\n').collect();
        let diff = TextDiff::from_slices(&old, &new);

        let mut lines = vec![
            self.expected_color("- Expected"),
            self.received_color("+ Received"),
            String::new(),
        ];
        for change in diff.iter_all_changes() {
            let line = change.value();
            match change.tag() {
                ChangeTag::Equal => lines.push(self.dim(&format!("  {line}"))),
                ChangeTag::Delete => lines.push(self.expected_color(&format!("- {line}"))),
                ChangeTag::Insert => lines.push(self.received_color(&format!("+ {line}"))),
            }
        }
        lines.join("\n")
    }

    fn print_diff_or_stringify(
        &self,
        expected: &str,
        received: &str,
        expected_label: &str,
        received_label: &str,
    ) -> String {
        let width = expected_label.len().max(received_label.len());
        format!(
            "{:<width$} {}\n{:<width$} {}",
            format!("{expected_label}:"),
            self.expected_color(&format!("{expected:?}")),
            format!("{received_label}:"),
            self.received_color(&format!("{received:?}")),
            width = width + 1,
        )
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_of_single_lines() {
        let ctx = DefaultContext::plain();
        let out = ctx.diff(&"application/json".into(), &"application/text".into());
        assert_eq!(
            out,
            "- Expected\n+ Received\n\n- application/json\n+ application/text"
        );
    }

    #[test]
    fn diff_keeps_common_lines() {
        let ctx = DefaultContext::plain();
        let out = ctx.diff(&"a\nb\nc".into(), &"a\nx\nc".into());
        assert_eq!(out, "- Expected\n+ Received\n\n  a\n- b\n+ x\n  c");
    }

    #[test]
    fn diff_of_equal_values_has_no_visual_difference() {
        let ctx = DefaultContext::plain();
        assert_eq!(ctx.diff(&"same".into(), &"same".into()), NO_DIFF_MESSAGE);
    }

    #[test]
    fn diff_of_bytes_uses_hex_rows() {
        let ctx = DefaultContext::plain();
        let out = ctx.diff(
            &Bytes::from_static(&[1, 2]).into(),
            &Bytes::from_static(&[1, 3]).into(),
        );
        assert_eq!(out, "- Expected\n+ Received\n\n- 00000000  01 02\n+ 00000000  01 03");
    }

    #[test]
    fn numbers_are_stringified() {
        assert_eq!(
            Value::Number(24).stringify_number(),
            Value::Text("24".into())
        );
        assert_eq!(Value::from(16u64), Value::Number(16));
    }

    #[test]
    fn stringify_labels_and_quotes() {
        let ctx = DefaultContext::plain();
        assert_eq!(
            ctx.print_diff_or_stringify("File", "Error", "Expected constructor", "Received constructor"),
            "Expected constructor: \"File\"\nReceived constructor: \"Error\""
        );
        assert_eq!(
            ctx.print_diff_or_stringify("a", "b", "Expected", "Received value"),
            "Expected:       \"a\"\nReceived value: \"b\""
        );
    }

    #[test]
    fn colored_context_wraps_in_ansi() {
        let ctx = DefaultContext::colored();
        assert_eq!(ctx.dim("x"), "\x1b[2mx\x1b[0m");
        assert_eq!(ctx.expected_color("x"), "\x1b[32mx\x1b[0m");
    }
}
