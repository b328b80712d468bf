use std::fmt;
use std::path::Path;

/// Text that has already been escaped for embedding in a filter-graph value.
///
/// The only constructors are [`escape_graph_value`] and [`escape_graph_path`], so a value of this
/// type is escaped exactly once no matter how many stages pass it along.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EscapedText(String);

impl EscapedText {
    /// Borrow the escaped form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape `:` and `'`, the two characters that delimit options and quoted values in the engine's
/// graph description. Everything else passes through untouched.
pub fn escape_graph_value(raw: &str) -> EscapedText {
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            ':' => out.push_str("\\:"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    EscapedText(out)
}

/// Escape a filesystem path for use as a filter option value (fonts, subtitle files).
///
/// Windows separators are normalized to `/` first so drive letters are the only `:` left.
pub fn escape_graph_path(path: &Path) -> EscapedText {
    let normalized = path.to_string_lossy().replace('\\', "/");
    escape_graph_value(&normalized)
}

/// Quote a path for a concat-list `file` directive.
///
/// The list format uses shell-like single quoting: an embedded `'` closes the quote, emits an
/// escaped quote and reopens.
pub fn quote_concat_path(path: &str) -> String {
    splice_quote(path)
}

/// Quote an option value for the filter-graph tokenizer.
///
/// The graph parser copies quoted spans literally and only honours `\` outside quotes, so a `'`
/// inside the value closes the span, is emitted as `\'` and the span reopens. Commas, semicolons
/// and brackets inside the span no longer split the graph. The option-level escapes carried by an
/// [`EscapedText`] survive this step unchanged.
pub fn quote_graph_token(value: &str) -> String {
    splice_quote(value)
}

fn splice_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/escape.rs"]
mod tests;
