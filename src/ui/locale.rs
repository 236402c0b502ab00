//! Localized message lookup.
//!
//! Messages are templates keyed by id. Placeholders use the `{ $name }`
//! form and are filled from named arguments:
//!
//! ```
//! use card_hands::ui::Localization;
//!
//! let loc = Localization::english();
//! let text = loc.get_string("cards-stackquantitychange-added", &[("quantity", 3.into())]);
//! assert_eq!(text, "Card was added (total cards: 3)");
//! ```

use rustc_hash::FxHashMap;

/// Built-in English messages used by the card systems.
const ENGLISH: &[(&str, &str)] = &[
    ("cards-stackquantitychange-added", "Card was added (total cards: { $quantity })"),
    ("cards-stackquantitychange-removed", "Card was removed (total cards: { $quantity })"),
    ("cards-stackquantitychange-joined", "Stacks were joined (total cards: { $quantity })"),
    ("cards-stackquantitychange-split", "Stack was split (total cards: { $quantity })"),
    ("cards-stackquantitychange-unknown", "Stack count changed (total cards: { $quantity })"),
    ("cards-verb-pickcard", "Pick a card"),
    ("cards-verb-convert-to-deck", "Convert to deck"),
];

/// A value substituted into a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocValue {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for LocValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocValue::Int(n) => write!(f, "{n}"),
            LocValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LocValue {
    fn from(n: i64) -> Self {
        LocValue::Int(n)
    }
}

impl From<usize> for LocValue {
    fn from(n: usize) -> Self {
        LocValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<i32> for LocValue {
    fn from(n: i32) -> Self {
        LocValue::Int(n.into())
    }
}

impl From<&str> for LocValue {
    fn from(s: &str) -> Self {
        LocValue::Text(s.to_string())
    }
}

impl From<String> for LocValue {
    fn from(s: String) -> Self {
        LocValue::Text(s)
    }
}

/// Message table for one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Localization {
    messages: FxHashMap<String, String>,
}

impl Localization {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the built-in English messages.
    #[must_use]
    pub fn english() -> Self {
        let mut loc = Self::new();
        for (id, text) in ENGLISH {
            loc.add(*id, *text);
        }
        loc
    }

    /// Add or replace a message.
    pub fn add(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(id.into(), template.into());
    }

    /// Check if a message exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.messages.contains_key(id)
    }

    /// Render a message with named arguments.
    ///
    /// An unknown id renders as the id itself. Placeholders without a
    /// matching argument are left as written.
    #[must_use]
    pub fn get_string(&self, id: &str, args: &[(&str, LocValue)]) -> String {
        let Some(template) = self.messages.get(id) else {
            tracing::warn!(id, "Missing localization");
            return id.to_string();
        };
        render(template, args)
    }
}

fn render(template: &str, args: &[(&str, LocValue)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            out.push_str(after);
            return out;
        };

        let placeholder = &after[..=close];
        let name = after[1..close].trim().trim_start_matches('$');
        match args.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => out.push_str(&value.to_string()),
            None => out.push_str(placeholder),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
