//! Core types for documentation lookup.
//!
//! This module contains the data structures used throughout cmake-doc:
//! - [`Symbol`] - The source text documentation is requested for
//! - [`HelpTopic`] - Which `cmake --help-*` family answers a query
//! - [`Documentation`] - Raw text returned by cmake for one query
//! - [`HoverTarget`] / [`HoverInfo`] / [`Range`] - Editor-facing wrappers

use serde::Serialize;
use std::fmt;

/// A piece of CMake source text that documentation may be requested for.
///
/// Built by the host adapter (see [`detect_hover_target`](crate::detect_hover_target))
/// before it reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// Command name in an invocation: `add_library(...)`
    Command(String),

    /// Unquoted argument or variable reference: `PUBLIC`, `${CMAKE_CXX_FLAGS}`
    Literal(String),

    /// Anything else (comments, quoted text, parentheses)
    Other,
}

impl Symbol {
    /// Create a command symbol.
    pub fn command(name: impl Into<String>) -> Self {
        Symbol::Command(name.into())
    }

    /// Create a literal symbol.
    pub fn literal(text: impl Into<String>) -> Self {
        Symbol::Literal(text.into())
    }
}

/// A family of cmake help entries.
///
/// Each topic maps to a `--help-<topic>` flag taking a name, and (for the
/// literal tiers) a `--help-<topic>-list` flag enumerating known names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpTopic {
    Command,
    Module,
    Property,
    Variable,
}

impl HelpTopic {
    /// Topics a literal is checked against, in priority order.
    pub const LITERAL_TIERS: [HelpTopic; 3] =
        [HelpTopic::Module, HelpTopic::Property, HelpTopic::Variable];

    /// Flag requesting documentation for one entry.
    pub fn help_flag(&self) -> &'static str {
        match self {
            HelpTopic::Command => "--help-command",
            HelpTopic::Module => "--help-module",
            HelpTopic::Property => "--help-property",
            HelpTopic::Variable => "--help-variable",
        }
    }

    /// Flag listing every entry of the topic.
    pub fn list_flag(&self) -> &'static str {
        match self {
            HelpTopic::Command => "--help-command-list",
            HelpTopic::Module => "--help-module-list",
            HelpTopic::Property => "--help-property-list",
            HelpTopic::Variable => "--help-variable-list",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpTopic::Command => "command",
            HelpTopic::Module => "module",
            HelpTopic::Property => "property",
            HelpTopic::Variable => "variable",
        }
    }
}

impl fmt::Display for HelpTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation text returned by one cmake help query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documentation {
    /// Topic the query was issued for
    pub topic: HelpTopic,

    /// Name passed to the help flag (wrapper already stripped)
    pub name: String,

    /// Output lines joined with `\n`
    pub text: String,
}

/// Source range for highlighting.
///
/// All positions are 1-based (line 1, column 1 is the start). The end
/// column points one past the last character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// Symbol under the cursor together with its source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    pub symbol: Symbol,
    pub range: Range,
}

/// Hover information result.
///
/// Contains rendered documentation to display in a tooltip,
/// and optionally the source range to highlight.
#[derive(Debug, Clone, Serialize)]
pub struct HoverInfo {
    /// Rendered documentation
    pub contents: String,

    /// Topic the documentation came from
    pub topic: HelpTopic,

    /// Looked-up name
    pub name: String,

    /// Range in source that this hover applies to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl HoverInfo {
    /// Create hover info from rendered contents of a documentation result.
    pub fn new(doc: Documentation, contents: String) -> Self {
        Self {
            contents,
            topic: doc.topic,
            name: doc.name,
            range: None,
        }
    }

    /// Add a source range to the hover info.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Documentation {
        Documentation {
            topic: HelpTopic::Module,
            name: "FindZLIB".to_string(),
            text: "FindZLIB\n--------".to_string(),
        }
    }

    #[test]
    fn test_help_flags() {
        assert_eq!(HelpTopic::Command.help_flag(), "--help-command");
        assert_eq!(HelpTopic::Module.list_flag(), "--help-module-list");
        assert_eq!(HelpTopic::Property.help_flag(), "--help-property");
        assert_eq!(HelpTopic::Variable.list_flag(), "--help-variable-list");
    }

    #[test]
    fn test_literal_tier_order() {
        assert_eq!(
            HelpTopic::LITERAL_TIERS,
            [HelpTopic::Module, HelpTopic::Property, HelpTopic::Variable]
        );
    }

    #[test]
    fn test_symbol_constructors() {
        assert_eq!(
            Symbol::command("add_library"),
            Symbol::Command("add_library".to_string())
        );
        assert_eq!(
            Symbol::literal("${FOO}"),
            Symbol::Literal("${FOO}".to_string())
        );
    }

    #[test]
    fn test_hover_info_new() {
        let info = HoverInfo::new(doc(), "rendered".to_string());
        assert_eq!(info.contents, "rendered");
        assert_eq!(info.topic, HelpTopic::Module);
        assert_eq!(info.name, "FindZLIB");
        assert!(info.range.is_none());
    }

    #[test]
    fn test_hover_info_with_range() {
        let range = Range {
            start_line: 1,
            start_col: 1,
            end_line: 1,
            end_col: 5,
        };
        let info = HoverInfo::new(doc(), "x".to_string()).with_range(range.clone());
        assert_eq!(info.range, Some(range));
    }

    #[test]
    fn test_hover_info_json() {
        let info = HoverInfo::new(doc(), "text".to_string());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["topic"], "module");
        assert_eq!(json["name"], "FindZLIB");
        assert!(json.get("range").is_none());
    }
}
