//! # cmake-doc
//!
//! Hover documentation for CMake scripts, looked up from the `cmake`
//! executable's own `--help-*` output.
//!
//! This library is designed to be used by editor integrations (VS Code,
//! LSP servers, etc.) and the bundled CLI.
//!
//! ## Features
//!
//! - Command hover: `cmake --help-command <name>`
//! - Literal hover: module, property and variable names, bare or `${}`-wrapped,
//!   classified against cached `--help-*-list` output
//! - Rendering of cmake's reStructuredText output to Markdown or HTML
//! - Range tracking for precise highlighting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmake_doc::{CMake, DocResolver, HoverProvider};
//!
//! let mut provider = HoverProvider::new(DocResolver::new(CMake::new("cmake")));
//!
//! let source = "find_package(ZLIB REQUIRED)";
//! if let Some(info) = provider.hover(source, 1, 3) {
//!     println!("{}", info.contents);
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! cmake-doc hover CMakeLists.txt 10 15 --format markdown
//! cmake-doc literal '${CMAKE_CXX_FLAGS}'
//! ```

mod cache;
mod config;
mod context;
mod hover;
mod invoker;
mod notify;
mod render;
mod resolver;
mod types;

#[cfg(test)]
mod testing;

pub use cache::{ClassificationCache, ClassificationList};
pub use config::{CMakeConfig, Config, ConfigError, RenderConfig};
pub use context::detect_hover_target;
pub use hover::HoverProvider;
pub use invoker::{collect_lines, CMake, InvokeError, Invoker, OutputLines};
pub use notify::{LogNotifier, Notification, Notifier};
pub use render::{
    rst_to_markdown, HtmlRenderer, MarkdownRenderer, PlainRenderer, RenderFormat, Renderer,
};
pub use resolver::{bare_name, DocResolver};
pub use types::{Documentation, HelpTopic, HoverInfo, HoverTarget, Range, Symbol};
