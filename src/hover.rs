//! Core hover logic

use crate::context::detect_hover_target;
use crate::invoker::Invoker;
use crate::notify::{LogNotifier, Notifier};
use crate::render::{MarkdownRenderer, Renderer};
use crate::resolver::DocResolver;
use crate::types::{HoverInfo, Symbol};

/// Hover information provider
pub struct HoverProvider<I, N = LogNotifier> {
    resolver: DocResolver<I, N>,
    renderer: Box<dyn Renderer>,
}

impl<I: Invoker, N: Notifier> HoverProvider<I, N> {
    /// Create a provider rendering Markdown
    pub fn new(resolver: DocResolver<I, N>) -> Self {
        Self {
            resolver,
            renderer: Box::new(MarkdownRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Get hover information for a position in the source
    pub fn hover(&mut self, source: &str, line: u32, column: u32) -> Option<HoverInfo> {
        let target = detect_hover_target(source, line, column)?;
        tracing::debug!("Hover target: {:?}", target.symbol);

        self.generate_doc(&target.symbol)
            .map(|info| info.with_range(target.range))
    }

    /// Rendered documentation for a symbol
    pub fn generate_doc(&mut self, symbol: &Symbol) -> Option<HoverInfo> {
        let doc = self.resolver.resolve(symbol)?;
        let contents = self.renderer.render(&doc.text);
        Some(HoverInfo::new(doc, contents))
    }

    pub fn resolver(&self) -> &DocResolver<I, N> {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut DocResolver<I, N> {
        &mut self.resolver
    }
}
