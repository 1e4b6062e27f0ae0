//! Resolving symbols to cmake documentation.

use crate::cache::{ClassificationCache, ClassificationList};
use crate::invoker::{collect_lines, Invoker};
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::types::{Documentation, HelpTopic, Symbol};

/// Strip a surrounding `${` ... `}` from a literal, if both are present.
pub fn bare_name(literal: &str) -> &str {
    literal
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(literal)
}

/// Looks up documentation for symbols by asking cmake.
///
/// Literals are classified against the module, property and variable lists
/// (in that order). Each list is fetched from cmake the first time it is
/// needed and kept until [`invalidate`](Self::invalidate) is called.
///
/// Every failed cmake invocation is logged and reported once through the
/// [`Notifier`]; the lookup then yields `None`.
pub struct DocResolver<I, N = LogNotifier> {
    invoker: I,
    notifier: N,
    cache: ClassificationCache,
}

impl<I: Invoker> DocResolver<I> {
    pub fn new(invoker: I) -> Self {
        Self::with_notifier(invoker, LogNotifier)
    }
}

impl<I: Invoker, N: Notifier> DocResolver<I, N> {
    pub fn with_notifier(invoker: I, notifier: N) -> Self {
        Self {
            invoker,
            notifier,
            cache: ClassificationCache::new(),
        }
    }

    /// Documentation for a symbol, or `None` if there is none.
    pub fn resolve(&mut self, symbol: &Symbol) -> Option<Documentation> {
        match symbol {
            Symbol::Command(name) => self.doc_for_command(name),
            Symbol::Literal(text) => self.doc_for_literal(text),
            Symbol::Other => None,
        }
    }

    /// `cmake --help-command <name>`.
    pub fn doc_for_command(&mut self, name: &str) -> Option<Documentation> {
        self.help(HelpTopic::Command, name)
    }

    /// Documentation for a module, property or variable name, optionally `${}`-wrapped.
    pub fn doc_for_literal(&mut self, literal: &str) -> Option<Documentation> {
        let name = bare_name(literal);
        let topic = self.classify(name)?;
        self.help(topic, name)
    }

    /// The tier a bare name belongs to, fetching lists as needed.
    ///
    /// Stops at the first list containing the name, so later lists stay
    /// unfetched.
    pub fn classify(&mut self, name: &str) -> Option<HelpTopic> {
        HelpTopic::LITERAL_TIERS
            .into_iter()
            .find(|&topic| self.list(topic).is_some_and(|list| list.contains(name)))
    }

    /// The list for a literal tier, fetching it if not yet populated.
    ///
    /// `None` for [`HelpTopic::Command`] or when fetching failed.
    pub fn list(&mut self, topic: HelpTopic) -> Option<&ClassificationList> {
        let populated = self.cache.get(topic)?.is_populated();
        if !populated {
            let names = self.run(&[topic.list_flag()])?;
            tracing::debug!("Cached {} {} names", names.len(), topic);
            self.cache.get_mut(topic)?.populate(names);
        }
        self.cache.get(topic)
    }

    /// Forget every cached list.
    pub fn invalidate(&mut self) {
        tracing::debug!("Invalidating classification lists");
        self.cache.invalidate();
    }

    /// Forget one cached list.
    pub fn invalidate_topic(&mut self, topic: HelpTopic) {
        if let Some(list) = self.cache.get_mut(topic) {
            list.invalidate();
        }
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    fn help(&self, topic: HelpTopic, name: &str) -> Option<Documentation> {
        let lines = self.run(&[topic.help_flag(), name])?;
        let text = lines.join("\n");
        if text.trim().is_empty() {
            return None;
        }
        Some(Documentation {
            topic,
            name: name.to_string(),
            text,
        })
    }

    fn run(&self, args: &[&str]) -> Option<Vec<String>> {
        let result = self
            .invoker
            .invoke(args)
            .and_then(collect_lines);

        match result {
            Ok(lines) => Some(lines),
            Err(e) => {
                tracing::warn!("CMake {} failed: {}", args.join(" "), e);
                self.notifier.notify(&Notification::CMAKE_FAILED);
                None
            }
        }
    }
}
