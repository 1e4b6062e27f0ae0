//! Classification lists used to decide which help query a literal gets.

use crate::types::HelpTopic;
use std::collections::BTreeSet;

/// Known names of one help topic.
///
/// Starts unpopulated. Once populated it is treated as complete until
/// [`invalidate`](Self::invalidate) is called; an empty populated list is a
/// valid terminal state.
#[derive(Debug, Default, Clone)]
pub struct ClassificationList {
    names: Option<BTreeSet<String>>,
}

impl ClassificationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.names.is_some()
    }

    /// Fill the list. Blank entries are skipped.
    pub fn populate<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.names = Some(
            names
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.as_ref().is_some_and(|names| names.contains(name))
    }

    pub fn len(&self) -> usize {
        self.names.as_ref().map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().flatten().map(String::as_str)
    }

    /// Return to the unpopulated state.
    pub fn invalidate(&mut self) {
        self.names = None;
    }
}

/// The module, property and variable lists owned by one resolver.
#[derive(Debug, Default, Clone)]
pub struct ClassificationCache {
    modules: ClassificationList,
    properties: ClassificationList,
    variables: ClassificationList,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// List for a literal tier. `None` for [`HelpTopic::Command`], which has no cached list.
    pub fn get(&self, topic: HelpTopic) -> Option<&ClassificationList> {
        match topic {
            HelpTopic::Module => Some(&self.modules),
            HelpTopic::Property => Some(&self.properties),
            HelpTopic::Variable => Some(&self.variables),
            HelpTopic::Command => None,
        }
    }

    pub fn get_mut(&mut self, topic: HelpTopic) -> Option<&mut ClassificationList> {
        match topic {
            HelpTopic::Module => Some(&mut self.modules),
            HelpTopic::Property => Some(&mut self.properties),
            HelpTopic::Variable => Some(&mut self.variables),
            HelpTopic::Command => None,
        }
    }

    pub fn invalidate(&mut self) {
        self.modules.invalidate();
        self.properties.invalidate();
        self.variables.invalidate();
    }
}
