//! Domain table guarded by the locale's lock.

use std::collections::HashMap;

use crate::domain::Domain;

/// Loaded domains and the name of the default one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DomainRegistry {
    pub(crate) domains: HashMap<String, Domain>,
    pub(crate) default_domain: Option<String>,
}

impl DomainRegistry {
    /// Inserts `domain`, replacing any previous entry, and adopts `name` as
    /// the default when none is set. Returns whether an entry was replaced.
    pub(crate) fn insert(&mut self, name: &str, domain: Domain) -> bool {
        let replaced = self.domains.insert(name.to_owned(), domain).is_some();
        if self.default_domain.is_none() {
            self.default_domain = Some(name.to_owned());
        }
        replaced
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    pub(crate) fn default_entry(&self) -> Option<&Domain> {
        self.default_domain.as_deref().and_then(|name| self.get(name))
    }

    pub(crate) fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.domains.keys().cloned().collect();
        names.sort();
        names
    }
}
