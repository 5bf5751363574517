//! The [`Locale`] façade: configuration, the domain registry and lookups.
//!
//! A locale owns one reader/writer lock around its [`DomainRegistry`].
//! Catalog files are resolved and parsed before the write lock is taken, so
//! slow I/O never blocks concurrent lookups; insertion then replaces the
//! whole domain entry at once.
//!
//! Lookups never fail. When the requested domain is not loaded (or no
//! default domain is set) the untranslated text is formatted instead, with
//! plural requests choosing between the singular and plural ids by the
//! Germanic rule.

mod export;
mod language;
mod registry;

use std::collections::HashMap;
use std::fmt::Display;

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::RwLock;
use unic_langid::LanguageIdentifier;

use crate::domain::Domain;
use crate::error::{CatalogError, CatalogResult};
use crate::format::{sprintf, untranslated_plural};
use crate::parser::{CatalogParser, parse_file};
use crate::resolver::FileResolver;

pub use export::LocaleCatalog;
pub use language::{parse_tag, simplify_language};
pub(crate) use registry::DomainRegistry;

/// Translation catalogs for a single language.
///
/// `Locale` is `Send + Sync`; share it across threads with
/// [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```rust,no_run
/// use locale_catalog::Locale;
///
/// let locale = Locale::new("/usr/share/locale", "de_DE.UTF-8");
/// locale.add_domain("app")?;
/// println!("{}", locale.get("Hello %s", &[&"Welt"]));
/// println!("{}", locale.get_plural("%d file", "%d files", 3, &[&3]));
/// # Ok::<(), locale_catalog::CatalogError>(())
/// ```
#[derive(Debug)]
pub struct Locale {
    resolver: FileResolver,
    registry: RwLock<DomainRegistry>,
}

/// Which domain a lookup consults.
#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Default,
    Named(&'a str),
}

impl Locale {
    /// Creates a locale rooted at `path` for `language`.
    ///
    /// The language is simplified (`en_US.UTF-8` → `en_US`) and parsed into a
    /// tag; an unparsable language yields the `und` tag.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, language: &str) -> Self {
        Self::from_registry(path.into(), language, DomainRegistry::default())
    }

    pub(crate) fn from_registry(
        path: Utf8PathBuf,
        language: &str,
        registry: DomainRegistry,
    ) -> Self {
        let simplified = simplify_language(language);
        let tag = parse_tag(simplified);
        Self {
            resolver: FileResolver::new(path, simplified, tag),
            registry: RwLock::new(registry),
        }
    }

    /// Base directory of the catalog tree.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.resolver.path()
    }

    /// Simplified language identifier.
    #[must_use]
    pub fn language(&self) -> &str {
        self.resolver.language()
    }

    /// Parsed language tag.
    #[must_use]
    pub const fn tag(&self) -> &LanguageIdentifier {
        self.resolver.tag()
    }

    /// Resolver used by [`Locale::add_domain`].
    #[must_use]
    pub const fn resolver(&self) -> &FileResolver {
        &self.resolver
    }

    /// Loads the catalog for domain `name` from the locale tree.
    ///
    /// Re-adding a domain replaces it. The first domain added becomes the
    /// default unless one is already set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no `.po` or `.mo` file exists
    /// for the domain, and any error raised by [`parse_file`].
    pub fn add_domain(&self, name: &str) -> CatalogResult<()> {
        let path = self
            .resolver
            .resolve(name)
            .ok_or_else(|| CatalogError::NotFound {
                domain: name.to_owned(),
                language: self.language().to_owned(),
            })?;
        let parser = parse_file(&path)?;
        self.insert(name, parser.into_domain());
        Ok(())
    }

    /// Registers a domain produced by an already-populated parser.
    pub fn add_parsed_domain(&self, name: &str, parser: Box<dyn CatalogParser>) {
        self.insert(name, parser.into_domain());
    }

    fn insert(&self, name: &str, domain: Domain) {
        let messages = domain.len();
        let replaced = self.registry.write().insert(name, domain);
        if replaced {
            tracing::info!(domain = name, messages, "replaced domain");
        } else {
            tracing::info!(domain = name, messages, "added domain");
        }
    }

    /// Name of the default domain, if any.
    #[must_use]
    pub fn default_domain(&self) -> Option<String> {
        self.registry.read().default_domain.clone()
    }

    /// Makes `name` the default domain. The domain need not be loaded yet.
    pub fn set_default_domain(&self, name: &str) {
        self.registry.write().default_domain = Some(name.to_owned());
    }

    /// Loaded domain names in lexicographic order.
    #[must_use]
    pub fn domain_names(&self) -> Vec<String> {
        self.registry.read().sorted_names()
    }

    /// Whether domain `name` is loaded.
    #[must_use]
    pub fn has_domain(&self, name: &str) -> bool {
        self.registry.read().domains.contains_key(name)
    }

    fn lookup<R>(
        &self,
        target: Target<'_>,
        found: impl FnOnce(&Domain) -> R,
        missing: impl FnOnce() -> R,
    ) -> R {
        let registry = self.registry.read();
        let domain = match target {
            Target::Default => registry.default_entry(),
            Target::Named(name) => registry.get(name),
        };
        domain.map_or_else(missing, found)
    }

    /// Translates `id` in the default domain.
    #[must_use]
    pub fn get(&self, id: &str, args: &[&dyn Display]) -> String {
        self.get_target(Target::Default, id, args)
    }

    /// Translates `id` in `domain`.
    #[must_use]
    pub fn get_in_domain(&self, domain: &str, id: &str, args: &[&dyn Display]) -> String {
        self.get_target(Target::Named(domain), id, args)
    }

    fn get_target(&self, target: Target<'_>, id: &str, args: &[&dyn Display]) -> String {
        self.lookup(
            target,
            |domain| domain.get(id, args),
            || sprintf(id, args),
        )
    }

    /// Translates the plural form of `id` selected by `n` in the default
    /// domain.
    #[must_use]
    pub fn get_plural(&self, id: &str, plural_id: &str, n: u64, args: &[&dyn Display]) -> String {
        self.get_plural_target(Target::Default, id, plural_id, n, args)
    }

    /// Translates the plural form of `id` selected by `n` in `domain`.
    #[must_use]
    pub fn get_plural_in_domain(
        &self,
        domain: &str,
        id: &str,
        plural_id: &str,
        n: u64,
        args: &[&dyn Display],
    ) -> String {
        self.get_plural_target(Target::Named(domain), id, plural_id, n, args)
    }

    fn get_plural_target(
        &self,
        target: Target<'_>,
        id: &str,
        plural_id: &str,
        n: u64,
        args: &[&dyn Display],
    ) -> String {
        self.lookup(
            target,
            |domain| domain.get_n(id, plural_id, n, args),
            || untranslated_plural(id, plural_id, n, args),
        )
    }

    /// Translates `id` within `context` in the default domain.
    #[must_use]
    pub fn get_context(&self, id: &str, context: &str, args: &[&dyn Display]) -> String {
        self.get_context_target(Target::Default, id, context, args)
    }

    /// Translates `id` within `context` in `domain`.
    #[must_use]
    pub fn get_context_in_domain(
        &self,
        domain: &str,
        id: &str,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.get_context_target(Target::Named(domain), id, context, args)
    }

    fn get_context_target(
        &self,
        target: Target<'_>,
        id: &str,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.lookup(
            target,
            |domain| domain.get_c(id, context, args),
            || sprintf(id, args),
        )
    }

    /// Translates the plural form of `id` within `context` in the default
    /// domain.
    #[must_use]
    pub fn get_plural_context(
        &self,
        id: &str,
        plural_id: &str,
        n: u64,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.get_plural_context_target(Target::Default, id, plural_id, n, context, args)
    }

    /// Translates the plural form of `id` within `context` in `domain`.
    #[must_use]
    pub fn get_plural_context_in_domain(
        &self,
        domain: &str,
        id: &str,
        plural_id: &str,
        n: u64,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.get_plural_context_target(Target::Named(domain), id, plural_id, n, context, args)
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the public lookup signature")]
    fn get_plural_context_target(
        &self,
        target: Target<'_>,
        id: &str,
        plural_id: &str,
        n: u64,
        context: &str,
        args: &[&dyn Display],
    ) -> String {
        self.lookup(
            target,
            |domain| domain.get_nc(id, plural_id, n, context, args),
            || untranslated_plural(id, plural_id, n, args),
        )
    }

    /// Flattens every loaded domain into one catalog for `tag`.
    ///
    /// Domains are merged in lexicographic name order; when two domains
    /// translate the same id, the later name wins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::TagMismatch`] when `tag` is not this locale's
    /// tag.
    pub fn export_catalog(&self, tag: &LanguageIdentifier) -> CatalogResult<LocaleCatalog> {
        if tag != self.tag() {
            return Err(CatalogError::TagMismatch {
                expected: self.tag().clone(),
                requested: tag.clone(),
            });
        }
        let registry = self.registry.read();
        let mut translations = HashMap::new();
        for name in registry.sorted_names() {
            if let Some(domain) = registry.get(&name) {
                translations.extend(domain.get_all());
            }
        }
        Ok(LocaleCatalog {
            tag: tag.clone(),
            path: self.path().to_path_buf(),
            translations,
        })
    }

    /// Runs `f` with shared access to the registry.
    pub(crate) fn with_registry<R>(&self, f: impl FnOnce(&DomainRegistry) -> R) -> R {
        f(&self.registry.read())
    }
}

#[cfg(test)]
mod tests;
