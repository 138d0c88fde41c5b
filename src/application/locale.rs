//! Language preference resolution and single-key persistence.
//!
//! The header resolves its initial language from the stored preference,
//! falling back to the direction the server rendered the document with,
//! then to the configured default. Changing language normalizes the raw
//! control label and persists the canonical tag. Translation string tables
//! are not this crate's concern.

use tracing::debug;

use crate::config::LocaleSettings;
use crate::domain::types::{Language, TextDirection};
use crate::infra::storage::PreferenceStore;

pub struct LocaleService<P> {
    store: P,
    key: String,
    default_language: Language,
}

impl<P: PreferenceStore> LocaleService<P> {
    pub fn new(store: P, settings: &LocaleSettings) -> Self {
        Self {
            store,
            key: settings.storage_key.clone(),
            default_language: settings.default_language,
        }
    }

    /// Resolve the language to apply on page load. Only exact stored tags
    /// count; `document_dir` is the server-set direction hint, if any.
    pub fn initial_language(&self, document_dir: Option<&str>) -> Language {
        if let Some(saved) = self.store.get(&self.key) {
            if let Some(language) = Language::from_tag(&saved) {
                return language;
            }
            debug!(saved = %saved, "ignoring unrecognized stored language tag");
        }

        match document_dir {
            Some(dir) if dir == TextDirection::Rtl.as_str() => Language::Fa,
            Some(_) => Language::En,
            None => self.default_language,
        }
    }

    /// Normalize a raw control label, persist the canonical tag, and
    /// return the language now in effect.
    pub fn change_language(&mut self, raw: &str) -> Language {
        let language = Language::normalize(raw);
        self.store.set(&self.key, language.as_str());
        debug!(language = language.as_str(), "language preference stored");
        language
    }

    pub fn stored_tag(&self) -> Option<String> {
        self.store.get(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::MemoryStore;

    fn service(store: MemoryStore) -> LocaleService<MemoryStore> {
        LocaleService::new(store, &LocaleSettings::default())
    }

    #[test]
    fn stored_preference_wins() {
        let mut store = MemoryStore::new();
        store.set("siteLang", "fa");
        let locale = service(store);
        assert_eq!(locale.initial_language(Some("ltr")), Language::Fa);
    }

    #[test]
    fn document_direction_breaks_the_tie() {
        let locale = service(MemoryStore::new());
        assert_eq!(locale.initial_language(Some("rtl")), Language::Fa);
        assert_eq!(locale.initial_language(Some("ltr")), Language::En);
        assert_eq!(locale.initial_language(None), Language::En);
    }

    #[test]
    fn unrecognized_stored_tag_falls_through() {
        let mut store = MemoryStore::new();
        store.set("siteLang", "farsi");
        let locale = service(store);
        assert_eq!(locale.initial_language(Some("rtl")), Language::Fa);
    }

    #[test]
    fn change_language_persists_canonical_tag() {
        let mut locale = service(MemoryStore::new());
        assert_eq!(locale.change_language("Persian"), Language::Fa);
        assert_eq!(locale.stored_tag().as_deref(), Some("fa"));

        assert_eq!(locale.change_language("nonsense"), Language::En);
        assert_eq!(locale.stored_tag().as_deref(), Some("en"));
    }
}
