//! Data models for WordSnap
//!
//! Defines the core data structures: Word, Collection, typed patches,
//! and the modal descriptor used by the UI state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved collection id representing every word.
pub const ALL_ID: &str = "all";

/// Reserved collection id representing every favorited word.
pub const FAV_ID: &str = "fav";

/// Glyph used when a collection is created without one.
pub const DEFAULT_EMOJI: &str = "📁";

/// A vocabulary entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Word {
    /// Unique identifier
    pub id: Uuid,
    /// The word or phrase itself
    pub term: String,
    /// What it means
    pub definition: String,
    /// Free-form notes (may be empty)
    pub notes: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Ids of the collections this word belongs to (never empty)
    pub collections: Vec<String>,
    /// Whether this word is favorited
    pub favorite: bool,
    /// When this word was added (immutable after creation)
    pub added_at: DateTime<Utc>,
}

impl Word {
    /// Create a new word with the given term and definition
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            definition: definition.into(),
            notes: String::new(),
            tags: Vec::new(),
            collections: vec![ALL_ID.to_string()],
            favorite: false,
            added_at: Utc::now(),
        }
    }

    /// Set the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Set all tags (replacing existing)
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Set the collection memberships, falling back to `all` when empty
    pub fn set_collections(&mut self, collections: Vec<String>) {
        self.collections = if collections.is_empty() {
            vec![ALL_ID.to_string()]
        } else {
            collections
        };
    }

    /// Check whether any searchable field contains `needle`
    ///
    /// Matching is case-insensitive substring over term, definition, and tags.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.term.to_lowercase().contains(needle)
            || self.definition.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Input for creating a word
///
/// Raw strings are trimmed by the store; empty tags are dropped and an
/// empty collections list defaults to `["all"]`. Validating that `term`
/// and `definition` are non-empty is the caller's job (the form layer).
#[derive(Debug, Clone, Default)]
pub struct WordDraft {
    pub term: String,
    pub definition: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub collections: Vec<String>,
    pub favorite: bool,
}

/// Typed partial update for a word
///
/// `None` fields are left untouched. `added_at` and `id` are not
/// patchable.
#[derive(Debug, Clone, Default)]
pub struct WordPatch {
    pub term: Option<String>,
    pub definition: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub collections: Option<Vec<String>>,
    pub favorite: Option<bool>,
}

impl WordPatch {
    /// Merge this patch into a word
    pub fn apply(self, word: &mut Word) {
        if let Some(term) = self.term {
            word.term = term;
        }
        if let Some(definition) = self.definition {
            word.definition = definition;
        }
        if let Some(notes) = self.notes {
            word.notes = notes;
        }
        if let Some(tags) = self.tags {
            word.tags = tags;
        }
        if let Some(collections) = self.collections {
            word.set_collections(collections);
        }
        if let Some(favorite) = self.favorite {
            word.favorite = favorite;
        }
    }
}

/// A named grouping of words
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    /// Stable slug identifier; `all` and `fav` are reserved
    pub id: String,
    /// Display name
    pub name: String,
    /// Display glyph
    pub emoji: String,
}

impl Collection {
    /// Create a collection with an explicit id
    pub fn new(id: impl Into<String>, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
        }
    }

    /// Whether `id` names one of the built-in virtual collections
    ///
    /// Reserved collections can never be deleted and exist for the
    /// store's whole lifetime.
    pub fn is_reserved(id: &str) -> bool {
        id == ALL_ID || id == FAV_ID
    }

    /// Derive a collection id from a display name
    ///
    /// Lowercases, collapses whitespace runs to single hyphens, and strips
    /// everything outside `[a-z0-9-]`. May return an empty string when the
    /// name has no usable characters.
    pub fn id_from_name(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect()
    }
}

/// Input for creating a collection
#[derive(Debug, Clone, Default)]
pub struct CollectionDraft {
    /// Display name (required; an empty name rejects the whole operation)
    pub name: String,
    /// Display glyph; `None` falls back to [`DEFAULT_EMOJI`]
    pub emoji: Option<String>,
    /// Explicit id; `None` derives one from the name
    pub id: Option<String>,
}

/// Typed partial update for a collection
///
/// The id is immutable and deliberately absent here.
#[derive(Debug, Clone, Default)]
pub struct CollectionPatch {
    pub name: Option<String>,
    pub emoji: Option<String>,
}

impl CollectionPatch {
    /// Merge this patch into a collection
    pub fn apply(self, collection: &mut Collection) {
        if let Some(name) = self.name {
            collection.name = name;
        }
        if let Some(emoji) = self.emoji {
            collection.emoji = emoji;
        }
    }
}

/// Descriptor for the currently open modal form
///
/// Edit variants carry the id of the record being edited; the record is
/// resolved against the store when the form is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    AddWord,
    EditWord(Uuid),
    AddCollection,
    EditCollection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_new() {
        let word = Word::new("Ephemeral", "Lasting for a very short time.");
        assert_eq!(word.term, "Ephemeral");
        assert_eq!(word.definition, "Lasting for a very short time.");
        assert!(word.notes.is_empty());
        assert!(word.tags.is_empty());
        assert_eq!(word.collections, vec![ALL_ID.to_string()]);
        assert!(!word.favorite);
    }

    #[test]
    fn test_word_set_collections_empty_defaults_to_all() {
        let mut word = Word::new("Term", "Definition");
        word.set_collections(vec!["tech".to_string()]);
        assert_eq!(word.collections, vec!["tech"]);

        word.set_collections(Vec::new());
        assert_eq!(word.collections, vec![ALL_ID.to_string()]);
    }

    #[test]
    fn test_word_matches() {
        let mut word = Word::new("Idempotent", "No additional effect when repeated.");
        word.set_tags(vec!["math".to_string(), "programming".to_string()]);

        assert!(word.matches("idem"));
        assert!(word.matches("effect"));
        assert!(word.matches("program"));
        assert!(!word.matches("biology"));
    }

    #[test]
    fn test_word_patch_apply() {
        let mut word = Word::new("Term", "Definition");
        let patch = WordPatch {
            definition: Some("Better definition".to_string()),
            favorite: Some(true),
            ..Default::default()
        };
        patch.apply(&mut word);

        assert_eq!(word.term, "Term");
        assert_eq!(word.definition, "Better definition");
        assert!(word.favorite);
    }

    #[test]
    fn test_word_patch_preserves_added_at() {
        let mut word = Word::new("Term", "Definition");
        let added_at = word.added_at;
        WordPatch {
            term: Some("Renamed".to_string()),
            ..Default::default()
        }
        .apply(&mut word);
        assert_eq!(word.added_at, added_at);
    }

    #[test]
    fn test_collection_is_reserved() {
        assert!(Collection::is_reserved("all"));
        assert!(Collection::is_reserved("fav"));
        assert!(!Collection::is_reserved("tech"));
        assert!(!Collection::is_reserved(""));
    }

    #[test]
    fn test_id_from_name() {
        assert_eq!(Collection::id_from_name("My Set!"), "my-set");
        assert_eq!(Collection::id_from_name("Tech Terms"), "tech-terms");
        assert_eq!(Collection::id_from_name("  GRE   Prep  "), "gre-prep");
        // a token stripped to nothing leaves its hyphens behind
        assert_eq!(Collection::id_from_name("C++ & Rust"), "c--rust");
        assert_eq!(Collection::id_from_name("2024 Goals"), "2024-goals");
    }

    #[test]
    fn test_id_from_name_can_be_empty() {
        assert_eq!(Collection::id_from_name(""), "");
        assert_eq!(Collection::id_from_name("!!!"), "");
        assert_eq!(Collection::id_from_name("   "), "");
    }

    #[test]
    fn test_collection_patch_apply() {
        let mut collection = Collection::new("tech", "Tech Terms", "💻");
        CollectionPatch {
            name: Some("Technology".to_string()),
            ..Default::default()
        }
        .apply(&mut collection);

        assert_eq!(collection.id, "tech");
        assert_eq!(collection.name, "Technology");
        assert_eq!(collection.emoji, "💻");
    }

    #[test]
    fn test_word_serialization() {
        let mut word = Word::new("Ubiquitous", "Found everywhere.");
        word.set_tags(vec!["general".to_string()]);
        let json = serde_json::to_string(&word).unwrap();
        let deserialized: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(word, deserialized);
    }

    #[test]
    fn test_collection_serialization() {
        let collection = Collection::new("literature", "Literature", "🖋️");
        let json = serde_json::to_string(&collection).unwrap();
        let deserialized: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(collection, deserialized);
    }
}
