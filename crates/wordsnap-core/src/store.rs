//! In-memory vocabulary store
//!
//! The `VocabularyStore` owns all words and collections plus the UI
//! selection state (active collection, search text, selected word, open
//! modal). It is the sole writer of its own state; views read accessors
//! and call the mutation operations.
//!
//! Derived views (`counts`, `filtered_words`) are recomputed from the base
//! data on every read, so they can never go stale relative to the latest
//! mutation.
//!
//! Mutations never error: invalid input (missing ids, duplicate or
//! reserved collection ids, empty names) leaves the state unchanged.
//! Callers are expected to pre-validate required fields before invoking
//! an operation.
//!
//! ## Usage
//!
//! ```
//! use wordsnap_core::{VocabularyStore, WordDraft};
//!
//! let mut store = VocabularyStore::new();
//!
//! let id = store.add_word(WordDraft {
//!     term: "Ephemeral".to_string(),
//!     definition: "Lasting for a very short time.".to_string(),
//!     ..Default::default()
//! });
//!
//! assert_eq!(store.selected_word().map(|w| w.id), Some(id));
//! assert_eq!(store.counts().get("all"), Some(&1));
//! ```

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Collection, CollectionDraft, CollectionPatch, Modal, Word, WordDraft, WordPatch, ALL_ID,
    DEFAULT_EMOJI, FAV_ID,
};

/// In-memory store for collections, words, and UI selection state
pub struct VocabularyStore {
    /// All words, in insertion order
    words: Vec<Word>,
    /// All collections, in insertion order; `all` and `fav` come first
    collections: Vec<Collection>,
    /// Id of the collection currently filtering the word list
    active_collection: String,
    /// Current search text
    search: String,
    /// Id of the currently selected word, if any
    selected: Option<Uuid>,
    /// Currently open modal form, if any
    modal: Option<Modal>,
}

impl VocabularyStore {
    /// Create an empty store with only the reserved collections
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            collections: vec![
                Collection::new(ALL_ID, "All Words", "📚"),
                Collection::new(FAV_ID, "Favorites", "⭐"),
            ],
            active_collection: ALL_ID.to_string(),
            search: String::new(),
            selected: None,
            modal: None,
        }
    }

    /// Create a store seeded with the demo collections and words
    pub fn with_demo_data() -> Self {
        let mut store = Self::new();
        store
            .collections
            .push(Collection::new("tech", "Tech Terms", "💻"));
        store
            .collections
            .push(Collection::new("literature", "Literature", "🖋️"));

        let now = Utc::now();
        let seed = [
            (
                "Eloquent",
                "Fluent or persuasive in speaking or writing.",
                "Often used to describe speech.",
                vec!["communication"],
                vec!["literature"],
                true,
                1,
            ),
            (
                "Idempotent",
                "Operation that has no additional effect if applied more than once.",
                "Common in APIs and functional programming.",
                vec!["math", "programming"],
                vec!["tech"],
                false,
                2,
            ),
            (
                "Ubiquitous",
                "Present, appearing, or found everywhere.",
                "",
                vec!["general"],
                vec![ALL_ID],
                false,
                3,
            ),
            (
                "Paradigm",
                "A typical example or pattern of something; a model.",
                "Paradigm shift.",
                vec!["general"],
                vec!["literature", "tech"],
                true,
                5,
            ),
        ];

        for (term, definition, notes, tags, collections, favorite, days_ago) in seed {
            let mut word = Word::new(term, definition);
            word.set_notes(notes);
            word.set_tags(tags.into_iter().map(String::from).collect());
            word.set_collections(collections.into_iter().map(String::from).collect());
            word.favorite = favorite;
            word.added_at = now - Duration::days(days_ago);
            store.words.push(word);
        }

        store
    }

    // ==================== Read Accessors ====================

    /// All words, in insertion order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// All collections, in insertion order
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Find a word by id
    pub fn word(&self, id: Uuid) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Find a collection by id
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Id of the collection currently filtering the word list
    pub fn active_collection(&self) -> &str {
        &self.active_collection
    }

    /// Current search text
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The currently selected word, resolved against `words`
    pub fn selected_word(&self) -> Option<&Word> {
        self.selected.and_then(|id| self.word(id))
    }

    /// Currently open modal form, if any
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Per-collection word counts, recomputed from `words`
    ///
    /// Every word counts toward `all`; favorited words also count toward
    /// `fav`; each id in a word's membership list counts once. The
    /// reserved ids are skipped in the membership pass so a word listing
    /// `all` explicitly is not counted twice. Collections with no
    /// matching words have no entry, so treat a missing key as 0.
    pub fn counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in &self.words {
            *counts.entry(ALL_ID.to_string()).or_default() += 1;
            if word.favorite {
                *counts.entry(FAV_ID.to_string()).or_default() += 1;
            }
            for id in &word.collections {
                if Collection::is_reserved(id) {
                    continue;
                }
                *counts.entry(id.clone()).or_default() += 1;
            }
        }
        counts
    }

    /// Words visible under the active collection and search text
    ///
    /// `fav` keeps only favorites, `all` keeps everything, any other id
    /// keeps members of that collection. A search text that is non-empty
    /// after trimming then matches case-insensitively against term,
    /// definition, and tags; the match itself uses the untrimmed text.
    /// The result is sorted by term, case-insensitively, ascending.
    pub fn filtered_words(&self) -> Vec<Word> {
        let mut list: Vec<Word> = match self.active_collection.as_str() {
            FAV_ID => self.words.iter().filter(|w| w.favorite).cloned().collect(),
            ALL_ID => self.words.clone(),
            id => self
                .words
                .iter()
                .filter(|w| w.collections.iter().any(|c| c == id))
                .cloned()
                .collect(),
        };

        if !self.search.trim().is_empty() {
            let query = self.search.to_lowercase();
            list.retain(|w| w.matches(&query));
        }

        list.sort_by(|a, b| {
            a.term
                .to_lowercase()
                .cmp(&b.term.to_lowercase())
                .then_with(|| a.term.cmp(&b.term))
        });
        list
    }

    // ==================== Word Operations ====================

    /// Add a new word and select it
    ///
    /// Text fields are trimmed and empty tags dropped; an empty collections
    /// list defaults to `["all"]`. Returns the generated id.
    pub fn add_word(&mut self, draft: WordDraft) -> Uuid {
        let mut word = Word::new(draft.term.trim(), draft.definition.trim());
        word.set_notes(draft.notes.trim());
        word.set_tags(
            draft
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        );
        word.set_collections(draft.collections);
        word.favorite = draft.favorite;

        let id = word.id;
        debug!(term = %word.term, %id, "adding word");
        self.words.push(word);
        self.selected = Some(id);
        id
    }

    /// Merge a patch into the word with the given id; no-op if absent
    pub fn update_word(&mut self, id: Uuid, patch: WordPatch) {
        if let Some(word) = self.words.iter_mut().find(|w| w.id == id) {
            patch.apply(word);
            debug!(%id, "updated word");
        }
    }

    /// Remove the word with the given id; no-op if absent
    ///
    /// Clears the selection when the removed word was selected.
    pub fn remove_word(&mut self, id: Uuid) {
        self.words.retain(|w| w.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Flip the favorite flag of the word with the given id; no-op if absent
    pub fn toggle_favorite(&mut self, id: Uuid) {
        if let Some(word) = self.words.iter_mut().find(|w| w.id == id) {
            word.favorite = !word.favorite;
        }
    }

    // ==================== Collection Operations ====================

    /// Add a new collection
    ///
    /// The id is the explicit one from the draft, or derived from the name
    /// via [`Collection::id_from_name`]. Rejected (returning `None`, state
    /// unchanged) when the name is empty, the id normalizes to nothing, or
    /// a collection with that id already exists. Returns the new id on
    /// success.
    pub fn add_collection(&mut self, draft: CollectionDraft) -> Option<String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return None;
        }

        let id = match draft.id.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => Collection::id_from_name(name),
        };
        if id.is_empty() {
            return None;
        }
        if self.collections.iter().any(|c| c.id == id) {
            debug!(%id, "collection id already exists, rejecting");
            return None;
        }

        let emoji = draft
            .emoji
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMOJI.to_string());
        debug!(%id, %name, "adding collection");
        self.collections.push(Collection::new(&id, name, emoji));
        Some(id)
    }

    /// Merge a patch into the collection with the given id; no-op if absent
    ///
    /// The id itself is immutable.
    pub fn update_collection(&mut self, id: &str, patch: CollectionPatch) {
        if let Some(collection) = self.collections.iter_mut().find(|c| c.id == id) {
            patch.apply(collection);
            debug!(%id, "updated collection");
        }
    }

    /// Remove a collection and cascade the membership lists
    ///
    /// The reserved `all` and `fav` collections are never removed. The id
    /// is stripped from every word's membership list; a list emptied by the
    /// cascade heals back to `["all"]`. When the removed collection was
    /// active, the filter resets to `all`.
    pub fn remove_collection(&mut self, id: &str) {
        if Collection::is_reserved(id) {
            return;
        }

        self.collections.retain(|c| c.id != id);
        for word in &mut self.words {
            word.collections.retain(|c| c != id);
            if word.collections.is_empty() {
                word.collections.push(ALL_ID.to_string());
            }
        }
        if self.active_collection == id {
            self.active_collection = ALL_ID.to_string();
        }
        debug!(%id, "removed collection");
    }

    // ==================== Selection / UI State ====================

    /// Set the active collection filter
    pub fn set_active_collection(&mut self, id: impl Into<String>) {
        self.active_collection = id.into();
    }

    /// Set the search text
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Set or clear the selected word id
    pub fn select_word(&mut self, id: Option<Uuid>) {
        self.selected = id;
    }

    /// Open or close the modal form
    pub fn set_modal(&mut self, modal: Option<Modal>) {
        self.modal = modal;
    }
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self::new()
    }
}
