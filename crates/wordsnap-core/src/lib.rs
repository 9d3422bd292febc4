//! WordSnap Core Library
//!
//! This crate provides the core functionality for WordSnap, a single-user
//! vocabulary manager: words organized into named collections, with
//! search, favorites, and derived per-collection counts.
//!
//! # Architecture
//!
//! All state lives in memory inside a single [`VocabularyStore`] instance
//! that is constructed explicitly and passed to every consumer. There is
//! no persistence of words or collections; state is volatile and lost at
//! process end by design.
//!
//! # Quick Start
//!
//! ```
//! use wordsnap_core::{VocabularyStore, WordDraft};
//!
//! let mut store = VocabularyStore::with_demo_data();
//!
//! store.add_word(WordDraft {
//!     term: "Ephemeral".to_string(),
//!     definition: "Lasting for a very short time.".to_string(),
//!     ..Default::default()
//! });
//!
//! store.set_search("ephem".to_string());
//! assert_eq!(store.filtered_words().len(), 1);
//! ```
//!
//! # Modules
//!
//! - `store`: The vocabulary store (main entry point)
//! - `models`: Data structures for words, collections, patches, and modals
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod store;

pub use config::Config;
pub use models::{
    Collection, CollectionDraft, CollectionPatch, Modal, Word, WordDraft, WordPatch, ALL_ID,
    DEFAULT_EMOJI, FAV_ID,
};
pub use store::VocabularyStore;
