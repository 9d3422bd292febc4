//! Application state and logic

use std::collections::HashMap;

use tracing::debug;
use wordsnap_core::{Collection, Modal, VocabularyStore, Word};

use crate::forms::FormState;

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Search input mode (after pressing /)
    Search,
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Sidebar,
    Words,
    Detail,
}

impl ActivePane {
    /// Move to the next pane (wrapping)
    pub fn next(self) -> Self {
        match self {
            ActivePane::Sidebar => ActivePane::Words,
            ActivePane::Words => ActivePane::Detail,
            ActivePane::Detail => ActivePane::Sidebar,
        }
    }

    /// Move to the previous pane (wrapping)
    pub fn prev(self) -> Self {
        match self {
            ActivePane::Sidebar => ActivePane::Detail,
            ActivePane::Words => ActivePane::Sidebar,
            ActivePane::Detail => ActivePane::Words,
        }
    }
}

/// Application state
///
/// Holds pane focus, list positions, and a snapshot of the store's
/// derived views. The snapshot is refreshed after every mutation so the
/// rendered lists always match a fresh recomputation.
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Which pane has focus
    pub active_pane: ActivePane,
    /// Collections, in sidebar order
    pub collections: Vec<Collection>,
    /// Currently selected sidebar index
    pub sidebar_index: usize,
    /// Id of the collection filtering the word list
    pub active_collection: String,
    /// Per-collection word counts
    pub counts: HashMap<String, usize>,
    /// Current filtered word list
    pub words: Vec<Word>,
    /// Currently selected word index
    pub word_index: usize,
    /// Search input buffer
    pub search_input: String,
    /// Cursor position in the search input
    pub search_cursor: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<std::time::Instant>,
    /// Scroll offset for detail pane
    pub detail_scroll: u16,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Active modal form, mirroring the store's modal descriptor
    pub form: Option<FormState>,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<std::time::Instant>,
}

impl App {
    /// Create a new app with data from the store
    pub fn new(store: &VocabularyStore) -> Self {
        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            active_pane: ActivePane::Words,
            collections: Vec::new(),
            sidebar_index: 0,
            active_collection: store.active_collection().to_string(),
            counts: HashMap::new(),
            words: Vec::new(),
            word_index: 0,
            search_input: String::new(),
            search_cursor: 0,
            status_message: None,
            status_message_time: None,
            detail_scroll: 0,
            show_help: false,
            form: None,
            pending_g: None,
        };
        app.refresh(store);
        app.sidebar_index = app
            .collections
            .iter()
            .position(|c| c.id == app.active_collection)
            .unwrap_or(0);
        app
    }

    /// Re-pull derived views from the store and clamp list positions
    pub fn refresh(&mut self, store: &VocabularyStore) {
        self.collections = store.collections().to_vec();
        self.counts = store.counts();
        self.active_collection = store.active_collection().to_string();
        self.words = store.filtered_words();

        if self.sidebar_index >= self.collections.len() {
            self.sidebar_index = self.collections.len().saturating_sub(1);
        }
        if self.words.is_empty() {
            self.word_index = 0;
        } else if let Some(pos) = store
            .selected_word()
            .and_then(|selected| self.words.iter().position(|w| w.id == selected.id))
        {
            // Keep the cursor on the selected word when it is still visible
            self.word_index = pos;
        } else {
            self.word_index = self.word_index.min(self.words.len() - 1);
        }
    }

    /// The word under the cursor in the words pane
    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.word_index)
    }

    /// The collection under the cursor in the sidebar
    pub fn current_collection(&self) -> Option<&Collection> {
        self.collections.get(self.sidebar_index)
    }

    /// Word count for a collection id (missing entries read as 0)
    pub fn count_for(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(std::time::Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > std::time::Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Keep the store's selected word in sync with the words-pane cursor
    fn sync_selection(&self, store: &mut VocabularyStore) {
        store.select_word(self.current_word().map(|w| w.id));
    }

    /// Move selection up in the current pane
    pub fn move_up(&mut self, store: &mut VocabularyStore) {
        match self.active_pane {
            ActivePane::Sidebar => {
                if self.sidebar_index > 0 {
                    self.sidebar_index -= 1;
                }
            }
            ActivePane::Words => {
                if self.word_index > 0 {
                    self.word_index -= 1;
                    self.detail_scroll = 0;
                    self.sync_selection(store);
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the current pane
    pub fn move_down(&mut self, store: &mut VocabularyStore) {
        match self.active_pane {
            ActivePane::Sidebar => {
                if self.sidebar_index < self.collections.len().saturating_sub(1) {
                    self.sidebar_index += 1;
                }
            }
            ActivePane::Words => {
                if self.word_index < self.words.len().saturating_sub(1) {
                    self.word_index += 1;
                    self.detail_scroll = 0;
                    self.sync_selection(store);
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    /// Move selection to the first item in the current pane (vim 'gg')
    pub fn move_to_first(&mut self, store: &mut VocabularyStore) {
        match self.active_pane {
            ActivePane::Sidebar => self.sidebar_index = 0,
            ActivePane::Words => {
                self.word_index = 0;
                self.detail_scroll = 0;
                self.sync_selection(store);
            }
            ActivePane::Detail => self.detail_scroll = 0,
        }
    }

    /// Move selection to the last item in the current pane (vim 'G')
    pub fn move_to_last(&mut self, store: &mut VocabularyStore) {
        match self.active_pane {
            ActivePane::Sidebar => {
                self.sidebar_index = self.collections.len().saturating_sub(1);
            }
            ActivePane::Words => {
                self.word_index = self.words.len().saturating_sub(1);
                self.detail_scroll = 0;
                self.sync_selection(store);
            }
            ActivePane::Detail => {
                // The UI clamps this to the real maximum
                self.detail_scroll = u16::MAX;
            }
        }
    }

    /// Move focus to the next pane
    pub fn next_pane(&mut self) {
        self.active_pane = self.active_pane.next();
    }

    /// Move focus to the previous pane
    pub fn prev_pane(&mut self) {
        self.active_pane = self.active_pane.prev();
    }

    /// Handle Enter in the current pane
    pub fn handle_enter(&mut self, store: &mut VocabularyStore) {
        match self.active_pane {
            ActivePane::Sidebar => {
                if let Some(collection) = self.current_collection() {
                    debug!(id = %collection.id, "activating collection");
                    store.set_active_collection(collection.id.clone());
                    self.refresh(store);
                    self.sync_selection(store);
                    // Auto-switch to the words pane after picking a collection
                    self.active_pane = ActivePane::Words;
                }
            }
            ActivePane::Words => {
                self.sync_selection(store);
                self.active_pane = ActivePane::Detail;
            }
            ActivePane::Detail => {}
        }
    }

    // ==================== Search ====================

    /// Enter search mode
    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input = String::new();
        self.search_cursor = 0;
    }

    /// Leave search mode, keeping the current search text
    pub fn confirm_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and clear the search text
    pub fn cancel_search(&mut self, store: &mut VocabularyStore) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
        self.search_cursor = 0;
        store.set_search(String::new());
        self.refresh(store);
    }

    /// Insert a character into the search input (updates results live)
    pub fn search_insert_char(&mut self, c: char, store: &mut VocabularyStore) {
        self.search_input.insert(self.search_cursor, c);
        self.search_cursor += c.len_utf8();
        store.set_search(self.search_input.clone());
        self.refresh(store);
    }

    /// Delete the character before the search cursor
    pub fn search_delete_char(&mut self, store: &mut VocabularyStore) {
        if self.search_cursor > 0 {
            let prev = self.search_input[..self.search_cursor]
                .chars()
                .next_back()
                .map(char::len_utf8)
                .unwrap_or(0);
            self.search_cursor -= prev;
            self.search_input.remove(self.search_cursor);
            store.set_search(self.search_input.clone());
            self.refresh(store);
        }
    }

    // ==================== Word Mutations ====================

    /// Open the add-word modal
    pub fn open_add_word(&mut self, store: &mut VocabularyStore) {
        store.set_modal(Some(Modal::AddWord));
        self.form = Some(FormState::add_word());
    }

    /// Open the edit-word modal for the word under the cursor
    pub fn open_edit_word(&mut self, store: &mut VocabularyStore) {
        if let Some(word) = self.current_word() {
            store.set_modal(Some(Modal::EditWord(word.id)));
            self.form = Some(FormState::edit_word(word));
        } else {
            self.set_status("No word selected");
        }
    }

    /// Delete the word under the cursor
    pub fn delete_current_word(&mut self, store: &mut VocabularyStore) {
        if let Some(word) = self.current_word().cloned() {
            store.remove_word(word.id);
            self.set_status(format!("Deleted '{}'", word.term));
            self.refresh(store);
        }
    }

    /// Flip the favorite flag on the word under the cursor
    pub fn toggle_favorite_current(&mut self, store: &mut VocabularyStore) {
        if let Some(id) = self.current_word().map(|w| w.id) {
            store.toggle_favorite(id);
            self.refresh(store);
        }
    }

    // ==================== Collection Mutations ====================

    /// Open the add-collection modal
    pub fn open_add_collection(&mut self, store: &mut VocabularyStore) {
        store.set_modal(Some(Modal::AddCollection));
        self.form = Some(FormState::add_collection());
    }

    /// Open the edit-collection modal for the sidebar selection
    pub fn open_edit_collection(&mut self, store: &mut VocabularyStore) {
        let Some(collection) = self.current_collection().cloned() else {
            return;
        };
        if Collection::is_reserved(&collection.id) {
            self.set_status(format!("'{}' is built in and cannot be edited", collection.name));
            return;
        }
        store.set_modal(Some(Modal::EditCollection(collection.id.clone())));
        self.form = Some(FormState::edit_collection(&collection));
    }

    /// Delete the collection under the sidebar cursor
    pub fn delete_current_collection(&mut self, store: &mut VocabularyStore) {
        let Some(collection) = self.current_collection().cloned() else {
            return;
        };
        if Collection::is_reserved(&collection.id) {
            self.set_status(format!(
                "'{}' is built in and cannot be deleted",
                collection.name
            ));
            return;
        }
        store.remove_collection(&collection.id);
        self.set_status(format!("Deleted collection '{}'", collection.name));
        self.refresh(store);
    }

    // ==================== Modal Forms ====================

    /// Submit the open form
    ///
    /// Validation failures stay in the form and show up in the status
    /// line; a valid submit drives the store mutation and closes the
    /// modal.
    pub fn submit_form(&mut self, store: &mut VocabularyStore) {
        let Some(form) = self.form.take() else {
            return;
        };
        if let Err(err) = form.validate() {
            self.set_status(err.to_string());
            self.form = Some(form);
            return;
        }

        match &form.modal {
            Modal::AddWord => {
                let draft = form.word_draft();
                let term = draft.term.trim().to_string();
                store.add_word(draft);
                self.set_status(format!("Added '{}'", term));
            }
            Modal::EditWord(id) => {
                store.update_word(*id, form.word_patch());
                self.set_status("Word updated");
            }
            Modal::AddCollection => match store.add_collection(form.collection_draft()) {
                Some(id) => self.set_status(format!("Added collection '{}'", id)),
                None => self.set_status("Collection already exists"),
            },
            Modal::EditCollection(id) => {
                store.update_collection(id, form.collection_patch());
                self.set_status("Collection updated");
            }
        }
        store.set_modal(None);
        self.refresh(store);
    }

    /// Dismiss the open form without applying it
    pub fn dismiss_form(&mut self, store: &mut VocabularyStore) {
        self.form = None;
        store.set_modal(None);
    }
}
