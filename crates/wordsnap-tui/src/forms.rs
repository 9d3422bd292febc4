//! Modal form state
//!
//! Each of the four modals (add/edit word, add/edit collection) is an
//! in-TUI form: a stack of text fields with a focused index and per-field
//! cursor, plus a favorite toggle on word forms. The form validates the
//! required fields before anything reaches the store; the store itself
//! stays fail-quiet.

use thiserror::Error;
use wordsnap_core::{Collection, CollectionDraft, CollectionPatch, Modal, Word, WordDraft, WordPatch};

/// Validation errors surfaced in the status line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Term is required")]
    MissingTerm,
    #[error("Definition is required")]
    MissingDefinition,
    #[error("Name is required")]
    MissingName,
}

/// A single text field in a form
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            label,
            value,
            cursor,
        }
    }
}

// Field order in word forms
const TERM: usize = 0;
const DEFINITION: usize = 1;
const NOTES: usize = 2;
const TAGS: usize = 3;
const COLLECTIONS: usize = 4;

// Field order in collection forms
const NAME: usize = 0;
const EMOJI: usize = 1;

/// State of the currently open modal form
#[derive(Debug, Clone)]
pub struct FormState {
    /// The modal descriptor this form was opened for
    pub modal: Modal,
    pub fields: Vec<Field>,
    /// Focused slot; `fields.len()` means the favorite toggle
    pub focus: usize,
    /// Favorite toggle, present on word forms only
    pub favorite: Option<bool>,
}

impl FormState {
    /// Build an empty add-word form
    pub fn add_word() -> Self {
        Self::word_form(Modal::AddWord, None)
    }

    /// Build an edit form pre-filled from an existing word
    pub fn edit_word(word: &Word) -> Self {
        Self::word_form(Modal::EditWord(word.id), Some(word))
    }

    /// Build an empty add-collection form
    pub fn add_collection() -> Self {
        Self::collection_form(Modal::AddCollection, None)
    }

    /// Build an edit form pre-filled from an existing collection
    pub fn edit_collection(collection: &Collection) -> Self {
        Self::collection_form(
            Modal::EditCollection(collection.id.clone()),
            Some(collection),
        )
    }

    fn word_form(modal: Modal, word: Option<&Word>) -> Self {
        let fields = vec![
            Field::new("Term", word.map(|w| w.term.as_str()).unwrap_or("")),
            Field::new(
                "Definition",
                word.map(|w| w.definition.as_str()).unwrap_or(""),
            ),
            Field::new("Notes", word.map(|w| w.notes.as_str()).unwrap_or("")),
            Field::new("Tags", word.map(|w| w.tags.join(", ")).unwrap_or_default()),
            Field::new(
                "Collections",
                word.map(|w| w.collections.join(", ")).unwrap_or_default(),
            ),
        ];
        Self {
            modal,
            fields,
            focus: 0,
            favorite: Some(word.map(|w| w.favorite).unwrap_or(false)),
        }
    }

    fn collection_form(modal: Modal, collection: Option<&Collection>) -> Self {
        let fields = vec![
            Field::new("Name", collection.map(|c| c.name.as_str()).unwrap_or("")),
            Field::new("Emoji", collection.map(|c| c.emoji.as_str()).unwrap_or("")),
        ];
        Self {
            modal,
            fields,
            focus: 0,
            favorite: None,
        }
    }

    /// Form title for the overlay
    pub fn title(&self) -> &'static str {
        match self.modal {
            Modal::AddWord => " Add Word ",
            Modal::EditWord(_) => " Edit Word ",
            Modal::AddCollection => " Add Collection ",
            Modal::EditCollection(_) => " Edit Collection ",
        }
    }

    /// Number of focusable slots (fields plus the favorite toggle)
    fn slot_count(&self) -> usize {
        self.fields.len() + usize::from(self.favorite.is_some())
    }

    /// Whether the favorite toggle has focus
    pub fn favorite_focused(&self) -> bool {
        self.favorite.is_some() && self.focus == self.fields.len()
    }

    /// Move focus to the next slot (wrapping)
    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.slot_count();
    }

    /// Move focus to the previous slot (wrapping)
    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.slot_count() - 1) % self.slot_count();
    }

    /// Flip the favorite toggle (word forms only)
    pub fn toggle_favorite(&mut self) {
        if let Some(favorite) = self.favorite.as_mut() {
            *favorite = !*favorite;
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut Field> {
        let focus = self.focus;
        self.fields.get_mut(focus)
    }

    /// Insert a character at the focused field's cursor
    ///
    /// On the favorite toggle, space flips the flag and other characters
    /// are ignored.
    pub fn insert_char(&mut self, c: char) {
        if self.favorite_focused() {
            if c == ' ' {
                self.toggle_favorite();
            }
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.value.insert(field.cursor, c);
            field.cursor += c.len_utf8();
        }
    }

    /// Delete the character before the focused field's cursor
    pub fn delete_char(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            if field.cursor > 0 {
                let prev = field.value[..field.cursor]
                    .chars()
                    .next_back()
                    .map(char::len_utf8)
                    .unwrap_or(0);
                field.cursor -= prev;
                field.value.remove(field.cursor);
            }
        }
    }

    /// Move the focused field's cursor left
    pub fn cursor_left(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            if field.cursor > 0 {
                let prev = field.value[..field.cursor]
                    .chars()
                    .next_back()
                    .map(char::len_utf8)
                    .unwrap_or(0);
                field.cursor -= prev;
            }
        }
    }

    /// Move the focused field's cursor right
    pub fn cursor_right(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            if field.cursor < field.value.len() {
                let next = field.value[field.cursor..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(0);
                field.cursor += next;
            }
        }
    }

    /// Check the required fields for this form's kind
    pub fn validate(&self) -> Result<(), FormError> {
        match self.modal {
            Modal::AddWord | Modal::EditWord(_) => {
                if self.fields[TERM].value.trim().is_empty() {
                    return Err(FormError::MissingTerm);
                }
                if self.fields[DEFINITION].value.trim().is_empty() {
                    return Err(FormError::MissingDefinition);
                }
                Ok(())
            }
            Modal::AddCollection | Modal::EditCollection(_) => {
                if self.fields[NAME].value.trim().is_empty() {
                    return Err(FormError::MissingName);
                }
                Ok(())
            }
        }
    }

    /// Build the draft for an add-word submit
    pub fn word_draft(&self) -> WordDraft {
        WordDraft {
            term: self.fields[TERM].value.clone(),
            definition: self.fields[DEFINITION].value.clone(),
            notes: self.fields[NOTES].value.clone(),
            tags: split_list(&self.fields[TAGS].value),
            collections: split_list(&self.fields[COLLECTIONS].value),
            favorite: self.favorite.unwrap_or(false),
        }
    }

    /// Build the patch for an edit-word submit
    ///
    /// Every field is `Some` because the form holds the full current
    /// values; `added_at` stays untouched by construction.
    pub fn word_patch(&self) -> WordPatch {
        WordPatch {
            term: Some(self.fields[TERM].value.trim().to_string()),
            definition: Some(self.fields[DEFINITION].value.trim().to_string()),
            notes: Some(self.fields[NOTES].value.trim().to_string()),
            tags: Some(split_list(&self.fields[TAGS].value)),
            collections: Some(split_list(&self.fields[COLLECTIONS].value)),
            favorite: self.favorite,
        }
    }

    /// Build the draft for an add-collection submit
    pub fn collection_draft(&self) -> CollectionDraft {
        let emoji = self.fields[EMOJI].value.trim();
        CollectionDraft {
            name: self.fields[NAME].value.clone(),
            emoji: if emoji.is_empty() {
                None
            } else {
                Some(emoji.to_string())
            },
            id: None,
        }
    }

    /// Build the patch for an edit-collection submit
    pub fn collection_patch(&self) -> CollectionPatch {
        let emoji = self.fields[EMOJI].value.trim();
        CollectionPatch {
            name: Some(self.fields[NAME].value.trim().to_string()),
            emoji: if emoji.is_empty() {
                None
            } else {
                Some(emoji.to_string())
            },
        }
    }
}

/// Split a comma-separated input into trimmed, non-empty entries
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_word_validation() {
        let mut form = FormState::add_word();
        assert_eq!(form.validate(), Err(FormError::MissingTerm));

        form.fields[TERM].value = "Ephemeral".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingDefinition));

        form.fields[DEFINITION].value = "Short-lived.".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_collection_validation() {
        let mut form = FormState::add_collection();
        assert_eq!(form.validate(), Err(FormError::MissingName));

        form.fields[NAME].value = "  GRE Prep  ".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_word_draft_splits_lists() {
        let mut form = FormState::add_word();
        form.fields[TERM].value = "Zenith".to_string();
        form.fields[DEFINITION].value = "Highest point.".to_string();
        form.fields[TAGS].value = " astronomy , , general ".to_string();
        form.fields[COLLECTIONS].value = "tech".to_string();
        form.toggle_favorite();

        let draft = form.word_draft();
        assert_eq!(draft.tags, vec!["astronomy", "general"]);
        assert_eq!(draft.collections, vec!["tech"]);
        assert!(draft.favorite);
    }

    #[test]
    fn test_edit_word_prefills() {
        let mut word = Word::new("Paradigm", "A model.");
        word.set_tags(vec!["general".to_string()]);
        word.favorite = true;

        let form = FormState::edit_word(&word);
        assert_eq!(form.modal, Modal::EditWord(word.id));
        assert_eq!(form.fields[TERM].value, "Paradigm");
        assert_eq!(form.fields[TAGS].value, "general");
        assert_eq!(form.favorite, Some(true));

        let patch = form.word_patch();
        assert_eq!(patch.term.as_deref(), Some("Paradigm"));
        assert_eq!(patch.favorite, Some(true));
    }

    #[test]
    fn test_focus_wraps_over_favorite_toggle() {
        let mut form = FormState::add_word();
        // five fields plus the favorite slot
        for _ in 0..5 {
            form.next_field();
        }
        assert!(form.favorite_focused());
        form.next_field();
        assert_eq!(form.focus, 0);

        form.prev_field();
        assert!(form.favorite_focused());
    }

    #[test]
    fn test_collection_form_has_no_favorite_slot() {
        let mut form = FormState::add_collection();
        assert!(!form.favorite_focused());
        form.next_field();
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_insert_and_delete_chars() {
        let mut form = FormState::add_collection();
        for c in "Tech".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.fields[NAME].value, "Tech");

        form.delete_char();
        assert_eq!(form.fields[NAME].value, "Tec");

        form.cursor_left();
        form.insert_char('k');
        assert_eq!(form.fields[NAME].value, "Tekc");
    }

    #[test]
    fn test_space_toggles_favorite_when_focused() {
        let mut form = FormState::add_word();
        while !form.favorite_focused() {
            form.next_field();
        }
        form.insert_char(' ');
        assert_eq!(form.favorite, Some(true));
        // non-space characters are ignored on the toggle
        form.insert_char('x');
        assert_eq!(form.favorite, Some(true));
    }

    #[test]
    fn test_edit_collection_patch() {
        let collection = Collection::new("tech", "Tech Terms", "💻");
        let mut form = FormState::edit_collection(&collection);
        form.fields[NAME].value = "Technology".to_string();
        form.fields[EMOJI].value = String::new();

        let patch = form.collection_patch();
        assert_eq!(patch.name.as_deref(), Some("Technology"));
        // blank emoji leaves the existing glyph alone
        assert_eq!(patch.emoji, None);
    }
}
