use chrono::{DateTime, Local};

/// Snapshot taken by "Save Draft". Lives in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDraft {
    pub text: String,
    pub saved_at: DateTime<Local>,
}

impl SavedDraft {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Text of the writing panel and its last saved snapshot.
#[derive(Debug, Default)]
pub struct WritingPad {
    text: String,
    saved: Option<SavedDraft>,
}

impl WritingPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&SavedDraft> {
        self.saved.as_ref()
    }

    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Snapshot the current text, replacing any earlier snapshot.
    pub fn save(&mut self) -> &SavedDraft {
        let draft = SavedDraft {
            text: self.text.clone(),
            saved_at: Local::now(),
        };
        log::info!("Draft saved ({} words)", draft.word_count());
        self.saved.insert(draft)
    }

    /// True when the text differs from the last snapshot.
    pub fn is_dirty(&self) -> bool {
        match &self.saved {
            Some(saved) => saved.text != self.text,
            None => !self.text.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pad_is_clean() {
        let pad = WritingPad::new();
        assert!(!pad.is_dirty());
        assert!(pad.saved().is_none());
    }

    #[test]
    fn test_save_snapshots_text() {
        let mut pad = WritingPad::new();
        pad.update_text("Once upon a time");
        assert!(pad.is_dirty());

        let saved = pad.save();
        assert_eq!(saved.text, "Once upon a time");
        assert_eq!(saved.word_count(), 4);
        assert!(!pad.is_dirty());

        pad.update_text("Once upon a time, again");
        assert!(pad.is_dirty());
        assert_eq!(pad.saved().map(|d| d.text.as_str()), Some("Once upon a time"));
    }

    #[test]
    fn test_second_save_replaces_first() {
        let mut pad = WritingPad::new();
        pad.update_text("a");
        pad.save();
        pad.update_text("b");
        pad.save();
        assert_eq!(pad.saved().unwrap().text, "b");
    }
}
