/// Chat transcript plus the not-yet-sent draft.
#[derive(Debug, Default)]
pub struct ChatController {
    transcript: Vec<String>,
    draft: String,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft unconditionally.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Append the draft to the transcript and clear it.
    ///
    /// Blank drafts (empty after trimming) are a no-op: neither the transcript
    /// nor the draft changes. Accepted drafts are appended exactly as typed,
    /// surrounding whitespace included. Returns whether a message was appended.
    pub fn submit(&mut self) -> bool {
        if self.draft.trim().is_empty() {
            log::debug!("Ignoring blank chat draft");
            return false;
        }
        let draft = std::mem::take(&mut self.draft);
        self.transcript.push(draft);
        true
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_appends_and_clears() {
        let mut chat = ChatController::new();
        chat.update_draft("hello");
        assert!(chat.submit());
        assert_eq!(chat.transcript(), ["hello"]);
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn test_whitespace_draft_is_left_alone() {
        let mut chat = ChatController::new();
        chat.update_draft("  ");
        assert!(!chat.submit());
        assert!(chat.transcript().is_empty());
        assert_eq!(chat.draft(), "  ");
    }

    #[test]
    fn test_appends_untrimmed_text() {
        let mut chat = ChatController::new();
        chat.update_draft("  hi  ");
        chat.submit();
        assert_eq!(chat.transcript(), ["  hi  "]);
    }

    #[test]
    fn test_transcript_grows_once_per_accepted_submit() {
        let mut chat = ChatController::new();
        let drafts = ["one", "", " \t\n", "two", "   three", "\n"];
        let mut expected = 0;
        for draft in drafts {
            chat.update_draft(draft);
            let before = chat.transcript().len();
            let accepted = chat.submit();
            if !draft.trim().is_empty() {
                expected += 1;
            }
            assert_eq!(chat.transcript().len(), before + usize::from(accepted));
            if accepted {
                assert_eq!(chat.draft(), "");
            } else {
                assert_eq!(chat.draft(), draft);
            }
        }
        assert_eq!(chat.transcript().len(), expected);
        assert_eq!(chat.transcript(), ["one", "two", "   three"]);
    }

    #[test]
    fn test_update_draft_replaces() {
        let mut chat = ChatController::new();
        chat.update_draft("first");
        chat.update_draft("second");
        assert_eq!(chat.draft(), "second");
        assert!(chat.transcript().is_empty());
    }

    #[test]
    fn test_submit_on_empty_draft_is_noop() {
        let mut chat = ChatController::new();
        assert!(!chat.submit());
        assert!(chat.transcript().is_empty());
    }
}
