//! Current document bookkeeping and the window title derived from it.

/// Name shown before any file has been opened or saved.
pub const UNTITLED: &str = "Untitled";

/// Receives title and dirty notifications from the dispatcher.
pub trait TitleSink {
    fn on_title_changed(&mut self, title: &str);

    /// Called for every content change, including ones that leave the
    /// title unchanged.
    fn on_dirty(&mut self) {}
}

/// Name and modification state of the document being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    name: Option<String>,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNTITLED)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `true` if the document was clean before.
    pub fn mark_dirty(&mut self) -> bool {
        !std::mem::replace(&mut self.dirty, true)
    }

    /// Record a successful open or save under `name`.
    pub fn mark_clean(&mut self, name: Option<String>) {
        if name.is_some() {
            self.name = name;
        }
        self.dirty = false;
    }

    /// `"*name - app"` while dirty, `"name - app"` otherwise.
    pub fn title(&self, app_title: &str) -> String {
        let marker = if self.dirty { "*" } else { "" };
        format!("{marker}{} - {app_title}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_document_is_untitled_and_clean() {
        let doc = Document::new();
        assert_eq!(doc.name(), UNTITLED);
        assert!(!doc.is_dirty());
        assert_eq!(doc.title("JSON Editor"), "Untitled - JSON Editor");
    }

    #[test]
    fn mark_dirty_reports_transition_once() {
        let mut doc = Document::new();
        assert!(doc.mark_dirty());
        assert!(!doc.mark_dirty());
        assert_eq!(doc.title("App"), "*Untitled - App");
    }

    #[test]
    fn mark_clean_keeps_previous_name_when_none_given() {
        let mut doc = Document::new();
        doc.mark_clean(Some("data.json".into()));
        doc.mark_dirty();
        doc.mark_clean(None);
        assert_eq!(doc.title("App"), "data.json - App");
    }
}
