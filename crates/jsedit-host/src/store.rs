//! Document persistence.

use std::path::{Path, PathBuf};

use jsedit_common::PersistenceError;
use tracing::info;

/// Where the dispatcher loads and stores document text.
pub trait DocumentStore {
    /// Ask for a document and return its text.
    fn open(&mut self) -> Result<String, PersistenceError>;

    /// Load a known document without asking.
    fn open_path(&mut self, path: &Path) -> Result<String, PersistenceError>;

    /// Write to the current document, or behave like `save_as` when there
    /// is none.
    fn save(&mut self, text: &str) -> Result<(), PersistenceError>;

    /// Ask for a destination, write there, and make it current.
    fn save_as(&mut self, text: &str) -> Result<(), PersistenceError>;

    /// Display name of the current document.
    fn document_name(&self) -> Option<String>;
}

/// Chooses files on behalf of the user.
pub trait PathPrompt {
    fn pick_open(&mut self) -> Option<PathBuf>;

    /// `current` is offered as the starting point when there is one.
    fn pick_save(&mut self, current: Option<&Path>) -> Option<PathBuf>;
}

/// Plain files on disk, chosen through a [`PathPrompt`].
pub struct FileDocumentStore<P> {
    prompt: P,
    current: Option<PathBuf>,
}

impl<P: PathPrompt> FileDocumentStore<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            prompt,
            current: None,
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    fn write(&mut self, path: PathBuf, text: &str) -> Result<(), PersistenceError> {
        std::fs::write(&path, text).map_err(|source| PersistenceError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = text.len(), "document saved");
        self.current = Some(path);
        Ok(())
    }
}

impl<P: PathPrompt> DocumentStore for FileDocumentStore<P> {
    fn open(&mut self) -> Result<String, PersistenceError> {
        let path = self.prompt.pick_open().ok_or(PersistenceError::Cancelled)?;
        self.open_path(&path)
    }

    fn open_path(&mut self, path: &Path) -> Result<String, PersistenceError> {
        let text = std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = text.len(), "document opened");
        self.current = Some(path.to_path_buf());
        Ok(text)
    }

    fn save(&mut self, text: &str) -> Result<(), PersistenceError> {
        match self.current.clone() {
            Some(path) => self.write(path, text),
            None => self.save_as(text),
        }
    }

    fn save_as(&mut self, text: &str) -> Result<(), PersistenceError> {
        let path = self
            .prompt
            .pick_save(self.current.as_deref())
            .ok_or(PersistenceError::Cancelled)?;
        self.write(path, text)
    }

    fn document_name(&self) -> Option<String> {
        let name = self.current.as_deref()?.file_name()?;
        Some(name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Answers prompts from a queue; an empty queue means "cancelled".
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<PathBuf>,
        asked_with: Vec<Option<PathBuf>>,
    }

    impl Scripted {
        fn answering(paths: impl IntoIterator<Item = PathBuf>) -> Self {
            Self {
                answers: paths.into_iter().collect(),
                ..Self::default()
            }
        }
    }

    impl PathPrompt for Scripted {
        fn pick_open(&mut self) -> Option<PathBuf> {
            self.answers.pop_front()
        }

        fn pick_save(&mut self, current: Option<&Path>) -> Option<PathBuf> {
            self.asked_with.push(current.map(Path::to_path_buf));
            self.answers.pop_front()
        }
    }

    #[test]
    fn open_reads_chosen_file_and_makes_it_current() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(&path, "[1]").unwrap();

        let mut store = FileDocumentStore::new(Scripted::answering([path.clone()]));
        assert_eq!(store.open().unwrap(), "[1]");
        assert_eq!(store.current_path(), Some(path.as_path()));
        assert_eq!(store.document_name().as_deref(), Some("in.json"));
    }

    #[test]
    fn cancelled_open_keeps_current() {
        let mut store = FileDocumentStore::new(Scripted::default());
        assert!(matches!(store.open(), Err(PersistenceError::Cancelled)));
        assert!(store.current_path().is_none());
        assert!(store.document_name().is_none());
    }

    #[test]
    fn save_without_current_asks_for_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut store = FileDocumentStore::new(Scripted::answering([path.clone()]));
        store.save("{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert_eq!(store.current_path(), Some(path.as_path()));
    }

    #[test]
    fn save_with_current_writes_without_asking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "old").unwrap();

        let mut store = FileDocumentStore::new(Scripted::default());
        store.open_path(&path).unwrap();
        store.save("new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn save_as_offers_current_and_switches_to_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        std::fs::write(&first, "1").unwrap();

        let mut store = FileDocumentStore::new(Scripted::answering([second.clone()]));
        store.open_path(&first).unwrap();
        store.save_as("2").unwrap();

        assert_eq!(store.prompt.asked_with, vec![Some(first.clone())]);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "1");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "2");
        assert_eq!(store.document_name().as_deref(), Some("b.json"));
    }

    #[test]
    fn write_failure_reports_path_and_keeps_current() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing").join("x.json");

        let mut store = FileDocumentStore::new(Scripted::answering([bad.clone()]));
        match store.save_as("x") {
            Err(PersistenceError::Io { path, .. }) => assert_eq!(path, bad),
            other => panic!("expected io error, got {other:?}"),
        }
        assert!(store.current_path().is_none());
    }

    #[test]
    fn open_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileDocumentStore::new(Scripted::default());
        let result = store.open_path(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }
}
