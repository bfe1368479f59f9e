//! Tests for the host dispatcher, alone and wired to a headless editor.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use async_trait::async_trait;
use jsedit_bridge::{HeadlessContext, Invoke, JsonWidget, ToolbarButton, UserInput};

use super::*;
use crate::handshake::Handshake;

// -- fakes --

/// In-memory store. `open_text: None` behaves like a cancelled dialog.
#[derive(Default)]
struct MemoryStore {
    open_text: Option<String>,
    fail_saves: bool,
    name: Option<String>,
    saved: Vec<(SaveKind, String)>,
}

impl DocumentStore for MemoryStore {
    fn open(&mut self) -> Result<String, PersistenceError> {
        let text = self.open_text.clone().ok_or(PersistenceError::Cancelled)?;
        self.name = Some("opened.json".into());
        Ok(text)
    }

    fn open_path(&mut self, path: &Path) -> Result<String, PersistenceError> {
        let text = self.open_text.clone().ok_or_else(|| PersistenceError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })?;
        self.name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(text)
    }

    fn save(&mut self, text: &str) -> Result<(), PersistenceError> {
        self.record(SaveKind::Save, text)
    }

    fn save_as(&mut self, text: &str) -> Result<(), PersistenceError> {
        self.record(SaveKind::SaveAs, text)?;
        self.name = Some("saved-as.json".into());
        Ok(())
    }

    fn document_name(&self) -> Option<String> {
        self.name.clone()
    }
}

impl MemoryStore {
    fn record(&mut self, kind: SaveKind, text: &str) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Io {
                path: "/readonly/doc.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.saved.push((kind, text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct Recorded {
    titles: Vec<String>,
    dirty: usize,
}

struct TitleRecorder(Rc<RefCell<Recorded>>);

impl TitleSink for TitleRecorder {
    fn on_title_changed(&mut self, title: &str) {
        self.0.borrow_mut().titles.push(title.to_string());
    }

    fn on_dirty(&mut self) {
        self.0.borrow_mut().dirty += 1;
    }
}

#[derive(Default)]
struct RecordingCalls(RefCell<Vec<EntryCall>>);

impl EntryPoints for RecordingCalls {
    fn post(&self, call: EntryCall) -> Result<(), TransportError> {
        self.0.borrow_mut().push(call);
        Ok(())
    }
}

impl RecordingCalls {
    fn calls(&self) -> Vec<EntryCall> {
        self.0.borrow().clone()
    }
}

fn dispatcher(store: MemoryStore) -> (HostDispatcher<MemoryStore>, Rc<RefCell<Recorded>>) {
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    let sink = TitleRecorder(Rc::clone(&recorded));
    (HostDispatcher::new(store, Box::new(sink), "JSON Editor"), recorded)
}

fn ready(d: &mut HostDispatcher<MemoryStore>) {
    d.on_handshake(&HandshakeState {
        succeeded: true,
        attempts: 1,
        elapsed: Duration::ZERO,
    });
}

// -- dispatch --

#[test]
fn content_change_marks_dirty_and_retitles_once() {
    let (mut d, recorded) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    assert!(matches!(d.dispatch("0", &embedded), Dispatched::Dirty));
    assert!(matches!(d.dispatch("0", &embedded), Dispatched::Dirty));

    assert!(d.document().is_dirty());
    let recorded = recorded.borrow();
    assert_eq!(recorded.titles, vec!["*Untitled - JSON Editor"]);
    assert_eq!(recorded.dirty, 2);
    assert!(embedded.calls().is_empty());
}

#[test]
fn open_pushes_content_and_names_document() {
    let store = MemoryStore {
        open_text: Some("[1,2]".into()),
        ..MemoryStore::default()
    };
    let (mut d, recorded) = dispatcher(store);
    let embedded = RecordingCalls::default();

    assert!(matches!(d.dispatch("1", &embedded), Dispatched::Opened));
    assert_eq!(embedded.calls(), vec![EntryCall::SetContent("[1,2]".into())]);
    assert_eq!(
        recorded.borrow().titles.last().map(String::as_str),
        Some("opened.json - JSON Editor")
    );
}

#[test]
fn cancelled_open_sends_nothing() {
    let (mut d, recorded) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    let outcome = d.dispatch("1", &embedded);
    assert!(matches!(
        outcome,
        Dispatched::Failed(PersistenceError::Cancelled)
    ));
    assert!(embedded.calls().is_empty());
    assert!(recorded.borrow().titles.is_empty());
}

#[test]
fn save_passes_suffix_verbatim_then_locks() {
    let (mut d, _) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    d.dispatch("0", &embedded);
    assert!(matches!(
        d.dispatch("2{\n\t\"a\": 1\n}", &embedded),
        Dispatched::Saved
    ));

    assert_eq!(
        d.store().saved,
        vec![(SaveKind::Save, "{\n\t\"a\": 1\n}".to_string())]
    );
    assert_eq!(embedded.calls(), vec![EntryCall::DisableCanSave]);
    assert!(!d.document().is_dirty());
}

#[test]
fn save_as_uses_save_as_and_renames() {
    let (mut d, recorded) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    d.dispatch("3not json", &embedded);
    assert_eq!(
        d.store().saved,
        vec![(SaveKind::SaveAs, "not json".to_string())]
    );
    assert_eq!(
        recorded.borrow().titles.last().map(String::as_str),
        Some("saved-as.json - JSON Editor")
    );
}

#[test]
fn empty_save_suffix_is_saved_as_empty_text() {
    let (mut d, _) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    assert!(matches!(d.dispatch("2", &embedded), Dispatched::Saved));
    assert_eq!(d.store().saved, vec![(SaveKind::Save, String::new())]);
}

#[test]
fn failed_save_does_not_lock_or_clean() {
    let store = MemoryStore {
        fail_saves: true,
        ..MemoryStore::default()
    };
    let (mut d, _) = dispatcher(store);
    let embedded = RecordingCalls::default();

    d.dispatch("0", &embedded);
    let outcome = d.dispatch("2{}", &embedded);

    assert!(matches!(
        outcome,
        Dispatched::Failed(PersistenceError::Io { .. })
    ));
    assert!(embedded.calls().is_empty());
    assert!(d.document().is_dirty());
}

#[test]
fn malformed_payloads_are_dropped() {
    let (mut d, _) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();

    assert!(matches!(
        d.dispatch("", &embedded),
        Dispatched::Malformed(ProtocolError::Empty)
    ));
    assert!(matches!(
        d.dispatch("9", &embedded),
        Dispatched::Malformed(ProtocolError::UnknownTag('9'))
    ));
    assert!(matches!(
        d.dispatch("0x", &embedded),
        Dispatched::Malformed(ProtocolError::UnexpectedData('0'))
    ));
    assert!(!d.document().is_dirty());
}

#[test]
fn open_path_loads_without_prompt() {
    let store = MemoryStore {
        open_text: Some("{}".into()),
        ..MemoryStore::default()
    };
    let (mut d, _) = dispatcher(store);
    let embedded = RecordingCalls::default();
    ready(&mut d);

    let outcome = d.open_path(Path::new("/data/config.json"), &embedded);
    assert!(matches!(outcome, Dispatched::Opened));
    assert_eq!(d.title(), "config.json - JSON Editor");
    assert_eq!(embedded.calls(), vec![EntryCall::SetContent("{}".into())]);
}

#[test]
fn failed_open_path_keeps_document_and_editor() {
    let (mut d, _) = dispatcher(MemoryStore::default());
    let embedded = RecordingCalls::default();
    ready(&mut d);

    let outcome = d.open_path(Path::new("/data/absent.json"), &embedded);
    match outcome {
        Dispatched::Failed(PersistenceError::Io { path, .. }) => {
            assert_eq!(path, Path::new("/data/absent.json"));
        }
        other => panic!("expected io failure, got {other:?}"),
    }
    assert_eq!(d.title(), "Untitled - JSON Editor");
    assert!(embedded.calls().is_empty());
}

// -- link state --

#[test]
fn unreachable_link_refuses_calls() {
    let store = MemoryStore {
        open_text: Some("[]".into()),
        ..MemoryStore::default()
    };
    let (mut d, _) = dispatcher(store);
    let embedded = RecordingCalls::default();
    d.on_handshake(&HandshakeState::default());

    assert_eq!(d.link(), LinkState::Unreachable);
    assert_eq!(
        d.push_content("x", &embedded),
        Err(TransportError::Unreachable)
    );
    assert!(matches!(d.dispatch("1", &embedded), Dispatched::Opened));
    assert!(embedded.calls().is_empty());
}

#[test]
fn successful_handshake_marks_link_ready() {
    let (mut d, _) = dispatcher(MemoryStore::default());
    assert_eq!(d.link(), LinkState::Pending);
    ready(&mut d);
    assert_eq!(d.link(), LinkState::Ready);
}

// -- end to end against the headless editor --

/// Registers the editor's entry points right before the `n`th call, so the
/// first `n - 1` calls find nothing to call.
struct LoadsOnAttempt<'a> {
    ctx: &'a HeadlessContext,
    on: u32,
    calls: AtomicU32,
}

#[async_trait]
impl Invoke for LoadsOnAttempt<'_> {
    async fn invoke(&self, call: EntryCall) -> Result<(), TransportError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.on {
            self.ctx.finish_loading();
        }
        self.ctx.invoke(call).await
    }
}

struct Session {
    ctx: HeadlessContext,
    payloads: std_mpsc::Receiver<String>,
    dispatcher: HostDispatcher<MemoryStore>,
}

impl Session {
    async fn start(store: MemoryStore) -> Self {
        let (tx, payloads) = std_mpsc::channel();
        let ctx = HeadlessContext::spawn(JsonWidget::new, move |p: &str| {
            let _ = tx.send(p.to_string());
        })
        .unwrap();

        let (mut dispatcher, _) = dispatcher(store);
        ctx.finish_loading();
        let state = Handshake::new(Duration::from_secs(5), Duration::from_millis(5))
            .run(&ctx)
            .await;
        dispatcher.on_handshake(&state);

        Self {
            ctx,
            payloads,
            dispatcher,
        }
    }

    /// Deliver input, then hand every payload it produced to the host.
    async fn user(&mut self, input: UserInput) -> Vec<String> {
        self.ctx.input(input);
        // the snapshot turn runs after the input turn
        self.ctx.snapshot().await.unwrap();
        let payloads: Vec<String> = self.payloads.try_iter().collect();
        for payload in &payloads {
            self.dispatcher.dispatch(payload, &self.ctx);
        }
        payloads
    }
}

#[tokio::test]
async fn late_editor_is_initialized_once_within_budget() {
    let ctx = HeadlessContext::spawn(JsonWidget::new, |_: &str| {}).unwrap();
    let target = LoadsOnAttempt {
        ctx: &ctx,
        on: 4,
        calls: AtomicU32::new(0),
    };

    let handshake = Handshake::new(Duration::from_secs(5), Duration::from_millis(5));
    let state = handshake.run(&target).await;

    assert!(state.succeeded);
    assert_eq!(state.attempts, 4);
    assert!(state.elapsed < handshake.timeout());
    assert!(ctx.snapshot().await.unwrap().initialized);
}

#[tokio::test]
async fn typing_marks_dirty_and_enables_save() {
    let mut s = Session::start(MemoryStore::default()).await;

    let payloads = s.user(UserInput::Type("hello".into())).await;
    assert_eq!(payloads, vec!["0"]);
    assert!(s.dispatcher.document().is_dirty());

    let menu = s.ctx.render().await.unwrap().unwrap();
    assert_eq!(menu.save_disabled(), Some(false));
}

#[tokio::test]
async fn save_round_trip_locks_the_button() {
    let mut s = Session::start(MemoryStore::default()).await;

    s.user(UserInput::Type(r#"{"a":1}"#.into())).await;
    let payloads = s.user(UserInput::Click(ToolbarButton::Save)).await;

    assert_eq!(payloads, vec!["2{\n\t\"a\": 1\n}"]);
    assert_eq!(
        s.dispatcher.store().saved,
        vec![(SaveKind::Save, "{\n\t\"a\": 1\n}".to_string())]
    );

    let snap = s.ctx.snapshot().await.unwrap();
    assert!(!snap.save_enabled);
    let forced = snap.menu.unwrap();
    assert!(forced.refreshed);
    assert_eq!(forced.save_disabled(), Some(true));

    let next = s.ctx.render().await.unwrap().unwrap();
    assert_eq!(next.save_disabled(), Some(true));
}

#[tokio::test]
async fn unparsable_text_is_saved_verbatim() {
    let mut s = Session::start(MemoryStore::default()).await;

    s.user(UserInput::Type("not json".into())).await;
    let payloads = s.user(UserInput::Click(ToolbarButton::Save)).await;

    assert_eq!(payloads, vec!["2not json"]);
    assert_eq!(
        s.dispatcher.store().saved,
        vec![(SaveKind::Save, "not json".to_string())]
    );
}

#[tokio::test]
async fn failed_save_leaves_editor_unlocked() {
    let store = MemoryStore {
        fail_saves: true,
        ..MemoryStore::default()
    };
    let mut s = Session::start(store).await;

    s.user(UserInput::Type("[1]".into())).await;
    s.user(UserInput::Click(ToolbarButton::Save)).await;

    let snap = s.ctx.snapshot().await.unwrap();
    assert!(snap.save_enabled);
    assert_eq!(snap.content, Some(jsedit_bridge::Content::parse("[1]")));
}

#[tokio::test]
async fn open_replaces_content_without_enabling_save() {
    let store = MemoryStore {
        open_text: Some(r#"{"opened":true}"#.into()),
        ..MemoryStore::default()
    };
    let mut s = Session::start(store).await;

    let payloads = s.user(UserInput::Click(ToolbarButton::Open)).await;
    assert_eq!(payloads, vec!["1"]);

    let snap = s.ctx.snapshot().await.unwrap();
    assert_eq!(
        snap.content,
        Some(jsedit_bridge::Content::parse(r#"{"opened":true}"#))
    );
    assert!(!snap.save_enabled);
    assert!(snap.focused);
}

#[tokio::test]
async fn never_loaded_editor_times_out_without_error() {
    let ctx = HeadlessContext::spawn(JsonWidget::new, |_: &str| {}).unwrap();
    let handshake = Handshake::new(Duration::from_millis(80), Duration::from_millis(10));

    let state = handshake.run(&ctx).await;
    assert!(!state.succeeded);
    assert!(state.elapsed >= handshake.timeout());

    let (mut d, _) = dispatcher(MemoryStore::default());
    d.on_handshake(&state);
    assert_eq!(d.push_content("x", &ctx), Err(TransportError::Unreachable));
    assert!(!ctx.snapshot().await.unwrap().initialized);
}
