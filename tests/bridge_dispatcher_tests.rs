//! Bridge dispatch tests against a recording fake of the native surface.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use stackle::bridge::{
    BridgeDispatcher, BridgeError, DatabaseDialog, PathReply, Responder, ShellActions,
};

#[derive(Default)]
struct Record {
    quick_add_shows: usize,
    dialogs: Vec<DatabaseDialog>,
    settings_opens: usize,
    activations: usize,
    shows: usize,
    hides: usize,
    toggles: usize,
    heights: Vec<f64>,
    quits: usize,
}

/// Recording fake. Dialog completions resolve immediately with the
/// scripted `dialog_path`.
struct FakeShell {
    record: Arc<Mutex<Record>>,
    trusted: bool,
    dialog_path: Option<String>,
    max_height: f64,
}

impl FakeShell {
    fn new() -> (Self, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        let shell = FakeShell {
            record: record.clone(),
            trusted: true,
            dialog_path: Some("/tmp/todos.db".to_string()),
            max_height: 520.0,
        };
        (shell, record)
    }
}

impl ShellActions for FakeShell {
    fn show_quick_add_panel(&mut self) {
        self.record.lock().unwrap().quick_add_shows += 1;
    }

    fn choose_database_path(&mut self, dialog: DatabaseDialog, reply: PathReply) {
        self.record.lock().unwrap().dialogs.push(dialog);
        reply(self.dialog_path.clone());
    }

    fn is_accessibility_trusted(&self) -> bool {
        self.trusted
    }

    fn open_accessibility_settings(&mut self) {
        self.record.lock().unwrap().settings_opens += 1;
    }

    fn activate_app(&mut self) {
        self.record.lock().unwrap().activations += 1;
    }

    fn show_main_window(&mut self) {
        self.record.lock().unwrap().shows += 1;
    }

    fn hide_main_window(&mut self) {
        self.record.lock().unwrap().hides += 1;
    }

    fn toggle_main_window(&mut self) {
        self.record.lock().unwrap().toggles += 1;
    }

    fn set_main_window_height(&mut self, content_height: f64) {
        self.record.lock().unwrap().heights.push(content_height);
    }

    fn max_content_height(&self) -> f64 {
        self.max_height
    }

    fn quit(&mut self) {
        self.record.lock().unwrap().quits += 1;
    }
}

type Captured = Arc<Mutex<Vec<Result<Value, BridgeError>>>>;

fn capturing_responder() -> (Responder, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let responder = Responder::new(move |result| {
        sink.lock().unwrap().push(result);
    });
    (responder, captured)
}

fn attached() -> (BridgeDispatcher<FakeShell>, Arc<Mutex<Record>>) {
    let (shell, record) = FakeShell::new();
    let mut dispatcher = BridgeDispatcher::new();
    dispatcher.attach(shell);
    (dispatcher, record)
}

#[test]
fn initialize_resolves_null() {
    let (mut dispatcher, _record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("initialize", &Value::Null, responder);

    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

#[test]
fn unknown_command_resolves_not_implemented() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("rebootKernel", &Value::Null, responder);

    assert_eq!(
        *captured.lock().unwrap(),
        vec![Err(BridgeError::NotImplemented("rebootKernel".into()))]
    );
    // Nothing on the shell was touched.
    assert_eq!(record.lock().unwrap().quick_add_shows, 0);
}

#[test]
fn detached_dispatcher_resolves_unavailable_for_every_command() {
    let mut dispatcher: BridgeDispatcher<FakeShell> = BridgeDispatcher::new();

    for name in ["initialize", "showQuickAddPanel", "quitApp", "noSuchCommand"] {
        let (responder, captured) = capturing_responder();
        dispatcher.dispatch(name, &Value::Null, responder);
        assert_eq!(
            *captured.lock().unwrap(),
            vec![Err(BridgeError::Unavailable)],
            "{name}"
        );
    }
}

#[test]
fn detach_after_attach_goes_back_to_unavailable() {
    let (mut dispatcher, _record) = attached();
    assert!(dispatcher.is_attached());

    dispatcher.detach();

    assert!(!dispatcher.is_attached());
    let (responder, captured) = capturing_responder();
    dispatcher.dispatch("toggleMainWindow", &Value::Null, responder);
    assert_eq!(*captured.lock().unwrap(), vec![Err(BridgeError::Unavailable)]);
}

#[test]
fn show_quick_add_panel_reaches_the_shell() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("showQuickAddPanel", &Value::Null, responder);

    assert_eq!(record.lock().unwrap().quick_add_shows, 1);
    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

#[test]
fn window_commands_invoke_their_actions() {
    let (mut dispatcher, record) = attached();

    for name in ["activateApp", "hideMainWindow", "toggleMainWindow", "quitApp"] {
        let (responder, _captured) = capturing_responder();
        dispatcher.dispatch(name, &Value::Null, responder);
    }

    let record = record.lock().unwrap();
    assert_eq!(record.activations, 1);
    assert_eq!(record.hides, 1);
    assert_eq!(record.toggles, 1);
    assert_eq!(record.quits, 1);
}

#[test]
fn activate_app_surfaces_the_main_window() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("activateApp", &Value::Null, responder);

    // Activation alone is not enough: a hidden window must come back.
    {
        let record = record.lock().unwrap();
        assert_eq!(record.activations, 1);
        assert_eq!(record.shows, 1);
    }
    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

#[test]
fn accessibility_query_returns_the_shell_flag() {
    let (shell, _record) = FakeShell::new();
    let mut dispatcher = BridgeDispatcher::new();
    dispatcher.attach(FakeShell { trusted: false, ..shell });

    let (responder, captured) = capturing_responder();
    dispatcher.dispatch("isAccessibilityTrusted", &Value::Null, responder);

    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Bool(false))]);
}

#[test]
fn open_accessibility_settings_is_fire_and_forget() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("openAccessibilitySettings", &Value::Null, responder);

    assert_eq!(record.lock().unwrap().settings_opens, 1);
    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

// === Height clamping ===

#[test]
fn height_within_range_passes_through() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("setMainWindowHeight", &json!(340.0), responder);

    assert_eq!(record.lock().unwrap().heights, vec![340.0]);
    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

#[test]
fn oversized_height_clamps_to_the_screen_maximum() {
    let (mut dispatcher, record) = attached();
    let (responder, _captured) = capturing_responder();

    dispatcher.dispatch("setMainWindowHeight", &json!(10_000.0), responder);

    assert_eq!(record.lock().unwrap().heights, vec![520.0]);
}

#[test]
fn tiny_height_clamps_to_the_minimum() {
    let (mut dispatcher, record) = attached();
    let (responder, _captured) = capturing_responder();

    dispatcher.dispatch("setMainWindowHeight", &json!(10), responder);

    assert_eq!(record.lock().unwrap().heights, vec![120.0]);
}

#[test]
fn non_numeric_height_is_invalid_and_leaves_the_window_alone() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("setMainWindowHeight", &json!("340"), responder);

    assert!(record.lock().unwrap().heights.is_empty());
    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(matches!(captured[0], Err(BridgeError::InvalidArgument(_))));
}

// === File dialogs ===

#[test]
fn create_dialog_resolves_the_chosen_path() {
    let (mut dispatcher, record) = attached();
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("selectDatabasePathForCreate", &Value::Null, responder);

    assert_eq!(record.lock().unwrap().dialogs, vec![DatabaseDialog::Create]);
    assert_eq!(
        *captured.lock().unwrap(),
        vec![Ok(Value::String("/tmp/todos.db".into()))]
    );
}

#[test]
fn open_dialog_cancel_resolves_null() {
    let (shell, record) = FakeShell::new();
    let mut dispatcher = BridgeDispatcher::new();
    dispatcher.attach(FakeShell { dialog_path: None, ..shell });
    let (responder, captured) = capturing_responder();

    dispatcher.dispatch("selectDatabasePathForOpen", &Value::Null, responder);

    assert_eq!(record.lock().unwrap().dialogs, vec![DatabaseDialog::Open]);
    assert_eq!(*captured.lock().unwrap(), vec![Ok(Value::Null)]);
}

#[test]
fn every_dispatch_resolves_exactly_once() {
    let (mut dispatcher, _record) = attached();

    let names = [
        "initialize",
        "showQuickAddPanel",
        "selectDatabasePathForCreate",
        "selectDatabasePathForOpen",
        "isAccessibilityTrusted",
        "openAccessibilitySettings",
        "activateApp",
        "hideMainWindow",
        "toggleMainWindow",
        "setMainWindowHeight",
        "quitApp",
        "definitelyNotACommand",
    ];
    for name in names {
        let (responder, captured) = capturing_responder();
        dispatcher.dispatch(name, &json!(300.0), responder);
        assert_eq!(captured.lock().unwrap().len(), 1, "{name}");
    }
}
