//! Bridge command dispatch.
//!
//! The dispatcher owns the attachable shell surface and turns parsed
//! commands into native actions. It runs on the main thread; off-thread
//! callers go through [`super::channel`], which queues requests for the
//! main-loop tick. Whatever happens, each command resolves its responder
//! exactly once.

use log::debug;
use serde_json::Value;

use crate::model::geometry::clamp_content_height;

use super::{BridgeCommand, BridgeError, Responder};

/// Which database picker to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDialog {
    /// Save panel for creating a new database file.
    Create,
    /// Open panel for locating an existing database file.
    Open,
}

/// Completion callback for a file dialog: the chosen path, or `None` when
/// the user cancelled. Invoked exactly once.
pub type PathReply = Box<dyn FnOnce(Option<String>) + Send>;

/// The native surface the bridge drives. Implemented by the macOS shell;
/// tests use a recording fake.
///
/// Side effects are idempotent where natural: showing an already-visible
/// panel or hiding an already-hidden window is a successful no-op.
pub trait ShellActions {
    fn show_quick_add_panel(&mut self);
    fn choose_database_path(&mut self, dialog: DatabaseDialog, reply: PathReply);
    fn is_accessibility_trusted(&self) -> bool;
    fn open_accessibility_settings(&mut self);
    fn activate_app(&mut self);
    fn show_main_window(&mut self);
    fn hide_main_window(&mut self);
    fn toggle_main_window(&mut self);
    /// Resize the main window to the given content height. The dispatcher
    /// has already clamped the value into the allowed range.
    fn set_main_window_height(&mut self, content_height: f64);
    /// Screen-derived maximum content height used for clamping.
    fn max_content_height(&self) -> f64;
    fn quit(&mut self);
}

/// Receives named commands from the UI runtime and invokes native actions.
pub struct BridgeDispatcher<A: ShellActions> {
    shell: Option<A>,
}

impl<A: ShellActions> BridgeDispatcher<A> {
    /// A dispatcher with no shell attached; every command resolves
    /// `Unavailable` until [`attach`](Self::attach) is called.
    pub fn new() -> Self {
        Self { shell: None }
    }

    pub fn attach(&mut self, shell: A) {
        self.shell = Some(shell);
    }

    /// Tear the shell down. Subsequent commands resolve `Unavailable`.
    pub fn detach(&mut self) -> Option<A> {
        self.shell.take()
    }

    pub fn is_attached(&self) -> bool {
        self.shell.is_some()
    }

    pub fn shell_mut(&mut self) -> Option<&mut A> {
        self.shell.as_mut()
    }

    /// Dispatch one command, resolving `responder` exactly once.
    pub fn dispatch(&mut self, name: &str, argument: &Value, responder: Responder) {
        debug!("bridge command: {name}");

        let Some(shell) = self.shell.as_mut() else {
            responder.err(BridgeError::Unavailable);
            return;
        };

        let command = match BridgeCommand::parse(name, argument) {
            Ok(command) => command,
            Err(error) => {
                responder.err(error);
                return;
            }
        };

        match command {
            BridgeCommand::Initialize => responder.ok(Value::Null),
            BridgeCommand::ShowQuickAddPanel => {
                shell.show_quick_add_panel();
                responder.ok(Value::Null);
            }
            BridgeCommand::SelectDatabasePathForCreate => {
                Self::choose_path(shell, DatabaseDialog::Create, responder);
            }
            BridgeCommand::SelectDatabasePathForOpen => {
                Self::choose_path(shell, DatabaseDialog::Open, responder);
            }
            BridgeCommand::IsAccessibilityTrusted => {
                responder.ok(Value::Bool(shell.is_accessibility_trusted()));
            }
            BridgeCommand::OpenAccessibilitySettings => {
                shell.open_accessibility_settings();
                responder.ok(Value::Null);
            }
            BridgeCommand::ActivateApp => {
                // With close-to-hide, activating must also re-surface a
                // hidden main window.
                shell.activate_app();
                shell.show_main_window();
                responder.ok(Value::Null);
            }
            BridgeCommand::HideMainWindow => {
                shell.hide_main_window();
                responder.ok(Value::Null);
            }
            BridgeCommand::ToggleMainWindow => {
                shell.toggle_main_window();
                responder.ok(Value::Null);
            }
            BridgeCommand::SetMainWindowHeight(requested) => {
                let clamped = clamp_content_height(requested, shell.max_content_height());
                shell.set_main_window_height(clamped);
                responder.ok(Value::Null);
            }
            BridgeCommand::QuitApp => {
                shell.quit();
                responder.ok(Value::Null);
            }
        }
    }

    /// Present a file dialog; the dialog's completion resolves the
    /// responder with the chosen path or null on cancel.
    fn choose_path(shell: &mut A, dialog: DatabaseDialog, responder: Responder) {
        shell.choose_database_path(
            dialog,
            Box::new(move |path| match path {
                Some(path) => responder.ok(Value::String(path)),
                None => responder.ok(Value::Null),
            }),
        );
    }
}

impl<A: ShellActions> Default for BridgeDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}
