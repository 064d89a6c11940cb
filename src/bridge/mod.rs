//! The native bridge: commands the embedded UI runtime can invoke.
//!
//! Commands arrive over a single asynchronous request/response channel as a
//! name plus at most one dynamic argument. [`BridgeCommand`] is the closed
//! command set, [`BridgeError`] the typed failures that cross the channel,
//! and [`Responder`] the single-use response sink that is guaranteed to
//! resolve exactly once.

pub mod channel;
pub mod dispatcher;

pub use channel::{emit_quick_add_submitted, enqueue_request, set_event_sink, take_request, BridgeRequest};
pub use dispatcher::{BridgeDispatcher, DatabaseDialog, PathReply, ShellActions};

use log::warn;
use serde_json::Value;

/// Typed errors returned to the UI runtime. Never thrown across the
/// channel; always delivered through the [`Responder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The command's argument failed its type/shape check.
    InvalidArgument(String),
    /// The native shell has been torn down or is not yet attached.
    Unavailable,
    /// The command name is not part of the closed set.
    NotImplemented(String),
}

impl BridgeError {
    /// Stable wire code delivered to the UI runtime.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArgument(_) => "INVALID_ARGS",
            BridgeError::Unavailable => "UNAVAILABLE",
            BridgeError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            BridgeError::Unavailable => write!(f, "native shell is unavailable"),
            BridgeError::NotImplemented(name) => write!(f, "unknown command: {name}"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// The closed set of bridge commands.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCommand {
    Initialize,
    ShowQuickAddPanel,
    SelectDatabasePathForCreate,
    SelectDatabasePathForOpen,
    IsAccessibilityTrusted,
    OpenAccessibilitySettings,
    ActivateApp,
    HideMainWindow,
    ToggleMainWindow,
    SetMainWindowHeight(f64),
    QuitApp,
}

impl BridgeCommand {
    /// Parse a command by exact name match, validating the argument shape.
    pub fn parse(name: &str, argument: &Value) -> Result<Self, BridgeError> {
        match name {
            "initialize" => Ok(BridgeCommand::Initialize),
            "showQuickAddPanel" => Ok(BridgeCommand::ShowQuickAddPanel),
            "selectDatabasePathForCreate" => Ok(BridgeCommand::SelectDatabasePathForCreate),
            "selectDatabasePathForOpen" => Ok(BridgeCommand::SelectDatabasePathForOpen),
            "isAccessibilityTrusted" => Ok(BridgeCommand::IsAccessibilityTrusted),
            "openAccessibilitySettings" => Ok(BridgeCommand::OpenAccessibilitySettings),
            "activateApp" => Ok(BridgeCommand::ActivateApp),
            "hideMainWindow" => Ok(BridgeCommand::HideMainWindow),
            "toggleMainWindow" => Ok(BridgeCommand::ToggleMainWindow),
            "setMainWindowHeight" => match argument.as_f64() {
                Some(height) => Ok(BridgeCommand::SetMainWindowHeight(height)),
                None => Err(BridgeError::InvalidArgument(format!(
                    "expected numeric height, got {argument}"
                ))),
            },
            "quitApp" => Ok(BridgeCommand::QuitApp),
            other => Err(BridgeError::NotImplemented(other.to_string())),
        }
    }
}

type ResponseFn = Box<dyn FnOnce(Result<Value, BridgeError>) + Send>;

/// Single-use response sink for one bridge command.
///
/// Resolving consumes the responder, so a response can never be delivered
/// twice; dropping an unresolved responder delivers `Unavailable` so the
/// caller can never be left hanging.
pub struct Responder {
    reply: Option<ResponseFn>,
}

impl Responder {
    pub fn new(reply: impl FnOnce(Result<Value, BridgeError>) + Send + 'static) -> Self {
        Self { reply: Some(Box::new(reply)) }
    }

    /// Deliver the result. Consumes the responder.
    pub fn resolve(mut self, result: Result<Value, BridgeError>) {
        if let Some(reply) = self.reply.take() {
            reply(result);
        }
    }

    /// Deliver a success value.
    pub fn ok(self, value: Value) {
        self.resolve(Ok(value));
    }

    /// Deliver an error.
    pub fn err(self, error: BridgeError) {
        self.resolve(Err(error));
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        if let Some(reply) = self.reply.take() {
            warn!("bridge responder dropped without resolving; delivering unavailable");
            reply(Err(BridgeError::Unavailable));
        }
    }
}
