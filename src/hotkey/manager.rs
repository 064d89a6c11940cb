//! Hotkey registration state machine with layered fallback.
//!
//! Per purpose: `Unattempted → Registered`, or
//! `Unattempted → OsRegistrationFailed → FallbackActive`, or
//! `Registered → HandlerInstallFailed → FallbackActive`.
//!
//! A registration cycle always starts from a full reset, registers every
//! purpose, then makes at most one shared-handler install attempt, then
//! activates fallback for whichever purposes need it. OS failures degrade,
//! they never abort: the raw status codes are recorded for diagnostics and
//! the trigger stays reachable through the fallback monitors, the status
//! menu and the bridge.

use log::{info, warn};
use serde::Serialize;

use crate::model::constants::RETRY_DELAYS;

use super::system::{HotkeySystem, RetryTimer};
use super::{fallback_combo, primary_combo, Purpose, RegistrationStatus};

/// Per-purpose binding state tracked by the manager.
#[derive(Debug, Clone, Copy)]
struct Binding {
    status: RegistrationStatus,
    fallback_active: bool,
}

impl Binding {
    const UNREGISTERED: Binding = Binding {
        status: RegistrationStatus::Unregistered,
        fallback_active: false,
    };
}

/// Snapshot of registration health, shown by the Diagnostics menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PurposeDiagnostics {
    pub status: RegistrationStatus,
    pub fallback_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HotkeyDiagnostics {
    pub quick_add: PurposeDiagnostics,
    pub toggle_window: PurposeDiagnostics,
    pub handler_installed: bool,
    pub monitors_installed: bool,
    pub trusted: bool,
}

impl HotkeyDiagnostics {
    /// One-line summary for the status-menu label. The label reflects
    /// OS-level registration health; fallback monitors may still cover the
    /// triggers when it reads "unavailable".
    pub fn summary(&self) -> &'static str {
        let native = |p: &PurposeDiagnostics| {
            p.status == RegistrationStatus::Registered && self.handler_installed
        };
        match (native(&self.quick_add), native(&self.toggle_window)) {
            (true, true) => "Hotkeys: active",
            (true, false) | (false, true) => "Hotkeys: fallback",
            (false, false) => "Hotkeys: unavailable",
        }
    }
}

impl std::fmt::Display for HotkeyDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = |p: &PurposeDiagnostics| match p.status {
            RegistrationStatus::Unregistered => "unregistered".to_string(),
            RegistrationStatus::Registered => "registered".to_string(),
            RegistrationStatus::Failed(code) => format!("failed (status {code})"),
        };
        writeln!(f, "quick add: {}, fallback {}", line(&self.quick_add), self.quick_add.fallback_active)?;
        writeln!(
            f,
            "toggle window: {}, fallback {}",
            line(&self.toggle_window),
            self.toggle_window.fallback_active
        )?;
        write!(
            f,
            "handler installed: {}, monitors installed: {}, accessibility trusted: {}",
            self.handler_installed, self.monitors_installed, self.trusted
        )
    }
}

/// Owns registration of the global triggers and the retry bookkeeping.
pub struct HotkeyManager<S: HotkeySystem> {
    system: S,
    bindings: [Binding; 2],
    handler_installed: bool,
    monitors_installed: bool,
    permission_prompted: bool,
    retry_timers: Vec<S::Timer>,
}

impl<S: HotkeySystem> HotkeyManager<S> {
    pub fn new(system: S) -> Self {
        Self {
            system,
            bindings: [Binding::UNREGISTERED; 2],
            handler_installed: false,
            monitors_installed: false,
            permission_prompted: false,
            retry_timers: Vec::new(),
        }
    }

    /// Run one full registration cycle: reset, register every purpose,
    /// install the shared handler (once), then activate fallback where
    /// needed. Safe to call repeatedly; it never stacks handles.
    pub fn refresh(&mut self) {
        self.reset();

        // OS registration fully completes for every purpose before the
        // shared handler install is attempted.
        for purpose in Purpose::ALL {
            let combo = primary_combo(purpose);
            let status = self.system.register(purpose, combo);
            self.bindings[purpose.index()].status = if status == 0 {
                RegistrationStatus::Registered
            } else {
                warn!(
                    "hotkey registration failed for {} (status {})",
                    purpose.label(),
                    status
                );
                RegistrationStatus::Failed(status)
            };
        }

        let any_registered = Purpose::ALL
            .iter()
            .any(|p| self.bindings[p.index()].status == RegistrationStatus::Registered);
        if any_registered {
            self.handler_installed = self.system.install_shared_handler();
            if !self.handler_installed {
                warn!("shared hotkey handler install failed; degrading to fallback monitors");
            }
        }

        for purpose in Purpose::ALL {
            let registered =
                self.bindings[purpose.index()].status == RegistrationStatus::Registered;
            let needs_fallback = !registered || !self.handler_installed;
            self.bindings[purpose.index()].fallback_active = needs_fallback;
        }

        if Purpose::ALL.iter().any(|p| self.bindings[p.index()].fallback_active) {
            self.monitors_installed = self.system.install_fallback_monitors();
            if !self.monitors_installed {
                warn!("fallback monitor install failed; triggers remain reachable via menu");
            }
        }
        for purpose in Purpose::ALL {
            let gate =
                self.monitors_installed && self.bindings[purpose.index()].fallback_active;
            self.system.set_fallback_active(purpose, gate);
        }

        self.prompt_for_permission_if_needed();

        info!("hotkey registration cycle complete: {}", self.diagnostics().summary());
    }

    /// Full reset: release every OS binding, remove the shared handler and
    /// both fallback monitors, clear all flags. Idempotent.
    pub fn reset(&mut self) {
        for purpose in Purpose::ALL {
            if self.bindings[purpose.index()].status == RegistrationStatus::Registered {
                self.system.unregister(purpose);
            }
            self.system.set_fallback_active(purpose, false);
        }
        if self.handler_installed {
            self.system.remove_shared_handler();
            self.handler_installed = false;
        }
        if self.monitors_installed {
            self.system.remove_fallback_monitors();
            self.monitors_installed = false;
        }
        self.bindings = [Binding::UNREGISTERED; 2];
    }

    /// Schedule the bounded startup retry sequence.
    pub fn schedule_startup_retries(&mut self) {
        for delay in RETRY_DELAYS {
            let timer = self.system.schedule_retry(delay);
            self.retry_timers.push(timer);
        }
    }

    /// A retry opportunity fired (startup timer, foreground activation or
    /// the menu). Skipped entirely when registration is already fully
    /// native; concurrent requests collapse through this same guard.
    pub fn on_retry_opportunity(&mut self) {
        if self.fully_registered() {
            self.cancel_retries();
            return;
        }
        self.refresh();
        if self.fully_registered() {
            self.cancel_retries();
        }
    }

    /// Cancel every pending retry as a group. Idempotent.
    pub fn cancel_retries(&mut self) {
        for mut timer in self.retry_timers.drain(..) {
            timer.cancel();
        }
    }

    /// Termination path: cancel retries and release everything.
    pub fn shutdown(&mut self) {
        self.cancel_retries();
        self.reset();
    }

    /// Every purpose registered natively and the shared handler installed.
    pub fn fully_registered(&self) -> bool {
        self.handler_installed
            && Purpose::ALL
                .iter()
                .all(|p| self.bindings[p.index()].status == RegistrationStatus::Registered)
    }

    pub fn registration_status(&self, purpose: Purpose) -> RegistrationStatus {
        self.bindings[purpose.index()].status
    }

    pub fn fallback_active(&self, purpose: Purpose) -> bool {
        self.bindings[purpose.index()].fallback_active
    }

    pub fn pending_retries(&self) -> usize {
        self.retry_timers.len()
    }

    pub fn diagnostics(&self) -> HotkeyDiagnostics {
        let per = |p: Purpose| PurposeDiagnostics {
            status: self.bindings[p.index()].status,
            fallback_active: self.bindings[p.index()].fallback_active,
        };
        HotkeyDiagnostics {
            quick_add: per(Purpose::QuickAdd),
            toggle_window: per(Purpose::ToggleWindow),
            handler_installed: self.handler_installed,
            monitors_installed: self.monitors_installed,
            trusted: self.system.is_trusted(),
        }
    }

    /// The fallback combination label for a purpose, for diagnostics text.
    pub fn fallback_hint(purpose: Purpose) -> String {
        let combo = fallback_combo(purpose);
        format!("Cmd+Shift+{}", combo.character.to_ascii_uppercase())
    }

    fn prompt_for_permission_if_needed(&mut self) {
        let any_failed = Purpose::ALL
            .iter()
            .any(|p| matches!(self.bindings[p.index()].status, RegistrationStatus::Failed(_)));
        if !any_failed || self.permission_prompted {
            return;
        }
        if !self.system.is_trusted() {
            info!("accessibility not trusted; surfacing one-time permission prompt");
            self.system.prompt_for_permission();
            self.permission_prompted = true;
        }
    }
}
