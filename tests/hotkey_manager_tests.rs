//! Tests for the hotkey registration state machine, driven through a
//! scripted fake of the OS seam. Acquire/release pairing is asserted by
//! counting calls on both sides.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use stackle::hotkey::{
    HotkeyManager, HotkeySystem, KeyCombo, Purpose, RegistrationStatus, RetryTimer,
};

#[derive(Default)]
struct Calls {
    register: Vec<(Purpose, KeyCombo)>,
    unregister: Vec<Purpose>,
    handler_installs: usize,
    handler_removes: usize,
    monitor_installs: usize,
    monitor_removes: usize,
    prompts: usize,
    scheduled: Vec<Duration>,
    cancelled_timers: usize,
    gates: [bool; 2],
}

struct FakeTimer {
    cancelled: bool,
    calls: Rc<RefCell<Calls>>,
}

impl RetryTimer for FakeTimer {
    fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.calls.borrow_mut().cancelled_timers += 1;
        }
    }
}

/// Scripted fake: per-purpose registration status, handler/monitor install
/// outcomes and the trust flag are all configurable.
struct FakeSystem {
    status: [i32; 2],
    handler_ok: bool,
    monitors_ok: bool,
    trusted: bool,
    calls: Rc<RefCell<Calls>>,
}

impl FakeSystem {
    fn new() -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let system = FakeSystem {
            status: [0, 0],
            handler_ok: true,
            monitors_ok: true,
            trusted: true,
            calls: calls.clone(),
        };
        (system, calls)
    }
}

impl HotkeySystem for FakeSystem {
    type Timer = FakeTimer;

    fn register(&mut self, purpose: Purpose, combo: KeyCombo) -> i32 {
        self.calls.borrow_mut().register.push((purpose, combo));
        self.status[purpose.index()]
    }

    fn unregister(&mut self, purpose: Purpose) {
        self.calls.borrow_mut().unregister.push(purpose);
    }

    fn install_shared_handler(&mut self) -> bool {
        self.calls.borrow_mut().handler_installs += 1;
        self.handler_ok
    }

    fn remove_shared_handler(&mut self) {
        self.calls.borrow_mut().handler_removes += 1;
    }

    fn install_fallback_monitors(&mut self) -> bool {
        self.calls.borrow_mut().monitor_installs += 1;
        self.monitors_ok
    }

    fn remove_fallback_monitors(&mut self) {
        self.calls.borrow_mut().monitor_removes += 1;
    }

    fn set_fallback_active(&mut self, purpose: Purpose, active: bool) {
        self.calls.borrow_mut().gates[purpose.index()] = active;
    }

    fn is_trusted(&self) -> bool {
        self.trusted
    }

    fn prompt_for_permission(&mut self) {
        self.calls.borrow_mut().prompts += 1;
    }

    fn schedule_retry(&mut self, delay: Duration) -> FakeTimer {
        self.calls.borrow_mut().scheduled.push(delay);
        FakeTimer { cancelled: false, calls: self.calls.clone() }
    }
}

// === Registration cycle ===

#[test]
fn successful_cycle_registers_both_purposes_natively() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    for purpose in Purpose::ALL {
        assert_eq!(manager.registration_status(purpose), RegistrationStatus::Registered);
        assert!(!manager.fallback_active(purpose));
    }
    assert!(manager.fully_registered());
    assert_eq!(calls.borrow().register.len(), 2);
    assert_eq!(calls.borrow().monitor_installs, 0);
}

#[test]
fn handler_install_happens_exactly_once_per_cycle() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(calls.borrow().handler_installs, 1);
}

#[test]
fn os_failure_records_raw_status_and_activates_fallback() {
    let (mut system, calls) = FakeSystem::new();
    system.status[Purpose::QuickAdd.index()] = -9878;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(
        manager.registration_status(Purpose::QuickAdd),
        RegistrationStatus::Failed(-9878)
    );
    assert!(manager.fallback_active(Purpose::QuickAdd));
    // The other purpose stays native.
    assert_eq!(
        manager.registration_status(Purpose::ToggleWindow),
        RegistrationStatus::Registered
    );
    assert!(!manager.fallback_active(Purpose::ToggleWindow));
    // One shared monitor pair exists, gated only for the failed purpose.
    assert_eq!(calls.borrow().monitor_installs, 1);
    assert!(calls.borrow().gates[Purpose::QuickAdd.index()]);
    assert!(!calls.borrow().gates[Purpose::ToggleWindow.index()]);
}

#[test]
fn both_failing_skips_the_handler_install_entirely() {
    let (mut system, calls) = FakeSystem::new();
    system.status = [-1, -2];
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(calls.borrow().handler_installs, 0);
    assert!(manager.fallback_active(Purpose::QuickAdd));
    assert!(manager.fallback_active(Purpose::ToggleWindow));
    assert_eq!(manager.diagnostics().summary(), "Hotkeys: unavailable");
}

#[test]
fn handler_install_failure_degrades_registered_purposes_to_fallback() {
    let (mut system, calls) = FakeSystem::new();
    system.handler_ok = false;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    for purpose in Purpose::ALL {
        assert_eq!(manager.registration_status(purpose), RegistrationStatus::Registered);
        assert!(manager.fallback_active(purpose));
    }
    assert!(!manager.fully_registered());
    assert_eq!(calls.borrow().monitor_installs, 1);
    assert_eq!(manager.diagnostics().summary(), "Hotkeys: unavailable");
}

#[test]
fn partial_native_coverage_reports_fallback_summary() {
    let (mut system, _calls) = FakeSystem::new();
    system.status[Purpose::ToggleWindow.index()] = 7;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(manager.diagnostics().summary(), "Hotkeys: fallback");
}

// === Reset and idempotent re-registration ===

#[test]
fn reset_clears_everything() {
    let (mut system, calls) = FakeSystem::new();
    system.status[Purpose::QuickAdd.index()] = -1;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.reset();

    for purpose in Purpose::ALL {
        assert_eq!(manager.registration_status(purpose), RegistrationStatus::Unregistered);
        assert!(!manager.fallback_active(purpose));
    }
    let calls = calls.borrow();
    assert_eq!(calls.monitor_installs, calls.monitor_removes);
    assert_eq!(calls.handler_installs, calls.handler_removes);
    assert_eq!(calls.gates, [false, false]);
}

#[test]
fn reset_is_idempotent() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.reset();
    let after_first = calls.borrow().unregister.len();
    manager.reset();
    manager.reset();

    let calls = calls.borrow();
    assert_eq!(calls.unregister.len(), after_first);
    assert_eq!(calls.handler_removes, 1);
}

#[test]
fn refresh_twice_never_leaks_handles() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.refresh();
    manager.shutdown();

    let calls = calls.borrow();
    // Every acquire has a matching release.
    assert_eq!(calls.register.len(), calls.unregister.len());
    assert_eq!(calls.handler_installs, calls.handler_removes);
    assert_eq!(calls.monitor_installs, calls.monitor_removes);
}

#[test]
fn refresh_twice_yields_the_same_final_state_as_once() {
    let (mut system, _calls) = FakeSystem::new();
    system.status[Purpose::QuickAdd.index()] = -1;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    let first = manager.diagnostics();
    manager.refresh();
    assert_eq!(manager.diagnostics(), first);
}

// === Retry policy ===

#[test]
fn startup_retries_follow_the_bounded_schedule() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.schedule_startup_retries();

    assert_eq!(manager.pending_retries(), 3);
    assert_eq!(
        calls.borrow().scheduled,
        vec![Duration::from_secs(1), Duration::from_secs(2), Duration::from_secs(4)]
    );
}

#[test]
fn retry_is_skipped_when_already_fully_registered() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.schedule_startup_retries();
    let registrations_before = calls.borrow().register.len();

    manager.on_retry_opportunity();

    // No new registration cycle, and the remaining timers are cancelled.
    assert_eq!(calls.borrow().register.len(), registrations_before);
    assert_eq!(calls.borrow().cancelled_timers, 3);
    assert_eq!(manager.pending_retries(), 0);
}

#[test]
fn retry_runs_a_cycle_while_degraded_and_cancels_once_it_succeeds() {
    let (mut system, calls) = FakeSystem::new();
    system.handler_ok = false;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.schedule_startup_retries();
    assert!(!manager.fully_registered());

    manager.on_retry_opportunity();
    // Still degraded (handler keeps failing): timers stay pending.
    assert_eq!(manager.pending_retries(), 3);
    assert!(calls.borrow().register.len() >= 4);
}

#[test]
fn cancelling_before_any_fire_means_zero_further_attempts() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.schedule_startup_retries();
    manager.cancel_retries();
    manager.cancel_retries(); // idempotent

    assert_eq!(calls.borrow().cancelled_timers, 3);
    assert_eq!(manager.pending_retries(), 0);
    assert!(calls.borrow().register.is_empty());
}

#[test]
fn shutdown_cancels_retries_and_releases_bindings() {
    let (system, calls) = FakeSystem::new();
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.schedule_startup_retries();
    manager.shutdown();

    let calls = calls.borrow();
    assert_eq!(calls.cancelled_timers, 3);
    assert_eq!(calls.register.len(), calls.unregister.len());
}

// === Permission coupling ===

#[test]
fn untrusted_failure_prompts_exactly_once_across_retries() {
    let (mut system, calls) = FakeSystem::new();
    system.status = [-1, -1];
    system.trusted = false;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();
    manager.on_retry_opportunity();
    manager.on_retry_opportunity();

    assert_eq!(calls.borrow().prompts, 1);
}

#[test]
fn trusted_failure_does_not_prompt() {
    let (mut system, calls) = FakeSystem::new();
    system.status = [-1, -1];
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(calls.borrow().prompts, 0);
}

#[test]
fn successful_registration_never_prompts_even_when_untrusted() {
    let (mut system, calls) = FakeSystem::new();
    system.trusted = false;
    let mut manager = HotkeyManager::new(system);

    manager.refresh();

    assert_eq!(calls.borrow().prompts, 0);
}
