//! A two-token switch whose value lives in a caller-owned binding.
//!
//! The switch never stores whether it is on. Every query compares the bound
//! value with the active token, and every approved click emits the opposite
//! token to the owner of the binding, optionally after a guard has been
//! consulted.

use core::future::Future;
use std::rc::{Rc, Weak};

use nami::{Binding, Signal, binding};
use waterswitch_core::{
    BeforeChange, GuardResult, Identity, Size, ToggleTokens, ToggleValue, Verdict, guard, impl_debug,
    task,
};
use waterswitch_form::{FormItem, Labelable, Registration, ValidateTrigger};

use crate::gate::{Attempt, ChangeGate, GateState};

const TARGET: &str = "waterswitch::switch";

/// Configuration for the [`Switch`] component.
#[non_exhaustive]
pub struct SwitchConfig {
    /// The externally owned value the switch reflects.
    pub value: Binding<ToggleValue>,
    /// The tokens the switch flips between.
    pub tokens: ToggleTokens,
    /// Explicit control id. A generated one is used when unset.
    pub id: Option<Identity>,
    /// Form field name.
    pub name: Option<String>,
    /// Whether user interaction is refused.
    pub disabled: Binding<bool>,
    /// Caller-managed loading flag. When unset, the switch shows loading while
    /// a deferred guard is pending.
    pub loading: Option<Binding<bool>>,
    /// Position in the tab order.
    pub tabindex: Option<i32>,
    /// Size variant. Falls back to the enclosing form item, then the default.
    pub size: Option<Size>,
    /// Width of the track, in points.
    pub width: Option<f32>,
    /// Text shown for the on state.
    pub active_text: Option<String>,
    /// Text shown for the off state.
    pub inactive_text: Option<String>,
    /// Show the state text inside the track.
    pub inline_prompt: bool,
    /// Accessible name.
    pub aria_label: Option<String>,
    /// Ask the enclosing form item to validate after each change.
    pub validate_event: bool,
    /// Guard consulted before a change is committed.
    pub before_change: Option<BeforeChange>,
    /// Receives every approved value. Defaults to writing the binding.
    pub on_update: Box<dyn Fn(ToggleValue)>,
    /// Listeners notified after `on_update`.
    pub on_change: Vec<Box<dyn Fn(&ToggleValue)>>,
    /// The form item this switch registers with.
    pub form_item: Option<FormItem>,
}

impl_debug!(SwitchConfig);

/// A control that flips a bound value between two tokens.
///
/// By default the tokens are `true` and `false`, and approved changes are
/// written straight back into the binding. Use [`Switch::controlled`] to
/// receive changes instead and decide yourself whether to apply them.
///
/// # Examples
///
/// ```ignore
/// // Plain boolean switch
/// switch(&wifi).mount()
///
/// // Custom tokens
/// Switch::new(&level)
///     .active_value("100")
///     .inactive_value("0")
///
/// // Ask the server first
/// Switch::new(&sync)
///     .before_change_async(|_| async { api::confirm().await })
/// ```
#[derive(Debug)]
pub struct Switch(SwitchConfig);

impl Switch {
    /// Creates a switch reflecting and writing `value`.
    #[must_use]
    pub fn new(value: &Binding<ToggleValue>) -> Self {
        let target = value.clone();
        Self::controlled(value, move |next| target.set(next))
    }

    /// Creates a switch reflecting `value` that hands approved values to
    /// `on_update` without writing them.
    ///
    /// If the owner ignores an update, the switch keeps showing the bound value.
    #[must_use]
    pub fn controlled(
        value: &Binding<ToggleValue>,
        on_update: impl Fn(ToggleValue) + 'static,
    ) -> Self {
        Self(SwitchConfig {
            value: value.clone(),
            tokens: ToggleTokens::default(),
            id: None,
            name: None,
            disabled: binding(false),
            loading: None,
            tabindex: None,
            size: None,
            width: None,
            active_text: None,
            inactive_text: None,
            inline_prompt: false,
            aria_label: None,
            validate_event: true,
            before_change: None,
            on_update: Box::new(on_update),
            on_change: Vec::new(),
            form_item: None,
        })
    }

    /// Sets the token meaning "on".
    #[must_use]
    pub fn active_value(mut self, value: impl Into<ToggleValue>) -> Self {
        self.0.tokens.active = value.into();
        self
    }

    /// Sets the token meaning "off".
    #[must_use]
    pub fn inactive_value(mut self, value: impl Into<ToggleValue>) -> Self {
        self.0.tokens.inactive = value.into();
        self
    }

    /// Uses `id` instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<Identity>) -> Self {
        self.0.id = Some(id.into());
        self
    }

    /// Sets the form field name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    /// Disables the switch.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.0.disabled = binding(disabled);
        self
    }

    /// Ties the disabled state to a caller-owned binding.
    #[must_use]
    pub fn disabled_when(mut self, disabled: &Binding<bool>) -> Self {
        self.0.disabled = disabled.clone();
        self
    }

    /// Lets the caller drive the loading flag.
    #[must_use]
    pub fn loading(mut self, loading: &Binding<bool>) -> Self {
        self.0.loading = Some(loading.clone());
        self
    }

    /// Sets the tab order index.
    #[must_use]
    pub fn tabindex(mut self, index: i32) -> Self {
        self.0.tabindex = Some(index);
        self
    }

    /// Sets the size variant.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.0.size = Some(size);
        self
    }

    /// Sets the track width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.0.width = Some(width);
        self
    }

    /// Sets the text shown for the on state.
    #[must_use]
    pub fn active_text(mut self, text: impl Into<String>) -> Self {
        self.0.active_text = Some(text.into());
        self
    }

    /// Sets the text shown for the off state.
    #[must_use]
    pub fn inactive_text(mut self, text: impl Into<String>) -> Self {
        self.0.inactive_text = Some(text.into());
        self
    }

    /// Shows the state text inside the track.
    #[must_use]
    pub fn inline_prompt(mut self, inline: bool) -> Self {
        self.0.inline_prompt = inline;
        self
    }

    /// Sets the accessible name.
    #[must_use]
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.0.aria_label = Some(label.into());
        self
    }

    /// Whether a committed change asks the form item to validate.
    #[must_use]
    pub fn validate_event(mut self, validate: bool) -> Self {
        self.0.validate_event = validate;
        self
    }

    /// Consults `guard` with the candidate value before every change.
    ///
    /// The guard may return a `bool` or a [`Deferred`](waterswitch_core::Deferred).
    #[must_use]
    pub fn before_change<F, R>(mut self, guard: F) -> Self
    where
        F: Fn(&ToggleValue) -> R + 'static,
        R: Into<GuardResult>,
    {
        self.0.before_change = Some(BeforeChange::new(guard));
        self
    }

    /// Consults an asynchronous `guard` before every change.
    #[must_use]
    pub fn before_change_async<F, Fut>(mut self, guard: F) -> Self
    where
        F: Fn(&ToggleValue) -> Fut + 'static,
        Fut: Future<Output = Verdict> + 'static,
    {
        self.0.before_change = Some(BeforeChange::deferred(guard));
        self
    }

    /// Adds a listener notified after each approved value is emitted.
    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(&ToggleValue) + 'static) -> Self {
        self.0.on_change.push(Box::new(handler));
        self
    }

    /// Registers the switch with `item` once mounted.
    #[must_use]
    pub fn form_item(mut self, item: &FormItem) -> Self {
        self.0.form_item = Some(item.clone());
        self
    }

    /// The configuration built so far.
    #[must_use]
    pub const fn config(&self) -> &SwitchConfig {
        &self.0
    }

    /// Brings the switch to life.
    ///
    /// The id is resolved here, once. The returned controller stays registered
    /// with its form item until it is dropped, even while a guard is pending.
    #[must_use]
    pub fn mount(self) -> SwitchController {
        let mut config = self.0;
        let id = Identity::resolve(config.id.take());
        let gate = ChangeGate::new(config.before_change.take());
        let inner = Rc::new(Inner { id, config, gate });
        let registration = inner.config.form_item.as_ref().map(|item| {
            let weak: Weak<dyn Labelable> = Rc::<Inner>::downgrade(&inner);
            item.register(weak)
        });
        SwitchController {
            inner,
            registration,
        }
    }
}

/// Creates a boolean [`Switch`] bound to `value`.
///
/// See [`Switch`] for more details.
#[must_use]
pub fn switch(value: &Binding<ToggleValue>) -> Switch {
    Switch::new(value)
}

struct Inner {
    id: Identity,
    config: SwitchConfig,
    gate: ChangeGate,
}

impl Inner {
    fn bound(&self) -> ToggleValue {
        self.config.value.get()
    }

    fn checked(&self) -> bool {
        self.config.tokens.is_checked(&self.bound())
    }

    fn disabled(&self) -> bool {
        self.config.disabled.get()
            || self
                .config
                .form_item
                .as_ref()
                .is_some_and(FormItem::is_disabled)
    }

    fn loading(&self) -> bool {
        self.config
            .loading
            .as_ref()
            .map_or_else(|| self.gate.is_pending(), |flag| flag.get())
    }

    fn busy(&self) -> bool {
        self.disabled() || self.loading() || self.gate.is_pending()
    }

    fn settle(&self, verdict: Verdict) -> Attempt {
        match guard::decide(verdict) {
            Ok(()) => {
                let next = self.config.tokens.flip(&self.bound());
                self.emit(&next);
                Attempt::Approved(next)
            }
            Err(denial) => {
                tracing::warn!(
                    target: TARGET,
                    id = %self.id,
                    reason = %denial,
                    "change denied"
                );
                Attempt::Denied(denial)
            }
        }
    }

    fn emit(&self, next: &ToggleValue) {
        let was_checked = self.checked();
        tracing::debug!(target: TARGET, id = %self.id, value = %next, "change approved");
        (self.config.on_update)(next.clone());
        for listener in &self.config.on_change {
            listener(next);
        }
        if self.config.validate_event
            && self.checked() != was_checked
            && let Some(item) = &self.config.form_item
        {
            item.validate(ValidateTrigger::Change);
        }
    }
}

impl Labelable for Inner {
    fn identity(&self) -> Identity {
        self.id.clone()
    }

    fn is_disabled(&self) -> bool {
        self.disabled() || self.loading()
    }

    fn is_checked(&self) -> bool {
        self.checked()
    }
}

/// Accessibility attributes of a mounted switch.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchAria {
    /// Always `"switch"`.
    pub role: &'static str,
    /// The control id.
    pub id: Identity,
    /// `aria-checked`.
    pub checked: bool,
    /// `aria-disabled`; also set while loading.
    pub disabled: bool,
    /// `aria-busy`.
    pub busy: bool,
    /// `aria-label`.
    pub label: Option<String>,
    /// Form field name.
    pub name: Option<String>,
    /// Tab order index.
    pub tabindex: Option<i32>,
    /// The token submitted when on.
    pub true_value: ToggleValue,
    /// The token submitted when off.
    pub false_value: ToggleValue,
}

/// A mounted [`Switch`].
///
/// All state is derived on demand from the bound value and the gate, so a
/// backend can render straight from these accessors.
///
/// Dropping the controller unregisters it from its form item. A guard still
/// pending at that point is not cancelled; it settles and emits as usual.
pub struct SwitchController {
    inner: Rc<Inner>,
    registration: Option<Registration>,
}

impl_debug!(SwitchController);

impl SwitchController {
    /// The control id. Stable for the lifetime of the controller.
    #[must_use]
    pub fn id(&self) -> Identity {
        self.inner.id.clone()
    }

    /// The bound value as currently owned by the caller.
    #[must_use]
    pub fn value(&self) -> ToggleValue {
        self.inner.bound()
    }

    /// Whether the bound value equals the active token.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.inner.checked()
    }

    /// Whether the switch or its form item is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.inner.disabled()
    }

    /// Whether the loading affordance is shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading()
    }

    /// Whether a guard evaluation is outstanding.
    #[must_use]
    pub fn gate_state(&self) -> GateState {
        self.inner.gate.state()
    }

    /// The effective size variant.
    #[must_use]
    pub fn size(&self) -> Size {
        self.inner
            .config
            .size
            .or_else(|| self.inner.config.form_item.as_ref().and_then(FormItem::inherited_size))
            .unwrap_or_default()
    }

    /// The form item this switch is registered with, while both are alive.
    #[must_use]
    pub fn form_item(&self) -> Option<FormItem> {
        self.registration.as_ref().and_then(Registration::item)
    }

    /// The configuration the switch was mounted with.
    #[must_use]
    pub fn config(&self) -> &SwitchConfig {
        &self.inner.config
    }

    /// The accessibility attributes for the current state.
    #[must_use]
    pub fn aria(&self) -> SwitchAria {
        let config = &self.inner.config;
        SwitchAria {
            role: "switch",
            id: self.inner.id.clone(),
            checked: self.checked(),
            disabled: self.is_disabled() || self.is_loading(),
            busy: self.is_loading(),
            label: config.aria_label.clone(),
            name: config.name.clone(),
            tabindex: config.tabindex,
            true_value: config.tokens.active.clone(),
            false_value: config.tokens.inactive.clone(),
        }
    }

    /// Handles a user click.
    ///
    /// Disabled, loading or pending switches ignore the click without consulting
    /// the guard. Otherwise the guard decides; a synchronous answer is applied
    /// before returning, a deferred one once it settles on the local task pool.
    /// Denials are logged once and never surface as errors.
    pub fn toggle(&self) -> Attempt {
        let inner = &self.inner;
        if inner.busy() {
            tracing::trace!(target: TARGET, id = %inner.id, "toggle ignored");
            return Attempt::Ignored;
        }

        let candidate = inner.config.tokens.flip(&inner.bound());
        match inner.gate.evaluate(&candidate) {
            Ok(verdict) => inner.settle(verdict),
            Err(deferred) => {
                inner.gate.set_state(GateState::Pending);
                let this = Rc::clone(inner);
                let spawned = task::spawn_local(async move {
                    let verdict = deferred.await;
                    this.gate.set_state(GateState::Idle);
                    this.settle(verdict);
                });
                match spawned {
                    Ok(()) => Attempt::Pending,
                    Err(error) => {
                        inner.gate.set_state(GateState::Idle);
                        inner.settle(Err(error.into()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::{Cell, RefCell};

    use futures::channel::oneshot;
    use waterswitch_core::{Deferred, Denial, GuardError};

    use super::*;
    use crate::test_support::capture_warnings;

    type Slot = Rc<RefCell<Option<oneshot::Sender<Verdict>>>>;

    fn value(initial: impl Into<ToggleValue>) -> Binding<ToggleValue> {
        let initial: ToggleValue = initial.into();
        binding(initial)
    }

    /// A guard whose verdicts are delivered by hand through `slot`.
    fn manual_guard(slot: &Slot, calls: &Rc<Cell<usize>>) -> impl Fn(&ToggleValue) -> Deferred + use<> {
        let slot = slot.clone();
        let calls = calls.clone();
        move |_| {
            calls.set(calls.get() + 1);
            let (sender, receiver) = oneshot::channel();
            *slot.borrow_mut() = Some(sender);
            Deferred::new(async move { receiver.await? })
        }
    }

    fn resolve(slot: &Slot, verdict: Verdict) {
        let sender = slot.borrow_mut().take().expect("no pending guard");
        sender.send(verdict).expect("guard dropped");
        task::run_until_stalled();
    }

    #[test]
    fn value_correctly_updates() {
        let model = value(true);
        let switch = Switch::new(&model).mount();
        assert!(switch.checked());

        assert_eq!(switch.toggle(), Attempt::Approved(false.into()));
        assert!(!switch.checked());
        assert_eq!(model.get(), ToggleValue::Bool(false));

        switch.toggle();
        assert!(switch.checked());
        assert_eq!(model.get(), ToggleValue::Bool(true));
    }

    #[test]
    fn change_listeners_fire_once_per_approval() {
        let model = value(true);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let switch = Switch::new(&model)
            .on_change(move |value| log.borrow_mut().push(value.clone()))
            .mount();

        switch.toggle();
        assert_eq!(*seen.borrow(), [ToggleValue::Bool(false)]);
    }

    #[test]
    fn disabled_switch_ignores_clicks() {
        let (warnings, _guard) = capture_warnings();
        let model = value(true);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let switch = Switch::new(&model)
            .disabled(true)
            .before_change(move |_| {
                counter.set(counter.get() + 1);
                true
            })
            .mount();

        for _ in 0..3 {
            assert_eq!(switch.toggle(), Attempt::Ignored);
        }
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(calls.get(), 0);
        assert_eq!(warnings.count(), 0);
    }

    #[test]
    fn disabled_binding_is_read_live() {
        let model = value(false);
        let disabled: Binding<bool> = binding(true);
        let switch = Switch::new(&model).disabled_when(&disabled).mount();

        assert_eq!(switch.toggle(), Attempt::Ignored);
        disabled.set(false);
        assert_eq!(switch.toggle(), Attempt::Approved(true.into()));
    }

    #[test]
    fn custom_string_tokens() {
        let model = value("100");
        let switch = Switch::new(&model)
            .active_value("100")
            .inactive_value("0")
            .mount();

        assert!(switch.checked());
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::from("0"));
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::from("100"));
    }

    #[test]
    fn active_value_may_be_false() {
        let model = value(false);
        let switch = Switch::new(&model)
            .active_value(false)
            .inactive_value(true)
            .mount();

        assert!(switch.checked());
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert!(!switch.checked());
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::Bool(false));
    }

    #[test]
    fn bound_value_is_the_single_source_of_truth() {
        let model = value(true);
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let log = emitted.clone();
        let switch = Switch::controlled(&model, move |next| log.borrow_mut().push(next)).mount();

        assert!(switch.checked());
        switch.toggle();
        assert_eq!(*emitted.borrow(), [ToggleValue::Bool(false)]);
        assert!(switch.checked());
        assert!(switch.aria().checked);
    }

    #[test]
    fn external_writes_are_reflected() {
        let model = value(false);
        let switch = Switch::new(&model).mount();

        model.set(ToggleValue::from(true));
        assert!(switch.checked());
        model.set(ToggleValue::from(false));
        assert!(!switch.checked());
    }

    #[test]
    fn stray_bound_value_reads_unchecked() {
        let model = value("maybe");
        let switch = Switch::new(&model)
            .active_value("yes")
            .inactive_value("no")
            .mount();

        assert!(!switch.checked());
        assert_eq!(switch.toggle(), Attempt::Approved("yes".into()));
    }

    #[test]
    fn sync_guard_false_denies_with_one_warning() {
        let (warnings, _guard) = capture_warnings();
        let model = value(true);
        let allow = Rc::new(Cell::new(false));
        let answer = allow.clone();
        let switch = Switch::new(&model).before_change(move |_| answer.get()).mount();

        assert_eq!(switch.toggle(), Attempt::Denied(Denial::Refused));
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 1);
        assert!(!switch.is_loading());

        allow.set(true);
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::Bool(false));
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 1);
    }

    #[test]
    fn guard_receives_the_candidate() {
        let model = value("0");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let switch = Switch::new(&model)
            .active_value("100")
            .inactive_value("0")
            .before_change(move |candidate| {
                log.borrow_mut().push(candidate.clone());
                true
            })
            .mount();

        switch.toggle();
        switch.toggle();
        assert_eq!(*seen.borrow(), [ToggleValue::from("100"), ToggleValue::from("0")]);
    }

    #[test]
    fn approving_guard_round_trips() {
        let model = value(1);
        let switch = Switch::new(&model)
            .active_value(1)
            .inactive_value(0)
            .before_change(|_| true)
            .mount();

        switch.toggle();
        switch.toggle();
        assert_eq!(model.get(), ToggleValue::from(1));
    }

    #[test]
    fn deferred_guard_with_caller_loading_flag() {
        let (warnings, _guard) = capture_warnings();
        let model = value(true);
        let loading: Binding<bool> = binding(false);
        let succeed = Rc::new(Cell::new(false));

        let flag = loading.clone();
        let outcome = succeed.clone();
        let switch = Switch::new(&model)
            .loading(&loading)
            .before_change_async(move |_| {
                flag.set(true);
                let flag = flag.clone();
                let ok = outcome.get();
                async move {
                    flag.set(false);
                    if ok {
                        Ok(true)
                    } else {
                        Err(GuardError::rejected("Error"))
                    }
                }
            })
            .mount();

        assert_eq!(switch.toggle(), Attempt::Pending);
        assert!(switch.is_loading());
        task::run_until_stalled();
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 1);
        assert!(!switch.is_loading());

        warnings.reset();
        succeed.set(true);
        switch.toggle();
        task::run_until_stalled();
        assert_eq!(model.get(), ToggleValue::Bool(false));
        assert_eq!(warnings.count(), 0);

        switch.toggle();
        task::run_until_stalled();
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 0);
    }

    #[test]
    fn pending_guard_drops_further_attempts() {
        let (warnings, _guard) = capture_warnings();
        let model = value(false);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let emitted = Rc::new(Cell::new(0));
        let count = emitted.clone();
        let target = model.clone();
        let switch = Switch::controlled(&model, move |next| {
            count.set(count.get() + 1);
            target.set(next);
        })
        .before_change(manual_guard(&slot, &calls))
        .mount();

        assert_eq!(switch.toggle(), Attempt::Pending);
        assert_eq!(switch.gate_state(), GateState::Pending);
        task::run_until_stalled();

        assert_eq!(switch.toggle(), Attempt::Ignored);
        assert_eq!(switch.toggle(), Attempt::Ignored);
        assert_eq!(calls.get(), 1);
        assert_eq!(emitted.get(), 0);

        resolve(&slot, Ok(true));
        assert_eq!(switch.gate_state(), GateState::Idle);
        assert_eq!(emitted.get(), 1);
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 0);
    }

    #[test]
    fn implicit_loading_tracks_pending_guard() {
        let (warnings, _guard) = capture_warnings();
        let model = value(false);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let emitted = Rc::new(Cell::new(0));
        let count = emitted.clone();
        let switch = Switch::new(&model)
            .before_change(manual_guard(&slot, &calls))
            .on_change(move |_| count.set(count.get() + 1))
            .mount();

        assert!(!switch.is_loading());
        switch.toggle();
        assert!(switch.is_loading());
        assert!(switch.aria().busy);

        resolve(&slot, Err(GuardError::rejected("nope")));
        assert!(!switch.is_loading());
        assert!(!switch.aria().busy);
        assert_eq!(model.get(), ToggleValue::Bool(false));
        assert_eq!(emitted.get(), 0);
        assert_eq!(warnings.count(), 1);
    }

    #[test]
    fn pending_guard_outlives_its_controller() {
        let (warnings, _guard) = capture_warnings();
        let model = value(false);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let log = emitted.clone();
        let switch = Switch::new(&model)
            .before_change(manual_guard(&slot, &calls))
            .on_change(move |next| log.borrow_mut().push(next.clone()))
            .mount();

        assert_eq!(switch.toggle(), Attempt::Pending);
        drop(switch);

        resolve(&slot, Ok(true));
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(*emitted.borrow(), [ToggleValue::Bool(true)]);
        assert_eq!(warnings.count(), 0);
    }

    #[test]
    fn spawn_failure_is_a_denial() {
        let (warnings, _guard) = capture_warnings();
        let model = value(false);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let switch = Switch::new(&model)
            .before_change(manual_guard(&slot, &calls))
            .mount();

        task::shutdown();
        let attempt = switch.toggle();
        assert!(matches!(
            attempt,
            Attempt::Denied(Denial::Failed(GuardError::Spawn(_)))
        ));
        assert_eq!(calls.get(), 1);
        assert_eq!(switch.gate_state(), GateState::Idle);
        assert!(!switch.is_loading());
        assert_eq!(model.get(), ToggleValue::Bool(false));
        assert_eq!(warnings.count(), 1);
    }

    #[test]
    fn deferred_false_is_a_denial() {
        let (warnings, _guard) = capture_warnings();
        let model = value(false);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let switch = Switch::new(&model)
            .before_change(manual_guard(&slot, &calls))
            .mount();

        switch.toggle();
        resolve(&slot, Ok(false));
        assert_eq!(model.get(), ToggleValue::Bool(false));
        assert_eq!(warnings.count(), 1);
        assert_eq!(switch.gate_state(), GateState::Idle);
    }

    #[test]
    fn dropped_guard_sender_is_a_denial() {
        let (warnings, _guard) = capture_warnings();
        let model = value(true);
        let slot = Slot::default();
        let calls = Rc::new(Cell::new(0));
        let switch = Switch::new(&model)
            .before_change(manual_guard(&slot, &calls))
            .mount();

        switch.toggle();
        drop(slot.borrow_mut().take());
        task::run_until_stalled();
        assert_eq!(model.get(), ToggleValue::Bool(true));
        assert_eq!(warnings.count(), 1);
        assert!(!switch.is_loading());
    }

    #[test]
    fn explicit_loading_blocks_attempts() {
        let model = value(false);
        let loading: Binding<bool> = binding(true);
        let switch = Switch::new(&model).loading(&loading).mount();

        assert_eq!(switch.toggle(), Attempt::Ignored);
        assert!(switch.aria().disabled);
        loading.set(false);
        assert_eq!(switch.toggle(), Attempt::Approved(true.into()));
    }

    #[test]
    fn generated_id_is_stable_and_unique() {
        let model = value(false);
        let first = Switch::new(&model).mount();
        let second = Switch::new(&model).mount();

        assert_eq!(first.id(), first.id());
        first.toggle();
        assert_eq!(first.id(), first.aria().id);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn aria_reflects_configuration() {
        let model = value("on");
        let switch = Switch::new(&model)
            .active_value("on")
            .inactive_value("off")
            .id("wifi")
            .name("wifi")
            .tabindex(0)
            .aria_label("Wi-Fi")
            .mount();

        assert_eq!(
            switch.aria(),
            SwitchAria {
                role: "switch",
                id: "wifi".into(),
                checked: true,
                disabled: false,
                busy: false,
                label: Some("Wi-Fi".into()),
                name: Some("wifi".into()),
                tabindex: Some(0),
                true_value: "on".into(),
                false_value: "off".into(),
            }
        );
    }

    #[test]
    fn visual_options_pass_through() {
        let model = value(false);
        let switch = Switch::new(&model)
            .size(Size::Large)
            .width(100.0)
            .active_text("on")
            .inactive_text("off")
            .inline_prompt(true)
            .mount();

        assert_eq!(switch.size(), Size::Large);
        let config = switch.config();
        assert_eq!(config.width, Some(100.0));
        assert_eq!(config.active_text.as_deref(), Some("on"));
        assert_eq!(config.inactive_text.as_deref(), Some("off"));
        assert!(config.inline_prompt);
    }
}
