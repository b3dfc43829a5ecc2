//! Form items: a caption plus the controls it labels.
//!
//! Controls register themselves with the item they live under. The item then
//! decides how its caption is associated: a `for` pointing at the single
//! registered control, or a `group` role when several controls share it.

use core::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use nami::{Binding, Signal, binding};
use waterswitch_core::{Identity, Size, impl_debug};

/// A control that a form item can point its label at.
pub trait Labelable {
    /// The control's resolved id.
    fn identity(&self) -> Identity;
    /// Whether the control currently refuses interaction.
    fn is_disabled(&self) -> bool;
    /// Whether the control is currently on.
    fn is_checked(&self) -> bool;
}

/// What a control exposes to the label system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// The control id.
    pub id: Identity,
    /// Whether the control is disabled.
    pub disabled: bool,
    /// Whether the control is checked.
    pub checked: bool,
}

/// The ARIA role a form item takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Several labelable controls share one caption.
    Group,
}

impl Role {
    /// The attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
        }
    }
}

/// How the caption of a form item is tied to its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAssociation {
    /// No labelable control is registered.
    Detached,
    /// The label points at one control (`for="<id>"`).
    For(Identity),
    /// The item is a group, labelled by its own caption (`aria-labelledby`).
    Group {
        /// Id of the caption element.
        labelled_by: Identity,
    },
}

/// When a validation pass was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateTrigger {
    /// The control committed a new value.
    Change,
    /// The control lost focus.
    Blur,
}

struct ItemInner {
    label: RefCell<Option<String>>,
    label_id: Identity,
    for_id: RefCell<Option<Identity>>,
    disabled: RefCell<Binding<bool>>,
    size: Cell<Option<Size>>,
    controls: RefCell<Vec<(usize, Weak<dyn Labelable>)>>,
    next_key: Cell<usize>,
    validators: RefCell<Vec<Rc<dyn Fn(ValidateTrigger)>>>,
}

/// A labelled row in a form.
///
/// Cloning yields another handle to the same item.
///
/// # Examples
///
/// ```ignore
/// let item = FormItem::new().label("Notifications");
/// let switch = Switch::new(&enabled).form_item(&item).mount();
/// assert_eq!(item.label_for(), Some(switch.id()));
/// ```
#[derive(Clone)]
pub struct FormItem(Rc<ItemInner>);

impl_debug!(FormItem);

impl Default for FormItem {
    fn default() -> Self {
        Self::new()
    }
}

impl FormItem {
    /// Creates an empty, enabled item without a caption.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(ItemInner {
            label: RefCell::new(None),
            label_id: waterswitch_core::id::global().generate(),
            for_id: RefCell::new(None),
            disabled: RefCell::new(binding(false)),
            size: Cell::new(None),
            controls: RefCell::new(Vec::new()),
            next_key: Cell::new(0),
            validators: RefCell::new(Vec::new()),
        }))
    }

    /// Sets the caption.
    #[must_use]
    pub fn label(self, label: impl Into<String>) -> Self {
        *self.0.label.borrow_mut() = Some(label.into());
        self
    }

    /// Points the label at `id` regardless of the registered controls.
    #[must_use]
    pub fn for_id(self, id: impl Into<Identity>) -> Self {
        *self.0.for_id.borrow_mut() = Some(id.into());
        self
    }

    /// Disables every control in the item.
    #[must_use]
    pub fn disabled(self, disabled: bool) -> Self {
        *self.0.disabled.borrow_mut() = binding(disabled);
        self
    }

    /// Ties the disabled state of the item to a caller-owned binding.
    #[must_use]
    pub fn disabled_when(self, disabled: &Binding<bool>) -> Self {
        *self.0.disabled.borrow_mut() = disabled.clone();
        self
    }

    /// Sets the size inherited by controls that do not choose one.
    #[must_use]
    pub fn size(self, size: Size) -> Self {
        self.0.size.set(Some(size));
        self
    }

    /// Registers a handler run on every [`FormItem::validate`] call.
    #[must_use]
    pub fn on_validate(self, handler: impl Fn(ValidateTrigger) + 'static) -> Self {
        self.0.validators.borrow_mut().push(Rc::new(handler));
        self
    }

    /// The caption, if any.
    #[must_use]
    pub fn caption(&self) -> Option<String> {
        self.0.label.borrow().clone()
    }

    /// Id of the caption element.
    #[must_use]
    pub fn label_id(&self) -> Identity {
        self.0.label_id.clone()
    }

    /// Whether the item disables its controls.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.0.disabled.borrow().get()
    }

    /// The size controls inherit, if one was set.
    #[must_use]
    pub fn inherited_size(&self) -> Option<Size> {
        self.0.size.get()
    }

    /// Adds a control to the item.
    ///
    /// The control stays registered until the returned [`Registration`] is dropped.
    pub fn register(&self, control: Weak<dyn Labelable>) -> Registration {
        let key = self.0.next_key.get();
        self.0.next_key.set(key + 1);
        self.0.controls.borrow_mut().push((key, control));
        tracing::debug!(target: "waterswitch::form", key, "control registered");
        Registration {
            item: Rc::downgrade(&self.0),
            key,
        }
    }

    /// The state of every live registered control, in registration order.
    #[must_use]
    pub fn controls(&self) -> Vec<ControlState> {
        self.live()
            .into_iter()
            .map(|control| ControlState {
                id: control.identity(),
                disabled: control.is_disabled(),
                checked: control.is_checked(),
            })
            .collect()
    }

    // Upgraded handles are released only after the borrow ends, so a control
    // dropped here can unregister itself.
    fn live(&self) -> Vec<Rc<dyn Labelable>> {
        self.0
            .controls
            .borrow()
            .iter()
            .filter_map(|(_, control)| control.upgrade())
            .collect()
    }

    /// How the caption is tied to the controls.
    ///
    /// An explicit [`FormItem::for_id`] always wins: the caller has named the
    /// element the caption belongs to, so the item is never turned into a group.
    /// Several controls form a group only under a caption, since the group is
    /// labelled by it.
    #[must_use]
    pub fn association(&self) -> LabelAssociation {
        if let Some(id) = self.0.for_id.borrow().clone() {
            return LabelAssociation::For(id);
        }
        let live = self.live();
        match live.as_slice() {
            [] => LabelAssociation::Detached,
            [control] => LabelAssociation::For(control.identity()),
            _ if self.0.label.borrow().is_none() => LabelAssociation::Detached,
            _ => LabelAssociation::Group {
                labelled_by: self.label_id(),
            },
        }
    }

    /// The `for` attribute of the caption, set when it labels exactly one control.
    #[must_use]
    pub fn label_for(&self) -> Option<Identity> {
        match self.association() {
            LabelAssociation::For(id) => Some(id),
            _ => None,
        }
    }

    /// The `role` attribute of the item, set when it groups several controls.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self.association() {
            LabelAssociation::Group { .. } => Some(Role::Group),
            _ => None,
        }
    }

    /// Requests a validation pass.
    pub fn validate(&self, trigger: ValidateTrigger) {
        // Handlers may call back into the item.
        let validators = self.0.validators.borrow().clone();
        for validator in validators {
            validator(trigger);
        }
    }
}

/// Keeps a control registered with a [`FormItem`].
#[derive(Debug)]
pub struct Registration {
    item: Weak<ItemInner>,
    key: usize,
}

impl Registration {
    /// The item this registration belongs to, if it is still alive.
    #[must_use]
    pub fn item(&self) -> Option<FormItem> {
        self.item.upgrade().map(FormItem)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(item) = self.item.upgrade() {
            item.controls.borrow_mut().retain(|(key, _)| *key != self.key);
            tracing::debug!(target: "waterswitch::form", key = self.key, "control unregistered");
        }
    }
}
