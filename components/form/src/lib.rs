//! Form items and label association for waterswitch controls.
//!
//! A [`FormItem`] owns a caption and the set of labelable controls under it.
//! Controls register through [`FormItem::register`]; the item alone decides
//! whether its caption points at one control or marks a group.

pub mod item;

pub use item::{
    ControlState, FormItem, LabelAssociation, Labelable, Registration, Role, ValidateTrigger,
};
