// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: placement sides, modifier flags, trigger modes, and input events.
//!
//! ## Overview
//!
//! These types describe the tooltip protocol between a host and the
//! [`TooltipController`](crate::controller::TooltipController).
//! Hosts forward [`TooltipEvent`]s for elements whose [`Events`] are bound,
//! and the controller decides when overlays appear and where.

/// Side of the anchor an overlay is placed on.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor, horizontally centered.
    Top,
    /// Below the anchor, horizontally centered.
    Bottom,
    /// Left of the anchor, vertically centered.
    Left,
    /// Right of the anchor, vertically centered.
    #[default]
    Right,
}

impl Side {
    /// The lower-case name used in the directional class (`p-tooltip-{name}`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

bitflags::bitflags! {
    /// Modifier flags attached to a binding.
    ///
    /// Position flags select the primary [`Side`]; [`Modifiers::FOCUS`] selects
    /// [`TriggerMode::FocusBlur`]. With no flags the tooltip follows the pointer
    /// and prefers the right side.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Show on focus, hide on blur.
        const FOCUS  = 0b0000_0001;
        /// Prefer the top side.
        const TOP    = 0b0000_0010;
        /// Prefer the bottom side.
        const BOTTOM = 0b0000_0100;
        /// Prefer the left side.
        const LEFT   = 0b0000_1000;
        /// Prefer the right side.
        const RIGHT  = 0b0001_0000;
    }
}

impl Modifiers {
    /// Look up a single modifier by its binding name.
    ///
    /// Unknown names return `None` and are ignored by callers.
    pub fn from_binding_name(name: &str) -> Option<Self> {
        match name {
            "focus" => Some(Self::FOCUS),
            "top" => Some(Self::TOP),
            "bottom" => Some(Self::BOTTOM),
            "left" => Some(Self::LEFT),
            "right" => Some(Self::RIGHT),
            _ => None,
        }
    }

    /// Fold a sequence of names into a flag set, skipping unknown names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .filter_map(Self::from_binding_name)
            .fold(Self::empty(), |acc, m| acc | m)
    }

    /// The primary side requested by these flags.
    ///
    /// When several position flags are set the first of top, left, bottom wins;
    /// otherwise the side is [`Side::Right`].
    pub fn side(self) -> Side {
        if self.contains(Self::TOP) {
            Side::Top
        } else if self.contains(Self::LEFT) {
            Side::Left
        } else if self.contains(Self::BOTTOM) {
            Side::Bottom
        } else {
            Side::Right
        }
    }

    /// The trigger mode requested by these flags.
    pub fn trigger_mode(self) -> TriggerMode {
        if self.contains(Self::FOCUS) {
            TriggerMode::FocusBlur
        } else {
            TriggerMode::HoverClick
        }
    }
}

/// Which input family drives show/hide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TriggerMode {
    /// `focus` shows, `blur` hides.
    FocusBlur,
    /// `pointerenter` shows, `pointerleave` and `click` hide.
    #[default]
    HoverClick,
}

impl TriggerMode {
    /// The full listener set for this mode, including the escape key handler.
    pub fn events(self) -> Events {
        match self {
            Self::FocusBlur => Events::FOCUS | Events::BLUR | Events::KEY_DOWN,
            Self::HoverClick => {
                Events::POINTER_ENTER | Events::POINTER_LEAVE | Events::CLICK | Events::KEY_DOWN
            }
        }
    }
}

bitflags::bitflags! {
    /// Listener kinds bound on an effective target.
    ///
    /// The controller reports changes to this set through
    /// [`Dom::listen`](crate::dom::Dom::listen) and
    /// [`Dom::unlisten`](crate::dom::Dom::unlisten) and ignores events whose
    /// kind is not currently bound.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Events: u8 {
        /// `focus`.
        const FOCUS         = 0b0000_0001;
        /// `blur`.
        const BLUR          = 0b0000_0010;
        /// `pointerenter`.
        const POINTER_ENTER = 0b0000_0100;
        /// `pointerleave`.
        const POINTER_LEAVE = 0b0000_1000;
        /// `click`.
        const CLICK         = 0b0001_0000;
        /// `keydown`.
        const KEY_DOWN      = 0b0010_0000;
    }
}

/// Keys the controller distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// `Escape`.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Classify a `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Self {
        if code == "Escape" {
            Self::Escape
        } else {
            Self::Other
        }
    }
}

/// An input event delivered to an effective target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TooltipEvent {
    /// The target gained focus.
    Focus,
    /// The target lost focus.
    Blur,
    /// The pointer entered the target.
    PointerEnter,
    /// The pointer left the target.
    PointerLeave,
    /// The target was clicked.
    Click,
    /// A key was pressed while the target had focus.
    KeyDown(Key),
}

impl TooltipEvent {
    /// The listener kind that must be bound for this event to be handled.
    pub fn kind(self) -> Events {
        match self {
            Self::Focus => Events::FOCUS,
            Self::Blur => Events::BLUR,
            Self::PointerEnter => Events::POINTER_ENTER,
            Self::PointerLeave => Events::POINTER_LEAVE,
            Self::Click => Events::CLICK,
            Self::KeyDown(_) => Events::KEY_DOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_priority_follows_top_left_bottom() {
        assert_eq!(Modifiers::empty().side(), Side::Right);
        assert_eq!((Modifiers::BOTTOM | Modifiers::TOP).side(), Side::Top);
        assert_eq!((Modifiers::BOTTOM | Modifiers::LEFT).side(), Side::Left);
        assert_eq!((Modifiers::BOTTOM | Modifiers::RIGHT).side(), Side::Bottom);
        assert_eq!(Modifiers::RIGHT.side(), Side::Right);
    }

    #[test]
    fn names_fold_and_unknowns_are_skipped() {
        let m = Modifiers::from_names(["focus", "left", "sideways"]);
        assert_eq!(m, Modifiers::FOCUS | Modifiers::LEFT);
        assert_eq!(m.trigger_mode(), TriggerMode::FocusBlur);
        assert_eq!(Modifiers::from_names([]), Modifiers::empty());
    }

    #[test]
    fn binding_names_are_lower_case() {
        assert_eq!(Modifiers::from_binding_name("focus"), Some(Modifiers::FOCUS));
        assert_eq!(Modifiers::from_binding_name("bottom"), Some(Modifiers::BOTTOM));
        assert_eq!(Modifiers::from_binding_name("FOCUS"), None);
        assert_eq!(Modifiers::from_names(["TOP", "right"]), Modifiers::RIGHT);
    }

    #[test]
    fn both_modes_listen_for_keys() {
        assert!(TriggerMode::FocusBlur.events().contains(Events::KEY_DOWN));
        assert!(TriggerMode::HoverClick.events().contains(Events::KEY_DOWN));
        assert!(!TriggerMode::FocusBlur.events().contains(Events::CLICK));
        assert!(!TriggerMode::HoverClick.events().contains(Events::FOCUS));
    }

    #[test]
    fn event_kinds_match_listener_flags() {
        assert_eq!(TooltipEvent::KeyDown(Key::Other).kind(), Events::KEY_DOWN);
        assert_eq!(TooltipEvent::PointerLeave.kind(), Events::POINTER_LEAVE);
        assert_eq!(Key::from_code("Escape"), Key::Escape);
        assert_eq!(Key::from_code("Enter"), Key::Other);
    }
}
