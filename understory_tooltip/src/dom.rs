// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host document interfaces: measurement, mutation, and id generation.
//!
//! ## Coordinates
//!
//! [`Dom::bounding_rect`] reports viewport coordinates, like
//! `getBoundingClientRect`. [`Dom::set_position`] takes page coordinates, like
//! `style.left`/`style.top` on an absolutely positioned element in `body`.
//! The two differ by [`Dom::scroll_offset`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::overlay::OverlayMarkup;
use crate::types::Events;

/// The measurement and mutation layer the controller drives.
///
/// Implementations wrap a real document (for example through `web-sys`) or an
/// in-memory model such as [`HeadlessDom`](crate::headless::HeadlessDom).
pub trait Dom {
    /// Element handle. Handles are compared by identity.
    type Element: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Border box of `el` in viewport coordinates.
    fn bounding_rect(&self, el: Self::Element) -> Rect;

    /// Outer size of `el`, including borders.
    fn outer_size(&self, el: Self::Element) -> Size;

    /// Current page scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Size of the viewport.
    fn viewport(&self) -> Size;

    /// Whether `el` carries `class`.
    fn has_class(&self, el: Self::Element, class: &str) -> bool;

    /// The first `input` descendant of `el`, if any.
    fn find_input(&self, el: Self::Element) -> Option<Self::Element>;

    /// Look an element up by its `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Build the overlay subtree described by `markup` and append it to the
    /// end of the document body.
    fn append_overlay(&mut self, markup: &OverlayMarkup) -> Self::Element;

    /// Detach `el` from the document.
    fn remove(&mut self, el: Self::Element);

    /// Replace the full class attribute of `el`.
    fn set_class(&mut self, el: Self::Element, class: &str);

    /// Set an inline style property. An empty value clears the property.
    fn set_style(&mut self, el: Self::Element, property: &str, value: &str);

    /// Move an absolutely positioned element to `origin`, in page coordinates.
    fn set_position(&mut self, el: Self::Element, origin: Point) {
        self.set_style(el, "left", &format!("{}px", origin.x));
        self.set_style(el, "top", &format!("{}px", origin.y));
    }

    /// Start an opacity fade-in. Fire and forget.
    fn fade_in(&mut self, el: Self::Element, duration_ms: u32);

    /// Whether the primary pointing device is touch based.
    fn is_touch_device(&self) -> bool;

    /// Scrollable ancestors of `el`, outermost last. Include the document
    /// scroller if page scrolling should dismiss overlays.
    fn scrollable_parents(&self, el: Self::Element) -> Vec<Self::Element>;

    /// The controller now handles `events` on `el`; register real listeners.
    fn listen(&mut self, _el: Self::Element, _events: Events) {}

    /// The controller no longer handles `events` on `el`.
    fn unlisten(&mut self, _el: Self::Element, _events: Events) {}

    /// Scroll events on `container` should now reach the controller.
    fn listen_scroll(&mut self, _container: Self::Element) {}

    /// Scroll events on `container` are no longer needed.
    fn unlisten_scroll(&mut self, _container: Self::Element) {}
}

/// Source of fresh, unique ids.
pub trait IdSource {
    /// Return an id not returned before.
    fn next_id(&mut self) -> String;
}

/// Counter-based ids: `ut_id_1`, `ut_id_2`, and so on.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting from one.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("ut_id_{}", self.next)
    }
}
