// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document for tests, demos, and server-side hosts.
//!
//! [`HeadlessDom`] keeps axis-aligned page boxes, class and style strings, and
//! the overlay markup the controller produced. It does no layout: elements
//! keep the size they were created with, and overlays take the size set with
//! [`HeadlessDom::set_overlay_size`].
//!
//! Removed overlays give their slot back: the handle is reused by the next
//! appended overlay, so a long-running host does not grow with every show.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_tooltip::dom::Dom;
//! use understory_tooltip::headless::HeadlessDom;
//!
//! let mut dom = HeadlessDom::new(Size::new(640.0, 480.0));
//! let el = dom.add_element(Rect::new(10.0, 10.0, 50.0, 30.0));
//! dom.add_class(el, "p-inputwrapper");
//! assert!(dom.has_class(el, "p-inputwrapper"));
//! dom.set_position(el, Point::new(20.0, 20.0));
//! assert_eq!(dom.bounding_rect(el), Rect::new(20.0, 20.0, 60.0, 40.0));
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::dom::Dom;
use crate::overlay::OverlayMarkup;
use crate::types::Events;

/// Size given to overlays until [`HeadlessDom::set_overlay_size`] is called.
pub const DEFAULT_OVERLAY_SIZE: Size = Size::new(120.0, 32.0);

#[derive(Clone, Debug, Default)]
struct Node {
    bounds: Rect,
    class: String,
    id: Option<String>,
    styles: BTreeMap<String, String>,
    input: Option<u32>,
    scroll_parents: Vec<u32>,
    markup: Option<OverlayMarkup>,
    listeners: Events,
    scroll_listeners: usize,
}

/// An in-memory [`Dom`] with `u32` element handles.
#[derive(Clone, Debug)]
pub struct HeadlessDom {
    nodes: Vec<Node>,
    free: Vec<u32>,
    body: Vec<u32>,
    viewport: Size,
    scroll: Vec2,
    touch: bool,
    overlay_size: Size,
    fades: Vec<(u32, u32)>,
}

impl HeadlessDom {
    /// An empty document with the given viewport.
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            body: Vec::new(),
            viewport,
            scroll: Vec2::ZERO,
            touch: false,
            overlay_size: DEFAULT_OVERLAY_SIZE,
            fades: Vec::new(),
        }
    }

    fn push(&mut self, node: Node) -> u32 {
        self.nodes.push(node);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Headless documents stay far below u32::MAX elements."
        )]
        let el = (self.nodes.len() - 1) as u32;
        el
    }

    fn push_overlay(&mut self, node: Node) -> u32 {
        match self.free.pop() {
            Some(el) => {
                if let Some(slot) = self.node_mut(el) {
                    *slot = node;
                }
                el
            }
            None => self.push(node),
        }
    }

    fn node(&self, el: u32) -> Option<&Node> {
        self.nodes.get(el as usize)
    }

    fn node_mut(&mut self, el: u32) -> Option<&mut Node> {
        self.nodes.get_mut(el as usize)
    }

    /// Add an element occupying `bounds` in page coordinates.
    pub fn add_element(&mut self, bounds: Rect) -> u32 {
        self.push(Node {
            bounds,
            ..Default::default()
        })
    }

    /// Add an element of `size` at the page origin, not reachable by id.
    pub fn add_detached(&mut self, size: Size) -> u32 {
        self.push(Node {
            bounds: Rect::from_origin_size(Point::ORIGIN, size),
            ..Default::default()
        })
    }

    /// Add an `input` inside `wrapper`, sharing its bounds.
    pub fn add_input(&mut self, wrapper: u32) -> u32 {
        let bounds = self.node(wrapper).map(|n| n.bounds).unwrap_or_default();
        let input = self.add_element(bounds);
        if let Some(node) = self.node_mut(wrapper) {
            node.input = Some(input);
        }
        input
    }

    /// Append `class` to the class list of `el`.
    pub fn add_class(&mut self, el: u32, class: &str) {
        if let Some(node) = self.node_mut(el) {
            if !node.class.is_empty() {
                node.class.push(' ');
            }
            node.class.push_str(class);
        }
    }

    /// Declare `container` a scrollable ancestor of `el`.
    pub fn add_scroll_parent(&mut self, el: u32, container: u32) {
        if let Some(node) = self.node_mut(el) {
            node.scroll_parents.push(container);
        }
    }

    /// Move `el` to new page bounds.
    pub fn set_bounds(&mut self, el: u32, bounds: Rect) {
        if let Some(node) = self.node_mut(el) {
            node.bounds = bounds;
        }
    }

    /// Size used for overlays appended from now on.
    pub fn set_overlay_size(&mut self, size: Size) {
        self.overlay_size = size;
    }

    /// Scroll the page.
    pub fn scroll_to(&mut self, offset: Vec2) {
        self.scroll = offset;
    }

    /// Resize the viewport.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Report a touch-based pointing device.
    pub fn set_touch(&mut self, touch: bool) {
        self.touch = touch;
    }

    /// Overlays currently in the body, in append order.
    pub fn overlays(&self) -> Vec<u32> {
        self.body
            .iter()
            .copied()
            .filter(|&el| self.node(el).is_some_and(|n| n.markup.is_some()))
            .collect()
    }

    /// Current class attribute of `el`.
    pub fn class(&self, el: u32) -> Option<&str> {
        self.node(el).map(|n| n.class.as_str())
    }

    /// Inline style `property` of `el`.
    pub fn style(&self, el: u32, property: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    /// Page-space origin of `el`.
    pub fn position(&self, el: u32) -> Option<Point> {
        self.node(el).map(|n| n.bounds.origin())
    }

    /// Serialized markup of an overlay, reflecting its current class.
    pub fn html(&self, el: u32) -> Option<String> {
        self.node(el)
            .and_then(|n| n.markup.as_ref())
            .map(OverlayMarkup::to_html)
    }

    /// Listener kinds the controller asked for on `el`.
    pub fn listeners(&self, el: u32) -> Events {
        self.node(el).map(|n| n.listeners).unwrap_or_default()
    }

    /// Number of scroll listeners registered on `container`.
    pub fn scroll_listeners(&self, container: u32) -> usize {
        self.node(container).map_or(0, |n| n.scroll_listeners)
    }

    /// Fade-ins started on overlays still in the body, as `(element, duration_ms)`.
    pub fn fades(&self) -> &[(u32, u32)] {
        &self.fades
    }
}

impl Dom for HeadlessDom {
    type Element = u32;

    fn bounding_rect(&self, el: u32) -> Rect {
        self.node(el)
            .map(|n| n.bounds - self.scroll)
            .unwrap_or_default()
    }

    fn outer_size(&self, el: u32) -> Size {
        self.node(el).map(|n| n.bounds.size()).unwrap_or_default()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn has_class(&self, el: u32, class: &str) -> bool {
        self.node(el)
            .is_some_and(|n| n.class.split_whitespace().any(|c| c == class))
    }

    fn find_input(&self, el: u32) -> Option<u32> {
        self.node(el).and_then(|n| n.input)
    }

    fn find_by_id(&self, id: &str) -> Option<u32> {
        self.body
            .iter()
            .copied()
            .find(|&el| self.node(el).is_some_and(|n| n.id.as_deref() == Some(id)))
    }

    fn append_overlay(&mut self, markup: &OverlayMarkup) -> u32 {
        let el = self.push_overlay(Node {
            bounds: Rect::from_origin_size(Point::ORIGIN, self.overlay_size),
            class: markup.class.clone(),
            id: Some(markup.id.clone()),
            markup: Some(markup.clone()),
            ..Default::default()
        });
        self.body.push(el);
        el
    }

    fn remove(&mut self, el: u32) {
        let before = self.body.len();
        self.body.retain(|&e| e != el);
        if self.body.len() == before {
            return;
        }
        self.fades.retain(|&(e, _)| e != el);
        if let Some(node) = self.node_mut(el)
            && node.markup.is_some()
        {
            *node = Node::default();
            self.free.push(el);
        }
    }

    fn set_class(&mut self, el: u32, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.class = class.into();
            if let Some(markup) = &mut node.markup {
                markup.class = class.into();
            }
        }
    }

    fn set_style(&mut self, el: u32, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.into(), value.into());
            }
        }
    }

    fn set_position(&mut self, el: u32, origin: Point) {
        if let Some(node) = self.node_mut(el) {
            let size = node.bounds.size();
            node.bounds = Rect::from_origin_size(origin, size);
        }
    }

    fn fade_in(&mut self, el: u32, duration_ms: u32) {
        self.fades.push((el, duration_ms));
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }

    fn scrollable_parents(&self, el: u32) -> Vec<u32> {
        self.node(el)
            .map(|n| n.scroll_parents.clone())
            .unwrap_or_default()
    }

    fn listen(&mut self, el: u32, events: Events) {
        if let Some(node) = self.node_mut(el) {
            node.listeners |= events;
        }
    }

    fn unlisten(&mut self, el: u32, events: Events) {
        if let Some(node) = self.node_mut(el) {
            node.listeners &= !events;
        }
    }

    fn listen_scroll(&mut self, container: u32) {
        if let Some(node) = self.node_mut(container) {
            node.scroll_listeners += 1;
        }
    }

    fn unlisten_scroll(&mut self, container: u32) {
        if let Some(node) = self.node_mut(container) {
            node.scroll_listeners = node.scroll_listeners.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_rect_follows_scroll() {
        let mut dom = HeadlessDom::new(Size::new(100.0, 100.0));
        let el = dom.add_element(Rect::new(10.0, 40.0, 20.0, 50.0));
        dom.scroll_to(Vec2::new(5.0, 30.0));
        assert_eq!(dom.bounding_rect(el), Rect::new(5.0, 10.0, 15.0, 20.0));
        assert_eq!(dom.outer_size(el), Size::new(10.0, 10.0));
    }

    #[test]
    fn removed_overlays_are_not_found() {
        let mut dom = HeadlessDom::new(Size::new(100.0, 100.0));
        let markup = OverlayMarkup::new(
            "t",
            crate::overlay::OverlayContent::Text("x".into()),
        );
        let el = dom.append_overlay(&markup);
        assert_eq!(dom.find_by_id("t"), Some(el));
        dom.remove(el);
        assert_eq!(dom.find_by_id("t"), None);
        assert!(dom.overlays().is_empty());
    }

    #[test]
    fn removed_overlay_slots_are_reused() {
        let mut dom = HeadlessDom::new(Size::new(100.0, 100.0));
        let anchor = dom.add_element(Rect::new(0.0, 0.0, 10.0, 10.0));
        let markup = OverlayMarkup::new("t", crate::overlay::OverlayContent::Text("x".into()));
        let first = dom.append_overlay(&markup);
        dom.fade_in(first, 250);
        for _ in 0..100 {
            let el = dom.append_overlay(&markup);
            dom.fade_in(el, 250);
            dom.remove(el);
        }
        assert_eq!(dom.nodes.len(), 3);
        assert_eq!(dom.fades(), &[(first, 250)]);

        dom.remove(first);
        assert!(dom.fades().is_empty());
        assert!(dom.style(first, "z-index").is_none());
        // Removing twice, or removing a plain element, keeps the slot list clean.
        dom.remove(first);
        dom.remove(anchor);
        assert_eq!(dom.free.len(), 2);
        assert_eq!(dom.position(anchor), Some(Point::ORIGIN));
    }

    #[test]
    fn empty_style_clears() {
        let mut dom = HeadlessDom::new(Size::new(100.0, 100.0));
        let el = dom.add_element(Rect::ZERO);
        dom.set_style(el, "z-index", "3");
        assert_eq!(dom.style(el, "z-index"), Some("3"));
        dom.set_style(el, "z-index", "");
        assert_eq!(dom.style(el, "z-index"), None);
    }
}
