// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element state: configuration, bound listeners, timer, and overlay lifecycle.
//!
//! An [`Attachment`] lives in the controller's side table from `attach` to
//! `detach`. It owns everything it registers with the host (listeners, the
//! scroll dismissal handle, the overlay and its stacking entry) and releases
//! all of it explicitly.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::{Binding, ConfigError, Configuration, ControllerOptions};
use crate::dom::{Dom, IdSource};
use crate::overlay::{OverlayContent, OverlayMarkup};
use crate::placement::{self, Placement};
use crate::schedule::DelaySlot;
use crate::stacking::StackingRegistry;
use crate::types::{Events, Modifiers, Side, TriggerMode};

/// Scroll listeners on the scrollable ancestors of one target.
///
/// Created on the first show and kept for reuse. Hiding unbinds it; detaching
/// destroys it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollDismiss<E> {
    containers: Vec<E>,
    bound: bool,
}

impl<E> Default for ScrollDismiss<E> {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            bound: false,
        }
    }
}

impl<E: Copy + Eq> ScrollDismiss<E> {
    /// Listen on every scrollable ancestor of `target`. No-op while bound.
    pub fn bind<D: Dom<Element = E>>(&mut self, dom: &mut D, target: E) {
        if self.bound {
            return;
        }
        self.containers = dom.scrollable_parents(target);
        for &container in &self.containers {
            dom.listen_scroll(container);
        }
        self.bound = true;
    }

    /// Stop listening. No-op while unbound.
    pub fn unbind<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        if !self.bound {
            return;
        }
        for &container in &self.containers {
            dom.unlisten_scroll(container);
        }
        self.containers.clear();
        self.bound = false;
    }

    /// Whether a scroll of `container` should dismiss the overlay.
    pub fn covers(&self, container: E) -> bool {
        self.bound && self.containers.contains(&container)
    }

    /// Whether listeners are currently registered.
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

/// The binding between one effective target and its tooltip behavior.
#[derive(Clone, Debug)]
pub struct Attachment<E> {
    anchor: E,
    target: E,
    config: Option<Configuration>,
    modifiers: Modifiers,
    bound: Events,
    pub(crate) slot: DelaySlot,
    scroll: Option<ScrollDismiss<E>>,
    overlay_id: Option<String>,
    placement: Option<Placement>,
    pub(crate) resize_armed: bool,
}

impl<E: Copy + Eq + core::hash::Hash + core::fmt::Debug> Attachment<E> {
    pub(crate) fn new(anchor: E, target: E) -> Self {
        Self {
            anchor,
            target,
            config: None,
            modifiers: Modifiers::empty(),
            bound: Events::empty(),
            slot: DelaySlot::default(),
            scroll: None,
            overlay_id: None,
            placement: None,
            resize_armed: false,
        }
    }

    /// Element the behavior was declared on.
    pub fn anchor(&self) -> E {
        self.anchor
    }

    /// Element that receives listeners and provides placement geometry.
    pub fn target(&self) -> E {
        self.target
    }

    /// Active configuration; `None` while inert.
    pub fn configuration(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    /// Resolved modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Trigger mode derived from the modifiers.
    pub fn trigger_mode(&self) -> TriggerMode {
        self.modifiers.trigger_mode()
    }

    /// Primary placement side derived from the modifiers.
    pub fn side(&self) -> Side {
        self.modifiers.side()
    }

    /// Listener kinds currently bound.
    pub fn bound_events(&self) -> Events {
        self.bound
    }

    /// Id of the visible overlay.
    pub fn overlay_id(&self) -> Option<&str> {
        self.overlay_id.as_deref()
    }

    /// Result of the last placement walk while an overlay is visible.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The scroll dismissal handle, once created.
    pub fn scroll_dismiss(&self) -> Option<&ScrollDismiss<E>> {
        self.scroll.as_ref()
    }

    /// The pending delay slot.
    pub fn delay_slot(&self) -> &DelaySlot {
        &self.slot
    }

    /// Whether the next non-touch window resize hides the overlay.
    pub fn resize_armed(&self) -> bool {
        self.resize_armed
    }

    /// Rebuild configuration from `binding` and rebind listeners.
    ///
    /// A binding without usable text makes the attachment inert: listeners are
    /// removed, the pending timer is dropped and any visible overlay is hidden.
    pub(crate) fn configure<D, R>(
        &mut self,
        dom: &mut D,
        registry: &mut R,
        binding: &Binding,
    ) -> Result<(), ConfigError>
    where
        D: Dom<Element = E>,
        R: StackingRegistry<E>,
    {
        self.unbind_events(dom);
        self.modifiers = binding.resolved_modifiers();
        match Configuration::from_binding(binding) {
            Ok(config) => {
                self.config = Some(config);
                self.bind_events(dom);
                Ok(())
            }
            Err(err) => {
                self.config = None;
                self.slot.cancel();
                self.hide(dom, registry);
                Err(err)
            }
        }
    }

    /// Register the listener set for the current trigger mode.
    pub(crate) fn bind_events<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        self.unbind_events(dom);
        if self.config.is_none() {
            return;
        }
        let events = self.trigger_mode().events();
        dom.listen(self.target, events);
        self.bound = events;
    }

    /// Remove every registered listener.
    pub(crate) fn unbind_events<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        if self.bound.is_empty() {
            return;
        }
        dom.unlisten(self.target, self.bound);
        self.bound = Events::empty();
    }

    /// Create, place, and register a fresh overlay.
    ///
    /// No-op while inert or disabled. A visible overlay is torn down first so
    /// at most one exists per attachment.
    pub(crate) fn show<D, R, I>(
        &mut self,
        dom: &mut D,
        registry: &mut R,
        ids: &mut I,
        options: &ControllerOptions,
    ) where
        D: Dom<Element = E>,
        R: StackingRegistry<E>,
        I: IdSource,
    {
        match &self.config {
            Some(config) if !config.disabled => {}
            _ => return,
        }
        if self.overlay_id.is_some() {
            self.hide(dom, registry);
        }
        let Some(config) = &self.config else {
            return;
        };

        let id = config
            .id_override
            .clone()
            .unwrap_or_else(|| format!("{}_tooltip", ids.next_id()));
        let markup = OverlayMarkup::new(
            id.clone(),
            OverlayContent::new(&config.text, config.escape_html),
        );
        let overlay = dom.append_overlay(&markup);
        dom.set_style(overlay, "display", "inline-block");
        if config.fit_content {
            dom.set_style(overlay, "width", "fit-content");
        }

        let placement = placement::align(
            dom,
            self.target,
            overlay,
            self.modifiers.side(),
            config.custom_class.as_deref(),
        );
        dom.fade_in(overlay, options.fade_ms);
        self.resize_armed = true;
        self.scroll
            .get_or_insert_with(ScrollDismiss::default)
            .bind(dom, self.target);

        let base = config.z_index_base.unwrap_or(options.z_index_base);
        let z_index = registry.register(&options.category, overlay, base);
        dom.set_style(overlay, "z-index", &z_index.to_string());

        tracing::debug!(
            target = ?self.target,
            id = %id,
            side = placement.side.name(),
            z_index,
            "tooltip shown"
        );
        self.overlay_id = Some(id);
        self.placement = Some(placement);
    }

    /// Remove the overlay, release its stacking entry, and unbind scroll
    /// dismissal. Safe to call when nothing is shown.
    pub(crate) fn hide<D, R>(&mut self, dom: &mut D, registry: &mut R)
    where
        D: Dom<Element = E>,
        R: StackingRegistry<E>,
    {
        if let Some(id) = self.overlay_id.take() {
            if let Some(overlay) = dom.find_by_id(&id) {
                registry.unregister(overlay);
                dom.set_style(overlay, "z-index", "");
                dom.remove(overlay);
            }
            tracing::debug!(target = ?self.target, id = %id, "tooltip hidden");
        }
        if let Some(scroll) = &mut self.scroll {
            scroll.unbind(dom);
        }
        self.placement = None;
        self.resize_armed = false;
    }

    /// Release everything: listeners, timer, overlay, and the scroll handle.
    pub(crate) fn release<D, R>(&mut self, dom: &mut D, registry: &mut R)
    where
        D: Dom<Element = E>,
        R: StackingRegistry<E>,
    {
        self.unbind_events(dom);
        self.slot.cancel();
        self.hide(dom, registry);
        self.scroll = None;
        self.config = None;
    }
}
