// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip controller: side table, lifecycle entry points, and event dispatch.
//!
//! ## Usage
//!
//! - Call [`TooltipController::attach`], [`TooltipController::reconfigure`]
//!   and [`TooltipController::detach`] from the host's mount/update/unmount
//!   notifications.
//! - Forward input on bound elements to [`TooltipController::handle_event`].
//!   [`Dom::listen`] tells the host which kinds are wanted per element.
//! - Call [`TooltipController::advance`] with the current time whenever it
//!   moves; [`TooltipController::next_deadline`] tells the host when the next
//!   timer fires.
//! - Forward window resizes to [`TooltipController::on_window_resize`] and
//!   scrolls of registered containers to [`TooltipController::on_scroll`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::config::Binding;
//! use understory_tooltip::controller::TooltipController;
//! use understory_tooltip::headless::HeadlessDom;
//! use understory_tooltip::types::TooltipEvent;
//!
//! let mut dom = HeadlessDom::new(Size::new(800.0, 600.0));
//! let button = dom.add_element(Rect::new(100.0, 100.0, 180.0, 130.0));
//!
//! let mut tooltips = TooltipController::new();
//! tooltips.attach(&mut dom, button, &Binding::from("Save the file"));
//!
//! tooltips.handle_event(&mut dom, button, TooltipEvent::PointerEnter);
//! tooltips.advance(&mut dom, 0);
//! assert_eq!(dom.overlays().len(), 1);
//!
//! tooltips.handle_event(&mut dom, button, TooltipEvent::PointerLeave);
//! tooltips.advance(&mut dom, 0);
//! assert!(dom.overlays().is_empty());
//! ```

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::attachment::Attachment;
use crate::config::{Binding, ControllerOptions};
use crate::dom::{Dom, IdSource, SequentialIds};
use crate::schedule::{Scheduler, TimerAction};
use crate::stacking::{StackingRegistry, ZIndexStack};
use crate::types::{Key, TooltipEvent};

/// Owns every attachment and drives show/hide for them.
///
/// Attachments are keyed by their effective target (see
/// [`TooltipController::effective_target`]).
pub struct TooltipController<E, R = ZIndexStack<E>, I = SequentialIds> {
    options: ControllerOptions,
    attachments: HashMap<E, Attachment<E>>,
    clock: Scheduler,
    registry: R,
    ids: I,
}

impl<E, R, I> core::fmt::Debug for TooltipController<E, R, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TooltipController")
            .field("attachments", &self.attachments.len())
            .field("now", &self.clock.now())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E> Default for TooltipController<E>
where
    E: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TooltipController<E>
where
    E: Copy + Eq + core::hash::Hash + core::fmt::Debug,
{
    /// A controller with default options, a fresh z-index stack, and sequential ids.
    pub fn new() -> Self {
        Self::with_options(ControllerOptions::default())
    }

    /// A controller with the given options.
    pub fn with_options(options: ControllerOptions) -> Self {
        Self::with_parts(options, ZIndexStack::new(), SequentialIds::new())
    }
}

impl<E, R, I> TooltipController<E, R, I>
where
    E: Copy + Eq + core::hash::Hash + core::fmt::Debug,
    R: StackingRegistry<E>,
    I: IdSource,
{
    /// A controller sharing an existing stacking registry and id source.
    pub fn with_parts(options: ControllerOptions, registry: R, ids: I) -> Self {
        Self {
            options,
            attachments: HashMap::new(),
            clock: Scheduler::new(),
            registry,
            ids,
        }
    }

    /// Controller-wide options.
    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// The stacking registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Current host time as last seen by [`TooltipController::advance`].
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Number of live attachments.
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Whether there are no attachments.
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// The attachment whose effective target is `target`.
    pub fn attachment(&self, target: E) -> Option<&Attachment<E>> {
        self.attachments.get(&target)
    }

    /// Element that receives listeners for `el`: its inner input when `el` is
    /// a composite input wrapper, otherwise `el` itself.
    pub fn effective_target<D: Dom<Element = E>>(&self, dom: &D, el: E) -> E {
        if dom.has_class(el, &self.options.wrapper_class) {
            dom.find_input(el).unwrap_or(el)
        } else {
            el
        }
    }

    /// Attach the behavior to `el`.
    ///
    /// Attaching an element that is already attached reconfigures it.
    pub fn attach<D: Dom<Element = E>>(&mut self, dom: &mut D, el: E, binding: &Binding) {
        let target = self.effective_target(dom, el);
        tracing::debug!(anchor = ?el, target = ?target, "tooltip attach");
        let attachment = self
            .attachments
            .entry(target)
            .or_insert_with(|| Attachment::new(el, target));
        if let Err(err) = attachment.configure(dom, &mut self.registry, binding) {
            tracing::debug!(target = ?target, reason = %err, "tooltip inert");
        }
    }

    /// Apply a new binding to `el`, attaching it if needed.
    pub fn reconfigure<D: Dom<Element = E>>(&mut self, dom: &mut D, el: E, binding: &Binding) {
        let target = self.effective_target(dom, el);
        let Some(attachment) = self.attachments.get_mut(&target) else {
            self.attach(dom, el, binding);
            return;
        };
        tracing::debug!(target = ?target, "tooltip reconfigure");
        if let Err(err) = attachment.configure(dom, &mut self.registry, binding) {
            tracing::debug!(target = ?target, reason = %err, "tooltip inert");
        }
    }

    /// Remove the behavior from `el`: unbind listeners, hide the overlay, and
    /// destroy the scroll dismissal handle. Pending timers die with it.
    pub fn detach<D: Dom<Element = E>>(&mut self, dom: &mut D, el: E) {
        let target = self.effective_target(dom, el);
        if let Some(mut attachment) = self.attachments.remove(&target) {
            attachment.release(dom, &mut self.registry);
            tracing::debug!(target = ?target, "tooltip detach");
        }
    }

    /// Handle an input event on an effective target.
    ///
    /// Returns `false` when `target` is not attached or the event kind is not
    /// bound.
    pub fn handle_event<D: Dom<Element = E>>(
        &mut self,
        dom: &mut D,
        target: E,
        event: TooltipEvent,
    ) -> bool {
        let Some(attachment) = self.attachments.get(&target) else {
            return false;
        };
        if !attachment.bound_events().contains(event.kind()) {
            return false;
        }
        let (show_delay, hide_delay) = attachment
            .configuration()
            .map(|c| (c.show_delay_ms, c.hide_delay_ms))
            .unwrap_or_default();
        match event {
            TooltipEvent::Focus | TooltipEvent::PointerEnter => {
                self.request(dom, target, Some(show_delay), TimerAction::Show);
            }
            TooltipEvent::Blur | TooltipEvent::PointerLeave | TooltipEvent::Click => {
                self.request(dom, target, Some(hide_delay), TimerAction::Hide);
            }
            TooltipEvent::KeyDown(Key::Escape) => {
                self.request(dom, target, None, TimerAction::Hide);
            }
            TooltipEvent::KeyDown(Key::Other) => return false,
        }
        true
    }

    /// Move the clock to `now` and fire every due timer in deadline order.
    pub fn advance<D: Dom<Element = E>>(&mut self, dom: &mut D, now: u64) {
        self.clock.advance_to(now);
        let now = self.clock.now();
        let mut due: Vec<_> = self
            .attachments
            .iter_mut()
            .filter_map(|(&target, a)| a.slot.take_due(now).map(|t| (t, target)))
            .collect();
        due.sort_by_key(|(t, _)| (t.due, t.seq));
        for (timer, target) in due {
            tracing::trace!(target = ?target, action = ?timer.action, "tooltip timer fired");
            self.run(dom, target, timer.action);
        }
    }

    /// Earliest pending deadline across all attachments.
    pub fn next_deadline(&self) -> Option<u64> {
        self.attachments
            .values()
            .filter_map(|a| a.delay_slot().pending())
            .map(|t| t.due)
            .min()
    }

    /// A window resize: hide every overlay armed for resize dismissal.
    ///
    /// Each arming is consumed by one resize. On touch devices the resize is
    /// ignored, since on-screen keyboards resize the viewport.
    pub fn on_window_resize<D: Dom<Element = E>>(&mut self, dom: &mut D) {
        let touch = dom.is_touch_device();
        let armed: Vec<E> = self
            .attachments
            .iter_mut()
            .filter(|(_, a)| a.resize_armed)
            .map(|(&target, a)| {
                a.resize_armed = false;
                target
            })
            .collect();
        if touch {
            return;
        }
        for target in armed {
            self.request(dom, target, None, TimerAction::Hide);
        }
    }

    /// A scroll of `container`: hide every overlay whose target lives inside it.
    pub fn on_scroll<D: Dom<Element = E>>(&mut self, dom: &mut D, container: E) {
        let covered: Vec<E> = self
            .attachments
            .iter()
            .filter(|(_, a)| a.scroll_dismiss().is_some_and(|s| s.covers(container)))
            .map(|(&target, _)| target)
            .collect();
        for target in covered {
            self.request(dom, target, None, TimerAction::Hide);
        }
    }

    fn request<D: Dom<Element = E>>(
        &mut self,
        dom: &mut D,
        target: E,
        delay_ms: Option<u32>,
        action: TimerAction,
    ) {
        let Some(attachment) = self.attachments.get_mut(&target) else {
            return;
        };
        if let Some(action) = self.clock.schedule(&mut attachment.slot, delay_ms, action) {
            self.run(dom, target, action);
        }
    }

    fn run<D: Dom<Element = E>>(&mut self, dom: &mut D, target: E, action: TimerAction) {
        let Some(attachment) = self.attachments.get_mut(&target) else {
            return;
        };
        match action {
            TimerAction::Show => {
                attachment.show(dom, &mut self.registry, &mut self.ids, &self.options);
            }
            TimerAction::Hide => attachment.hide(dom, &mut self.registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BindingArg, TooltipOptions};
    use crate::headless::HeadlessDom;
    use crate::types::{Events, Modifiers, Side, TriggerMode};
    use kurbo::{Rect, Size};

    fn setup() -> (HeadlessDom, u32, TooltipController<u32>) {
        let mut dom = HeadlessDom::new(Size::new(800.0, 600.0));
        let el = dom.add_element(Rect::new(100.0, 100.0, 180.0, 130.0));
        (dom, el, TooltipController::new())
    }

    #[test]
    fn attach_binds_pointer_mode_by_default() {
        let (mut dom, el, mut c) = setup();
        c.attach(&mut dom, el, &Binding::from("Hi"));
        let a = c.attachment(el).unwrap();
        assert_eq!(a.trigger_mode(), TriggerMode::HoverClick);
        assert_eq!(a.side(), Side::Right);
        assert_eq!(dom.listeners(el), TriggerMode::HoverClick.events());
    }

    #[test]
    fn blank_text_stays_inert() {
        let (mut dom, el, mut c) = setup();
        c.attach(&mut dom, el, &Binding::from("  "));
        assert!(c.attachment(el).unwrap().configuration().is_none());
        assert_eq!(dom.listeners(el), Events::empty());
        assert!(!c.handle_event(&mut dom, el, TooltipEvent::PointerEnter));
    }

    #[test]
    fn show_delay_is_honored() {
        let (mut dom, el, mut c) = setup();
        let mut options = TooltipOptions::new("Hi");
        options.show_delay = Some(300);
        c.attach(&mut dom, el, &Binding::new(options));
        c.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        assert_eq!(c.next_deadline(), Some(300));
        c.advance(&mut dom, 299);
        assert!(dom.overlays().is_empty());
        c.advance(&mut dom, 300);
        assert_eq!(dom.overlays().len(), 1);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn hide_cancels_pending_show() {
        let (mut dom, el, mut c) = setup();
        let mut options = TooltipOptions::new("Hi");
        options.show_delay = Some(300);
        c.attach(&mut dom, el, &Binding::new(options));
        c.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        c.handle_event(&mut dom, el, TooltipEvent::KeyDown(Key::Escape));
        c.advance(&mut dom, 1000);
        assert!(dom.overlays().is_empty());
    }

    #[test]
    fn repeated_show_keeps_one_overlay() {
        let (mut dom, el, mut c) = setup();
        c.attach(&mut dom, el, &Binding::from("Hi"));
        c.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        c.advance(&mut dom, 0);
        c.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        c.advance(&mut dom, 1);
        assert_eq!(dom.overlays().len(), 1);
        assert_eq!(c.registry().len(), 1);
    }

    #[test]
    fn arg_selects_focus_mode_and_side() {
        let (mut dom, el, mut c) = setup();
        let binding = Binding::from("Hi").with_arg(BindingArg {
            event: Some("focus".into()),
            position: Some("bottom".into()),
        });
        c.attach(&mut dom, el, &binding);
        assert!(!c.handle_event(&mut dom, el, TooltipEvent::PointerEnter));
        assert!(c.handle_event(&mut dom, el, TooltipEvent::Focus));
        c.advance(&mut dom, 0);
        let placement = c.attachment(el).unwrap().placement().unwrap();
        assert_eq!(placement.side, Side::Bottom);
    }

    #[test]
    fn mode_change_unbinds_old_listeners() {
        let (mut dom, el, mut c) = setup();
        c.attach(&mut dom, el, &Binding::from("Hi"));
        c.reconfigure(
            &mut dom,
            el,
            &Binding::from("Hi").with_modifiers(Modifiers::FOCUS),
        );
        assert_eq!(dom.listeners(el), TriggerMode::FocusBlur.events());
        assert!(!c.handle_event(&mut dom, el, TooltipEvent::Click));
    }

    #[test]
    fn binding_z_index_sets_base() {
        let (mut dom, el, mut c) = setup();
        c.attach(&mut dom, el, &Binding::from("Hi").with_z_index(5000));
        c.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        c.advance(&mut dom, 0);
        let overlay = dom.overlays()[0];
        assert_eq!(dom.style(overlay, "z-index"), Some("5001"));
    }
}
