// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: a headless, `no_std` tooltip controller for UI.
//!
//! ## Overview
//!
//! This crate attaches hover/focus tooltips to elements of a host document.
//! It owns the timing, the overlay lifecycle, and placement, and talks to the
//! document only through the [`Dom`](crate::dom::Dom) trait.
//! It does not render anything itself.
//!
//! ## Flow
//!
//! 1) Attach: the host calls [`TooltipController::attach`](crate::controller::TooltipController::attach)
//!    with an element and a [`Binding`](crate::config::Binding). The controller resolves the
//!    effective target (the inner input of a composite input wrapper, otherwise the element),
//!    derives a [`Configuration`](crate::config::Configuration), and asks the host to listen for the
//!    trigger mode's [`Events`](crate::types::Events).
//! 2) Trigger: the host forwards [`TooltipEvent`](crate::types::TooltipEvent)s. Show and hide requests
//!    go through a per-attachment [`DelaySlot`](crate::schedule::DelaySlot); a hide always cancels a
//!    pending show.
//! 3) Show: the overlay subtree ([`OverlayMarkup`](crate::overlay::OverlayMarkup)) is appended,
//!    placed by the [placement engine](crate::placement), faded in, and registered with the
//!    [stacking registry](crate::stacking::StackingRegistry).
//! 4) Dismiss: pointer leave, blur, click, escape, the next window resize, or a scroll of any
//!    scrollable ancestor hides it again.
//!
//! ## Placement
//!
//! Each primary side has a fixed fallback sequence:
//!
//! | Primary  | Sequence                           |
//! |----------|------------------------------------|
//! | `top`    | top, bottom, top                   |
//! | `left`   | left, right, top, bottom, left     |
//! | `bottom` | bottom, top, bottom                |
//! | `right`  | right, left, top, bottom, right    |
//!
//! The first candidate that stays inside the viewport wins; the last entry is
//! applied as-is, so the walk always ends within five rounds.
//!
//! ## Time
//!
//! The controller has no timers of its own. Call
//! [`TooltipController::advance`](crate::controller::TooltipController::advance) with the host clock;
//! [`TooltipController::next_deadline`](crate::controller::TooltipController::next_deadline) reports
//! when the next delayed show or hide is due.
//!
//! ## Headless hosts
//!
//! [`HeadlessDom`](crate::headless::HeadlessDom) implements the document trait in memory and
//! renders the produced markup, for tests and server-side use.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attachment;
pub mod config;
pub mod controller;
pub mod dom;
pub mod headless;
pub mod overlay;
pub mod placement;
pub mod schedule;
pub mod stacking;
pub mod types;
