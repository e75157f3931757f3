// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover a button, wait out the show delay, then leave it.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_basics`

use kurbo::{Rect, Size};
use understory_tooltip::config::{Binding, TooltipOptions};
use understory_tooltip::controller::TooltipController;
use understory_tooltip::headless::HeadlessDom;
use understory_tooltip::types::TooltipEvent;

fn main() {
    let mut dom = HeadlessDom::new(Size::new(1024.0, 768.0));
    let button = dom.add_element(Rect::new(200.0, 120.0, 296.0, 152.0));

    let mut options = TooltipOptions::new("Save the <em>current</em> file");
    options.show_delay = Some(400);
    options.hide_delay = Some(100);

    let mut tooltips = TooltipController::new();
    tooltips.attach(&mut dom, button, &Binding::new(options));

    tooltips.handle_event(&mut dom, button, TooltipEvent::PointerEnter);
    println!("== Pointer enter at t=0 ==");
    println!("  next deadline: {:?}", tooltips.next_deadline());

    tooltips.advance(&mut dom, 200);
    println!("== t=200 ==\n  overlays: {:?}", dom.overlays());
    assert!(dom.overlays().is_empty());

    tooltips.advance(&mut dom, 400);
    let overlay = dom.overlays()[0];
    println!("== t=400 ==");
    println!("  html: {}", dom.html(overlay).unwrap_or_default());
    println!("  position: {:?}", dom.position(overlay));
    println!("  z-index: {:?}", dom.style(overlay, "z-index"));

    tooltips.handle_event(&mut dom, button, TooltipEvent::PointerLeave);
    tooltips.advance(&mut dom, 500);
    println!("== Pointer leave, t=500 ==\n  overlays: {:?}", dom.overlays());
    assert!(dom.overlays().is_empty());
}
