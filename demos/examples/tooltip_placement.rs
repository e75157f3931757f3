// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fallback placement for anchors near the viewport edges.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_placement`

use kurbo::{Rect, Size};
use understory_tooltip::config::Binding;
use understory_tooltip::controller::TooltipController;
use understory_tooltip::headless::HeadlessDom;
use understory_tooltip::types::{Modifiers, TooltipEvent};

fn main() {
    let mut dom = HeadlessDom::new(Size::new(640.0, 480.0));
    dom.set_overlay_size(Size::new(160.0, 40.0));

    let anchors = [
        ("middle", Rect::new(280.0, 220.0, 360.0, 250.0), Modifiers::empty()),
        ("right edge", Rect::new(560.0, 220.0, 640.0, 250.0), Modifiers::empty()),
        ("top edge", Rect::new(280.0, 0.0, 360.0, 30.0), Modifiers::TOP),
        ("left edge", Rect::new(0.0, 220.0, 80.0, 250.0), Modifiers::LEFT),
        ("everywhere", Rect::new(0.0, 0.0, 640.0, 480.0), Modifiers::empty()),
    ];

    let mut tooltips = TooltipController::new();
    for (name, bounds, modifiers) in anchors {
        let el = dom.add_element(bounds);
        tooltips.attach(&mut dom, el, &Binding::from(name).with_modifiers(modifiers));
        tooltips.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
        tooltips.advance(&mut dom, 0);

        if let Some(p) = tooltips.attachment(el).and_then(|a| a.placement()) {
            println!(
                "{name:>10}: primary={:?} placed={:?} rounds={} overflowing={}",
                modifiers.side(),
                p.side,
                p.rounds,
                p.overflowing
            );
        }
        tooltips.detach(&mut dom, el);
    }
    assert!(dom.overlays().is_empty());
}
