// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bindings parsed from JSON, focus mode, and a composite input wrapper.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_json`

use kurbo::{Rect, Size};
use understory_tooltip::config::Binding;
use understory_tooltip::controller::TooltipController;
use understory_tooltip::headless::HeadlessDom;
use understory_tooltip::types::{Key, TooltipEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut dom = HeadlessDom::new(Size::new(800.0, 600.0));
    let wrapper = dom.add_element(Rect::new(40.0, 40.0, 340.0, 72.0));
    dom.add_class(wrapper, "p-inputwrapper");
    let input = dom.add_input(wrapper);

    let binding = Binding::from_json(
        r#"{
            "value": { "value": "Use <b>letters</b> only", "escape": true, "class": "hint" },
            "arg": { "event": "focus", "position": "bottom" }
        }"#,
    )?;

    let mut tooltips = TooltipController::new();
    tooltips.attach(&mut dom, wrapper, &binding);
    println!("== Listeners on the inner input ==\n  {:?}", dom.listeners(input));

    tooltips.handle_event(&mut dom, input, TooltipEvent::Focus);
    tooltips.advance(&mut dom, 0);
    for overlay in dom.overlays() {
        println!("== Focused ==\n  {}", dom.html(overlay).unwrap_or_default());
    }

    tooltips.handle_event(&mut dom, input, TooltipEvent::KeyDown(Key::Escape));
    println!("== Escape ==\n  overlays: {:?}", dom.overlays());

    match Binding::from_json("{ not json") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("== Malformed ==\n  {err}"),
    }
    Ok(())
}
