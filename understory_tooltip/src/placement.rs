// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine: fallback walk over candidate sides.
//!
//! ## Algorithm
//!
//! Each primary side has a fixed fallback sequence ([`fallback_sequence`]).
//! The engine walks it in order. For each candidate it resets the overlay
//! class (the arrow variant can change the rendered size), parks the overlay
//! at (−999, −999), measures, moves it to the candidate origin
//! ([`candidate_origin`]), and re-measures to test for viewport overflow
//! ([`overflows`]). The first candidate that fits wins. The last entry is
//! applied without a test, so the walk ends after at most
//! [`MAX_ROUNDS`] rounds even when every side overflows.
//!
//! ## Pure helpers
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_tooltip::placement::candidate_origin;
//! use understory_tooltip::types::Side;
//!
//! let anchor = Rect::new(100.0, 100.0, 140.0, 120.0);
//! let overlay = Size::new(60.0, 30.0);
//! assert_eq!(candidate_origin(Side::Right, anchor, overlay), Point::new(140.0, 95.0));
//! assert_eq!(candidate_origin(Side::Top, anchor, overlay), Point::new(90.0, 70.0));
//! ```

use kurbo::{Point, Rect, Size};

use crate::dom::Dom;
use crate::overlay::overlay_class;
use crate::types::Side;

/// Upper bound on geometry rounds for any primary side.
pub const MAX_ROUNDS: usize = 5;

/// Where the overlay is parked while it is measured.
pub const PARKED: Point = Point::new(-999.0, -999.0);

const TOP: &[Side] = &[Side::Top, Side::Bottom, Side::Top];
const LEFT: &[Side] = &[Side::Left, Side::Right, Side::Top, Side::Bottom, Side::Left];
const BOTTOM: &[Side] = &[Side::Bottom, Side::Top, Side::Bottom];
const RIGHT: &[Side] = &[Side::Right, Side::Left, Side::Top, Side::Bottom, Side::Right];

/// The ordered candidates tried for `primary`.
///
/// The final entry repeats a side on purpose: it is applied even if it
/// overflows.
pub fn fallback_sequence(primary: Side) -> &'static [Side] {
    match primary {
        Side::Top => TOP,
        Side::Left => LEFT,
        Side::Bottom => BOTTOM,
        Side::Right => RIGHT,
    }
}

/// Page-space origin of an overlay of size `overlay` placed on `side` of `anchor`.
pub fn candidate_origin(side: Side, anchor: Rect, overlay: Size) -> Point {
    match side {
        Side::Right => Point::new(
            anchor.x1,
            anchor.y0 + (anchor.height() - overlay.height) / 2.0,
        ),
        Side::Left => Point::new(
            anchor.x0 - overlay.width,
            anchor.y0 + (anchor.height() - overlay.height) / 2.0,
        ),
        Side::Top => Point::new(
            anchor.x0 + (anchor.width() - overlay.width) / 2.0,
            anchor.y0 - overlay.height,
        ),
        Side::Bottom => Point::new(
            anchor.x0 + (anchor.width() - overlay.width) / 2.0,
            anchor.y0 + anchor.height(),
        ),
    }
}

/// Whether a viewport-space box leaves the viewport on any edge.
pub fn overflows(bounds: Rect, viewport: Size) -> bool {
    bounds.x1 > viewport.width || bounds.x0 < 0.0 || bounds.y0 < 0.0 || bounds.y1 > viewport.height
}

/// Outcome of a placement walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Side that was finally applied.
    pub side: Side,
    /// Page-space origin that was finally applied.
    pub origin: Point,
    /// Number of candidates applied, at most [`MAX_ROUNDS`].
    pub rounds: usize,
    /// The applied placement still leaves the viewport.
    pub overflowing: bool,
}

/// Anchor border box in page coordinates, sized by its outer dimensions.
pub fn anchor_box<D: Dom>(dom: &D, anchor: D::Element) -> Rect {
    let client = dom.bounding_rect(anchor);
    let origin = client.origin() + dom.scroll_offset();
    Rect::from_origin_size(origin, dom.outer_size(anchor))
}

/// Whether `overlay`, as currently laid out, leaves the viewport.
pub fn is_out_of_bounds<D: Dom>(dom: &D, overlay: D::Element) -> bool {
    let client = dom.bounding_rect(overlay);
    let bounds = Rect::from_origin_size(client.origin(), dom.outer_size(overlay));
    overflows(bounds, dom.viewport())
}

/// Apply one candidate side to `overlay`.
pub fn apply<D: Dom>(
    dom: &mut D,
    anchor: D::Element,
    overlay: D::Element,
    side: Side,
    custom_class: Option<&str>,
) -> Point {
    dom.set_position(overlay, PARKED);
    dom.set_class(overlay, &overlay_class(side, custom_class));
    let origin = candidate_origin(side, anchor_box(dom, anchor), dom.outer_size(overlay));
    dom.set_position(overlay, origin);
    origin
}

/// Walk the fallback sequence for `primary` and leave `overlay` positioned.
pub fn align<D: Dom>(
    dom: &mut D,
    anchor: D::Element,
    overlay: D::Element,
    primary: Side,
    custom_class: Option<&str>,
) -> Placement {
    let sequence = fallback_sequence(primary);
    let last = sequence.len() - 1;
    let mut placement = Placement {
        side: primary,
        origin: PARKED,
        rounds: 0,
        overflowing: false,
    };
    for (round, &side) in sequence.iter().enumerate() {
        placement.side = side;
        placement.origin = apply(dom, anchor, overlay, side, custom_class);
        placement.rounds = round + 1;
        placement.overflowing = is_out_of_bounds(dom, overlay);
        tracing::trace!(
            side = side.name(),
            round = placement.rounds,
            overflowing = placement.overflowing,
            "tooltip placement candidate"
        );
        if !placement.overflowing || round == last {
            break;
        }
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDom;

    fn setup(anchor: Rect, overlay: Size) -> (HeadlessDom, u32, u32) {
        let mut dom = HeadlessDom::new(Size::new(800.0, 600.0));
        let a = dom.add_element(anchor);
        let o = dom.add_detached(overlay);
        (dom, a, o)
    }

    #[test]
    fn sequences_are_bounded() {
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            let seq = fallback_sequence(side);
            assert!(seq.len() <= MAX_ROUNDS);
            assert_eq!(seq[0], side);
            assert_eq!(seq[seq.len() - 1], side);
        }
    }

    #[test]
    fn formulas_center_on_the_cross_axis() {
        let anchor = Rect::new(100.0, 100.0, 140.0, 120.0);
        let overlay = Size::new(60.0, 30.0);
        assert_eq!(
            candidate_origin(Side::Left, anchor, overlay),
            Point::new(40.0, 95.0)
        );
        assert_eq!(
            candidate_origin(Side::Bottom, anchor, overlay),
            Point::new(90.0, 120.0)
        );
    }

    #[test]
    fn overflow_checks_every_edge() {
        let vp = Size::new(100.0, 100.0);
        assert!(!overflows(Rect::new(0.0, 0.0, 100.0, 100.0), vp));
        assert!(overflows(Rect::new(-1.0, 0.0, 10.0, 10.0), vp));
        assert!(overflows(Rect::new(0.0, -1.0, 10.0, 10.0), vp));
        assert!(overflows(Rect::new(95.0, 0.0, 101.0, 10.0), vp));
        assert!(overflows(Rect::new(0.0, 95.0, 10.0, 101.0), vp));
    }

    #[test]
    fn right_fits_first() {
        let (mut dom, a, o) = setup(Rect::new(100.0, 100.0, 140.0, 120.0), Size::new(60.0, 30.0));
        let p = align(&mut dom, a, o, Side::Right, None);
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.rounds, 1);
        assert!(!p.overflowing);
        assert_eq!(dom.position(o), Some(Point::new(140.0, 95.0)));
        assert_eq!(
            dom.class(o),
            Some("p-tooltip p-component p-tooltip-right")
        );
    }

    #[test]
    fn right_edge_falls_back_to_left() {
        let (mut dom, a, o) = setup(Rect::new(760.0, 100.0, 800.0, 120.0), Size::new(60.0, 30.0));
        let p = align(&mut dom, a, o, Side::Right, Some("warn"));
        assert_eq!(p.side, Side::Left);
        assert_eq!(p.rounds, 2);
        assert_eq!(p.origin, Point::new(700.0, 95.0));
        assert_eq!(
            dom.class(o),
            Some("p-tooltip p-component p-tooltip-left warn")
        );
    }

    #[test]
    fn everything_overflows_ends_on_primary() {
        // Anchor spans the whole viewport and the overlay is wider than it.
        let (mut dom, a, o) = setup(Rect::new(0.0, 0.0, 800.0, 600.0), Size::new(900.0, 30.0));
        let p = align(&mut dom, a, o, Side::Right, None);
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.rounds, MAX_ROUNDS);
        assert!(p.overflowing);
    }

    #[test]
    fn top_falls_back_to_bottom() {
        let (mut dom, a, o) = setup(Rect::new(100.0, 0.0, 140.0, 20.0), Size::new(60.0, 30.0));
        let p = align(&mut dom, a, o, Side::Top, None);
        assert_eq!(p.side, Side::Bottom);
        assert_eq!(p.rounds, 2);
    }

    #[test]
    fn scroll_offset_moves_page_origin() {
        let (mut dom, a, o) = setup(Rect::new(100.0, 100.0, 140.0, 120.0), Size::new(60.0, 30.0));
        dom.scroll_to(kurbo::Vec2::new(0.0, 50.0));
        let p = align(&mut dom, a, o, Side::Right, None);
        assert_eq!(p.side, Side::Right);
        // The anchor sits at page y=100, viewport y=50.
        assert_eq!(p.origin, Point::new(140.0, 95.0));
        assert_eq!(dom.bounding_rect(o).y0, 45.0);
    }
}
