// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_tooltip::config::{Binding, TooltipOptions};
use understory_tooltip::controller::TooltipController;
use understory_tooltip::dom::Dom;
use understory_tooltip::headless::HeadlessDom;
use understory_tooltip::overlay::{OverlayContent, OverlayMarkup};
use understory_tooltip::placement;
use understory_tooltip::types::{Side, TooltipEvent};

const VIEWPORT: Size = Size::new(1280.0, 800.0);

fn gen_grid_anchors(dom: &mut HeadlessDom, n: usize, cell: f64) -> Vec<u32> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(dom.add_element(Rect::new(x0, y0, x0 + cell * 0.8, y0 + cell * 0.5)));
        }
    }
    out
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for side in [Side::Top, Side::Left, Side::Bottom, Side::Right] {
        let mut dom = HeadlessDom::new(VIEWPORT);
        let anchors = gen_grid_anchors(&mut dom, 16, 80.0);
        let overlay = dom.append_overlay(&OverlayMarkup::new(
            "bench_tooltip",
            OverlayContent::Text("tip".into()),
        ));
        group.throughput(Throughput::Elements(anchors.len() as u64));
        group.bench_function(format!("grid16_{}", side.name()), |b| {
            b.iter(|| {
                let mut overflowing = 0_usize;
                for &anchor in &anchors {
                    let p = placement::align(&mut dom, anchor, overlay, side, None);
                    overflowing += usize::from(p.overflowing);
                }
                black_box(overflowing);
            });
        });
    }
    // Anchor covering the whole viewport: every candidate overflows.
    let mut dom = HeadlessDom::new(VIEWPORT);
    let anchor = dom.add_element(Rect::from_origin_size((0.0, 0.0), VIEWPORT));
    let overlay = dom.append_overlay(&OverlayMarkup::new(
        "bench_tooltip",
        OverlayContent::Text("tip".into()),
    ));
    group.bench_function("pinned_all_rounds", |b| {
        b.iter(|| black_box(placement::align(&mut dom, anchor, overlay, Side::Right, None)));
    });
    group.finish();
}

fn bench_show_hide(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    for &n in &[8_usize, 32] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("show_hide_cycle_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut dom = HeadlessDom::new(VIEWPORT);
                    let anchors = gen_grid_anchors(&mut dom, n, 40.0);
                    let mut tooltips = TooltipController::new();
                    for &el in &anchors {
                        tooltips.attach(&mut dom, el, &Binding::new(TooltipOptions::new("tip")));
                    }
                    (dom, anchors, tooltips)
                },
                |(mut dom, anchors, mut tooltips)| {
                    let mut now = 0;
                    for &el in &anchors {
                        tooltips.handle_event(&mut dom, el, TooltipEvent::PointerEnter);
                        tooltips.advance(&mut dom, now);
                        tooltips.handle_event(&mut dom, el, TooltipEvent::PointerLeave);
                        now += 1;
                        tooltips.advance(&mut dom, now);
                    }
                    black_box(dom.overlays().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_align, bench_show_hide);
criterion_main!(benches);
