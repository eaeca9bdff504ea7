//! Benchmarks for button rendering and settings resolution.
//!
//! Run with: cargo bench -p smodal-dialog --bench render_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use smodal_dialog::button::render_buttons;
use smodal_dialog::identity;
use smodal_dialog::settings::resolve;
use smodal_dialog::{ButtonDescriptor, ButtonsUpdate, ClassMap, Settings, SettingsLayer, Transition};
use smodal_dom::{Dom, MemoryDom};
use std::hint::black_box;

fn make_buttons(count: usize) -> Vec<ButtonDescriptor> {
    (0..count)
        .map(|i| {
            let button = ButtonDescriptor::new(format!("Button {i}"))
                .name(format!("b{i}"))
                .role(if i % 2 == 0 { "positive" } else { "negative" })
                .on_activate(|ctx| {
                    black_box(ctx);
                });
            match i % 3 {
                0 => button.icon("checkmark icon"),
                1 => button.css_class("ui tiny basic button"),
                _ => button,
            }
        })
        .collect()
}

fn bench_render_buttons(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/buttons");
    let classes = ClassMap::default();

    for count in [1usize, 2, 8, 32] {
        group.throughput(Throughput::Elements(count as u64));
        let update = ButtonsUpdate::Replace(make_buttons(count));
        let mut dom = MemoryDom::new();
        let actions = dom.create_element("div", &["actions"]);
        let body = dom.body();
        dom.append_child(body, actions);
        let id = identity::allocate(&dom, "bench-");

        group.bench_with_input(BenchmarkId::new("replace", count), &update, |b, update| {
            b.iter(|| black_box(render_buttons(&mut dom, actions, update, &id, &classes)))
        });
    }

    group.finish();
}

fn bench_classes(c: &mut Criterion) {
    let classes = ClassMap::default();
    let semantic = ButtonDescriptor::new("Ok")
        .role("positive")
        .role("ok")
        .css_class("right labeled icon");
    let css_only = ButtonDescriptor::new("Ok").css_class("ui tiny green button");

    c.bench_function("classes/semantic", |b| {
        b.iter(|| black_box(semantic.classes(&classes)))
    });
    c.bench_function("classes/css_only", |b| {
        b.iter(|| black_box(css_only.classes(&classes)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let defaults = Settings::default();
    let fixed = SettingsLayer::new()
        .title("Confirm?")
        .transition(Transition::FadeUp)
        .inverted(true);
    let overrides = SettingsLayer::new()
        .closable(false)
        .confirm_buttons(make_buttons(2))
        .on_accept(|event| {
            black_box(event);
        });

    c.bench_function("settings/resolve", |b| {
        b.iter(|| black_box(resolve(&defaults, &fixed, Some(&overrides))))
    });
}

criterion_group!(benches, bench_render_buttons, bench_classes, bench_resolve);
criterion_main!(benches);
