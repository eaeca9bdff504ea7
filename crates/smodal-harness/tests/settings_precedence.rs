#![forbid(unsafe_code)]

//! Property tests: settings precedence and identifier allocation.

use std::collections::HashSet;

use proptest::option;
use proptest::prelude::*;
use smodal_dialog::identity::{allocate, allocate_with};
use smodal_dialog::settings::resolve;
use smodal_dialog::{ButtonDescriptor, Settings, SettingsLayer, Transition};
use smodal_dom::{Dom, MemoryDom};

fn transition() -> impl Strategy<Value = Transition> {
    (0..Transition::ALL.len()).prop_map(|i| Transition::ALL[i])
}

fn button_list() -> impl Strategy<Value = Vec<ButtonDescriptor>> {
    proptest::collection::vec("[a-z]{1,6}", 0..4)
        .prop_map(|titles| titles.into_iter().map(ButtonDescriptor::new).collect())
}

fn layer() -> impl Strategy<Value = SettingsLayer> {
    (
        option::of("[A-Za-z ]{0,12}"),
        option::of(transition()),
        option::of(any::<bool>()),
        option::of(any::<bool>()),
        option::of(any::<bool>()),
        option::of(any::<bool>()),
        option::of(any::<bool>()),
        option::of(button_list()),
        option::of(button_list()),
    )
        .prop_map(
            |(
                title,
                transition,
                blurring,
                inverted,
                closable,
                close_icon,
                button_less,
                default_buttons,
                confirm_buttons,
            )| SettingsLayer {
                title,
                transition,
                blurring,
                inverted,
                closable,
                close_icon,
                button_less,
                default_buttons,
                confirm_buttons,
                ..SettingsLayer::default()
            },
        )
}

fn titles(list: &[ButtonDescriptor]) -> Vec<String> {
    list.iter().map(|b| b.title.clone()).collect()
}

fn pick<T: Clone>(o: &Option<T>, f: &Option<T>, d: &T) -> T {
    o.clone().or_else(|| f.clone()).unwrap_or_else(|| d.clone())
}

proptest! {
    #[test]
    fn every_field_follows_precedence(d in layer(), f in layer(), o in layer()) {
        let defaults = Settings::default().with(&d);
        let r = resolve(&defaults, &f, Some(&o));

        prop_assert_eq!(&r.title, &pick(&o.title, &f.title, &defaults.title));
        prop_assert_eq!(r.transition, pick(&o.transition, &f.transition, &defaults.transition));
        prop_assert_eq!(r.blurring, pick(&o.blurring, &f.blurring, &defaults.blurring));
        prop_assert_eq!(r.inverted, pick(&o.inverted, &f.inverted, &defaults.inverted));
        prop_assert_eq!(r.closable, pick(&o.closable, &f.closable, &defaults.closable));
        prop_assert_eq!(r.close_icon, pick(&o.close_icon, &f.close_icon, &defaults.close_icon));
        prop_assert_eq!(r.button_less, pick(&o.button_less, &f.button_less, &defaults.button_less));
        prop_assert_eq!(
            titles(&r.default_buttons),
            titles(&pick(&o.default_buttons, &f.default_buttons, &defaults.default_buttons))
        );
        prop_assert_eq!(
            titles(&r.confirm_buttons),
            titles(&pick(&o.confirm_buttons, &f.confirm_buttons, &defaults.confirm_buttons))
        );
    }

    #[test]
    fn absent_overrides_equal_empty_overrides(d in layer(), f in layer()) {
        let defaults = Settings::default().with(&d);
        let absent = resolve(&defaults, &f, None);
        let empty = resolve(&defaults, &f, Some(&SettingsLayer::new()));
        prop_assert_eq!(format!("{absent:?}"), format!("{empty:?}"));
    }

    #[test]
    fn ids_carry_prefix_and_never_repeat(prefix in "[a-z-]{0,8}", count in 1usize..16) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let mut seen = HashSet::new();
        for _ in 0..count {
            let id = allocate(&dom, &prefix);
            prop_assert!(id.as_str().starts_with(prefix.as_str()));
            prop_assert_eq!(id.as_str().len(), prefix.len() + 32);
            prop_assert!(seen.insert(id.clone()));

            let anchor = dom.create_element("div", &[]);
            dom.set_attribute(anchor, "id", id.as_str());
            dom.append_child(body, anchor);
        }
    }

    #[test]
    fn allocation_skips_every_mounted_collision(taken in 1usize..6) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        for i in 0..taken {
            let node = dom.create_element("div", &[]);
            dom.set_attribute(node, "id", &format!("p-{i}"));
            dom.append_child(body, node);
        }

        let mut next = 0usize;
        let id = allocate_with(&dom, "p-", || {
            let token = next.to_string();
            next += 1;
            token
        });
        prop_assert_eq!(id.as_str(), format!("p-{taken}"));
        prop_assert_eq!(next, taken + 1);
    }
}
