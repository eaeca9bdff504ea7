#![no_main]

//! Rendering arbitrary descriptor lists keeps the actions node consistent.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smodal_dialog::button::render_buttons;
use smodal_dialog::identity::allocate;
use smodal_dialog::{ButtonDescriptor, ButtonsUpdate, ClassMap, RenderMode};
use smodal_dom::{Dom, MemoryDom};

#[derive(Debug, Arbitrary)]
struct FuzzButton {
    title: String,
    name: Option<String>,
    roles: Vec<String>,
    css_class: Option<String>,
    icon_class: Option<String>,
    render: bool,
}

#[derive(Debug, Arbitrary)]
enum FuzzUpdate {
    Replace(Vec<FuzzButton>),
    Clear,
    Keep,
}

fn descriptor(input: FuzzButton) -> ButtonDescriptor {
    let render = input.render;
    let mut button = ButtonDescriptor::new(input.title).check_before(move |_| render);
    button.name = input.name;
    button.action_types = input.roles;
    button.css_class = input.css_class;
    button.icon_class = input.icon_class;
    button
}

fuzz_target!(|updates: Vec<FuzzUpdate>| {
    let classes = ClassMap::default();
    let mut dom = MemoryDom::new();
    let actions = dom.create_element("div", &["actions"]);
    let body = dom.body();
    dom.append_child(body, actions);
    let id = allocate(&dom, "fuzz-");

    for update in updates.into_iter().take(16) {
        let before = dom.children(actions);
        let (update, expected) = match update {
            FuzzUpdate::Replace(list) => {
                let list: Vec<ButtonDescriptor> = list.into_iter().take(32).map(descriptor).collect();
                let expected = list.iter().filter(|b| b.check_before.as_ref().is_none_or(|g| g(b))).count();
                (ButtonsUpdate::Replace(list), Some(expected))
            }
            FuzzUpdate::Clear => (ButtonsUpdate::Clear, Some(0)),
            FuzzUpdate::Keep => (ButtonsUpdate::Keep, None),
        };

        let created = render_buttons(&mut dom, actions, &update, &id, &classes);
        let after = dom.children(actions);
        match expected {
            Some(count) => {
                assert_eq!(after.len(), count);
                assert_eq!(created, after);
            }
            None => assert_eq!(after, before),
        }

        if let ButtonsUpdate::Replace(list) = &update {
            let rendered = list.iter().filter(|b| b.check_before.as_ref().is_none_or(|g| g(b)));
            for (node, descriptor) in after.iter().zip(rendered) {
                if descriptor.render_mode(&classes) == RenderMode::Semantic {
                    assert!(dom.has_class(*node, &classes.base));
                    assert!(dom.has_class(*node, &classes.button));
                }
            }
        }
    }
});
