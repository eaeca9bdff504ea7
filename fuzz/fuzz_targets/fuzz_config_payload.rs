#![no_main]

//! Configuration loaders must reject malformed input with an error, never panic.

use libfuzzer_sys::fuzz_target;
use smodal_dialog::{ButtonsUpdate, DialogConfig, SettingsLayer, Transition};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = DialogConfig::from_toml_str(text);
    let _ = DialogConfig::from_json_str(text);
    let _ = SettingsLayer::from_toml_str(text);
    let _ = SettingsLayer::from_json_str(text);

    if let Ok(ButtonsUpdate::Replace(list)) = ButtonsUpdate::from_json_str(text) {
        assert!(list.iter().all(|b| b.action.is_none() && b.check_before.is_none()));
    }

    if let Ok(transition) = text.parse::<Transition>() {
        assert_eq!(transition.as_str().parse::<Transition>().ok(), Some(transition));
    }
});
