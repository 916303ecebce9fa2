use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::branding::{BrandingRules, BrandingWatcher, BrowserDom, BrowserDriver};
#[cfg(target_arch = "wasm32")]
use crate::config::LandingConfig;
#[cfg(not(target_arch = "wasm32"))]
use dioxus::logger::tracing::debug;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

/// Keeps the widget's branding hidden while mounted.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn BrandingGuard() -> Element {
    let config = use_context::<LandingConfig>();
    let watcher = use_hook(|| Rc::new(RefCell::new(None::<BrandingWatcher<BrowserDriver>>)));

    {
        let watcher = watcher.clone();
        use_effect(move || {
            if watcher.borrow().is_some() {
                return;
            }
            let Some(dom) = BrowserDom::from_window() else {
                return;
            };
            let driver = BrowserDriver::new(dom.document().clone());
            let rules = BrandingRules::from_config(&config.widget);
            *watcher.borrow_mut() = Some(BrandingWatcher::start(
                &driver,
                Rc::new(dom),
                Rc::new(rules),
                &config.widget.attempt_delays_ms,
            ));
        });
    }

    use_drop(move || {
        watcher.borrow_mut().take();
    });

    rsx! {}
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn BrandingGuard() -> Element {
    use_hook(|| debug!("branding watcher is browser-only"));
    rsx! {}
}
