//! Audio Manager - binds the playback controller to the page's audio elements.
//! Elements, `ended` listeners and the global entry points live exactly as long as
//! this component is mounted.

use crate::components::PlaybackSignal;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::dispatch_command;
#[cfg(target_arch = "wasm32")]
use crate::config::LandingConfig;
#[cfg(target_arch = "wasm32")]
use crate::playback::{
    get_or_create_track_element, EndedListener, EntryPoints, WebAudio, WindowSurface,
};
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(not(target_arch = "wasm32"))]
use dioxus::logger::tracing::debug;
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{info, warn};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
struct TrackBindings {
    _listeners: Vec<EndedListener>,
    _entry_points: Option<EntryPoints<WindowSurface>>,
}

#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let config = use_context::<LandingConfig>();
    let mut controller = use_context::<PlaybackSignal>().0;
    let bindings = use_hook(|| Rc::new(RefCell::new(None::<TrackBindings>)));

    {
        let bindings = bindings.clone();
        use_effect(move || {
            if bindings.borrow().is_some() {
                return;
            }

            let runtime = Runtime::current();
            let mut listeners = Vec::with_capacity(config.tracks.len());

            for spec in &config.tracks {
                let element = controller
                    .peek()
                    .track(&spec.name)
                    .and_then(get_or_create_track_element);
                let Some(element) = element else {
                    warn!(track = %spec.name, "audio element unavailable");
                    continue;
                };

                let name = spec.name.clone();
                let runtime_ended = runtime.clone();
                listeners.push(EndedListener::attach(&element, move || {
                    let _guard = RuntimeGuard::new(runtime_ended.clone());
                    if let Err(err) = controller.write().on_track_ended(&name) {
                        warn!("ended notification ignored: {err}");
                    }
                }));

                if let Err(err) = controller.write().attach(&spec.name, WebAudio::new(element)) {
                    warn!("{err}");
                }
            }

            let entry_points = WindowSurface::new().map(|surface| {
                let runtime_entry = runtime.clone();
                EntryPoints::register(surface, &config.tracks, move |command| {
                    let _guard = RuntimeGuard::new(runtime_entry.clone());
                    dispatch_command(controller, command);
                })
            });

            info!(
                tracks = listeners.len(),
                entry_points = entry_points.as_ref().map_or(0, |points| points.names().len()),
                "audio controller mounted"
            );
            *bindings.borrow_mut() = Some(TrackBindings {
                _listeners: listeners,
                _entry_points: entry_points,
            });
        });
    }

    use_drop(move || {
        bindings.borrow_mut().take();
        if let Ok(mut controller) = controller.try_write() {
            controller.teardown();
        }
        info!("audio controller unmounted");
    });

    rsx! {}
}

/// Without a browser there are no audio elements to attach; every control stays a no-op.
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    let controller = use_context::<PlaybackSignal>().0;
    use_hook(move || {
        debug!(
            tracks = controller.peek().tracks().count(),
            "audio elements are browser-only, playback controls are inert"
        );
    });
    rsx! {}
}
