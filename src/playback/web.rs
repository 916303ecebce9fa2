// Browser bindings: hidden audio elements, ended listeners and the `window` entry point surface.
use super::{InvocationSurface, MediaHandle, Track};
use crate::error::PlaybackError;
use dioxus::logger::tracing::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlAudioElement, Window};

/// Media handle backed by an `<audio>` element.
#[derive(Clone)]
pub struct WebAudio {
    element: HtmlAudioElement,
}

impl WebAudio {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }
}

impl MediaHandle for WebAudio {
    fn play(&self) {
        // Autoplay policy may reject the request; that is not an error for the page.
        if let Ok(promise) = self.element.play() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    debug!("play request rejected: {err:?}");
                }
            });
        }
    }

    fn pause(&self) {
        let _ = self.element.pause();
    }

    fn is_playing(&self) -> bool {
        !self.element.paused()
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn set_position(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }
}

/// Find the hidden audio element for `track`, creating it on first use.
pub fn get_or_create_track_element<H>(track: &Track<H>) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;
    let id = track.element_id();

    if let Some(existing) = document.get_element_by_id(&id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let spec = track.spec();
    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(&id);
    audio.set_src(&spec.src);
    audio.set_attribute("preload", &spec.preload).ok()?;
    audio.set_attribute("style", "display: none").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// `ended` listener on an audio element, removed again on drop.
pub struct EndedListener {
    target: HtmlAudioElement,
    callback: Closure<dyn FnMut()>,
}

impl EndedListener {
    pub fn attach<F>(target: &HtmlAudioElement, on_ended: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::wrap(Box::new(on_ended) as Box<dyn FnMut()>);
        let _ = target.add_event_listener_with_callback("ended", callback.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            callback,
        }
    }
}

impl Drop for EndedListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("ended", self.callback.as_ref().unchecked_ref());
    }
}

/// Publishes entry points as properties of `window`.
///
/// Uninstalling deletes the property but leaks the closure, so a reference the
/// widget kept stays callable instead of throwing into freed Rust memory.
pub struct WindowSurface {
    window: Window,
    closures: RefCell<HashMap<String, Closure<dyn Fn()>>>,
}

impl WindowSurface {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: window()?,
            closures: RefCell::new(HashMap::new()),
        })
    }
}

impl InvocationSurface for WindowSurface {
    fn install(&self, name: &str, handler: Box<dyn Fn()>) -> Result<(), PlaybackError> {
        let closure = Closure::wrap(handler);
        js_sys::Reflect::set(&self.window, &JsValue::from_str(name), closure.as_ref())
            .map_err(|err| PlaybackError::Surface {
                name: name.to_string(),
                reason: format!("{err:?}"),
            })?;
        self.closures.borrow_mut().insert(name.to_string(), closure);
        Ok(())
    }

    fn uninstall(&self, name: &str) {
        let _ = js_sys::Reflect::delete_property(&self.window, &JsValue::from_str(name));
        if let Some(closure) = self.closures.borrow_mut().remove(name) {
            closure.forget();
        }
    }
}
