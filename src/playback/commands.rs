// Commands that reach the controller from outside the page's own buttons.
use super::{MediaHandle, PlaybackController, TrackName};
use crate::config::TrackSpec;
use crate::error::PlaybackError;
use dioxus::logger::tracing::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Play(TrackName),
    Pause(TrackName),
    Stop(TrackName),
}

impl PlaybackCommand {
    pub fn apply<H: MediaHandle>(
        &self,
        controller: &mut PlaybackController<H>,
    ) -> Result<(), PlaybackError> {
        match self {
            Self::Play(name) => controller.play(name),
            Self::Pause(name) => controller.pause(name),
            Self::Stop(name) => controller.stop(name),
        }
    }
}

/// A namespace where named, zero-argument callables can be published for
/// code the page does not control (the embedded voice widget, the console).
pub trait InvocationSurface {
    fn install(&self, name: &str, handler: Box<dyn Fn()>) -> Result<(), PlaybackError>;
    fn uninstall(&self, name: &str);
}

/// One "play" entry point per track, installed for as long as this value lives.
/// Handlers that outside code kept a reference to do nothing once it is dropped.
pub struct EntryPoints<S: InvocationSurface> {
    surface: S,
    installed: Vec<String>,
    live: Rc<Cell<bool>>,
}

impl<S: InvocationSurface> EntryPoints<S> {
    pub fn register<F>(surface: S, tracks: &[TrackSpec], dispatch: F) -> Self
    where
        F: Fn(PlaybackCommand) + 'static,
    {
        let dispatch = Rc::new(dispatch);
        let live = Rc::new(Cell::new(true));
        let mut installed = Vec::with_capacity(tracks.len());

        for track in tracks {
            let dispatch = dispatch.clone();
            let live = live.clone();
            let name = track.name.clone();
            let handler = Box::new(move || {
                if live.get() {
                    dispatch(PlaybackCommand::Play(name.clone()));
                } else {
                    debug!(track = %name, "entry point called after removal");
                }
            });
            match surface.install(&track.entry_point, handler) {
                Ok(()) => {
                    debug!(entry_point = %track.entry_point, track = %track.name, "entry point installed");
                    installed.push(track.entry_point.clone());
                }
                Err(err) => warn!("{err}"),
            }
        }

        Self {
            surface,
            installed,
            live,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.installed
    }
}

impl<S: InvocationSurface> Drop for EntryPoints<S> {
    fn drop(&mut self) {
        self.live.set(false);
        for name in self.installed.drain(..) {
            self.surface.uninstall(&name);
        }
        debug!("entry points removed");
    }
}
