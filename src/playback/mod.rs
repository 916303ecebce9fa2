//! Playback - exclusive playback across a fixed set of named tracks.
//! The controller owns the only copy of "what is playing"; the UI reads it through a signal
//! and outside callers reach it through registered entry points.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use crate::config::TrackSpec;
use crate::error::PlaybackError;
use dioxus::logger::tracing::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

mod commands;
#[cfg(target_arch = "wasm32")]
mod web;

pub use commands::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;

/// Stable identifier of a track, e.g. `datamap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackName(String);

impl TrackName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Playable audio resource behind a track.
///
/// Requests are fire-and-forget: `play` may complete later (or be refused by the
/// platform) and the controller only learns about completion through
/// [`PlaybackController::on_track_ended`].
pub trait MediaHandle {
    fn play(&self);
    fn pause(&self);
    fn is_playing(&self) -> bool;
    fn position(&self) -> f64;
    fn set_position(&self, seconds: f64);

    /// Pause and seek back to the start.
    fn rewind(&self) {
        self.pause();
        self.set_position(0.0);
    }
}

/// Handle type used on targets without a browser media element.
/// It is never attached, so every operation on the controller is a no-op there.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedAudio;

#[cfg(not(target_arch = "wasm32"))]
impl MediaHandle for DetachedAudio {
    fn play(&self) {}
    fn pause(&self) {}
    fn is_playing(&self) -> bool {
        false
    }
    fn position(&self) -> f64 {
        0.0
    }
    fn set_position(&self, _seconds: f64) {}
}

#[cfg(target_arch = "wasm32")]
pub type PlatformAudio = WebAudio;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformAudio = DetachedAudio;

/// A configured track and, once the page has created it, its media handle.
pub struct Track<H> {
    spec: TrackSpec,
    handle: Option<H>,
}

impl<H> Track<H> {
    pub fn name(&self) -> &TrackName {
        &self.spec.name
    }

    pub fn spec(&self) -> &TrackSpec {
        &self.spec
    }

    /// DOM id of the hidden audio element backing this track.
    pub fn element_id(&self) -> String {
        format!("nova-track-{}", self.spec.name)
    }
}

pub struct PlaybackController<H> {
    tracks: Vec<Track<H>>,
    current: Option<TrackName>,
}

impl<H: MediaHandle> PlaybackController<H> {
    pub fn new(specs: &[TrackSpec]) -> Self {
        Self {
            tracks: specs
                .iter()
                .cloned()
                .map(|spec| Track { spec, handle: None })
                .collect(),
            current: None,
        }
    }

    fn index_of(&self, name: &TrackName) -> Result<usize, PlaybackError> {
        self.tracks
            .iter()
            .position(|track| track.name() == name)
            .ok_or_else(|| PlaybackError::UnknownTrack {
                name: name.to_string(),
            })
    }

    /// Attach the media handle for `name`, returning the one it replaces.
    pub fn attach(&mut self, name: &TrackName, handle: H) -> Result<Option<H>, PlaybackError> {
        let idx = self.index_of(name)?;
        Ok(self.tracks[idx].handle.replace(handle))
    }

    /// Start `name`, stopping and rewinding every other track first.
    pub fn play(&mut self, name: &TrackName) -> Result<(), PlaybackError> {
        let idx = self.index_of(name)?;
        if self.tracks[idx].handle.is_none() {
            trace!(track = %name, "play ignored, audio element not attached");
            return Ok(());
        }

        for (i, track) in self.tracks.iter().enumerate() {
            if i == idx {
                continue;
            }
            if let Some(handle) = &track.handle {
                handle.rewind();
            }
        }

        if let Some(handle) = &self.tracks[idx].handle {
            handle.play();
        }
        self.current = Some(name.clone());
        Ok(())
    }

    /// Pause `name` in place. Clears the current track even when `name` was not the one playing.
    pub fn pause(&mut self, name: &TrackName) -> Result<(), PlaybackError> {
        let idx = self.index_of(name)?;
        let Some(handle) = &self.tracks[idx].handle else {
            trace!(track = %name, "pause ignored, audio element not attached");
            return Ok(());
        };
        handle.pause();
        self.current = None;
        Ok(())
    }

    pub fn stop(&mut self, name: &TrackName) -> Result<(), PlaybackError> {
        let idx = self.index_of(name)?;
        let Some(handle) = &self.tracks[idx].handle else {
            trace!(track = %name, "stop ignored, audio element not attached");
            return Ok(());
        };
        handle.rewind();
        self.current = None;
        Ok(())
    }

    /// Natural end of `name`. The element keeps its end-of-stream position.
    pub fn on_track_ended(&mut self, name: &TrackName) -> Result<(), PlaybackError> {
        self.index_of(name)?;
        self.current = None;
        Ok(())
    }

    /// Pause and release every handle and forget the current track.
    pub fn teardown(&mut self) -> Vec<H> {
        self.current = None;
        self.tracks
            .iter_mut()
            .filter_map(|track| track.handle.take())
            .inspect(|handle| handle.pause())
            .collect()
    }

    pub fn current(&self) -> Option<&TrackName> {
        self.current.as_ref()
    }

    pub fn is_current(&self, name: &TrackName) -> bool {
        self.current.as_ref() == Some(name)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track<H>> {
        self.tracks.iter()
    }

    pub fn track(&self, name: &TrackName) -> Option<&Track<H>> {
        self.tracks.iter().find(|track| track.name() == name)
    }
}
