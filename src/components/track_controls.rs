use crate::components::{dispatch_command, PlaybackSignal};
use crate::playback::{MediaHandle, PlaybackCommand, PlaybackController, TrackName};
use dioxus::prelude::*;

/// Which of a track's buttons accept clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackButtons {
    pub play: bool,
    pub pause: bool,
    pub stop: bool,
}

/// Play is offered while the track is not current; Pause and Stop only while it is.
pub fn track_buttons<H: MediaHandle>(
    controller: &PlaybackController<H>,
    name: &TrackName,
) -> TrackButtons {
    let active = controller.is_current(name);
    TrackButtons {
        play: !active,
        pause: active,
        stop: active,
    }
}

/// Play / Pause / Stop row for one track
#[component]
pub fn TrackControls(name: TrackName, label: String) -> Element {
    let controller = use_context::<PlaybackSignal>().0;
    let buttons = track_buttons(&*controller.read(), &name);

    let on_play = {
        let name = name.clone();
        move |_| dispatch_command(controller, PlaybackCommand::Play(name.clone()))
    };
    let on_pause = {
        let name = name.clone();
        move |_| dispatch_command(controller, PlaybackCommand::Pause(name.clone()))
    };
    let on_stop = {
        let name = name.clone();
        move |_| dispatch_command(controller, PlaybackCommand::Stop(name.clone()))
    };

    rsx! {
        div { class: "audio-track",
            span { class: "audio-label", "{label}" }
            div { class: "audio-buttons",
                button { r#type: "button", disabled: !buttons.play, onclick: on_play, "Play" }
                button { r#type: "button", disabled: !buttons.pause, onclick: on_pause, "Pause" }
                button { r#type: "button", disabled: !buttons.stop, onclick: on_stop, "Stop" }
            }
        }
    }
}
