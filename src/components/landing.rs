use crate::components::{AudioController, BrandingGuard, TrackControls};
use crate::config::LandingConfig;
use crate::playback::{PlatformAudio, PlaybackCommand, PlaybackController};
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

/// The page's single playback controller, shared with buttons and the audio manager.
#[derive(Clone, Copy)]
pub struct PlaybackSignal(pub Signal<PlaybackController<PlatformAudio>>);

/// Apply `command` to the controller behind `controller`, logging rejected commands.
pub fn dispatch_command(
    mut controller: Signal<PlaybackController<PlatformAudio>>,
    command: PlaybackCommand,
) {
    if let Err(err) = command.apply(&mut *controller.write()) {
        warn!("playback command ignored: {err}");
    }
}

#[component]
pub fn LandingPage() -> Element {
    let config = use_context::<LandingConfig>();
    let controller = use_signal({
        let tracks = config.tracks.clone();
        move || PlaybackController::<PlatformAudio>::new(&tracks)
    });
    use_context_provider(|| PlaybackSignal(controller));

    let agent_id = config.widget.agent_id.clone();
    let script_src = config.widget.script_src.clone();

    rsx! {
        div { class: "container",
            div { class: "pulse",
                div { class: "ai-logo" }
            }

            h1 { class: "logo", "{config.title}" }
            p { class: "tagline", "{config.tagline}" }

            div { class: "wave-container",
                for bar in 0..7 {
                    div { key: "{bar}", class: "wave-bar" }
                }
            }

            p { class: "cta-text", "{config.call_to_action}" }

            div { class: "audio-controls",
                for track in config.tracks.iter() {
                    TrackControls {
                        key: "{track.name}",
                        name: track.name.clone(),
                        label: track.label.clone(),
                    }
                }
            }

            div { class: "widget-host",
                elevenlabs-convai { "agent-id": "{agent_id}" }
            }
            document::Script { src: script_src, r#async: true }

            AudioController {}
            BrandingGuard {}
        }
    }
}
