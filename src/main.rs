use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

mod branding;
mod components;
mod config;
mod error;
mod playback;

use components::LandingPage;
use config::LandingConfig;

const LANDING_CSS: Asset = asset!("/assets/styling/landing.css");

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(LandingConfig::load);
    use_context_provider({
        let config = config.clone();
        move || config
    });

    rsx! {
        document::Title { "{config.title}" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "theme-color", content: "#1e1b4b" }
        document::Stylesheet { href: LANDING_CSS }

        LandingPage {}
    }
}
