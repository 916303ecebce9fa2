use crate::error::ConfigError;
use crate::playback::TrackName;
use dioxus::logger::tracing::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const EMBEDDED_CONFIG: &str = include_str!("../assets/landing.json");

/// One audio track offered on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub name: TrackName,
    pub label: String,
    pub src: String,
    /// Name of the global function that plays this track from outside the page.
    pub entry_point: String,
    #[serde(default = "default_preload")]
    pub preload: String,
}

fn default_preload() -> String {
    "auto".to_string()
}

impl TrackSpec {
    fn new(name: &str, label: &str, src: &str, entry_point: &str) -> Self {
        Self {
            name: TrackName::new(name),
            label: label.to_string(),
            src: src.to_string(),
            entry_point: entry_point.to_string(),
            preload: default_preload(),
        }
    }
}

/// Element `LandingPage` renders for the voice widget.
pub const WIDGET_ELEMENT: &str = "elevenlabs-convai";

/// Names the HTML parser reserves even though they contain a hyphen.
const RESERVED_ELEMENT_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// ASCII subset of the custom element name production: a lowercase letter first,
/// at least one hyphen, then lowercase letters, digits, `-`, `.` or `_`.
pub fn is_custom_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|first| first.is_ascii_lowercase())
        && tag.contains('-')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        && !RESERVED_ELEMENT_NAMES.contains(&tag)
}

/// Embedded voice widget and the branding it injects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Custom element the vendor script defines. Only used to locate the widget.
    pub tag: String,
    pub agent_id: String,
    pub script_src: String,
    pub vendor_domain: String,
    pub frame_tag: String,
    /// Class-name substrings hidden by the injected stylesheet.
    pub style_markers: Vec<String>,
    /// Class-name substrings hidden through inline styles.
    pub inline_markers: Vec<String>,
    pub attempt_delays_ms: Vec<u32>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            tag: WIDGET_ELEMENT.to_string(),
            agent_id: "agent_3101k72kq67be1s959q6kp3b4fex".to_string(),
            script_src: "https://unpkg.com/@elevenlabs/convai-widget-embed".to_string(),
            vendor_domain: "elevenlabs".to_string(),
            frame_tag: "iframe".to_string(),
            style_markers: vec![
                "branding".to_string(),
                "powered".to_string(),
                "footer".to_string(),
            ],
            inline_markers: vec!["branding".to_string(), "powered".to_string()],
            attempt_delays_ms: vec![1000, 2000, 3000],
        }
    }
}

/// Landing page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub title: String,
    pub tagline: String,
    pub call_to_action: String,
    pub tracks: Vec<TrackSpec>,
    pub widget: WidgetConfig,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            title: "NOVA".to_string(),
            tagline: "Your Intelligent AI Voice Assistant".to_string(),
            call_to_action: "Ask me anything!".to_string(),
            tracks: vec![
                TrackSpec::new(
                    "datamap",
                    "Datamap Copilot",
                    "/scripts/datamap_copilot.mp3",
                    "playDatamapAudio",
                ),
                TrackSpec::new(
                    "finbotix",
                    "Finbotix",
                    "/scripts/finbotix.mp3",
                    "playFinbotixAudio",
                ),
                TrackSpec::new(
                    "smartsearch",
                    "Smart Search",
                    "/scripts/smart_search.mp3",
                    "playSmartSearchAudio",
                ),
            ],
            widget: WidgetConfig::default(),
        }
    }
}

impl LandingConfig {
    /// Load the embedded configuration, falling back to defaults when it is unusable.
    pub fn load() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                warn!("landing config rejected, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracks.is_empty() {
            return Err(ConfigError::EmptyTracks);
        }
        if self.widget.tag.trim().is_empty() {
            return Err(ConfigError::EmptyWidgetTag);
        }
        if !is_custom_element_name(&self.widget.tag) {
            return Err(ConfigError::InvalidWidgetTag {
                tag: self.widget.tag.clone(),
            });
        }

        let mut names = HashSet::new();
        let mut entry_points = HashSet::new();
        for track in &self.tracks {
            if !names.insert(track.name.as_str()) {
                return Err(ConfigError::DuplicateTrack {
                    name: track.name.to_string(),
                });
            }
            if !entry_points.insert(track.entry_point.as_str()) {
                return Err(ConfigError::DuplicateEntryPoint {
                    name: track.entry_point.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = LandingConfig::from_json(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config, LandingConfig::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = LandingConfig::from_json(r#"{ "title": "ORBIT" }"#).unwrap();
        assert_eq!(config.title, "ORBIT");
        assert_eq!(config.tracks.len(), 3);
        assert_eq!(config.widget.attempt_delays_ms, vec![1000, 2000, 3000]);
    }

    #[test]
    fn preload_defaults_to_auto() {
        let raw = r#"{
            "tracks": [
                { "name": "intro", "label": "Intro", "src": "/intro.mp3", "entry_point": "playIntro" }
            ]
        }"#;
        let config = LandingConfig::from_json(raw).unwrap();
        assert_eq!(config.tracks[0].preload, "auto");
        assert_eq!(config.tracks[0].name.as_str(), "intro");
    }

    #[test]
    fn empty_track_list_is_rejected() {
        let err = LandingConfig::from_json(r#"{ "tracks": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTracks));
    }

    #[test]
    fn duplicate_track_names_are_rejected() {
        let mut config = LandingConfig::default();
        config.tracks[1].name = TrackName::new("datamap");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTrack { name } if name == "datamap"));
    }

    #[test]
    fn duplicate_entry_points_are_rejected() {
        let mut config = LandingConfig::default();
        config.tracks[2].entry_point = "playDatamapAudio".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEntryPoint { .. }));
    }

    #[test]
    fn blank_widget_tag_is_rejected() {
        let mut config = LandingConfig::default();
        config.widget.tag = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWidgetTag)
        ));
    }

    #[test]
    fn widget_tag_must_be_a_custom_element_name() {
        for tag in [
            "elevenlabs-convai onmouseover=\"alert(1)\"",
            "elevenlabs-convai><script>",
            "Elevenlabs-Convai",
            "convai",
            "1-widget",
            "font-face",
        ] {
            let mut config = LandingConfig::default();
            config.widget.tag = tag.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidWidgetTag { .. })),
                "{tag} accepted"
            );
        }
    }

    #[test]
    fn custom_element_names() {
        assert!(is_custom_element_name(WIDGET_ELEMENT));
        assert!(is_custom_element_name("nova-widget.v2_beta"));
        assert!(!is_custom_element_name("-widget"));
        assert!(!is_custom_element_name("widget"));
        assert!(!is_custom_element_name("annotation-xml"));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = LandingConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
