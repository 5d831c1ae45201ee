use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlideshowConfig {
    /// Milliseconds between transitions
    pub interval: u64,
    /// Transition effect name, e.g. "fade"
    pub transition: String,
    pub auto_play: bool,
    #[serde(rename = "loop")]
    pub loop_: bool,
    pub random: bool,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval: 5000,
            transition: "fade".to_string(),
            auto_play: true,
            loop_: true,
            random: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    pub show_controls: bool,
    pub show_info: bool,
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_controls: true,
            show_info: true,
            fullscreen: true,
        }
    }
}

/// The document persisted to the settings file.
///
/// The store itself keeps documents as raw JSON so that whatever the admin
/// panel posts is written back unchanged; this type describes the expected
/// shape and provides the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    pub slideshow: SlideshowConfig,
    pub display: DisplayConfig,
}

impl Settings {
    pub fn default_document() -> Value {
        serde_json::json!({
            "slideshow": {
                "interval": 5000,
                "transition": "fade",
                "autoPlay": true,
                "loop": true,
                "random": false
            },
            "display": {
                "showControls": true,
                "showInfo": true,
                "fullscreen": true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_matches_typed_defaults() {
        let typed = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(typed, Settings::default_document());
    }

    #[test]
    fn test_deserializes_camel_case_keys() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "slideshow": {"interval": 1500, "transition": "slide", "autoPlay": false, "loop": false, "random": true},
            "display": {"showControls": false, "showInfo": true, "fullscreen": false}
        }))
        .unwrap();
        assert_eq!(settings.slideshow.interval, 1500);
        assert!(!settings.slideshow.loop_);
        assert!(settings.slideshow.random);
        assert!(!settings.display.show_controls);
    }
}
