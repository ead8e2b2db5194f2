//! Configuration for the rendering front-ends.
//!
//! Loads settings from JSON strings/files (file IO left to the app).

use serde::{Deserialize, Serialize};

use crate::raster::DrawMode;

/// Front-end configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Window/status title phrase.
    #[serde(default = "default_title")]
    pub title: String,
    /// Canvas width in pixels; 0 lets the front-end pick.
    #[serde(default)]
    pub width: u32,
    /// Canvas height in pixels; 0 lets the front-end pick.
    #[serde(default)]
    pub height: u32,
    /// Initial drawing algorithm.
    #[serde(default)]
    pub draw_mode: DrawMode,
    /// Mesh file to import at startup; `None` renders the demo cube.
    #[serde(default)]
    pub model: Option<String>,
}

fn default_title() -> String {
    "SW3D Renderer".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: 0,
            height: 0,
            draw_mode: DrawMode::default(),
            model: None,
        }
    }
}

impl RenderConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.title, "SW3D Renderer");
        assert_eq!(cfg.width, 0);
        assert_eq!(cfg.draw_mode, DrawMode::Plain);
        assert!(cfg.model.is_none());
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let cfg = RenderConfig::from_json_str(r#"{"width": 120, "draw_mode": "scanline"}"#).unwrap();
        assert_eq!(cfg.width, 120);
        assert_eq!(cfg.height, 0);
        assert_eq!(cfg.draw_mode, DrawMode::Scanline);
        assert_eq!(cfg.title, "SW3D Renderer");
    }

    #[test]
    fn test_round_trip() {
        let mut cfg = RenderConfig::default();
        cfg.model = Some("models/teapot.obj".to_string());
        cfg.draw_mode = DrawMode::Bresenham;
        let json = serde_json::to_string(&cfg).unwrap();
        let back = RenderConfig::from_json_str(&json).unwrap();
        assert_eq!(back.model.as_deref(), Some("models/teapot.obj"));
        assert_eq!(back.draw_mode, DrawMode::Bresenham);
    }
}
