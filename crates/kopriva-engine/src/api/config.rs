use serde::Deserialize;
use thiserror::Error;
use crate::api::types::{ClipId, NodeId, PoiId, UiHandle};
use crate::components::panel::PanelConfig;
use crate::poi::{PoiConfig, PoiKind};
use crate::quiz::{QuestionBank, QuizLayout, QuizSettings};
use crate::scenes::{ArLayout, MenuLayout};

/// Scene name the menu's AR button loads.
pub const DEFAULT_AR_SCENE: &str = "SampleScene";
/// Scene name the AR back button returns to.
pub const DEFAULT_MENU_SCENE: &str = "MainMenu";

/// Application configuration, supplied by the host as JSON at startup.
/// Every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub menu_scene: String,
    pub ar_scene: String,
    /// Scene entered at startup (must equal one of the two above).
    pub start_scene: String,
    pub quiz: QuizSettings,
    /// Tween settings for every animated panel.
    pub panel: PanelConfig,
    pub menu_layout: MenuLayout,
    pub quiz_layout: QuizLayout,
    pub ar_layout: ArLayout,
    pub pois: Vec<PoiConfig>,
    /// Replaces the built-in nettle questions.
    pub questions: Option<QuestionBank>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            menu_scene: DEFAULT_MENU_SCENE.to_owned(),
            ar_scene: DEFAULT_AR_SCENE.to_owned(),
            start_scene: DEFAULT_MENU_SCENE.to_owned(),
            quiz: QuizSettings::default(),
            panel: PanelConfig::default(),
            menu_layout: MenuLayout::default(),
            quiz_layout: QuizLayout::default(),
            ar_layout: ArLayout::default(),
            pois: default_pois(),
            questions: None,
        }
    }
}

/// The AR scene's stock POIs: a recipe card, a video and a narration clip.
pub fn default_pois() -> Vec<PoiConfig> {
    vec![
        PoiConfig::new(PoiId(1), NodeId(1), PoiKind::PhotoRecipe)
            .with_panel(UiHandle(300), Some(UiHandle(301)))
            .with_background(UiHandle(302)),
        PoiConfig::new(PoiId(2), NodeId(2), PoiKind::Video)
            .with_panel(UiHandle(310), Some(UiHandle(311)))
            .with_clip(ClipId(1)),
        PoiConfig::new(PoiId(3), NodeId(3), PoiKind::Audio).with_clip(ClipId(2)),
    ]
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene name must not be empty")]
    EmptySceneName,

    #[error("start scene {0:?} is neither the menu nor the AR scene")]
    UnknownStartScene(String),

    #[error("menu and AR scene share the name {0:?}")]
    SceneNameClash(String),

    #[error("panel handle {0} is above the panel limit of 2^24")]
    PanelHandleTooLarge(u32),
}

impl AppConfig {
    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.menu_scene.is_empty() || self.ar_scene.is_empty() {
            return Err(ConfigError::EmptySceneName);
        }
        if self.menu_scene == self.ar_scene {
            return Err(ConfigError::SceneNameClash(self.menu_scene.clone()));
        }
        if self.start_scene != self.menu_scene && self.start_scene != self.ar_scene {
            return Err(ConfigError::UnknownStartScene(self.start_scene.clone()));
        }
        let overlays = [self.ar_layout.info_overlay, self.ar_layout.help_overlay];
        let poi_panels = self.pois.iter().filter_map(|poi| poi.panel);
        if let Some(handle) = overlays.into_iter().chain(poi_panels).find(|h| !h.fits_panel_visual()) {
            return Err(ConfigError::PanelHandleTooLarge(handle.0));
        }
        Ok(())
    }

    /// The configured question bank, or the built-in one.
    pub fn question_bank(&self) -> QuestionBank {
        self.questions.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.ar_scene, "SampleScene");
        assert_eq!(config.menu_scene, "MainMenu");
        assert_eq!(config.quiz.feedback_delay, 1.5);
        assert_eq!(config.panel.duration, 0.18);
        assert_eq!(config.pois.len(), 3);
        assert_eq!(config.question_bank().len(), 10);
    }

    #[test]
    fn partial_overrides() {
        let json = r#"{
            "quiz": { "feedback_delay": 1.0, "thresholds": { "best": 1.0 } },
            "panel": { "animate": false },
            "quiz_layout": { "back_button": 77 },
            "pois": [ { "id": 9, "anchor": 4, "kind": "video", "panel": 50, "clip": 6 } ],
            "questions": [ { "prompt": "P?", "answers": ["a", "b", "c", "d"], "correct": 2 } ]
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.quiz.feedback_delay, 1.0);
        assert_eq!(config.quiz.thresholds.best, 1.0);
        assert_eq!(config.quiz.thresholds.good, 0.7);
        assert!(!config.panel.animate);
        assert_eq!(config.panel.hidden_scale, 0.85);
        assert_eq!(config.quiz_layout.back_button, UiHandle(77));
        assert_eq!(config.quiz_layout.question_text, UiHandle(100));
        assert_eq!(config.pois[0].max_distance(), 100.0);
        assert_eq!(config.question_bank().len(), 1);
    }

    #[test]
    fn invalid_bank_is_a_json_error() {
        let json = r#"{ "questions": [ { "prompt": "P?", "answers": ["a"], "correct": 0 } ] }"#;
        assert!(matches!(AppConfig::from_json(json), Err(ConfigError::Json(_))));
    }

    #[test]
    fn scene_names_are_validated() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "start_scene": "Elsewhere" }"#),
            Err(ConfigError::UnknownStartScene(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "ar_scene": "MainMenu" }"#),
            Err(ConfigError::SceneNameClash(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "menu_scene": "" }"#),
            Err(ConfigError::EmptySceneName)
        ));
    }

    #[test]
    fn panel_handles_must_fit_the_visual_buffer() {
        let json = r#"{ "pois": [ { "id": 1, "anchor": 1, "kind": "photo_recipe", "panel": 16777217 } ] }"#;
        assert!(matches!(
            AppConfig::from_json(json),
            Err(ConfigError::PanelHandleTooLarge(16_777_217))
        ));
        let json = r#"{ "ar_layout": { "help_overlay": 4294967295 } }"#;
        assert!(matches!(
            AppConfig::from_json(json),
            Err(ConfigError::PanelHandleTooLarge(u32::MAX))
        ));
        let json = r#"{ "pois": [ { "id": 1, "anchor": 1, "kind": "photo_recipe", "panel": 16777216 } ] }"#;
        assert!(AppConfig::from_json(json).is_ok());
    }
}
