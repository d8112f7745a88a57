pub mod ar;
pub mod menu;

pub use ar::{ArLayout, ArScene, Overlay, SceneOcclusion};
pub use menu::{MenuLayout, MenuScene, MenuScreen};

/// Something a scene needs the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRequest {
    /// Switch to the named scene.
    LoadScene(String),
}
