use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Opaque handle to a host-side UI element (panel, button, label, image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiHandle(pub u32);

impl UiHandle {
    /// Largest handle an animated panel may use: panel handles travel to
    /// the host as `f32` in [`PanelVisual`], exact only up to 2^24.
    pub const MAX_PANEL: u32 = 1 << 24;

    pub fn fits_panel_visual(self) -> bool {
        self.0 <= Self::MAX_PANEL
    }
}

/// Identifier of a node in the world hierarchy (a collider owner or a POI anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Identifier of a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(pub u32);

/// Opaque handle to an audio or video clip owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u32);

/// Visual state of an answer button. The host maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    #[default]
    Neutral,
    Correct,
    Wrong,
}

/// A host call recorded by [`CommandBuffer`](crate::api::host::CommandBuffer).
/// Serialized to JSON and replayed by the browser shell every frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    SetActive { handle: UiHandle, active: bool },
    SetTint { handle: UiHandle, tint: Tint },
    SetText { handle: UiHandle, text: String },
    SetInteractable { handle: UiHandle, interactable: bool },
    PlacePanel { handle: UiHandle, position: [f32; 3] },
    Play { clip: ClipId, volume: f32 },
    Stop { clip: ClipId },
    StopAll,
    LoadScene { name: String },
}

/// Per-frame visual state of one animated panel, laid out for direct reads
/// from linear memory by the host.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PanelVisual {
    /// Panel handle; exact because panel handles are at most
    /// [`UiHandle::MAX_PANEL`].
    pub handle: f32,
    pub opacity: f32,
    pub scale: f32,
    /// 1.0 while the panel object is active, 0.0 otherwise.
    pub active: f32,
}

impl PanelVisual {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_serializes_with_op_tag() {
        let json = serde_json::to_string(&HostCommand::SetTint {
            handle: UiHandle(7),
            tint: Tint::Wrong,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"set_tint","handle":7,"tint":"wrong"}"#);
    }

    #[test]
    fn panel_visual_is_four_floats() {
        assert_eq!(
            std::mem::size_of::<PanelVisual>(),
            PanelVisual::FLOATS * std::mem::size_of::<f32>()
        );
    }
}
