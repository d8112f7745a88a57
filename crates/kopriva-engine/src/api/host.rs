// api/host.rs
//
// Boundary with the excluded collaborators: the UI toolkit, the media players
// and scene navigation. The core only ever talks to these traits.

use std::collections::HashSet;
use glam::Vec3;
use crate::api::types::{ClipId, HostCommand, Tint, UiHandle};

/// Operations the core needs from the scene/UI host.
pub trait UiHost {
    fn set_active(&mut self, handle: UiHandle, active: bool);
    fn set_tint(&mut self, handle: UiHandle, tint: Tint);
    fn set_text(&mut self, handle: UiHandle, text: &str);
    fn set_interactable(&mut self, handle: UiHandle, interactable: bool);
    /// Move a world-space panel to `position`.
    fn place_panel(&mut self, handle: UiHandle, position: Vec3);
}

/// Audio/video clip playback. Clips are opaque to the core.
pub trait MediaHost {
    fn play(&mut self, clip: ClipId, volume: f32);
    fn stop(&mut self, clip: ClipId);
    fn is_playing(&self, clip: ClipId) -> bool;
    /// Stop every clip the host is playing.
    fn stop_all(&mut self);
}

/// Scene navigation. Returns false when the host refused the request.
pub trait Navigator {
    fn load_scene(&mut self, name: &str) -> bool;
}

/// Everything the frame loop needs from its host.
pub trait Host: UiHost + MediaHost + Navigator {}

impl<T: UiHost + MediaHost + Navigator> Host for T {}

/// Host implementation that records every call as a [`HostCommand`].
///
/// Also tracks which clips are playing, since the browser shell can only
/// report playback state asynchronously (see [`CommandBuffer::clip_finished`]).
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<HostCommand>,
    playing: HashSet<ClipId>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The host reports that a clip reached its end on its own.
    pub fn clip_finished(&mut self, clip: ClipId) {
        self.playing.remove(&clip);
    }

    /// Drain all recorded commands.
    pub fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain all recorded commands as a JSON array.
    pub fn drain_json(&mut self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self.commands)?;
        self.commands.clear();
        Ok(json)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of clips currently playing.
    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }
}

impl UiHost for CommandBuffer {
    fn set_active(&mut self, handle: UiHandle, active: bool) {
        self.commands.push(HostCommand::SetActive { handle, active });
    }

    fn set_tint(&mut self, handle: UiHandle, tint: Tint) {
        self.commands.push(HostCommand::SetTint { handle, tint });
    }

    fn set_text(&mut self, handle: UiHandle, text: &str) {
        self.commands.push(HostCommand::SetText { handle, text: text.to_owned() });
    }

    fn set_interactable(&mut self, handle: UiHandle, interactable: bool) {
        self.commands.push(HostCommand::SetInteractable { handle, interactable });
    }

    fn place_panel(&mut self, handle: UiHandle, position: Vec3) {
        self.commands.push(HostCommand::PlacePanel { handle, position: position.to_array() });
    }
}

impl MediaHost for CommandBuffer {
    fn play(&mut self, clip: ClipId, volume: f32) {
        self.playing.insert(clip);
        self.commands.push(HostCommand::Play { clip, volume });
    }

    fn stop(&mut self, clip: ClipId) {
        self.playing.remove(&clip);
        self.commands.push(HostCommand::Stop { clip });
    }

    fn is_playing(&self, clip: ClipId) -> bool {
        self.playing.contains(&clip)
    }

    fn stop_all(&mut self) {
        self.playing.clear();
        self.commands.push(HostCommand::StopAll);
    }
}

impl Navigator for CommandBuffer {
    fn load_scene(&mut self, name: &str) -> bool {
        self.commands.push(HostCommand::LoadScene { name: name.to_owned() });
        true
    }
}

// Lookup helpers for tests across the crate.
#[cfg(test)]
impl CommandBuffer {
    /// Most recent text set on `handle`.
    pub(crate) fn last_text(&self, handle: UiHandle) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetText { handle: h, text } if *h == handle => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent tint set on `handle`.
    pub(crate) fn last_tint(&self, handle: UiHandle) -> Option<Tint> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetTint { handle: h, tint } if *h == handle => Some(*tint),
            _ => None,
        })
    }

    /// Most recent active flag set on `handle`.
    pub(crate) fn last_active(&self, handle: UiHandle) -> Option<bool> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetActive { handle: h, active } if *h == handle => Some(*active),
            _ => None,
        })
    }

    /// Most recent interactable flag set on `handle`.
    pub(crate) fn last_interactable(&self, handle: UiHandle) -> Option<bool> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetInteractable { handle: h, interactable } if *h == handle => {
                Some(*interactable)
            }
            _ => None,
        })
    }

    /// Count of recorded commands matching `pred`.
    pub(crate) fn count(&self, pred: impl Fn(&HostCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}
