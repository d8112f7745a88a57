use serde::{Deserialize, Serialize};
use crate::api::host::MediaHost;
use crate::api::types::ClipId;

/// Whether a POI's clip is currently audible/visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Per-POI audio behaviour. Both flags are explicit configuration; the
/// application never assumed one policy for every POI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioPolicy {
    /// Ignore every activation after the first successful play.
    pub play_only_once: bool,
    /// A tap while playing stops the clip (otherwise it is ignored).
    pub stop_if_clicked_again: bool,
    /// Playback volume in [0, 1].
    pub volume: f32,
}

impl Default for AudioPolicy {
    fn default() -> Self {
        Self {
            play_only_once: false,
            stop_if_clicked_again: true,
            volume: 1.0,
        }
    }
}

/// What an audio activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOutcome {
    Started,
    Stopped,
    /// Blocked by policy (already played once, or playing without toggle).
    Ignored,
    MissingClip,
}

/// Single-clip audio playback with toggle and play-once semantics.
#[derive(Debug, Clone)]
pub struct AudioPlayback {
    clip: Option<ClipId>,
    policy: AudioPolicy,
    has_played_once: bool,
}

impl AudioPlayback {
    pub fn new(clip: Option<ClipId>, policy: AudioPolicy) -> Self {
        Self {
            clip,
            policy,
            has_played_once: false,
        }
    }

    pub fn policy(&self) -> &AudioPolicy {
        &self.policy
    }

    pub fn has_played_once(&self) -> bool {
        self.has_played_once
    }

    pub fn state<H: MediaHost + ?Sized>(&self, host: &H) -> PlaybackState {
        match self.clip {
            Some(clip) if host.is_playing(clip) => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    /// Handle a tap on the owning POI.
    pub fn activate<H: MediaHost + ?Sized>(&mut self, host: &mut H) -> AudioOutcome {
        let Some(clip) = self.clip else {
            return AudioOutcome::MissingClip;
        };

        if self.policy.play_only_once && self.has_played_once {
            return AudioOutcome::Ignored;
        }

        if host.is_playing(clip) {
            if self.policy.stop_if_clicked_again {
                host.stop(clip);
                return AudioOutcome::Stopped;
            }
            return AudioOutcome::Ignored;
        }

        host.play(clip, self.policy.volume.clamp(0.0, 1.0));
        self.has_played_once = true;
        AudioOutcome::Started
    }

    pub fn stop<H: MediaHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(clip) = self.clip {
            if host.is_playing(clip) {
                host.stop(clip);
            }
        }
    }
}

/// Video playback: every activation restarts the clip from the beginning.
#[derive(Debug, Clone)]
pub struct VideoPlayback {
    clip: Option<ClipId>,
    volume: f32,
    has_played_once: bool,
}

impl VideoPlayback {
    pub fn new(clip: Option<ClipId>, volume: f32) -> Self {
        Self {
            clip,
            volume: volume.clamp(0.0, 1.0),
            has_played_once: false,
        }
    }

    pub fn has_clip(&self) -> bool {
        self.clip.is_some()
    }

    pub fn has_played_once(&self) -> bool {
        self.has_played_once
    }

    pub fn state<H: MediaHost + ?Sized>(&self, host: &H) -> PlaybackState {
        match self.clip {
            Some(clip) if host.is_playing(clip) => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    /// Stop then play. Returns false when no clip is assigned.
    pub fn restart<H: MediaHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(clip) = self.clip else { return false };
        host.stop(clip);
        host.play(clip, self.volume);
        self.has_played_once = true;
        true
    }

    pub fn stop<H: MediaHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(clip) = self.clip {
            host.stop(clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::CommandBuffer;
    use crate::api::types::HostCommand;

    const CLIP: ClipId = ClipId(5);

    #[test]
    fn toggle_policy_stops_second_tap() {
        let mut host = CommandBuffer::new();
        let mut audio = AudioPlayback::new(Some(CLIP), AudioPolicy::default());
        assert_eq!(audio.activate(&mut host), AudioOutcome::Started);
        assert_eq!(audio.state(&host), PlaybackState::Playing);
        assert_eq!(audio.activate(&mut host), AudioOutcome::Stopped);
        assert_eq!(audio.state(&host), PlaybackState::Idle);
        assert_eq!(audio.activate(&mut host), AudioOutcome::Started);
    }

    #[test]
    fn no_toggle_never_overlaps_plays() {
        let mut host = CommandBuffer::new();
        let policy = AudioPolicy { stop_if_clicked_again: false, ..AudioPolicy::default() };
        let mut audio = AudioPlayback::new(Some(CLIP), policy);
        audio.activate(&mut host);
        assert_eq!(audio.activate(&mut host), AudioOutcome::Ignored);
        assert_eq!(host.count(|c| matches!(c, HostCommand::Play { .. })), 1);
    }

    #[test]
    fn play_once_ignores_after_first() {
        let mut host = CommandBuffer::new();
        let policy = AudioPolicy { play_only_once: true, ..AudioPolicy::default() };
        let mut audio = AudioPlayback::new(Some(CLIP), policy);
        assert_eq!(audio.activate(&mut host), AudioOutcome::Started);
        host.clip_finished(CLIP);
        assert_eq!(audio.activate(&mut host), AudioOutcome::Ignored);
        assert!(audio.has_played_once());
    }

    #[test]
    fn missing_clip_is_reported() {
        let mut host = CommandBuffer::new();
        let mut audio = AudioPlayback::new(None, AudioPolicy::default());
        assert_eq!(audio.activate(&mut host), AudioOutcome::MissingClip);
        assert!(host.is_empty());
    }

    #[test]
    fn volume_reaches_the_host_clamped() {
        let mut host = CommandBuffer::new();
        let policy = AudioPolicy { volume: 3.0, ..AudioPolicy::default() };
        let mut audio = AudioPlayback::new(Some(CLIP), policy);
        audio.activate(&mut host);
        assert_eq!(host.drain(), vec![HostCommand::Play { clip: CLIP, volume: 1.0 }]);
    }

    #[test]
    fn video_restart_is_stop_then_play() {
        let mut host = CommandBuffer::new();
        let mut video = VideoPlayback::new(Some(CLIP), 1.0);
        assert!(video.restart(&mut host));
        assert!(video.restart(&mut host));
        assert_eq!(video.state(&host), PlaybackState::Playing);
        let cmds = host.drain();
        assert_eq!(cmds[0], HostCommand::Stop { clip: CLIP });
        assert_eq!(cmds[1], HostCommand::Play { clip: CLIP, volume: 1.0 });
        assert_eq!(cmds.len(), 4);
    }
}
