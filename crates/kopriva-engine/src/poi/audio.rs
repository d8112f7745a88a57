use crate::api::host::MediaHost;
use crate::api::types::{ClipId, NodeId, PoiId};
use crate::components::playback::{AudioOutcome, AudioPlayback, AudioPolicy, PlaybackState};

/// A POI that plays a sound when tapped. No panel.
#[derive(Debug, Clone)]
pub struct AudioPoi {
    id: PoiId,
    anchor: NodeId,
    playback: AudioPlayback,
}

impl AudioPoi {
    pub fn new(id: PoiId, anchor: NodeId, clip: Option<ClipId>, policy: AudioPolicy) -> Self {
        Self {
            id,
            anchor,
            playback: AudioPlayback::new(clip, policy),
        }
    }

    pub fn id(&self) -> PoiId {
        self.id
    }

    pub fn anchor(&self) -> NodeId {
        self.anchor
    }

    pub fn has_fired_once(&self) -> bool {
        self.playback.has_played_once()
    }

    pub fn state<H: MediaHost + ?Sized>(&self, host: &H) -> PlaybackState {
        self.playback.state(host)
    }

    pub fn activate<H: MediaHost + ?Sized>(&mut self, host: &mut H) -> AudioOutcome {
        let outcome = self.playback.activate(host);
        match outcome {
            AudioOutcome::MissingClip => {
                log::error!("audio POI {:?}: no clip assigned", self.id);
            }
            AudioOutcome::Ignored => {
                log::debug!("audio POI {:?}: activation ignored by policy", self.id);
            }
            AudioOutcome::Started | AudioOutcome::Stopped => {}
        }
        outcome
    }

    pub fn stop<H: MediaHost + ?Sized>(&mut self, host: &mut H) {
        self.playback.stop(host);
    }
}
