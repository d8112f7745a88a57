pub mod panel;
pub mod playback;
