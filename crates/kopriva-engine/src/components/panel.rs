// components/panel.rs
//
// Open/close lifecycle for one overlay panel: Hidden -> Opening -> Shown ->
// Closing -> Hidden, with an opacity + scale tween on unscaled time.
// Starting a transition always replaces the one in flight, from the current
// values, so a panel never runs two tweens and never snaps.

use serde::{Deserialize, Serialize};
use crate::api::host::UiHost;
use crate::api::types::{PanelVisual, UiHandle};
use crate::extensions::{Easing, Tween};

/// Lifecycle state of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Opening,
    Shown,
    Closing,
}

/// Transition completions reported by [`Panel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The open tween finished; the panel now takes input.
    Opened,
    /// The close tween finished; the panel object was deactivated.
    Hidden,
}

/// Animation settings for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// When false, open/close jump straight to their end state.
    pub animate: bool,
    /// Tween duration in seconds.
    pub duration: f32,
    pub hidden_scale: f32,
    pub shown_scale: f32,
    pub easing: Easing,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            animate: true,
            duration: 0.18,
            hidden_scale: 0.85,
            shown_scale: 1.0,
            easing: Easing::SmoothStep,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    opacity: Tween,
    scale: Tween,
}

/// One managed overlay.
#[derive(Debug, Clone)]
pub struct Panel {
    handle: UiHandle,
    config: PanelConfig,
    state: PanelState,
    opacity: f32,
    scale: f32,
    active: bool,
    blocks_input: bool,
    transition: Option<Transition>,
    /// Tapping this element (the dimmed backdrop) closes the panel.
    background: Option<UiHandle>,
}

impl Panel {
    /// A hidden, inactive panel.
    pub fn new(handle: UiHandle, config: PanelConfig) -> Self {
        Self {
            handle,
            config,
            state: PanelState::Hidden,
            opacity: 0.0,
            scale: config.hidden_scale,
            active: false,
            blocks_input: false,
            transition: None,
            background: None,
        }
    }

    /// Enable background-tap-to-dismiss through `background`.
    pub fn with_background(mut self, background: UiHandle) -> Self {
        self.background = Some(background);
        self
    }

    pub fn handle(&self) -> UiHandle {
        self.handle
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the host-side panel object is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True only while fully shown.
    pub fn blocks_input(&self) -> bool {
        self.blocks_input
    }

    /// Opening or shown.
    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Opening | PanelState::Shown)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Snapshot for the host's per-frame visual buffer.
    pub fn visual(&self) -> PanelVisual {
        PanelVisual {
            handle: self.handle.0 as f32,
            opacity: self.opacity,
            scale: self.scale,
            active: if self.active { 1.0 } else { 0.0 },
        }
    }

    /// Start showing the panel. Any transition in flight is replaced by an
    /// open tween that starts from the current opacity and scale.
    pub fn open<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == PanelState::Shown {
            return;
        }
        if !self.active {
            host.set_active(self.handle, true);
            self.active = true;
        }
        self.blocks_input = false;

        if !self.config.animate {
            self.transition = None;
            self.finish_open();
            return;
        }

        self.transition = Some(self.transition_to(1.0, self.config.shown_scale));
        self.state = PanelState::Opening;
    }

    /// Start hiding the panel. Input is released immediately; the panel
    /// object is deactivated when the tween completes.
    pub fn close<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == PanelState::Hidden {
            return;
        }
        self.blocks_input = false;

        if !self.config.animate {
            self.transition = None;
            self.finish_close(host);
            return;
        }

        self.transition = Some(self.transition_to(0.0, self.config.hidden_scale));
        self.state = PanelState::Closing;
    }

    /// Close without animation (scene teardown).
    pub fn hide_now<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.transition = None;
        self.blocks_input = false;
        if self.active || self.state != PanelState::Hidden {
            self.finish_close(host);
        }
    }

    /// Advance the running tween by unscaled time.
    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) -> Option<PanelEvent> {
        let transition = self.transition.as_mut()?;
        let alpha_done = transition.opacity.tick(unscaled_dt);
        let scale_done = transition.scale.tick(unscaled_dt);
        self.opacity = transition.opacity.value();
        self.scale = transition.scale.value();

        if !(alpha_done && scale_done) {
            return None;
        }
        self.transition = None;

        match self.state {
            PanelState::Opening => {
                self.finish_open();
                Some(PanelEvent::Opened)
            }
            PanelState::Closing => {
                self.finish_close(host);
                Some(PanelEvent::Hidden)
            }
            PanelState::Hidden | PanelState::Shown => None,
        }
    }

    /// Whether `clicked` is this panel's dismiss backdrop.
    pub fn is_background(&self, clicked: UiHandle) -> bool {
        self.background == Some(clicked)
    }

    /// Close the panel if `clicked` is its backdrop. Returns true if handled.
    pub fn handle_background_click<H: UiHost + ?Sized>(&mut self, clicked: UiHandle, host: &mut H) -> bool {
        if !self.is_background(clicked) || !self.is_open() {
            return false;
        }
        self.close(host);
        true
    }

    fn transition_to(&self, opacity: f32, scale: f32) -> Transition {
        let duration = self.config.duration;
        match &self.transition {
            Some(running) => Transition {
                opacity: running.opacity.redirect(opacity, duration),
                scale: running.scale.redirect(scale, duration),
            },
            None => {
                let easing = self.config.easing;
                Transition {
                    opacity: Tween::new(self.opacity, opacity, duration, easing),
                    scale: Tween::new(self.scale, scale, duration, easing),
                }
            }
        }
    }

    fn finish_open(&mut self) {
        self.opacity = 1.0;
        self.scale = self.config.shown_scale;
        self.state = PanelState::Shown;
        self.blocks_input = true;
    }

    fn finish_close<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.opacity = 0.0;
        self.scale = self.config.hidden_scale;
        self.state = PanelState::Hidden;
        self.blocks_input = false;
        if self.active {
            host.set_active(self.handle, false);
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::CommandBuffer;

    const DT: f32 = 1.0 / 60.0;

    fn panel() -> Panel {
        Panel::new(UiHandle(10), PanelConfig::default())
    }

    fn run(panel: &mut Panel, host: &mut CommandBuffer, seconds: f32) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        let mut t = 0.0;
        while t < seconds {
            events.extend(panel.tick(DT, host));
            t += DT;
        }
        events
    }

    #[test]
    fn open_animates_to_shown() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        assert_eq!(p.state(), PanelState::Opening);
        assert!(p.is_active());
        assert!(!p.blocks_input());
        assert_eq!(host.last_active(UiHandle(10)), Some(true));

        p.tick(0.09, &mut host);
        assert!(p.opacity() > 0.0 && p.opacity() < 1.0);
        assert!(p.scale() > 0.85 && p.scale() < 1.0);

        let events = run(&mut p, &mut host, 0.2);
        assert_eq!(events, vec![PanelEvent::Opened]);
        assert_eq!(p.state(), PanelState::Shown);
        assert_eq!(p.opacity(), 1.0);
        assert_eq!(p.scale(), 1.0);
        assert!(p.blocks_input());
    }

    #[test]
    fn round_trip_returns_to_hidden_and_inactive() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        run(&mut p, &mut host, 0.3);
        p.close(&mut host);
        assert!(!p.blocks_input());
        assert_eq!(p.state(), PanelState::Closing);

        let events = run(&mut p, &mut host, 0.3);
        assert_eq!(events, vec![PanelEvent::Hidden]);
        assert_eq!(p.state(), PanelState::Hidden);
        assert_eq!(p.opacity(), 0.0);
        assert!(!p.is_active());
        assert_eq!(host.last_active(UiHandle(10)), Some(false));
    }

    #[test]
    fn interrupted_open_redirects_without_snapping() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        p.tick(0.09, &mut host);
        let mid_opacity = p.opacity();

        p.close(&mut host);
        assert_eq!(p.state(), PanelState::Closing);
        assert!(!p.blocks_input());
        // First closing frame continues from where the open left off.
        p.tick(0.0, &mut host);
        assert!((p.opacity() - mid_opacity).abs() < 1e-6);

        let events = run(&mut p, &mut host, 0.3);
        assert_eq!(events, vec![PanelEvent::Hidden]);
        assert_ne!(p.state(), PanelState::Shown);
        assert!(!p.blocks_input());
    }

    #[test]
    fn reopen_while_closing_cancels_the_close() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        run(&mut p, &mut host, 0.3);
        p.close(&mut host);
        p.tick(0.05, &mut host);
        p.open(&mut host);
        assert_eq!(p.state(), PanelState::Opening);

        let events = run(&mut p, &mut host, 0.3);
        assert_eq!(events, vec![PanelEvent::Opened]);
        assert!(p.is_active());
        assert_eq!(host.last_active(UiHandle(10)), Some(true));
    }

    #[test]
    fn open_on_shown_is_a_no_op() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        run(&mut p, &mut host, 0.3);
        host.drain();
        p.open(&mut host);
        assert_eq!(p.state(), PanelState::Shown);
        assert!(p.blocks_input());
        assert!(!p.is_animating());
        assert!(host.is_empty());
    }

    #[test]
    fn close_on_hidden_is_a_no_op() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.close(&mut host);
        assert_eq!(p.state(), PanelState::Hidden);
        assert!(host.is_empty());
    }

    #[test]
    fn unanimated_panel_switches_instantly() {
        let mut host = CommandBuffer::new();
        let config = PanelConfig { animate: false, ..PanelConfig::default() };
        let mut p = Panel::new(UiHandle(3), config);
        p.open(&mut host);
        assert_eq!(p.state(), PanelState::Shown);
        assert!(p.blocks_input());
        p.close(&mut host);
        assert_eq!(p.state(), PanelState::Hidden);
        assert!(!p.is_active());
    }

    #[test]
    fn background_click_dismisses() {
        let mut host = CommandBuffer::new();
        let mut p = panel().with_background(UiHandle(11));
        assert!(!p.handle_background_click(UiHandle(11), &mut host));
        p.open(&mut host);
        assert!(!p.handle_background_click(UiHandle(99), &mut host));
        assert!(p.handle_background_click(UiHandle(11), &mut host));
        assert_eq!(p.state(), PanelState::Closing);
    }

    #[test]
    fn hide_now_skips_the_tween() {
        let mut host = CommandBuffer::new();
        let mut p = panel();
        p.open(&mut host);
        p.hide_now(&mut host);
        assert_eq!(p.state(), PanelState::Hidden);
        assert!(!p.is_animating());
        assert_eq!(p.tick(1.0, &mut host), None);
    }
}
