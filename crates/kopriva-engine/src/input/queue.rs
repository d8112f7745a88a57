use glam::Vec2;
use crate::api::types::UiHandle;

/// Input event types the core understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch or mouse press began at screen position (x, y), in pixels.
    /// `pointer` distinguishes the mouse from individual touches.
    PointerDown { pointer: u32, x: f32, y: f32 },
    /// The UI toolkit reported a click on one of its elements.
    Click { handle: UiHandle },
}

/// A press-began sample that survived per-frame deduplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    pub pointer: u32,
    pub pos: Vec2,
}

/// Everything sampled from the queue for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// At most one press per pointer, in arrival order.
    pub presses: Vec<Press>,
    /// UI clicks in arrival order.
    pub clicks: Vec<UiHandle>,
}

/// A queue of input events.
/// The host pushes events between frames; the frame loop samples and clears
/// it exactly once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain the queue into one frame's worth of input. A pointer that
    /// reports several press edges within a frame counts once.
    pub fn sample(&mut self) -> FrameInput {
        let mut frame = FrameInput::default();
        for event in self.events.drain(..) {
            match event {
                InputEvent::PointerDown { pointer, x, y } => {
                    if frame.presses.iter().all(|p| p.pointer != pointer) {
                        frame.presses.push(Press {
                            pointer,
                            pos: Vec2::new(x, y),
                        });
                    }
                }
                InputEvent::Click { handle } => frame.clicks.push(handle),
            }
        }
        frame
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
