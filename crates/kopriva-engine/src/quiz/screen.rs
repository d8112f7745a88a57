// quiz/screen.rs
//
// Binds a QuizSession to the host UI: question text, four answer buttons
// (label, tint, interactable) and the result view with restart/back.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::api::host::UiHost;
use crate::api::types::UiHandle;
use super::question::ANSWER_COUNT;
use super::session::{Feedback, QuizPhase, QuizSession, QuizStep};

/// Host handles of the quiz screen's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizLayout {
    pub question_text: UiHandle,
    /// Parent of the answer buttons; hidden on the result view.
    pub answers_container: UiHandle,
    pub result_text: UiHandle,
    pub restart_button: UiHandle,
    pub back_button: UiHandle,
    pub answer_buttons: [UiHandle; ANSWER_COUNT],
    pub answer_labels: [UiHandle; ANSWER_COUNT],
}

impl Default for QuizLayout {
    fn default() -> Self {
        Self {
            question_text: UiHandle(100),
            answers_container: UiHandle(101),
            result_text: UiHandle(102),
            restart_button: UiHandle(103),
            back_button: UiHandle(104),
            answer_buttons: [UiHandle(110), UiHandle(111), UiHandle(112), UiHandle(113)],
            answer_labels: [UiHandle(120), UiHandle(121), UiHandle(122), UiHandle(123)],
        }
    }
}

impl QuizLayout {
    /// Answer slot of a clicked button, if it is one.
    pub fn slot_of(&self, handle: UiHandle) -> Option<usize> {
        self.answer_buttons.iter().position(|&b| b == handle)
    }
}

/// What a click on the quiz screen did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Answered(Feedback),
    Restarted,
    /// The back button was pressed; the owner switches screens.
    Back,
    /// Not a quiz element, or rejected by the session.
    Ignored,
}

pub struct QuizScreen<R: Rng = StdRng> {
    layout: QuizLayout,
    session: QuizSession<R>,
}

impl<R: Rng> QuizScreen<R> {
    pub fn new(layout: QuizLayout, session: QuizSession<R>) -> Self {
        Self { layout, session }
    }

    pub fn layout(&self) -> &QuizLayout {
        &self.layout
    }

    pub fn session(&self) -> &QuizSession<R> {
        &self.session
    }

    /// Screen became visible: start a fresh run.
    pub fn enter<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.session.start();
        self.render(host);
    }

    /// Screen is being left: nothing pending may fire afterwards.
    pub fn leave(&mut self) {
        self.session.cancel();
    }

    pub fn handle_click<H: UiHost + ?Sized>(&mut self, handle: UiHandle, host: &mut H) -> QuizAction {
        if handle == self.layout.back_button {
            return QuizAction::Back;
        }
        if handle == self.layout.restart_button {
            self.session.restart();
            self.render(host);
            return QuizAction::Restarted;
        }
        let Some(slot) = self.layout.slot_of(handle) else {
            return QuizAction::Ignored;
        };
        match self.session.submit_answer(slot) {
            Some(feedback) => {
                self.render_answers(host);
                QuizAction::Answered(feedback)
            }
            None => QuizAction::Ignored,
        }
    }

    /// Advance the feedback delay by unscaled time and redraw on a step.
    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) -> Option<QuizStep> {
        let step = self.session.tick(unscaled_dt)?;
        self.render(host);
        Some(step)
    }

    /// Push the whole screen state to the host.
    pub fn render<H: UiHost + ?Sized>(&self, host: &mut H) {
        let l = &self.layout;
        match self.session.phase() {
            QuizPhase::Complete => {
                host.set_active(l.answers_container, false);
                host.set_text(l.question_text, "");
                host.set_active(l.result_text, true);
                if let Some(message) = self.session.result_message() {
                    host.set_text(l.result_text, &message);
                }
                host.set_active(l.restart_button, true);
            }
            QuizPhase::InProgress | QuizPhase::ShowingFeedback => {
                host.set_active(l.result_text, false);
                host.set_active(l.restart_button, false);
                host.set_active(l.answers_container, true);
                let prompt = self
                    .session
                    .current_question()
                    .map(|q| q.prompt.as_str())
                    .unwrap_or("");
                host.set_text(l.question_text, prompt);
                for slot in 0..ANSWER_COUNT {
                    let text = self.session.displayed_answer(slot).unwrap_or("");
                    host.set_text(l.answer_labels[slot], text);
                }
                self.render_answers(host);
            }
            QuizPhase::NotStarted => {
                host.set_active(l.result_text, false);
                host.set_active(l.restart_button, false);
            }
        }
    }

    fn render_answers<H: UiHost + ?Sized>(&self, host: &mut H) {
        let interactable = !self.session.is_locked();
        for (slot, tint) in self.session.tints().into_iter().enumerate() {
            let button = self.layout.answer_buttons[slot];
            host.set_tint(button, tint);
            host.set_interactable(button, interactable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use rand::SeedableRng;
    use crate::api::host::CommandBuffer;
    use crate::api::types::Tint;
    use crate::quiz::{QuestionBank, QuizSettings, ResultTier};

    fn screen(seed: u64) -> QuizScreen<StdRng> {
        let session = QuizSession::with_rng(
            Rc::new(QuestionBank::nettle()),
            QuizSettings::default(),
            StdRng::seed_from_u64(seed),
        );
        QuizScreen::new(QuizLayout::default(), session)
    }

    fn button(s: &QuizScreen<StdRng>, slot: usize) -> UiHandle {
        s.layout().answer_buttons[slot]
    }

    #[test]
    fn enter_shows_first_question() {
        let mut host = CommandBuffer::new();
        let mut s = screen(1);
        s.enter(&mut host);
        let l = *s.layout();
        let prompt = s.session().current_question().unwrap().prompt.clone();
        assert_eq!(host.last_text(l.question_text), Some(prompt.as_str()));
        for slot in 0..ANSWER_COUNT {
            assert_eq!(host.last_text(l.answer_labels[slot]), s.session().displayed_answer(slot));
            assert_eq!(host.last_tint(l.answer_buttons[slot]), Some(Tint::Neutral));
            assert_eq!(host.last_interactable(l.answer_buttons[slot]), Some(true));
        }
        assert_eq!(host.last_active(l.result_text), Some(false));
    }

    #[test]
    fn answer_click_tints_and_locks() {
        let mut host = CommandBuffer::new();
        let mut s = screen(2);
        s.enter(&mut host);
        let correct = s.session().correct_slot();
        let wrong = (correct + 1) % ANSWER_COUNT;

        let action = s.handle_click(button(&s, wrong), &mut host);
        assert!(matches!(action, QuizAction::Answered(Feedback { correct: false, .. })));
        assert_eq!(host.last_tint(button(&s, wrong)), Some(Tint::Wrong));
        assert_eq!(host.last_tint(button(&s, correct)), Some(Tint::Correct));
        assert_eq!(host.last_interactable(button(&s, 0)), Some(false));

        assert_eq!(s.handle_click(button(&s, correct), &mut host), QuizAction::Ignored);
    }

    #[test]
    fn finishing_shows_result_and_restart() {
        let mut host = CommandBuffer::new();
        let mut s = screen(3);
        s.enter(&mut host);
        for _ in 0..s.session().total() {
            let slot = s.session().correct_slot();
            s.handle_click(button(&s, slot), &mut host);
            assert!(s.tick(1.5, &mut host).is_some());
        }
        let l = *s.layout();
        assert_eq!(s.session().tier(), Some(ResultTier::Best));
        assert_eq!(host.last_active(l.answers_container), Some(false));
        assert_eq!(host.last_active(l.restart_button), Some(true));
        assert!(host.last_text(l.result_text).unwrap().starts_with("BRAVO!"));

        assert_eq!(s.handle_click(l.restart_button, &mut host), QuizAction::Restarted);
        assert_eq!(s.session().phase(), QuizPhase::InProgress);
        assert_eq!(host.last_active(l.result_text), Some(false));
        assert_eq!(host.last_active(l.answers_container), Some(true));
    }

    #[test]
    fn back_and_unknown_clicks() {
        let mut host = CommandBuffer::new();
        let mut s = screen(4);
        s.enter(&mut host);
        assert_eq!(s.handle_click(s.layout().back_button, &mut host), QuizAction::Back);
        assert_eq!(s.handle_click(UiHandle(9999), &mut host), QuizAction::Ignored);
    }

    #[test]
    fn leave_cancels_pending_feedback() {
        let mut host = CommandBuffer::new();
        let mut s = screen(5);
        s.enter(&mut host);
        s.handle_click(button(&s, 0), &mut host);
        s.leave();
        host.drain();
        assert_eq!(s.tick(10.0, &mut host), None);
        assert!(host.is_empty());
    }
}
