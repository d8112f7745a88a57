// quiz/session.rs
//
// One run through the question bank: randomized question order, a fresh
// answer-slot permutation per question, answer lock while feedback is shown,
// and a single-shot feedback delay on unscaled time.
//
//   NotStarted -> InProgress -> ShowingFeedback -> InProgress | Complete
//
// Invalid input (wrong phase, locked, slot out of range) is ignored.

use std::rc::Rc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::api::types::Tint;
use crate::core::shuffle::{shuffle, shuffled_indices};
use crate::core::time::Delay;
use super::outcome::{ResultTier, ScoreThresholds};
use super::question::{QuestionBank, QuizQuestion, ANSWER_COUNT};

/// Shortest and longest accepted feedback delay, in seconds.
pub const FEEDBACK_DELAY_RANGE: (f32, f32) = (1.0, 1.5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Seconds the answer feedback stays up before the quiz moves on.
    pub feedback_delay: f32,
    pub thresholds: ScoreThresholds,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            feedback_delay: 1.5,
            thresholds: ScoreThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    ShowingFeedback,
    Complete,
}

/// Result of an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub slot: usize,
    pub correct: bool,
    /// Slot holding the right answer (revealed on a wrong pick).
    pub correct_slot: usize,
}

/// What happened when the feedback delay expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// The question at this position is now displayed.
    NextQuestion(usize),
    Complete(ResultTier),
}

pub struct QuizSession<R: Rng = StdRng> {
    bank: Rc<QuestionBank>,
    rng: R,
    settings: QuizSettings,
    order: Vec<usize>,
    position: usize,
    score: usize,
    /// `answer_permutation[slot]` is the index into the question's answers.
    answer_permutation: [usize; ANSWER_COUNT],
    correct_slot: usize,
    locked: bool,
    phase: QuizPhase,
    tints: [Tint; ANSWER_COUNT],
    feedback: Delay,
}

impl QuizSession<StdRng> {
    /// Session drawing from an entropy-seeded generator.
    pub fn new(bank: Rc<QuestionBank>, settings: QuizSettings) -> Self {
        Self::with_rng(bank, settings, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(bank: Rc<QuestionBank>, mut settings: QuizSettings, rng: R) -> Self {
        let (lo, hi) = FEEDBACK_DELAY_RANGE;
        if !(lo..=hi).contains(&settings.feedback_delay) {
            log::warn!(
                "quiz feedback delay {}s outside {lo}..={hi}s, clamping",
                settings.feedback_delay
            );
            settings.feedback_delay = if settings.feedback_delay.is_finite() {
                settings.feedback_delay.clamp(lo, hi)
            } else {
                hi
            };
        }

        Self {
            bank,
            rng,
            settings,
            order: Vec::new(),
            position: 0,
            score: 0,
            answer_permutation: [0, 1, 2, 3],
            correct_slot: 0,
            locked: true,
            phase: QuizPhase::NotStarted,
            tints: [Tint::Neutral; ANSWER_COUNT],
            feedback: Delay::new(),
        }
    }

    /// Begin a new run: reshuffle the question order and show the first one.
    pub fn start(&mut self) {
        self.feedback.cancel();
        self.order = shuffled_indices(self.bank.len(), &mut self.rng);
        self.score = 0;
        self.phase = QuizPhase::InProgress;
        self.present_question(0);
        log::debug!("quiz started with {} questions", self.order.len());
    }

    /// Start over from any phase.
    pub fn restart(&mut self) {
        self.start();
    }

    /// Abandon the run (the quiz screen was left). A pending feedback delay
    /// will never fire.
    pub fn cancel(&mut self) {
        self.feedback.cancel();
        self.locked = true;
        self.tints = [Tint::Neutral; ANSWER_COUNT];
        self.phase = QuizPhase::NotStarted;
    }

    /// Display the question at `position` in the session order with a
    /// freshly shuffled slot mapping. Returns false if `position` is past
    /// the end.
    pub fn present_question(&mut self, position: usize) -> bool {
        let Some(question) = self.order.get(position).and_then(|&i| self.bank.get(i)) else {
            return false;
        };
        let correct = question.correct_answer_index;

        let mut permutation = [0, 1, 2, 3];
        shuffle(&mut permutation, &mut self.rng);
        // Permutation of 0..4 always contains `correct`.
        self.correct_slot = permutation.iter().position(|&a| a == correct).unwrap_or(0);
        self.answer_permutation = permutation;

        self.position = position;
        self.tints = [Tint::Neutral; ANSWER_COUNT];
        self.locked = false;
        self.phase = QuizPhase::InProgress;
        true
    }

    /// Answer the current question with the button in `slot`.
    pub fn submit_answer(&mut self, slot: usize) -> Option<Feedback> {
        if self.phase != QuizPhase::InProgress || self.locked || slot >= ANSWER_COUNT {
            return None;
        }
        self.locked = true;

        let correct = slot == self.correct_slot;
        if correct {
            self.score += 1;
            self.tints[slot] = Tint::Correct;
        } else {
            self.tints[slot] = Tint::Wrong;
            self.tints[self.correct_slot] = Tint::Correct;
        }

        self.feedback.start(self.settings.feedback_delay);
        self.phase = QuizPhase::ShowingFeedback;

        Some(Feedback {
            slot,
            correct,
            correct_slot: self.correct_slot,
        })
    }

    /// Advance the feedback delay by unscaled frame time.
    pub fn tick(&mut self, unscaled_dt: f32) -> Option<QuizStep> {
        if self.phase != QuizPhase::ShowingFeedback || !self.feedback.tick(unscaled_dt) {
            return None;
        }

        let next = self.position + 1;
        if self.present_question(next) {
            return Some(QuizStep::NextQuestion(next));
        }

        self.phase = QuizPhase::Complete;
        self.locked = true;
        let tier = self.settings.thresholds.classify(self.score, self.total());
        log::info!("quiz complete: {}/{} ({:?})", self.score, self.total(), tier);
        Some(QuizStep::Complete(tier))
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Index into the session order of the displayed question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Number of questions in a run.
    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn answer_permutation(&self) -> [usize; ANSWER_COUNT] {
        self.answer_permutation
    }

    pub fn correct_slot(&self) -> usize {
        self.correct_slot
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn tints(&self) -> [Tint; ANSWER_COUNT] {
        self.tints
    }

    /// Whether the feedback delay is still pending.
    pub fn is_waiting(&self) -> bool {
        self.feedback.is_running()
    }

    /// The displayed question, while a run is in progress.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::InProgress | QuizPhase::ShowingFeedback => {
                self.order.get(self.position).and_then(|&i| self.bank.get(i))
            }
            QuizPhase::NotStarted | QuizPhase::Complete => None,
        }
    }

    /// Answer text shown on button `slot`.
    pub fn displayed_answer(&self, slot: usize) -> Option<&str> {
        let question = self.current_question()?;
        let index = *self.answer_permutation.get(slot)?;
        question.answers.get(index).map(String::as_str)
    }

    /// Result tier, once the run is complete.
    pub fn tier(&self) -> Option<ResultTier> {
        (self.phase == QuizPhase::Complete)
            .then(|| self.settings.thresholds.classify(self.score, self.total()))
    }

    pub fn result_message(&self) -> Option<String> {
        self.tier().map(|tier| tier.message(self.score, self.total()))
    }
}
