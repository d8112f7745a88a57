pub mod outcome;
pub mod question;
pub mod screen;
pub mod session;

pub use outcome::{ResultTier, ScoreThresholds};
pub use question::{BankError, QuestionBank, QuizQuestion, ANSWER_COUNT};
pub use screen::{QuizAction, QuizLayout, QuizScreen};
pub use session::{Feedback, QuizPhase, QuizSession, QuizSettings, QuizStep};
