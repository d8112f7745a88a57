use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Every question shows exactly this many answer slots.
pub const ANSWER_COUNT: usize = 4;

/// One multiple-choice question. Immutable once the bank is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub answers: [String; ANSWER_COUNT],
    /// Index into `answers` of the correct one.
    pub correct_answer_index: usize,
}

impl QuizQuestion {
    pub fn new(prompt: &str, answers: [&str; ANSWER_COUNT], correct_answer_index: usize) -> Self {
        Self {
            prompt: prompt.to_owned(),
            answers: answers.map(str::to_owned),
            correct_answer_index,
        }
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_answer_index]
    }
}

/// Reasons a question bank is rejected.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },

    #[error("question {index} has {found} answers, expected 4")]
    AnswerCount { index: usize, found: usize },

    #[error("question {index}: correct answer index {correct} out of range")]
    CorrectOutOfRange { index: usize, correct: usize },

    #[error("question bank JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire shape of a question; validated into [`QuizQuestion`].
#[derive(Debug, Deserialize)]
struct RawQuestion {
    prompt: String,
    answers: Vec<String>,
    #[serde(alias = "correct_answer_index")]
    correct: usize,
}

impl RawQuestion {
    fn validate(self, index: usize) -> Result<QuizQuestion, BankError> {
        if self.prompt.trim().is_empty() {
            return Err(BankError::EmptyPrompt { index });
        }
        let found = self.answers.len();
        let answers: [String; ANSWER_COUNT] = self
            .answers
            .try_into()
            .map_err(|_| BankError::AnswerCount { index, found })?;
        if self.correct >= ANSWER_COUNT {
            return Err(BankError::CorrectOutOfRange { index, correct: self.correct });
        }
        Ok(QuizQuestion {
            prompt: self.prompt,
            answers,
            correct_answer_index: self.correct,
        })
    }
}

/// The process-wide question bank. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        for (index, q) in questions.iter().enumerate() {
            if q.prompt.trim().is_empty() {
                return Err(BankError::EmptyPrompt { index });
            }
            if q.correct_answer_index >= ANSWER_COUNT {
                return Err(BankError::CorrectOutOfRange {
                    index,
                    correct: q.correct_answer_index,
                });
            }
        }
        Ok(Self { questions })
    }

    /// Parse a JSON array of `{ "prompt", "answers": [4], "correct" }`.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let raw: Vec<RawQuestion> = serde_json::from_str(json)?;
        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, q)| q.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// The ten built-in questions about the stinging nettle.
    pub fn nettle() -> Self {
        let questions = vec![
            QuizQuestion::new(
                "Latinski naziv koprive?",
                ["Urtica dioica", "Mentha piperita", "Rosa canina", "Pinus"],
                0,
            ),
            QuizQuestion::new(
                "Zašto kopriva peče?",
                ["Kiselina u dlačicama", "Trnje", "Magija", "Toplota"],
                0,
            ),
            QuizQuestion::new(
                "Koji dio se bere za čaj?",
                ["Listovi", "Sjeme", "Korijen", "Sve"],
                0,
            ),
            QuizQuestion::new(
                "Kada je najbolje brati koprivu?",
                ["U proljeće, prije cvjetanja", "Usred ljeta", "U kasnu jesen", "Usred zime"],
                0,
            ),
            QuizQuestion::new(
                "Kakva je kopriva po tipu biljke?",
                ["Višegodišnja zeljasta biljka", "Jednogodišnji grm", "Iglasto drvo", "Kaktus"],
                0,
            ),
            QuizQuestion::new(
                "Za šta se najčešće koristi čaj od koprive?",
                [
                    "Podrška radu bubrega i mokraćnih puteva",
                    "Snižavanje tjelesne temperature",
                    "Poboljšanje vida",
                    "Povećanje apetita za slatkiše",
                ],
                0,
            ),
            QuizQuestion::new(
                "Koji dio koprive se često koristi i u ishrani (pite, čorbe)?",
                ["Mladi listovi", "Samo cvijet", "Samo korijen", "Samo stabljika"],
                0,
            ),
            QuizQuestion::new(
                "Šta neutralizira peckanje koprive na koži?",
                [
                    "Pranje zahvaćenog mjesta hladnom vodom i sapunom",
                    "Dodatno trljanje listom koprive",
                    "Ugrijavanje mjesta fenom",
                    "Premazivanje uljem za sunčanje",
                ],
                0,
            ),
            QuizQuestion::new(
                "Kojim vitaminom su posebno bogati mladi listovi koprive?",
                ["Vitaminom C", "Vitaminom B12", "Vitaminom D", "Nijednim vitaminom"],
                0,
            ),
            QuizQuestion::new(
                "Za šta se mogu koristiti vlakna iz stabljike koprive?",
                ["Za izradu tekstila", "Za proizvodnju stakla", "Kao gorivo za automobile", "Za izradu keramike"],
                0,
            ),
        ];
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions.iter()
    }
}

/// Banks embedded in a larger JSON document (the app config) are validated
/// the same way as [`QuestionBank::from_json`].
impl<'de> Deserialize<'de> for QuestionBank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<RawQuestion>::deserialize(deserializer)?;
        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, q)| q.validate(index))
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde::de::Error::custom)?;
        Self::new(questions).map_err(serde::de::Error::custom)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::nettle()
    }
}
