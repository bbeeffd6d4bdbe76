//! Quiz session state machine

use crate::content::{QUESTIONS, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Start button showing
    Idle,
    /// Waiting for an answer to question `index`
    Asking { index: usize },
    /// Answer revealed, waiting for "next"
    Answered {
        index: usize,
        selected: usize,
        correct: bool,
    },
    /// Score screen
    Finished,
}

/// Score band shown on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Expert,
    Great,
    Good,
    KeepExploring,
}

impl Feedback {
    pub fn for_score(score: u32) -> Self {
        match score {
            9.. => Feedback::Expert,
            7..=8 => Feedback::Great,
            5..=6 => Feedback::Good,
            _ => Feedback::KeepExploring,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Expert => "Excellent! You're a marine life expert!",
            Feedback::Great => "Great job! You know your sea creatures well!",
            Feedback::Good => "Good effort! Keep learning about ocean life!",
            Feedback::KeepExploring => {
                "Keep exploring! There's so much more to learn about marine life!"
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [Question],
    phase: QuizPhase,
    score: u32,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(&QUESTIONS)
    }
}

impl QuizSession {
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            phase: QuizPhase::Idle,
            score: 0,
        }
    }

    pub fn start(&mut self) {
        self.score = 0;
        self.phase = if self.questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Asking { index: 0 }
        };
    }

    /// Answer the current question. Ignored unless a question is awaiting
    /// an answer; returns whether the choice was correct.
    pub fn select(&mut self, choice: usize) -> Option<bool> {
        let QuizPhase::Asking { index } = self.phase else {
            return None;
        };
        let question = self.questions.get(index)?;
        let correct = choice == question.correct;
        if correct {
            self.score += 1;
        }
        self.phase = QuizPhase::Answered {
            index,
            selected: choice,
            correct,
        };
        Some(correct)
    }

    /// Advance past a revealed answer
    pub fn next(&mut self) {
        let QuizPhase::Answered { index, .. } = self.phase else {
            return;
        };
        if index + 1 < self.questions.len() {
            self.phase = QuizPhase::Asking { index: index + 1 };
        } else {
            self.phase = QuizPhase::Finished;
            log::info!("Quiz finished: {}/{}", self.score, self.questions.len());
        }
    }

    pub fn restart(&mut self) {
        self.phase = QuizPhase::Idle;
        self.score = 0;
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.phase {
            QuizPhase::Asking { index } | QuizPhase::Answered { index, .. } => {
                self.questions.get(index)
            }
            _ => None,
        }
    }

    /// "score/total", e.g. "7/10"
    pub fn score_text(&self) -> String {
        format!("{}/{}", self.score, self.questions.len())
    }

    pub fn feedback(&self) -> Option<Feedback> {
        (self.phase == QuizPhase::Finished).then(|| Feedback::for_score(self.score))
    }
}
