pub mod geography;

/// Answer lifecycle of a single question. A verdict only exists once the
/// question has actually been answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Answered { selection: String, correct: bool },
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub subject: String,
    pub options: Vec<String>,
    pub state: AnswerState,
}

impl Question {
    pub fn new(subject: String, options: Vec<String>) -> Self {
        Self {
            subject,
            options,
            state: AnswerState::Unanswered,
        }
    }

    pub fn is_answered(&self) -> bool {
        !matches!(self.state, AnswerState::Unanswered)
    }

    /// The correct answer is always the subject itself.
    pub fn correct_answer(&self) -> &str {
        &self.subject
    }

    pub fn has_option(&self, label: &str) -> bool {
        self.options.iter().any(|option| option == label)
    }
}

/// Where the session stands between two player actions. An answer moves it
/// to `AwaitingNext`; only an explicit "next" moves it forward again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SessionStatus {
    #[default]
    AwaitingAnswer,
    AwaitingNext,
    Complete,
}

/// One full run of the quiz. Transitions are synchronous and free of I/O;
/// the caller renders and persists around them.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct GameSession {
    pub questions: Vec<Question>,
    pub current: usize,
    pub score: u32,
    pub status: SessionStatus,
}

/// What the player is told right after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
}

/// Outcome of moving on after an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    NextQuestion,
    Finished(Summary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub total: usize,
}

impl Summary {
    pub fn percentage(&self) -> u32 {
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn message(&self) -> &'static str {
        let percentage = self.percentage();
        if percentage >= 90 {
            "Outstanding! You are a geography expert!"
        } else if percentage >= 70 {
            "Great job! You know your countries well!"
        } else if percentage >= 50 {
            "Good effort! Keep exploring the world!"
        } else {
            "Keep learning! The world is full of amazing places!"
        }
    }

    pub fn score_text(&self) -> String {
        format!(
            "Final Score: {}/{} ({}%)",
            self.score,
            self.total,
            self.percentage()
        )
    }
}

impl GameSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            status: SessionStatus::AwaitingAnswer,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// Questions answered so far. The one currently on screen never counts.
    pub fn answered(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| question.is_answered())
            .count()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn progress_line(&self) -> String {
        format!("Question {} of {}", self.current + 1, self.total())
    }

    pub fn score_line(&self) -> String {
        format!("Score: {}/{}", self.score, self.answered())
    }

    /// Records an answer for the current question. Returns `None` when there
    /// is nothing to answer -- the question was already answered or the
    /// session is over -- so a double submission changes nothing.
    pub fn submit(&mut self, choice: &str) -> Option<Feedback> {
        if self.status != SessionStatus::AwaitingAnswer {
            return None;
        }
        let question = self.questions.get_mut(self.current)?;
        if question.is_answered() {
            return None;
        }

        let correct = choice == question.subject;
        let correct_answer = question.subject.clone();
        question.state = AnswerState::Answered {
            selection: choice.to_string(),
            correct,
        };

        if correct {
            self.score += 1;
        }
        self.current += 1;
        self.status = SessionStatus::AwaitingNext;

        Some(Feedback {
            correct,
            correct_answer,
        })
    }

    /// Moves past the answered question: either the next question comes up
    /// or the session completes and yields its summary.
    pub fn advance(&mut self) -> Step {
        if self.current >= self.questions.len() {
            self.status = SessionStatus::Complete;
            return Step::Finished(self.summary());
        }
        self.status = SessionStatus::AwaitingAnswer;
        Step::NextQuestion
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            total: self.questions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(total: usize) -> GameSession {
        let questions = (0..total)
            .map(|i| {
                let subject = format!("Country {}", i);
                let options = vec![
                    subject.clone(),
                    String::from("Decoy 1"),
                    String::from("Decoy 2"),
                    String::from("Decoy 3"),
                ];
                Question::new(subject, options)
            })
            .collect();
        GameSession::new(questions)
    }

    // Answers every question, the first `correct` of them correctly, and
    // returns the summary produced by the final advance.
    fn finish(session: &mut GameSession, correct: usize) -> Summary {
        for i in 0..session.total() {
            let subject = session.questions[i].subject.clone();
            let choice = if i < correct {
                subject
            } else {
                String::from("Decoy 1")
            };
            session.submit(&choice).expect("question was not answerable");
            if let Step::Finished(summary) = session.advance() {
                return summary;
            }
        }
        unreachable!("session never finished");
    }

    #[test]
    fn fresh_session_starts_clean() {
        let session = session_with(10);
        assert_eq!(session.current, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.status, SessionStatus::AwaitingAnswer);
        assert!(!session.is_complete());
        assert_eq!(session.progress_line(), "Question 1 of 10");
        assert_eq!(session.score_line(), "Score: 0/0");
    }

    #[test]
    fn correct_answer_scores_and_advances() {
        let mut session = session_with(10);
        let feedback = session.submit("Country 0").unwrap();

        assert!(feedback.correct);
        assert_eq!(feedback.correct_answer, "Country 0");
        assert_eq!(session.score, 1);
        assert_eq!(session.current, 1);
        assert_eq!(session.status, SessionStatus::AwaitingNext);
        assert_eq!(
            session.questions[0].state,
            AnswerState::Answered {
                selection: String::from("Country 0"),
                correct: true,
            }
        );
    }

    #[test]
    fn wrong_answer_records_selection_without_scoring() {
        let mut session = session_with(10);
        let feedback = session.submit("Decoy 2").unwrap();

        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "Country 0");
        assert_eq!(session.score, 0);
        assert_eq!(session.current, 1);
        assert_eq!(
            session.questions[0].state,
            AnswerState::Answered {
                selection: String::from("Decoy 2"),
                correct: false,
            }
        );
    }

    #[test]
    fn double_submission_is_ignored() {
        let mut session = session_with(10);
        session.submit("Country 0").unwrap();

        assert!(session.submit("Decoy 1").is_none());
        assert_eq!(session.score, 1);
        assert_eq!(session.current, 1);
        // The following question must not have absorbed the stray answer
        assert!(!session.questions[1].is_answered());
    }

    #[test]
    fn next_loads_the_following_question() {
        let mut session = session_with(10);
        session.submit("Country 0").unwrap();

        assert_eq!(session.advance(), Step::NextQuestion);
        assert_eq!(session.status, SessionStatus::AwaitingAnswer);
        assert_eq!(session.current_question().unwrap().subject, "Country 1");
        assert_eq!(session.progress_line(), "Question 2 of 10");
        assert_eq!(session.score_line(), "Score: 1/1");
    }

    #[test]
    fn next_after_the_last_answer_completes_the_session() {
        let mut session = session_with(10);
        let summary = finish(&mut session, 4);

        assert!(session.is_complete());
        assert_eq!(summary.score, 4);
        assert_eq!(summary.total, 10);
        assert!(session.submit("Country 0").is_none());
    }

    #[test]
    fn score_is_bounded_by_answered_questions() {
        let mut session = session_with(10);
        session.submit("Country 0").unwrap();
        session.advance();
        session.submit("Decoy 3").unwrap();

        assert_eq!(session.answered(), 2);
        assert!(session.score as usize <= session.answered());
    }

    #[test]
    fn summary_picks_the_right_tier() {
        let outstanding = finish(&mut session_with(10), 9);
        assert_eq!(outstanding.percentage(), 90);
        assert_eq!(
            outstanding.message(),
            "Outstanding! You are a geography expert!"
        );

        let great = finish(&mut session_with(10), 7);
        assert_eq!(great.percentage(), 70);
        assert_eq!(great.message(), "Great job! You know your countries well!");

        let good = finish(&mut session_with(10), 6);
        assert_eq!(good.percentage(), 60);
        assert_eq!(good.message(), "Good effort! Keep exploring the world!");

        let low = finish(&mut session_with(10), 3);
        assert_eq!(low.percentage(), 30);
        assert_eq!(
            low.message(),
            "Keep learning! The world is full of amazing places!"
        );
    }

    #[test]
    fn summary_formats_the_final_score() {
        let summary = finish(&mut session_with(10), 9);
        assert_eq!(summary.score_text(), "Final Score: 9/10 (90%)");
    }

    #[test]
    fn snapshot_restores_mid_session_state() {
        let mut session = session_with(10);
        session.submit("Country 0").unwrap();
        session.advance();

        let snapshot = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&snapshot).unwrap();

        assert_eq!(restored.current, session.current);
        assert_eq!(restored.score, session.score);
        assert_eq!(restored.status, session.status);
        assert_eq!(
            restored.current_question().unwrap().options,
            session.current_question().unwrap().options
        );
    }
}
