//! Client side quiz state.

use crate::quiz::models::{MAX_QUESTIONS, MIN_QUESTIONS, Question, QuestionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Form,
    Loading,
    Active,
    Submitted,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Number of questions must be between 1 and 20, got {0}")]
    InvalidQuestionCount(u32),

    #[error("Cannot {0} while in {1:?} state")]
    InvalidPhase(&'static str, QuizPhase),
}

/// Values entered in the quiz form.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizForm {
    pub num_questions: u32,
    pub topic: String,
    pub custom_prompt: String,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            num_questions: 5,
            topic: String::new(),
            custom_prompt: String::new(),
        }
    }
}

impl QuizForm {
    pub fn to_request(&self) -> Result<QuestionRequest, TransitionError> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.num_questions) {
            return Err(TransitionError::InvalidQuestionCount(self.num_questions));
        }

        Ok(QuestionRequest::new(
            self.num_questions,
            &self.topic,
            Some(self.custom_prompt.as_str()),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionState {
    pub question: Question,
    pub selected_answer: Option<String>,
}

impl QuestionState {
    pub fn is_answered_correctly(&self) -> bool {
        self.selected_answer
            .as_deref()
            .is_some_and(|answer| self.question.is_correct(answer))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizState {
    questions: Vec<QuestionState>,
    current_score: usize,
    is_submitted: bool,
}

impl QuizState {
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let questions = questions
            .into_iter()
            .map(|question| QuestionState {
                question,
                selected_answer: None,
            })
            .collect();

        Self {
            questions,
            current_score: 0,
            is_submitted: false,
        }
    }

    pub fn questions(&self) -> &[QuestionState] {
        &self.questions
    }

    pub fn current_score(&self) -> usize {
        self.current_score
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    /// Returns false when the quiz is submitted or no question has the id.
    pub fn select(&mut self, question_id: i64, option: &str) -> bool {
        if self.is_submitted {
            return false;
        }

        let mut matched = false;
        for state in self.questions.iter_mut().filter(|q| q.question.id == question_id) {
            state.selected_answer = Some(option.to_string());
            matched = true;
        }

        matched
    }

    pub fn submit(&mut self) -> usize {
        self.current_score = self
            .questions
            .iter()
            .filter(|q| q.is_answered_correctly())
            .count();
        self.is_submitted = true;
        self.current_score
    }

    pub fn reset_answers(&mut self) {
        for state in self.questions.iter_mut() {
            state.selected_answer = None;
        }
        self.current_score = 0;
        self.is_submitted = false;
    }
}

/// Drives a single quiz session from form entry to scoring.
#[derive(Debug, Default)]
pub struct QuizMachine {
    quiz: Option<QuizState>,
    loading: bool,
    error: Option<String>,
}

impl QuizMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        match (&self.quiz, self.loading) {
            (_, true) => QuizPhase::Loading,
            (None, false) => QuizPhase::Form,
            (Some(quiz), false) if quiz.is_submitted() => QuizPhase::Submitted,
            (Some(_), false) => QuizPhase::Active,
        }
    }

    pub fn quiz(&self) -> Option<&QuizState> {
        self.quiz.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Form -> Loading. Returns the request to send to the proxy.
    pub fn begin_fetch(&mut self, form: &QuizForm) -> Result<QuestionRequest, TransitionError> {
        self.expect_phase("fetch questions", QuizPhase::Form)?;

        let request = form.to_request()?;
        self.loading = true;
        self.error = None;

        Ok(request)
    }

    /// Loading -> Active.
    pub fn questions_received(&mut self, questions: Vec<Question>) -> Result<(), TransitionError> {
        self.expect_phase("receive questions", QuizPhase::Loading)?;

        self.quiz = Some(QuizState::from_questions(questions));
        self.loading = false;
        Ok(())
    }

    /// Loading -> Form, keeping the message for display.
    pub fn fetch_failed(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_phase("fail a fetch", QuizPhase::Loading)?;

        self.error = Some(message.into());
        self.loading = false;
        Ok(())
    }

    /// No-op outside the Active phase.
    pub fn select_option(&mut self, question_id: i64, option: &str) -> bool {
        match self.quiz.as_mut() {
            Some(quiz) if !self.loading => quiz.select(question_id, option),
            _ => false,
        }
    }

    /// Active -> Submitted. Submitting an already submitted quiz returns the
    /// locked score.
    pub fn submit(&mut self) -> Result<usize, TransitionError> {
        match self.phase() {
            QuizPhase::Active => Ok(self.quiz.as_mut().map(QuizState::submit).unwrap_or(0)),
            QuizPhase::Submitted => Ok(self.quiz.as_ref().map(QuizState::current_score).unwrap_or(0)),
            phase => Err(TransitionError::InvalidPhase("submit", phase)),
        }
    }

    /// Submitted -> Active with the same questions.
    pub fn try_again(&mut self) -> Result<(), TransitionError> {
        self.expect_phase("try again", QuizPhase::Submitted)?;

        if let Some(quiz) = self.quiz.as_mut() {
            quiz.reset_answers();
        }
        Ok(())
    }

    /// Active or Submitted -> Form.
    pub fn start_over(&mut self) -> Result<(), TransitionError> {
        match self.phase() {
            QuizPhase::Active | QuizPhase::Submitted => {
                self.quiz = None;
                self.error = None;
                Ok(())
            }
            phase => Err(TransitionError::InvalidPhase("start over", phase)),
        }
    }

    fn expect_phase(&self, action: &'static str, expected: QuizPhase) -> Result<(), TransitionError> {
        let phase = self.phase();
        if phase != expected {
            return Err(TransitionError::InvalidPhase(action, phase));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct: &str) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.into(),
            explanation: None,
        }
    }

    fn active_machine(questions: Vec<Question>) -> QuizMachine {
        let mut machine = QuizMachine::new();
        machine.begin_fetch(&QuizForm::default()).unwrap();
        machine.questions_received(questions).unwrap();
        machine
    }

    #[test]
    fn starts_in_form() {
        let machine = QuizMachine::new();

        assert_eq!(machine.phase(), QuizPhase::Form);
        assert!(machine.quiz().is_none());
        assert!(machine.error().is_none());
    }

    #[test]
    fn begin_fetch_suppresses_topic_for_custom_prompt() {
        let mut machine = QuizMachine::new();
        let form = QuizForm {
            num_questions: 4,
            topic: "History".into(),
            custom_prompt: "Questions about tea".into(),
        };

        let request = machine.begin_fetch(&form).unwrap();

        assert_eq!(machine.phase(), QuizPhase::Loading);
        assert_eq!(request.topic, "");
        assert_eq!(request.custom_prompt.as_deref(), Some("Questions about tea"));
    }

    #[test]
    fn begin_fetch_rejects_out_of_range_count() {
        let mut machine = QuizMachine::new();
        let form = QuizForm {
            num_questions: 21,
            ..QuizForm::default()
        };

        let result = machine.begin_fetch(&form);

        assert_eq!(result, Err(TransitionError::InvalidQuestionCount(21)));
        assert_eq!(machine.phase(), QuizPhase::Form);
    }

    #[test]
    fn cannot_fetch_twice() {
        let mut machine = QuizMachine::new();
        machine.begin_fetch(&QuizForm::default()).unwrap();

        let result = machine.begin_fetch(&QuizForm::default());
        assert_eq!(
            result,
            Err(TransitionError::InvalidPhase("fetch questions", QuizPhase::Loading))
        );
    }

    #[test]
    fn received_questions_start_unselected() {
        let machine = active_machine(vec![question(1, "A"), question(2, "B")]);
        let quiz = machine.quiz().unwrap();

        assert_eq!(machine.phase(), QuizPhase::Active);
        assert_eq!(quiz.current_score(), 0);
        assert!(!quiz.is_submitted());
        assert!(quiz.questions().iter().all(|q| q.selected_answer.is_none()));
    }

    #[test]
    fn failed_fetch_returns_to_form_with_error() {
        let mut machine = QuizMachine::new();
        machine.begin_fetch(&QuizForm::default()).unwrap();
        machine.fetch_failed("Gemini API error: 503").unwrap();

        assert_eq!(machine.phase(), QuizPhase::Form);
        assert_eq!(machine.error(), Some("Gemini API error: 503"));

        machine.begin_fetch(&QuizForm::default()).unwrap();
        assert!(machine.error().is_none());
    }

    #[test]
    fn selection_overwrites_previous_choice() {
        let mut machine = active_machine(vec![question(1, "A")]);

        assert!(machine.select_option(1, "B"));
        assert!(machine.select_option(1, "A"));
        assert!(!machine.select_option(99, "A"));

        let selected = &machine.quiz().unwrap().questions()[0].selected_answer;
        assert_eq!(selected.as_deref(), Some("A"));
    }

    #[test]
    fn score_counts_matching_selections() {
        let questions = (1..=5).map(|id| question(id, "A")).collect();
        let mut machine = active_machine(questions);

        for id in 1..=3 {
            machine.select_option(id, "A");
        }
        machine.select_option(4, "B");
        machine.select_option(5, "C");

        assert_eq!(machine.submit(), Ok(3));
        assert_eq!(machine.phase(), QuizPhase::Submitted);
    }

    #[test]
    fn selections_are_locked_after_submit() {
        let mut machine = active_machine(vec![question(1, "A"), question(2, "B")]);
        machine.select_option(1, "A");
        machine.select_option(2, "C");
        assert_eq!(machine.submit(), Ok(1));

        assert!(!machine.select_option(2, "B"));
        assert_eq!(machine.submit(), Ok(1));
        assert_eq!(
            machine.quiz().unwrap().questions()[1].selected_answer.as_deref(),
            Some("C")
        );
    }

    #[test]
    fn unanswered_and_unmatchable_questions_never_score() {
        let mut odd = question(2, "E");
        odd.options.truncate(2);
        let mut machine = active_machine(vec![question(1, "A"), odd]);
        machine.select_option(2, "A");

        assert_eq!(machine.submit(), Ok(0));
    }

    #[test]
    fn try_again_clears_answers_and_keeps_questions() {
        let questions = vec![question(3, "A"), question(1, "B"), question(2, "C")];
        let mut machine = active_machine(questions.clone());
        machine.select_option(3, "A");
        machine.select_option(1, "B");
        machine.submit().unwrap();

        machine.try_again().unwrap();
        let quiz = machine.quiz().unwrap();

        assert_eq!(machine.phase(), QuizPhase::Active);
        assert_eq!(quiz.current_score(), 0);
        assert!(quiz.questions().iter().all(|q| q.selected_answer.is_none()));
        let kept: Vec<Question> = quiz.questions().iter().map(|q| q.question.clone()).collect();
        assert_eq!(kept, questions);
    }

    #[test]
    fn try_again_requires_submission() {
        let mut machine = active_machine(vec![question(1, "A")]);

        assert!(machine.try_again().is_err());
    }

    #[test]
    fn start_over_discards_quiz() {
        let mut machine = active_machine(vec![question(1, "A")]);
        machine.select_option(1, "A");
        machine.submit().unwrap();

        machine.start_over().unwrap();
        assert_eq!(machine.phase(), QuizPhase::Form);
        assert!(machine.quiz().is_none());

        machine.begin_fetch(&QuizForm::default()).unwrap();
        machine.questions_received(vec![question(7, "D")]).unwrap();
        let quiz = machine.quiz().unwrap();
        assert_eq!(quiz.current_score(), 0);
        assert!(!quiz.is_submitted());
        assert_eq!(quiz.questions()[0].question.id, 7);
    }

    #[test]
    fn start_over_from_form_is_rejected() {
        let mut machine = QuizMachine::new();

        assert_eq!(
            machine.start_over(),
            Err(TransitionError::InvalidPhase("start over", QuizPhase::Form))
        );
    }
}
