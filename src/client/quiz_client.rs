use reqwest::Client;
use tracing::{error, info};

use crate::quiz::{
    models::{ProxyResponse, Question, QuestionRequest},
    state::{QuizForm, QuizMachine, TransitionError},
};

static NETWORK_ERROR: &str = "Network error";
static FETCH_FAILED: &str = "Failed to fetch questions";

#[derive(Debug, thiserror::Error)]
pub enum QuizClientError {
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Proxy(String),
}

impl QuizClientError {
    /// Message shown to the user in the form.
    pub fn display_message(&self) -> String {
        match self {
            QuizClientError::Network(_) => NETWORK_ERROR.into(),
            QuizClientError::Proxy(message) => message.clone(),
        }
    }
}

/// Talks to the question proxy on behalf of a quiz session.
#[derive(Debug, Clone)]
pub struct QuizClient {
    base_url: String,
    client: Client,
}

impl QuizClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub async fn request_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<Question>, QuizClientError> {
        let url = format!("{}/api/questions", self.base_url.trim_end_matches('/'));
        info!("QuizClient requesting questions from: {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body: ProxyResponse = response.json().await?;

        match body {
            ProxyResponse {
                questions: Some(questions),
                ..
            } => Ok(questions),
            ProxyResponse { error, .. } => {
                let message = error.unwrap_or_else(|| FETCH_FAILED.into());
                error!("Question proxy answered {}: {}", status, message);
                Err(QuizClientError::Proxy(message))
            }
        }
    }

    /// Runs Form -> Loading -> Active, or back to Form with the error kept
    /// on the machine.
    pub async fn load_quiz(
        &self,
        machine: &mut QuizMachine,
        form: &QuizForm,
    ) -> Result<(), TransitionError> {
        let request = machine.begin_fetch(form)?;

        match self.request_questions(&request).await {
            Ok(questions) => machine.questions_received(questions),
            Err(e) => machine.fetch_failed(e.display_message()),
        }
    }
}
