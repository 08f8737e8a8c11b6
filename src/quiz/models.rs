use serde::{Deserialize, Serialize};

pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 20;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[serde(default)]
    pub num_questions: u32,
    #[serde(default)]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// Where the prompt for the generative service comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSource<'a> {
    Custom(&'a str),
    Topic { num_questions: u32, topic: &'a str },
}

impl QuestionRequest {
    /// Builds a request the way a submitted form should be sent: a custom
    /// prompt suppresses the topic.
    pub fn new(num_questions: u32, topic: &str, custom_prompt: Option<&str>) -> Self {
        let mut request = Self {
            num_questions,
            topic: topic.to_string(),
            custom_prompt: custom_prompt.map(|p| p.to_string()),
        };

        if matches!(request.prompt_source(), PromptSource::Custom(_)) {
            request.topic.clear();
        } else {
            request.custom_prompt = None;
        }

        request
    }

    /// The one place where custom prompt versus topic precedence is decided.
    pub fn prompt_source(&self) -> PromptSource<'_> {
        match self.custom_prompt.as_deref().map(str::trim) {
            Some(prompt) if !prompt.is_empty() => PromptSource::Custom(prompt),
            _ => PromptSource::Topic {
                num_questions: self.num_questions,
                topic: &self.topic,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Anything the proxy may answer with. The client only cares whether
/// `questions` is present.
#[derive(Debug, Deserialize, Default)]
pub struct ProxyResponse {
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub error: Option<String>,
}
