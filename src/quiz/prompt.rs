use crate::quiz::models::{PromptSource, QuestionRequest};

pub const JSON_INSTRUCTION: &str =
    "Return the result as a JSON array with fields: id, question, options, correctAnswer.";

pub fn build_prompt(request: &QuestionRequest) -> String {
    match request.prompt_source() {
        PromptSource::Custom(prompt) => format!("{}. {}", prompt, JSON_INSTRUCTION),
        PromptSource::Topic {
            num_questions,
            topic,
        } => format!(
            "Generate {} multiple choice questions on the topic \"{}\". Each question should have 4 options and specify the correct answer. {}",
            num_questions, topic, JSON_INSTRUCTION
        ),
    }
}
