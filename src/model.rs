use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Vistas de la aplicación (una sola activa a la vez)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Lesson,
    Tutor,
    Quiz,
    Review,
    Roadmap,
    Standards,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Mensaje del transcript. Inmutable una vez creado.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), false)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text.into(), false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text.into(), true)
    }

    /// Mensaje de bienvenida con id fijo (`welcome`, `init`)
    pub fn seeded(id: &str, text: &str) -> Self {
        Self {
            id: id.to_owned(),
            role: Role::Model,
            text: text.to_owned(),
            timestamp: Local::now(),
            is_error: false,
        }
    }

    fn new(role: Role, text: String, is_error: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            timestamp: Local::now(),
            is_error,
        }
    }
}

/// Pregunta tipo test ya validada: `correct_answer_index < options.len()`
#[derive(Clone, Debug, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: String,
    pub suggested_questions: Vec<String>,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }
}

#[derive(Clone, Debug, Default)]
pub struct QuizState {
    pub topic: String,
    pub loading: bool,
    pub current_question: Option<QuizQuestion>,
    pub selected_option: Option<usize>, // sólo tras responder
    pub score: u32,
    pub show_result: bool,
}

/// Puntuaciones 1..=5 en los cinco ejes de la revisión
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewMetrics {
    pub maintainability: u8,
    pub readability: u8,
    pub efficiency: u8,
    pub robustness: u8,
    pub consistency: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeReviewResult {
    pub metrics: ReviewMetrics,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggested_code: String,
    pub critique: Option<String>,
}

// ---- Contenido estático ----

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Lesson {
    pub id: String,
    pub category: String,
    pub title: String,
    pub difficulty: u8, // 1 = fácil, 5 = difícil
    pub frequency: u8,  // 1 = raro, 5 = imprescindible
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoadmapWeek {
    pub week: u32,
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CodingStandard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub content: String,
}
