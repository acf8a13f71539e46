//! Contrato con el backend de IA (`/api/chat`, `/api/quiz`, `/api/review`).

use std::fmt;

use serde::Serialize;

use crate::model::{ChatMessage, CodeReviewResult, QuizQuestion, Role};

pub mod remote;
pub mod schema;

pub use remote::HttpTutorApi;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Red caída, DNS, timeout...
    Transport { message: String },
    /// Respuesta HTTP no exitosa
    Status { status: u16, body: String },
    /// El cuerpo no es JSON válido
    MalformedBody { message: String },
    /// JSON válido pero con forma inesperada
    InvalidShape { field: &'static str, reason: String },
}

impl ApiError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ApiError::InvalidShape {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport { message } => write!(f, "error de conexión: {message}"),
            ApiError::Status { status, body } => {
                write!(f, "el servidor devolvió HTTP {status}")?;
                if !body.trim().is_empty() {
                    write!(f, ". Body: {}", body.trim())?;
                }
                Ok(())
            }
            ApiError::MalformedBody { message } => write!(f, "respuesta JSON inválida: {message}"),
            ApiError::InvalidShape { field, reason } => {
                write!(f, "campo `{field}` inválido: {reason}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Entrada del historial tal como la espera `/api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            text: msg.text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub history: &'a [HistoryEntry],
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QuizRequestBody<'a> {
    pub topic: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ReviewRequestBody<'a> {
    pub code: &'a str,
}

/// Colaborador síncrono. En escritorio lo implementa [`HttpTutorApi`]; en
/// tests, un mock en memoria.
pub trait TutorApi: Send + Sync {
    fn chat(&self, history: &[HistoryEntry], message: &str) -> Result<String, ApiError>;
    fn generate_quiz(&self, topic: &str) -> Result<QuizQuestion, ApiError>;
    fn review_code(&self, code: &str) -> Result<CodeReviewResult, ApiError>;
}
