//! Validación de las respuestas del backend antes de construir tipos del modelo.
//!
//! Los structs `*Wire` aceptan cualquier forma (todo `Option`); las funciones
//! `parse_*` deciden si la respuesta es utilizable.

use serde::Deserialize;

use super::ApiError;
use crate::model::{CodeReviewResult, QuizQuestion, ReviewMetrics};

#[derive(Debug, Deserialize)]
struct ChatWire {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizWire {
    question: Option<String>,
    options: Option<Vec<String>>,
    correct_answer_index: Option<i64>,
    explanation: Option<String>,
    suggested_questions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct MetricsWire {
    maintainability: Option<f64>,
    readability: Option<f64>,
    efficiency: Option<f64>,
    robustness: Option<f64>,
    consistency: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ReviewWire {
    metrics: Option<MetricsWire>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    suggested_code: String,
    critique: Option<String>,
}

fn decode<'de, T: Deserialize<'de>>(body: &'de str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::MalformedBody {
        message: err.to_string(),
    })
}

/// `{ "text": string }`
pub fn parse_chat(body: &str) -> Result<String, ApiError> {
    let wire: ChatWire = decode(body)?;
    wire.text
        .ok_or_else(|| ApiError::invalid("text", "falta el texto de la respuesta"))
}

pub fn parse_quiz(body: &str) -> Result<QuizQuestion, ApiError> {
    let wire: QuizWire = decode(body)?;

    let question = wire
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::invalid("question", "vacía o ausente"))?;

    let options = wire
        .options
        .ok_or_else(|| ApiError::invalid("options", "ausente"))?;
    if options.len() < 2 {
        return Err(ApiError::invalid(
            "options",
            format!("se necesitan al menos 2 opciones, hay {}", options.len()),
        ));
    }

    let index = wire
        .correct_answer_index
        .ok_or_else(|| ApiError::invalid("correctAnswerIndex", "ausente"))?;
    let correct_answer_index = usize::try_from(index)
        .ok()
        .filter(|i| *i < options.len())
        .ok_or_else(|| {
            ApiError::invalid(
                "correctAnswerIndex",
                format!("{index} fuera de 0..{}", options.len()),
            )
        })?;

    let explanation = wire
        .explanation
        .ok_or_else(|| ApiError::invalid("explanation", "ausente"))?;

    let suggested_questions = wire
        .suggested_questions
        .unwrap_or_default()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();

    Ok(QuizQuestion {
        question,
        options,
        correct_answer_index,
        explanation,
        suggested_questions,
    })
}

pub fn parse_review(body: &str) -> Result<CodeReviewResult, ApiError> {
    let wire: ReviewWire = decode(body)?;
    let metrics = wire
        .metrics
        .ok_or_else(|| ApiError::invalid("metrics", "ausente"))?;

    let metrics = ReviewMetrics {
        maintainability: score("metrics.maintainability", metrics.maintainability)?,
        readability: score("metrics.readability", metrics.readability)?,
        efficiency: score("metrics.efficiency", metrics.efficiency)?,
        robustness: score("metrics.robustness", metrics.robustness)?,
        consistency: score("metrics.consistency", metrics.consistency)?,
    };

    Ok(CodeReviewResult {
        metrics,
        strengths: wire.strengths,
        improvements: wire.improvements,
        suggested_code: wire.suggested_code,
        critique: wire.critique.filter(|c| !c.trim().is_empty()),
    })
}

/// Entero en 1..=5. El payload de error del backend (todo a 0) cae aquí.
fn score(field: &'static str, value: Option<f64>) -> Result<u8, ApiError> {
    let value = value.ok_or_else(|| ApiError::invalid(field, "ausente"))?;
    if value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
        return Err(ApiError::invalid(
            field,
            format!("{value} no es un entero entre 1 y 5"),
        ));
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ApiError) -> &'static str {
        match err {
            ApiError::InvalidShape { field, .. } => field,
            other => panic!("se esperaba InvalidShape, llegó {other:?}"),
        }
    }

    #[test]
    fn chat_requires_text() {
        assert_eq!(parse_chat(r#"{"text":"こんにちは"}"#).unwrap(), "こんにちは");
        assert_eq!(field_of(parse_chat(r#"{"error":"x"}"#).unwrap_err()), "text");
        assert!(matches!(
            parse_chat("<html>").unwrap_err(),
            ApiError::MalformedBody { .. }
        ));
    }

    #[test]
    fn valid_quiz_is_accepted() {
        let body = r#"{
            "question": "Range(\"A1\").Value の意味は？",
            "options": ["値", "書式", "数式", "名前"],
            "correctAnswerIndex": 0,
            "explanation": "セルの値を表します。",
            "suggestedQuestions": ["Text との違いは？", "  "]
        }"#;
        let q = parse_quiz(body).unwrap();
        assert_eq!(q.correct_answer_index, 0);
        assert_eq!(q.correct_option(), "値");
        assert_eq!(q.suggested_questions, vec!["Text との違いは？".to_string()]);
    }

    #[test]
    fn quiz_without_suggestions_is_accepted() {
        let body = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":1,"explanation":"e"}"#;
        let q = parse_quiz(body).unwrap();
        assert!(q.suggested_questions.is_empty());
    }

    #[test]
    fn quiz_index_out_of_range_is_rejected() {
        let body = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":2,"explanation":"e"}"#;
        assert_eq!(field_of(parse_quiz(body).unwrap_err()), "correctAnswerIndex");

        let body = r#"{"question":"Q","options":["a","b"],"correctAnswerIndex":-1,"explanation":"e"}"#;
        assert_eq!(field_of(parse_quiz(body).unwrap_err()), "correctAnswerIndex");
    }

    #[test]
    fn quiz_with_one_option_is_rejected() {
        let body = r#"{"question":"Q","options":["a"],"correctAnswerIndex":0,"explanation":"e"}"#;
        assert_eq!(field_of(parse_quiz(body).unwrap_err()), "options");
    }

    #[test]
    fn quiz_error_payload_is_rejected() {
        assert_eq!(
            field_of(parse_quiz(r#"{"error":"quota exceeded"}"#).unwrap_err()),
            "question"
        );
    }

    #[test]
    fn review_defaults_missing_lists() {
        let body = r#"{"metrics":{"maintainability":3,"readability":4,"efficiency":2,"robustness":5,"consistency":3}}"#;
        let r = parse_review(body).unwrap();
        assert_eq!(r.metrics.robustness, 5);
        assert!(r.strengths.is_empty());
        assert!(r.improvements.is_empty());
        assert_eq!(r.suggested_code, "");
        assert_eq!(r.critique, None);
    }

    #[test]
    fn review_zero_filled_error_payload_is_rejected() {
        let body = r#"{
            "metrics": {"maintainability":0,"readability":0,"efficiency":0,"robustness":0,"consistency":0},
            "strengths": [],
            "improvements": ["分析中にエラーが発生しました。"],
            "suggested_code": ""
        }"#;
        assert_eq!(
            field_of(parse_review(body).unwrap_err()),
            "metrics.maintainability"
        );
    }

    #[test]
    fn review_rejects_fractional_and_missing_metrics() {
        let body = r#"{"metrics":{"maintainability":3,"readability":4.5,"efficiency":2,"robustness":5,"consistency":3}}"#;
        assert_eq!(field_of(parse_review(body).unwrap_err()), "metrics.readability");

        let body = r#"{"metrics":{"maintainability":3,"readability":4,"efficiency":2,"robustness":5}}"#;
        assert_eq!(field_of(parse_review(body).unwrap_err()), "metrics.consistency");
    }

    #[test]
    fn review_accepts_float_encoded_integers() {
        let body = r#"{"metrics":{"maintainability":3.0,"readability":4,"efficiency":2,"robustness":5,"consistency":1},"critique":"全体的に良好"}"#;
        let r = parse_review(body).unwrap();
        assert_eq!(r.metrics.maintainability, 3);
        assert_eq!(r.critique.as_deref(), Some("全体的に良好"));
    }
}
