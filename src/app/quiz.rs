use super::chat::{ChatRequest, ChatThread, FOLLOWUP_ERROR, FOLLOWUP_WELCOME_ID};
use crate::api::ApiError;
use crate::model::{QuizQuestion, QuizState};

pub const QUIZ_WELCOME: &str =
    "この問題について詳しく知りたいことはありますか？解説で分からない点があれば聞いてくださいね！";
pub const QUIZ_FAILURE_NOTICE: &str =
    "クイズの生成に失敗しました。APIキーまたは接続を確認してください。";

#[derive(Clone, Debug, PartialEq)]
pub struct QuizRequest {
    pub generation: u64,
    pub topic: String,
}

/// Ciclo de vida de una pregunta: esperando → cargando → pregunta → resultado
#[derive(Debug)]
pub struct QuizSession {
    pub state: QuizState,
    pub chat: ChatThread,
    pub notice: Option<String>,
    generation: u64,
}

impl QuizSession {
    pub fn new(topic: String) -> Self {
        Self {
            state: QuizState {
                topic,
                ..QuizState::default()
            },
            chat: ChatThread::new(FOLLOWUP_ERROR),
            notice: None,
            generation: 0,
        }
    }

    /// Cambiar de tema vuelve al estado inicial y descarta la pregunta en vuelo
    pub fn set_topic(&mut self, topic: String) {
        if topic == self.state.topic {
            return;
        }
        self.state.topic = topic;
        self.clear_question();
        self.state.loading = false;
        self.generation += 1;
    }

    pub fn generate(&mut self) -> Option<QuizRequest> {
        if self.state.loading || self.state.topic.trim().is_empty() {
            return None;
        }

        self.clear_question();
        self.state.loading = true;
        self.generation += 1;

        Some(QuizRequest {
            generation: self.generation,
            topic: self.state.topic.clone(),
        })
    }

    pub fn resolve(&mut self, generation: u64, result: Result<QuizQuestion, ApiError>) -> bool {
        if generation != self.generation {
            log::debug!("pregunta obsoleta descartada (gen {generation})");
            return false;
        }

        self.state.loading = false;
        match result {
            Ok(question) => self.state.current_question = Some(question),
            Err(err) => {
                log::warn!("generación de quiz fallida: {err}");
                self.notice = Some(QUIZ_FAILURE_NOTICE.to_string());
            }
        }
        true
    }

    /// Responder. No-op si ya se mostró el resultado o el índice no existe.
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.state.show_result {
            return false;
        }
        let Some(question) = &self.state.current_question else {
            return false;
        };
        if index >= question.options.len() {
            return false;
        }

        if index == question.correct_answer_index {
            self.state.score += 1;
        }
        self.state.selected_option = Some(index);
        self.state.show_result = true;
        self.ensure_followup_chat();
        true
    }

    pub fn is_correct(&self) -> Option<bool> {
        let question = self.state.current_question.as_ref()?;
        let selected = self.state.selected_option?;
        Some(selected == question.correct_answer_index)
    }

    fn ensure_followup_chat(&mut self) {
        if self.state.show_result && self.chat.messages.is_empty() {
            self.chat.seed(FOLLOWUP_WELCOME_ID, QUIZ_WELCOME);
        }
    }

    /// Botones de preguntas sugeridas: sólo antes de la primera pregunta
    pub fn suggestions(&self) -> &[String] {
        match &self.state.current_question {
            Some(q) if self.state.show_result && self.chat.is_fresh() => q.suggested_questions.as_slice(),
            _ => &[],
        }
    }

    pub fn send_followup(&mut self, text: &str) -> Option<ChatRequest> {
        if !self.state.show_result {
            return None;
        }
        let question = self.state.current_question.as_ref()?;
        self.chat
            .send_with_context(text, |t| followup_context(question, t))
    }

    pub fn submit_followup_input(&mut self) -> Option<ChatRequest> {
        let text = self.chat.input.clone();
        self.send_followup(&text)
    }

    fn clear_question(&mut self) {
        self.state.current_question = None;
        self.state.selected_option = None;
        self.state.show_result = false;
        self.chat.reset();
    }
}

pub fn followup_context(question: &QuizQuestion, text: &str) -> String {
    format!(
        "【文脈: ユーザーは今、以下のクイズに答え、解説を見ました】\n問題: {}\n正解: {}\n解説: {}\n\n【ユーザーの質問】\n{}",
        question.question,
        question.correct_option(),
        question.explanation,
        text
    )
}
