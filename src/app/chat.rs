use crate::api::{ApiError, HistoryEntry};
use crate::model::ChatMessage;

pub const TUTOR_WELCOME_ID: &str = "welcome";
pub const TUTOR_WELCOME: &str =
    "こんにちは！VBA講師AIです。\nマクロの書き方、デバッグの方法、特定の概念について何でも聞いてください！";
pub const TUTOR_ERROR: &str = "申し訳ありません。サーバーとの通信でエラーが発生しました。";

/// Id del mensaje inicial de los hilos de seguimiento (quiz y revisión)
pub const FOLLOWUP_WELCOME_ID: &str = "init";
pub const FOLLOWUP_ERROR: &str = "エラーが発生しました。";

/// Petición lista para `/api/chat`, etiquetada con la generación del hilo
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub generation: u64,
    pub history: Vec<HistoryEntry>,
    pub message: String,
}

/// Transcript de una vista. Sólo crece por el final, salvo `reset`.
#[derive(Debug)]
pub struct ChatThread {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    generation: u64,
    error_text: &'static str,
}

impl ChatThread {
    pub fn new(error_text: &'static str) -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            loading: false,
            generation: 0,
            error_text,
        }
    }

    pub fn tutor() -> Self {
        let mut thread = Self::new(TUTOR_ERROR);
        thread.seed(TUTOR_WELCOME_ID, TUTOR_WELCOME);
        thread
    }

    /// Vacía el transcript; las respuestas en vuelo quedan obsoletas
    pub fn reset(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.loading = false;
        self.generation += 1;
    }

    pub fn seed(&mut self, id: &str, text: &str) {
        self.reset();
        self.messages.push(ChatMessage::seeded(id, text));
    }

    /// Sólo el mensaje de bienvenida (todavía sin preguntas del usuario)
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }

    pub fn can_send(&self, text: &str) -> bool {
        !text.trim().is_empty() && !self.loading
    }

    /// Envía el contenido del campo de entrada
    pub fn submit_input(&mut self) -> Option<ChatRequest> {
        let text = self.input.clone();
        self.send(&text)
    }

    pub fn send(&mut self, text: &str) -> Option<ChatRequest> {
        self.send_with_context(text, str::to_owned)
    }

    /// Como `send`, pero el primer mensaje del usuario en un hilo sembrado
    /// se envuelve con `context`. El transcript guarda sólo el texto literal.
    pub fn send_with_context(
        &mut self,
        text: &str,
        context: impl FnOnce(&str) -> String,
    ) -> Option<ChatRequest> {
        if !self.can_send(text) {
            return None;
        }

        let history = self.messages.iter().map(HistoryEntry::from).collect();
        let message = if self.is_fresh() {
            context(text)
        } else {
            text.to_owned()
        };

        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.loading = true;

        Some(ChatRequest {
            generation: self.generation,
            history,
            message,
        })
    }

    /// Aplica la respuesta si sigue siendo de la generación actual
    pub fn resolve(&mut self, generation: u64, result: Result<String, ApiError>) -> bool {
        if generation != self.generation {
            log::debug!(
                "respuesta de chat obsoleta descartada (gen {generation}, actual {})",
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(text) => self.messages.push(ChatMessage::model(text)),
            Err(err) => {
                log::warn!("chat fallido: {err}");
                self.messages.push(ChatMessage::error(self.error_text));
            }
        }
        true
    }
}
