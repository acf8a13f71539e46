use crate::data::{Content, load_content};
use crate::model::{Lesson, ViewMode};

// Submódulos
pub mod actions;
pub mod chat;
pub mod dispatch;
pub mod feedback;
pub mod navigation;
pub mod quiz;
pub mod review;

pub use chat::ChatThread;
pub use dispatch::{ApiEvent, ApiRequest, ChatTarget, Dispatcher};
pub use navigation::{NavAction, NavState};
pub use quiz::QuizSession;
pub use review::ReviewSession;

/// Estado completo de la aplicación. Cada vista es dueña de su sesión.
pub struct TutorApp {
    pub content: Content,
    pub nav: NavState,
    pub tutor: ChatThread,
    pub quiz: QuizSession,
    pub review: ReviewSession,
    pub dispatcher: Dispatcher,
    /// Error al cargar el contenido embebido
    pub load_error: Option<String>,
}

impl TutorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        crate::ui::fonts::install_fonts(&cc.egui_ctx);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let config = crate::config::ApiConfig::resolve();
        let dispatcher = Dispatcher::http(config, Some(cc.egui_ctx.clone()));
        Self::with_dispatcher(dispatcher)
    }

    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        let (content, load_error) = match load_content() {
            Ok(content) => (content, None),
            Err(err) => {
                log::error!("contenido embebido inválido: {err}");
                (Content::default(), Some(err.to_string()))
            }
        };

        let initial_topic = content
            .lessons
            .first()
            .map(crate::view_models::topic_for)
            .unwrap_or_default();

        Self {
            nav: NavState::new(content.lessons.len()),
            tutor: ChatThread::tutor(),
            quiz: QuizSession::new(initial_topic),
            review: ReviewSession::default(),
            dispatcher,
            load_error,
            content,
        }
    }

    pub fn active_lesson(&self) -> Option<&Lesson> {
        self.content.lessons.get(self.nav.active_lesson)
    }

    pub fn view(&self) -> ViewMode {
        self.nav.view
    }

    pub fn header_title(&self) -> &str {
        self.nav.header_title(&self.content.lessons)
    }
}
