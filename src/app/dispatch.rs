// src/app/dispatch.rs
//
// Envío de peticiones al backend fuera del hilo de UI. Los resultados vuelven
// por un canal que la app consulta en cada frame (`poll`).

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use super::chat::ChatRequest;
use super::quiz::QuizRequest;
use super::review::ReviewRequest;
use crate::api::{ApiError, TutorApi};
use crate::model::{CodeReviewResult, QuizQuestion};

/// Hilo de chat al que pertenece una petición `/api/chat`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatTarget {
    Tutor,
    Quiz,
    Review,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    Chat {
        target: ChatTarget,
        request: ChatRequest,
    },
    Quiz(QuizRequest),
    Review(ReviewRequest),
}

impl ApiRequest {
    fn describe(&self) -> String {
        match self {
            ApiRequest::Chat { target, request } => {
                format!("/api/chat {target:?} (gen {})", request.generation)
            }
            ApiRequest::Quiz(req) => format!("/api/quiz (gen {})", req.generation),
            ApiRequest::Review(req) => format!("/api/review (gen {})", req.generation),
        }
    }
}

#[derive(Debug)]
pub enum ApiEvent {
    Chat {
        target: ChatTarget,
        generation: u64,
        result: Result<String, ApiError>,
    },
    Quiz {
        generation: u64,
        result: Result<QuizQuestion, ApiError>,
    },
    Review {
        generation: u64,
        result: Result<CodeReviewResult, ApiError>,
    },
}

enum Backend {
    /// Resuelve en el acto, en el hilo que llama
    Inline(Arc<dyn TutorApi>),
    #[cfg(not(target_arch = "wasm32"))]
    Threaded(Arc<dyn TutorApi>),
    #[cfg(target_arch = "wasm32")]
    Fetch(std::rc::Rc<crate::api::HttpTutorApi>),
    /// Sin cliente: cada petición falla con el mismo error
    Unavailable(ApiError),
}

pub struct Dispatcher {
    backend: Backend,
    tx: Sender<ApiEvent>,
    rx: Receiver<ApiEvent>,
    repaint: Option<egui::Context>,
}

impl Dispatcher {
    fn with_backend(backend: Backend, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = channel();
        Self {
            backend,
            tx,
            rx,
            repaint,
        }
    }

    /// Cliente HTTP real según la plataforma
    pub fn http(config: crate::config::ApiConfig, ctx: Option<egui::Context>) -> Self {
        log::info!("backend de IA: {:?}", config.base_url);
        let backend = match crate::api::HttpTutorApi::new(config) {
            #[cfg(not(target_arch = "wasm32"))]
            Ok(api) => Backend::Threaded(Arc::new(api)),
            #[cfg(target_arch = "wasm32")]
            Ok(api) => Backend::Fetch(std::rc::Rc::new(api)),
            Err(err) => {
                log::error!("cliente HTTP no disponible: {err}");
                Backend::Unavailable(err)
            }
        };
        Self::with_backend(backend, ctx)
    }

    pub fn inline(api: Arc<dyn TutorApi>) -> Self {
        Self::with_backend(Backend::Inline(api), None)
    }

    pub fn send(&self, request: ApiRequest) {
        log::info!("→ {}", request.describe());

        match &self.backend {
            Backend::Inline(api) => {
                let _ = self.tx.send(run_blocking(api.as_ref(), request));
            }
            #[cfg(not(target_arch = "wasm32"))]
            Backend::Threaded(api) => {
                let api = Arc::clone(api);
                let tx = self.tx.clone();
                let repaint = self.repaint.clone();
                std::thread::spawn(move || {
                    let event = run_blocking(api.as_ref(), request);
                    let _ = tx.send(event);
                    if let Some(ctx) = repaint {
                        ctx.request_repaint();
                    }
                });
            }
            #[cfg(target_arch = "wasm32")]
            Backend::Fetch(api) => {
                let api = std::rc::Rc::clone(api);
                let tx = self.tx.clone();
                let repaint = self.repaint.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let event = run_fetch(&api, request).await;
                    let _ = tx.send(event);
                    if let Some(ctx) = repaint {
                        ctx.request_repaint();
                    }
                });
            }
            Backend::Unavailable(err) => {
                let _ = self.tx.send(fail(request, err.clone()));
            }
        }
    }

    /// Resultados llegados desde el último frame
    pub fn poll(&self) -> Vec<ApiEvent> {
        self.rx.try_iter().collect()
    }
}

fn run_blocking(api: &dyn TutorApi, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::Chat { target, request } => ApiEvent::Chat {
            target,
            generation: request.generation,
            result: api.chat(&request.history, &request.message),
        },
        ApiRequest::Quiz(req) => ApiEvent::Quiz {
            generation: req.generation,
            result: api.generate_quiz(&req.topic),
        },
        ApiRequest::Review(req) => ApiEvent::Review {
            generation: req.generation,
            result: api.review_code(&req.code),
        },
    }
}

#[cfg(target_arch = "wasm32")]
async fn run_fetch(api: &crate::api::HttpTutorApi, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::Chat { target, request } => ApiEvent::Chat {
            target,
            generation: request.generation,
            result: api.chat(&request.history, &request.message).await,
        },
        ApiRequest::Quiz(req) => ApiEvent::Quiz {
            generation: req.generation,
            result: api.generate_quiz(&req.topic).await,
        },
        ApiRequest::Review(req) => ApiEvent::Review {
            generation: req.generation,
            result: api.review_code(&req.code).await,
        },
    }
}

fn fail(request: ApiRequest, err: ApiError) -> ApiEvent {
    match request {
        ApiRequest::Chat { target, request } => ApiEvent::Chat {
            target,
            generation: request.generation,
            result: Err(err),
        },
        ApiRequest::Quiz(req) => ApiEvent::Quiz {
            generation: req.generation,
            result: Err(err),
        },
        ApiRequest::Review(req) => ApiEvent::Review {
            generation: req.generation,
            result: Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_backend_answers_with_its_error() {
        let err = ApiError::Transport {
            message: "sin TLS".into(),
        };
        let dispatcher = Dispatcher::with_backend(Backend::Unavailable(err.clone()), None);
        dispatcher.send(ApiRequest::Quiz(QuizRequest {
            generation: 3,
            topic: "基礎: 変数".into(),
        }));

        let events = dispatcher.poll();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ApiEvent::Quiz { generation, result } => {
                assert_eq!(*generation, 3);
                assert_eq!(result.as_ref().unwrap_err(), &err);
            }
            other => panic!("evento inesperado: {other:?}"),
        }
        assert!(dispatcher.poll().is_empty());
    }
}
