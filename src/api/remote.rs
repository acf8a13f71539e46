use serde::Serialize;

use super::schema::{parse_chat, parse_quiz, parse_review};
use super::{ApiError, ChatRequestBody, HistoryEntry, QuizRequestBody, ReviewRequestBody};
use crate::config::{ApiConfig, Endpoint};
use crate::model::{CodeReviewResult, QuizQuestion};

/// Cliente HTTP del backend. En escritorio es bloqueante (se usa desde un
/// hilo de trabajo); en WASM usa `fetch`.
#[derive(Clone, Debug)]
pub struct HttpTutorApi {
    config: ApiConfig,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

fn status_error(status: u16, body: String) -> ApiError {
    ApiError::Status { status, body }
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTutorApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ApiError::Transport {
                message: format!("no se pudo crear el cliente HTTP: {err}"),
            })?;
        Ok(Self { config, client })
    }

    fn post_json<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<String, ApiError> {
        let url = self.config.endpoint(endpoint);
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|err| ApiError::Transport {
                message: format!("{url}: {err}"),
            })?;

        let status = response.status();
        let text = response.text().map_err(|err| ApiError::Transport {
            message: format!("no se pudo leer el body de {url}: {err}"),
        })?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), text));
        }
        Ok(text)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl super::TutorApi for HttpTutorApi {
    fn chat(&self, history: &[HistoryEntry], message: &str) -> Result<String, ApiError> {
        let body = self.post_json(Endpoint::Chat, &ChatRequestBody { history, message })?;
        parse_chat(&body)
    }

    fn generate_quiz(&self, topic: &str) -> Result<QuizQuestion, ApiError> {
        let body = self.post_json(Endpoint::Quiz, &QuizRequestBody { topic })?;
        parse_quiz(&body)
    }

    fn review_code(&self, code: &str) -> Result<CodeReviewResult, ApiError> {
        let body = self.post_json(Endpoint::Review, &ReviewRequestBody { code })?;
        parse_review(&body)
    }
}

#[cfg(target_arch = "wasm32")]
impl HttpTutorApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self { config })
    }

    async fn post_json<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<String, ApiError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::JsValue;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let url = self.config.endpoint(endpoint);
        let payload = serde_json::to_string(body).map_err(|err| ApiError::Transport {
            message: format!("no se pudo serializar el payload: {err}"),
        })?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&payload));

        let window = web_sys::window().ok_or_else(|| ApiError::Transport {
            message: "no existe window en entorno WASM".into(),
        })?;

        let request =
            Request::new_with_str_and_init(&url, &opts).map_err(|err| ApiError::Transport {
                message: format!("no se pudo crear el request fetch: {err:?}"),
            })?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|err| ApiError::Transport {
                message: format!("no se pudieron asignar headers: {err:?}"),
            })?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| ApiError::Transport {
                message: format!("fetch a {url} falló: {err:?}"),
            })?;
        let response: Response = resp_value.dyn_into().map_err(|_| ApiError::Transport {
            message: "la respuesta fetch no es un Response válido".into(),
        })?;

        let text_js = match response.text() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(err) => Err(err),
        };
        let text = text_js
            .ok()
            .and_then(|v| v.as_string())
            .ok_or_else(|| ApiError::Transport {
                message: format!("no se pudo leer el body de {url}"),
            })?;

        if !response.ok() {
            return Err(status_error(response.status(), text));
        }
        Ok(text)
    }

    pub async fn chat(&self, history: &[HistoryEntry], message: &str) -> Result<String, ApiError> {
        let body = self
            .post_json(Endpoint::Chat, &ChatRequestBody { history, message })
            .await?;
        parse_chat(&body)
    }

    pub async fn generate_quiz(&self, topic: &str) -> Result<QuizQuestion, ApiError> {
        let body = self
            .post_json(Endpoint::Quiz, &QuizRequestBody { topic })
            .await?;
        parse_quiz(&body)
    }

    pub async fn review_code(&self, code: &str) -> Result<CodeReviewResult, ApiError> {
        let body = self
            .post_json(Endpoint::Review, &ReviewRequestBody { code })
            .await?;
        parse_review(&body)
    }
}
