// src/config.rs
//
// Resolución de la URL base del backend de IA.

#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_NATIVE_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const BASE_ENV: &str = "VBA_MASTER_API_BASE";
pub const TIMEOUT_ENV: &str = "VBA_MASTER_API_TIMEOUT";

/// Nivel por defecto del crate cuando `RUST_LOG` no dice otra cosa
pub const DEFAULT_LOG_FILTER: &str = "vba_master=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    Quiz,
    Review,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Chat => "/api/chat",
            Endpoint::Quiz => "/api/quiz",
            Endpoint::Review => "/api/review",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Vacío = mismo origen (rutas relativas `/api/...`)
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve()
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// URL completa del endpoint, con una sola barra entre base y ruta
    pub fn endpoint(&self, endpoint: Endpoint) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        format!("{base}{}", endpoint.path())
    }

    /// Variables de entorno, con valores por defecto si faltan o están vacías
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve() -> Self {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_ENV)
            .and_then(|v| normalize(&v))
            .unwrap_or_else(|| DEFAULT_NATIVE_BASE.to_string());

        let timeout_secs = match lookup(TIMEOUT_ENV).and_then(|v| normalize(&v)) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!("{TIMEOUT_ENV}={raw:?} no es válido, uso {DEFAULT_TIMEOUT_SECS}s");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url,
            timeout_secs,
        }
    }

    /// Build env → `?api_base=` → `<meta>` → localStorage → mismo origen
    #[cfg(target_arch = "wasm32")]
    pub fn resolve() -> Self {
        let base_url = base_from_build_env()
            .or_else(base_from_querystring)
            .or_else(base_from_meta)
            .or_else(base_from_local_storage)
            .unwrap_or_default();

        Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Directivas para el logger: `RUST_LOG` si trae algo, si no info para el crate
pub fn log_filters(rust_log: Option<&str>) -> String {
    rust_log
        .and_then(normalize)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn base_from_build_env() -> Option<String> {
    option_env!("VBA_MASTER_API_BASE").and_then(normalize)
}

#[cfg(target_arch = "wasm32")]
fn base_from_querystring() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "api_base" {
            let decoded = js_sys::decode_uri_component(value).ok()?.as_string()?;
            return normalize(&decoded);
        }
    }

    None
}

#[cfg(target_arch = "wasm32")]
fn base_from_meta() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector("meta[name='vba-master-api-base']")
        .ok()??;

    meta.get_attribute("content").as_deref().and_then(normalize)
}

#[cfg(target_arch = "wasm32")]
fn base_from_local_storage() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item("vba_master_api_base")
        .ok()?
        .as_deref()
        .and_then(normalize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let cfg = ApiConfig::new("http://localhost:5000/");
        assert_eq!(cfg.endpoint(Endpoint::Chat), "http://localhost:5000/api/chat");

        let cfg = ApiConfig::new("http://localhost:5000//");
        assert_eq!(cfg.endpoint(Endpoint::Quiz), "http://localhost:5000/api/quiz");
    }

    #[test]
    fn empty_base_gives_relative_paths() {
        let cfg = ApiConfig::new("");
        assert_eq!(cfg.endpoint(Endpoint::Review), "/api/review");
    }

    #[test]
    fn log_filters_default_to_info_for_the_crate() {
        assert_eq!(log_filters(None), "vba_master=info");
        assert_eq!(log_filters(Some("  ")), "vba_master=info");
        assert_eq!(log_filters(Some("debug")), "debug");
        assert_eq!(
            log_filters(Some(" vba_master=trace,reqwest=warn ")),
            "vba_master=trace,reqwest=warn"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn env_lookup_falls_back_to_defaults() {
        let cfg = ApiConfig::resolve_with(|_| None);
        assert_eq!(cfg.base_url, DEFAULT_NATIVE_BASE);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let cfg = ApiConfig::resolve_with(|key| match key {
            BASE_ENV => Some("  ".into()),
            TIMEOUT_ENV => Some("abc".into()),
            _ => None,
        });
        assert_eq!(cfg.base_url, DEFAULT_NATIVE_BASE);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn env_lookup_reads_overrides() {
        let cfg = ApiConfig::resolve_with(|key| match key {
            BASE_ENV => Some("https://tutor.example.com".into()),
            TIMEOUT_ENV => Some("15".into()),
            _ => None,
        });
        assert_eq!(cfg.base_url, "https://tutor.example.com");
        assert_eq!(cfg.timeout_secs, 15);
    }
}
