use egui::{Context, FontData, FontDefinitions, FontFamily};

/// Rutas habituales de fuentes con glifos japoneses
#[cfg(not(target_arch = "wasm32"))]
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// Ruta explícita a una fuente CJK (escritorio) o URL (web)
pub const CJK_FONT_ENV: &str = "VBA_MASTER_CJK_FONT";

/// Fuente por defecto en la web: Noto Sans JP (TTF, CORS abierto)
#[cfg(target_arch = "wasm32")]
const DEFAULT_CJK_FONT_URL: &str =
    "https://cdn.jsdelivr.net/gh/google/fonts@main/ofl/notosansjp/NotoSansJP%5Bwght%5D.ttf";

const CJK_FONT_NAME: &str = "cjk";

/// Definiciones por defecto de egui con `bytes` como respaldo en ambas familias
pub fn cjk_font_definitions(bytes: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        std::sync::Arc::new(FontData::from_owned(bytes)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    fonts
}

/// Añade una fuente CJK del sistema como respaldo de las de egui
#[cfg(not(target_arch = "wasm32"))]
pub fn install_fonts(ctx: &Context) {
    match load_cjk_font() {
        Some(bytes) => ctx.set_fonts(cjk_font_definitions(bytes)),
        None => log::warn!("no se encontró fuente CJK; el texto japonés puede verse como cuadros"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_cjk_font() -> Option<Vec<u8>> {
    let custom = std::env::var(CJK_FONT_ENV).ok();
    custom
        .iter()
        .map(String::as_str)
        .chain(CJK_FONT_CANDIDATES.iter().copied())
        .find_map(|path| match std::fs::read(path) {
            Ok(bytes) => {
                log::info!("fuente CJK: {path}");
                Some(bytes)
            }
            Err(err) => {
                log::debug!("fuente CJK {path}: {err}");
                None
            }
        })
}

/// En la web la fuente se descarga al arrancar; hasta que llega se pinta
/// con las fuentes de egui.
#[cfg(target_arch = "wasm32")]
pub fn install_fonts(ctx: &Context) {
    let url = font_url();
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_font(&url).await {
            Ok(bytes) => {
                log::info!("fuente CJK descargada de {url} ({} bytes)", bytes.len());
                ctx.set_fonts(cjk_font_definitions(bytes));
                ctx.request_repaint();
            }
            Err(err) => log::warn!("no se pudo descargar la fuente CJK de {url}: {err}"),
        }
    });
}

/// Build env → `<meta name="vba-master-cjk-font">` → CDN
#[cfg(target_arch = "wasm32")]
fn font_url() -> String {
    option_env!("VBA_MASTER_CJK_FONT")
        .map(str::to_owned)
        .or_else(font_url_from_meta)
        .unwrap_or_else(|| DEFAULT_CJK_FONT_URL.to_owned())
}

#[cfg(target_arch = "wasm32")]
fn font_url_from_meta() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector("meta[name='vba-master-cjk-font']")
        .ok()??;
    meta.get_attribute("content")
        .filter(|url| !url.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
async fn fetch_font(url: &str) -> Result<Vec<u8>, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    let window = web_sys::window().ok_or("no existe window")?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| format!("fetch falló: {err:?}"))?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| "la respuesta fetch no es un Response válido".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let buffer = response
        .array_buffer()
        .map_err(|err| format!("{err:?}"))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|err| format!("no se pudo leer el cuerpo: {err:?}"))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_font_is_appended_as_fallback() {
        let defaults = FontDefinitions::default();
        let fonts = cjk_font_definitions(vec![0u8; 4]);

        assert!(fonts.font_data.contains_key(CJK_FONT_NAME));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            let names = &fonts.families[&family];
            assert_eq!(names.last().map(String::as_str), Some(CJK_FONT_NAME));
            assert_eq!(names.len(), defaults.families[&family].len() + 1);
        }
    }
}
