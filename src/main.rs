use vba_master::TutorApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    pretty_env_logger::formatted_builder()
        .parse_filters(&vba_master::config::log_filters(rust_log.as_deref()))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("VBA MASTER")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "VBA MASTER",
        options,
        Box::new(|cc| Ok(Box::new(TutorApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("sin window/document");
            return;
        };
        let canvas = match document
            .get_element_by_id("the_canvas_id")
            .map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("no se encontró el canvas 'the_canvas_id'");
                return;
            }
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(TutorApp::new(cc)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("fallo al arrancar eframe: {err:?}");
        }
    });
}
