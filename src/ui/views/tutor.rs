use egui::{CentralPanel, Context, RichText};

use crate::TutorApp;
use crate::ui::chat::chat_panel;

pub fn ui_tutor(app: &mut TutorApp, ctx: &Context) {
    let mut send = false;

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 800.0;
        let w = ui.available_width().min(max_width);
        ui.vertical_centered(|ui| {
            ui.set_max_width(w);
            ui.label(RichText::new("VBA の疑問を何でも質問してください").weak());
            ui.add_space(6.0);
            // Deja sitio para el campo de entrada
            let history_height = (ui.available_height() - 76.0).max(120.0);
            let outcome = chat_panel(
                ui,
                "tutor_chat",
                &mut app.tutor,
                "VBAについて質問する...",
                &[],
                history_height,
            );
            send = outcome.send_input;
            ui.label(
                RichText::new("AIは間違いを犯す可能性があります。コードを実行する前に必ず確認してください。")
                    .small()
                    .weak(),
            );
        });
    });

    if send {
        app.send_tutor_message();
    }
}
