use egui::{Color32, Context, RichText};

use crate::TutorApp;
use crate::ui::helpers::{difficulty_badge, frequency_badge, pill};
use crate::ui::layout::content_panel;
use crate::ui::markdown::markdown_view;

pub fn ui_lesson(app: &mut TutorApp, ctx: &Context) {
    let Some(lesson) = app.active_lesson() else {
        content_panel(ctx, 800.0, |ui| {
            ui.label(RichText::new("レッスンがありません").weak());
        });
        return;
    };

    content_panel(ctx, 800.0, |ui| {
        ui.add_space(12.0);
        ui.horizontal_wrapped(|ui| {
            pill(
                ui,
                &lesson.category,
                Color32::from_rgb(0x15, 0x80, 0x3d),
                Color32::from_rgb(0xdc, 0xfc, 0xe7),
            );
            ui.add_space(12.0);
            difficulty_badge(ui, lesson.difficulty);
            ui.add_space(12.0);
            frequency_badge(ui, lesson.frequency);
        });
        ui.add_space(8.0);
        ui.separator();
        markdown_view(ui, ("lesson", &lesson.id), &lesson.content);
        ui.add_space(24.0);
    });
}
