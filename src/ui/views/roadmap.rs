use egui::{Align2, Color32, Context, FontId, RichText, Sense, Stroke, Vec2};

use crate::TutorApp;
use crate::ui::helpers::card;
use crate::ui::layout::content_panel;

const DOT: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const DOT_TEXT: Color32 = Color32::from_rgb(0x15, 0x80, 0x3d);

pub fn ui_roadmap(app: &mut TutorApp, ctx: &Context) {
    content_panel(ctx, 800.0, |ui| {
        ui.add_space(12.0);
        ui.label(RichText::new("VBA学習スケジュール").size(22.0).strong());
        ui.label(
            RichText::new(
                "10週間でVBAを基礎から実務レベルまで習得するためのロードマップです。\n週ごとに目標を設定し、着実にステップアップしていきましょう。",
            )
            .weak(),
        );
        ui.add_space(16.0);

        for week in &app.content.roadmap {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(56.0);
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(36.0), Sense::hover());
                    let painter = ui.painter();
                    painter.circle(rect.center(), 15.0, Color32::WHITE, Stroke::new(4.0, DOT));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        week.week.to_string(),
                        FontId::proportional(12.0),
                        DOT_TEXT,
                    );
                    ui.label(RichText::new("WEEK").small().weak());
                });
                card(ui, |ui| {
                    ui.label(RichText::new(&week.title).size(17.0).strong());
                    ui.add_space(6.0);
                    for item in &week.items {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(RichText::new("•").color(DOT));
                            ui.label(item.as_str());
                        });
                    }
                });
            });
            ui.add_space(12.0);
        }

        card(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("一歩ずつ着実に").strong());
                ui.label(
                    "このロードマップを完了すれば、業務を大幅に効率化できるスキルが身につきます。\n分からないことがあれば、いつでも「AI講師」に質問してくださいね！",
                );
            });
        });
        ui.add_space(24.0);
    });
}
