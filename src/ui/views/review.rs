use egui::{Button, Color32, Context, ProgressBar, RichText, Vec2};

use crate::TutorApp;
use crate::code_utils::vba_syntax;
use crate::ui::chat::chat_panel;
use crate::ui::helpers::card;
use crate::ui::layout::{code_editor_input, content_panel};
use crate::ui::markdown::markdown_view;
use crate::ui::radar::radar_chart;
use crate::view_models::ReviewReport;

const STRENGTH: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
const IMPROVEMENT: Color32 = Color32::from_rgb(0xea, 0x58, 0x0c);

pub fn ui_review(app: &mut TutorApp, ctx: &Context) {
    let mut submit = false;
    let mut followup = false;
    let now = ctx.input(|i| i.time);

    content_panel(ctx, 900.0, |ui| {
        ui.add_space(12.0);
        ui.label(
            RichText::new(
                "あなたのVBAコードをAIが診断し、5つの観点（保守性・可読性・効率性・安全性・一貫性）で評価します。",
            )
            .weak(),
        );
        ui.add_space(10.0);

        // ----------- ENTRADA DE CÓDIGO -----------
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("コード入力").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add_enabled(!app.review.loading, Button::new("デモコードを入力")).clicked() {
                        app.review.load_demo();
                    }
                });
            });
            ui.add_space(6.0);

            let font_id = egui::TextStyle::Monospace.resolve(ui.style());
            let line_height = ui.fonts(|f| f.row_height(&font_id));
            let width = ui.available_width();
            code_editor_input(
                ui,
                "review_input",
                width,
                16,
                line_height,
                vba_syntax(),
                &mut app.review.code,
                320.0,
            );
            if app.review.code.is_empty() {
                ui.label(RichText::new("' ここにVBAコードを貼り付けてください...").weak().small());
            }
            ui.add_space(8.0);

            if app.review.loading {
                let value = app.review.progress.value;
                ui.add(
                    ProgressBar::new(value / 100.0)
                        .desired_width(ui.available_width())
                        .text(format!("AI が分析中... {}%", value.round() as u32)),
                );
            } else if ui
                .add_enabled(
                    app.review.can_submit(),
                    Button::new(RichText::new("▶ 診断を開始する").strong())
                        .min_size(Vec2::new(ui.available_width(), 36.0)),
                )
                .clicked()
            {
                submit = true;
            }
        });

        ui.add_space(12.0);

        // ----------- INFORME -----------
        match &app.review.result {
            Some(result) => {
                let report = ReviewReport::from(result);
                card(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("診断レポート").size(18.0).strong());
                        ui.add_space(6.0);
                        radar_chart(ui, &result.metrics);
                    });

                    if report.show_strengths {
                        ui.add_space(10.0);
                        ui.label(RichText::new("✨ いい点").strong());
                        for item in &result.strengths {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new("✓").strong().color(STRENGTH));
                                ui.label(item.as_str());
                            });
                        }
                    }

                    if report.show_improvements {
                        ui.add_space(10.0);
                        ui.label(RichText::new("💡 改善点").strong());
                        for item in &result.improvements {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new("→").strong().color(IMPROVEMENT));
                                ui.label(item.as_str());
                            });
                        }
                    }

                    if report.show_suggested_code {
                        ui.add_space(10.0);
                        ui.label(RichText::new("🔧 改善コード案").strong());
                        markdown_view(ui, "review_suggested", &result.suggested_code);
                    }

                    if report.show_critique {
                        if let Some(critique) = &result.critique {
                            ui.add_space(10.0);
                            ui.label(RichText::new("📝 詳細なアドバイス").strong());
                            markdown_view(ui, "review_critique", critique);
                        }
                    }
                });

                ui.add_space(12.0);
                card(ui, |ui| {
                    ui.label(RichText::new("💬 レビューについて質問").strong());
                    ui.add_space(6.0);
                    let outcome = chat_panel(
                        ui,
                        "review_chat",
                        &mut app.review.chat,
                        "修正コードの書き方などを質問...",
                        &[],
                        320.0,
                    );
                    followup = outcome.send_input;
                });
            }
            None if app.review.loading => {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label(
                        RichText::new("コードを分析しています...\nこれには数秒かかる場合があります。").weak(),
                    );
                });
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("コードを入力して\n「診断を開始する」を押してください。").weak(),
                    );
                });
            }
        }
        ui.add_space(24.0);
    });

    if submit {
        app.submit_review(now);
    }
    if followup {
        app.send_review_followup();
    }
}
