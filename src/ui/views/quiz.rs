use egui::{Button, Color32, ComboBox, Context, RichText, Stroke, Vec2};

use crate::TutorApp;
use crate::ui::chat::chat_panel;
use crate::ui::helpers::card;
use crate::ui::layout::content_panel;
use crate::ui::markdown::markdown_view;
use crate::view_models::{lessons_by_category, topic_for};

const CORRECT: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
const WRONG: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);

/// Lo pulsado en este frame; se aplica fuera de los closures
#[derive(Default)]
struct QuizInput {
    topic: Option<String>,
    generate: bool,
    answer: Option<usize>,
    followup_input: bool,
    suggestion: Option<String>,
}

pub fn ui_quiz(app: &mut TutorApp, ctx: &Context) {
    let mut input = QuizInput::default();
    let suggestions = app.quiz.suggestions().to_vec();

    content_panel(ctx, 800.0, |ui| {
        ui.add_space(12.0);

        // ----------- SELECTOR DE TEMA -----------
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("出題範囲").strong());
                let selected = app.quiz.state.topic.clone();
                ComboBox::from_id_salt("quiz_topic")
                    .width((ui.available_width() - 140.0).max(160.0))
                    .selected_text(selected.as_str())
                    .show_ui(ui, |ui| {
                        for group in lessons_by_category(&app.content.lessons) {
                            ui.label(RichText::new(group.category).strong());
                            for idx in group.lessons {
                                let lesson = &app.content.lessons[idx];
                                let topic = topic_for(lesson);
                                let is_selected = topic == selected;
                                if ui
                                    .selectable_label(is_selected, format!("  {}", lesson.title))
                                    .clicked()
                                {
                                    input.topic = Some(topic);
                                }
                            }
                        }
                    });

                let label = if app.quiz.state.loading {
                    "作成中..."
                } else {
                    "出題する"
                };
                if ui
                    .add_enabled(!app.quiz.state.loading, Button::new(label).min_size(Vec2::new(120.0, 32.0)))
                    .clicked()
                {
                    input.generate = true;
                }
            });
            ui.label(
                RichText::new("※ 選択したレッスンの内容に特化した問題が生成されます。")
                    .small()
                    .weak(),
            );
            ui.label(RichText::new(format!("正解数: {}", app.quiz.state.score)).small());
        });

        ui.add_space(12.0);

        if app.quiz.state.loading {
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new("問題を作成中...").weak());
            });
            return;
        }

        let Some(question) = app.quiz.state.current_question.clone() else {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new("トピックを選んで「出題する」を押してください。").weak());
            });
            return;
        };

        // ----------- PREGUNTA -----------
        card(ui, |ui| {
            markdown_view(ui, "quiz_question", &question.question);
            ui.add_space(10.0);

            let show_result = app.quiz.state.show_result;
            let selected = app.quiz.state.selected_option;
            for (i, option) in question.options.iter().enumerate() {
                let mut button = Button::new(option.as_str()).min_size(Vec2::new(ui.available_width(), 36.0));
                if show_result {
                    if i == question.correct_answer_index {
                        button = button.stroke(Stroke::new(2.0, CORRECT));
                    } else if Some(i) == selected {
                        button = button.stroke(Stroke::new(2.0, WRONG));
                    }
                }
                if ui.add_enabled(!show_result, button).clicked() {
                    input.answer = Some(i);
                }
                ui.add_space(4.0);
            }
        });

        // ----------- RESULTADO -----------
        if let Some(correct) = app.quiz.is_correct() {
            ui.add_space(12.0);
            card(ui, |ui| {
                let (heading, color) = if correct {
                    ("🎉 正解です！", CORRECT)
                } else {
                    ("❌ 残念、不正解です...", WRONG)
                };
                ui.label(RichText::new(heading).size(18.0).strong().color(color));
                ui.add_space(6.0);
                markdown_view(ui, "quiz_explanation", &question.explanation);
                ui.add_space(8.0);
                if ui.button("次の問題へ →").clicked() {
                    input.generate = true;
                }
            });

            ui.add_space(12.0);
            card(ui, |ui| {
                ui.label(RichText::new("🤖 AI解説チャット").strong());
                ui.add_space(6.0);
                let outcome = chat_panel(
                    ui,
                    "quiz_chat",
                    &mut app.quiz.chat,
                    "解説について質問する...",
                    &suggestions,
                    320.0,
                );
                input.followup_input = outcome.send_input;
                input.suggestion = outcome.suggestion;
            });
        }
        ui.add_space(24.0);
    });

    if let Some(topic) = input.topic {
        app.select_quiz_topic(topic);
    }
    if input.generate {
        app.generate_quiz();
    }
    if let Some(i) = input.answer {
        app.answer_quiz(i);
    }
    if let Some(text) = input.suggestion {
        app.send_quiz_followup(Some(&text));
    } else if input.followup_input {
        app.send_quiz_followup(None);
    }
}
