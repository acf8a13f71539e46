use egui::{Align, Color32, Frame, Key, Layout, RichText, ScrollArea, TextEdit, Ui};

use crate::app::ChatThread;
use crate::model::{ChatMessage, Role};
use crate::ui::markdown::markdown_view;

const USER_BG: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a);
const MODEL_BG: Color32 = Color32::from_rgb(0xf8, 0xfa, 0xfc);
const ERROR_BG: Color32 = Color32::from_rgb(0xfe, 0xf2, 0xf2);
const ERROR_FG: Color32 = Color32::from_rgb(0xb9, 0x1c, 0x1c);

/// Lo que pidió el usuario en este frame
#[derive(Default)]
pub struct ChatOutcome {
    pub send_input: bool,
    pub suggestion: Option<String>,
}

pub fn chat_panel(
    ui: &mut Ui,
    id_salt: &str,
    thread: &mut ChatThread,
    placeholder: &str,
    suggestions: &[String],
    max_height: f32,
) -> ChatOutcome {
    let mut outcome = ChatOutcome::default();

    ScrollArea::vertical()
        .id_salt(id_salt)
        .max_height(max_height)
        .stick_to_bottom(true)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (i, msg) in thread.messages.iter().enumerate() {
                message_bubble(ui, (id_salt, i), msg);
                ui.add_space(6.0);
            }
            if thread.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("考え中...").weak());
                });
            }
        });

    if !suggestions.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("👇 気になることをタップして質問").small().weak());
        ui.horizontal_wrapped(|ui| {
            for s in suggestions {
                if ui.add_enabled(!thread.loading, egui::Button::new(s.as_str())).clicked() {
                    outcome.suggestion = Some(s.clone());
                }
            }
        });
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let send_w = 64.0;
        let edit = ui.add(
            TextEdit::singleline(&mut thread.input)
                .hint_text(placeholder)
                .desired_width((ui.available_width() - send_w).max(80.0)),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let can_send = thread.can_send(&thread.input);
        let clicked = ui
            .add_enabled(can_send, egui::Button::new("送信").min_size([send_w - 8.0, 0.0].into()))
            .clicked();
        if (enter && can_send) || clicked {
            outcome.send_input = true;
            edit.request_focus();
        }
    });

    outcome
}

fn message_bubble(ui: &mut Ui, id_salt: (&str, usize), msg: &ChatMessage) {
    let is_user = msg.role == Role::User;
    let layout = if is_user {
        Layout::right_to_left(Align::Min)
    } else {
        Layout::left_to_right(Align::Min)
    };
    let max_w = ui.available_width() * 0.85;

    ui.with_layout(layout, |ui| {
        let (fill, text_color) = match (is_user, msg.is_error) {
            (true, _) => (USER_BG, Color32::WHITE),
            (false, true) => (ERROR_BG, ERROR_FG),
            (false, false) => (MODEL_BG, Color32::from_rgb(0x1f, 0x29, 0x37)),
        };

        Frame::default()
            .fill(fill)
            .corner_radius(10)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_w);
                ui.vertical(|ui| {
                    if is_user || msg.is_error {
                        ui.label(RichText::new(&msg.text).color(text_color));
                    } else {
                        ui.visuals_mut().override_text_color = Some(text_color);
                        markdown_view(ui, id_salt, &msg.text);
                    }
                    ui.label(
                        RichText::new(msg.timestamp.format("%H:%M").to_string())
                            .small()
                            .color(text_color.gamma_multiply(0.6)),
                    );
                });
            });
    });
}
