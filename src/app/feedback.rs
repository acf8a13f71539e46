// src/app/feedback.rs
//
// Botón de copiar de los bloques de código: escribe en el portapapeles y
// muestra "copiado" durante unos segundos.

use std::fmt;

pub const COPY_CONFIRM_SECS: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError {
    pub message: String,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no se pudo escribir en el portapapeles: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Portapapeles del backend de egui (plataforma o navegador). egui entrega
/// el texto al integrador al final del frame y no informa de fallos.
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl Clipboard for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.copy_text(text.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Copied {
        until: f64,
    },
}

impl CopyFeedback {
    /// Si el portapapeles falla se queda en `Idle` y sólo se registra el error
    pub fn activate(&mut self, clipboard: &mut dyn Clipboard, text: &str, now: f64) -> bool {
        match clipboard.write_text(text) {
            Ok(()) => {
                *self = CopyFeedback::Copied {
                    until: now + COPY_CONFIRM_SECS,
                };
                true
            }
            Err(err) => {
                log::error!("{err}");
                false
            }
        }
    }

    pub fn tick(&mut self, now: f64) {
        if let CopyFeedback::Copied { until } = *self {
            if now >= until {
                *self = CopyFeedback::Idle;
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = CopyFeedback::Idle;
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, CopyFeedback::Copied { .. })
    }

    pub fn remaining(&self, now: f64) -> Option<f64> {
        match self {
            CopyFeedback::Copied { until } => Some((until - now).max(0.0)),
            CopyFeedback::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeClipboard {
        contents: Option<String>,
        broken: bool,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError {
                    message: "permiso denegado".into(),
                });
            }
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }

    #[test]
    fn copy_then_revert_after_two_seconds() {
        let mut clipboard = FakeClipboard::default();
        let mut feedback = CopyFeedback::default();

        assert!(feedback.activate(&mut clipboard, "MsgBox \"Hi\"", 10.0));
        assert_eq!(clipboard.contents.as_deref(), Some("MsgBox \"Hi\""));
        assert!(feedback.is_copied());

        feedback.tick(11.9);
        assert!(feedback.is_copied());
        assert_eq!(feedback.remaining(11.5), Some(0.5));

        feedback.tick(12.0);
        assert_eq!(feedback, CopyFeedback::Idle);
    }

    #[test]
    fn failure_stays_idle() {
        let mut clipboard = FakeClipboard {
            broken: true,
            ..FakeClipboard::default()
        };
        let mut feedback = CopyFeedback::default();
        assert!(!feedback.activate(&mut clipboard, "x", 0.0));
        assert_eq!(feedback, CopyFeedback::Idle);
    }

    #[test]
    fn cancel_drops_pending_revert() {
        let mut clipboard = FakeClipboard::default();
        let mut feedback = CopyFeedback::default();
        feedback.activate(&mut clipboard, "x", 0.0);
        feedback.cancel();
        assert_eq!(feedback.remaining(0.5), None);
    }

    #[test]
    fn egui_clipboard_accepts_any_text() {
        let ctx = egui::Context::default();
        let mut feedback = CopyFeedback::default();
        assert!(feedback.activate(&mut EguiClipboard(&ctx), "", 0.0));
        assert!(feedback.is_copied());
        assert!(EguiClipboard(&ctx).write_text("Sub A()\nEnd Sub").is_ok());
    }

    #[test]
    fn recopy_restarts_timer() {
        let mut clipboard = FakeClipboard::default();
        let mut feedback = CopyFeedback::default();
        feedback.activate(&mut clipboard, "a", 0.0);
        feedback.activate(&mut clipboard, "b", 1.5);
        feedback.tick(2.5);
        assert!(feedback.is_copied());
        assert_eq!(clipboard.contents.as_deref(), Some("b"));
    }
}
