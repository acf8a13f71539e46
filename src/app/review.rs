use rand::Rng;

use super::chat::{ChatRequest, ChatThread, FOLLOWUP_ERROR, FOLLOWUP_WELCOME_ID};
use crate::api::ApiError;
use crate::code_utils::normalize_code;
use crate::model::CodeReviewResult;

pub const DEMO_CODE: &str = r#"Sub ExportData()
    ' 変数宣言なし（NG）
    r = 2
    Do While Cells(r, 1).Value <> ""
        If Cells(r, 3).Value > 10000 Then
            ' Selectの多用（NG）
            Cells(r, 1).Select
            Selection.Font.Color = vbRed
        End If
        r = r + 1
    Loop
    MsgBox "完了"
End Sub"#;

pub const REVIEW_WELCOME: &str =
    "診断が完了しました。修正案について詳しく聞きたい点や、具体的な書き換え方について質問があればどうぞ！";
pub const REVIEW_FAILURE_NOTICE: &str = "レビューに失敗しました。時間をおいて再度お試しください。";

pub const PROGRESS_INTERVAL_SECS: f64 = 0.5;
pub const PROGRESS_MAX_STEP: f32 = 30.0;
pub const PROGRESS_CAP: f32 = 90.0;

/// Progreso simulado (cosmético) mientras se espera la revisión
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadingProgress {
    pub value: f32,
    next_step_at: Option<f64>,
}

impl LoadingProgress {
    pub fn start(&mut self, now: f64) {
        self.value = 0.0;
        self.next_step_at = Some(now + PROGRESS_INTERVAL_SECS);
    }

    pub fn is_running(&self) -> bool {
        self.next_step_at.is_some()
    }

    /// Avanza un paso si venció el intervalo. Un hueco largo entre frames
    /// cuenta como un solo paso.
    pub fn tick(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        match self.next_step_at {
            Some(due) if now >= due => {
                let step = rng.gen_range(0.0..PROGRESS_MAX_STEP);
                self.value = (self.value + step).min(PROGRESS_CAP);
                self.next_step_at = Some(now + PROGRESS_INTERVAL_SECS);
                true
            }
            _ => false,
        }
    }

    pub fn seconds_until_next(&self, now: f64) -> Option<f64> {
        self.next_step_at.map(|due| (due - now).max(0.0))
    }

    pub fn complete(&mut self) {
        self.value = 100.0;
        self.next_step_at = None;
    }

    pub fn stop(&mut self) {
        self.value = 0.0;
        self.next_step_at = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRequest {
    pub generation: u64,
    pub code: String,
}

#[derive(Debug)]
pub struct ReviewSession {
    pub code: String,
    /// Código tal como se envió, con saltos de línea normalizados
    pub submitted_code: String,
    pub loading: bool,
    pub progress: LoadingProgress,
    pub result: Option<CodeReviewResult>,
    pub chat: ChatThread,
    pub notice: Option<String>,
    generation: u64,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self {
            code: String::new(),
            submitted_code: String::new(),
            loading: false,
            progress: LoadingProgress::default(),
            result: None,
            chat: ChatThread::new(FOLLOWUP_ERROR),
            notice: None,
            generation: 0,
        }
    }
}

impl ReviewSession {
    pub fn load_demo(&mut self) {
        self.code = DEMO_CODE.to_string();
    }

    pub fn can_submit(&self) -> bool {
        !self.code.trim().is_empty() && !self.loading
    }

    pub fn submit(&mut self, now: f64) -> Option<ReviewRequest> {
        if !self.can_submit() {
            return None;
        }

        self.loading = true;
        self.result = None;
        self.chat.reset();
        self.progress.start(now);
        self.submitted_code = normalize_code(&self.code);
        self.generation += 1;

        Some(ReviewRequest {
            generation: self.generation,
            code: self.submitted_code.clone(),
        })
    }

    pub fn tick(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        self.loading && self.progress.tick(now, rng)
    }

    pub fn resolve(&mut self, generation: u64, result: Result<CodeReviewResult, ApiError>) -> bool {
        if generation != self.generation {
            log::debug!("revisión obsoleta descartada (gen {generation})");
            return false;
        }

        self.loading = false;
        match result {
            Ok(review) => {
                self.progress.complete();
                self.result = Some(review);
                self.chat.seed(FOLLOWUP_WELCOME_ID, REVIEW_WELCOME);
            }
            Err(err) => {
                log::warn!("revisión de código fallida: {err}");
                self.progress.stop();
                self.result = None;
                self.notice = Some(REVIEW_FAILURE_NOTICE.to_string());
            }
        }
        true
    }

    pub fn send_followup(&mut self, text: &str) -> Option<ChatRequest> {
        let result = self.result.as_ref()?;
        let code = &self.submitted_code;
        self.chat
            .send_with_context(text, |t| followup_context(code, result, t))
    }

    pub fn submit_followup_input(&mut self) -> Option<ChatRequest> {
        let text = self.chat.input.clone();
        self.send_followup(&text)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "なし".to_string()
    } else {
        items.join(", ")
    }
}

pub fn followup_context(code: &str, result: &CodeReviewResult, text: &str) -> String {
    let metrics = serde_json::to_string(&result.metrics).unwrap_or_default();
    format!(
        "\n【コンテキスト: 以下のVBAコードのレビューを行いました】\n```vba\n{code}\n```\n\n【診断結果の要約】\nスコア: {metrics}\nいい点: {}\n改善点: {}\n\n【ユーザーの質問】\n{text}",
        join_or_none(&result.strengths),
        join_or_none(&result.improvements),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewMetrics;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn review(strengths: &[&str], improvements: &[&str]) -> CodeReviewResult {
        CodeReviewResult {
            metrics: ReviewMetrics {
                maintainability: 3,
                readability: 4,
                efficiency: 2,
                robustness: 5,
                consistency: 3,
            },
            strengths: strengths.iter().map(|s| s.to_string()).collect(),
            improvements: improvements.iter().map(|s| s.to_string()).collect(),
            suggested_code: String::new(),
            critique: None,
        }
    }

    #[test]
    fn empty_code_is_not_submitted() {
        let mut session = ReviewSession::default();
        session.code = "  \n ".into();
        assert!(session.submit(0.0).is_none());
        assert!(!session.loading);
    }

    #[test]
    fn progress_steps_every_half_second_and_caps_at_90() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = ReviewSession::default();
        session.load_demo();
        session.submit(0.0).unwrap();

        assert!(!session.tick(0.2, &mut rng));
        assert_eq!(session.progress.value, 0.0);

        let mut now = 0.5;
        let mut last = 0.0;
        for _ in 0..40 {
            session.tick(now, &mut rng);
            assert!(session.progress.value >= last);
            assert!(session.progress.value <= PROGRESS_CAP);
            last = session.progress.value;
            now += PROGRESS_INTERVAL_SECS;
        }
        assert!(session.progress.value > 0.0);
    }

    #[test]
    fn success_completes_progress_and_seeds_chat() {
        let mut session = ReviewSession::default();
        session.code = "Sub Test()\nEnd Sub".into();
        let req = session.submit(0.0).unwrap();
        assert_eq!(req.code, "Sub Test()\nEnd Sub");

        assert!(session.resolve(req.generation, Ok(review(&[], &[]))));
        assert!(!session.loading);
        assert_eq!(session.progress.value, 100.0);
        assert!(!session.progress.is_running());
        assert_eq!(session.chat.messages.len(), 1);
        assert_eq!(session.chat.messages[0].id, "init");
        assert_eq!(session.chat.messages[0].text, REVIEW_WELCOME);
    }

    #[test]
    fn failure_reverts_to_empty_with_notice() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = ReviewSession::default();
        session.load_demo();
        let req = session.submit(0.0).unwrap();
        session.tick(1.0, &mut rng);

        session.resolve(
            req.generation,
            Err(ApiError::Transport {
                message: "timeout".into(),
            }),
        );
        assert!(!session.loading);
        assert!(session.result.is_none());
        assert_eq!(session.progress.value, 0.0);
        assert!(!session.progress.is_running());
        assert_eq!(session.notice.as_deref(), Some(REVIEW_FAILURE_NOTICE));
        assert!(session.chat.messages.is_empty());
    }

    #[test]
    fn submitted_code_keeps_whitespace_as_typed() {
        let mut session = ReviewSession::default();
        session.code = "Sub A()  \r\n    x = 1 \r\nEnd Sub\r\n".into();
        let req = session.submit(0.0).unwrap();
        assert_eq!(req.code, "Sub A()  \n    x = 1 \nEnd Sub\n");

        session.resolve(req.generation, Ok(review(&[], &[])));
        let chat = session.send_followup("どこを直す？").unwrap();
        assert!(chat.message.contains("```vba\nSub A()  \n    x = 1 \nEnd Sub\n\n```"));
    }

    #[test]
    fn resubmitting_invalidates_previous_chat() {
        let mut session = ReviewSession::default();
        session.code = "Sub A()\nEnd Sub".into();
        let req = session.submit(0.0).unwrap();
        session.resolve(req.generation, Ok(review(&["短い"], &[])));

        let chat_req = session.send_followup("どう直す？").unwrap();
        let second = session.submit(5.0).unwrap();
        assert!(session.result.is_none());
        assert!(!session.chat.resolve(chat_req.generation, Ok("古い回答".into())));
        assert!(session.chat.messages.is_empty());
        assert!(session.resolve(second.generation, Ok(review(&[], &[]))));
    }

    #[test]
    fn first_followup_embeds_review_summary() {
        let mut session = ReviewSession::default();
        session.code = "Sub Test()\nEnd Sub".into();
        let req = session.submit(0.0).unwrap();
        session.resolve(req.generation, Ok(review(&["簡潔", "命名"], &[])));
        session.code = "編集後".into();

        let chat = session.send_followup("エラー処理は？").unwrap();
        assert!(chat.message.contains("```vba\nSub Test()\nEnd Sub\n```"));
        assert!(chat.message.contains(
            r#"スコア: {"maintainability":3,"readability":4,"efficiency":2,"robustness":5,"consistency":3}"#
        ));
        assert!(chat.message.contains("いい点: 簡潔, 命名\n"));
        assert!(chat.message.contains("改善点: なし\n"));
        assert!(chat.message.ends_with("【ユーザーの質問】\nエラー処理は？"));
        assert_eq!(session.chat.messages.last().unwrap().text, "エラー処理は？");
    }

    #[test]
    fn followup_requires_result() {
        let mut session = ReviewSession::default();
        assert!(session.send_followup("質問").is_none());
    }
}
