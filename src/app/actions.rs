use rand::Rng;

use super::*;

impl TutorApp {
    pub fn navigate(&mut self, action: NavAction) {
        self.nav = self.nav.reduce(action);
    }

    pub fn send_tutor_message(&mut self) {
        if let Some(request) = self.tutor.submit_input() {
            self.dispatcher.send(ApiRequest::Chat {
                target: ChatTarget::Tutor,
                request,
            });
        }
    }

    pub fn select_quiz_topic(&mut self, topic: String) {
        self.quiz.set_topic(topic);
    }

    /// "出題する" y "次の問題へ"
    pub fn generate_quiz(&mut self) {
        if let Some(request) = self.quiz.generate() {
            self.dispatcher.send(ApiRequest::Quiz(request));
        }
    }

    pub fn answer_quiz(&mut self, index: usize) {
        self.quiz.select_option(index);
    }

    /// Sin `suggestion` envía lo escrito en el campo de entrada
    pub fn send_quiz_followup(&mut self, suggestion: Option<&str>) {
        let request = match suggestion {
            Some(text) => self.quiz.send_followup(text),
            None => self.quiz.submit_followup_input(),
        };
        if let Some(request) = request {
            self.dispatcher.send(ApiRequest::Chat {
                target: ChatTarget::Quiz,
                request,
            });
        }
    }

    pub fn submit_review(&mut self, now: f64) {
        if let Some(request) = self.review.submit(now) {
            self.dispatcher.send(ApiRequest::Review(request));
        }
    }

    pub fn send_review_followup(&mut self) {
        if let Some(request) = self.review.submit_followup_input() {
            self.dispatcher.send(ApiRequest::Chat {
                target: ChatTarget::Review,
                request,
            });
        }
    }

    /// Temporizadores de la app (progreso simulado de la revisión)
    pub fn tick(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        self.review.tick(now, rng)
    }

    /// Aplica las respuestas que hayan llegado. Devuelve si cambió algo.
    pub fn poll_api(&mut self) -> bool {
        let mut changed = false;
        for event in self.dispatcher.poll() {
            changed |= self.apply_event(event);
        }
        changed
    }

    pub fn apply_event(&mut self, event: ApiEvent) -> bool {
        match event {
            ApiEvent::Chat {
                target,
                generation,
                result,
            } => {
                let thread = match target {
                    ChatTarget::Tutor => &mut self.tutor,
                    ChatTarget::Quiz => &mut self.quiz.chat,
                    ChatTarget::Review => &mut self.review.chat,
                };
                thread.resolve(generation, result)
            }
            ApiEvent::Quiz { generation, result } => self.quiz.resolve(generation, result),
            ApiEvent::Review { generation, result } => self.review.resolve(generation, result),
        }
    }
}
