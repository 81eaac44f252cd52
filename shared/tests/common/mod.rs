//! Minimal shell stand-in: records effects and resolves timers on demand.

#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::HttpRequest;

use shared::capabilities::{ClipboardOperation, TimerOperation, TimerOutput};
use shared::{App, Effect, Event, Model, TimerId, TimerKind};

pub struct Shell {
    pub app: AppTester<App, Effect>,
    pub model: Model,
    pub pending_timers: Vec<Request<TimerOperation>>,
    pub cancelled: Vec<TimerId>,
    pub http_requests: Vec<HttpRequest>,
    pub clipboard: Vec<String>,
    pub renders: usize,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            app: AppTester::default(),
            model: Model::default(),
            pending_timers: Vec::new(),
            cancelled: Vec::new(),
            http_requests: Vec::new(),
            clipboard: Vec::new(),
            renders: 0,
        }
    }
}

fn start_id(request: &Request<TimerOperation>) -> Option<TimerId> {
    match request.operation {
        TimerOperation::Start { id, .. } => Some(id),
        TimerOperation::Cancel { .. } => None,
    }
}

impl Shell {
    pub fn desktop() -> Self {
        let mut shell = Self::default();
        shell.dispatch(Event::ViewportResized { width: 1280 });
        shell
    }

    pub fn dispatch(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.absorb(update.effects);
    }

    fn absorb(&mut self, effects: Vec<Effect>) {
        let mut to_cancel = Vec::new();

        for effect in effects {
            match effect {
                Effect::Render(_) => self.renders += 1,
                Effect::Http(request) => self.http_requests.push(request.operation.clone()),
                Effect::Clipboard(request) => match &request.operation {
                    ClipboardOperation::Write { text } => self.clipboard.push(text.clone()),
                },
                Effect::Timer(request) => match request.operation {
                    TimerOperation::Start { .. } => self.pending_timers.push(request),
                    TimerOperation::Cancel { id } => to_cancel.push(id),
                },
            }
        }

        for id in to_cancel {
            self.cancelled.push(id);
            self.resolve_timer(id, TimerOutput::Cancelled { id });
        }
    }

    fn resolve_timer(&mut self, id: TimerId, output: TimerOutput) -> bool {
        let Some(index) = self
            .pending_timers
            .iter()
            .position(|request| start_id(request) == Some(id))
        else {
            return false;
        };

        let mut request = self.pending_timers.remove(index);
        let update = self
            .app
            .resolve(&mut request, output)
            .expect("timer request should resolve");
        self.absorb(update.effects);
        for event in update.events {
            self.dispatch(event);
        }
        true
    }

    pub fn fire(&mut self, id: TimerId) -> bool {
        self.resolve_timer(id, TimerOutput::Fired { id })
    }

    pub fn pending_ids(&self) -> Vec<TimerId> {
        self.pending_timers.iter().filter_map(start_id).collect()
    }

    pub fn pending_of(&self, kind: TimerKind) -> Vec<TimerId> {
        self.pending_ids()
            .into_iter()
            .filter(|id| id.kind == kind)
            .collect()
    }

    /// Fires every pending tick once, as one second of wall time would.
    pub fn advance_second(&mut self) {
        for id in self.pending_of(TimerKind::Tick) {
            self.fire(id);
        }
    }

    pub fn fill_sendable_form(&mut self, from: &str) {
        self.dispatch(Event::FromEmailChanged(from.into()));
        self.dispatch(Event::ToEmailChanged("bob@example.com".into()));
        self.dispatch(Event::AmountChanged("25".into()));
    }
}
