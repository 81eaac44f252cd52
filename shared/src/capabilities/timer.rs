use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::countdown::TimerId;

/// One-shot shell timers. A `Start` request resolves exactly once, either
/// when the timer fires or when a matching `Cancel` reaches the shell.
pub struct Timer<Ev> {
    context: CapabilityContext<TimerOperation, Ev>,
}

impl<Ev> Clone for Timer<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Timer<Ev> {
    type Operation = TimerOperation;
    type MappedSelf<MappedEv> = Timer<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Timer::new(self.context.map_event(f))
    }
}

impl<Ev> Timer<Ev> {
    pub fn new(context: CapabilityContext<TimerOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Timer<Ev>
where
    Ev: Send + 'static,
{
    pub fn start<F>(&self, id: TimerId, millis: u64, make_event: F)
    where
        F: FnOnce(TimerOutput) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let output = context
                .request_from_shell(TimerOperation::Start { id, millis })
                .await;
            context.update_app(make_event(output));
        });
    }

    pub fn cancel(&self, id: TimerId) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(TimerOperation::Cancel { id }).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    Start { id: TimerId, millis: u64 },
    Cancel { id: TimerId },
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    Fired { id: TimerId },
    Cancelled { id: TimerId },
}

impl TimerOutput {
    #[must_use]
    pub const fn id(&self) -> TimerId {
        match self {
            Self::Fired { id } | Self::Cancelled { id } => *id,
        }
    }

    pub fn fired(self) -> Result<TimerId, TimerError> {
        match self {
            Self::Fired { id } => Ok(id),
            Self::Cancelled { id } => Err(TimerError::Cancelled(id)),
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer {0:?} was cancelled before firing")]
    Cancelled(TimerId),
}
