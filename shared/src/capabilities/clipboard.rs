use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Fire-and-forget clipboard writes. The shell never answers.
pub struct Clipboard<Ev> {
    context: CapabilityContext<ClipboardOperation, Ev>,
}

impl<Ev> Clone for Clipboard<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Clipboard<Ev> {
    type Operation = ClipboardOperation;
    type MappedSelf<MappedEv> = Clipboard<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Clipboard::new(self.context.map_event(f))
    }
}

impl<Ev> Clipboard<Ev> {
    pub fn new(context: CapabilityContext<ClipboardOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Clipboard<Ev>
where
    Ev: Send + 'static,
{
    pub fn write(&self, text: impl Into<String>) {
        let text = text.into();
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(ClipboardOperation::Write { text }).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClipboardOperation {
    Write { text: String },
}

impl Operation for ClipboardOperation {
    type Output = ();
}
