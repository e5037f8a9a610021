use async_trait::async_trait;
use stubsource_types::StubMapping;

/// Post-commit lifecycle notifications from the live stub collection.
///
/// The host delivers these synchronously, one at a time, on whichever task
/// originated the mutation; implementations may block on I/O and the host
/// must tolerate that latency. By the time a callback runs the in-memory
/// change has already happened, so implementations must not try to veto or
/// roll it back — persistence here is best effort.
#[async_trait]
pub trait StubLifecycleListener: Send + Sync {
    async fn after_stub_created(&self, stub: &StubMapping);

    async fn after_stub_edited(&self, old_stub: &StubMapping, new_stub: &StubMapping);

    async fn after_stub_removed(&self, stub: &StubMapping);
}
