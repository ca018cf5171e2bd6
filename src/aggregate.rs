use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// An event an aggregate can record. `kind` names the row of the event
/// table it belongs to and is what gets persisted alongside the payload.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone {
    fn kind(&self) -> &'static str;
}

/// An event-sourced aggregate: its entire state is a left fold over
/// `Self::Event`. `apply` must be pure and must never fail — by the time
/// an event reaches the log it has already been validated once by the
/// mutator that recorded it.
pub trait Aggregate: Sized + Serialize + DeserializeOwned {
    type Event: DomainEvent;

    fn aggregate_type() -> &'static str;

    /// A freshly allocated, versionless instance events get folded onto.
    fn blank(id: Uuid) -> Self;

    fn id(&self) -> Uuid;
    fn version(&self) -> u64;
    fn version_mut(&mut self) -> &mut u64;
    fn pending_mut(&mut self) -> &mut Vec<Self::Event>;
    fn apply(&mut self, event: &Self::Event);

    /// Applies `event`, bumps the version, and stages it for the next save.
    /// This is the Rust stand-in for the decorator that, in the aggregate's
    /// original form, wrapped every mutator method: call the mutation body
    /// and the bookkeeping happens as one atomic step.
    fn record(&mut self, event: Self::Event) {
        self.apply(&event);
        *self.version_mut() += 1;
        self.pending_mut().push(event);
    }
}
