use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orderflow_core::OrderId;

/// Envelope for an event, containing stream metadata.
///
/// This is the unit an aggregate appends to its in-memory log and the unit a
/// persistence collaborator would store.
///
/// Notes:
/// - **Append-only**: `sequence_number` starts at 1 and grows by one per event.
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: OrderId,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_id: OrderId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    /// Wrap `payload` with a fresh time-ordered (UUIDv7) event id.
    pub fn record(
        aggregate_id: OrderId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self::new(
            Uuid::now_v7(),
            aggregate_id,
            aggregate_type,
            sequence_number,
            payload,
        )
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> OrderId {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_assigns_distinct_ids() {
        let order_id = OrderId::new(9).unwrap();
        let first = EventEnvelope::record(order_id, "production.order", 1, "a");
        let second = EventEnvelope::record(order_id, "production.order", 2, "b");

        assert_ne!(first.event_id(), second.event_id());
        assert_eq!(first.aggregate_id(), order_id);
        assert_eq!(first.aggregate_type(), "production.order");
        assert_eq!(second.sequence_number(), 2);
        assert_eq!(second.into_payload(), "b");
    }

    #[test]
    fn envelope_serializes_with_payload() {
        let order_id = OrderId::new(3).unwrap();
        let envelope = EventEnvelope::new(Uuid::nil(), order_id, "production.order", 1, 42u32);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["aggregate_id"], 3);
        assert_eq!(json["sequence_number"], 1);
        assert_eq!(json["payload"], 42);
    }
}
