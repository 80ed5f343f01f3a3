//! Tracker event stream.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use tracing::debug;

use crate::classifier::Category;
use crate::detection::TrackingId;
use crate::tracker::CarriedItem;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// An object was promoted to carried.
    PickedUp(CarriedItem),
    /// A carried object lost tracking before it was disposed.
    Dropped(CarriedItem),
    /// Carried objects confirmed into a bin.
    Disposed {
        bin: Category,
        items: Vec<TrackingId>,
        points: u32,
    },
}

/// Producer side of the event stream, in emission order.
///
/// The buffer is bounded. Sending never blocks: when a slow consumer lets
/// the buffer fill up, new events are shed, and once the receiver is gone
/// every event is dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: SyncSender<TrackerEvent>,
}

impl EventSink {
    pub fn channel(capacity: usize) -> (EventSink, Receiver<TrackerEvent>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (EventSink { tx }, rx)
    }

    pub fn emit(&self, event: TrackerEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(?event, "event buffer full, shedding event");
            }
            Err(TrySendError::Disconnected(_)) => debug!("event receiver dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::CarriedItem;

    fn picked(id: u64) -> TrackerEvent {
        TrackerEvent::PickedUp(CarriedItem::new(id, Category::Recyclable, "bottle"))
    }

    #[test]
    fn test_events_arrive_in_order() {
        let (sink, rx) = EventSink::channel(4);
        sink.emit(picked(1));
        sink.emit(picked(2));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![picked(1), picked(2)]);
    }

    #[test]
    fn test_full_buffer_sheds_newest() {
        let (sink, rx) = EventSink::channel(2);
        for id in 1..=5 {
            sink.emit(picked(id));
        }
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![picked(1), picked(2)]);

        // Draining frees room again.
        sink.emit(picked(6));
        assert_eq!(rx.try_recv().unwrap(), picked(6));
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (sink, rx) = EventSink::channel(1);
        drop(rx);
        sink.emit(picked(1));
    }
}
