use crate::shared::{CallKind, Event, Snapshot};
use crossbeam_channel as cbc;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/**
 * Event and timer channel between the producers (console, signal handler)
 * and the single engine thread.
 *
 * Producers hold a cloneable `EngineHandle` and only ever push validated
 * events or read a snapshot; they never touch engine state. The engine owns
 * the `EventChannel`: the receiving end of the queue plus the single slot
 * for a delayed self-timer event. Arming a timer unconditionally replaces
 * any timer that has not fired yet.
 */

/// Producer side. Cheap to clone; safe to use from any thread.
#[derive(Clone)]
pub struct EngineHandle {
    event_tx: cbc::Sender<Event>,
    snapshot: Arc<Mutex<Snapshot>>,
}

/// Consumer side, owned by the engine thread.
pub struct EventChannel {
    event_rx: cbc::Receiver<Event>,
    timer: Option<(Instant, Event)>,
    snapshot: Arc<Mutex<Snapshot>>,
}

/// Create a connected handle/channel pair with the snapshot cell initialized
/// to the startup state (floor 1, standing by, doors closed).
pub fn channel(n_floors: u8) -> (EngineHandle, EventChannel) {
    let (event_tx, event_rx) = cbc::unbounded::<Event>();
    let snapshot = Arc::new(Mutex::new(Snapshot::new(n_floors)));
    (
        EngineHandle {
            event_tx,
            snapshot: snapshot.clone(),
        },
        EventChannel {
            event_rx,
            timer: None,
            snapshot,
        },
    )
}

impl EngineHandle {
    /// Hall call at `floor`. The caller has already validated the floor
    /// range and direction legality.
    pub fn enqueue_call(&self, floor: u8, kind: CallKind) {
        let event = match kind {
            CallKind::Up => Event::UpCall(floor),
            CallKind::Down => Event::DownCall(floor),
            CallKind::Internal => Event::InternalButton(floor),
        };
        let _ = self.event_tx.send(event);
    }

    /// In-car floor-select button at `floor`.
    pub fn enqueue_internal(&self, floor: u8) {
        let _ = self.event_tx.send(Event::InternalButton(floor));
    }

    /// Ask the engine to halt. Any armed timer is discarded unprocessed.
    pub fn request_shutdown(&self) {
        let _ = self.event_tx.send(Event::Quit);
    }

    /// Clone of the last published engine state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().clone()
    }
}

impl EventChannel {
    /// Arm the delayed-timer slot: `event` fires once `delay` has elapsed,
    /// unless a later `arm_timer` replaces it first. A previously armed
    /// timer that has not fired is silently dropped.
    pub fn arm_timer(&mut self, delay: Duration, event: Event) {
        if let Some((_, old)) = self.timer.replace((Instant::now() + delay, event)) {
            debug!("timer replaced, dropping pending {:?}", old);
        }
    }

    /// Block until the next event. Queued events are delivered in FIFO order
    /// and always take priority over an expired timer; the timer payload is
    /// only returned when the wait genuinely times out. With no timer armed
    /// and an empty queue this blocks until something is enqueued.
    pub fn wait_next(&mut self) -> Event {
        if let Ok(event) = self.event_rx.try_recv() {
            return event;
        }
        let (deadline, pending) = match self.timer.clone() {
            Some(slot) => slot,
            // All producers gone means no event can ever arrive; treat it
            // as a shutdown request rather than blocking forever.
            None => return self.event_rx.recv().unwrap_or(Event::Quit),
        };
        match self.event_rx.recv_deadline(deadline) {
            Ok(event) => event,
            Err(cbc::RecvTimeoutError::Timeout) => {
                self.timer = None;
                pending
            }
            Err(cbc::RecvTimeoutError::Disconnected) => Event::Quit,
        }
    }

    /// Payload of the armed timer, if any.
    pub fn pending_timer(&self) -> Option<&Event> {
        self.timer.as_ref().map(|(_, event)| event)
    }

    /// Publish a new snapshot for readers. The lock is held only for the
    /// assignment.
    pub fn publish(&self, snapshot: Snapshot) {
        *self.snapshot.lock() = snapshot;
    }
}
