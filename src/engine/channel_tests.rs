/*
 * Unit tests for the event/timer channel
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod channel_tests {
    use crate::engine::channel::channel;
    use crate::shared::{CallKind, Event, Motion};
    use std::thread::spawn;
    use std::time::{Duration, Instant};

    #[test]
    fn test_events_are_delivered_in_fifo_order() {
        // Arrange
        let (handle, mut events) = channel(5);

        // Act
        handle.enqueue_call(2, CallKind::Up);
        handle.enqueue_call(4, CallKind::Down);
        handle.enqueue_internal(3);
        handle.request_shutdown();

        // Assert
        assert_eq!(events.wait_next(), Event::UpCall(2));
        assert_eq!(events.wait_next(), Event::DownCall(4));
        assert_eq!(events.wait_next(), Event::InternalButton(3));
        assert_eq!(events.wait_next(), Event::Quit);
    }

    #[test]
    fn test_enqueue_wakes_a_blocked_consumer() {
        // Arrange
        let (handle, mut events) = channel(5);

        // Act: producer on another thread, consumer blocked with no timer
        let producer = spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            handle.enqueue_internal(2);
        });

        // Assert
        assert_eq!(events.wait_next(), Event::InternalButton(2));
        producer.join().unwrap();
    }

    #[test]
    fn test_timer_fires_when_queue_stays_empty() {
        // Arrange
        let (_handle, mut events) = channel(5);
        events.arm_timer(Duration::from_millis(20), Event::FloorReachedTimeout);

        // Act
        let start = Instant::now();
        let event = events.wait_next();

        // Assert
        assert_eq!(event, Event::FloorReachedTimeout);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(events.pending_timer(), None);
    }

    #[test]
    fn test_arming_replaces_the_pending_timer() {
        // Arrange
        let (handle, mut events) = channel(5);
        events.arm_timer(Duration::from_millis(10), Event::DoorsClosedTimeout);
        events.arm_timer(Duration::from_millis(30), Event::FloorReachedTimeout);

        // Act: only the second timer may ever fire
        let first = events.wait_next();

        // Assert
        assert_eq!(first, Event::FloorReachedTimeout);
        assert_eq!(events.pending_timer(), None);

        // The replaced timer is gone for good: the next event is a fresh one
        handle.request_shutdown();
        assert_eq!(events.wait_next(), Event::Quit);
    }

    #[test]
    fn test_queued_event_takes_priority_over_an_expired_timer() {
        // Arrange: the deadline has long passed, but an event is queued
        let (handle, mut events) = channel(5);
        events.arm_timer(Duration::from_millis(0), Event::DoorsClosedTimeout);
        std::thread::sleep(Duration::from_millis(10));
        handle.enqueue_call(3, CallKind::Up);

        // Act
        let first = events.wait_next();

        // Assert: the queued event wins and the timer stays armed
        assert_eq!(first, Event::UpCall(3));
        assert_eq!(events.pending_timer(), Some(&Event::DoorsClosedTimeout));
        assert_eq!(events.wait_next(), Event::DoorsClosedTimeout);
    }

    #[test]
    fn test_snapshot_starts_at_floor_one_standing_by() {
        // Arrange
        let (handle, events) = channel(7);

        // Act
        let snapshot = handle.snapshot();

        // Assert
        assert_eq!(snapshot.floor, 1);
        assert_eq!(snapshot.motion, Motion::StandBy);
        assert_eq!(snapshot.buttons.len(), 7);
        drop(events);
    }

    #[test]
    fn test_publish_is_visible_through_every_handle_clone() {
        // Arrange
        let (handle, events) = channel(5);
        let clone = handle.clone();

        // Act
        let mut snapshot = handle.snapshot();
        snapshot.floor = 4;
        events.publish(snapshot);

        // Assert
        assert_eq!(clone.snapshot().floor, 4);
    }

    #[test]
    fn test_disconnected_producers_read_as_quit() {
        // Arrange
        let (handle, mut events) = channel(5);

        // Act
        drop(handle);

        // Assert
        assert_eq!(events.wait_next(), Event::Quit);
    }
}
