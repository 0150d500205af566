use crate::config::Config;
use crate::engine::buttons::ButtonRegistry;
use crate::engine::channel::EventChannel;
use crate::shared::{CallKind, Door, Event, Motion, Snapshot};
use log::{debug, info};
use std::time::Duration;

/**
 * Single-car elevator control engine.
 *
 * The `Engine` owns the elevator state (current floor, motion, doors) and
 * the button registry, and is driven entirely by events pulled from its
 * `EventChannel`: validated call events from the producers and the two
 * self-timer events (`FloorReachedTimeout`, `DoorsClosedTimeout`) it arms
 * itself. Exactly one thread runs the engine, so none of its state needs
 * synchronization; readers get a snapshot published after every event.
 *
 * The dispatch policy is SCAN: keep going in the current direction while
 * any call remains ahead, decide stops strictly at floor boundaries, clear
 * the flags the stop serves, and reverse only at the turn-around floor.
 */
pub struct Engine {
    channel: EventChannel,
    buttons: ButtonRegistry,
    floor: u8,
    motion: Motion,
    door: Door,
    n_floors: u8,
    floor_timeout: Duration,
    door_timeout: Duration,
}

impl Engine {
    pub fn new(config: &Config, channel: EventChannel) -> Engine {
        Engine {
            channel,
            buttons: ButtonRegistry::new(config.n_floors),
            floor: 1,
            motion: Motion::StandBy,
            door: Door::Closed,
            n_floors: config.n_floors,
            floor_timeout: Duration::from_millis(config.floor_timeout),
            door_timeout: Duration::from_millis(config.door_timeout),
        }
    }

    /// Consumer loop. Returns on `Quit`, dropping any armed timer without
    /// further dispatch.
    pub fn run(mut self) {
        info!("engine started at floor {} of {}", self.floor, self.n_floors);

        loop {
            let event = self.channel.wait_next();
            if event == Event::Quit {
                info!("engine stopping");
                break;
            }
            self.handle_event(event);
            self.channel.publish(self.snapshot());
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event) {
        match event {
            Event::UpCall(floor) => self.handle_call(floor, CallKind::Up),
            Event::DownCall(floor) => self.handle_call(floor, CallKind::Down),
            Event::InternalButton(floor) => self.handle_call(floor, CallKind::Internal),
            Event::DoorsClosedTimeout => self.handle_doors_closed(),
            Event::FloorReachedTimeout => self.handle_floor_reached(),
            Event::Quit => unreachable!("Quit is handled by the run loop"),
        }
    }

    fn handle_call(&mut self, floor: u8, kind: CallKind) {
        self.buttons.record(floor, kind);

        // While moving, or while the doors are open with a stop pending,
        // the flag is only recorded; the next floor-reached decision
        // resolves it. No re-routing happens mid-flight.
        if self.motion != Motion::StandBy {
            debug!("{:?} call at floor {} recorded", kind, floor);
            return;
        }

        if floor == self.floor {
            // Already there: serve the call on the spot.
            self.buttons.clear(floor, kind);
            self.open_doors();
        } else {
            self.motion = if floor > self.floor {
                Motion::MovingUp
            } else {
                Motion::MovingDown
            };
            info!("heading {:?} toward floor {}", self.motion, floor);
            // With the doors open, departure waits for DoorsClosedTimeout.
            if self.door == Door::Closed {
                self.channel
                    .arm_timer(self.floor_timeout, Event::FloorReachedTimeout);
            }
        }
    }

    fn handle_doors_closed(&mut self) {
        self.door = Door::Closed;
        debug!("doors closed at floor {}", self.floor);
        if self.motion != Motion::StandBy {
            self.channel
                .arm_timer(self.floor_timeout, Event::FloorReachedTimeout);
        }
    }

    fn handle_floor_reached(&mut self) {
        match self.motion {
            Motion::MovingUp => {
                assert!(self.floor < self.n_floors, "moved above the top floor");
                self.floor += 1;
            }
            Motion::MovingDown => {
                assert!(self.floor > 1, "moved below the bottom floor");
                self.floor -= 1;
            }
            Motion::StandBy => panic!("floor reached while standing by"),
        }

        let has_up_calls = self.buttons.any_above(self.floor);
        let has_down_calls = self.buttons.any_below(self.floor);

        if !self.need_stop(has_up_calls, has_down_calls) {
            // Pass through without touching any flag here.
            debug!("passing floor {}", self.floor);
            self.channel
                .arm_timer(self.floor_timeout, Event::FloorReachedTimeout);
            return;
        }

        if !has_up_calls && !has_down_calls {
            // Nothing left anywhere else: this stop finishes the run.
            self.buttons.clear_all(self.floor);
            self.motion = Motion::StandBy;
            info!("stopping at floor {}, standing by", self.floor);
        } else if self.motion == Motion::MovingUp && !has_up_calls {
            // Upward turn-around point, fully serviced.
            self.buttons.clear_all(self.floor);
            self.motion = Motion::MovingDown;
            info!("reversing to {:?} at floor {}", self.motion, self.floor);
        } else if self.motion == Motion::MovingDown && !has_down_calls {
            self.buttons.clear_all(self.floor);
            self.motion = Motion::MovingUp;
            info!("reversing to {:?} at floor {}", self.motion, self.floor);
        } else {
            // More calls ahead in the same direction: serve this floor's
            // internal and same-direction flags, leave the opposite one for
            // a later pass.
            self.buttons.clear(self.floor, CallKind::Internal);
            match self.motion {
                Motion::MovingUp => self.buttons.clear(self.floor, CallKind::Up),
                Motion::MovingDown => self.buttons.clear(self.floor, CallKind::Down),
                Motion::StandBy => {}
            }
            info!("stopping at floor {}, continuing {:?}", self.floor, self.motion);
        }

        self.open_doors();
    }

    fn need_stop(&self, has_up_calls: bool, has_down_calls: bool) -> bool {
        if !has_up_calls && !has_down_calls {
            return true;
        }
        let here = self.buttons.at(self.floor);
        if here.internal {
            return true;
        }
        match self.motion {
            Motion::MovingUp => here.up || (here.down && !has_up_calls),
            Motion::MovingDown => here.down || (here.up && !has_down_calls),
            Motion::StandBy => unreachable!("stop decision while standing by"),
        }
    }

    fn open_doors(&mut self) {
        self.door = Door::Open;
        info!("doors open at floor {}", self.floor);
        self.channel
            .arm_timer(self.door_timeout, Event::DoorsClosedTimeout);
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            floor: self.floor,
            motion: self.motion,
            door: self.door,
            buttons: self.buttons.states().to_vec(),
        }
    }

    #[cfg(test)]
    pub(crate) fn pending_timer(&self) -> Option<&Event> {
        self.channel.pending_timer()
    }
}
