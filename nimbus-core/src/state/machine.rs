//! Face mode state machine
//!
//! The mode is two flags: visible and ambient. Every event yields a set of
//! [`Effects`] that the platform carries out; the machine itself never
//! touches timers or the data channel.

use super::events::FaceEvent;

/// Interactive timer instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// Leave the timer as it is
    Keep,
    /// Fire now, cancelling any pending tick
    Start,
    /// Fire again at the next interval boundary
    ScheduleNext,
    /// Cancel any pending tick
    Stop,
}

/// Data channel subscription instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subscription {
    Keep,
    /// Connect and listen for weather changes
    Connect,
    /// Stop listening and disconnect
    Disconnect,
}

/// What the platform must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Effects {
    pub redraw: bool,
    /// Restart sprite motion from the rim
    pub restart_motion: bool,
    pub timer: TimerCommand,
    pub subscription: Subscription,
}

impl Effects {
    pub const NONE: Self = Self {
        redraw: false,
        restart_motion: false,
        timer: TimerCommand::Keep,
        subscription: Subscription::Keep,
    };

    const fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::NONE
        }
    }
}

/// Visible / ambient mode of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceMode {
    pub visible: bool,
    pub ambient: bool,
}

impl FaceMode {
    /// Hidden and interactive, as at creation
    pub const fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
        }
    }

    /// Check if the interactive timer should be running
    pub fn timer_should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Check if the animation layer should be drawn
    pub fn animates(&self) -> bool {
        !self.ambient
    }

    fn timer_command(&self) -> TimerCommand {
        if self.timer_should_run() {
            TimerCommand::Start
        } else {
            TimerCommand::Stop
        }
    }

    /// Apply an event and return the resulting effects
    pub fn handle(&mut self, event: FaceEvent) -> Effects {
        use FaceEvent::*;

        match event {
            VisibilityChanged(visible) => {
                self.visible = visible;
                Effects {
                    subscription: if visible {
                        Subscription::Connect
                    } else {
                        Subscription::Disconnect
                    },
                    timer: self.timer_command(),
                    ..Effects::NONE
                }
            }
            AmbientChanged(ambient) => {
                let changed = self.ambient != ambient;
                self.ambient = ambient;
                Effects {
                    redraw: changed,
                    restart_motion: !ambient,
                    timer: self.timer_command(),
                    ..Effects::NONE
                }
            }
            Tick => {
                if self.timer_should_run() {
                    Effects {
                        timer: TimerCommand::ScheduleNext,
                        ..Effects::redraw()
                    }
                } else {
                    Effects {
                        timer: TimerCommand::Stop,
                        ..Effects::NONE
                    }
                }
            }
            MinuteTick | WeatherUpdated => Effects::redraw(),
        }
    }
}

/// Delay until the next whole `interval_ms` boundary after `now_ms`
pub fn next_tick_delay_ms(now_ms: u64, interval_ms: u32) -> u64 {
    let interval = u64::from(interval_ms.max(1));
    interval - now_ms % interval
}
