//! Simulated axis hardware shared by the integration tests.
//!
//! A carriage moves one unit per rising STEP edge. Switches sit at
//! `carriage <= 0` (start) and `carriage >= length` (end) and read low when
//! pressed. Reversing direction first takes up `slack_*` steps without
//! moving the carriage.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use stepper_oscillate::{Axis, AxisBuilder, Clock, DriverSettings, StepperDriver};

#[derive(Debug, Default)]
pub struct RigState {
    pub now_us: u64,

    pub carriage: i64,
    pub length: i64,
    pub slack_forward: u32,
    pub slack_backward: u32,
    pending_slack: u32,
    last_move_forward: Option<bool>,

    pub dir_high: bool,
    pub step_high: bool,
    pub enable_low: bool,

    /// Level changes written to the STEP pin.
    pub step_transitions: u64,
    /// DIR level at each rising STEP edge.
    pub edge_directions: Vec<bool>,
    /// Every level successfully written to the DIR pin.
    pub dir_writes: Vec<bool>,
    /// Fail the next DIR write without changing the level.
    pub fail_next_dir_write: bool,
    pub configured: Vec<DriverSettings>,
}

impl RigState {
    fn rising_edge(&mut self) {
        let forward = self.dir_high;
        self.edge_directions.push(forward);

        if self.last_move_forward.is_some_and(|last| last != forward) {
            self.pending_slack = if forward {
                self.slack_forward
            } else {
                self.slack_backward
            };
        }
        self.last_move_forward = Some(forward);

        if self.pending_slack > 0 {
            self.pending_slack -= 1;
        } else if forward {
            self.carriage += 1;
        } else {
            self.carriage -= 1;
        }
    }

    /// Forget recorded pin activity.
    pub fn clear_log(&mut self) {
        self.step_transitions = 0;
        self.edge_directions.clear();
        self.dir_writes.clear();
    }
}

pub type Shared = Rc<RefCell<RigState>>;

pub struct StepPin(pub Shared);
pub struct DirPin(pub Shared);
pub struct EnablePin(pub Shared);
pub struct StartSwitch(pub Shared);
pub struct EndSwitch(pub Shared);
pub struct SimDelay(pub Shared);
pub struct SimClock(pub Shared);
pub struct SimDriver(pub Shared);

macro_rules! infallible_pin {
    ($($pin:ty),*) => {
        $(impl ErrorType for $pin {
            type Error = Infallible;
        })*
    };
}

infallible_pin!(StepPin, EnablePin, StartSwitch, EndSwitch);

impl ErrorType for DirPin {
    type Error = ErrorKind;
}

impl DirPin {
    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        let mut rig = self.0.borrow_mut();
        if rig.fail_next_dir_write {
            rig.fail_next_dir_write = false;
            return Err(ErrorKind::Other);
        }
        rig.dir_high = high;
        rig.dir_writes.push(high);
        Ok(())
    }
}

impl OutputPin for StepPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut rig = self.0.borrow_mut();
        if rig.step_high {
            rig.step_transitions += 1;
        }
        rig.step_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut rig = self.0.borrow_mut();
        if !rig.step_high {
            rig.step_transitions += 1;
            rig.rising_edge();
        }
        rig.step_high = true;
        Ok(())
    }
}

impl OutputPin for DirPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        self.write(true)
    }
}

impl OutputPin for EnablePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().enable_low = true;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().enable_low = false;
        Ok(())
    }
}

impl InputPin for StartSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let rig = self.0.borrow();
        Ok(rig.carriage > 0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl InputPin for EndSwitch {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let rig = self.0.borrow();
        Ok(rig.carriage < rig.length)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().now_us += (ns / 1000) as u64;
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().now_us += us as u64;
    }
}

impl Clock for SimClock {
    fn now_micros(&mut self) -> u64 {
        self.0.borrow().now_us
    }
}

impl StepperDriver for SimDriver {
    type Error = Infallible;

    fn configure(&mut self, settings: &DriverSettings) -> Result<(), Infallible> {
        self.0.borrow_mut().configured.push(*settings);
        Ok(())
    }
}

pub type SimAxis =
    Axis<StepPin, DirPin, EnablePin, StartSwitch, EndSwitch, SimDriver, SimDelay, SimClock>;

pub type SimBuilder = AxisBuilder<
    StepPin,
    DirPin,
    EnablePin,
    StartSwitch,
    EndSwitch,
    SimDriver,
    SimDelay,
    SimClock,
>;

/// A rig whose carriage starts at `carriage` between switches `length` apart.
pub fn rig(length: i64, carriage: i64, slack_forward: u32, slack_backward: u32) -> Shared {
    Rc::new(RefCell::new(RigState {
        length,
        carriage,
        slack_forward,
        slack_backward,
        ..RigState::default()
    }))
}

/// Attach every simulated peripheral of `rig` to `builder`.
pub fn wire(builder: SimBuilder, rig: &Shared) -> SimBuilder {
    builder
        .step_pin(StepPin(rig.clone()))
        .dir_pin(DirPin(rig.clone()))
        .enable_pin(EnablePin(rig.clone()))
        .start_switch(StartSwitch(rig.clone()))
        .end_switch(EndSwitch(rig.clone()))
        .driver(SimDriver(rig.clone()))
        .delay(SimDelay(rig.clone()))
        .clock(SimClock(rig.clone()))
}

/// Build an axis named "slide" on `rig` with default settings.
pub fn axis(rig: &Shared) -> SimAxis {
    wire(SimAxis::builder().name("slide"), rig)
        .build()
        .expect("all peripherals supplied")
}

/// Call `run()` every `tick_us` until the run finishes.
///
/// Returns the events applied, in order.
pub fn drive_to_completion(
    axis: &mut SimAxis,
    rig: &Shared,
    tick_us: u64,
) -> Vec<stepper_oscillate::StepEvent> {
    let mut events = Vec::new();
    for _ in 0..50_000_000u64 {
        if let Some(event) = axis.run().expect("simulated pins never fail") {
            events.push(event);
            if event == stepper_oscillate::StepEvent::Finished {
                return events;
            }
        }
        rig.borrow_mut().now_us += tick_us;
    }
    panic!("run did not finish");
}
