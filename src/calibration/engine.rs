//! Blocking switch search.
//!
//! Each leg samples the target switch before every pulse, so a carriage
//! already resting on the switch emits no steps for that leg.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{CalibrationError, Error, LimitSwitch, Result};
use crate::hal::StepperDriver;
use crate::motion::Direction;
use crate::motor::DriverAdapter;

use super::switches::LimitSwitches;
use super::{CalibrationReport, MIN_RELIABLE_INTERVAL_US};

/// Drive toward `switch` until it reads pressed.
///
/// Returns the number of steps emitted. The start switch lies backward,
/// the end switch forward.
///
/// # Errors
///
/// - `CalibrationError::SwitchNotReached` once `max_steps` pulses were
///   emitted without the switch triggering
/// - `MotorError::PinError` on any pin failure
pub fn seek_switch<STEP, DIR, EN, DRV, START, END, D>(
    adapter: &mut DriverAdapter<STEP, DIR, EN, DRV>,
    switches: &mut LimitSwitches<START, END>,
    delay: &mut D,
    switch: LimitSwitch,
    interval_us: u32,
    max_steps: Option<u32>,
) -> Result<u32>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DRV: StepperDriver,
    START: InputPin,
    END: InputPin,
    D: DelayNs,
{
    let direction = match switch {
        LimitSwitch::Start => Direction::Backward,
        LimitSwitch::End => Direction::Forward,
    };
    adapter.set_direction(direction)?;

    let mut steps: u32 = 0;
    while !switches.is_active(switch)? {
        if max_steps.is_some_and(|max| steps >= max) {
            warn!("{} switch not reached after {} steps", switch, steps);
            return Err(Error::Calibration(CalibrationError::SwitchNotReached {
                switch,
                steps,
            }));
        }

        delay.delay_us(interval_us);
        adapter.set_step_line(true)?;
        delay.delay_us(interval_us);
        adapter.set_step_line(false)?;
        steps = steps.saturating_add(1);
    }

    trace!("{} switch reached after {} steps", switch, steps);
    Ok(steps)
}

/// Measure the travel between both switches.
///
/// 1. Seek the start switch (the zero reference).
/// 2. Seek the end switch, counting `length_a`.
/// 3. Seek the start switch again, counting `length_b`.
///
/// Leaves the carriage on the start switch facing forward. The reported
/// total length is the truncated mean of both legs, which cancels
/// direction-dependent slack.
///
/// # Errors
///
/// - `CalibrationError::ZeroInterval` if `interval_us` is zero
/// - any error from [`seek_switch`]
pub fn calibrate_and_measure<STEP, DIR, EN, DRV, START, END, D>(
    adapter: &mut DriverAdapter<STEP, DIR, EN, DRV>,
    switches: &mut LimitSwitches<START, END>,
    delay: &mut D,
    interval_us: u32,
    max_travel_steps: Option<u32>,
) -> Result<CalibrationReport>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DRV: StepperDriver,
    START: InputPin,
    END: InputPin,
    D: DelayNs,
{
    if interval_us == 0 {
        return Err(Error::Calibration(CalibrationError::ZeroInterval));
    }
    if interval_us < MIN_RELIABLE_INTERVAL_US {
        warn!(
            "calibrating at {} us per phase, below the {} us the motor reliably follows",
            interval_us,
            MIN_RELIABLE_INTERVAL_US
        );
    }

    let approach = seek_switch(
        adapter,
        switches,
        delay,
        LimitSwitch::Start,
        interval_us,
        max_travel_steps,
    )?;
    let length_a = seek_switch(
        adapter,
        switches,
        delay,
        LimitSwitch::End,
        interval_us,
        max_travel_steps,
    )?;
    let length_b = seek_switch(
        adapter,
        switches,
        delay,
        LimitSwitch::Start,
        interval_us,
        max_travel_steps,
    )?;

    adapter.set_direction(Direction::Forward)?;

    let report = CalibrationReport::from_legs(approach, length_a, length_b);
    info!(
        "calibrated: legs {} and {}, total length {} steps",
        report.length_a,
        report.length_b,
        report.total_length
    );
    Ok(report)
}

/// Drive back onto the start switch and face forward.
///
/// Returns the number of steps emitted.
///
/// # Errors
///
/// - `CalibrationError::ZeroInterval` if `interval_us` is zero
/// - any error from [`seek_switch`]
pub fn return_to_start<STEP, DIR, EN, DRV, START, END, D>(
    adapter: &mut DriverAdapter<STEP, DIR, EN, DRV>,
    switches: &mut LimitSwitches<START, END>,
    delay: &mut D,
    interval_us: u32,
    max_travel_steps: Option<u32>,
) -> Result<u32>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DRV: StepperDriver,
    START: InputPin,
    END: InputPin,
    D: DelayNs,
{
    if interval_us == 0 {
        return Err(Error::Calibration(CalibrationError::ZeroInterval));
    }

    let steps = seek_switch(
        adapter,
        switches,
        delay,
        LimitSwitch::Start,
        interval_us,
        max_travel_steps,
    )?;
    adapter.set_direction(Direction::Forward)?;

    debug!("returned to start in {} steps", steps);
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwitchLevel;
    use crate::hal::FixedDriver;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    fn pulses(count: usize) -> Vec<PinTransaction> {
        let mut transactions = Vec::new();
        for _ in 0..count {
            transactions.push(PinTransaction::set(PinState::High));
            transactions.push(PinTransaction::set(PinState::Low));
        }
        transactions
    }

    fn reads(released: usize) -> Vec<PinTransaction> {
        let mut transactions = vec![PinTransaction::get(PinState::High); released];
        // active-low: pressed
        transactions.push(PinTransaction::get(PinState::Low));
        transactions
    }

    #[test]
    fn test_three_legs_average() {
        let step = PinMock::new(&pulses(5));
        let dir = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let en = PinMock::new(&[]);

        let mut start_reads = reads(0);
        start_reads.extend(reads(3));
        let start = PinMock::new(&start_reads);
        let end = PinMock::new(&reads(2));

        let mut adapter = DriverAdapter::new(step, dir, en, FixedDriver, false);
        let mut switches = LimitSwitches::new(start, end, SwitchLevel::Low);

        let report =
            calibrate_and_measure(&mut adapter, &mut switches, &mut NoopDelay::new(), 400, None)
                .unwrap();

        assert_eq!(report.approach_steps, 0);
        assert_eq!(report.length_a, 2);
        assert_eq!(report.length_b, 3);
        assert_eq!(report.total_length, 2);
        assert_eq!(adapter.direction(), Direction::Forward);

        let (mut step, mut dir, mut en, _) = adapter.release();
        let (mut start, mut end) = switches.release();
        step.done();
        dir.done();
        en.done();
        start.done();
        end.done();
    }

    #[test]
    fn test_ceiling_stops_search() {
        let step = PinMock::new(&pulses(3));
        let dir = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let en = PinMock::new(&[]);
        let start = PinMock::new(&vec![PinTransaction::get(PinState::High); 4]);
        let end = PinMock::new(&[]);

        let mut adapter = DriverAdapter::new(step, dir, en, FixedDriver, false);
        let mut switches = LimitSwitches::new(start, end, SwitchLevel::Low);

        let result =
            calibrate_and_measure(&mut adapter, &mut switches, &mut NoopDelay::new(), 400, Some(3));

        assert_eq!(
            result,
            Err(Error::Calibration(CalibrationError::SwitchNotReached {
                switch: LimitSwitch::Start,
                steps: 3,
            }))
        );

        let (mut step, mut dir, mut en, _) = adapter.release();
        let (mut start, mut end) = switches.release();
        step.done();
        dir.done();
        en.done();
        start.done();
        end.done();
    }

    #[test]
    fn test_zero_interval_touches_nothing() {
        let mut adapter = DriverAdapter::new(
            PinMock::new(&[]),
            PinMock::new(&[]),
            PinMock::new(&[]),
            FixedDriver,
            false,
        );
        let mut switches =
            LimitSwitches::new(PinMock::new(&[]), PinMock::new(&[]), SwitchLevel::Low);

        let result = return_to_start(&mut adapter, &mut switches, &mut NoopDelay::new(), 0, None);
        assert_eq!(result, Err(Error::Calibration(CalibrationError::ZeroInterval)));

        let (mut step, mut dir, mut en, _) = adapter.release();
        let (mut start, mut end) = switches.release();
        step.done();
        dir.done();
        en.done();
        start.done();
        end.done();
    }

    #[test]
    fn test_return_to_start_faces_forward() {
        let step = PinMock::new(&pulses(2));
        let dir = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let en = PinMock::new(&[]);
        let start = PinMock::new(&reads(2));
        let end = PinMock::new(&[]);

        let mut adapter = DriverAdapter::new(step, dir, en, FixedDriver, false);
        let mut switches = LimitSwitches::new(start, end, SwitchLevel::Low);

        let steps =
            return_to_start(&mut adapter, &mut switches, &mut NoopDelay::new(), 400, None).unwrap();
        assert_eq!(steps, 2);

        let (mut step, mut dir, mut en, _) = adapter.release();
        let (mut start, mut end) = switches.release();
        step.done();
        dir.done();
        en.done();
        start.done();
        end.done();
    }
}
