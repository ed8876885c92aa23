use crate::error::Error;
use rppal::gpio::{Gpio, OutputPin};
use std::thread;
use std::time::Duration;

/// Servo signal line, BCM 17 (physical pin 11).
pub const GATE_PIN: u8 = 17;

const PWM_FREQUENCY: f64 = 50.0;
const CLOSED_DUTY: f64 = 3.0;
const OPEN_DUTY: f64 = 12.0;
const HOLD: Duration = Duration::from_secs(1);

pub trait Gate {
    fn open(&mut self) -> Result<(), Error>;
}

/// The PWM line the pulse sequence runs against.
pub trait PwmDrive {
    fn set_duty_cycle(&mut self, percent: f64) -> Result<(), Error>;
    fn stop(&mut self) -> Result<(), Error>;
}

pub struct ServoDrive {
    pin: OutputPin,
}

impl ServoDrive {
    /// Claims the gate pin for the lifetime of the process.
    pub fn new(gpio: &Gpio) -> Result<ServoDrive, Error> {
        Ok(ServoDrive {
            pin: gpio.get(GATE_PIN)?.into_output(),
        })
    }
}

impl PwmDrive for ServoDrive {
    fn set_duty_cycle(&mut self, percent: f64) -> Result<(), Error> {
        Ok(self.pin.set_pwm_frequency(PWM_FREQUENCY, percent / 100.0)?)
    }

    fn stop(&mut self) -> Result<(), Error> {
        Ok(self.pin.clear_pwm()?)
    }
}

pub struct ServoGate<D: PwmDrive> {
    drive: D,
}

impl<D: PwmDrive> ServoGate<D> {
    pub fn new(drive: D) -> ServoGate<D> {
        ServoGate { drive }
    }
}

impl<D: PwmDrive> Gate for ServoGate<D> {
    /// Open-loop pulse: no position feedback, fixed holds. The signal is
    /// stopped as the final drive action even when a step fails in between.
    fn open(&mut self) -> Result<(), Error> {
        let pulsed = pulse(&mut self.drive);
        let stopped = self.drive.stop();
        pulsed.and(stopped)
    }
}

fn pulse<D: PwmDrive>(drive: &mut D) -> Result<(), Error> {
    drive.set_duty_cycle(0.0)?;
    drive.set_duty_cycle(CLOSED_DUTY)?;
    thread::sleep(HOLD);
    drive.set_duty_cycle(OPEN_DUTY)?;
    thread::sleep(HOLD);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Duty(u32),
        Stop,
    }

    struct RecordingDrive {
        ops: Vec<Op>,
        fail_after: Option<usize>,
    }

    impl RecordingDrive {
        fn new(fail_after: Option<usize>) -> RecordingDrive {
            RecordingDrive {
                ops: Vec::new(),
                fail_after,
            }
        }
    }

    impl PwmDrive for RecordingDrive {
        fn set_duty_cycle(&mut self, percent: f64) -> Result<(), Error> {
            if self.fail_after == Some(self.ops.len()) {
                return Err(Error::Io(std::io::Error::other("drive fault")));
            }
            self.ops.push(Op::Duty(percent as u32));
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Error> {
            self.ops.push(Op::Stop);
            Ok(())
        }
    }

    #[test]
    fn open_runs_the_full_pulse_and_stops_last() {
        let mut gate = ServoGate::new(RecordingDrive::new(None));
        gate.open().unwrap();
        assert_eq!(
            gate.drive.ops,
            vec![Op::Duty(0), Op::Duty(3), Op::Duty(12), Op::Stop]
        );
    }

    #[test]
    fn signal_stops_even_when_a_phase_fails() {
        let mut gate = ServoGate::new(RecordingDrive::new(Some(2)));
        assert!(gate.open().is_err());
        assert_eq!(gate.drive.ops.last(), Some(&Op::Stop));
    }
}
