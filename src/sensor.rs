use crate::error::Error;
use rppal::gpio::{Gpio, InputPin};

/// IR obstruction sensor, BCM 27 (physical pin 13).
pub const SENSOR_PIN: u8 = 27;

pub trait PresenceSensor {
    fn vehicle_present(&mut self) -> Result<bool, Error>;
}

pub struct IrSensor {
    pin: InputPin,
}

impl IrSensor {
    /// Claims the sensor pin for the lifetime of the process.
    pub fn new(gpio: &Gpio) -> Result<IrSensor, Error> {
        Ok(IrSensor {
            pin: gpio.get(SENSOR_PIN)?.into_input(),
        })
    }
}

impl PresenceSensor for IrSensor {
    // Instantaneous pin state; no debouncing or edge detection.
    fn vehicle_present(&mut self) -> Result<bool, Error> {
        Ok(self.pin.is_high())
    }
}
