// Aktor-Ausgang über einen GPIO-Pin
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};
use pedal_core::{ActuatorPin, PinError};

/// Digitaler Ausgang eines Pedal-Aktors (HIGH = ON, LOW = OFF)
pub struct GpioActuatorPin {
    output: Output<'static>,
}

impl GpioActuatorPin {
    /// Konfiguriert den Pin als Push-Pull Ausgang, Startpegel LOW
    pub fn new(pin: impl OutputPin + 'static) -> Self {
        Self {
            output: Output::new(pin, Level::Low, OutputConfig::default()),
        }
    }
}

impl ActuatorPin for GpioActuatorPin {
    fn set_level(&mut self, high: bool) -> Result<(), PinError> {
        // GPIO-Writes auf dem ESP32 können nicht fehlschlagen
        self.output.set_level(Level::from(high));
        Ok(())
    }
}
