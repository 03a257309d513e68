// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus pedal-core für ESP32-C6 und embassy.

pub mod actuator_pin;
pub mod platform;
pub mod status_led;

pub use actuator_pin::GpioActuatorPin;
pub use platform::{EmbassyDelay, HwRng, StackLink};
pub use status_led::RmtStatusLed;
