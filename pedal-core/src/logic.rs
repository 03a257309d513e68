//! Pure Business Logic
//!
//! Pedal-Zustand, Command-Dispatcher und Status-Farben
//! (testbar, ohne Hardware-Dependencies)

use rgb::RGB8;

use crate::traits::{ActuatorPin, PinError};
use crate::types::{Actuator, Dispatch, LinkPhase, PedalCommand};

/// Zustand beider Aktoren, jeweils gespiegelt auf einen Ausgangs-Pin
///
/// Invariante: nach jeder Mutation entspricht der Pin-Pegel dem Bool-Wert.
/// Schlägt ein Pin-Write fehl, bleibt der Zustand unverändert.
pub struct PedalBoard<P> {
    celestino_pin: P,
    sostenuto_pin: P,
    celestino: bool,
    sostenuto: bool,
}

impl<P: ActuatorPin> PedalBoard<P> {
    /// Übernimmt beide Pins und treibt sie auf LOW (Startzustand OFF/OFF)
    pub fn new(mut celestino_pin: P, mut sostenuto_pin: P) -> Result<Self, PinError> {
        celestino_pin.set_level(false)?;
        sostenuto_pin.set_level(false)?;
        Ok(Self {
            celestino_pin,
            sostenuto_pin,
            celestino: false,
            sostenuto: false,
        })
    }

    pub fn is_engaged(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Celestino => self.celestino,
            Actuator::Sostenuto => self.sostenuto,
        }
    }

    pub fn pin(&self, actuator: Actuator) -> &P {
        match actuator {
            Actuator::Celestino => &self.celestino_pin,
            Actuator::Sostenuto => &self.sostenuto_pin,
        }
    }

    /// Invertiert den Aktor und schreibt den neuen Pegel
    ///
    /// Gibt den neuen Zustand zurück.
    pub fn toggle(&mut self, actuator: Actuator) -> Result<bool, PinError> {
        let (pin, state) = match actuator {
            Actuator::Celestino => (&mut self.celestino_pin, &mut self.celestino),
            Actuator::Sostenuto => (&mut self.sostenuto_pin, &mut self.sostenuto),
        };
        let next = !*state;
        pin.set_level(next)?;
        *state = next;
        Ok(next)
    }

    pub fn apply(&mut self, command: PedalCommand) -> Result<Dispatch, PinError> {
        match command {
            PedalCommand::Toggle(actuator) => {
                let engaged = self.toggle(actuator)?;
                Ok(Dispatch::Toggled { actuator, engaged })
            }
        }
    }

    /// Command-Dispatcher: exakter, case-sensitiver Vergleich
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use pedal_core::{ActuatorPin, PinError, PedalBoard, Dispatch, Actuator};
    /// struct Pin;
    /// impl ActuatorPin for Pin {
    ///     fn set_level(&mut self, _high: bool) -> Result<(), PinError> { Ok(()) }
    /// }
    /// let mut board = PedalBoard::new(Pin, Pin).unwrap();
    /// assert_eq!(
    ///     board.dispatch("TOGGLE_CELESTINO"),
    ///     Ok(Dispatch::Toggled { actuator: Actuator::Celestino, engaged: true })
    /// );
    /// assert_eq!(board.dispatch("Hola desde Python"), Ok(Dispatch::Ignored));
    /// ```
    pub fn dispatch(&mut self, message: &str) -> Result<Dispatch, PinError> {
        match PedalCommand::try_from(message) {
            Ok(command) => self.apply(command),
            Err(()) => Ok(Dispatch::Ignored),
        }
    }

    /// Wie [`PedalBoard::dispatch`], aber direkt auf den MQTT-Payload-Bytes
    pub fn dispatch_payload(&mut self, payload: &[u8]) -> Result<Dispatch, PinError> {
        match PedalCommand::from_payload(payload) {
            Some(command) => self.apply(command),
            None => Ok(Dispatch::Ignored),
        }
    }
}

/// Farbe der Status-LED für eine Verbindungs-Phase
///
/// Rot = WLAN, Blau = Broker, Grün = online
pub fn status_color(phase: LinkPhase, brightness: u8) -> RGB8 {
    match phase {
        LinkPhase::Joining => RGB8 {
            r: brightness,
            g: 0,
            b: 0,
        },
        LinkPhase::BrokerConnecting => RGB8 {
            r: 0,
            g: 0,
            b: brightness,
        },
        LinkPhase::Online => RGB8 {
            r: 0,
            g: brightness,
            b: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyPin {
        level: Option<bool>,
        fail_next: bool,
    }

    impl FlakyPin {
        fn new() -> Self {
            Self {
                level: None,
                fail_next: false,
            }
        }
    }

    impl ActuatorPin for FlakyPin {
        fn set_level(&mut self, high: bool) -> Result<(), PinError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(PinError::WriteFailed);
            }
            self.level = Some(high);
            Ok(())
        }
    }

    #[test]
    fn test_new_drives_pins_low() {
        let board = PedalBoard::new(FlakyPin::new(), FlakyPin::new()).unwrap();
        assert_eq!(board.pin(Actuator::Celestino).level, Some(false));
        assert_eq!(board.pin(Actuator::Sostenuto).level, Some(false));
        assert!(!board.is_engaged(Actuator::Celestino));
        assert!(!board.is_engaged(Actuator::Sostenuto));
    }

    #[test]
    fn test_toggle_flips_and_writes() {
        let mut board = PedalBoard::new(FlakyPin::new(), FlakyPin::new()).unwrap();
        assert_eq!(board.toggle(Actuator::Sostenuto), Ok(true));
        assert_eq!(board.pin(Actuator::Sostenuto).level, Some(true));
        assert_eq!(board.toggle(Actuator::Sostenuto), Ok(false));
        assert_eq!(board.pin(Actuator::Sostenuto).level, Some(false));
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut board = PedalBoard::new(FlakyPin::new(), FlakyPin::new()).unwrap();
        board.celestino_pin.fail_next = true;

        assert_eq!(board.toggle(Actuator::Celestino), Err(PinError::WriteFailed));
        assert!(!board.is_engaged(Actuator::Celestino));
        assert_eq!(board.pin(Actuator::Celestino).level, Some(false));

        // Nächster Versuch klappt wieder
        assert_eq!(board.toggle(Actuator::Celestino), Ok(true));
    }

    #[test]
    fn test_dispatch_payload_ignores_garbage() {
        let mut board = PedalBoard::new(FlakyPin::new(), FlakyPin::new()).unwrap();
        assert_eq!(board.dispatch_payload(&[0xc3, 0x28]), Ok(Dispatch::Ignored));
        assert_eq!(board.dispatch_payload(b""), Ok(Dispatch::Ignored));
        assert!(!board.is_engaged(Actuator::Celestino));
        assert!(!board.is_engaged(Actuator::Sostenuto));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(
            status_color(LinkPhase::Joining, 10),
            RGB8 { r: 10, g: 0, b: 0 }
        );
        assert_eq!(
            status_color(LinkPhase::BrokerConnecting, 10),
            RGB8 { r: 0, g: 0, b: 10 }
        );
        assert_eq!(
            status_color(LinkPhase::Online, 10),
            RGB8 { r: 0, g: 10, b: 0 }
        );
    }
}
