//! Core Types für die Pedal-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt::Write;

use rand_core::RngCore;

/// Payload für das Umschalten des Celestino-Pedals
pub const TOGGLE_CELESTINO: &str = "TOGGLE_CELESTINO";

/// Payload für das Umschalten des Sostenuto-Pedals
pub const TOGGLE_SOSTENUTO: &str = "TOGGLE_SOSTENUTO";

/// Präfix der zufälligen MQTT Client ID
pub const CLIENT_ID_PREFIX: &str = "clientId-";

/// Obergrenze (exklusiv) für die Zufallszahl in der Client ID
pub const CLIENT_ID_RANGE: u32 = 1000;

/// Kapazität einer Client ID (MQTT 3.1 erlaubt max. 23 Zeichen)
pub const CLIENT_ID_CAPACITY: usize = 23;

/// Zufällige, kurzlebige MQTT Client ID
///
/// Wird bei jedem Verbindungsversuch neu erzeugt.
pub type ClientId = heapless::String<CLIENT_ID_CAPACITY>;

/// Einer der beiden Aktoren (benannt nach den Pedal-Mechaniken)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuator {
    Celestino,
    Sostenuto,
}

impl Actuator {
    pub const ALL: [Actuator; 2] = [Actuator::Celestino, Actuator::Sostenuto];

    pub fn name(self) -> &'static str {
        match self {
            Actuator::Celestino => "celestino",
            Actuator::Sostenuto => "sostenuto",
        }
    }
}

/// Pedal-Kommando aus dem Action-Topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PedalCommand {
    /// Zustand des Aktors invertieren
    Toggle(Actuator),
}

impl PedalCommand {
    /// Exakter Payload-Text dieses Kommandos
    pub fn as_str(self) -> &'static str {
        match self {
            PedalCommand::Toggle(Actuator::Celestino) => TOGGLE_CELESTINO,
            PedalCommand::Toggle(Actuator::Sostenuto) => TOGGLE_SOSTENUTO,
        }
    }

    /// Parst rohe Payload-Bytes
    ///
    /// Ungültiges UTF-8 kann keinem Kommando entsprechen und ergibt `None`.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let text = core::str::from_utf8(payload).ok()?;
        Self::try_from(text).ok()
    }
}

impl core::convert::TryFrom<&str> for PedalCommand {
    type Error = ();

    /// Nur exakte Treffer: case-sensitive, kein Trimmen
    fn try_from(message: &str) -> Result<Self, Self::Error> {
        match message {
            TOGGLE_CELESTINO => Ok(Self::Toggle(Actuator::Celestino)),
            TOGGLE_SOSTENUTO => Ok(Self::Toggle(Actuator::Sostenuto)),
            _ => Err(()),
        }
    }
}

/// Ergebnis eines Dispatch-Aufrufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Aktor wurde umgeschaltet, `engaged` ist der neue Zustand
    Toggled { actuator: Actuator, engaged: bool },
    /// Unbekannte Nachricht, nichts verändert
    Ignored,
}

/// Verbindungs-Phase der Bridge (für die Status-LED)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkPhase {
    /// WLAN noch nicht verbunden
    Joining,
    /// WLAN steht, Broker-Verbindung wird aufgebaut
    BrokerConnecting,
    /// Verbunden und Topic abonniert
    Online,
}

/// Erzeugt eine neue Client ID der Form `clientId-<0..999>`
///
/// # Beispiele
///
/// ```
/// # use pedal_core::generate_client_id;
/// # use rand_core::{RngCore, impls};
/// struct Fixed(u32);
/// impl RngCore for Fixed {
///     fn next_u32(&mut self) -> u32 { self.0 }
///     fn next_u64(&mut self) -> u64 { impls::next_u64_via_u32(self) }
///     fn fill_bytes(&mut self, dest: &mut [u8]) { impls::fill_bytes_via_next(self, dest) }
///     fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
///         self.fill_bytes(dest);
///         Ok(())
///     }
/// }
/// let id = generate_client_id(&mut Fixed(4242));
/// assert_eq!(id.as_str(), "clientId-242");
/// ```
pub fn generate_client_id<R: RngCore>(rng: &mut R) -> ClientId {
    let mut id = ClientId::new();
    let number = rng.next_u32() % CLIENT_ID_RANGE;
    // "clientId-" + max. 3 Ziffern passt immer in die Kapazität
    let _ = write!(id, "{}{}", CLIENT_ID_PREFIX, number);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exact_match() {
        assert_eq!(
            PedalCommand::try_from("TOGGLE_CELESTINO"),
            Ok(PedalCommand::Toggle(Actuator::Celestino))
        );
        assert_eq!(
            PedalCommand::try_from("TOGGLE_SOSTENUTO"),
            Ok(PedalCommand::Toggle(Actuator::Sostenuto))
        );
    }

    #[test]
    fn test_command_rejects_case_and_whitespace() {
        assert!(PedalCommand::try_from("toggle_celestino").is_err());
        assert!(PedalCommand::try_from(" TOGGLE_CELESTINO").is_err());
        assert!(PedalCommand::try_from("TOGGLE_SOSTENUTO\n").is_err());
        assert!(PedalCommand::try_from("").is_err());
    }

    #[test]
    fn test_from_payload_invalid_utf8() {
        assert_eq!(PedalCommand::from_payload(&[0xff, 0xfe, 0x54]), None);
        assert_eq!(
            PedalCommand::from_payload(b"TOGGLE_SOSTENUTO"),
            Some(PedalCommand::Toggle(Actuator::Sostenuto))
        );
    }

    #[test]
    fn test_as_str_matches_parser() {
        for actuator in Actuator::ALL {
            let cmd = PedalCommand::Toggle(actuator);
            assert_eq!(PedalCommand::try_from(cmd.as_str()), Ok(cmd));
        }
    }
}
