//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware- und Netzwerk-Zugriff
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** `pedal-firmware` (esp-hal GPIO, embassy-net, rust-mqtt)
//! - **Testing:** Mocks in `pedal-tests`

// Alle Implementierungen laufen auf einem Single-Thread Executor,
// daher keine Send-Bounds auf den Futures.
#![allow(async_fn_in_trait)]

use rgb::RGB8;

/// Fehler-Typ für Pin-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    WriteFailed,
}

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Grund, warum eine Broker-Session nicht zustande kam oder endete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrokerError {
    /// DNS, TCP oder MQTT CONNECT fehlgeschlagen
    ConnectFailed,
    /// SUBSCRIBE auf das Action-Topic fehlgeschlagen
    SubscribeFailed,
    /// Bestehende Verbindung abgebrochen (Empfang oder Ping)
    ConnectionLost,
}

/// Digitaler Ausgang eines Aktors
pub trait ActuatorPin {
    /// Setzt den Pegel: `true` = HIGH, `false` = LOW
    fn set_level(&mut self, high: bool) -> Result<(), PinError>;
}

/// Trait für SmartLED Hardware-Zugriff (Status-LED)
///
/// # Implementierungen
/// - **Production:** RmtStatusLed (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter
pub trait SmartLedWriter {
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;
}

/// Async Wartezeit (embassy-time im Firmware-Build)
pub trait Delay {
    async fn delay_ms(&mut self, millis: u32);
}

/// Status der WLAN-Verbindung
pub trait NetworkLink {
    /// `true` sobald Link oben ist und eine IP-Adresse vorliegt
    fn is_connected(&self) -> bool;
}

/// Empfänger der Session-Ereignisse
///
/// Wird synchron innerhalb der Kontroll-Schleife aufgerufen.
pub trait BrokerEvents {
    /// Verbindung steht und Topic ist abonniert
    fn on_connected(&mut self, client_id: &str);

    /// Eingehende Nachricht auf dem abonnierten Topic
    fn on_message(&mut self, topic: &str, payload: &[u8]);

    /// Session ist beendet
    fn on_disconnected(&mut self, reason: BrokerError);
}

/// Eine bestehende Broker-Verbindung
pub trait BrokerSession {
    async fn subscribe(&mut self, topic: &str) -> Result<(), BrokerError>;

    /// Bedient die Verbindung einmal: empfängt eine Nachricht oder sendet
    /// einen Keep-Alive Ping. Muss regelmäßig aufgerufen werden.
    async fn maintain<E: BrokerEvents>(&mut self, events: &mut E) -> Result<(), BrokerError>;
}

/// Broker-Endpunkt (feste Adresse)
pub trait Broker {
    /// Baut eine Verbindung mit `client_id` auf und bedient sie bis zum Abbruch
    ///
    /// Implementierungen rufen nach dem Connect [`crate::serve`] auf.
    async fn open_session<E: BrokerEvents>(
        &mut self,
        client_id: &str,
        topic: &str,
        events: &mut E,
    ) -> BrokerError;
}

/// Empfänger für Phasen-Wechsel (Status-LED)
pub trait StatusSink {
    fn publish(&mut self, phase: crate::LinkPhase);
}

impl StatusSink for () {
    fn publish(&mut self, _phase: crate::LinkPhase) {}
}
