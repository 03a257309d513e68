// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von pedal-core
pub use pedal_core::{Actuator, Bridge, LinkPhase, PedalBoard, PedalCommand};

// Embassy Sync-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Signal für Verbindungs-Phasen (Bridge/WiFi → Status-LED Task)
/// Nur der letzte Wert zählt, ältere Phasen werden überschrieben.
pub type StatusSignal = Signal<NoopRawMutex, LinkPhase>;
