//! Pedal Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Pedal-Zustand, den Command-Dispatcher
//! und die Reconnect-Steuerung.

#![no_std]

pub mod backoff;
pub mod logic;
pub mod session;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use backoff::{BACKOFF_INITIAL_MS, BACKOFF_MAX_MS, ReconnectPolicy};
pub use logic::{PedalBoard, status_color};
pub use session::{Bridge, CycleOutcome, LINK_POLL_MS, PedalHandler, serve, wait_for_link};
pub use traits::{
    ActuatorPin, Broker, BrokerError, BrokerEvents, BrokerSession, Delay, LedError, NetworkLink,
    PinError, SmartLedWriter, StatusSink,
};
pub use types::{
    Actuator, ClientId, Dispatch, LinkPhase, PedalCommand, TOGGLE_CELESTINO, TOGGLE_SOSTENUTO,
    generate_client_id,
};
