// Task-Modul: Enthält alle Embassy Tasks
//
// Die Pedal-Steuerung läuft komplett sequentiell im bridge_task.
// Die übrigen Tasks sind Infrastruktur (WLAN, Netzwerk-Stack, Status-LED).

pub mod mqtt;
pub mod status_led;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use mqtt::bridge_task;
pub use status_led::status_led_task;
pub use wifi::{connection_task, dhcp_task, net_task};
