// Status-LED Task - Zeigt die Verbindungs-Phase auf der on-board RGB LED
use defmt::{error, info};
use esp_hal_smartled::smart_led_buffer;
use pedal_core::{LinkPhase, SmartLedWriter, StatusSink, status_color};

use crate::StatusSignal;
use crate::config::{RMT_CLOCK_MHZ, STATUS_LED_BRIGHTNESS};
use crate::hal::RmtStatusLed;

/// StatusSink, der Phasen an den Status-LED Task signalisiert
pub struct SignalStatus(pub &'static StatusSignal);

impl StatusSink for SignalStatus {
    fn publish(&mut self, phase: LinkPhase) {
        self.0.signal(phase);
    }
}

/// Status-LED Task
///
/// Rot = WLAN wird verbunden, Blau = Broker wird verbunden, Grün = online
///
/// # Parameter
/// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `status`: Signal mit der aktuellen Verbindungs-Phase
#[embassy_executor::task]
pub async fn status_led_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    status: &'static StatusSignal,
) {
    // Buffer für SmartLED Daten erstellen (1 LED)
    let mut rmt_buffer = smart_led_buffer!(1);

    let Some(mut led) = RmtStatusLed::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer)
    else {
        error!("Status LED: Failed to initialize RMT");
        return;
    };

    let mut phase = LinkPhase::Joining;
    loop {
        if led.write(status_color(phase, STATUS_LED_BRIGHTNESS)).is_err() {
            error!("Status LED: Failed to write");
        }

        phase = status.wait().await;
        info!("Status LED: {}", phase);
    }
}
