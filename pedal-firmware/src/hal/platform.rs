// Plattform-Adapter: embassy-time, Hardware-RNG und embassy-net Link-Status
use embassy_net::Stack;
use embassy_time::{Duration, Timer};
use esp_hal::rng::Rng;
use pedal_core::{Delay, NetworkLink};

/// Async Delay über embassy-time
pub struct EmbassyDelay;

impl Delay for EmbassyDelay {
    async fn delay_ms(&mut self, millis: u32) {
        Timer::after(Duration::from_millis(millis as u64)).await;
    }
}

/// Hardware-RNG des ESP32-C6 als `rand_core::RngCore`
pub struct HwRng(pub Rng);

impl rand_core::RngCore for HwRng {
    fn next_u32(&mut self) -> u32 {
        self.0.random()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// WLAN-Status aus dem embassy-net Stack
///
/// Verbunden = Link oben UND IPv4-Adresse per DHCP erhalten.
pub struct StackLink(pub Stack<'static>);

impl NetworkLink for StackLink {
    fn is_connected(&self) -> bool {
        self.0.is_link_up() && self.0.config_v4().is_some()
    }
}
