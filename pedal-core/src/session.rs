//! Verbindungs-Steuerung: Link abwarten, Broker-Session bedienen, Reconnect
//!
//! Eine einzige sequentielle Kontroll-Schleife. Nachrichten werden synchron
//! über [`BrokerEvents`] an den Dispatcher gereicht.

use rand_core::RngCore;

use crate::backoff::ReconnectPolicy;
use crate::logic::PedalBoard;
use crate::traits::{
    ActuatorPin, Broker, BrokerError, BrokerEvents, BrokerSession, Delay, NetworkLink, StatusSink,
};
use crate::types::{ClientId, Dispatch, LinkPhase, generate_client_id};

/// Standard-Intervall für das Abfragen des Links
pub const LINK_POLL_MS: u32 = 500;

/// Blockiert, bis der Link verbunden ist (kein Timeout)
///
/// Gibt die Anzahl der Poll-Runden zurück.
pub async fn wait_for_link<L: NetworkLink, D: Delay>(
    link: &L,
    delay: &mut D,
    poll_ms: u32,
) -> u32 {
    let mut polls = 0;
    while !link.is_connected() {
        polls += 1;
        delay.delay_ms(poll_ms).await;
    }
    polls
}

/// Bedient eine frisch verbundene Session bis zum Abbruch
///
/// 1. Topic abonnieren
/// 2. `on_connected` melden
/// 3. `maintain()` in Schleife, bis ein Fehler auftritt
///
/// Gibt den Grund für das Ende der Session zurück.
pub async fn serve<S: BrokerSession, E: BrokerEvents>(
    session: &mut S,
    client_id: &str,
    topic: &str,
    events: &mut E,
) -> BrokerError {
    if let Err(reason) = session.subscribe(topic).await {
        return reason;
    }
    events.on_connected(client_id);

    let reason = loop {
        if let Err(reason) = session.maintain(events).await {
            break reason;
        }
    };
    events.on_disconnected(reason);
    reason
}

/// Ergebnis eines Durchlaufs der Kontroll-Schleife
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Session war online und ist beendet, sofort neu verbinden
    SessionEnded(BrokerError),
    /// Verbindung kam nicht zustande, nach `delay_ms` erneut versuchen
    Retried { reason: BrokerError, delay_ms: u32 },
}

/// Session-Handler: leitet Nachrichten an das Pedal-Board weiter
pub struct PedalHandler<P, S> {
    board: PedalBoard<P>,
    status: S,
    connected: bool,
    was_online: bool,
    received: u32,
}

impl<P: ActuatorPin, S: StatusSink> PedalHandler<P, S> {
    fn new(board: PedalBoard<P>, status: S) -> Self {
        Self {
            board,
            status,
            connected: false,
            was_online: false,
            received: 0,
        }
    }

    /// Setzt das Online-Flag der letzten Session zurück
    fn take_was_online(&mut self) -> bool {
        core::mem::replace(&mut self.was_online, false)
    }
}

impl<P: ActuatorPin, S: StatusSink> BrokerEvents for PedalHandler<P, S> {
    fn on_connected(&mut self, _client_id: &str) {
        #[cfg(feature = "defmt")]
        defmt::info!("MQTT: {} connected", _client_id);
        self.connected = true;
        self.was_online = true;
        self.status.publish(LinkPhase::Online);
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        self.received = self.received.wrapping_add(1);
        #[cfg(feature = "defmt")]
        defmt::info!("MQTT: Received on '{}': {=[u8]:a}", topic, payload);

        match self.board.dispatch_payload(payload) {
            Ok(Dispatch::Toggled { actuator, engaged }) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "Pedal: {} -> {}",
                    actuator.name(),
                    if engaged { "ON" } else { "OFF" }
                );
            }
            Ok(Dispatch::Ignored) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Pedal: Unknown command ignored");
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Pedal: Failed to write pin: {}", e);
            }
        }
    }

    fn on_disconnected(&mut self, _reason: BrokerError) {
        #[cfg(feature = "defmt")]
        defmt::warn!("MQTT: Connection lost: {}", _reason);
        self.connected = false;
    }
}

/// Kontroll-Objekt der Bridge
///
/// Besitzt Pedal-Zustand, Reconnect-Policy, RNG für die Client ID und
/// den Status-Empfänger. Ersetzt globalen Zustand.
pub struct Bridge<P, R, S = ()> {
    handler: PedalHandler<P, S>,
    policy: ReconnectPolicy,
    rng: R,
    topic: &'static str,
    link_poll_ms: u32,
    last_client_id: ClientId,
}

impl<P: ActuatorPin, R: RngCore, S: StatusSink> Bridge<P, R, S> {
    pub fn new(board: PedalBoard<P>, rng: R, topic: &'static str, status: S) -> Self {
        Self {
            handler: PedalHandler::new(board, status),
            policy: ReconnectPolicy::default(),
            rng,
            topic,
            link_poll_ms: LINK_POLL_MS,
            last_client_id: ClientId::new(),
        }
    }

    pub fn with_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_link_poll_ms(mut self, poll_ms: u32) -> Self {
        self.link_poll_ms = poll_ms;
        self
    }

    /// `true` solange eine Session online ist
    pub fn is_connected(&self) -> bool {
        self.handler.connected
    }

    pub fn board(&self) -> &PedalBoard<P> {
        &self.handler.board
    }

    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    /// Client ID des letzten Verbindungsversuchs
    pub fn last_client_id(&self) -> &str {
        self.last_client_id.as_str()
    }

    /// Anzahl empfangener Nachrichten (inkl. ignorierter)
    pub fn messages_received(&self) -> u32 {
        self.handler.received
    }

    /// Meldet eine Phase an die Status-LED
    pub fn report(&mut self, phase: LinkPhase) {
        self.handler.status.publish(phase);
    }

    /// Ein Durchlauf: Link prüfen, neue Client ID, Session öffnen und bedienen
    ///
    /// Ist der Link weg, wird `Joining` gemeldet und erst auf den Link
    /// gewartet. Kam keine Verbindung zustande, wird gemäß Backoff gewartet.
    /// War die Session online, wird das Backoff zurückgesetzt und
    /// ohne Wartezeit zurückgekehrt.
    pub async fn run_cycle<L: NetworkLink, B: Broker, D: Delay>(
        &mut self,
        link: &L,
        broker: &mut B,
        delay: &mut D,
    ) -> CycleOutcome {
        if !link.is_connected() {
            self.handler.status.publish(LinkPhase::Joining);
            let _polls = wait_for_link(link, delay, self.link_poll_ms).await;
            #[cfg(feature = "defmt")]
            defmt::info!("Network: Link ready after {} polls", _polls);
        }

        self.last_client_id = generate_client_id(&mut self.rng);
        self.handler.status.publish(LinkPhase::BrokerConnecting);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "MQTT: Attempting connection as {}...",
            self.last_client_id.as_str()
        );

        let reason = broker
            .open_session(&self.last_client_id, self.topic, &mut self.handler)
            .await;
        self.handler.connected = false;

        if self.handler.take_was_online() {
            self.policy.reset();
            return CycleOutcome::SessionEnded(reason);
        }

        let delay_ms = self.policy.next_delay_ms();
        #[cfg(feature = "defmt")]
        defmt::warn!("MQTT: {} - retrying in {} ms", reason, delay_ms);
        delay.delay_ms(delay_ms).await;
        CycleOutcome::Retried { reason, delay_ms }
    }

    /// Endlose Kontroll-Schleife
    pub async fn run<L: NetworkLink, B: Broker, D: Delay>(
        &mut self,
        link: &L,
        broker: &mut B,
        delay: &mut D,
    ) -> ! {
        loop {
            self.run_cycle(link, broker, delay).await;
        }
    }
}
