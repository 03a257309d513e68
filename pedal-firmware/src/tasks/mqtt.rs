// MQTT Task - Empfängt Pedal-Kommandos vom Broker und schaltet die Aktoren
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, with_timeout};

use pedal_core::{Broker, BrokerError, BrokerEvents, BrokerSession, Bridge, PedalBoard, serve};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::StatusSignal;
use crate::config::*;
use crate::hal::{EmbassyDelay, GpioActuatorPin, HwRng, StackLink};
use crate::tasks::status_led::SignalStatus;

/// Maximale Anzahl MQTT v5 Properties pro Paket
const MAX_PROPERTIES: usize = 5;

/// Bridge Task - die einzige Kontroll-Schleife
///
/// - Treibt beide Aktor-Pins auf LOW (Startzustand OFF/OFF)
/// - Wartet vor jedem Versuch bis WLAN + DHCP bereit sind
/// - Verbindet mit dem Broker, abonniert das Action-Topic
/// - Dispatcht eingehende Kommandos synchron an die Pins
/// - Reconnect mit Backoff, endlos
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `celestino`, `sostenuto`: Aktor-Ausgänge
/// - `rng`: Hardware-RNG für die Client ID
/// - `status`: Signal für die Status-LED
#[embassy_executor::task]
pub async fn bridge_task(
    stack: Stack<'static>,
    celestino: GpioActuatorPin,
    sostenuto: GpioActuatorPin,
    rng: HwRng,
    status: &'static StatusSignal,
) {
    let board = match PedalBoard::new(celestino, sostenuto) {
        Ok(board) => board,
        Err(e) => {
            error!("Pedal: Failed to initialize outputs: {}", e);
            return;
        }
    };
    info!("Pedal: Outputs low (celestino=OFF, sostenuto=OFF)");

    let mut bridge = Bridge::new(board, rng, MQTT_ACTION_TOPIC, SignalStatus(status))
        .with_link_poll_ms(LINK_POLL_INTERVAL_MS);
    let mut delay = EmbassyDelay;
    let link = StackLink(stack);

    info!("MQTT: Task started, waiting for network...");
    let mut broker = MqttBroker::new(stack);
    bridge.run(&link, &mut broker, &mut delay).await
}

/// Broker-Endpunkt: rust-mqtt über embassy-net TCP
pub struct MqttBroker {
    stack: Stack<'static>,
}

impl MqttBroker {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl Broker for MqttBroker {
    /// Kompletter Lifecycle einer Verbindung:
    /// 1. DNS-Auflösung des Broker-Hostnames
    /// 2. TCP-Verbindung aufbauen
    /// 3. MQTT CONNECT mit der übergebenen Client ID
    /// 4. Subscribe + Nachrichten bedienen (`pedal_core::serve`)
    ///
    /// Puffer liegen im Future und werden pro Verbindung neu angelegt.
    async fn open_session<E: BrokerEvents>(
        &mut self,
        client_id: &str,
        topic: &str,
        events: &mut E,
    ) -> BrokerError {
        info!("MQTT: Resolving '{}'...", MQTT_BROKER);
        let broker_ip = match resolve_hostname(self.stack, MQTT_BROKER).await {
            Ok(ip) => ip,
            Err(e) => {
                error!("MQTT: {}", e);
                return BrokerError::ConnectFailed;
            }
        };

        // TCP Connect
        let mut rx_buffer = [0u8; TCP_BUFFER_SIZE];
        let mut tx_buffer = [0u8; TCP_BUFFER_SIZE];
        let mut socket = TcpSocket::new(self.stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(TCP_TIMEOUT_SECS)));

        if let Err(e) = socket.connect((broker_ip, MQTT_PORT)).await {
            error!("MQTT: {}: {}", ConnectError::ConnectionFailed, Debug2Format(&e));
            return BrokerError::ConnectFailed;
        }
        info!("MQTT: TCP connected to {}:{}", Debug2Format(&broker_ip), MQTT_PORT);

        // MQTT Client Configuration
        let mut config =
            ClientConfig::<MAX_PROPERTIES, _>::new(MqttVersion::MQTTv5, CountingRng(20000));
        config.add_max_subscribe_qos(QualityOfService::QoS0);
        config.client_id = EncodedString {
            string: client_id,
            len: client_id.len() as u16,
        };
        config.keep_alive = MQTT_KEEP_ALIVE_SECS;
        config.max_packet_size = MQTT_BUFFER_SIZE as u32;

        let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
        let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];
        let client = MqttClient::<_, MAX_PROPERTIES, _>::new(
            socket,
            &mut send_buffer,
            MQTT_BUFFER_SIZE,
            &mut recv_buffer,
            MQTT_BUFFER_SIZE,
            config,
        );
        let mut session = MqttSession { client };

        if let Err(e) = session.client.connect_to_broker().await {
            error!("MQTT: {}: {}", ConnectError::ProtocolError, Debug2Format(&e));
            return BrokerError::ConnectFailed;
        }
        info!("MQTT: Connected to broker, subscribing to '{}'", topic);

        serve(&mut session, client_id, topic, events).await
    }
}

/// Bestehende MQTT-Verbindung
struct MqttSession<'a> {
    client: MqttClient<'a, TcpSocket<'a>, MAX_PROPERTIES, CountingRng>,
}

impl BrokerSession for MqttSession<'_> {
    async fn subscribe(&mut self, topic: &str) -> Result<(), BrokerError> {
        self.client.subscribe_to_topic(topic).await.map_err(|e| {
            error!("MQTT: Subscribe failed: {}", Debug2Format(&e));
            BrokerError::SubscribeFailed
        })
    }

    /// Wartet bis zu MQTT_PING_INTERVAL_SECS auf eine Nachricht,
    /// sonst Keep-Alive Ping
    ///
    /// Einschränkung von rust-mqtt 0.3: `send_ping` liest das nächste Paket
    /// selbst. Kommt direkt nach dem PINGREQ ein PUBLISH, liefert es
    /// `ImplementationSpecificError` und das Kommando ist verloren. Der
    /// Timeout kann außerdem `receive_message` mitten im Paket abbrechen.
    /// In beiden Fällen wird die Session neu aufgebaut.
    async fn maintain<E: BrokerEvents>(&mut self, events: &mut E) -> Result<(), BrokerError> {
        let received = with_timeout(
            Duration::from_secs(MQTT_PING_INTERVAL_SECS),
            self.client.receive_message(),
        )
        .await;

        match received {
            Ok(Ok((topic, payload))) => {
                events.on_message(topic, payload);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("MQTT: Receive failed: {}", Debug2Format(&e));
                Err(BrokerError::ConnectionLost)
            }
            Err(_) => self.client.send_ping().await.map_err(|e| {
                if matches!(e, ReasonCode::ImplementationSpecificError) {
                    warn!("MQTT: Packet arrived during ping, command dropped");
                } else {
                    warn!("MQTT: Ping failed: {}", Debug2Format(&e));
                }
                BrokerError::ConnectionLost
            }),
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, ConnectError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => {
            for addr in addrs {
                if let IpAddress::Ipv4(ipv4) = addr {
                    return Ok(ipv4);
                }
            }
            Err(ConnectError::DnsResolutionFailed)
        }
        Ok(Err(_)) => Err(ConnectError::DnsResolutionFailed),
        Err(_) => Err(ConnectError::DnsTimeout),
    }
}

/// Fehler beim Verbindungsaufbau (nur für Log-Ausgaben)
#[derive(Debug, Clone, Copy)]
enum ConnectError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
}

impl defmt::Format for ConnectError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConnectError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            ConnectError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            ConnectError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            ConnectError::ProtocolError => defmt::write!(fmt, "Protocol error"),
        }
    }
}
