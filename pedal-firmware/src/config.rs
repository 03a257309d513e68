// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

// ============================================================================
// Pedal-Aktoren
// ============================================================================

/// GPIO-Pin für den Celestino-Aktor (in main.rs als `peripherals.GPIO4` genutzt)
pub const CELESTINO_GPIO_PIN: u8 = 4;

/// GPIO-Pin für den Sostenuto-Aktor (in main.rs als `peripherals.GPIO5` genutzt)
pub const SOSTENUTO_GPIO_PIN: u8 = 5;

// ============================================================================
// Status-LED Konfiguration
// ============================================================================

/// GPIO-Pin für die on-board RGB LED (WS2812/Neopixel)
pub const STATUS_LED_GPIO_PIN: u8 = 8;

/// Helligkeits-Level für die Status-LED (0-255)
/// Wert ist gedimmt für Augenschonung
pub const STATUS_LED_BRIGHTNESS: u8 = 10;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// (siehe .env.example), sonst das Wokwi-Gastnetz
pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "Wokwi-GUEST",
};

/// WiFi Passwort (leer = offenes Netz)
pub const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};

/// Poll-Intervall beim Warten auf WLAN + DHCP
pub const LINK_POLL_INTERVAL_MS: u32 = 500;

/// Pause vor erneutem WLAN-Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
pub const MQTT_BROKER: &str = match option_env!("MQTT_BROKER") {
    Some(broker) => broker,
    None => "test.mosquitto.org",
};

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// Topic mit den Pedal-Kommandos (TOGGLE_CELESTINO / TOGGLE_SOSTENUTO)
/// Wird zur Build-Zeit aus der Environment Variable MQTT_ACTION_TOPIC geladen
pub const MQTT_ACTION_TOPIC: &str = match option_env!("MQTT_ACTION_TOPIC") {
    Some(topic) => topic,
    None => "adaptative-pedal/actions",
};

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Ohne eingehende Nachricht wird nach dieser Zeit ein Ping gesendet
/// (halbes Keep-Alive, damit der Broker uns nicht für tot hält)
pub const MQTT_PING_INTERVAL_SECS: u64 = 15;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// TCP Buffer-Größe (RX und TX) in Bytes
pub const TCP_BUFFER_SIZE: usize = 4096;

/// TCP Socket Timeout in Sekunden
pub const TCP_TIMEOUT_SECS: u64 = 60;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
