//! Reconnect-Policy: exponentielles Backoff mit Obergrenze
//!
//! Die Anzahl der Versuche ist unbegrenzt, es gibt keinen Weg,
//! einen dauerhaften Fehler nach oben zu melden.

/// Erste Wartezeit nach einem fehlgeschlagenen Connect
pub const BACKOFF_INITIAL_MS: u32 = 2_000;

/// Maximale Wartezeit zwischen zwei Versuchen
pub const BACKOFF_MAX_MS: u32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    initial_ms: u32,
    max_ms: u32,
    next_ms: u32,
}

impl ReconnectPolicy {
    pub const fn new(initial_ms: u32, max_ms: u32) -> Self {
        let first = if initial_ms < max_ms {
            initial_ms
        } else {
            max_ms
        };
        Self {
            initial_ms: first,
            max_ms,
            next_ms: first,
        }
    }

    /// Liefert die aktuelle Wartezeit und verdoppelt die nächste
    pub fn next_delay_ms(&mut self) -> u32 {
        let current = self.next_ms;
        self.next_ms = current.saturating_mul(2).min(self.max_ms);
        current
    }

    /// Wartezeit, die der nächste Aufruf von `next_delay_ms` liefert
    pub fn peek_ms(&self) -> u32 {
        self.next_ms
    }

    /// Nach erfolgreicher Verbindung wieder bei `initial_ms` anfangen
    pub fn reset(&mut self) {
        self.next_ms = self.initial_ms;
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(BACKOFF_INITIAL_MS, BACKOFF_MAX_MS)
    }
}
