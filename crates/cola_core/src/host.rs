use std::sync::Mutex;

use serde::Serialize;

use crate::config::MessageChannel;
use crate::events::Player;

/// Outbound seam to the host's player-facing message API. The transport is a
/// trusted in-game channel, so text goes through verbatim and the calls are
/// fire-and-forget. Duration is passed through uninterpreted; the host's
/// renderer decides what zero means.
pub trait MessageSink {
    /// Transient on-screen broadcast.
    fn broadcast(&self, player: &Player, text: &str, duration_secs: u16);
    /// Short-lived hint overlay.
    fn hint(&self, player: &Player, text: &str, duration_secs: u16);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub channel: MessageChannel,
    pub nickname: String,
    pub text: String,
    pub duration_secs: u16,
}

/// Captures deliveries instead of rendering them. Used by the replay runner
/// to build transcripts and by tests asserting on dispatch behavior.
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSink {
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().expect("delivery log poisoned").clone()
    }

    pub fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock().expect("delivery log poisoned"))
    }

    fn record(&self, channel: MessageChannel, player: &Player, text: &str, duration_secs: u16) {
        self.deliveries
            .lock()
            .expect("delivery log poisoned")
            .push(Delivery {
                channel,
                nickname: player.nickname.clone(),
                text: text.to_string(),
                duration_secs,
            });
    }
}

impl MessageSink for RecordingSink {
    fn broadcast(&self, player: &Player, text: &str, duration_secs: u16) {
        self.record(MessageChannel::Broadcast, player, text, duration_secs);
    }

    fn hint(&self, player: &Player, text: &str, duration_secs: u16) {
        self.record(MessageChannel::Hint, player, text, duration_secs);
    }
}
