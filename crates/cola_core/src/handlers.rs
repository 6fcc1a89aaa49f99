use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::{MessageChannel, Settings};
use crate::events::{DamageCause, DamageEvent, ItemKind, ItemUseEvent};
use crate::host::MessageSink;

/// Token in `message_content` replaced with the player's display name.
pub const PLAYER_PLACEHOLDER: &str = "[player]";

/// Suppresses cola damage. Independent of the messaging toggles; if the
/// plugin is active, cola never hurts.
pub struct DamageFilter {
    settings: Arc<Settings>,
}

impl DamageFilter {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn on_damage(&self, ev: &mut DamageEvent) {
        if ev.cause != DamageCause::Cola {
            return;
        }
        ev.allowed = false;
        if self.settings.debug_log_enabled {
            debug!(
                target: "cola.filter",
                player = %ev.player.nickname,
                "exempted from cola damage"
            );
        }
    }
}

/// Which branch `UsageNotifier::on_item_use` took. Exists so behavior is
/// assertable without capturing log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotifyOutcome {
    /// The item was not cola.
    Ignored,
    /// Cola was used but messaging is disabled.
    Muted,
    Sent(MessageChannel),
    /// `message_type` held an unrecognized value at dispatch time.
    BadChannel,
}

/// Announces cola use to the drinker over the configured channel.
pub struct UsageNotifier {
    settings: Arc<Settings>,
    sink: Arc<dyn MessageSink>,
}

impl UsageNotifier {
    pub fn new(settings: Arc<Settings>, sink: Arc<dyn MessageSink>) -> Self {
        Self { settings, sink }
    }

    pub fn on_item_use(&self, ev: &ItemUseEvent) -> NotifyOutcome {
        if ev.item != ItemKind::Cola {
            return NotifyOutcome::Ignored;
        }
        if self.settings.log_enabled {
            info!(target: "cola.notifier", player = %ev.player.nickname, "player used cola");
        }
        if !self.settings.message_enabled {
            return NotifyOutcome::Muted;
        }

        // Every occurrence, not just the first.
        let text = self
            .settings
            .message_content
            .replace(PLAYER_PLACEHOLDER, &ev.player.nickname);

        // Validation already checked the channel; this guards against a
        // Settings constructed outside the load path.
        match self.settings.message_type.parse::<MessageChannel>() {
            Ok(MessageChannel::Broadcast) => {
                self.sink
                    .broadcast(&ev.player, &text, self.settings.message_duration);
                NotifyOutcome::Sent(MessageChannel::Broadcast)
            }
            Ok(MessageChannel::Hint) => {
                self.sink
                    .hint(&ev.player, &text, self.settings.message_duration);
                NotifyOutcome::Sent(MessageChannel::Hint)
            }
            Err(_) => {
                error!(
                    target: "cola.notifier",
                    message_type = %self.settings.message_type,
                    "unrecognized message channel, nothing sent"
                );
                NotifyOutcome::BadChannel
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Player;
    use crate::host::RecordingSink;

    fn notifier(settings: Settings) -> (UsageNotifier, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let notifier = UsageNotifier::new(Arc::new(settings), sink.clone());
        (notifier, sink)
    }

    fn cola_use(nickname: &str) -> ItemUseEvent {
        ItemUseEvent {
            player: Player::new(1, nickname),
            item: ItemKind::Cola,
        }
    }

    #[test]
    fn cola_damage_is_disallowed() {
        let filter = DamageFilter::new(Arc::new(Settings::default()));
        let mut ev = DamageEvent::new(Player::new(1, "Rex"), DamageCause::Cola);
        filter.on_damage(&mut ev);
        assert!(!ev.allowed);
    }

    #[test]
    fn other_causes_are_left_untouched() {
        let filter = DamageFilter::new(Arc::new(Settings::default()));
        for cause in [
            DamageCause::Fall,
            DamageCause::Firearm,
            DamageCause::Tesla,
            DamageCause::Other("pocket dimension".to_string()),
        ] {
            let mut ev = DamageEvent::new(Player::new(1, "Rex"), cause);
            filter.on_damage(&mut ev);
            assert!(ev.allowed, "cause {:?} should not be filtered", ev.cause);
        }
    }

    #[test]
    fn filtering_ignores_messaging_toggles() {
        let settings = Settings {
            message_enabled: false,
            message_type: "Loud".to_string(),
            ..Settings::default()
        };
        let filter = DamageFilter::new(Arc::new(settings));
        let mut ev = DamageEvent::new(Player::new(1, "Rex"), DamageCause::Cola);
        filter.on_damage(&mut ev);
        assert!(!ev.allowed);
    }

    #[test]
    fn hint_scenario_delivers_substituted_text() {
        let (notifier, sink) = notifier(Settings {
            message_type: "Hint".to_string(),
            message_content: "Hi [player]!".to_string(),
            message_duration: 5,
            ..Settings::default()
        });
        let outcome = notifier.on_item_use(&cola_use("Rex"));
        assert_eq!(outcome, NotifyOutcome::Sent(MessageChannel::Hint));

        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].channel, MessageChannel::Hint);
        assert_eq!(deliveries[0].nickname, "Rex");
        assert_eq!(deliveries[0].text, "Hi Rex!");
        assert_eq!(deliveries[0].duration_secs, 5);
    }

    #[test]
    fn broadcast_channel_goes_to_broadcast_only() {
        let (notifier, sink) = notifier(Settings::default());
        let outcome = notifier.on_item_use(&cola_use("Rex"));
        assert_eq!(outcome, NotifyOutcome::Sent(MessageChannel::Broadcast));
        assert_eq!(sink.deliveries().len(), 1);
        assert_eq!(sink.deliveries()[0].channel, MessageChannel::Broadcast);
    }

    #[test]
    fn placeholder_is_replaced_everywhere() {
        let (notifier, sink) = notifier(Settings {
            message_content: "[player], yes you, [player]!".to_string(),
            ..Settings::default()
        });
        notifier.on_item_use(&cola_use("Rex"));
        assert_eq!(sink.deliveries()[0].text, "Rex, yes you, Rex!");
    }

    #[test]
    fn content_without_placeholder_is_sent_unchanged() {
        let (notifier, sink) = notifier(Settings {
            message_content: "Cola is safe here.".to_string(),
            ..Settings::default()
        });
        notifier.on_item_use(&cola_use("Rex"));
        assert_eq!(sink.deliveries()[0].text, "Cola is safe here.");
    }

    #[test]
    fn other_items_do_nothing() {
        let (notifier, sink) = notifier(Settings::default());
        for item in [
            ItemKind::Medkit,
            ItemKind::Painkillers,
            ItemKind::Other("flashlight".to_string()),
        ] {
            let ev = ItemUseEvent {
                player: Player::new(1, "Rex"),
                item,
            };
            assert_eq!(notifier.on_item_use(&ev), NotifyOutcome::Ignored);
        }
        assert!(sink.deliveries().is_empty());
    }

    #[test]
    fn muted_messaging_never_delivers() {
        let (notifier, sink) = notifier(Settings {
            message_enabled: false,
            ..Settings::default()
        });
        assert_eq!(notifier.on_item_use(&cola_use("Rex")), NotifyOutcome::Muted);
        assert!(sink.deliveries().is_empty());
    }

    #[test]
    fn bad_channel_at_dispatch_sends_nothing() {
        let (notifier, sink) = notifier(Settings {
            message_type: "Loud".to_string(),
            ..Settings::default()
        });
        assert_eq!(
            notifier.on_item_use(&cola_use("Rex")),
            NotifyOutcome::BadChannel
        );
        assert!(sink.deliveries().is_empty());
    }

    #[test]
    fn zero_duration_passes_through() {
        let (notifier, sink) = notifier(Settings {
            message_duration: 0,
            ..Settings::default()
        });
        notifier.on_item_use(&cola_use("Rex"));
        assert_eq!(sink.deliveries()[0].duration_secs, 0);
    }
}
