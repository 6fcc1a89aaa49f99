use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigError, Settings};
use crate::events::{DamageEvent, ItemUseEvent};
use crate::handlers::{DamageFilter, NotifyOutcome, UsageNotifier};
use crate::host::MessageSink;

/// Wires the two handlers to a validated configuration. The host owns event
/// dispatch and forwards each event into `handle_damage` / `handle_item_use`;
/// dropping the plugin is the disable path.
pub struct ColaPlugin {
    settings: Arc<Settings>,
    filter: Option<DamageFilter>,
    notifier: Option<UsageNotifier>,
}

impl ColaPlugin {
    /// Validates the settings and constructs the handlers. The damage filter
    /// registers whenever the plugin is enabled; the notifier only when
    /// messaging is on. With `enabled = false` the plugin comes up inert.
    pub fn enable(settings: Settings, sink: Arc<dyn MessageSink>) -> Result<Self, ConfigError> {
        settings.validate()?;
        let settings = Arc::new(settings);

        if !settings.enabled {
            info!(target: "cola.plugin", "plugin disabled in configuration");
            return Ok(Self {
                settings,
                filter: None,
                notifier: None,
            });
        }

        let filter = DamageFilter::new(Arc::clone(&settings));
        let notifier = settings
            .message_enabled
            .then(|| UsageNotifier::new(Arc::clone(&settings), sink));

        info!(
            target: "cola.plugin",
            messages = settings.message_enabled,
            logs = settings.log_enabled,
            debug_logs = settings.debug_log_enabled,
            "cola damage exemption enabled"
        );

        Ok(Self {
            settings,
            filter: Some(filter),
            notifier,
        })
    }

    pub fn handle_damage(&self, ev: &mut DamageEvent) {
        if let Some(filter) = &self.filter {
            filter.on_damage(ev);
        }
    }

    /// `None` when the notifier is not registered (plugin inert or muted).
    pub fn handle_item_use(&self, ev: &ItemUseEvent) -> Option<NotifyOutcome> {
        self.notifier.as_ref().map(|notifier| notifier.on_item_use(ev))
    }

    pub fn is_active(&self) -> bool {
        self.filter.is_some()
    }

    pub fn notifier_registered(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DamageCause, ItemKind, Player};
    use crate::host::RecordingSink;

    fn sink() -> Arc<RecordingSink> {
        Arc::new(RecordingSink::default())
    }

    #[test]
    fn invalid_channel_blocks_enable() {
        let settings = Settings {
            message_type: "Loud".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            ColaPlugin::enable(settings, sink()),
            Err(ConfigError::UnknownChannel { .. })
        ));
    }

    #[test]
    fn disabled_plugin_is_inert() {
        let settings = Settings {
            enabled: false,
            ..Settings::default()
        };
        let recording = sink();
        let plugin = ColaPlugin::enable(settings, recording.clone()).unwrap();
        assert!(!plugin.is_active());
        assert!(!plugin.notifier_registered());

        let mut damage = DamageEvent::new(Player::new(1, "Rex"), DamageCause::Cola);
        plugin.handle_damage(&mut damage);
        assert!(damage.allowed, "inert plugin must not suppress damage");

        let use_ev = ItemUseEvent {
            player: Player::new(1, "Rex"),
            item: ItemKind::Cola,
        };
        assert_eq!(plugin.handle_item_use(&use_ev), None);
        assert!(recording.deliveries().is_empty());
    }

    #[test]
    fn muted_plugin_keeps_filter_but_not_notifier() {
        let settings = Settings {
            message_enabled: false,
            ..Settings::default()
        };
        let plugin = ColaPlugin::enable(settings, sink()).unwrap();
        assert!(plugin.is_active());
        assert!(!plugin.notifier_registered());
    }
}
