//! Scripted event sequences for exercising the plugin outside a live server.

use cola_core::{
    ColaPlugin, DamageCause, DamageEvent, Delivery, ItemKind, ItemUseEvent, NotifyOutcome, Player,
};
use serde::{Deserialize, Serialize};

/// One host event as written in a replay script (a JSON array of these).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Damage { player: Player, cause: DamageCause },
    UseItem { player: Player, item: ItemKind },
}

#[derive(Debug, Serialize)]
pub struct Transcript {
    pub recorded_at: String,
    pub entries: Vec<TranscriptEntry>,
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Damage {
        player: String,
        cause: DamageCause,
        allowed: bool,
    },
    UseItem {
        player: String,
        item: ItemKind,
        outcome: Option<NotifyOutcome>,
    },
}

/// Feed the scripted events through the plugin in order, recording the
/// verdict of each one.
pub fn run_script(plugin: &ColaPlugin, events: Vec<ScriptEvent>) -> Vec<TranscriptEntry> {
    events
        .into_iter()
        .map(|event| match event {
            ScriptEvent::Damage { player, cause } => {
                let mut ev = DamageEvent::new(player, cause);
                plugin.handle_damage(&mut ev);
                TranscriptEntry::Damage {
                    player: ev.player.nickname,
                    cause: ev.cause,
                    allowed: ev.allowed,
                }
            }
            ScriptEvent::UseItem { player, item } => {
                let ev = ItemUseEvent { player, item };
                let outcome = plugin.handle_item_use(&ev);
                TranscriptEntry::UseItem {
                    player: ev.player.nickname,
                    item: ev.item,
                    outcome,
                }
            }
        })
        .collect()
}
