//! Event shapes handed over by the host engine. The host owns player and
//! world state; these structs only carry what the handlers need.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub nickname: String,
}

impl Player {
    pub fn new(id: u64, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
        }
    }
}

/// Host damage causes. `Cola` is the one this plugin neutralizes; causes the
/// host adds later arrive as `Other` and pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    Cola,
    Fall,
    Firearm,
    Explosion,
    Tesla,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Cola,
    Medkit,
    Adrenaline,
    Painkillers,
    Other(String),
}

/// Damage notification with a mutable allow flag; the host applies the
/// damage only if `allowed` is still true after dispatch.
#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub player: Player,
    pub cause: DamageCause,
    pub allowed: bool,
}

impl DamageEvent {
    pub fn new(player: Player, cause: DamageCause) -> Self {
        Self {
            player,
            cause,
            allowed: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItemUseEvent {
    pub player: Player,
    pub item: ItemKind,
}
