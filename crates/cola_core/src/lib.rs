//! Core of a cola damage-exemption plugin: configuration, the two event
//! handlers, and the lifecycle that wires them to a host engine.

pub mod config;
pub mod events;
pub mod handlers;
pub mod host;
pub mod plugin;

pub use config::{ConfigError, MessageChannel, Settings, DEFAULT_MESSAGE};
pub use events::{DamageCause, DamageEvent, ItemKind, ItemUseEvent, Player};
pub use handlers::{DamageFilter, NotifyOutcome, UsageNotifier, PLAYER_PLACEHOLDER};
pub use host::{Delivery, MessageSink, RecordingSink};
pub use plugin::ColaPlugin;
