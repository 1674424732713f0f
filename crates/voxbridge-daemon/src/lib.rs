//! Daemon glue for voxbridge.
//!
//! This crate wires the interpretation engine and the model pipeline to the
//! outside world:
//!
//! - **Messaging**: the [`Messaging`] trait and its MQTT implementation
//!   [`mqtt::MqttMessaging`].
//! - **Dialogs**: the [`DialogSource`] trait and filesystem implementation.
//! - **Dispatch**: [`Dispatcher`] turning outcomes into bus traffic.
//! - **Entry points**: [`VoiceBridge`] with text understanding, the audio
//!   listening loop, and the self test.
//! - **Watch loop**: [`watch::watch_intents`] driving the sync/build
//!   pipeline from an intent change stream.
//! - **Config**: immutable [`config::DaemonConfig`] snapshots behind
//!   [`config::ConfigHandle`].

pub mod bridge;
pub mod config;
pub mod dialog;
pub mod dispatch;
pub mod error;
pub mod messaging;
pub mod mqtt;
pub mod watch;

#[cfg(test)]
mod testutil;

pub use bridge::VoiceBridge;
pub use config::{ConfigHandle, DaemonConfig};
pub use dialog::{DialogKey, DialogSource, FsDialogSource};
pub use dispatch::Dispatcher;
pub use error::{DaemonError, Result};
pub use messaging::Messaging;
pub use mqtt::{MqttConfig, MqttMessaging};
pub use watch::{ChannelChangeStream, IntentChangeStream, watch_intents};
