//! MQTT-backed [`Messaging`] implementation.
//!
//! Outbound messages go through an unbounded channel into a background
//! publisher task so callers never block on the broker; a second task keeps
//! the rumqttc event loop polled.  Both tasks end when the client is
//! dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::{DaemonError, Result};
use crate::messaging::Messaging;

/// MQTT connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker hostname.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Client identifier; generated when absent.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Keep-alive interval in seconds.
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u16,
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,
}

fn default_keep_alive() -> u16 {
    60
}

fn default_clean_session() -> bool {
    true
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 1883,
            client_id: None,
            username: None,
            password: None,
            keep_alive: default_keep_alive(),
            clean_session: default_clean_session(),
        }
    }
}

/// One queued outbound message.
#[derive(Debug)]
struct OutboundMessage {
    topic: String,
    payload: Vec<u8>,
}

/// MQTT transport for the daemon's outbound traffic.
pub struct MqttMessaging {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

impl MqttMessaging {
    /// Connect to the broker and spawn the background tasks.
    pub fn connect(config: &MqttConfig) -> Self {
        let client_id = config
            .client_id
            .clone()
            .unwrap_or_else(|| format!("voxbridge-{}", Uuid::now_v7()));

        let mut options = rumqttc::MqttOptions::new(client_id, config.host.clone(), config.port);
        options.set_keep_alive(std::time::Duration::from_secs(u64::from(config.keep_alive)));
        options.set_clean_session(config.clean_session);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            options.set_credentials(username.clone(), password.clone());
        }

        let (client, mut event_loop) = rumqttc::AsyncClient::new(options, 10);

        // Keep the event loop polled; rumqttc makes no progress otherwise.
        tokio::spawn(async move {
            loop {
                if let Err(e) = event_loop.poll().await {
                    tracing::warn!(error = %e, "mqtt event loop error, reconnecting");
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        });

        let (sender, mut receiver) = mpsc::unbounded_channel::<OutboundMessage>();
        tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                if let Err(e) = client
                    .publish(
                        &message.topic,
                        rumqttc::QoS::AtLeastOnce,
                        false,
                        message.payload,
                    )
                    .await
                {
                    tracing::error!(topic = %message.topic, error = %e, "mqtt publish failed");
                }
            }
        });

        Self { sender }
    }

    fn enqueue(&self, topic: String, payload: serde_json::Value) -> Result<()> {
        let payload = serde_json::to_vec(&payload).map_err(|e| DaemonError::Messaging {
            reason: format!("payload serialization failed: {e}"),
        })?;
        self.sender
            .send(OutboundMessage { topic, payload })
            .map_err(|e| DaemonError::Messaging {
                reason: format!("publish queue closed: {e}"),
            })
    }
}

#[async_trait]
impl Messaging for MqttMessaging {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<()> {
        self.enqueue(topic.to_owned(), payload)
    }

    async fn call(&self, procedure: &str, args: serde_json::Value) -> Result<()> {
        // Procedures live on the same topic hierarchy, dot-separated names
        // mapping onto topic levels (`speech.say` -> `speech/say`).
        self.enqueue(procedure.replace('.', "/"), args)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
