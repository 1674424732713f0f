//! Message bus abstraction.
//!
//! The daemon talks to the rest of the automation system over a pub/sub bus.
//! [`Messaging`] keeps the core transport-agnostic: routed commands go out
//! through [`Messaging::publish`], and control procedures on other
//! components (speech playback, hotword enable/disable) through
//! [`Messaging::call`].  Both are fire-and-forget; the daemon never awaits
//! an application-level acknowledgment.

use async_trait::async_trait;

use crate::error::Result;

/// Procedure spoken-dialog playback is requested on.
pub const SPEECH_SAY: &str = "speech.say";

/// Procedure suppressing the wake-word detector during a listen attempt.
pub const HOTWORD_DISABLE: &str = "hotword.disable";

/// Procedure resuming the wake-word detector after a listen attempt.
pub const HOTWORD_ENABLE: &str = "hotword.enable";

/// Fire-and-forget pub/sub transport.
#[async_trait]
pub trait Messaging: Send + Sync {
    /// Publish a payload on a routed-command topic (e.g. `light/toggle`).
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> Result<()>;

    /// Invoke a named procedure on another component (e.g. `speech.say`).
    ///
    /// Dot-path procedure names map onto the bus's topic hierarchy; the
    /// transport owns that mapping.
    async fn call(&self, procedure: &str, args: serde_json::Value) -> Result<()>;
}
