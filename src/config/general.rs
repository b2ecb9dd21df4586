//! The general configuration settings for atax.
//!
//! This module defines the [General] struct for deserializing
//! the `[general]` table of the atax.toml configuration file
//! and the [InternalGeneral] struct for internal use within atax.

use serde::Deserialize;

use std::time::Duration;

pub const DEFAULT_MESSAGE_SECS: u64 = 3;
const MAX_MESSAGE_SECS: u64 = 60;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    message_secs: u64,
}

impl Default for General {
    fn default() -> Self {
        General {
            message_secs: DEFAULT_MESSAGE_SECS,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    message_duration: Duration,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            message_duration: Duration::from_secs(g.message_secs.clamp(1, MAX_MESSAGE_SECS)),
        }
    }
}

impl InternalGeneral {
    /// Lifetime of a transient status-line message.
    #[inline]
    pub fn message_duration(&self) -> Duration {
        self.message_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_secs_is_clamped() -> Result<(), Box<dyn std::error::Error>> {
        let zero: General = toml::from_str("message_secs = 0")?;
        assert_eq!(
            InternalGeneral::from(zero).message_duration(),
            Duration::from_secs(1)
        );

        let huge: General = toml::from_str("message_secs = 9000")?;
        assert_eq!(
            InternalGeneral::from(huge).message_duration(),
            Duration::from_secs(MAX_MESSAGE_SECS)
        );

        let default = InternalGeneral::from(General::default());
        assert_eq!(default.message_duration(), Duration::from_secs(3));
        Ok(())
    }
}
