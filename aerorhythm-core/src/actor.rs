use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::types;

/// Verified caller identity handed down by the authentication layer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Actor {
    pub subject: String,
    pub privileged: bool,
}

impl Actor {
    pub fn privileged(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            privileged: true,
        }
    }

    pub fn unprivileged(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            privileged: false,
        }
    }

    pub fn authorize(&self, action: &str) -> types::Result<()> {
        if self.privileged {
            return Ok(());
        }

        tracing::warn!("denied '{}' for actor '{}'", action, self.subject);

        Err(Error::Unauthorized {
            subject: self.subject.clone(),
            action: action.to_string(),
        })
    }
}
