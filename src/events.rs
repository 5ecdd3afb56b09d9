//! Lifecycle notifications.
//!
//! Events are broadcast fire-and-forget over a `tokio::sync::broadcast`
//! channel: any number of subscribers, no acknowledgement, and a slow
//! subscriber lags rather than blocking the publisher.

use crate::i18n::LanguageSet;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Default channel capacity for [`EventBus::new`].
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub enum LanguageEvent {
    /// A dataset was fetched from the network.
    DatasetLoaded { dataset: Arc<LanguageSet> },

    /// The default language was applied after a load.
    LanguageLoaded { code: String },

    /// An explicitly requested language was applied.
    LanguageChanged { code: String },
}

impl LanguageEvent {
    /// Event name as seen by hosts that dispatch by string.
    pub fn name(&self) -> &'static str {
        match self {
            LanguageEvent::DatasetLoaded { .. } => "datasetLoaded",
            LanguageEvent::LanguageLoaded { .. } => "languageLoaded",
            LanguageEvent::LanguageChanged { .. } => "languageChanged",
        }
    }

    /// Language code carried by the event, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            LanguageEvent::DatasetLoaded { .. } => None,
            LanguageEvent::LanguageLoaded { code } | LanguageEvent::LanguageChanged { code } => {
                Some(code.as_str())
            }
        }
    }
}

/// Cloneable handle to the event channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LanguageEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.sender.subscribe()
    }

    /// Publish to current subscribers. Having none is not an error.
    pub fn publish(&self, event: LanguageEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => trace!("Published {} to {} subscriber(s)", name, receivers),
            Err(_) => trace!("Published {} with no subscribers", name),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
