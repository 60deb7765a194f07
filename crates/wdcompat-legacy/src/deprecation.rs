//! One-shot deprecation notices for legacy command names.
//!
//! The first call of each legacy symbol publishes a `DeprecationEvent` to every
//! subscriber; later calls of the same symbol are silent for the lifetime of the
//! notifier.

use actix::prelude::*;
use log::{debug, warn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use wdcompat_core::DeprecationConfig;
use wdcompat_core::logging::NOTICE_TARGET;

/// Published once per legacy symbol, on its first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Message)]
#[rtype(result = "()")]
pub struct DeprecationEvent {
    /// The legacy symbol, e.g. `Command#elementById`.
    pub name: String,
    /// What to use instead, when a direct replacement exists.
    pub replacement: Option<String>,
    /// Extra remarks about behavior differences.
    pub extra: Option<String>,
}

impl fmt::Display for DeprecationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is deprecated.", self.name)?;
        if let Some(replacement) = &self.replacement {
            write!(f, " Use {} instead.", replacement)?;
        }
        if let Some(extra) = &self.extra {
            write!(f, " {}", extra)?;
        }
        Ok(())
    }
}

/// Receives deprecation events. Runs synchronously inside `notify`.
pub trait DeprecationSubscriber: Send + Sync {
    fn on_deprecated(&self, event: &DeprecationEvent);
}

impl<F> DeprecationSubscriber for F
where
    F: Fn(&DeprecationEvent) + Send + Sync,
{
    fn on_deprecated(&self, event: &DeprecationEvent) {
        self(event)
    }
}

/// Forwards events to an actor mailbox.
pub struct RecipientSubscriber(pub Recipient<DeprecationEvent>);

impl DeprecationSubscriber for RecipientSubscriber {
    fn on_deprecated(&self, event: &DeprecationEvent) {
        if let Err(e) = self.0.try_send(event.clone()) {
            warn!(
                "Failed to deliver deprecation notice for {} to actor subscriber: {}",
                event.name, e
            );
        }
    }
}

/// Renders every event as a `log::warn!` line under `NOTICE_TARGET`.
#[derive(Debug, Default)]
pub struct LogSubscriber;

impl DeprecationSubscriber for LogSubscriber {
    fn on_deprecated(&self, event: &DeprecationEvent) {
        warn!(target: NOTICE_TARGET, "{}", event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

type SubscriberList = Vec<(SubscriptionId, Arc<dyn DeprecationSubscriber>)>;

static GLOBAL: Lazy<Arc<DeprecationNotifier>> =
    Lazy::new(|| Arc::new(DeprecationNotifier::from_config(&DeprecationConfig::default())));

pub struct DeprecationNotifier {
    warned: Mutex<HashSet<String>>,
    subscribers: Mutex<SubscriberList>,
    next_subscription_id: AtomicU64,
}

impl Default for DeprecationNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DeprecationNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeprecationNotifier")
            .field("warned", &self.warned.lock().len())
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

impl DeprecationNotifier {
    /// A notifier with no subscribers and an empty warned set.
    pub fn new() -> Self {
        Self {
            warned: Mutex::new(HashSet::new()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &DeprecationConfig) -> Self {
        let notifier = Self::new();
        if config.log_notices {
            notifier.subscribe(LogSubscriber);
        }
        notifier
    }

    /// The process-wide notifier. Logs notices by default.
    pub fn global() -> Arc<DeprecationNotifier> {
        GLOBAL.clone()
    }

    pub fn subscribe<S>(&self, subscriber: S) -> SubscriptionId
    where
        S: DeprecationSubscriber + 'static,
    {
        let id = SubscriptionId(self.next_subscription_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(subscriber)));
        debug!("Added deprecation subscriber {:?}", id);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().retain(|(existing, _)| *existing != id);
        debug!("Removed deprecation subscriber {:?}", id);
    }

    /// Publishes a notice for `name` unless one was already published.
    ///
    /// The name is recorded before subscribers run and no lock is held while
    /// they do, so a subscriber may call back into `notify`.
    pub fn notify(&self, name: &str, replacement: Option<&str>, extra: Option<&str>) {
        let first_use = self.warned.lock().insert(name.to_owned());
        if !first_use {
            return;
        }

        let event = DeprecationEvent {
            name: name.to_owned(),
            replacement: replacement.map(str::to_owned),
            extra: extra.map(str::to_owned),
        };
        let recipients: Vec<Arc<dyn DeprecationSubscriber>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();

        debug!(
            "Publishing deprecation notice for {} to {} subscribers",
            event.name,
            recipients.len()
        );
        for subscriber in recipients {
            subscriber.on_deprecated(&event);
        }
    }

    pub fn has_warned(&self, name: &str) -> bool {
        self.warned.lock().contains(name)
    }

    pub fn warned_count(&self) -> usize {
        self.warned.lock().len()
    }

    /// Forgets every published name. Subscribers stay registered.
    pub fn reset(&self) {
        self.warned.lock().clear();
    }
}
