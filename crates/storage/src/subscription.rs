//! Live member-document subscriptions.
//!
//! One `watch` channel per watched member. Channels exist only while at
//! least one [`MemberSubscription`] holds them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use canteen_core::{Member, MemberId};
use tokio::sync::watch;
use tracing::debug;

/// Registry of open member channels, owned by a store.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    channels: Mutex<HashMap<MemberId, watch::Sender<Option<Member>>>>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn channels(&self) -> MutexGuard<'_, HashMap<MemberId, watch::Sender<Option<Member>>>> {
        self.channels.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a subscription. `current` seeds a newly created channel; an
    /// existing channel already holds the latest document.
    pub fn subscribe(self: &Arc<Self>, id: &MemberId, current: Option<Member>) -> MemberSubscription {
        let mut channels = self.channels();
        let receiver = match channels.get(id) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = watch::channel(current);
                channels.insert(id.clone(), sender);
                receiver
            }
        };
        debug!(member = %id, "subscription opened");

        MemberSubscription {
            id: id.clone(),
            receiver,
            registry: Arc::clone(self),
        }
    }

    /// Push a new version of a member document to its watchers, if any.
    pub fn publish(&self, member: &Member) {
        if let Some(sender) = self.channels().get(&member.id) {
            sender.send_replace(Some(member.clone()));
        }
    }

    /// Replace a watched document only if it differs from the last one
    /// published. Returns whether watchers were notified.
    pub fn publish_if_changed(&self, member: &Member) -> bool {
        let channels = self.channels();
        let Some(sender) = channels.get(&member.id) else {
            return false;
        };
        sender.send_if_modified(|current| {
            if current.as_ref() == Some(member) {
                false
            } else {
                *current = Some(member.clone());
                true
            }
        })
    }

    /// Ids of every watched member.
    pub fn watched(&self) -> Vec<MemberId> {
        self.channels().keys().cloned().collect()
    }

    /// Number of members currently watched.
    pub fn active(&self) -> usize {
        self.channels().len()
    }

    fn release(&self, id: &MemberId) {
        let mut channels = self.channels();
        // The releasing receiver is still alive while this runs.
        if channels.get(id).is_some_and(|s| s.receiver_count() <= 1) {
            channels.remove(id);
            debug!(member = %id, "subscription released");
        }
    }
}

/// Handle to a live member document. Dropping it releases the channel.
#[derive(Debug)]
pub struct MemberSubscription {
    id: MemberId,
    receiver: watch::Receiver<Option<Member>>,
    registry: Arc<SubscriptionRegistry>,
}

impl MemberSubscription {
    /// Watched member.
    pub fn member_id(&self) -> &MemberId {
        &self.id
    }

    /// Latest known document, `None` if it does not exist.
    pub fn latest(&self) -> Option<Member> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next update of an existing document.
    ///
    /// Returns `None` once the store has shut the channel.
    pub async fn changed(&mut self) -> Option<Member> {
        loop {
            self.receiver.changed().await.ok()?;
            if let Some(member) = self.receiver.borrow_and_update().clone() {
                return Some(member);
            }
        }
    }
}

impl Drop for MemberSubscription {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}
