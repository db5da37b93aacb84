//! Broadcast channel abstraction connecting the two surfaces
//!
//! The sync protocol runs over an unordered, fire-and-forget, at-most-once
//! broadcast primitive: publishing delivers to every other endpoint on the
//! same topic, or to nobody if none is subscribed. Order is preserved only
//! per sender. The [`Endpoint`] trait isolates the protocol from any
//! specific transport; [`InProcessChannel`] is the in-process substitute
//! used by tests and headless setups.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::game_id::GameId;

/// One end of a broadcast topic
///
/// Each surface holds exactly one endpoint. Messages it publishes are
/// queued for every other endpoint on the topic; messages published by
/// others are drained through [`Endpoint::poll`]. There is no delivery
/// guarantee: an absent receiver simply never sees the message.
pub trait Endpoint {
    /// Queues a message for every other endpoint subscribed to the topic
    ///
    /// Fire-and-forget: no error, no retry, no acknowledgement.
    fn publish(&self, message: String);

    /// Takes the next message delivered to this endpoint, if any
    fn poll(&self) -> Option<String>;
}

type SubscriberKey = usize;

#[derive(Default)]
struct Topic {
    queues: HashMap<SubscriberKey, VecDeque<String>>,
}

#[derive(Default)]
struct ChannelInner {
    topics: HashMap<GameId, Topic>,
    next_key: SubscriberKey,
}

/// An in-process broadcast channel
///
/// Both surfaces run single-threaded within one process when this channel
/// is used, so interior mutability through `Rc<RefCell<_>>` is sufficient;
/// there are no locks and nothing blocks. Delivery is asynchronous in the
/// sense that a published message sits in the receiver's queue until that
/// receiver polls it.
#[derive(Default, Clone)]
pub struct InProcessChannel {
    inner: Rc<RefCell<ChannelInner>>,
}

impl InProcessChannel {
    /// Creates an empty channel with no topics
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a new endpoint to the topic named by the game ID
    ///
    /// The endpoint receives only messages published after this call;
    /// there is no replay of earlier traffic.
    pub fn subscribe(&self, topic: GameId) -> InProcessEndpoint {
        let mut inner = self.inner.borrow_mut();
        let key = inner.next_key;
        inner.next_key += 1;
        inner
            .topics
            .entry(topic)
            .or_default()
            .queues
            .insert(key, VecDeque::new());
        InProcessEndpoint {
            topic,
            key,
            inner: Rc::clone(&self.inner),
        }
    }
}

/// An endpoint obtained from [`InProcessChannel::subscribe`]
///
/// Dropping the endpoint unsubscribes it; any messages still queued for it
/// are discarded (at-most-once delivery).
pub struct InProcessEndpoint {
    topic: GameId,
    key: SubscriberKey,
    inner: Rc<RefCell<ChannelInner>>,
}

impl Endpoint for InProcessEndpoint {
    fn publish(&self, message: String) {
        let mut inner = self.inner.borrow_mut();
        let Some(topic) = inner.topics.get_mut(&self.topic) else {
            return;
        };
        for (key, queue) in &mut topic.queues {
            if *key != self.key {
                queue.push_back(message.clone());
            }
        }
    }

    fn poll(&self) -> Option<String> {
        self.inner
            .borrow_mut()
            .topics
            .get_mut(&self.topic)?
            .queues
            .get_mut(&self.key)?
            .pop_front()
    }
}

impl Drop for InProcessEndpoint {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(topic) = inner.topics.get_mut(&self.topic) {
            topic.queues.remove(&self.key);
        }
    }
}
