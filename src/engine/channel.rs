// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! FIFO channels carrying envelopes between steps and the workflow boundary.
//!
//! A [`Channel`] is a cloneable handle over a tokio mpsc queue. Every clone
//! shares the same queue, which lets the workflow keep a handle for `feed`/`read`
//! while the owning step holds another. Each channel has exactly one logical
//! reader; fan-out is always modeled as several distinct channels.
//!
//! # Capacity
//!
//! * [`ChannelCapacity::Unbounded`] (default): `put` never waits.
//! * [`ChannelCapacity::Bounded`]: `put` waits until the reader has made room.
//!   A producer broadcasting to several bounded channels therefore advances at
//!   the pace of its slowest consumer.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

use crate::engine::Envelope;

/// Queue capacity used for every channel a workflow creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelCapacity {
    #[default]
    Unbounded,
    Bounded(usize),
}

impl From<Option<usize>> for ChannelCapacity {
    fn from(capacity: Option<usize>) -> Self {
        match capacity {
            Some(size) => ChannelCapacity::Bounded(size),
            None => ChannelCapacity::Unbounded,
        }
    }
}

/// Every sender or the receiver of a channel is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel closed")]
pub struct ChannelClosed;

enum ChannelSender<T> {
    Unbounded(mpsc::UnboundedSender<Envelope<T>>),
    Bounded(mpsc::Sender<Envelope<T>>),
}

impl<T> Clone for ChannelSender<T> {
    fn clone(&self) -> Self {
        match self {
            ChannelSender::Unbounded(sender) => ChannelSender::Unbounded(sender.clone()),
            ChannelSender::Bounded(sender) => ChannelSender::Bounded(sender.clone()),
        }
    }
}

enum ChannelReceiver<T> {
    Unbounded(mpsc::UnboundedReceiver<Envelope<T>>),
    Bounded(mpsc::Receiver<Envelope<T>>),
}

impl<T> ChannelReceiver<T> {
    async fn recv(&mut self) -> Option<Envelope<T>> {
        match self {
            ChannelReceiver::Unbounded(receiver) => receiver.recv().await,
            ChannelReceiver::Bounded(receiver) => receiver.recv().await,
        }
    }

    fn try_recv(&mut self) -> Option<Envelope<T>> {
        match self {
            ChannelReceiver::Unbounded(receiver) => receiver.try_recv().ok(),
            ChannelReceiver::Bounded(receiver) => receiver.try_recv().ok(),
        }
    }
}

/// Handle to a single FIFO queue of envelopes.
pub struct Channel<T> {
    label: Arc<str>,
    sender: ChannelSender<T>,
    receiver: Arc<Mutex<ChannelReceiver<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel").field("label", &self.label).finish()
    }
}

impl<T: Send + 'static> Channel<T> {
    /// Create a fresh queue. The label shows up in logs and observer events.
    pub fn new(label: impl Into<String>, capacity: ChannelCapacity) -> Self {
        let label: Arc<str> = Arc::from(label.into());
        match capacity {
            ChannelCapacity::Unbounded => {
                let (sender, receiver) = mpsc::unbounded_channel();
                Self {
                    label,
                    sender: ChannelSender::Unbounded(sender),
                    receiver: Arc::new(Mutex::new(ChannelReceiver::Unbounded(receiver))),
                }
            }
            ChannelCapacity::Bounded(size) => {
                let (sender, receiver) = mpsc::channel(size.max(1)); // tokio rejects zero capacity
                Self {
                    label,
                    sender: ChannelSender::Bounded(sender),
                    receiver: Arc::new(Mutex::new(ChannelReceiver::Bounded(receiver))),
                }
            }
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Append an envelope, waiting for room when the channel is bounded.
    pub async fn put(&self, envelope: Envelope<T>) -> Result<(), ChannelClosed> {
        match &self.sender {
            ChannelSender::Unbounded(sender) => sender.send(envelope).map_err(|_| ChannelClosed),
            ChannelSender::Bounded(sender) => sender.send(envelope).await.map_err(|_| ChannelClosed),
        }
    }

    /// Remove the oldest envelope, waiting until one arrives.
    pub async fn get(&self) -> Result<Envelope<T>, ChannelClosed> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await.ok_or(ChannelClosed)
    }

    /// Discard every queued envelope without waiting and return how many were dropped.
    ///
    /// A reader currently parked in [`Channel::get`] holds the queue; the channel is
    /// then left alone, since anything queued is about to go to that reader.
    pub fn drain(&self) -> usize {
        let Ok(mut receiver) = self.receiver.try_lock() else {
            return 0;
        };
        let mut dropped = 0;
        while receiver.try_recv().is_some() {
            dropped += 1;
        }
        dropped
    }

    /// True when both handles refer to the same underlying queue.
    pub fn same_channel(&self, other: &Channel<T>) -> bool {
        Arc::ptr_eq(&self.receiver, &other.receiver)
    }
}
