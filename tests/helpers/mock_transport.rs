//! In-memory chat transport for testing
//!
//! Records every send and removal, serves scripted group metadata, and can
//! be told to fail specific operations.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use groupwarden::models::GroupMetadata;
use groupwarden::transport::{ChatTransport, EventStream, OutgoingMessage, TransportError, TransportEvent};

#[derive(Default)]
pub struct MockTransport {
    own_id: Mutex<Option<String>>,
    groups: Mutex<HashMap<String, GroupMetadata>>,
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    removed: Mutex<Vec<(String, String)>>,
    sessions: Mutex<VecDeque<Vec<TransportEvent>>>,
    metadata_error: Mutex<Option<TransportError>>,
    remove_error: Mutex<Option<TransportError>>,
    send_error: Mutex<Option<TransportError>>,
    metadata_calls: AtomicUsize,
    connect_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(own_id: &str) -> Self {
        Self {
            own_id: Mutex::new(Some(own_id.to_string())),
            ..Default::default()
        }
    }

    pub fn set_group(&self, metadata: GroupMetadata) {
        self.groups.lock().unwrap().insert(metadata.id.clone(), metadata);
    }

    pub fn fail_metadata(&self, error: TransportError) {
        *self.metadata_error.lock().unwrap() = Some(error);
    }

    pub fn fail_remove(&self, error: TransportError) {
        *self.remove_error.lock().unwrap() = Some(error);
    }

    pub fn fail_send(&self, error: Option<TransportError>) {
        *self.send_error.lock().unwrap() = error;
    }

    /// Queue the events delivered by the next successful `connect`
    pub fn push_session(&self, events: Vec<TransportEvent>) {
        self.sessions.lock().unwrap().push_back(events);
    }

    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, m)| m.text).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent_texts().pop()
    }

    pub fn removed(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn connect(&self) -> Result<EventStream, TransportError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        let events = self
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Disconnected("no scripted session".to_string()))?;

        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.try_send(event).expect("channel sized for scripted events");
        }
        Ok(rx)
    }

    fn own_id(&self) -> Option<String> {
        self.own_id.lock().unwrap().clone()
    }

    fn set_own_id(&self, own_id: Option<String>) {
        *self.own_id.lock().unwrap() = own_id;
    }

    async fn send_message(&self, conversation_id: &str, message: OutgoingMessage) -> Result<(), TransportError> {
        if let Some(error) = self.send_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.sent.lock().unwrap().push((conversation_id.to_string(), message));
        Ok(())
    }

    async fn group_metadata(&self, group_id: &str) -> Result<GroupMetadata, TransportError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.metadata_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.groups
            .lock()
            .unwrap()
            .get(group_id)
            .cloned()
            .ok_or(TransportError::Status {
                status: 404,
                message: "group not found".to_string(),
            })
    }

    async fn participating_groups(&self) -> Result<Vec<GroupMetadata>, TransportError> {
        Ok(self.groups.lock().unwrap().values().cloned().collect())
    }

    async fn remove_participant(&self, group_id: &str, participant_id: &str) -> Result<(), TransportError> {
        if let Some(error) = self.remove_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.removed
            .lock()
            .unwrap()
            .push((group_id.to_string(), participant_id.to_string()));
        Ok(())
    }
}
