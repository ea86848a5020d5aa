use crate::domain::ports::{
    ActivityEntry, ActivityLog, GatewayTransport, TransactionRecord, TransactionRecorder,
};
use crate::domain::wire::{GatewayResponse, WireRequest};
use crate::error::Result;
use async_trait::async_trait;
use serde::de::Error as _;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Transport double that replays queued responses and records every request.
///
/// Uses `Arc<RwLock<..>>` so tests keep a handle onto the same queue the
/// adapter holds boxed.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    responses: Arc<RwLock<VecDeque<GatewayResponse>>>,
    requests: Arc<RwLock<Vec<WireRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response `submit` hands back.
    pub async fn push_response(&self, response: GatewayResponse) {
        self.responses.write().await.push_back(response);
    }

    /// Everything submitted so far, in order.
    pub async fn requests(&self) -> Vec<WireRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl GatewayTransport for ScriptedTransport {
    async fn submit(&self, request: &WireRequest) -> Result<GatewayResponse> {
        self.requests.write().await.push(request.clone());
        self.responses
            .write()
            .await
            .pop_front()
            .ok_or_else(|| serde_json::Error::custom("no scripted response queued").into())
    }
}

/// Activity log that keeps entries in memory.
#[derive(Default, Clone)]
pub struct RecordedActivityLog {
    entries: Arc<RwLock<Vec<ActivityEntry>>>,
}

impl RecordedActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl ActivityLog for RecordedActivityLog {
    async fn log(&self, entry: ActivityEntry) -> Result<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}

/// Ledger that keeps transaction records in memory.
#[derive(Default, Clone)]
pub struct RecordedTransactions {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl RecordedTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<TransactionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl TransactionRecorder for RecordedTransactions {
    async fn record(&self, record: TransactionRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }
}
