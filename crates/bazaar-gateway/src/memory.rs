use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::{Filter, Gateway, GatewayError};

/// In-memory stand-in for the managed backend. Handler tests inject it as
/// `Arc<dyn Gateway>`; the call counters let them assert that a rejected form
/// never produced a backend call, and the failure toggles simulate backend
/// errors without a network.
#[derive(Default)]
pub struct MemoryGateway {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    insert_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    fail_inserts: AtomicBool,
    fail_uploads: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a record into a collection directly, without counting it as an
    /// application insert. Backend-assigned fields are filled in if absent.
    pub fn seed(&self, collection: &str, mut record: Value) -> Value {
        assign_backend_fields(&mut record);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    /// Snapshot of a collection's records, in insertion order.
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn stored_object(&self, bucket: &str, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(&format!("{bucket}/{name}")).cloned()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent insert fail with a backend error.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent upload fail with a backend error.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }
}

/// Mimic the backend's column defaults: a fresh id and a creation timestamp.
fn assign_backend_fields(record: &mut Value) {
    if let Some(object) = record.as_object_mut() {
        object
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        object
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
    }
}

fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>, GatewayError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_one(&self, collection: &str, id: &str) -> Result<Value, GatewayError> {
        let collections = self.collections.lock().unwrap();
        collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|r| id_matches(r, id)))
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn insert(&self, collection: &str, mut record: Value) -> Result<Value, GatewayError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend("insert rejected by backend".to_string()));
        }
        assign_backend_fields(&mut record);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend("upload rejected by backend".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{bucket}/{name}"), bytes);
        Ok(format!("memory://{bucket}/{name}"))
    }
}
