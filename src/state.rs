use crate::dom::Document;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct PageState {
    pub document: Arc<Mutex<Document>>,
    latest_request: Arc<AtomicU64>,
}

impl PageState {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issues the next request token. Tokens only ever increase.
    pub fn next_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request.load(Ordering::SeqCst)
    }
}
