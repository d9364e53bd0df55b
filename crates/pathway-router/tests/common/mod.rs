#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pathway_router::Params;

/// One recorded call: a label plus the parameters it received.
pub type Call = (String, Vec<Option<String>>);

/// Collects handler and fallback invocations in call order.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self, label: &str) -> impl Fn(&Params) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move |params: &Params| {
            calls
                .lock()
                .unwrap()
                .push((label.clone(), params.as_slice().to_vec()));
        }
    }

    pub fn fallback(&self, label: &str) -> impl Fn() + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        let label = label.to_string();
        move || calls.lock().unwrap().push((label.clone(), Vec::new()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().into_iter().map(|(label, _)| label).collect()
    }
}

pub fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}
