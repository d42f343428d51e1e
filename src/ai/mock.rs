use super::{Generation, GenerativeModel, Prompt, Tool};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockReply {
    Generation(Generation),
    Failure(String),
}

/// Scripted model for tests. Replies cycle in the order they were added and
/// every call is recorded. Clones share replies and the call log.
#[derive(Clone)]
pub struct MockGenerativeModel {
    replies: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<(Prompt, Vec<Tool>)>>>,
}

impl MockGenerativeModel {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_generation(self, generation: Generation) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Generation(generation));
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_generation(Generation::from_text(text))
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Failure(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Prompt, Vec<Tool>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn generate(&self, prompt: Prompt, tools: &[Tool]) -> Result<Generation> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((prompt, tools.to_vec()));
            calls.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(Generation::from_text(
                "The content is consistent with reputable reporting.",
            ));
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Generation(generation) => Ok(generation.clone()),
            MockReply::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
