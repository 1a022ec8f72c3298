//! Scripted capability fakes shared across integration tests.
//!
//! These fakes replay deterministic outcomes without touching the network.
//! Every call sleeps at least one tick before resolving, so a watch
//! observer on a single-threaded test runtime is scheduled between
//! back-to-back snapshot publications and sees every transition.

use async_trait::async_trait;
use dossier::llm::{GenerationClient, GenerationRequest};
use dossier::retrieval::RetrievalClient;
use dossier::types::{GenerationError, RetrievalError, SourceDocument};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted outcome for a generation call.
#[derive(Clone)]
pub enum Script {
    /// Succeed with the given text.
    Reply(String),
    /// Succeed with the given text after a delay.
    ReplyAfter(String, Duration),
    /// Fail with the given error.
    Fail(GenerationError),
}

impl Script {
    /// Succeed with `text`.
    pub fn reply(text: &str) -> Self {
        Self::Reply(text.to_string())
    }

    /// Succeed with `text` after `delay`.
    pub fn reply_after(text: &str, delay: Duration) -> Self {
        Self::ReplyAfter(text.to_string(), delay)
    }

    async fn resolve(&self) -> Result<String, GenerationError> {
        match self {
            Self::Reply(text) => {
                tokio::time::sleep(Duration::from_millis(1)).await;
                Ok(text.clone())
            }
            Self::ReplyAfter(text, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
            Self::Fail(error) => {
                tokio::time::sleep(Duration::from_millis(1)).await;
                Err(error.clone())
            }
        }
    }
}

/// Generation fake that routes scripted outcomes by prompt content.
///
/// Rules are checked in registration order; the first rule whose needle
/// appears in the request prompt wins. Unmatched prompts get the fallback
/// (an empty reply unless overridden). Every request is recorded for later
/// assertions.
pub struct StubGenerator {
    rules: Vec<(String, Script)>,
    fallback: Script,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Script::reply(""),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script the outcome for any prompt containing `needle`.
    pub fn on(mut self, needle: &str, script: Script) -> Self {
        self.rules.push((needle.to_string(), script));
        self
    }

    /// Script the outcome for prompts no rule matches.
    pub fn otherwise(mut self, script: Script) -> Self {
        self.fallback = script;
        self
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for StubGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        let script = self
            .rules
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle))
            .map(|(_, script)| script)
            .unwrap_or(&self.fallback);
        script.resolve().await
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

/// Retrieval fake returning a fixed document set, recording each topic it
/// was asked to search.
pub struct StaticRetriever {
    documents: Vec<SourceDocument>,
    searched: Mutex<Vec<String>>,
}

impl StaticRetriever {
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self {
            documents,
            searched: Mutex::new(Vec::new()),
        }
    }

    /// Topics searched so far, in arrival order.
    pub fn topics(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RetrievalClient for StaticRetriever {
    async fn search(&self, topic: &str)
        -> Result<Vec<SourceDocument>, RetrievalError> {
        self.searched.lock().unwrap().push(topic.to_string());
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(self.documents.clone())
    }
}

/// Retrieval fake that always fails.
pub struct FailingRetriever;

#[async_trait]
impl RetrievalClient for FailingRetriever {
    async fn search(&self, _topic: &str)
        -> Result<Vec<SourceDocument>, RetrievalError> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Err(RetrievalError("search backend unavailable".to_string()))
    }
}

/// Shorthand for building a source document.
pub fn doc(source: &str, content: &str) -> SourceDocument {
    SourceDocument {
        source: source.to_string(),
        content: content.to_string(),
    }
}
