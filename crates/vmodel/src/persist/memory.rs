use super::SaveTransport;
use crate::error::TransportError;

/// A request seen by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub url: String,
    pub payload: serde_json::Value,
}

/// Transport that keeps everything in memory.
///
/// Every request is recorded. The reply is the configured response, the
/// configured failure, or an echo of the payload when neither is set.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Vec<SentRequest>,
    response: Option<serde_json::Value>,
    failure: Option<TransportError>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(response: serde_json::Value) -> Self {
        Self {
            response: Some(response),
            ..Default::default()
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> &[SentRequest] {
        &self.sent
    }

    pub fn last(&self) -> Option<&SentRequest> {
        self.sent.last()
    }
}

impl SaveTransport for MemoryTransport {
    fn send(
        &mut self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        self.sent.push(SentRequest {
            url: url.to_string(),
            payload: payload.clone(),
        });
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self.response.clone().unwrap_or_else(|| payload.clone()))
    }
}
