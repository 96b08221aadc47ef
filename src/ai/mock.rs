use super::EditService;
use crate::error::RequestError;
use crate::models::{EditResult, EncodedImage};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// 1x1 transparent PNG, base64.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub image: EncodedImage,
    pub instruction: String,
}

#[derive(Clone)]
pub struct MockEditClient {
    responses: Arc<Mutex<Vec<Result<EditResult, RequestError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEditClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_result(self, result: EditResult) -> Self {
        self.responses.lock().unwrap().push(Ok(result));
        self
    }

    pub fn with_error(self, error: RequestError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockEditClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EditService for MockEditClient {
    async fn submit_edit_request(
        &self,
        image: EncodedImage,
        instruction: &str,
    ) -> Result<EditResult, RequestError> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.requests.lock().unwrap().push(RecordedRequest {
            image,
            instruction: instruction.to_string(),
        });

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(EditResult::Success {
                image_data: TINY_PNG_BASE64.to_string(),
            })
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> EncodedImage {
        EncodedImage {
            media_type: "image/png".to_string(),
            data: "AAEC".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_default_success() {
        let client = MockEditClient::new();

        let result = client.submit_edit_request(image(), "erase").await.unwrap();
        assert_eq!(
            result,
            EditResult::Success {
                image_data: TINY_PNG_BASE64.to_string()
            }
        );
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_custom_responses_cycle() {
        let client = MockEditClient::new()
            .with_result(EditResult::failure("first"))
            .with_error(RequestError::MissingCredential);

        let first = client.submit_edit_request(image(), "erase").await;
        assert_eq!(first, Ok(EditResult::failure("first")));

        let second = client.submit_edit_request(image(), "erase").await;
        assert_eq!(second, Err(RequestError::MissingCredential));

        let third = client.submit_edit_request(image(), "erase").await;
        assert_eq!(third, Ok(EditResult::failure("first")));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockEditClient::new();
        let probe = client.clone();

        client.submit_edit_request(image(), "erase").await.unwrap();

        let requests = probe.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].image, image());
        assert_eq!(requests[0].instruction, "erase");
    }
}
