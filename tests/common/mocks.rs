use async_trait::async_trait;
use endpoint_invoker::{
    Error, Result,
    runtime::{InvokeEndpointRequest, InvokeEndpointResponse, RuntimeClient},
};
use std::sync::{Arc, Mutex};

/// Mock runtime client for testing
#[derive(Debug, Default)]
pub struct MockRuntimeClient {
    pub responses: Arc<Mutex<Vec<InvokeEndpointResponse>>>,
    pub requests: Arc<Mutex<Vec<InvokeEndpointRequest>>>,
    pub error: Option<String>,
    pub echo: bool,
}

impl MockRuntimeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responds with the request body, byte for byte.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn with_responses(self, responses: Vec<InvokeEndpointResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }

    pub fn get_requests(&self) -> Vec<InvokeEndpointRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RuntimeClient for MockRuntimeClient {
    async fn invoke_endpoint(
        &self,
        request: InvokeEndpointRequest,
    ) -> Result<InvokeEndpointResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.error {
            return Err(Error::Rejected {
                status: 500,
                message: error.clone(),
            });
        }

        if self.echo {
            let mut response = InvokeEndpointResponse::ok(request.body);
            response.content_type = Some(request.content_type);
            return Ok(response);
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(Error::endpoint_not_found(request.endpoint_name))
        } else {
            Ok(responses.remove(0))
        }
    }
}
