use super::fsm::{InvocationEvent, InvocationStateMachine};
use crate::{
    Error, Result,
    config::{InvocationConfig, default_content_type},
    runtime::{InvokeEndpointRequest, InvokeEndpointResponse, RuntimeClient},
};
use std::io::Write;
use tracing::{debug, error, info, warn};

/// One request to one endpoint. The payload is never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub endpoint_reference: String,
    pub content_type: String,
    pub accept: Option<String>,
    pub custom_attributes: Option<String>,
    pub payload: Vec<u8>,
}

impl Invocation {
    pub fn new(endpoint_reference: impl Into<String>, payload: impl Into<Vec<u8>>) -> Result<Self> {
        let endpoint_reference = endpoint_reference.into();
        if endpoint_reference.trim().is_empty() {
            return Err(Error::config("endpoint reference must not be empty"));
        }
        if matches!(endpoint_reference.as_str(), "." | "..") {
            return Err(Error::config(format!(
                "endpoint reference '{}' is not a valid name",
                endpoint_reference
            )));
        }

        Ok(Self {
            endpoint_reference,
            content_type: default_content_type(),
            accept: None,
            custom_attributes: None,
            payload: payload.into(),
        })
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn with_custom_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.custom_attributes = Some(attributes.into());
        self
    }

    pub async fn from_config(config: &InvocationConfig) -> Result<Self> {
        let payload = match config.payload_file {
            Some(ref path) => {
                debug!("Reading payload from: {}", path);
                tokio::fs::read(path).await?
            }
            None => config.payload.to_bytes()?,
        };

        let mut invocation = Self::new(config.endpoint_reference.clone(), payload)?
            .with_content_type(&config.content_type);
        if let Some(ref accept) = config.accept {
            invocation = invocation.with_accept(accept);
        }
        if let Some(ref attributes) = config.custom_attributes {
            invocation = invocation.with_custom_attributes(attributes);
        }

        Ok(invocation)
    }

    pub fn to_request(&self) -> InvokeEndpointRequest {
        InvokeEndpointRequest {
            endpoint_name: self.endpoint_reference.clone(),
            content_type: self.content_type.clone(),
            accept: self.accept.clone(),
            custom_attributes: self.custom_attributes.clone(),
            body: self.payload.clone(),
        }
    }
}

/// Sends the invocation once and hands back whatever the endpoint returned.
///
/// Errors from the client are passed through untouched; nothing is retried.
pub async fn invoke_model(
    client: &dyn RuntimeClient,
    invocation: &Invocation,
) -> Result<InvokeEndpointResponse> {
    let mut fsm = InvocationStateMachine::new();
    let request = invocation.to_request();

    info!(
        "Invocation {} sending {} bytes to endpoint '{}'",
        fsm.invocation_id(),
        request.body.len(),
        invocation.endpoint_reference
    );

    fsm.transition(InvocationEvent::RequestSent)?;

    match client.invoke_endpoint(request).await {
        Ok(response) => {
            fsm.transition(InvocationEvent::ResponseReceived)?;
            info!(
                "Invocation {} completed with status {} ({} bytes)",
                fsm.invocation_id(),
                response.status,
                response.body.len()
            );
            Ok(response)
        }
        Err(e) => {
            if let Err(transition_error) = fsm.fail(&e) {
                warn!(
                    "Invocation {} could not record failure: {}",
                    fsm.invocation_id(),
                    transition_error
                );
            }
            error!("Invocation {} failed: {}", fsm.invocation_id(), e);
            Err(e)
        }
    }
}

/// Writes the raw response body and nothing else.
pub fn write_body<W: Write>(response: &InvokeEndpointResponse, out: &mut W) -> Result<()> {
    out.write_all(&response.body)?;
    out.flush()?;
    Ok(())
}
