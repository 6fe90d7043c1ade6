use super::types::*;
use crate::{Error, Result, config::RuntimeConfig};
use async_trait::async_trait;
use reqwest::{
    StatusCode, Url,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait RuntimeClient: Send + Sync {
    async fn invoke_endpoint(&self, request: InvokeEndpointRequest)
    -> Result<InvokeEndpointResponse>;
}

/// Runtime client speaking the managed inference HTTP API.
///
/// Holds no per-call state, so one instance can serve any number of calls.
pub struct HttpRuntimeClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRuntimeClient {
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let base_url = config
            .resolve_base_url()
            .ok_or_else(|| Error::config("runtime requires either base_url or region"))?;

        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid runtime base_url '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Runtime base_url '{}' cannot be used as a base",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name '{}': {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid value for header '{}': {}", key, e)))?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        debug!("Creating runtime client for: {}", base_url);

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/endpoints/{name}/invocations`, with the name encoded as a single segment.
    pub fn endpoint_url(&self, endpoint_name: &str) -> Result<Url> {
        // Dot segments would be resolved away instead of sent as a name
        if matches!(endpoint_name, "." | "..") {
            return Err(Error::config(format!(
                "Invalid endpoint name '{}'",
                endpoint_name
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::internal("runtime base_url cannot hold path segments"))?
            .pop_if_empty()
            .extend(["endpoints", endpoint_name, "invocations"]);
        Ok(url)
    }
}

#[async_trait]
impl RuntimeClient for HttpRuntimeClient {
    async fn invoke_endpoint(
        &self,
        request: InvokeEndpointRequest,
    ) -> Result<InvokeEndpointResponse> {
        let url = self.endpoint_url(&request.endpoint_name)?;

        debug!(
            "Invoking endpoint '{}' with {} byte {} body",
            request.endpoint_name,
            request.body.len(),
            request.content_type
        );

        let mut req_builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, &request.content_type);

        if let Some(ref accept) = request.accept {
            req_builder = req_builder.header(ACCEPT, accept);
        }
        if let Some(ref attributes) = request.custom_attributes {
            req_builder = req_builder.header(CUSTOM_ATTRIBUTES_HEADER, attributes);
        }

        let response = req_builder
            .body(request.body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        if !status.is_success() {
            warn!(
                "Endpoint '{}' returned {}",
                request.endpoint_name, status
            );
            return Err(classify_status(status, &request.endpoint_name, &body));
        }

        debug!(
            "Received {} byte response from endpoint '{}'",
            body.len(),
            request.endpoint_name
        );

        Ok(InvokeEndpointResponse {
            status: status.as_u16(),
            content_type: header_string(&headers, CONTENT_TYPE.as_str()),
            invoked_production_variant: header_string(&headers, INVOKED_VARIANT_HEADER),
            custom_attributes: header_string(&headers, CUSTOM_ATTRIBUTES_HEADER),
            body,
        })
    }
}

/// Maps a non-success status to the error the caller sees.
pub fn classify_status(status: StatusCode, endpoint: &str, body: &[u8]) -> Error {
    let message = String::from_utf8_lossy(body).into_owned();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => Error::endpoint_not_found(endpoint),
        // The managed runtime reports unknown endpoints as a validation error
        StatusCode::BAD_REQUEST
            if message.contains("Could not find endpoint")
                || (message.contains("Endpoint ") && message.contains("not found")) =>
        {
            Error::endpoint_not_found(endpoint)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Error::timeout(format!(
            "endpoint '{}' returned {}",
            endpoint, status
        )),
        _ => Error::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(e.to_string())
    } else {
        Error::Network(e)
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
