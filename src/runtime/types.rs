pub const CUSTOM_ATTRIBUTES_HEADER: &str = "x-amzn-sagemaker-custom-attributes";
pub const INVOKED_VARIANT_HEADER: &str = "x-amzn-invoked-production-variant";

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeEndpointRequest {
    pub endpoint_name: String,
    pub content_type: String,
    pub accept: Option<String>,
    pub custom_attributes: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeEndpointResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub invoked_production_variant: Option<String>,
    pub custom_attributes: Option<String>,
    pub body: Vec<u8>,
}

impl InvokeEndpointResponse {
    /// Response with a 200 status and no metadata.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: None,
            invoked_production_variant: None,
            custom_attributes: None,
            body: body.into(),
        }
    }
}
