mod executor;
pub mod fsm;

pub use executor::{Invocation, invoke_model, write_body};
pub use fsm::{InvocationEvent, InvocationState, InvocationStateMachine};

use crate::{
    Result,
    config::Config,
    runtime::{HttpRuntimeClient, InvokeEndpointResponse},
};
use tracing::info;

/// Builds the runtime client from configuration and performs the configured invocation.
pub async fn run(config: &Config) -> Result<InvokeEndpointResponse> {
    let client = HttpRuntimeClient::new(config.runtime.clone())?;
    let invocation = Invocation::from_config(&config.invocation).await?;

    info!(
        "Invoking endpoint '{}' via {}",
        invocation.endpoint_reference,
        client.base_url()
    );

    invoke_model(&client, &invocation).await
}
