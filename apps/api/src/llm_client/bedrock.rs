//! Amazon Bedrock backend for `InferenceEndpoint`, using the Converse API.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_bedrockruntime::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::converse::{ConverseError, ConverseOutput},
    types::{ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock},
    Client,
};
use tracing::info;

use super::{InferenceEndpoint, InferenceError, InferenceReply, InferenceRequest};

const AUTH_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "ExpiredTokenException",
    "InvalidSignatureException",
    "AccessDeniedException",
];

#[derive(Clone)]
pub struct BedrockEndpoint {
    client: Client,
}

impl BedrockEndpoint {
    /// Builds a Bedrock runtime client from the shared AWS config chain
    /// (environment, profile files, instance metadata) for a region and profile.
    pub async fn connect(region: &str, profile: &str, timeout: Option<Duration>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .profile_name(profile);
        if let Some(timeout) = timeout {
            loader = loader.timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
        }
        let sdk_config = loader.load().await;

        info!("Bedrock runtime client configured (region: {region}, profile: {profile})");
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl InferenceEndpoint for BedrockEndpoint {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceReply, InferenceError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.prompt.clone()))
            .build()
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        let inference_config = InferenceConfiguration::builder()
            .max_tokens(request.max_tokens)
            .temperature(request.temperature)
            .top_p(request.top_p)
            .build();

        let mut call = self
            .client
            .converse()
            .model_id(&request.model_id)
            .messages(message)
            .inference_config(inference_config);
        if let Some(system) = &request.system {
            call = call.system(SystemContentBlock::Text(system.clone()));
        }

        let output = call.send().await.map_err(classify_sdk_error)?;
        reply_from_output(&output)
    }
}

fn reply_from_output(output: &ConverseOutput) -> Result<InferenceReply, InferenceError> {
    let message = output
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| InferenceError::MalformedResponse("no message in Converse output".to_string()))?;

    let text: String = message
        .content()
        .iter()
        .filter_map(|block| block.as_text().ok())
        .map(String::as_str)
        .collect();

    if text.is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    let usage = output.usage();
    Ok(InferenceReply {
        text,
        input_tokens: usage.map(|u| u.input_tokens()),
        output_tokens: usage.map(|u| u.output_tokens()),
    })
}

fn classify_sdk_error(err: SdkError<ConverseError>) -> InferenceError {
    let detail = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::TimeoutError(_) => return InferenceError::Transport(detail),
        // Missing or unloadable credentials surface before the request is sent.
        SdkError::DispatchFailure(_) | SdkError::ConstructionFailure(_)
            if detail.to_lowercase().contains("credential") =>
        {
            return InferenceError::Auth(detail)
        }
        SdkError::DispatchFailure(_) => return InferenceError::Transport(detail),
        _ => {}
    }

    let service_error = err.into_service_error();
    match service_error {
        ConverseError::AccessDeniedException(_) => InferenceError::Auth(detail),
        ConverseError::ThrottlingException(_) => InferenceError::Throttled(detail),
        ConverseError::ModelTimeoutException(_) => InferenceError::Transport(detail),
        other => {
            let code = other.code().unwrap_or("Unknown").to_string();
            if AUTH_ERROR_CODES.contains(&code.as_str()) {
                InferenceError::Auth(detail)
            } else if code == "ThrottlingException" || code == "TooManyRequestsException" {
                InferenceError::Throttled(detail)
            } else {
                InferenceError::Api {
                    code,
                    message: detail,
                }
            }
        }
    }
}
