//! Command handlers. Each returns the JSON document printed on stdout.

use crate::cli::{Command, PromptArgs};
use crate::error::CliError;
use crate::settings::Settings;

use chatglm_core::{ChatGlmClient, ChatGlmClientError, Credential, sign_token};
use common::ErrorLocation;
use models::{InvokeRequest, InvokeRequestBuilder, ModelError};

use std::panic::Location;

use log::info;
use serde::Serialize;
use serde_json::{Value, json};

/// Run `command` with `settings`.
pub async fn execute(command: &Command, settings: &Settings) -> Result<Value, CliError> {
    match command {
        Command::Token => token(settings),
        Command::Invoke(args) => {
            let client = ChatGlmClient::new(&settings.client)?;
            let response = client
                .sync_invoke(model_for(args, settings), &build_request(args)?)
                .await?;
            to_output(&response)
        }
        Command::AsyncInvoke(args) => {
            let client = ChatGlmClient::new(&settings.client)?;
            let response = client
                .async_invoke(model_for(args, settings), &build_request(args)?)
                .await?;
            if let Some(task_id) = response.task_id() {
                info!("Submitted task {task_id}");
            }
            to_output(&response)
        }
        Command::Query { task_id } => {
            let client = ChatGlmClient::new(&settings.client)?;
            let response = client.async_invoke_task_query(task_id).await?;
            if let Some(status) = response.task_status() {
                info!("Task {task_id} status: {status:?}");
            }
            to_output(&response)
        }
        Command::Sse(args) => {
            let client = ChatGlmClient::new(&settings.client)?;
            let response = client
                .sse_invoke(model_for(args, settings), &build_request(args)?)
                .await?;
            to_output(&response)
        }
    }
}

/// Request body for a prompt command. A request id is generated when none is given.
pub fn build_request(args: &PromptArgs) -> Result<InvokeRequest, ModelError> {
    let mut builder = InvokeRequestBuilder::default().with_user(args.prompt.clone());

    if let Some(temperature) = args.temperature {
        builder = builder.with_temperature(temperature);
    }
    if let Some(top_p) = args.top_p {
        builder = builder.with_top_p(top_p);
    }
    builder = match &args.request_id {
        Some(request_id) => builder.with_request_id(request_id.clone()),
        None => builder.with_generated_request_id(),
    };

    builder.build()
}

fn model_for<'a>(args: &'a PromptArgs, settings: &'a Settings) -> &'a str {
    args.model.as_deref().unwrap_or(&settings.model)
}

fn token(settings: &Settings) -> Result<Value, CliError> {
    let credential = Credential::parse(settings.client.api_key.expose_secret())
        .map_err(ChatGlmClientError::from)?;
    let token = sign_token(&credential).map_err(ChatGlmClientError::from)?;

    Ok(json!({
        "token": token.as_str(),
        "claims": token.claims(),
    }))
}

#[track_caller]
fn to_output<T: Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::Output {
        message: format!("Failed to render response: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
