use std::{future::Future, process::ExitCode};

use serde::Serialize;
use serde_json::json;

use crate::error::ScriptError;

/// Envelope every script prints as its final line on stdout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ToolResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

pub fn create_error_response(err: &anyhow::Error) -> ToolResponse<()> {
    ToolResponse {
        success: false,
        message: format!("{err:#}"),
        data: None,
    }
}

/// Print the envelope as one JSON line.
pub fn send_to_llm<T: Serialize>(response: &ToolResponse<T>) {
    match serde_json::to_string(response) {
        Ok(line) => println!("{line}"),
        Err(e) => println!(
            "{}",
            json!({ "success": false, "message": format!("failed to serialize response: {e}") })
        ),
    }
}

/// Await a script body and turn its outcome into the envelope and an exit code.
pub async fn run_script<T, F>(script: F) -> ExitCode
where
    T: Serialize,
    F: Future<Output = anyhow::Result<ToolResponse<T>>>,
{
    if report(script.await) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print the outcome; `true` when the script succeeded.
fn report<T: Serialize>(outcome: anyhow::Result<ToolResponse<T>>) -> bool {
    match outcome {
        Ok(response) => {
            send_to_llm(&response);
            true
        }
        Err(err) => {
            report_details(&err);
            send_to_llm(&create_error_response(&err));
            false
        }
    }
}

fn report_details(err: &anyhow::Error) {
    match err.downcast_ref::<ScriptError>() {
        Some(ScriptError::Usage { usage, example, .. }) => {
            eprintln!("{usage}");
            eprintln!("{example}");
        }
        Some(ScriptError::Rejected { error, reason, reason_data, .. }) => {
            eprintln!("Transaction failed to broadcast");
            eprintln!("Error: {error}");
            if let Some(reason) = reason {
                eprintln!("Reason: {reason}");
            }
            if let Some(data) = reason_data {
                let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
                eprintln!("Reason Data: {pretty}");
            }
        }
        _ => log::debug!("script failed: {err:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn envelope_omits_missing_data() {
        let line = serde_json::to_string(&ToolResponse::<()>::message("done")).unwrap();
        assert_eq!(line, r#"{"success":true,"message":"done"}"#);

        let line = serde_json::to_string(&ToolResponse::ok("txid", "abc")).unwrap();
        assert_eq!(line, r#"{"success":true,"message":"txid","data":"abc"}"#);
    }

    #[test]
    fn error_response_carries_context_chain() {
        let err = Err::<(), _>(ScriptError::MissingEnv("MNEMONIC"))
            .context("failed to derive account")
            .unwrap_err();
        let response = create_error_response(&err);
        assert!(!response.success);
        assert_eq!(
            response.message,
            "failed to derive account: MNEMONIC environment variable is required"
        );
    }

    #[test]
    fn report_reflects_outcome() {
        assert!(report(Ok(ToolResponse::<()>::message("fine"))));
        let failed: anyhow::Result<ToolResponse<()>> = Err(ScriptError::validation("bad input").into());
        assert!(!report(failed));
    }
}
