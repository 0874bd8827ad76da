use gloo::net::http::Request;
use shared::submission::{FormTransport, ProviderResponse, SubmissionError, SubmissionPayload};
use web_sys::FormData;

use super::dom::js_error;

/// Posts the payload as multipart form data and reads the provider's JSON reply
#[derive(Clone, Copy, Default)]
pub struct FormRelayClient;

impl FormTransport for FormRelayClient {
    async fn post(&self, payload: &SubmissionPayload) -> Result<ProviderResponse, SubmissionError> {
        let form_data = FormData::new().map_err(|e| SubmissionError::Transport(js_error(&e)))?;
        for (name, value) in &payload.fields {
            form_data
                .append_with_str(name, value)
                .map_err(|e| SubmissionError::Transport(js_error(&e)))?;
        }

        let response = Request::post(&payload.endpoint)
            .body(form_data)
            .map_err(|e| SubmissionError::Transport(format!("Failed to build request: {e}")))?
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(format!("Network error: {e}")))?;

        if !response.ok() {
            return Err(SubmissionError::Transport(format!(
                "Server error {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<ProviderResponse>()
            .await
            .map_err(|e| SubmissionError::Transport(format!("Failed to parse response: {e}")))
    }
}
