use crate::{
    PlanAction, PlanActionRequest, PlanId, SiteSearchQuery, responses,
};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Header the backend checks for its CSRF token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    /// URL of a server-rendered page route such as a form action.
    fn format_page_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", &self.address, path.trim_start_matches('/'))
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    /// A urlencoded form post to a page route, as a browser form would send.
    fn page_form_request(
        &self,
        path: &str,
        csrf_token: Option<&str>,
        body: &impl Serialize,
    ) -> reqwest::RequestBuilder {
        let mut request =
            self.inner_client.post(self.format_page_url(path)).form(body);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    async fn page_multipart_post(
        &self,
        path: &str,
        csrf_token: Option<&str>,
        form: reqwest::multipart::Form,
    ) -> ReqwestResult {
        let mut request = self
            .inner_client
            .post(self.format_page_url(path))
            .multipart(form);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Search sites by code, name or location.
    pub async fn search_sites(
        &self,
        query: &SiteSearchQuery,
    ) -> Result<responses::SiteSearchResults, ClientError> {
        let response = self.get_with_query("sites/search", query).await?;
        ok_body(response).await
    }

    /// Save the form in the background. `fields` are the form's fields in
    /// document order; `auto_save=true` is appended so the backend keeps the
    /// plan as a draft.
    pub async fn save_draft(
        &self,
        form_action: &str,
        csrf_token: Option<&str>,
        fields: Vec<(&'static str, String)>,
    ) -> Result<responses::DraftSaved, ClientError> {
        let response = self
            .page_multipart_post(
                form_action,
                csrf_token,
                draft_form(fields, csrf_token),
            )
            .await?;
        ok_body(response).await
    }

    /// Approve or reject a submitted plan.
    pub async fn plan_action(
        &self,
        plan_id: PlanId,
        action: PlanAction,
        csrf_token: Option<&str>,
        details: &PlanActionRequest,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let path = format!("plans/{plan_id}/{}", action.path_segment());
        let response = self
            .page_form_request(&path, csrf_token, details)
            .send()
            .await?;
        ok_body(response).await
    }
}

fn draft_form(
    fields: Vec<(&'static str, String)>,
    csrf_token: Option<&str>,
) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in draft_fields(fields, csrf_token) {
        form = form.text(name, value);
    }
    form
}

/// Fields sent by an autosave, in the order they are written.
pub fn draft_fields(
    mut fields: Vec<(&'static str, String)>,
    csrf_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    if let Some(token) = csrf_token {
        fields.insert(0, ("csrf_token", token.to_string()));
    }
    fields.push(("auto_save", "true".to_string()));
    fields
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The `message` carried by a JSON error body, or `fallback` when there
    /// is none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::APIError(_, body) => {
                serde_json::from_str::<responses::SuccessMessage>(body)
                    .ok()
                    .map(|body| body.message)
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string())
            }
            Self::Network(_) => fallback.to_string(),
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> APIClient {
        APIClient {
            address: "https://ops.example.com".to_string(),
            inner_client: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(
            client.format_url("sites/search"),
            "https://ops.example.com/api/sites/search"
        );
        assert_eq!(
            client.format_page_url("/plans/new"),
            "https://ops.example.com/plans/new"
        );
        assert_eq!(
            client.format_page_url("https://other.example.com/plans/4/edit"),
            "https://other.example.com/plans/4/edit"
        );
    }

    #[test]
    fn test_error_message_from_body() {
        let err = ClientError::APIError(
            StatusCode::FORBIDDEN,
            r#"{"message": "Only TSEL admin can reject plans"}"#.to_string(),
        );
        assert_eq!(
            err.user_message("Action failed"),
            "Only TSEL admin can reject plans"
        );
    }

    #[test]
    fn test_error_message_fallback() {
        let html = ClientError::APIError(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>".to_string(),
        );
        assert_eq!(html.user_message("Action failed"), "Action failed");

        let blank = ClientError::APIError(
            StatusCode::BAD_REQUEST,
            r#"{"message": ""}"#.to_string(),
        );
        assert_eq!(blank.user_message("Action failed"), "Action failed");
    }

    fn form_body(request: &reqwest::Request) -> &[u8] {
        request.body().and_then(|body| body.as_bytes()).unwrap_or_default()
    }

    #[test]
    fn test_plan_action_is_form_encoded() {
        let details = PlanActionRequest::reject("Site is flooded").unwrap();
        let request = client()
            .page_form_request("plans/7/reject", Some("tok"), &details)
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://ops.example.com/plans/7/reject");
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(request.headers()[CSRF_HEADER], "tok");
        assert_eq!(form_body(&request), b"reason=Site+is+flooded");
    }

    #[test]
    fn test_approve_sends_no_reason() {
        let request = client()
            .page_form_request("plans/7/approve", None, &PlanActionRequest::approve())
            .build()
            .unwrap();

        assert!(request.headers().get(CSRF_HEADER).is_none());
        assert_eq!(form_body(&request), b"");
    }

    #[test]
    fn test_draft_fields_mark_autosave() {
        let fields = draft_fields(
            vec![("plan_date", "2026-10-20".to_string())],
            Some("tok"),
        );
        assert_eq!(
            fields,
            vec![
                ("csrf_token", "tok".to_string()),
                ("plan_date", "2026-10-20".to_string()),
                ("auto_save", "true".to_string()),
            ]
        );
    }
}
