use jiragoli_domain::ProjectRef;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("error parsing jira url: {0}")]
    Parse(#[from] url::ParseError),

    /// The project listing done at construction time failed; wraps the cause.
    #[error("request to jira for auth failed: {0}")]
    Auth(#[source] Box<JiraError>),

    #[error("request to jira failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("error response: {0}")]
    Status(StatusCode),

    #[error("error decoding jira response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("project {0} does not match any id or project name")]
    InvalidProjectRef(ProjectRef),
}

impl JiraError {
    pub fn is_invalid_project_ref(&self) -> bool {
        matches!(self, JiraError::InvalidProjectRef(_))
    }

    pub(crate) fn auth(cause: JiraError) -> Self {
        JiraError::Auth(Box::new(cause))
    }
}
