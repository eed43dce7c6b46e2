use std::{fmt, time::Duration};

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use jiragoli_config::JiragoliConfig;
use jiragoli_domain::{sort_issues, sort_projects, Issue, Project, ProjectRef, Status, User};
use log::debug;
use reqwest::{
    blocking::{Client, RequestBuilder},
    StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use url::{form_urlencoded, Url};

mod error;

pub use error::JiraError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: Option<String>,
}

/// Blocking client for the JIRA REST API.
///
/// The project list is fetched once when the client is built and doubles as
/// the credentials check; it stays sorted by name for the client's lifetime.
pub struct JiraClient {
    http: Client,
    endpoint: Url,
    auth: Option<BasicAuth>,
    projects: Vec<Project>,
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("user", &self.auth.as_ref().map(|auth| auth.user.as_str()))
            .field("projects", &self.projects)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ProjectPayload {
    id: String,
    #[serde(default)]
    key: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct SearchPayload {
    #[serde(default)]
    issues: Vec<IssuePayload>,
}

#[derive(Deserialize)]
struct IssuePayload {
    key: String,
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Default, Deserialize)]
struct IssueFields {
    summary: Option<String>,
    description: Option<Value>,
    labels: Option<Vec<String>>,
    assignee: Option<UserLike>,
    reporter: Option<UserLike>,
    status: Option<StatusLike>,
    created: Option<String>,
    updated: Option<String>,
}

#[derive(Default, Deserialize)]
struct UserLike {
    name: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    #[serde(rename = "emailAddress")]
    email_address: Option<String>,
    #[serde(rename = "self")]
    self_url: Option<String>,
}

#[derive(Default, Deserialize)]
struct StatusLike {
    name: Option<String>,
    description: Option<String>,
}

/// Transport used when the caller has no client of its own to inject.
pub fn default_http_client() -> Result<Client, JiraError> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(JiraError::Transport)
}

impl JiraClient {
    /// Parses `jira_url`, then lists projects with the given credentials.
    ///
    /// Fails with [`JiraError::Parse`] for a malformed URL and with
    /// [`JiraError::Auth`] when the project listing cannot be fetched or
    /// decoded.
    pub fn connect(
        auth: Option<BasicAuth>,
        jira_url: &str,
        http: Client,
    ) -> Result<Self, JiraError> {
        let endpoint = Url::parse(jira_url.trim())?;

        let mut client = Self {
            http,
            endpoint,
            auth,
            projects: Vec::new(),
        };

        let mut projects = client.fetch_projects().map_err(JiraError::auth)?;
        sort_projects(&mut projects);
        debug!("authenticated against jira, {} projects visible", projects.len());

        client.projects = projects;
        Ok(client)
    }

    pub fn from_config(config: &JiragoliConfig, http: Client) -> Result<Self> {
        let credentials = config.require_credentials()?;
        let server = config.require_server()?;
        let auth = BasicAuth {
            user: credentials.user,
            password: Some(credentials.password),
        };

        Ok(Self::connect(Some(auth), server, http)?)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches every issue of a project, oldest first.
    ///
    /// An unresolvable project yields [`JiraError::InvalidProjectRef`]
    /// without touching the network. A project with no issues is not an
    /// error.
    pub fn issues(&self, project: &ProjectRef) -> Result<Vec<Issue>, JiraError> {
        let query = self
            .query_string(project)
            .ok_or_else(|| JiraError::InvalidProjectRef(project.clone()))?;

        let mut url = self.endpoint_url("search");
        url.set_query(Some(&query));

        let body = self.get(url)?;
        let payload: SearchPayload = serde_json::from_str(&body)?;

        let mut issues = Vec::with_capacity(payload.issues.len());
        for entry in payload.issues {
            let issue_url = self.browse_url(&entry.key)?;
            issues.push(into_issue(entry, issue_url));
        }

        sort_issues(&mut issues);
        Ok(issues)
    }

    /// Encoded `jql=project=<id>` filter for `project`, or `None` when a
    /// name matches no cached project.
    ///
    /// Names match as a case-insensitive prefix; the first project in name
    /// order wins.
    pub fn query_string(&self, project: &ProjectRef) -> Option<String> {
        let jql = match project {
            ProjectRef::ById(id) => format!("project={id}"),
            ProjectRef::ByName(name) => {
                let wanted = name.to_lowercase();
                let found = self
                    .projects
                    .iter()
                    .find(|candidate| candidate.name.to_lowercase().starts_with(&wanted))?;
                format!("project={}", found.id)
            }
        };

        Some(
            form_urlencoded::Serializer::new(String::new())
                .append_pair("jql", &jql)
                .finish(),
        )
    }

    fn fetch_projects(&self) -> Result<Vec<Project>, JiraError> {
        let body = self.get(self.endpoint_url("project"))?;
        let payload: Vec<ProjectPayload> = serde_json::from_str(&body)?;
        Ok(payload.into_iter().map(into_project).collect())
    }

    fn get(&self, url: Url) -> Result<String, JiraError> {
        debug!("GET {}", url.path());
        let response = self.with_auth(self.http.get(url)).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(JiraError::Status(status));
        }

        Ok(response.text()?)
    }

    fn endpoint_url(&self, segment: &str) -> Url {
        let mut url = self.endpoint.clone();
        let path = format!("{}/{}", self.endpoint.path().trim_end_matches('/'), segment);
        url.set_path(&path);
        url.set_query(None);
        url
    }

    fn browse_url(&self, key: &str) -> Result<Url, JiraError> {
        let host = self.endpoint.host_str().unwrap_or_default();
        let authority = match self.endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Url::parse(&format!(
            "{}://{}/browse/{}",
            self.endpoint.scheme(),
            authority,
            key
        ))?)
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.user, auth.password.as_ref()),
            None => request,
        }
    }
}

fn into_project(payload: ProjectPayload) -> Project {
    Project {
        id: payload.id,
        key: payload.key,
        name: payload.name,
    }
}

fn into_issue(payload: IssuePayload, issue_url: Url) -> Issue {
    let fields = payload.fields;
    Issue {
        key: payload.key,
        summary: fields.summary.unwrap_or_default(),
        description: description_text(fields.description),
        labels: fields.labels.unwrap_or_default(),
        assignee: fields.assignee.map(into_user).unwrap_or_default(),
        reporter: fields.reporter.map(into_user).unwrap_or_default(),
        issue_url,
        created_at: fields.created.as_deref().and_then(parse_timestamp),
        updated_at: fields.updated.as_deref().and_then(parse_timestamp),
        status: fields.status.map(into_status).unwrap_or_default(),
    }
}

fn into_user(payload: UserLike) -> User {
    User {
        name: payload.name.or(payload.display_name).unwrap_or_default(),
        email: payload.email_address.unwrap_or_default(),
        profile_url: payload.self_url.unwrap_or_default(),
    }
}

fn into_status(payload: StatusLike) -> Status {
    Status {
        name: payload.name.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

// API v2 sends plain text, v3 sends an ADF document.
fn description_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        Some(doc @ Value::Object(_)) => {
            let mut out = String::new();
            collect_adf_text(&doc, &mut out);
            out.trim().to_string()
        }
        _ => String::new(),
    }
}

fn collect_adf_text(node: &Value, out: &mut String) {
    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();
    if node_type == "text" {
        if let Some(text) = node.get("text").and_then(Value::as_str) {
            out.push_str(text);
        }
        return;
    }
    if node_type == "hardBreak" {
        out.push('\n');
        return;
    }

    for child in node
        .get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        collect_adf_text(child, out);
    }

    if matches!(node_type, "paragraph" | "heading" | "blockquote" | "listItem") {
        out.push('\n');
    }
}
