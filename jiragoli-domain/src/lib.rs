use std::fmt;

use chrono::{DateTime, FixedOffset};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub profile_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub description: String,
    pub labels: Vec<String>,
    pub assignee: User,
    pub reporter: User,
    pub issue_url: Url,
    /// `None` when the server omitted the timestamp; sorts before any real one.
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub status: Status,
}

/// How a caller names the project whose issues it wants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectRef {
    /// Numeric project id, used as-is without checking the project list.
    ById(u64),
    /// Case-insensitive prefix of a project name.
    ByName(String),
}

impl ProjectRef {
    /// Treats a value made only of ASCII digits as an id, anything else as a name.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse() {
                return Self::ById(id);
            }
        }
        Self::ByName(trimmed.to_string())
    }
}

impl From<u64> for ProjectRef {
    fn from(id: u64) -> Self {
        Self::ById(id)
    }
}

impl From<&str> for ProjectRef {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_string())
    }
}

impl From<String> for ProjectRef {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "{id}"),
            Self::ByName(name) => write!(f, "{name:?}"),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = format!("{} ({})", title_case(&self.name), self.email);
        f.write_str(rendered.trim())
    }
}

pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_unstable_by(|left, right| left.name.cmp(&right.name));
}

pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_unstable_by(|left, right| left.created_at.cmp(&right.created_at));
}

// Words break on anything that is not alphanumeric or `_`, so dotted and
// hyphenated user names capitalize each part.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}
