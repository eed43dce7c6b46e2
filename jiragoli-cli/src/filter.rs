use jiragoli_domain::Issue;

use crate::{cli_args::IssuesArgs, utils::contains_ignore_case};

/// Client-side narrowing of fetched issues; every set criterion must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueFilter {
    assignee: Option<String>,
    reporter: Option<String>,
    status: Option<String>,
}

impl IssueFilter {
    pub fn new(assignee: Option<&str>, reporter: Option<&str>, status: Option<&str>) -> Self {
        Self {
            assignee: assignee.and_then(criterion),
            reporter: reporter.and_then(criterion),
            status: status.and_then(criterion),
        }
    }

    pub fn from_args(args: &IssuesArgs) -> Self {
        Self::new(
            args.assignee.as_deref(),
            args.reporter.as_deref(),
            args.status.as_deref(),
        )
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        field_matches(self.assignee.as_deref(), &issue.assignee.name)
            && field_matches(self.reporter.as_deref(), &issue.reporter.name)
            && field_matches(self.status.as_deref(), &issue.status.name)
    }

    pub fn apply<'a>(&self, issues: &'a [Issue]) -> Vec<&'a Issue> {
        issues.iter().filter(|issue| self.matches(issue)).collect()
    }
}

fn criterion(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(needle) => contains_ignore_case(actual, needle),
        None => true,
    }
}
