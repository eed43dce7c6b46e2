use jiragoli_domain::{Issue, Project};

use crate::utils::quoted_list_or_dash;

/// One text block per issue, terminated by a blank line.
pub fn issue_lines(issue: &Issue) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", issue.key, issue.summary),
        format!("Status: {}", issue.status.name.to_uppercase()),
        format!("Reported by: {}", issue.reporter),
    ];

    if !issue.assignee.name.is_empty() {
        lines.push(format!("Assigned to: {}", issue.assignee));
    }

    lines.push(format!("Labels: {}", quoted_list_or_dash(&issue.labels)));
    lines.push(format!("Permalink: {:?}", issue.issue_url.as_str()));
    lines.push(String::new());
    lines
}

pub fn project_line(project: &Project) -> String {
    format!("{:<12} {:>8}  {}", project.key, project.id, project.name)
}

pub fn total_line(count: usize) -> String {
    format!("Total matching issues found: {count}")
}
