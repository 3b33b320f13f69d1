use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured résumé record accepted by the PDF service.
///
/// Entries under education / experience / projects / awards are free-form objects
/// (institution, degree, company, role, ...); the service decides how to lay them out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Value>,
    #[serde(default)]
    pub experience: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub awards: Vec<Value>,
}

impl ResumeData {
    /// True when there is nothing for the service to render.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty())
            && self.summary.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.skills.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.awards.is_empty()
    }
}
