use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::ApiDesignerError;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ApiDesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ApiDesignerError::InvalidValue {
                kind: "http method",
                value: s.to_string(),
            }),
        }
    }
}

/// The persisted form of a field that was picked into a request or response shape.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedField {
    pub id: String,
    pub field_id: String,
    pub table_id: String,
    pub data_source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInterface {
    pub id: String,
    pub project_id: String,
    pub category_id: String,
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_params: Vec<SelectedField>,
    #[serde(default)]
    pub response_params: Vec<SelectedField>,
    /// Main table of the request shape when the design was last saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_main_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_main_table: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The user supplied part of an interface, as entered in the create/edit form.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct InterfaceDraft {
    pub project_id: String,
    pub category_id: String,
    pub name: String,
    pub path: String,
    pub method: HttpMethod,
    pub description: String,
}

impl InterfaceDraft {
    pub fn new(project_id: &str, category_id: &str, name: &str, method: HttpMethod, path: &str) -> Self {
        InterfaceDraft {
            project_id: project_id.to_string(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            method,
            description: String::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}
