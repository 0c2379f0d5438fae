use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The kind of database a data source points at. Decides the default type mappings and port.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Mysql,
    Postgresql,
    Sqlite,
    Oracle,
}

impl DatabaseKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mysql" => Some(DatabaseKind::Mysql),
            "postgresql" => Some(DatabaseKind::Postgresql),
            "sqlite" => Some(DatabaseKind::Sqlite),
            "oracle" => Some(DatabaseKind::Oracle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Sqlite => "sqlite",
            DatabaseKind::Oracle => "oracle",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseKind::Mysql => 3306,
            DatabaseKind::Postgresql => 5432,
            DatabaseKind::Sqlite => 0,
            DatabaseKind::Oracle => 1521,
        }
    }

    /// Sqlite is file based, so there is no host or user to connect with.
    pub fn is_networked(&self) -> bool {
        !matches!(self, DatabaseKind::Sqlite)
    }
}

impl Display for DatabaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    Error,
}

/// Translates a raw database column type into a type name in the target language.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapping {
    pub id: String,
    pub db_type: String,
    pub code_type: String,
    pub language: String,
}

impl TypeMapping {
    pub fn new(id: &str, db_type: &str, code_type: &str, language: &str) -> Self {
        TypeMapping {
            id: id.to_string(),
            db_type: db_type.to_string(),
            code_type: code_type.to_string(),
            language: language.to_string(),
        }
    }
}

/// A description of a database connection. Nothing ever connects to it, the connection test is simulated.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// User edited mappings. Empty means the defaults for `kind` apply.
    #[serde(default)]
    pub type_mappings: Vec<TypeMapping>,
}

/// The user supplied part of a data source, as entered in the create/edit form.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct DataSourceDraft {
    pub project_id: String,
    pub name: String,
    pub kind: DatabaseKind,
    pub host: String,
    /// `None` picks the default port of `kind`.
    pub port: Option<u16>,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DataSourceDraft {
    pub fn new(project_id: &str, name: &str, kind: DatabaseKind) -> Self {
        DataSourceDraft {
            project_id: project_id.to_string(),
            name: name.to_string(),
            kind,
            host: String::new(),
            port: None,
            database: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn connection(mut self, host: &str, database: &str, username: &str, password: &str) -> Self {
        self.host = host.to_string();
        self.database = database.to_string();
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }
}
