use serde::{Deserialize, Serialize};

/// A table as known by the schema catalog. Tables are never changed after they have been loaded.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub data_source_id: String,
    pub fields: Vec<Field>,
}

impl Table {
    pub fn new(id: &str, name: &str, data_source_id: &str) -> Self {
        Table {
            id: id.to_string(),
            name: name.to_string(),
            data_source_id: data_source_id.to_string(),
            ..crate::default()
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn find_field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    /// The raw type name as reported by the database, e.g. `varchar`.
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
}

impl Field {
    pub fn new(id: &str, name: &str, data_type: &str) -> Self {
        Field {
            id: id.to_string(),
            name: name.to_string(),
            data_type: data_type.to_string(),
            nullable: true,
            ..crate::default()
        }
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn foreign_key(mut self) -> Self {
        self.is_foreign_key = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// The type as it would be written in a column definition, e.g. `varchar(50)`.
    pub fn display_type(&self) -> String {
        match self.length {
            Some(length) => format!("{}({})", self.data_type, length),
            None => self.data_type.clone(),
        }
    }
}
