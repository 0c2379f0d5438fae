use std::borrow::Cow;
use tracing::debug;
use crate::confirmation::{Confirmation, Outcome};
use crate::helpers::new_id;
use crate::models::{DataSource, DatabaseKind, TypeMapping};
use crate::{ApiDesignerError, Result};

/// What `resolve` gives back for a database type that no mapping covers.
pub const UNTYPED: &str = "any";

/// The language the built-in mappings are written for.
pub const DEFAULT_LANGUAGE: &str = "typescript";

/// The built-in mappings for a database kind.
pub fn default_mappings(kind: DatabaseKind) -> Vec<TypeMapping> {
    let entries: &[(&str, &str)] = match kind {
        DatabaseKind::Mysql => &[
            ("varchar", "string"),
            ("int", "number"),
            ("bigint", "number"),
            ("decimal", "number"),
            ("text", "string"),
            ("timestamp", "Date"),
            ("datetime", "Date"),
            ("boolean", "boolean"),
        ],
        DatabaseKind::Postgresql => &[
            ("varchar", "string"),
            ("integer", "number"),
            ("bigint", "number"),
            ("numeric", "number"),
            ("text", "string"),
            ("timestamp", "Date"),
            ("timestamptz", "Date"),
            ("boolean", "boolean"),
            ("uuid", "string"),
        ],
        DatabaseKind::Sqlite => &[
            ("TEXT", "string"),
            ("INTEGER", "number"),
            ("REAL", "number"),
            ("BLOB", "Uint8Array"),
        ],
        DatabaseKind::Oracle => &[
            ("VARCHAR2", "string"),
            ("NUMBER", "number"),
            ("DATE", "Date"),
            ("TIMESTAMP", "Date"),
            ("CLOB", "string"),
        ],
    };

    entries
        .iter()
        .enumerate()
        .map(|(idx, (db_type, code_type))| TypeMapping::new(&(idx + 1).to_string(), db_type, code_type, DEFAULT_LANGUAGE))
        .collect()
}

/// Same as [default_mappings], but for a kind given by name. Unknown kinds have no defaults.
pub fn default_mappings_for_name(kind: &str) -> Vec<TypeMapping> {
    DatabaseKind::from_name(kind)
        .map(default_mappings)
        .unwrap_or_default()
}

/// Translates a database type using the given mappings.
///
/// An exact match is preferred, after that the first case-insensitive match is used.
/// Types without any match resolve to [UNTYPED].
pub fn resolve<'a>(db_type: &str, mappings: &'a [TypeMapping]) -> &'a str {
    mappings
        .iter()
        .find(|m| m.db_type == db_type)
        .or_else(|| mappings.iter().find(|m| m.db_type.eq_ignore_ascii_case(db_type)))
        .map(|m| m.code_type.as_str())
        .unwrap_or(UNTYPED)
}

/// Which part of a mapping an edit changes.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum MappingField {
    DbType,
    CodeType,
    Language,
}

impl DataSource {
    /// The mappings the mapping editor shows: the stored ones, or the defaults of the
    /// data source kind when nothing has been stored yet.
    pub fn effective_type_mappings(&self) -> Cow<'_, [TypeMapping]> {
        if self.type_mappings.is_empty() {
            Cow::Owned(default_mappings(self.kind))
        } else {
            Cow::Borrowed(&self.type_mappings)
        }
    }

    pub fn resolve_type(&self, db_type: &str) -> String {
        resolve(db_type, &self.effective_type_mappings()).to_string()
    }

    /// Edits start from what the editor shows, so the defaults are materialized first.
    fn editable_type_mappings(&mut self) -> &mut Vec<TypeMapping> {
        if self.type_mappings.is_empty() {
            debug!(data_source = %self.id, kind = %self.kind, "Materializing default type mappings before edit");
            self.type_mappings = default_mappings(self.kind);
        }
        &mut self.type_mappings
    }

    /// Appends an empty mapping and returns its id.
    pub fn add_type_mapping(&mut self) -> String {
        let id = new_id();
        self.editable_type_mappings().push(TypeMapping::new(&id, "", "", DEFAULT_LANGUAGE));
        id
    }

    pub fn update_type_mapping(&mut self, mapping_id: &str, field: MappingField, value: &str) -> Result {
        let mapping = self
            .editable_type_mappings()
            .iter_mut()
            .find(|m| m.id == mapping_id)
            .ok_or_else(|| ApiDesignerError::not_found("Type mapping", mapping_id))?;

        let target = match field {
            MappingField::DbType => &mut mapping.db_type,
            MappingField::CodeType => &mut mapping.code_type,
            MappingField::Language => &mut mapping.language,
        };
        *target = value.to_string();

        Ok(())
    }

    pub fn delete_type_mapping(&mut self, mapping_id: &str) -> Result {
        let mappings = self.editable_type_mappings();
        let position = mappings
            .iter()
            .position(|m| m.id == mapping_id)
            .ok_or_else(|| ApiDesignerError::not_found("Type mapping", mapping_id))?;
        mappings.remove(position);
        Ok(())
    }

    /// Throws away every edit and goes back to the defaults of the data source kind.
    pub fn reset_type_mappings(&mut self, confirmation: Confirmation) -> Outcome {
        match confirmation {
            Confirmation::Declined => Outcome::Declined,
            Confirmation::Confirmed => {
                self.type_mappings = default_mappings(self.kind);
                Outcome::Applied
            }
        }
    }
}
