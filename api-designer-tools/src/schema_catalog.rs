use crate::models::{Field, Table};
use crate::seed::seed_tables;

/// The tables and fields that are available when designing interfaces.
///
/// There is no live database connection, so the catalog is built from a fixed set of
/// tables. Every table remembers which data source it belongs to.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct SchemaCatalog {
    tables: Vec<Table>,
}

impl SchemaCatalog {
    pub fn new(tables: Vec<Table>) -> Self {
        SchemaCatalog { tables }
    }

    /// The catalog of the sample shop database.
    pub fn seeded() -> Self {
        Self::new(seed_tables())
    }

    /// All tables in catalog order. Calling this repeatedly always gives the same result.
    pub fn list_tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn find_table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Finds the table that owns the field by scanning all tables in order.
    /// The first match wins.
    pub fn find_field_owner(&self, field_id: &str) -> Option<(&Table, &Field)> {
        self.tables
            .iter()
            .find_map(|t| t.find_field(field_id).map(|f| (t, f)))
    }

    pub fn tables_for_data_source<'a>(&'a self, data_source_id: &'a str) -> impl Iterator<Item = &'a Table> + 'a {
        self.tables.iter().filter(move |t| t.data_source_id == data_source_id)
    }
}
