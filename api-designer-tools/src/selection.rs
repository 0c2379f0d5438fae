use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter};
use crate::models::{ApiInterface, Field, SelectedField, Table};
use crate::schema_catalog::SchemaCatalog;
use crate::{ApiDesignerError, Result};

/// The two independent parameter sets of an interface.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ShapeKind {
    Request,
    Response,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Request => "request",
            ShapeKind::Response => "response",
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The fields picked for one shape, plus the table whose fields become top level attributes.
///
/// Only selected fields are stored, so toggling a field on and off again gives back
/// a set equal to the one before.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct SelectionSet {
    selected: BTreeSet<String>,
    main_table: Option<String>,
}

/// The selected fields of a single table, in catalog order.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TableSelection<'a> {
    pub table: &'a Table,
    pub fields: Vec<&'a Field>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum SelectionWarning {
    /// Fields are selected but no table is marked as main, so every table ends up nested.
    MissingMainTable { shape: ShapeKind },
    /// The main table has none of its fields selected, so the top level type has no plain attributes.
    MainTableWithoutFields { shape: ShapeKind, table_id: String },
}

impl Display for SelectionWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionWarning::MissingMainTable { shape } => {
                write!(f, "Fields are selected for the {shape}, but no main table has been chosen")
            }
            SelectionWarning::MainTableWithoutFields { shape, table_id } => {
                write!(f, "The {shape} main table '{table_id}' has no selected fields")
            }
        }
    }
}

impl SelectionSet {
    /// Flips the selection of a field. Returns whether the field is selected afterwards.
    pub fn toggle_field(&mut self, field_id: &str) -> bool {
        if self.selected.remove(field_id) {
            false
        } else {
            self.selected.insert(field_id.to_string());
            true
        }
    }

    pub fn is_selected(&self, field_id: &str) -> bool {
        self.selected.contains(field_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Replaces the main table. `None` or an empty id clears it.
    pub fn set_main_table(&mut self, table_id: Option<&str>) {
        self.main_table = table_id.filter(|t| !t.is_empty()).map(|t| t.to_string());
    }

    pub fn main_table(&self) -> Option<&str> {
        self.main_table.as_deref()
    }

    /// Groups the selected fields by the table that owns them.
    ///
    /// Tables come out in catalog order and only when they have at least one selected field.
    /// Selected ids that no table owns are dropped.
    pub fn group_selected_by_table<'c>(&self, catalog: &'c SchemaCatalog) -> Vec<TableSelection<'c>> {
        let mut claimed = HashSet::new();
        let mut groups = vec![];

        for table in catalog.list_tables() {
            let fields = table
                .fields
                .iter()
                .filter(|f| self.selected.contains(&f.id) && claimed.insert(f.id.as_str()))
                .collect::<Vec<_>>();

            if !fields.is_empty() {
                groups.push(TableSelection { table, fields });
            }
        }

        groups
    }

    fn warnings(&self, shape: ShapeKind, catalog: &SchemaCatalog) -> Vec<SelectionWarning> {
        if self.selected.is_empty() {
            return vec![];
        }

        match &self.main_table {
            None => vec![SelectionWarning::MissingMainTable { shape }],
            Some(main) => {
                let has_fields = self
                    .group_selected_by_table(catalog)
                    .iter()
                    .any(|g| &g.table.id == main);
                if has_fields {
                    vec![]
                } else {
                    vec![SelectionWarning::MainTableWithoutFields {
                        shape,
                        table_id: main.clone(),
                    }]
                }
            }
        }
    }

    /// Turns the selection into the records that are persisted on an interface.
    pub fn to_selected_fields(&self, shape: ShapeKind, catalog: &SchemaCatalog) -> Vec<SelectedField> {
        self.group_selected_by_table(catalog)
            .into_iter()
            .flat_map(|group| {
                group.fields.into_iter().map(move |field| SelectedField {
                    id: format!("{}:{}", shape.name(), field.id),
                    field_id: field.id.clone(),
                    table_id: group.table.id.clone(),
                    data_source_id: group.table.data_source_id.clone(),
                    alias: None,
                    required: !field.nullable,
                    validation: None,
                })
            })
            .collect()
    }

    fn from_selected_fields(fields: &[SelectedField], main_table: Option<&str>) -> Self {
        let mut set = SelectionSet {
            selected: fields.iter().map(|f| f.field_id.clone()).collect(),
            main_table: None,
        };
        set.set_main_table(main_table);
        set
    }
}

/// The working state of the interface designer: one selection per shape kind.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct DesignerSelection {
    request: SelectionSet,
    response: SelectionSet,
}

impl DesignerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the selection that was last saved on the interface.
    pub fn from_interface(interface: &ApiInterface) -> Self {
        DesignerSelection {
            request: SelectionSet::from_selected_fields(&interface.request_params, interface.request_main_table.as_deref()),
            response: SelectionSet::from_selected_fields(&interface.response_params, interface.response_main_table.as_deref()),
        }
    }

    pub fn shape(&self, shape: ShapeKind) -> &SelectionSet {
        match shape {
            ShapeKind::Request => &self.request,
            ShapeKind::Response => &self.response,
        }
    }

    fn shape_mut(&mut self, shape: ShapeKind) -> &mut SelectionSet {
        match shape {
            ShapeKind::Request => &mut self.request,
            ShapeKind::Response => &mut self.response,
        }
    }

    /// Flips a field in one shape. The other shape is never touched.
    pub fn toggle_field(&mut self, field_id: &str, shape: ShapeKind) -> bool {
        self.shape_mut(shape).toggle_field(field_id)
    }

    /// Marks a table as main for one shape. The table has to exist in the catalog,
    /// but it does not need any selected fields.
    pub fn set_main_table(&mut self, table_id: &str, shape: ShapeKind, catalog: &SchemaCatalog) -> Result {
        if table_id.is_empty() {
            self.clear_main_table(shape);
            return Ok(());
        }

        if catalog.find_table(table_id).is_none() {
            return Err(ApiDesignerError::not_found("Table", table_id));
        }

        self.shape_mut(shape).set_main_table(Some(table_id));
        Ok(())
    }

    pub fn clear_main_table(&mut self, shape: ShapeKind) {
        self.shape_mut(shape).set_main_table(None);
    }

    pub fn group_selected_by_table<'c>(&self, shape: ShapeKind, catalog: &'c SchemaCatalog) -> Vec<TableSelection<'c>> {
        self.shape(shape).group_selected_by_table(catalog)
    }

    /// Problems to show as a banner. None of them block saving or generating code.
    pub fn warnings(&self, catalog: &SchemaCatalog) -> Vec<SelectionWarning> {
        let mut warnings = self.request.warnings(ShapeKind::Request, catalog);
        warnings.extend(self.response.warnings(ShapeKind::Response, catalog));
        warnings
    }
}
