mod class_builder;
mod controller;

use std::collections::HashSet;
use tracing::{instrument, warn};
use crate::helpers::{strip_whitespace, to_pascal_case};
use crate::models::{ApiInterface, TypeMapping};
use crate::schema_catalog::SchemaCatalog;
use crate::selection::{DesignerSelection, ShapeKind, TableSelection};

pub use class_builder::JavaClassBuilder;

/// The language tag a user mapping needs to be used by the generator.
pub const JAVA_LANGUAGE: &str = "java";

/// Options that control how the code is generated.
#[derive(Debug, Clone, Default)]
pub struct CodeGenOptions {
    /// User mappings consulted before the built-in Java types. Only mappings tagged with
    /// [JAVA_LANGUAGE] are used.
    pub type_overrides: Vec<TypeMapping>,
}

/// The Java type the generator uses for a raw database type when no override applies.
pub fn builtin_java_type(db_type: &str) -> &'static str {
    match db_type.to_lowercase().as_str() {
        "varchar" | "text" => "String",
        "int" | "integer" => "Integer",
        "bigint" => "Long",
        "decimal" => "BigDecimal",
        "timestamp" | "datetime" => "Date",
        "boolean" => "Boolean",
        _ => "Object",
    }
}

/// Generates request/response classes and a controller stub for an interface design.
pub struct CodeGenerator<'c> {
    catalog: &'c SchemaCatalog,
    options: CodeGenOptions,
}

impl<'c> CodeGenerator<'c> {
    pub fn new(catalog: &'c SchemaCatalog) -> Self {
        Self::with_options(catalog, CodeGenOptions::default())
    }

    pub fn with_options(catalog: &'c SchemaCatalog, options: CodeGenOptions) -> Self {
        Self { catalog, options }
    }

    fn java_type(&self, db_type: &str) -> String {
        let overrides = self
            .options
            .type_overrides
            .iter()
            .filter(|m| m.language.eq_ignore_ascii_case(JAVA_LANGUAGE));

        overrides
            .clone()
            .find(|m| m.db_type == db_type)
            .or_else(|| overrides.clone().find(|m| m.db_type.eq_ignore_ascii_case(db_type)))
            .map(|m| m.code_type.clone())
            .unwrap_or_else(|| builtin_java_type(db_type).to_string())
    }

    /// Generates the complete source for the interface.
    ///
    /// The output is, in order: a doc header, the request class and its nested classes,
    /// the response class and its nested classes, and the controller. A shape without
    /// selected fields gets a placeholder comment instead of a class.
    #[instrument(skip_all, fields(interface = %interface.id))]
    pub fn generate(&self, interface: &ApiInterface, selection: &DesignerSelection) -> String {
        let base_name = to_pascal_case(&strip_whitespace(&interface.name));

        let mut sections = vec![format!(
            "/**\n * {} - {}\n * {} {}\n */",
            interface.name, interface.description, interface.method, interface.path
        )];

        for shape in [ShapeKind::Request, ShapeKind::Response] {
            sections.extend(self.generate_shape(&base_name, shape, selection));
        }

        sections.push(controller::generate_controller(interface, &base_name));

        let mut code = sections.join("\n\n");
        code.push('\n');
        code
    }

    fn generate_shape(&self, base_name: &str, shape: ShapeKind, selection: &DesignerSelection) -> Vec<String> {
        let groups = selection.group_selected_by_table(shape, self.catalog);

        if groups.is_empty() {
            return vec![format!("// No {} fields selected", shape.name())];
        }

        let main_table = selection.shape(shape).main_table();
        let (main, nested): (Vec<_>, Vec<_>) = groups
            .iter()
            .partition(|g| Some(g.table.id.as_str()) == main_table);

        let nested_names = nested_class_names(&nested);

        let class_name = format!("{base_name}{}", class_suffix(shape));
        let mut builder = JavaClassBuilder::new(&class_name);

        for group in &main {
            for field in &group.fields {
                builder.attribute(&self.java_type(&field.data_type), &field.name, field.comment.as_deref());
            }
        }

        for (group, nested_name) in nested.iter().zip(&nested_names) {
            builder.attribute(nested_name, &group.table.name, group.table.comment.as_deref());
        }

        let mut classes = vec![builder.build()];

        for (group, nested_name) in nested.iter().zip(&nested_names) {
            let mut nested_builder = JavaClassBuilder::new(nested_name);
            nested_builder.comment(group.table.comment.as_deref().unwrap_or(&group.table.name));

            for field in &group.fields {
                nested_builder.attribute(&self.java_type(&field.data_type), &field.name, field.comment.as_deref());
            }

            classes.push(nested_builder.build());
        }

        classes
    }
}

fn class_suffix(shape: ShapeKind) -> &'static str {
    match shape {
        ShapeKind::Request => "Request",
        ShapeKind::Response => "Response",
    }
}

/// Names the nested classes after their tables. Tables whose names collide get a numeric suffix.
fn nested_class_names(nested: &[&TableSelection]) -> Vec<String> {
    let mut used = HashSet::new();

    nested
        .iter()
        .map(|group| {
            let base = to_pascal_case(&group.table.name);
            let mut name = base.clone();
            let mut counter = 2;
            while !used.insert(name.clone()) {
                name = format!("{base}{counter}");
                counter += 1;
            }
            if name != base {
                warn!(table = %group.table.id, class = %name, "Nested class name collides with another table, using a suffixed name");
            }
            name
        })
        .collect()
}

#[cfg(test)]
mod tests;
