use std::io::Write;
use api_designer_tools::{
    ApiDesignerError, CategoryNode, CodeGenOptions, CodeGenerator, Confirmation, DesignerSelection, JsonDirectoryStore,
    KeyValueStore, Outcome, Result, SchemaCatalog, ShapeKind, Workspace, JAVA_LANGUAGE,
};
use clap::Parser;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;
use crate::cli::{Cli, Commands, GenerateArgs};

mod cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    run(cli, &mut stdout)?;

    Ok(())
}

#[instrument(skip_all)]
fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let catalog = SchemaCatalog::seeded();
    let mut workspace = Workspace::load(JsonDirectoryStore::new(&cli.store_dir));

    match cli.command {
        Commands::Tables { data_source } => {
            list_tables(&catalog, data_source.as_deref(), out)?;
        }
        Commands::Mappings { data_source } => {
            let data_source = workspace.data_source(&data_source)?;
            writeln!(out, "{} ({})", data_source.name, data_source.kind)?;
            for mapping in data_source.effective_type_mappings().iter() {
                writeln!(out, "    {} -> {} [{}]", mapping.db_type, mapping.code_type, mapping.language)?;
            }
        }
        Commands::ResetMappings { data_source, yes } => {
            let user = acting_user(cli.user.as_deref())?;
            match workspace.reset_type_mappings(&data_source, user, Confirmation::from_bool(yes))? {
                Outcome::Applied => writeln!(out, "Type mappings of data source '{data_source}' were reset")?,
                Outcome::Declined => writeln!(out, "Type mappings left unchanged, pass --yes to reset them")?,
            }
        }
        Commands::Categories { project } => {
            workspace.project(&project)?;
            for node in workspace.category_tree(&project) {
                write_category(&node, 0, out)?;
            }
        }
        Commands::Interfaces { project, category } => {
            workspace.project(&project)?;
            for interface in workspace.list_interfaces(&project, category.as_deref()) {
                writeln!(out, "{}\t{} {}\t{}", interface.id, interface.method, interface.path, interface.name)?;
            }
        }
        Commands::Generate(args) => {
            generate(&mut workspace, &catalog, args, cli.user.as_deref(), out)?;
        }
    }

    Ok(())
}

fn acting_user(user: Option<&str>) -> Result<&str> {
    user.ok_or_else(|| ApiDesignerError::Validation {
        field: "user",
        message: "this command changes the store, pass --user or set API_DESIGNER_USER".to_string(),
    })
}

fn write_category(node: &CategoryNode, depth: usize, out: &mut impl Write) -> Result<()> {
    let category = node.category;
    writeln!(out, "{}{}\t{}", "    ".repeat(depth), category.id, category.name)?;

    for child in &node.children {
        write_category(child, depth + 1, out)?;
    }

    Ok(())
}

fn list_tables(catalog: &SchemaCatalog, data_source: Option<&str>, out: &mut impl Write) -> Result<()> {
    let tables = catalog
        .list_tables()
        .iter()
        .filter(|t| data_source.map_or(true, |d| t.data_source_id == d));

    for table in tables {
        match &table.comment {
            Some(comment) => writeln!(out, "{} - {}", table.id, comment)?,
            None => writeln!(out, "{}", table.id)?,
        }

        for field in &table.fields {
            let mut line = format!("    {}: {}", field.id, field.display_type());
            if !field.nullable {
                line.push_str(" not null");
            }
            if field.is_primary_key {
                line.push_str(" primary key");
            }
            if field.is_foreign_key {
                line.push_str(" foreign key");
            }
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}

fn selection_from_args(args: &GenerateArgs, catalog: &SchemaCatalog) -> Result<DesignerSelection> {
    let mut selection = DesignerSelection::new();

    for (shape, fields, main_table) in [
        (ShapeKind::Request, &args.request_fields, &args.request_main),
        (ShapeKind::Response, &args.response_fields, &args.response_main),
    ] {
        for field_id in fields {
            if catalog.find_field_owner(field_id).is_none() {
                return Err(ApiDesignerError::NotFound { kind: "Field", id: field_id.clone() });
            }
            if !selection.shape(shape).is_selected(field_id) {
                selection.toggle_field(field_id, shape);
            }
        }

        if let Some(main_table) = main_table {
            selection.set_main_table(main_table, shape, catalog)?;
        }
    }

    Ok(selection)
}

#[instrument(skip_all, fields(interface = %args.interface))]
fn generate<S: KeyValueStore>(
    workspace: &mut Workspace<S>,
    catalog: &SchemaCatalog,
    args: GenerateArgs,
    user: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let saving_as = if args.save { Some(acting_user(user)?) } else { None };
    let interface = workspace.interface(&args.interface)?;

    let selection = if args.has_selection() {
        selection_from_args(&args, catalog)?
    } else {
        DesignerSelection::from_interface(interface)
    };

    for warning in selection.warnings(catalog) {
        warn!("{warning}");
    }

    let type_overrides = workspace
        .data_sources_for_project(&interface.project_id)
        .flat_map(|d| d.type_mappings.iter())
        .filter(|m| m.language.eq_ignore_ascii_case(JAVA_LANGUAGE))
        .cloned()
        .collect();

    let generator = CodeGenerator::with_options(catalog, CodeGenOptions { type_overrides });
    let code = generator.generate(interface, &selection);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &code)?;
            info!(path = %path.display(), "Wrote generated code");
        }
        None => out.write_all(code.as_bytes())?,
    }

    if let Some(user) = saving_as {
        workspace.save_design(&args.interface, user, &selection, catalog)?;
        info!("Saved design on interface");
    }

    Ok(())
}
