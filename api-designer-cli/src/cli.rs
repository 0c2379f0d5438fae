use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
/// Design API interfaces on top of database schema metadata, and generate Java boilerplate for them.
///
/// Everything is stored as JSON files in the store directory. Nothing ever connects to a real database.
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// The directory projects, data sources, categories and interfaces are stored in.
    /// It is created on the first change.
    #[arg(long, env = "API_DESIGNER_STORE_DIR", default_value = ".api-designer", global = true)]
    pub store_dir: PathBuf,

    /// The user id changes are made as. Commands that change something check the role of this
    /// user in the affected project.
    #[arg(long, env = "API_DESIGNER_USER", global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the tables and fields in the schema catalog
    Tables {
        /// Only show the tables of this data source
        #[arg(long)]
        data_source: Option<String>,
    },
    /// Show the type mappings that apply to a data source
    Mappings {
        #[arg(long)]
        data_source: String,
    },
    /// Throw away edited type mappings and go back to the defaults of the database kind
    ResetMappings {
        #[arg(long)]
        data_source: String,

        /// Confirm the reset. Without this nothing is changed.
        #[arg(long)]
        yes: bool,
    },
    /// Show the interface categories of a project as a tree
    Categories {
        #[arg(long, env = "API_DESIGNER_PROJECT")]
        project: String,
    },
    /// List the interfaces of a project
    Interfaces {
        #[arg(long, env = "API_DESIGNER_PROJECT")]
        project: String,

        /// Only show interfaces in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Generate request/response classes and a controller for an interface
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long)]
    pub interface: String,

    /// Field ids to include in the request, e.g. `users.id`. When no fields or main tables
    /// are given, the design saved on the interface is used.
    #[arg(long = "request", value_name = "FIELD_ID")]
    pub request_fields: Vec<String>,

    /// The table whose fields become top level attributes of the request
    #[arg(long, value_name = "TABLE_ID")]
    pub request_main: Option<String>,

    /// Field ids to include in the response
    #[arg(long = "response", value_name = "FIELD_ID")]
    pub response_fields: Vec<String>,

    /// The table whose fields become top level attributes of the response
    #[arg(long, value_name = "TABLE_ID")]
    pub response_main: Option<String>,

    /// Write the code to this file instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Store the selection on the interface. Needs `--user`.
    #[arg(long)]
    pub save: bool,
}

impl GenerateArgs {
    pub(crate) fn has_selection(&self) -> bool {
        !self.request_fields.is_empty()
            || !self.response_fields.is_empty()
            || self.request_main.is_some()
            || self.response_main.is_some()
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}
