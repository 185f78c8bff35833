// src/config.rs
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::model::SearchField;
use crate::types::{BaseUrl, Resource};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: CatalogCommand,

    /// Root of the upstream catalog API
    #[arg(long, global = true, env = "SWAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Give up on full scans after this many seconds and print what was gathered
    #[arg(long, global = true)]
    pub scan_deadline_secs: Option<u64>,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output_file: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    /// List one page of a resource, or all of it without --page/--size
    List {
        /// films, people, starships or vehicles
        resource: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Fetch a single record by uid
    Get { resource: String, uid: String },
    /// Case-insensitive substring search over every record of a resource
    Search {
        resource: String,
        #[command(flatten)]
        terms: SearchTerms,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Let the upstream filter by name or model, then match locally
    Lookup {
        resource: String,
        #[command(flatten)]
        terms: SearchTerms,
        #[command(flatten)]
        paging: PagingArgs,
    },
}

/// One-based page selection.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagingArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long)]
    pub size: Option<u32>,
}

impl PagingArgs {
    /// Both flags or neither; one alone is rejected instead of silently
    /// listing everything.
    fn checked(self) -> Result<Self, AppError> {
        match (self.page, self.size) {
            (Some(_), None) => Err(AppError::Validation(
                "--page needs --size as well".to_string(),
            )),
            (None, Some(_)) => Err(AppError::Validation(
                "--size needs --page as well".to_string(),
            )),
            _ => Ok(self),
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub title: Option<String>,
}

impl SearchTerms {
    /// The single field and term given. Several at once, or none, is rejected.
    pub fn resolve(&self) -> Result<(SearchField, String), AppError> {
        let given: Vec<(SearchField, &String)> = [
            (SearchField::Name, self.name.as_ref()),
            (SearchField::Model, self.model.as_ref()),
            (SearchField::Title, self.title.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, term)| term.map(|t| (field, t)))
        .collect();

        match given.as_slice() {
            [(field, term)] => Ok((*field, (*term).clone())),
            [] => Err(AppError::Validation(
                "one of --name, --model or --title is required".to_string(),
            )),
            _ => Err(AppError::Validation(
                "search by only one field at a time".to_string(),
            )),
        }
    }
}

/// What the binary was asked to do, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List {
        resource: Resource,
        paging: PagingArgs,
    },
    Get {
        resource: Resource,
        uid: String,
    },
    Search {
        resource: Resource,
        field: SearchField,
        term: String,
        paging: PagingArgs,
    },
    Lookup {
        resource: Resource,
        field: SearchField,
        term: String,
        paging: PagingArgs,
    },
}

impl Operation {
    fn resolve(command: CatalogCommand) -> Result<Self, AppError> {
        Ok(match command {
            CatalogCommand::List { resource, paging } => Operation::List {
                resource: resource.parse()?,
                paging: paging.checked()?,
            },
            CatalogCommand::Get { resource, uid } => Operation::Get {
                resource: resource.parse()?,
                uid,
            },
            CatalogCommand::Search {
                resource,
                terms,
                paging,
            } => {
                let (field, term) = terms.resolve()?;
                Operation::Search {
                    resource: resource.parse()?,
                    field,
                    term,
                    paging: paging.checked()?,
                }
            }
            CatalogCommand::Lookup {
                resource,
                terms,
                paging,
            } => {
                let (field, term) = terms.resolve()?;
                if field == SearchField::Title {
                    return Err(AppError::Validation(
                        "lookup supports --name or --model; use search for titles".to_string(),
                    ));
                }
                Operation::Lookup {
                    resource: resource.parse()?,
                    field,
                    term,
                    paging: paging.checked()?,
                }
            }
        })
    }
}

/// Resolved configuration for one run of the bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: BaseUrl,
    pub request_timeout: Duration,
    pub scan_deadline: Option<Duration>,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub operation: Operation,
}

impl BridgeConfig {
    /// Resolves a complete configuration from CLI input.
    ///
    /// The environment has already been consulted by clap for the base URL.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        if cli.timeout_secs == 0 {
            return Err(AppError::Validation(
                "--timeout-secs must be greater than zero".to_string(),
            ));
        }

        Ok(BridgeConfig {
            base_url: BaseUrl::parse(&cli.base_url)?,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            scan_deadline: cli.scan_deadline_secs.map(Duration::from_secs),
            output_file: cli.output_file.map(PathBuf::from),
            verbose: cli.verbose,
            operation: Operation::resolve(cli.command)?,
        })
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            scan_deadline: None,
            output_file: None,
            verbose: false,
            operation: Operation::List {
                resource: Resource::Films,
                paging: PagingArgs::default(),
            },
        }
    }
}

impl BridgeConfig {
    fn default_base_url() -> BaseUrl {
        BaseUrl::parse(DEFAULT_BASE_URL).expect("Default base URL should always be valid")
    }
}
