//! Configuration: YAML schema and CLI argument definitions

mod cli;
mod schema;

pub use cli::{
    BuildDatasetArgs, Cli, Command, InfoArgs, InspectArgs, LoadArgs, PredictArgs, TrainArgs,
};
pub use schema::{load_config, Config, SourceConfig, DEFAULT_CONFIG_FILE};
