use txlens_client::commands;
use txlens_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Columns { path, .. } => commands::columns::run(path.clone(), config_path),
        Commands::Filter {
            path,
            where_clauses,
            range_clauses,
            output,
            ..
        } => commands::filter::run(
            path.clone(),
            where_clauses.clone(),
            range_clauses.clone(),
            output.clone(),
            config_path,
        ),
        Commands::Balances {
            path, year, month, ..
        } => commands::balances::run(path.clone(), *year, *month, config_path),
    }
}
