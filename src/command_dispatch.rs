//! Purpose: Execute parsed `idcat` subcommands.
//! Role: Keeps per-command behavior out of `main.rs` argument and error plumbing.
//! Invariants: Each arm emits at most one JSON document and returns errors unprinted.
use super::*;

pub(super) fn dispatch_command(command: Command) -> Result<(), Error> {
    match command {
        Command::Token(args) => {
            let result = read_input(&args.input)?;
            let token = result.extract_token()?;
            emit_json(&json!({ "token": token_json(&token)? }));
            Ok(())
        }
        Command::Catalog(args) => {
            let result = read_input(&args.input)?;
            let catalog = result.extract_service_catalog()?;
            emit_json(&json!({ "catalog": catalog_json(&catalog) }));
            Ok(())
        }
        Command::Resolve(args) => {
            let query = args.query();
            let result = read_input(&args.input.input)?;
            let catalog = result.extract_service_catalog()?;
            let url = locate_endpoint_url(&catalog, &query)?;
            emit_json(&json!({ "url": url }));
            Ok(())
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "idcat", &mut io::stdout());
            Ok(())
        }
    }
}
