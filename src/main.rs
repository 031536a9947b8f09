//! Purpose: `idcat` CLI entry point for inspecting saved authentication responses.
//! Role: Binary crate root; parses args, decodes input, emits JSON on stdout.
//! Invariants: Successful commands print exactly one JSON document on stdout.
//! Invariants: Errors are emitted on stderr (JSON when not a terminal).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{
    Args, CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use identity_catalog::api::{
    CreateResult, EndpointQuery, Error, ErrorKind, Visibility, locate_endpoint_url, to_exit_code,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod catalog_json;
mod command_dispatch;

use catalog_json::{catalog_json, endpoint_json, token_json};

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(exit_code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `idcat --help`."));
            }
        },
    };

    command_dispatch::dispatch_command(cli.command)
        .map_err(add_query_hint)
        .map_err(add_input_hint)?;
    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "idcat",
    version,
    about = "Inspect identity-service authentication responses",
    long_about = None,
    after_help = r#"EXAMPLES
  $ idcat token auth.json
  $ idcat catalog auth.json
  $ idcat resolve auth.json --type compute --region DFW
  $ curl -s ... | idcat resolve --type object-store --visibility internal"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token (id, expiry, tenant) from an authentication response.
    Token(InputArgs),
    /// Print the service catalog from an authentication response.
    Catalog(InputArgs),
    /// Resolve exactly one endpoint URL from the service catalog.
    #[command(after_help = r#"NOTES
  Fails with exit code 3 when nothing matches and 4 when several endpoints
  match; narrow the query with --name or --region."#)]
    Resolve(ResolveArgs),
    /// Print a completion script for the given shell to stdout.
    Completions {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(
        default_value = "-",
        help = "Path to a saved response body, or - for stdin",
        value_hint = ValueHint::FilePath
    )]
    input: PathBuf,
}

#[derive(Args)]
struct ResolveArgs {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long = "type", help = "Service type to match exactly (e.g. compute)")]
    service_type: String,
    #[arg(long, help = "Provider-assigned service name to match exactly")]
    name: Option<String>,
    #[arg(long, help = "Region to match exactly")]
    region: Option<String>,
    #[arg(
        long,
        default_value = "public",
        help = "Which URL to return: public|internal|admin"
    )]
    visibility: String,
}

impl ResolveArgs {
    fn query(&self) -> EndpointQuery {
        let mut query = EndpointQuery::new(self.service_type.as_str())
            .with_visibility(Visibility::parse(&self.visibility));
        if let Some(name) = &self.name {
            query = query.with_name(name.as_str());
        }
        if let Some(region) = &self.region {
            query = query.with_region(region.as_str());
        }
        query
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: &Path) -> Result<CreateResult, Error> {
    let mut body = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut body).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read response from stdin")
                .with_source(err)
        })?;
    } else {
        body = fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read response file {}", path.display()))
                .with_source(err)
        })?;
    }
    tracing::debug!(bytes = body.len(), "read authentication response");
    Ok(CreateResult::from_json_str(&body))
}

fn emit_json(value: &Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Io\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::EndpointNotFound => "endpoint not found".to_string(),
        ErrorKind::AmbiguousEndpoint => "ambiguous endpoint".to_string(),
        ErrorKind::InvalidVisibility => "invalid visibility".to_string(),
        ErrorKind::Decode => "response did not decode".to_string(),
        ErrorKind::Format => "invalid field format".to_string(),
        ErrorKind::Upstream => "upstream error".to_string(),
        ErrorKind::InvalidUrl => "invalid endpoint url".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if !err.matches().is_empty() {
        inner.insert("count".to_string(), json!(err.match_count()));
        let matches: Vec<Value> = err.matches().iter().map(endpoint_json).collect();
        inner.insert("matches".to_string(), Value::Array(matches));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(field) = err.field() {
        lines.push(format!("field: {field}"));
    }
    for endpoint in err.matches() {
        lines.push(format!(
            "match: region={:?} publicURL={:?}",
            endpoint.region, endpoint.public_url
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn add_query_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::EndpointNotFound || err.hint().is_some() {
        return err;
    }
    err.with_hint("Check --type against `idcat catalog`, or drop --name/--region.")
}

fn add_input_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Decode => err.with_hint(
            "Input must be the JSON body of a v2 token response: {\"access\": {...}}.",
        ),
        ErrorKind::Format => {
            err.with_hint("Token expiry must look like 2024-01-02T03:04:05.678Z.")
        }
        ErrorKind::Io => err.with_hint("Check the input path, or pass - to read stdin."),
        _ => err,
    }
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
