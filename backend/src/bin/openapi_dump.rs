//! Print the OpenAPI document as JSON.

use std::io;

use clap::Parser;
use ludivault::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the ludivault OpenAPI document",
    version
)]
struct CliArgs {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
