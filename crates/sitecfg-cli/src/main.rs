//! `sitecfg` command-line tool

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sitecfg_core::ComponentRef;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::ResolveArgs;

fn cli() -> Command {
    Command::new("sitecfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Schema-driven component configuration tools")
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Log filter, e.g. `debug` or `sitecfg_locator=debug`"),
        )
        .subcommand(
            Command::new("check")
                .about("Load a schema and report authoring defects")
                .arg(path_arg("schema", "Schema file (.json, .yaml or .yml)")),
        )
        .subcommand(
            Command::new("defaults")
                .about("Print the default data of a variant")
                .arg(path_arg("schema", "Schema file (.json, .yaml or .yml)"))
                .arg(Arg::new("type").required(true).help("Component type"))
                .arg(Arg::new("variant").required(true).help("Variant id")),
        )
        .subcommand(
            Command::new("locate")
                .about("Print an instance's persisted data from a site configuration")
                .arg(path_arg("site", "Site configuration JSON file"))
                .arg(Arg::new("type").required(true).help("Component type"))
                .arg(Arg::new("id").required(true).help("Instance id"))
                .arg(trace_arg("Report skipped records and duplicate matches on stderr")),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve the merged configuration of an instance")
                .arg(
                    Arg::new("schema")
                        .long("schema")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Schema file"),
                )
                .arg(
                    Arg::new("site-dir")
                        .long("site-dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding <tenant>.json files"),
                )
                .arg(Arg::new("tenant").long("tenant").required(true).help("Tenant id"))
                .arg(Arg::new("type").long("type").required(true).help("Component type"))
                .arg(Arg::new("variant").long("variant").required(true).help("Variant id"))
                .arg(Arg::new("id").long("id").required(true).help("Instance id"))
                .arg(Arg::new("props").long("props").help("Props as inline JSON"))
                .arg(Arg::new("live").long("live").help("Live edit as inline JSON"))
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Engine configuration TOML"),
                )
                .arg(trace_arg("Print provenance of every key")),
        )
}

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn trace_arg(help: &'static str) -> Arg {
    Arg::new("trace").long("trace").action(ArgAction::SetTrue).help(help)
}

fn string<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing argument '{name}'"))
}

fn path(args: &ArgMatches, name: &str) -> Result<PathBuf> {
    args.get_one::<PathBuf>(name)
        .cloned()
        .with_context(|| format!("missing argument '{name}'"))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = matches.get_one::<String>("log-level").map_or("warn", String::as_str);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(subcommand = ?matches.subcommand_name(), "starting");

    match matches.subcommand() {
        Some(("check", args)) => {
            println!("{}", commands::check(&path(args, "schema")?)?);
        }
        Some(("defaults", args)) => {
            let defaults = commands::defaults(
                &path(args, "schema")?,
                string(args, "type")?,
                string(args, "variant")?,
            )?;
            print_json(&defaults)?;
        }
        Some(("locate", args)) => {
            let data = commands::locate(
                &path(args, "site")?,
                string(args, "type")?,
                string(args, "id")?,
                args.get_flag("trace"),
            )?;
            print_json(&data)?;
        }
        Some(("resolve", args)) => {
            let resolve = ResolveArgs {
                schema: path(args, "schema")?,
                site_dir: path(args, "site-dir")?,
                tenant: string(args, "tenant")?.to_string(),
                component: ComponentRef::new(
                    string(args, "type")?,
                    string(args, "variant")?,
                    string(args, "id")?,
                ),
                props: commands::parse_inline(
                    "props",
                    args.get_one::<String>("props").map(String::as_str),
                )?,
                live: args
                    .get_one::<String>("live")
                    .map(|live| commands::parse_inline("live", Some(live)))
                    .transpose()?,
                config: args.get_one::<PathBuf>("config").cloned(),
                trace: args.get_flag("trace"),
            };
            print_json(&commands::resolve(resolve).await?)?;
        }
        other => anyhow::bail!("unknown subcommand: {:?}", other.map(|(name, _)| name)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_resolve() {
        let matches = cli()
            .try_get_matches_from([
                "sitecfg",
                "resolve",
                "--schema",
                "s.yaml",
                "--site-dir",
                "sites",
                "--tenant",
                "acme",
                "--type",
                "hero",
                "--variant",
                "hero1",
                "--id",
                "h",
                "--trace",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "resolve");
        assert_eq!(string(args, "tenant").unwrap(), "acme");
        assert!(args.get_flag("trace"));
        assert!(args.get_one::<String>("props").is_none());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["sitecfg"]).is_err());
    }
}
