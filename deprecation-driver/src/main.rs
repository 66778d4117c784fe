//! Deprecation notice driver
//!
//! Previews the notices a library would emit. Without `--json` the notice
//! goes through the same log sink a library would use; with `--json` it is
//! captured and printed as a JSON record instead.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use deprecation_handler::{
    ArgumentDeprecation, AttributeDeprecation, ClassDeprecation, DeprecationHandler,
    DeprecationRequest, LogSink, MethodDeprecation, RecordingSink, WarningPolicy,
};
use log::debug;

#[derive(Parser)]
#[command(name = "deprecate")]
#[command(about = "Preview deprecation notices")]
#[command(version)]
struct Cli {
    /// Package the notices are raised on behalf of
    #[arg(short, long, global = true, default_value = "deprecate")]
    package: String,

    /// Warning policy when logging (default, always, once, ignore, error); falls back to DEPRECATION_WARNINGS
    #[arg(long, global = true, conflicts_with = "json")]
    policy: Option<WarningPolicy>,

    /// Print the emitted warning as JSON instead of logging it
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every kind of notice
#[derive(Args)]
struct Common {
    /// Use this text instead of a generated notice
    #[arg(short, long)]
    message: Option<String>,

    /// Version the item will be removed in
    #[arg(short, long)]
    remove_version: Option<String>,

    /// Explicit stack level instead of inferring one
    #[arg(short, long)]
    stack_level: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deprecate an argument of a method
    Argument {
        /// The deprecated argument
        name: Option<String>,

        /// Method the argument belongs to
        #[arg(long)]
        method: Option<String>,

        /// Argument replacing the deprecated one
        #[arg(long)]
        replacement: Option<String>,

        #[command(flatten)]
        common: Common,
    },

    /// Deprecate an attribute of a class
    Attribute {
        /// The deprecated attribute
        name: Option<String>,

        /// Class the attribute belongs to
        #[arg(long)]
        class: Option<String>,

        /// Attribute replacing the deprecated one
        #[arg(long)]
        replacement: Option<String>,

        #[command(flatten)]
        common: Common,
    },

    /// Deprecate a class
    Class {
        /// The deprecated class
        name: Option<String>,

        /// Class replacing the deprecated one
        #[arg(long)]
        replacement: Option<String>,

        #[command(flatten)]
        common: Common,
    },

    /// Deprecate a method of a class
    Method {
        /// The deprecated method
        name: Option<String>,

        /// Class the method belongs to
        #[arg(long)]
        class: Option<String>,

        /// Method replacing the deprecated one
        #[arg(long)]
        replacement: Option<String>,

        #[command(flatten)]
        common: Common,
    },
}

impl Commands {
    fn into_request(self) -> DeprecationRequest {
        match self {
            Commands::Argument { name, method, replacement, common } => ArgumentDeprecation {
                argument_name: name,
                method_name: method,
                new_argument_name: replacement,
                message: common.message,
                remove_version: common.remove_version,
                stack_level: common.stack_level,
            }
            .into(),
            Commands::Attribute { name, class, replacement, common } => AttributeDeprecation {
                attribute_name: name,
                class_name: class,
                new_attribute_name: replacement,
                message: common.message,
                remove_version: common.remove_version,
                stack_level: common.stack_level,
            }
            .into(),
            Commands::Class { name, replacement, common } => ClassDeprecation {
                class_name: name,
                new_class_name: replacement,
                message: common.message,
                remove_version: common.remove_version,
                stack_level: common.stack_level,
            }
            .into(),
            Commands::Method { name, class, replacement, common } => MethodDeprecation {
                method_name: name,
                class_name: class,
                new_method_name: replacement,
                message: common.message,
                remove_version: common.remove_version,
                stack_level: common.stack_level,
            }
            .into(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let request = cli.command.into_request();
    debug!("request: {:?}", request);

    if cli.json {
        let handler = DeprecationHandler::with_sink(cli.package, RecordingSink::new());
        handler.deprecate(request)?;
        if let Some(warning) = handler.sink().last() {
            println!("{}", serde_json::to_string_pretty(&warning)?);
        }
        return Ok(());
    }

    let sink = match cli.policy {
        Some(policy) => LogSink::new(policy),
        None => LogSink::from_env(),
    };
    DeprecationHandler::with_sink(cli.package, sink).deprecate(request)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_command() {
        let cli = Cli::parse_from([
            "deprecate",
            "method",
            "fetch",
            "--class",
            "Client",
            "--replacement",
            "get",
            "-r",
            "2.0",
        ]);
        let request = cli.command.into_request();
        assert_eq!(
            request.resolve_message().unwrap(),
            "The `fetch` method for the `Client` class will be superseded by `get`. Support for this method will be removed in version 2.0."
        );
    }

    #[test]
    fn test_parse_policy_and_globals() {
        let cli = Cli::parse_from([
            "deprecate",
            "class",
            "Foo",
            "--policy",
            "error",
            "--package",
            "my_lib",
        ]);
        assert_eq!(cli.policy, Some(WarningPolicy::Error));
        assert!(!cli.json);
        assert_eq!(cli.package, "my_lib");
    }

    #[test]
    fn test_policy_rejected_with_json() {
        let result = Cli::try_parse_from(["deprecate", "class", "Foo", "--json", "--policy", "error"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["deprecate", "class", "Foo", "--json"]);
        assert!(cli.json);
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_explicit_message_flag() {
        let cli = Cli::parse_from(["deprecate", "argument", "--message", "custom text", "-s", "3"]);
        let request = cli.command.into_request();
        assert_eq!(request.resolve_message().unwrap(), "custom text");
        assert_eq!(request.stack_level, Some(3));
    }

    #[test]
    fn test_error_policy_fails_the_run() {
        let cli = Cli::parse_from(["deprecate", "class", "Foo", "--policy", "error"]);
        assert!(run(cli).is_err());
    }
}
