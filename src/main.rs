mod commands;
mod config;
mod context;
mod error;
mod filter;
mod hcl;
mod output;
mod render;
mod route53;
mod test_helpers;
mod traits;
mod writer;

use clap::Parser;
use commands::ExportCommand;
use config::{CliOverrides, DEFAULT_CONFIG_PATH, ExportConfig, ExportTarget};
use context::Context;
use route53::AwsRoute53Source;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "tofufy")]
#[command(
    about = "Export Route53 hosted zones and records as OpenTofu/Terraform locals and import blocks",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the JSON (or YAML) settings file
    #[arg(short, long, env = "TOFUFY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Comma-separated regexes; only matching hostnames of skippable record types are exported
    #[arg(long)]
    only_hostnames: Option<String>,

    /// What to export (overrides the settings file)
    #[arg(long, value_enum)]
    export_target: Option<ExportTarget>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors share exit code 1 with other fatal errors; 2 means
            // partial success
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print().ok();
            return ExitCode::from(code);
        }
    };

    ExitCode::from(run(cli))
}

fn run(cli: Cli) -> u8 {
    let ctx = Context::new();

    let overrides = CliOverrides {
        only_hostnames: cli.only_hostnames,
        export_target: cli.export_target,
    };

    let config = match ExportConfig::load(&*ctx.fs, &cli.config, &overrides) {
        Ok(config) => config,
        Err(err) => {
            ctx.output.error(&err.to_string());
            return 1;
        }
    };

    let source = match AwsRoute53Source::new(config.profile.as_deref()) {
        Ok(source) => source,
        Err(err) => {
            ctx.output
                .error(&format!("Failed to create Route53 client: {:#}", err));
            return 1;
        }
    };

    match ExportCommand::execute(&ctx, &source, &config) {
        Ok(report) => report.exit_code() as u8,
        Err(err) => {
            ctx.output.error(&err.to_string());
            1
        }
    }
}
