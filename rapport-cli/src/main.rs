use clap::{CommandFactory, Parser};
use rapport::config::LogLevel;
use rapport_cli::commands::{Cli, Commands};
use rapport_cli::context::RapportCliContext;
use rapport_cli::handlers::{
    handle_classify, handle_interact, handle_match_command, handle_relationship_command,
};
use rapport_cli::output::{format_error, format_success, output_error};
use tracing::info;

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();

    // Output format: env var overrides the flag
    let output_format = std::env::var("RAPPORT_OUTPUT").unwrap_or_else(|_| cli_args.output.clone());

    if let Err(e) = run(cli_args, &output_format).await {
        output_error(&e, &output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli, output_format: &str) -> rapport::Result<()> {
    match &cli_args.command {
        Commands::Version => {
            println!("rapport-cli v{}", rapport::VERSION);
            return Ok(());
        }
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut cmd,
                name,
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        _ => {}
    }

    let is_quiet = cli_args.quiet
        || std::env::var("RAPPORT_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // JSON output stays clean for tool integration
    let log_level = if is_quiet || output_format == "json" {
        LogLevel::Error
    } else if cli_args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let ctx = RapportCliContext::new(cli_args.config.as_deref(), cli_args.store, log_level)?;

    match cli_args.command {
        Commands::Version | Commands::Completions(_) => {}

        Commands::Diagnose => {
            info!("Running diagnostic checks...");
            match ctx.manager.health_check().await {
                Ok(true) => println!("{}", format_success("Storage: Healthy")),
                Ok(false) => println!("{}", format_error("Storage: Unhealthy")),
                Err(e) => println!("{}", format_error(&format!("Storage: Error - {}", e))),
            }
            println!(
                "{}",
                format_success(&format!(
                    "Configuration: dampening {:?}, top-k {}, {} retries",
                    ctx.config.relationships.dampening,
                    ctx.config.compatibility.default_top_k,
                    ctx.config.persistence.transaction_retries
                ))
            );
        }

        Commands::Classify(args) => handle_classify(args, &ctx, output_format)?,

        Commands::Interact(args) => handle_interact(args, &ctx, output_format).await?,

        Commands::Relationship(cmd) => {
            handle_relationship_command(cmd, &ctx, output_format).await?
        }

        Commands::Match(cmd) => handle_match_command(cmd, &ctx, output_format).await?,
    }

    Ok(())
}
