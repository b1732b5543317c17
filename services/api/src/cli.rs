use crate::demo::{run_demo, run_generate, DemoArgs, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interview_feedback::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Feedback",
    about = "Generate and serve structured interview feedback from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with feedback records directly
    Feedback {
        #[command(subcommand)]
        command: FeedbackCommand,
    },
    /// Run a sample interview through the feedback pipeline
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FeedbackCommand {
    /// Generate feedback for a request stored as JSON
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Feedback {
            command: FeedbackCommand::Generate(args),
        } => run_generate(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_subcommand() {
        let cli = Cli::try_parse_from([
            "interview-feedback-api",
            "feedback",
            "generate",
            "--input",
            "request.json",
            "--pretty",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Feedback {
                command: FeedbackCommand::Generate(args),
            }) => {
                assert_eq!(args.input.to_str(), Some("request.json"));
                assert!(args.pretty);
            }
            other => panic!("expected generate command, got {other:?}"),
        }
    }
}
