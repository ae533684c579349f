use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hr_analytics::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HR Analytics",
    about = "Score a workforce roster and serve dashboard analytics",
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
    /// Print KPIs, insights and turnover analysis for a CSV roster
    Report(ReportArgs),
    /// Run the report against a built-in sample roster
    Demo(DemoArgs),
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
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_command_collects_repeated_filters() {
        let cli = Cli::try_parse_from([
            "hr-analytics-api",
            "report",
            "--roster",
            "roster.csv",
            "--department",
            "Logistique",
            "--department",
            "Finance",
            "--gender",
            "f",
            "--today",
            "2025-06-30",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.department, vec!["Logistique", "Finance"]);
                assert_eq!(args.gender.len(), 1);
                assert!(args.today.is_some());
                assert!(!args.json);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["hr-analytics-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
