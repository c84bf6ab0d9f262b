mod command;
mod notify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser};
use colored::Colorize;

use git_ssh_switch::TerminalPrompt;

use self::command::Command;
use self::notify::Notify;

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    let args = Cli::parse();

    match args.process() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Args, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress stdout notifications
    #[arg(short = 'q', long, global = true, default_value_t = false)]
    quiet: bool,
    /// Directory holding the key pair list and generated keys [default: ~/.gss]
    #[arg(long, global = true, env = "GSS_HOME", value_name = "DIR")]
    home: Option<PathBuf>,
    /// SSH client config rewritten on switch [default: ~/.ssh/config]
    #[arg(long, global = true, env = "GSS_SSH_CONFIG", value_name = "PATH")]
    ssh_config_file: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(
    about = "Switch between SSH key pairs and their Git identities",
    name = "gss",
    max_term_width = 100
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOptions,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn process(self) -> anyhow::Result<()> {
        let notify = Notify::new(self.global_opts.quiet);
        let mut prompt = TerminalPrompt::default();

        self.command
            .process(&self.global_opts, notify, &mut prompt)
    }
}
