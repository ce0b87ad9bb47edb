use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::{InternStatus, RegistrySummary};
use storage::{TabularSink, DEFAULT_INTERNS_FILE};

#[derive(Parser, Debug)]
#[command(name = "interns-tools", about = "Inspect and edit the interns table offline")]
struct Cli {
    #[arg(long, default_value = DEFAULT_INTERNS_FILE)]
    file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the table with its header row if it does not exist yet.
    Init,
    Add {
        name: String,
        email: String,
        department: String,
        #[arg(long, default_value = "In Progress")]
        status: InternStatus,
    },
    List,
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = run(cli)?;
    print!("{output}");
    Ok(())
}

fn run(cli: Cli) -> Result<String> {
    let sink = TabularSink::new(&cli.file);

    let output = match cli.command {
        Command::Init => {
            if sink.ensure_initialized()? {
                format!("created {}\n", sink.path().display())
            } else {
                format!("{} already exists\n", sink.path().display())
            }
        }
        Command::Add {
            name,
            email,
            department,
            status,
        } => {
            sink.append_row(&name, &email, &department, status)
                .with_context(|| format!("run `init` first to create {}", cli.file.display()))?;
            format!("added {name} ({department}, {status})\n")
        }
        Command::List => {
            let mut output = String::new();
            for record in sink.read_rows()? {
                output.push_str(&format!(
                    "{}\t{}\t{}\t{}\n",
                    record.name, record.email, record.department, record.status
                ));
            }
            output
        }
        Command::Summary => {
            let rows = sink.read_rows()?;
            let summary = RegistrySummary::from_statuses(rows.iter().map(|r| r.status));
            format!(
                "total={} completed={} in_progress={}\n",
                summary.total, summary.completed, summary.in_progress
            )
        }
    };

    Ok(output)
}
