//! Command-line front end for a taskplan store.
//!
//! # Responsibility
//! - Turn one command into core store calls, then persist when it mutated.
//! - Keep every graph rule inside `taskplan_core`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use taskplan_core::{
    build_adjacency_matrix, core_version, default_log_level, init_logging,
    JsonFileStoreRepository, Project, StoreConfig, StoreService, Task,
};

type Service = StoreService<JsonFileStoreRepository>;

#[derive(Debug, Parser)]
#[command(name = "taskplan", version, about = "Track project tasks and their successors")]
struct Cli {
    /// Store document path (falls back to TASKPLAN_STORE, then ./projects.json).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log level used when --log-dir is set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files. Logging stays off without it.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print projects, tasks and successors.
    List,
    AddProject { name: String },
    RemoveProject { name: String },
    AddTask {
        project: String,
        name: String,
        duration: u32,
    },
    RemoveTask { project: String, name: String },
    /// Replace the successor set of TASK.
    SetSuccessors {
        project: String,
        task: String,
        successors: Vec<String>,
    },
    /// Show which tasks can follow TASK and which already do.
    Candidates { project: String, task: String },
    /// Print the adjacency matrix of PROJECT.
    Matrix { project: String },
    Version,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).map_err(|message| anyhow!(message))?;
    }

    if let Command::Version = cli.command {
        println!("taskplan_core version={}", core_version());
        return Ok(());
    }

    let config = StoreConfig::resolve(cli.store)?;
    let mut service = StoreService::new(JsonFileStoreRepository::from_config(&config));
    service
        .load_or_default()
        .with_context(|| format!("cannot load `{}`", config.document_path.display()))?;

    if execute(&mut service, cli.command)? {
        service
            .save()
            .with_context(|| format!("cannot save `{}`", config.document_path.display()))?;
        info!("event=cli_save module=cli status=ok");
    }
    Ok(())
}

/// Runs one command. Returns whether the store changed.
fn execute(service: &mut Service, command: Command) -> Result<bool> {
    match command {
        Command::List => {
            for project in service.store().projects() {
                println!("{project}");
                for task in project.tasks() {
                    let successors = task
                        .successors()
                        .iter()
                        .map(|successor| successor.name().to_string())
                        .collect::<Vec<_>>();
                    if successors.is_empty() {
                        println!("  {task}");
                    } else {
                        println!("  {task} -> {}", successors.join(", "));
                    }
                }
            }
            Ok(false)
        }
        Command::AddProject { name } => {
            service.store_mut().create_project(name)?;
            Ok(true)
        }
        Command::RemoveProject { name } => {
            let project = find_project(service, &name)?;
            service.store_mut().remove_project(&project);
            Ok(true)
        }
        Command::AddTask {
            project,
            name,
            duration,
        } => {
            find_project(service, &project)?.create_task(name, duration)?;
            Ok(true)
        }
        Command::RemoveTask { project, name } => {
            let project = find_project(service, &project)?;
            let task = find_task(&project, &name)?;
            project.remove_task(&task)?;
            Ok(true)
        }
        Command::SetSuccessors {
            project,
            task,
            successors,
        } => {
            let project = find_project(service, &project)?;
            let task = find_task(&project, &task)?;
            let chosen = successors
                .iter()
                .map(|name| find_task(&project, name))
                .collect::<Result<Vec<_>>>()?;
            task.update_successors(&chosen);
            Ok(true)
        }
        Command::Candidates { project, task } => {
            let project = find_project(service, &project)?;
            let task = find_task(&project, &task)?;
            let candidates = task.fetch_candidate_successors(&project);
            for (index, candidate) in candidates.tasks.iter().enumerate() {
                let mark = if candidates.selected.contains(&index) {
                    "x"
                } else {
                    " "
                };
                println!("[{mark}] {candidate}");
            }
            Ok(false)
        }
        Command::Matrix { project } => {
            let project = find_project(service, &project)?;
            let tasks = project.tasks();
            let names = tasks.iter().map(Task::name).collect::<Vec<_>>();
            println!("# {}", names.join(" "));
            print!("{}", build_adjacency_matrix(&tasks));
            Ok(false)
        }
        Command::Version => Ok(false),
    }
}

fn find_project(service: &Service, name: &str) -> Result<Project> {
    service
        .store()
        .find_project(name)
        .cloned()
        .ok_or_else(|| anyhow!("project `{name}` not found"))
}

fn find_task(project: &Project, name: &str) -> Result<Task> {
    project
        .find_task(name)
        .ok_or_else(|| anyhow!("task `{name}` not found in project `{project}`"))
}
