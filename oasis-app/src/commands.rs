//! One-shot subcommands: apply a single action, let the agent finish any
//! work it scheduled, print the outcome.

use crate::cli::{Commands, TaskCommands, ToolCommands};
use crate::render;
use crate::repl::Repl;
use anyhow::{bail, Result};
use oasis_core::Controller;
use oasis_interfaces::TerminalInterface;
use oasis_tasks::NewTask;
use std::path::Path;

pub async fn dispatch(controller: &mut Controller, command: Commands, data_dir: &Path) -> Result<()> {
    match command {
        Commands::Repl => {
            let terminal = TerminalInterface::new();
            return Repl::new(controller, &terminal, data_dir.to_path_buf()).run().await;
        }
        Commands::Chat { text } => {
            controller.submit_chat(&text.join(" ")).await?;
        }
        Commands::Task { command } => task(controller, command).await?,
        Commands::Board => {
            print!("{}", render::render_board(&controller.state().tasks));
        }
        Commands::Logs { limit, clear } => {
            if clear {
                controller.clear_logs().await?;
            } else {
                print!("{}", render::render_logs(controller.state(), limit));
            }
        }
        Commands::Run => {
            controller.run_agent().await?;
        }
        Commands::Tool { command } => match command {
            ToolCommands::List => print!("{}", render::render_tools(controller.state())),
            ToolCommands::Enable { tool } => controller.set_tool(tool, true).await?,
            ToolCommands::Disable { tool } => controller.set_tool(tool, false).await?,
            ToolCommands::Simulate { tool } => controller.simulate_tool(tool).await?,
        },
        Commands::Settings {
            name,
            brief,
            auto_run,
        } => {
            if name.is_none() && brief.is_none() && auto_run.is_none() {
                println!("{}", render::render_settings(controller.state()));
            } else {
                let current = controller.state().settings.clone();
                controller
                    .save_settings(
                        name.as_deref().unwrap_or(&current.agent_name),
                        brief.as_deref().unwrap_or(&current.agent_brief),
                        auto_run.map(Into::into).unwrap_or(current.auto_run),
                    )
                    .await?;
            }
        }
        Commands::Export { out } => {
            let dir = out.as_deref().unwrap_or(data_dir);
            let path = controller.export(dir).await?;
            println!("Exportado a {}", path.display());
        }
        Commands::Reset => {
            controller.reset().await?;
            println!("Estado reiniciado.");
        }
        Commands::Status => {
            println!("{}", render::render_kpis(&controller.kpis()));
        }
    }

    controller.settle().await?;
    print_replies(controller);
    Ok(())
}

async fn task(controller: &mut Controller, command: TaskCommands) -> Result<()> {
    match command {
        TaskCommands::Add {
            title,
            priority,
            notes,
        } => {
            let new_task = NewTask::new(title).with_priority(priority).with_notes(notes);
            match controller.add_task(new_task).await? {
                Some(task) => println!("{}", task.id),
                None => bail!("Task title cannot be empty"),
            }
        }
        TaskCommands::Move { id, status } => {
            let Some(id) = render::resolve_task_id(&controller.state().tasks, &id) else {
                bail!("No task matches id {}", id);
            };
            controller.move_task(&id, status).await?;
        }
        TaskCommands::Rm { id } => {
            let Some(id) = render::resolve_task_id(&controller.state().tasks, &id) else {
                bail!("No task matches id {}", id);
            };
            controller.delete_task(&id).await?;
        }
    }
    Ok(())
}

fn print_replies(controller: &mut Controller) {
    let name = controller.state().settings.agent_name.clone();
    for message in controller.take_replies() {
        println!("{}", render::render_message(&name, &message));
    }
}
