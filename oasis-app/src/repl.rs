//! Interactive console. Lines starting with `:` are console commands;
//! everything else goes to the agent chat.

use crate::render;
use anyhow::Result;
use oasis_core::Controller;
use oasis_interfaces::Interface;
use oasis_memory::AutoRun;
use oasis_tasks::{NewTask, Priority, TaskStatus};
use oasis_tools::ToolKind;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const PROMPT: &str = "oasis> ";

const HELP: &str = "\
Comandos de consola:
  :board                    tablero
  :new <P1|P2|P3> <título> [| notas]
  :mv <id> <backlog|doing|done>
  :rm <id>
  :run                      ejecutar agente
  :tools                    herramientas
  :tool <nombre> <on|off>
  :sim <nombre>             acción simulada de la herramienta
  :settings                 ver ajustes
  :set <name|brief|autorun> <valor>
  :logs [n]   :clearlogs
  :export [dir]   :reset   :status
  :help   :quit
Chat: /task <texto>, /done <palabra>, /clear, o texto libre.";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

async fn wait_for(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => std::future::pending::<()>().await,
    }
}

pub struct Repl<'a, I: Interface> {
    controller: &'a mut Controller,
    ui: &'a I,
    export_dir: PathBuf,
}

impl<'a, I: Interface> Repl<'a, I> {
    pub fn new(controller: &'a mut Controller, ui: &'a I, export_dir: PathBuf) -> Self {
        Self {
            controller,
            ui,
            export_dir,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.ui
            .send_output("Oasis: chat + tablero + logs. Escribe :help para ver comandos.")
            .await;
        self.controller.greet().await?;
        self.print_replies().await;

        loop {
            self.ui.show_prompt(PROMPT).await;
            let wait = self.controller.next_due_in(Instant::now());

            tokio::select! {
                input = self.ui.receive_input() => {
                    let Some(line) = input else {
                        break;
                    };
                    match self.handle_line(&line).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => self.ui.send_output(&format!("❌ Error: {:#}", e)).await,
                    }
                }
                _ = wait_for(wait) => {
                    self.ui.send_output("").await;
                    self.controller.run_due(Instant::now()).await?;
                }
            }
            self.print_replies().await;
        }

        // Let in-flight agent work finish before leaving.
        self.controller.settle().await?;
        self.print_replies().await;
        Ok(())
    }

    async fn print_replies(&mut self) {
        let name = self.controller.state().settings.agent_name.clone();
        for message in self.controller.take_replies() {
            self.ui
                .send_output(&render::render_message(&name, &message))
                .await;
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            self.controller.submit_chat(line).await?;
            return Ok(Flow::Continue);
        };

        let (name, args) = match command.split_once(' ') {
            Some((name, args)) => (name, args.trim()),
            None => (command, ""),
        };

        match name {
            "quit" | "q" | "exit" => return Ok(Flow::Quit),
            "help" => self.ui.send_output(HELP).await,
            "board" => {
                let board = render::render_board(&self.controller.state().tasks);
                self.ui.send_output(board.trim_end()).await;
            }
            "new" => self.new_task(args).await?,
            "mv" => {
                let mut parts = args.split_whitespace();
                let (Some(id), Some(status)) = (parts.next(), parts.next()) else {
                    self.ui.send_output("Uso: :mv <id> <backlog|doing|done>").await;
                    return Ok(Flow::Continue);
                };
                let status: TaskStatus = status.parse()?;
                match render::resolve_task_id(&self.controller.state().tasks, id) {
                    Some(id) => {
                        self.controller.move_task(&id, status).await?;
                    }
                    None => self.ui.show_status("Tarea no encontrada").await,
                }
            }
            "rm" => match render::resolve_task_id(&self.controller.state().tasks, args) {
                Some(id) => {
                    self.controller.delete_task(&id).await?;
                }
                None => self.ui.show_status("Tarea no encontrada").await,
            },
            "run" => {
                self.controller.run_agent().await?;
            }
            "tools" => {
                let tools = render::render_tools(self.controller.state());
                self.ui.send_output(tools.trim_end()).await;
            }
            "tool" => {
                let mut parts = args.split_whitespace();
                let enabled = match (parts.next(), parts.next()) {
                    (Some(tool), Some("on")) => Some((tool, true)),
                    (Some(tool), Some("off")) => Some((tool, false)),
                    _ => None,
                };
                let Some((tool, enabled)) = enabled else {
                    self.ui.send_output("Uso: :tool <nombre> <on|off>").await;
                    return Ok(Flow::Continue);
                };
                let tool: ToolKind = tool.parse()?;
                self.controller.set_tool(tool, enabled).await?;
                self.ui
                    .show_status(&format!("{} → {}", tool, if enabled { "on" } else { "off" }))
                    .await;
            }
            "sim" => {
                let tool: ToolKind = args.parse()?;
                self.controller.simulate_tool(tool).await?;
            }
            "settings" => {
                let settings = render::render_settings(self.controller.state());
                self.ui.send_output(&settings).await;
            }
            "set" => self.update_setting(args).await?,
            "logs" => {
                let limit = args.parse().unwrap_or(20);
                let logs = render::render_logs(self.controller.state(), limit);
                self.ui.send_output(logs.trim_end()).await;
            }
            "clearlogs" => self.controller.clear_logs().await?,
            "export" => {
                let dir = if args.is_empty() {
                    self.export_dir.clone()
                } else {
                    PathBuf::from(args)
                };
                let path = self.controller.export(&dir).await?;
                self.ui
                    .show_status(&format!("Exportado a {}", path.display()))
                    .await;
            }
            "reset" => {
                self.controller.reset().await?;
                self.controller.greet().await?;
            }
            "status" => {
                let kpis = render::render_kpis(&self.controller.kpis());
                self.ui.show_status(&kpis).await;
            }
            other => {
                self.ui
                    .send_output(&format!("Comando de consola desconocido: :{} (prueba :help)", other))
                    .await
            }
        }
        Ok(Flow::Continue)
    }

    async fn new_task(&mut self, args: &str) -> Result<()> {
        let (head, notes) = match args.split_once('|') {
            Some((head, notes)) => (head, notes.trim()),
            None => (args, ""),
        };
        let head = head.trim();
        let (priority, title) = match head.split_once(' ') {
            Some((first, rest)) => match first.parse::<Priority>() {
                Ok(priority) => (priority, rest),
                Err(_) => (Priority::default(), head),
            },
            None => (Priority::default(), head),
        };

        let new_task = NewTask::new(title)
            .with_priority(priority)
            .with_notes(notes);
        if self.controller.add_task(new_task).await?.is_none() {
            self.ui.send_output("Uso: :new <P1|P2|P3> <título> [| notas]").await;
        }
        Ok(())
    }

    async fn update_setting(&mut self, args: &str) -> Result<()> {
        let settings = self.controller.state().settings.clone();
        let (key, value) = args.split_once(' ').unwrap_or((args, ""));
        let value = value.trim();

        let (name, brief, auto_run) = match key {
            "name" => (value.to_string(), settings.agent_brief, settings.auto_run),
            "brief" => (settings.agent_name, value.to_string(), settings.auto_run),
            "autorun" => (
                settings.agent_name,
                settings.agent_brief,
                AutoRun::from(value == "on"),
            ),
            _ => {
                self.ui
                    .send_output("Uso: :set <name|brief|autorun> <valor>")
                    .await;
                return Ok(());
            }
        };

        self.controller.save_settings(&name, &brief, auto_run).await?;
        Ok(())
    }
}
