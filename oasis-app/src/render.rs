//! Plain-text views of the state.

use oasis_core::Kpis;
use oasis_memory::{AppState, ChatMessage, Role};
use oasis_tasks::{Task, TaskBoard, TaskStatus};
use std::fmt::Write;

const SHORT_ID: usize = 8;

fn column_title(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Backlog => "BACKLOG",
        TaskStatus::Doing => "EN PROGRESO",
        TaskStatus::Done => "HECHO",
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}

fn render_task(out: &mut String, task: &Task) {
    let _ = writeln!(out, "  [{}] {}  ({})", task.priority, task.title, short_id(&task.id));
    let notes = if task.notes.is_empty() { "—" } else { &task.notes };
    let _ = writeln!(out, "       {}", notes);
}

pub fn render_board(board: &TaskBoard) -> String {
    let mut out = String::new();
    for status in TaskStatus::ALL {
        let tasks: Vec<&Task> = board.by_status(status).collect();
        let _ = writeln!(out, "{} ({})", column_title(status), tasks.len());
        for task in tasks {
            render_task(&mut out, task);
        }
    }
    out
}

pub fn render_logs(state: &AppState, limit: usize) -> String {
    let mut out = String::new();
    for entry in state.logs.entries().iter().take(limit) {
        let _ = writeln!(
            out,
            "[{}] {} — {}",
            entry.ts.to_rfc3339(),
            entry.kind,
            entry.message
        );
    }
    out
}

pub fn render_kpis(kpis: &Kpis) -> String {
    format!(
        "Tareas: {}  Pendientes: {}  Hechas: {}  Logs: {}",
        kpis.tasks, kpis.pending, kpis.done, kpis.logs
    )
}

pub fn render_tools(state: &AppState) -> String {
    let mut out = String::new();
    for (kind, enabled) in state.tools.iter() {
        let mark = if enabled { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, kind);
    }
    out
}

pub fn render_settings(state: &AppState) -> String {
    let settings = &state.settings;
    format!(
        "Agente: {}\nBrief: {}\nAuto-ejecución: {}",
        settings.agent_name, settings.agent_brief, settings.auto_run
    )
}

pub fn render_message(agent_name: &str, message: &ChatMessage) -> String {
    match message.role {
        Role::Agent => format!("{}: {}", agent_name, message.text),
        Role::User => format!("tú: {}", message.text),
    }
}

/// Resolves a full id or an unambiguous id prefix.
pub fn resolve_task_id(board: &TaskBoard, id_or_prefix: &str) -> Option<String> {
    if let Some(task) = board.get(id_or_prefix) {
        return Some(task.id.clone());
    }
    let mut matches = board
        .tasks()
        .iter()
        .filter(|t| !id_or_prefix.is_empty() && t.id.starts_with(id_or_prefix));
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.id.clone())
}
