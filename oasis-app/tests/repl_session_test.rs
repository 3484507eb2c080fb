//! Drives the console with a scripted interface.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use oasis_app::repl::Repl;
use oasis_core::{AppConfig, Controller};
use oasis_interfaces::Interface;
use oasis_memory::{LogKind, MemoryStore};
use oasis_tasks::{Priority, TaskStatus};
use oasis_tools::ToolKind;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

struct ScriptedInterface {
    input: Mutex<VecDeque<String>>,
    output: Mutex<Vec<String>>,
}

impl ScriptedInterface {
    fn new(lines: &[&str]) -> Self {
        Self {
            input: Mutex::new(lines.iter().map(|l| l.to_string()).collect()),
            output: Mutex::new(Vec::new()),
        }
    }

    fn output(&self) -> Vec<String> {
        self.output.lock().unwrap().clone()
    }

    fn printed(&self, needle: &str) -> bool {
        self.output().iter().any(|line| line.contains(needle))
    }
}

#[async_trait]
impl Interface for ScriptedInterface {
    async fn receive_input(&self) -> Option<String> {
        self.input.lock().unwrap().pop_front()
    }

    async fn send_output(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }

    async fn show_status(&self, status: &str) {
        self.output.lock().unwrap().push(status.to_string());
    }

    async fn show_prompt(&self, _prompt: &str) {}
}

async fn controller() -> (Controller, Arc<MemoryStore>) {
    let config = AppConfig {
        execution_delay_ms: 0,
        auto_run_delay_ms: 0,
        ..AppConfig::default()
    };
    let store = Arc::new(MemoryStore::new());
    (Controller::open(store.clone(), config).await, store)
}

async fn run_script(controller: &mut Controller, lines: &[&str]) -> ScriptedInterface {
    let ui = ScriptedInterface::new(lines);
    let dir = tempfile::tempdir().unwrap();
    Repl::new(controller, &ui, dir.path().to_path_buf())
        .run()
        .await
        .unwrap();
    ui
}

#[tokio::test]
async fn test_session_greets_and_quits() {
    let (mut controller, store) = controller().await;
    let ui = run_script(&mut controller, &[":quit", "never read"]).await;

    assert!(ui.printed(":help"));
    assert!(ui.printed("Oasis Agent: Panel listo."));
    assert!(controller.state().tasks.is_empty());
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_chat_lines_reach_the_agent() {
    let (mut controller, _store) = controller().await;
    let ui = run_script(&mut controller, &["/task enviar reporte pdf", "/bogus"]).await;

    let task = &controller.state().tasks.tasks()[0];
    assert_eq!(task.title, "enviar reporte pdf");
    assert_eq!(task.notes, "Requiere tool: pdf");
    assert!(ui.printed("Task creada: enviar reporte pdf (P3)."));
    assert!(ui.printed("Comando no reconocido: /bogus"));
}

#[tokio::test]
async fn test_blocked_run_finishes_before_exit() {
    let (mut controller, _store) = controller().await;
    let ui = run_script(
        &mut controller,
        &[":tool calendar off", "Agendar cita con cliente", ":run"],
    )
    .await;

    let state = controller.state();
    assert!(!state.tools.is_enabled(ToolKind::Calendar));
    assert_eq!(state.tasks.tasks()[0].status, TaskStatus::Backlog);
    assert_eq!(state.logs.count_of(LogKind::AgentBlocked), 1);
    assert_eq!(controller.pending_jobs(), 0);
    assert!(ui.printed("calendar → off"));
    assert!(ui.printed("Bloqueado:"));
}

#[tokio::test]
async fn test_console_task_commands() {
    let (mut controller, _store) = controller().await;
    run_script(
        &mut controller,
        &[":new P1 Preparar informe | con gráficos", ":new Llamar proveedor"],
    )
    .await;

    let tasks = controller.state().tasks.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].title, "Preparar informe");
    assert_eq!(tasks[1].priority, Priority::P1);
    assert_eq!(tasks[1].notes, "con gráficos");
    assert_eq!(tasks[0].title, "Llamar proveedor");
    assert_eq!(tasks[0].priority, Priority::P3);

    let id = tasks[1].id.clone();
    let other = tasks[0].id.clone();
    let mv = format!(":mv {} done", &id[..8]);
    let rm = format!(":rm {}", other);
    let ui = run_script(&mut controller, &[mv.as_str(), rm.as_str(), ":board", ":status"]).await;

    let state = controller.state();
    assert_eq!(state.tasks.len(), 1);
    assert_eq!(state.tasks.get(&id).unwrap().status, TaskStatus::Done);
    assert!(ui.printed("HECHO (1)"));
    assert!(ui.printed("Tareas: 1  Pendientes: 0  Hechas: 1"));
}

#[tokio::test]
async fn test_settings_and_usage_messages() {
    let (mut controller, _store) = controller().await;
    let ui = run_script(
        &mut controller,
        &[
            ":set name Ops",
            ":set autorun on",
            ":set color azul",
            ":tool calendar",
            ":mv",
            ":rm nope",
            ":wat",
            ":settings",
        ],
    )
    .await;

    let settings = &controller.state().settings;
    assert_eq!(settings.agent_name, "Ops");
    assert!(settings.auto_run.is_on());
    assert!(ui.printed("Uso: :set"));
    assert!(ui.printed("Uso: :tool"));
    assert!(ui.printed("Uso: :mv"));
    assert!(ui.printed("Tarea no encontrada"));
    assert!(ui.printed("Comando de consola desconocido: :wat"));
    assert!(ui.printed("Auto-ejecución: on"));
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() {
    let (mut controller, _store) = controller().await;
    let ui = run_script(&mut controller, &[":sim fax", ":sim sheets"]).await;

    assert!(ui.printed("❌ Error:"));
    assert!(ui.printed("Sheets: registro simulado guardado."));
    assert_eq!(controller.state().logs.count_of(LogKind::ToolCall), 1);
}

#[tokio::test]
async fn test_reset_and_export() {
    let (mut controller, store) = controller().await;
    let dir = tempfile::tempdir().unwrap();
    let export = format!(":export {}", dir.path().display());
    run_script(&mut controller, &["llamar a Juan", export.as_str()]).await;

    let exported = std::fs::read_to_string(dir.path().join("agent-ui-export.json")).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(snapshot["tasks"][0]["title"], "llamar a Juan");

    run_script(&mut controller, &[":reset"]).await;
    assert!(controller.state().tasks.is_empty());
    assert!(store.raw().is_some());
}
