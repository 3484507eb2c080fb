use crate::agent_engine::{AgentEngine, ResolveOutcome, RunOutcome};
use crate::command::{parse_chat_command, ChatCommand};
use crate::config::AppConfig;
use crate::heuristics::smart_task_from_text;
use crate::inference::infer_tool_need;
use crate::schedule::AgentJob;
use crate::workspace::Workspace;
use oasis_memory::{
    export_state, AppState, AutoRun, ChatMessage, LogKind, StateCompactor, StateStore, StoreError,
    FALLBACK_AGENT_NAME,
};
use oasis_tasks::{BoardCounts, NewTask, Task, TaskStatus};
use oasis_tools::{ToolError, ToolKind, ToolRegistry};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

pub const CLEARED_CHAT: &str = "Chat limpio. Nuevo sprint, nuevas victorias.";
pub const READY_MESSAGE: &str =
    "Panel listo. KPI arriba, ejecución al lado. Esto no es terapia, es operación.";

/// Upper bound on jobs executed by a single [`Controller::flush`].
const MAX_FLUSH_JOBS: usize = 10_000;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("Agent jobs did not settle after {0} runs")]
    MaxIterations(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub tasks: usize,
    pub pending: usize,
    pub done: usize,
    pub logs: usize,
}

/// Owns the application state and is the only thing that writes it to the
/// store. Each public mutating operation ends in exactly one [`commit`].
///
/// [`commit`]: Controller::commit
pub struct Controller {
    ws: Workspace,
    store: Arc<dyn StateStore>,
    registry: ToolRegistry,
    config: AppConfig,
}

impl Controller {
    /// Loads the stored document, falling back to defaults if it is missing
    /// or unreadable.
    pub async fn open(store: Arc<dyn StateStore>, config: AppConfig) -> Self {
        let mut state = store.load_or_default().await;
        StateCompactor::compact(&mut state, config.limits());

        tracing::info!(
            "Opened workspace with {} tasks and {} log entries",
            state.tasks.len(),
            state.logs.len()
        );
        Self {
            ws: Workspace::new(state, &config),
            store,
            registry: ToolRegistry::simulated(),
            config,
        }
    }

    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.ws.state
    }

    pub fn pending_jobs(&self) -> usize {
        self.ws.jobs.len()
    }

    /// Agent messages emitted since the last call, for display.
    pub fn take_replies(&mut self) -> Vec<ChatMessage> {
        self.ws.take_outbox()
    }

    async fn commit(&self) -> Result<(), ControllerError> {
        self.store.save(&self.ws.state).await?;
        Ok(())
    }

    /// Startup banner.
    pub async fn greet(&mut self) -> Result<(), ControllerError> {
        self.ws.say(READY_MESSAGE);
        self.commit().await
    }

    /// Handles one line typed into the chat: slash commands, or free text
    /// turned into a task.
    pub async fn submit_chat(&mut self, text: &str) -> Result<(), ControllerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.ws.hear(text);

        match parse_chat_command(text) {
            Some(ChatCommand::Clear) => {
                self.ws.state.chat.reset(ChatMessage::agent(CLEARED_CHAT));
                self.ws.log(LogKind::ChatClear, "Chat limpiado", json!({}));
            }
            Some(ChatCommand::Task { payload }) => {
                if payload.is_empty() {
                    self.ws.say("Uso: /task <título de la tarea>");
                } else {
                    let task = self.ws.create_task(smart_task_from_text(&payload));
                    self.ws
                        .say(format!("Task creada: {} ({}).", task.title, task.priority));
                    self.auto_run();
                }
            }
            Some(ChatCommand::Done { payload }) => {
                let candidate = self.ws.state.tasks.find_open_by_title(&payload).cloned();
                match candidate {
                    Some(task) => {
                        self.ws.move_task(&task.id, TaskStatus::Done);
                        self.ws
                            .say(format!("Marcada como hecha: \"{}\".", task.title));
                    }
                    None => self.ws.say(
                        "No encontré una tarea que coincida. Tip: /done <palabra del título>",
                    ),
                }
            }
            Some(ChatCommand::Unknown { command }) => {
                self.ws.say(format!(
                    "Comando no reconocido: {}. Prueba /task, /done, /clear",
                    command
                ));
            }
            None => {
                self.ws.create_task(smart_task_from_text(text));
                let tool_text = match infer_tool_need(text) {
                    Some(tool) => format!("Herramienta detectada: {}.", tool),
                    None => "No veo herramienta obligatoria.".to_string(),
                };
                self.ws.say(format!(
                    "Entendido. Lo bajé a tarea y lo metí al pipeline.\n{}\nSi quieres ejecución automática, activa Auto-ejecución en Ajustes.",
                    tool_text
                ));
                self.auto_run();
            }
        }

        self.commit().await
    }

    fn auto_run(&mut self) {
        if self.ws.auto_run() {
            AgentEngine::run_once(&mut self.ws);
        }
    }

    /// Task form submission. Blank titles are ignored.
    pub async fn add_task(&mut self, new_task: NewTask) -> Result<Option<Task>, ControllerError> {
        if new_task.title.trim().is_empty() {
            return Ok(None);
        }

        let task = self.ws.create_task(new_task);
        self.ws
            .say("Tarea creada. Ahora sí: a ejecutar, no a contemplar.");
        self.auto_run();

        self.commit().await?;
        Ok(Some(task))
    }

    pub async fn move_task(
        &mut self,
        id: &str,
        status: TaskStatus,
    ) -> Result<Option<Task>, ControllerError> {
        let Some(task) = self.ws.move_task(id, status) else {
            return Ok(None);
        };
        self.commit().await?;
        Ok(Some(task))
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<Option<Task>, ControllerError> {
        let Some(task) = self.ws.delete_task(id) else {
            return Ok(None);
        };
        self.commit().await?;
        Ok(Some(task))
    }

    /// Explicit "run agent" request.
    pub async fn run_agent(&mut self) -> Result<RunOutcome, ControllerError> {
        self.ws
            .say("Modo ejecución: ON. (Simulación, pero con actitud de producción.)");
        self.ws.log(LogKind::AgentRun, "Ejecución iniciada", json!({}));
        let outcome = AgentEngine::run_once(&mut self.ws);
        self.commit().await?;
        Ok(outcome)
    }

    pub async fn run_agent_once(&mut self) -> Result<RunOutcome, ControllerError> {
        let outcome = AgentEngine::run_once(&mut self.ws);
        self.commit().await?;
        Ok(outcome)
    }

    pub async fn execute(&mut self, job: AgentJob) -> Result<(), ControllerError> {
        match job {
            AgentJob::Resolve { task_id } => {
                if let ResolveOutcome::Vanished { .. } = AgentEngine::resolve(&mut self.ws, &task_id)
                {
                    return Ok(());
                }
                self.commit().await
            }
            AgentJob::RunNext => {
                self.run_agent_once().await?;
                Ok(())
            }
        }
    }

    /// Executes every job that is due at `now`. Returns how many ran.
    pub async fn run_due(&mut self, now: Instant) -> Result<usize, ControllerError> {
        let mut ran = 0;
        while let Some(job) = self.ws.jobs.pop_due(now) {
            self.execute(job).await?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Time until the next scheduled job is due.
    pub fn next_due_in(&self, now: Instant) -> Option<std::time::Duration> {
        self.ws.jobs.time_until_next(now)
    }

    /// Executes pending jobs, including ones they schedule, without waiting
    /// for their delays.
    pub async fn flush(&mut self) -> Result<usize, ControllerError> {
        let mut ran = 0;
        while let Some(job) = self.ws.jobs.pop_next() {
            if ran == MAX_FLUSH_JOBS {
                return Err(ControllerError::MaxIterations(ran));
            }
            self.execute(job).await?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Like [`flush`](Controller::flush) but sleeps until each job is due.
    pub async fn settle(&mut self) -> Result<usize, ControllerError> {
        let mut ran = 0;
        while let Some(wait) = self.next_due_in(Instant::now()) {
            if ran >= MAX_FLUSH_JOBS {
                return Err(ControllerError::MaxIterations(ran));
            }
            tokio::time::sleep(wait).await;
            ran += self.run_due(Instant::now()).await?;
        }
        Ok(ran)
    }

    pub async fn set_tool(&mut self, kind: ToolKind, enabled: bool) -> Result<(), ControllerError> {
        self.ws.state.tools.set(kind, enabled);
        let tools = self.ws.state.tools;
        self.ws.log(
            LogKind::ToolsUpdate,
            "Herramientas actualizadas",
            json!({ "tools": tools }),
        );
        self.commit().await
    }

    /// Fires a tool's simulated action and reports it in chat.
    pub async fn simulate_tool(&mut self, kind: ToolKind) -> Result<(), ControllerError> {
        let result = self.registry.invoke(kind, json!({})).await?;
        if !result.success {
            let error = result.error.unwrap_or_else(|| format!("{} failed", kind));
            return Err(ToolError::Execution(error).into());
        }
        let message = result.output["message"]
            .as_str()
            .unwrap_or("Acción simulada.")
            .to_string();
        let action = result.output["action"].clone();

        self.ws.say(message.clone());
        self.ws
            .log(LogKind::ToolCall, message, json!({ "action": action }));
        self.commit().await
    }

    pub async fn save_settings(
        &mut self,
        agent_name: &str,
        agent_brief: &str,
        auto_run: AutoRun,
    ) -> Result<(), ControllerError> {
        let name = agent_name.trim();
        let settings = &mut self.ws.state.settings;
        settings.agent_name = if name.is_empty() {
            FALLBACK_AGENT_NAME.to_string()
        } else {
            name.to_string()
        };
        settings.agent_brief = agent_brief.trim().to_string();
        settings.auto_run = auto_run;

        let settings = settings.clone();
        self.ws.log(
            LogKind::SettingsSave,
            "Ajustes guardados",
            json!({ "settings": settings }),
        );
        self.ws.say(format!(
            "Ajustes guardados. Agente: \"{}\". Auto-ejecución: {}.",
            settings.agent_name,
            settings.auto_run.to_string().to_uppercase()
        ));
        self.commit().await
    }

    pub async fn clear_logs(&mut self) -> Result<(), ControllerError> {
        self.ws.state.logs.clear();
        self.ws.log(LogKind::LogsReset, "Logs reiniciados", json!({}));
        self.commit().await
    }

    /// Writes a pretty JSON snapshot of the state into `dir`.
    pub async fn export(&mut self, dir: &Path) -> Result<PathBuf, ControllerError> {
        let path = dir.join(&self.config.export_file);
        export_state(&self.ws.state, &path).await?;
        self.ws
            .log(LogKind::Export, "Estado exportado a JSON", json!({ "path": path.display().to_string() }));
        self.commit().await?;
        Ok(path)
    }

    /// Deletes the stored document and starts over from defaults. Pending
    /// agent jobs are dropped.
    pub async fn reset(&mut self) -> Result<(), ControllerError> {
        self.store.clear().await?;
        self.ws.reset(AppState::default());
        tracing::info!("Workspace reset to defaults");
        Ok(())
    }

    pub fn kpis(&self) -> Kpis {
        let BoardCounts {
            total,
            pending,
            done,
        } = self.ws.state.tasks.counts();
        Kpis {
            tasks: total,
            pending,
            done,
            logs: self.ws.state.logs.len(),
        }
    }
}
