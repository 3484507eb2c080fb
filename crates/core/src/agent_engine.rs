use crate::inference::infer_tool_need;
use crate::schedule::AgentJob;
use crate::workspace::Workspace;
use oasis_memory::LogKind;
use oasis_tasks::TaskStatus;
use oasis_tools::ToolKind;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing in backlog or doing.
    Idle,
    /// The task moved to doing and its resolution is scheduled.
    Started { task_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Done { task_id: String, chained: bool },
    Blocked { task_id: String, tool: ToolKind },
    /// The task was deleted while it was executing.
    Vanished { task_id: String },
}

/// Rule-based stand-in for an agent: executes one task at a time, refusing
/// tasks whose required tool is switched off.
pub struct AgentEngine;

impl AgentEngine {
    /// Starts executing the next runnable task. Resolution happens later,
    /// when the scheduled [`AgentJob::Resolve`] is executed.
    pub fn run_once(ws: &mut Workspace) -> RunOutcome {
        let Some(next) = ws.state.tasks.next_runnable().cloned() else {
            tracing::info!("Agent idle: no runnable tasks");
            ws.say("No hay tareas para ejecutar. Dame un objetivo o crea tareas. (Sin backlog no hay magia.)");
            ws.log(LogKind::AgentIdle, "Sin tareas disponibles", json!({}));
            return RunOutcome::Idle;
        };

        tracing::info!("Agent executing task {}: {}", next.id, next.title);
        ws.move_task(&next.id, TaskStatus::Doing);
        ws.say(format!("Ejecutando: \"{}\"…", next.title));

        let delay = ws.execution_delay();
        ws.jobs.schedule(
            delay,
            AgentJob::Resolve {
                task_id: next.id.clone(),
            },
        );

        RunOutcome::Started { task_id: next.id }
    }

    /// Completes or blocks a task previously started by [`run_once`].
    ///
    /// [`run_once`]: AgentEngine::run_once
    pub fn resolve(ws: &mut Workspace, task_id: &str) -> ResolveOutcome {
        let Some(task) = ws.state.tasks.get(task_id).cloned() else {
            tracing::warn!("Task {} disappeared before it could be resolved", task_id);
            return ResolveOutcome::Vanished {
                task_id: task_id.to_string(),
            };
        };

        let needs = infer_tool_need(&format!("{} {}", task.title, task.notes));
        if let Some(tool) = needs.filter(|tool| !ws.state.tools.is_enabled(*tool)) {
            tracing::info!("Agent blocked on task {}: tool {} disabled", task.id, tool);
            ws.move_task(&task.id, TaskStatus::Backlog);
            ws.say(format!(
                "Bloqueado: \"{}\" requiere la herramienta \"{}\" y está desactivada. Actívala en Herramientas.",
                task.title, tool
            ));
            ws.log(
                LogKind::AgentBlocked,
                "Tool desactivada",
                json!({ "taskId": task.id, "tool": tool.as_str() }),
            );
            return ResolveOutcome::Blocked {
                task_id: task.id,
                tool,
            };
        }

        ws.move_task(&task.id, TaskStatus::Done);
        ws.say(format!("Listo. Resultado: completé \"{}\". Siguiente.", task.title));
        ws.log(
            LogKind::AgentDone,
            "Tarea completada (simulada)",
            json!({ "taskId": task.id }),
        );

        let chained = ws.auto_run();
        if chained {
            let delay = ws.auto_run_delay();
            ws.jobs.schedule(delay, AgentJob::RunNext);
        }

        ResolveOutcome::Done {
            task_id: task.id,
            chained,
        }
    }
}
