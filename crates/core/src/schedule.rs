//! Deferred agent work. Jobs are plain values with a due instant, so the
//! caller decides whether to wait for them or run them straight away.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentJob {
    /// Finish executing a task that was moved to doing.
    Resolve { task_id: String },
    /// Pick up the next task (auto-run chaining).
    RunNext,
}

#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub due: Instant,
    seq: u64,
    pub job: AgentJob,
}

#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Vec<ScheduledJob>,
    next_seq: u64,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, job: AgentJob) {
        self.schedule_at(Instant::now() + delay, job);
    }

    pub fn schedule_at(&mut self, due: Instant, job: AgentJob) {
        tracing::debug!("Scheduled {:?}", job);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.jobs.push(ScheduledJob { due, seq, job });
    }

    fn earliest(&self) -> Option<usize> {
        self.jobs
            .iter()
            .enumerate()
            .min_by_key(|(_, j)| (j.due, j.seq))
            .map(|(idx, _)| idx)
    }

    /// Time left before the earliest job is due; zero if it already is.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.earliest()
            .map(|idx| self.jobs[idx].due.saturating_duration_since(now))
    }

    /// Removes the earliest job if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<AgentJob> {
        let idx = self.earliest()?;
        if self.jobs[idx].due > now {
            return None;
        }
        Some(self.jobs.remove(idx).job)
    }

    /// Removes the earliest job regardless of its due time.
    pub fn pop_next(&mut self) -> Option<AgentJob> {
        let idx = self.earliest()?;
        Some(self.jobs.remove(idx).job)
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_next_orders_by_due_then_insertion() {
        let mut queue = JobQueue::new();
        let base = Instant::now();
        queue.schedule_at(base + Duration::from_millis(450), AgentJob::RunNext);
        queue.schedule_at(
            base + Duration::from_millis(100),
            AgentJob::Resolve {
                task_id: "a".to_string(),
            },
        );
        queue.schedule_at(
            base + Duration::from_millis(100),
            AgentJob::Resolve {
                task_id: "b".to_string(),
            },
        );

        assert_eq!(
            queue.pop_next(),
            Some(AgentJob::Resolve {
                task_id: "a".to_string()
            })
        );
        assert_eq!(
            queue.pop_next(),
            Some(AgentJob::Resolve {
                task_id: "b".to_string()
            })
        );
        assert_eq!(queue.pop_next(), Some(AgentJob::RunNext));
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn test_pop_due_respects_time() {
        let mut queue = JobQueue::new();
        let base = Instant::now();
        queue.schedule_at(base + Duration::from_millis(350), AgentJob::RunNext);

        assert!(queue.pop_due(base).is_none());
        assert_eq!(
            queue.time_until_next(base),
            Some(Duration::from_millis(350))
        );

        let later = base + Duration::from_millis(400);
        assert_eq!(queue.time_until_next(later), Some(Duration::ZERO));
        assert_eq!(queue.pop_due(later), Some(AgentJob::RunNext));
        assert!(queue.is_empty());
        assert!(queue.time_until_next(later).is_none());
    }
}
