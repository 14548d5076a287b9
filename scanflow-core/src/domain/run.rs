//! Pipeline run entity and derived status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// Run status, derived from the task fields and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// No task was submitted yet
    NotStarted,
    /// A task id was assigned but execution has not begun
    Queued,
    /// Execution started and no exit code was recorded yet
    Running,
    /// Exited with code 0
    Success,
    /// Exited with a non-zero code
    Failure,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NOT_STARTED"),
            Self::Queued => write!(f, "QUEUED"),
            Self::Running => write!(f, "RUNNING"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
        }
    }
}

/// One pipeline execution attached to a project.
///
/// The task fields mirror what the executor records: a task id when the run
/// is submitted, start/end dates and an exit code once it completes, and the
/// accumulated log text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub uuid: Uuid,
    pub project_uuid: Uuid,
    pub pipeline_name: String,
    pub description: String,
    pub created_date: DateTime<Utc>,
    pub task_id: Option<Uuid>,
    pub task_start_date: Option<DateTime<Utc>>,
    pub task_end_date: Option<DateTime<Utc>>,
    pub task_exitcode: Option<i64>,
    pub log: String,
}

impl Run {
    pub fn new(project_uuid: Uuid, pipeline_name: &str, description: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            project_uuid,
            pipeline_name: pipeline_name.to_string(),
            description: description.to_string(),
            created_date: Utc::now(),
            task_id: None,
            task_start_date: None,
            task_end_date: None,
            task_exitcode: None,
            log: String::new(),
        }
    }

    pub fn task_succeeded(&self) -> bool {
        self.task_exitcode == Some(0)
    }

    pub fn task_failed(&self) -> bool {
        matches!(self.task_exitcode, Some(code) if code != 0)
    }

    /// Derive the status from the task fields.
    pub fn status(&self) -> RunStatus {
        if self.task_succeeded() {
            RunStatus::Success
        } else if self.task_failed() {
            RunStatus::Failure
        } else if self.task_start_date.is_some() {
            RunStatus::Running
        } else if self.task_id.is_some() {
            RunStatus::Queued
        } else {
            RunStatus::NotStarted
        }
    }

    /// Record that execution was submitted and started.
    pub fn set_task_started(&mut self, task_id: Uuid) {
        self.task_id = Some(task_id);
        self.task_start_date = Some(Utc::now());
    }

    /// Record the task completion values.
    pub fn set_task_ended(&mut self, exitcode: i64, output: &str) {
        self.task_end_date = Some(Utc::now());
        self.task_exitcode = Some(exitcode);
        if !output.is_empty() {
            for line in output.lines() {
                // completion output joins the log, line by line
                let _ = self.append_to_log(line);
            }
        }
    }

    /// Clear every task field, returning the run to NOT_STARTED.
    pub fn reset_task_values(&mut self) {
        self.task_id = None;
        self.task_start_date = None;
        self.task_end_date = None;
        self.task_exitcode = None;
        self.log.clear();
    }

    /// Append a single line to the run log. Multi-line messages are rejected.
    pub fn append_to_log(&mut self, message: &str) -> Result<(), DomainError> {
        if message.contains('\n') {
            return Err(DomainError::MultilineLogMessage);
        }
        self.log.push_str(message);
        self.log.push('\n');
        Ok(())
    }

    /// Execution duration in seconds, available once the run has both a
    /// start and an end date.
    pub fn execution_time(&self) -> Option<i64> {
        match (self.task_start_date, self.task_end_date) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }

    /// Execution duration rendered for humans, with a minutes or hours hint
    /// for longer runs.
    pub fn execution_time_for_display(&self) -> Option<String> {
        let seconds = self.execution_time()?;
        if seconds > 3600 {
            Some(format!("{} seconds ({:.1} hours)", seconds, seconds as f64 / 3600.0))
        } else if seconds > 60 {
            Some(format!("{} seconds ({:.1} minutes)", seconds, seconds as f64 / 60.0))
        } else {
            Some(format!("{} seconds", seconds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn run() -> Run {
        Run::new(Uuid::new_v4(), "scan_codebase", "Scan a codebase")
    }

    #[test]
    fn test_status_derivation() {
        let mut not_started = run();
        assert_eq!(RunStatus::NotStarted, not_started.status());

        not_started.task_id = Some(Uuid::new_v4());
        assert_eq!(RunStatus::Queued, not_started.status());

        not_started.task_start_date = Some(Utc::now());
        assert_eq!(RunStatus::Running, not_started.status());

        not_started.task_exitcode = Some(0);
        assert_eq!(RunStatus::Success, not_started.status());

        not_started.task_exitcode = Some(1);
        assert_eq!(RunStatus::Failure, not_started.status());
    }

    #[test]
    fn test_status_from_exitcode_alone() {
        let mut succeed = run();
        succeed.task_exitcode = Some(0);
        assert_eq!(RunStatus::Success, succeed.status());
    }

    #[test]
    fn test_set_task_started_and_ended() {
        let mut run1 = run();
        let task_id = Uuid::new_v4();

        run1.set_task_started(task_id);
        assert_eq!(Some(task_id), run1.task_id);
        assert!(run1.task_start_date.is_some());
        assert!(run1.task_end_date.is_none());

        run1.set_task_ended(0, "output");
        assert_eq!(Some(0), run1.task_exitcode);
        assert_eq!("output\n", run1.log);
        assert!(run1.task_end_date.is_some());
    }

    #[test]
    fn test_reset_task_values() {
        let mut run1 = run();
        run1.set_task_started(Uuid::new_v4());
        run1.set_task_ended(1, "failed");

        run1.reset_task_values();
        assert!(run1.task_id.is_none());
        assert!(run1.task_start_date.is_none());
        assert!(run1.task_end_date.is_none());
        assert!(run1.task_exitcode.is_none());
        assert_eq!("", run1.log);
        assert_eq!(RunStatus::NotStarted, run1.status());
    }

    #[test]
    fn test_append_to_log() {
        let mut run1 = run();
        assert!(run1.append_to_log("multiline\nmessage").is_err());

        run1.append_to_log("line1").unwrap();
        run1.append_to_log("line2").unwrap();
        assert_eq!("line1\nline2\n", run1.log);
    }

    #[test]
    fn test_execution_time() {
        let mut run1 = run();
        assert!(run1.execution_time().is_none());
        assert!(run1.execution_time_for_display().is_none());

        run1.task_start_date = Some(Utc.with_ymd_and_hms(1984, 10, 10, 10, 10, 10).unwrap());
        assert!(run1.execution_time().is_none());

        run1.task_end_date = Some(Utc.with_ymd_and_hms(1984, 10, 10, 10, 10, 35).unwrap());
        assert_eq!(Some(25), run1.execution_time());
        assert_eq!(Some("25 seconds".to_string()), run1.execution_time_for_display());

        run1.task_end_date = Some(Utc.with_ymd_and_hms(1984, 10, 10, 10, 12, 35).unwrap());
        assert_eq!(
            Some("145 seconds (2.4 minutes)".to_string()),
            run1.execution_time_for_display()
        );

        run1.task_end_date = Some(Utc.with_ymd_and_hms(1984, 10, 10, 11, 12, 35).unwrap());
        assert_eq!(
            Some("3745 seconds (1.0 hours)".to_string()),
            run1.execution_time_for_display()
        );
    }
}
