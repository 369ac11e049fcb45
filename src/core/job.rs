use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Finished,
    Failed,
}

/// One input file's trip through the encoder.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: JobStatus,
    pub error: Option<String>,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
}

impl Job {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            status: JobStatus::Pending,
            error: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.ended_at?.duration_since(self.started_at?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub jobs: Vec<Job>,
}

impl BatchReport {
    pub fn finished(&self) -> usize {
        self.count(JobStatus::Finished)
    }

    pub fn failed(&self) -> usize {
        self.count(JobStatus::Failed)
    }

    fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }
}
