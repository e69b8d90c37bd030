//! Contract for BLAST-style remote search services.
//!
//! The alignment core never talks to the network itself; hosts hand it
//! whatever sequences a job eventually returns. This module pins down the
//! submit/poll/fetch surface and a cancellable polling loop so a stale
//! request can be abandoned without touching core state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Finished,
    Failed(String),
}

/// One hit returned by a finished search job.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub description: String,
    pub sequence: String,
    pub evalue: f64,
}

/// Asynchronous job-submission collaborator: submit a query, poll the job,
/// fetch the hits once finished.
pub trait SearchService {
    fn submit(&mut self, query: &str, database: &str, program: &str) -> Result<String>;
    fn poll(&self, job_id: &str) -> Result<JobStatus>;
    fn fetch_result(&self, job_id: &str) -> Result<Vec<SearchHit>>;
}

/// Shared cancellation flag for in-flight polls.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Poll a job until it finishes, fails, or the token is cancelled.
///
/// Cancellation returns `Ok(None)`; a failed job becomes an error carrying
/// the service's message.
pub fn poll_until_done(
    service: &dyn SearchService,
    job_id: &str,
    interval: Duration,
    token: &CancelToken,
) -> Result<Option<Vec<SearchHit>>> {
    loop {
        if token.is_cancelled() {
            return Ok(None);
        }
        match service.poll(job_id)? {
            JobStatus::Finished => return service.fetch_result(job_id).map(Some),
            JobStatus::Failed(msg) => bail!("search job {} failed: {}", job_id, msg),
            JobStatus::Pending | JobStatus::Running => std::thread::sleep(interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MockSearch {
        polls_until_done: Cell<u32>,
        fail: bool,
    }

    impl SearchService for MockSearch {
        fn submit(&mut self, query: &str, _database: &str, _program: &str) -> Result<String> {
            if query.is_empty() {
                bail!("empty query");
            }
            Ok("job-1".to_string())
        }

        fn poll(&self, _job_id: &str) -> Result<JobStatus> {
            if self.fail {
                return Ok(JobStatus::Failed("out of memory".to_string()));
            }
            let left = self.polls_until_done.get();
            if left == 0 {
                Ok(JobStatus::Finished)
            } else {
                self.polls_until_done.set(left - 1);
                Ok(JobStatus::Running)
            }
        }

        fn fetch_result(&self, _job_id: &str) -> Result<Vec<SearchHit>> {
            Ok(vec![SearchHit {
                id: "sp|P12345".to_string(),
                description: "test hit".to_string(),
                sequence: "MKAA".to_string(),
                evalue: 1e-30,
            }])
        }
    }

    #[test]
    fn test_poll_until_finished() {
        let mut service = MockSearch {
            polls_until_done: Cell::new(2),
            fail: false,
        };
        let job = service.submit("MKAA", "uniprot", "blastp").unwrap();
        let hits = poll_until_done(&service, &job, Duration::ZERO, &CancelToken::new())
            .unwrap()
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sequence, "MKAA");
    }

    #[test]
    fn test_cancelled_poll_returns_none() {
        let service = MockSearch {
            polls_until_done: Cell::new(1000),
            fail: false,
        };
        let token = CancelToken::new();
        token.cancel();
        let res = poll_until_done(&service, "job-1", Duration::ZERO, &token).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn test_failed_job_preserves_message() {
        let service = MockSearch {
            polls_until_done: Cell::new(0),
            fail: true,
        };
        let err = poll_until_done(&service, "job-1", Duration::ZERO, &CancelToken::new())
            .unwrap_err()
            .to_string();
        assert!(err.contains("out of memory"));
    }

    #[test]
    fn test_submit_rejects_empty_query() {
        let mut service = MockSearch {
            polls_until_done: Cell::new(0),
            fail: false,
        };
        assert!(service.submit("", "uniprot", "blastp").is_err());
    }
}
