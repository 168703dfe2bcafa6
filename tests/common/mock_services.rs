//! Fake services for testing
//!
//! [`FakeScm`] stands in for git: it records every primitive call, can be told
//! to fail or panic for specific mirrors, and tracks how many primitives run
//! at the same time.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use gitmir::domain::value_objects::push_target::PushTarget;
use gitmir::infrastructure::filesystem::operation_log::OperationLog;
use gitmir::infrastructure::scm::{MirrorScm, ScmError};

/// A primitive invocation seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub primitive: &'static str,
    pub path: PathBuf,
}

/// Recording fake of the git primitives
///
/// Mirrors and destinations are keyed by their final path component, e.g. `a.git`.
pub struct FakeScm {
    push_targets: Mutex<HashMap<String, String>>,
    failures: Mutex<HashSet<(&'static str, String)>>,
    panics: Mutex<HashSet<(&'static str, String)>>,
    calls: Mutex<Vec<Call>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeScm {
    pub fn new() -> Self {
        Self {
            push_targets: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashSet::new()),
            panics: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            delay: Duration::from_millis(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Every primitive sleeps for `delay` before completing
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the push URL returned for `mirror`
    pub fn with_push_target(self, mirror: &str, url: impl Into<String>) -> Self {
        self.push_targets
            .lock()
            .unwrap()
            .insert(mirror.to_string(), url.into());
        self
    }

    /// Make `primitive` fail when invoked on `name`
    pub fn failing(self, primitive: &'static str, name: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert((primitive, name.to_string()));
        self
    }

    /// Make `primitive` panic when invoked on `name`
    pub fn panicking(self, primitive: &'static str, name: &str) -> Self {
        self.panics
            .lock()
            .unwrap()
            .insert((primitive, name.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `primitive` was invoked
    pub fn count(&self, primitive: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.primitive == primitive)
            .count()
    }

    /// Paths `primitive` was invoked on
    pub fn paths(&self, primitive: &str) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.primitive == primitive)
            .map(|call| call.path.clone())
            .collect()
    }

    /// Highest number of primitives observed running at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn invoke(&self, primitive: &'static str, path: &Path) -> Result<(), ScmError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.calls.lock().unwrap().push(Call {
            primitive,
            path: path.to_path_buf(),
        });

        let key = (primitive, name_of(path));
        let should_panic = self.panics.lock().unwrap().contains(&key);
        if should_panic {
            panic!("{} panicked for {}", primitive, path.display());
        }

        let should_fail = self.failures.lock().unwrap().contains(&key);
        if should_fail {
            return Err(ScmError::command_exited(
                format!("git {} ({})", primitive, path.display()),
                1,
            ));
        }

        Ok(())
    }
}

impl Default for FakeScm {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl MirrorScm for FakeScm {
    async fn clone_mirror(&self, _fetch_source: &str, dest: &Path) -> Result<(), ScmError> {
        self.invoke("clone_mirror", dest).await?;
        std::fs::create_dir_all(dest)?;
        Ok(())
    }

    async fn set_push_target(&self, mirror: &Path, target_url: &str) -> Result<(), ScmError> {
        self.invoke("set_push_target", mirror).await?;
        self.push_targets
            .lock()
            .unwrap()
            .insert(name_of(mirror), target_url.to_string());
        Ok(())
    }

    async fn get_push_target(&self, mirror: &Path) -> Result<PushTarget, ScmError> {
        self.invoke("get_push_target", mirror).await?;
        let url = self
            .push_targets
            .lock()
            .unwrap()
            .get(&name_of(mirror))
            .cloned()
            .ok_or_else(|| {
                ScmError::command_failed(
                    "git remote get-url --push origin",
                    2,
                    "error: No such remote 'origin'",
                )
            })?;
        PushTarget::parse(&url).map_err(|e| ScmError::invalid_url(url, e.to_string()))
    }

    async fn fetch_prune(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError> {
        log.record("fake fetch");
        self.invoke("fetch_prune", mirror).await
    }

    async fn push_mirror(&self, mirror: &Path, log: &OperationLog) -> Result<(), ScmError> {
        log.record("fake push");
        self.invoke("push_mirror", mirror).await
    }

    async fn init_bare(&self, dest: &Path, _log: &OperationLog) -> Result<(), ScmError> {
        self.invoke("init_bare", dest).await?;
        std::fs::create_dir_all(dest)?;
        Ok(())
    }

    async fn refresh_dumb_transport_index(
        &self,
        dest: &Path,
        _log: &OperationLog,
    ) -> Result<(), ScmError> {
        self.invoke("refresh_dumb_transport_index", dest).await
    }
}
