use std::cell::RefCell;

use crate::error::{ReleaseError, Result};
use crate::tools::{BuildTool, PublishRequest, ReleaseHost, VersionControl};

/// Ordered log of operation names invoked on a fake
#[derive(Debug, Default)]
struct CallLog {
    calls: RefCell<Vec<&'static str>>,
    failing: Option<&'static str>,
}

impl CallLog {
    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(op);
        if self.failing == Some(op) {
            return Err(ReleaseError::command(op, "injected failure"));
        }
        Ok(())
    }

    fn count(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == op).count()
    }

    fn all(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

/// Fake version control: on `main`, merge in progress, no tags
#[derive(Debug)]
pub struct MockVersionControl {
    available: bool,
    branch: String,
    merge_head: bool,
    tags: Vec<String>,
    log: CallLog,
}

impl MockVersionControl {
    pub fn new() -> Self {
        MockVersionControl {
            available: true,
            branch: "main".to_string(),
            merge_head: true,
            tags: Vec::new(),
            log: CallLog::default(),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_merge_head(mut self, present: bool) -> Self {
        self.merge_head = present;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Make the named operation (e.g. `"current_branch"`) return an error
    pub fn failing(mut self, op: &'static str) -> Self {
        self.log.failing = Some(op);
        self
    }

    /// Number of times `op` was invoked
    pub fn call_count(&self, op: &str) -> usize {
        self.log.count(op)
    }

    /// Operations in invocation order
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.all()
    }
}

impl Default for MockVersionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockVersionControl {
    fn is_available(&self) -> Result<bool> {
        self.log.record("is_available")?;
        Ok(self.available)
    }

    fn current_branch(&self) -> Result<String> {
        self.log.record("current_branch")?;
        Ok(self.branch.clone())
    }

    fn is_merge_commit(&self) -> Result<bool> {
        self.log.record("is_merge_commit")?;
        Ok(self.merge_head)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        self.log.record("list_tags")?;
        Ok(self.tags.clone())
    }
}

/// Fake release host: installed, authenticated, publishing succeeds
#[derive(Debug)]
pub struct MockReleaseHost {
    available: bool,
    token: String,
    publish_error: Option<String>,
    requests: RefCell<Vec<PublishRequest>>,
    log: CallLog,
}

impl MockReleaseHost {
    pub fn new() -> Self {
        MockReleaseHost {
            available: true,
            token: "gho_test_token".to_string(),
            publish_error: None,
            requests: RefCell::new(Vec::new()),
            log: CallLog::default(),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn failing_publish(mut self, message: impl Into<String>) -> Self {
        self.publish_error = Some(message.into());
        self
    }

    /// Make the named operation (e.g. `"auth_token"`) return an error
    pub fn failing(mut self, op: &'static str) -> Self {
        self.log.failing = Some(op);
        self
    }

    /// Every request passed to `create_release`, in order
    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.borrow().clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.log.count(op)
    }
}

impl Default for MockReleaseHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseHost for MockReleaseHost {
    fn is_available(&self) -> Result<bool> {
        self.log.record("is_available")?;
        Ok(self.available)
    }

    fn auth_token(&self) -> Result<String> {
        self.log.record("auth_token")?;
        Ok(self.token.clone())
    }

    fn create_release(&self, request: &PublishRequest) -> Result<String> {
        self.log.record("create_release")?;
        self.requests.borrow_mut().push(request.clone());
        match &self.publish_error {
            Some(message) => Err(ReleaseError::publish(message.clone())),
            None => Ok(format!(
                "https://github.com/example/tmgr/releases/tag/{}",
                request.tag
            )),
        }
    }
}

/// Fake build tool reporting a fixed package identifier
#[derive(Debug)]
pub struct MockBuildTool {
    package_id: String,
    build_error: Option<String>,
    log: CallLog,
}

impl MockBuildTool {
    pub fn new(package_id: impl Into<String>) -> Self {
        MockBuildTool {
            package_id: package_id.into(),
            build_error: None,
            log: CallLog::default(),
        }
    }

    pub fn failing_build(mut self, message: impl Into<String>) -> Self {
        self.build_error = Some(message.into());
        self
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.log.count(op)
    }
}

impl BuildTool for MockBuildTool {
    fn package_id(&self) -> Result<String> {
        self.log.record("package_id")?;
        Ok(self.package_id.clone())
    }

    fn build_release(&self) -> Result<()> {
        self.log.record("build_release")?;
        match &self.build_error {
            Some(message) => Err(ReleaseError::build(message.clone())),
            None => Ok(()),
        }
    }
}
