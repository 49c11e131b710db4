use std::sync::Arc;

pub type LogResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Status channel read by the hub. `info` is the OK level, `error` the
/// ERROR level. `debug` lines only show up when debugging is switched on.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> LogResult;
    fn error(&self, message: &str) -> LogResult;
    fn debug(&self, message: &str) -> LogResult;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
