use crate::{Result, Version};

/// Live connection seam. Driver-native row access stays on the concrete
/// adapter type.
pub trait DatabaseAdapter: Send {
    fn execute(&self, sql: &str) -> Result<()>;

    fn ping(&self) -> Result<bool>;

    fn server_version(&self) -> Result<Version>;
}
