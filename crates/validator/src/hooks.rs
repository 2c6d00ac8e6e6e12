//! Process-wide default failure hook.

use parking_lot::RwLock;

use crate::options::FailHook;
use crate::tree::ErrorTree;

static DEFAULT_FAIL_HOOK: RwLock<Option<FailHook>> = parking_lot::const_rwlock(None);

/// Installs the hook called for failing validations of validators that have
/// no session hook of their own. Replaces any previous default.
pub fn set_default_fail_hook<F>(hook: F)
where
    F: Fn(&ErrorTree) + Send + Sync + 'static,
{
    *DEFAULT_FAIL_HOOK.write() = Some(std::sync::Arc::new(hook));
}

/// Removes the default hook.
pub fn clear_default_fail_hook() {
    DEFAULT_FAIL_HOOK.write().take();
}

/// Currently installed default hook.
pub(crate) fn default_fail_hook() -> Option<FailHook> {
    DEFAULT_FAIL_HOOK.read().clone()
}
