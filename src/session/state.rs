//! Module `state`
//!
//! Defines the `Session` struct holding the per-run state of the shell:
//! the root directory, the current directory, the user name and the
//! input-suppression flag shared with the output writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// State of the single interactive session.
///
/// `current_dir` is always `root_dir` or one of its descendants. Only the
/// navigation commands move it.
#[derive(Debug)]
pub struct Session {
    root_dir: PathBuf,
    current_dir: PathBuf,
    user_name: String,
    input_suppressed: Arc<AtomicBool>,
}

impl Session {
    /// Creates a session rooted at `root_dir`, starting in the root itself.
    pub fn new(root_dir: PathBuf, user_name: String) -> Self {
        Self {
            current_dir: root_dir.clone(),
            root_dir,
            user_name,
            input_suppressed: Arc::new(AtomicBool::new(false)),
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the root directory every path is confined to.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Returns the current working directory.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Returns whether incoming lines are currently being discarded.
    pub fn is_input_suppressed(&self) -> bool {
        self.input_suppressed.load(Ordering::SeqCst)
    }

    /// Returns a handle on the suppression flag.
    ///
    /// The output writer is the only party that toggles it.
    pub fn suppression_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.input_suppressed)
    }

    /// Returns whether the session sits at its root directory, comparing
    /// the way the root check does.
    pub fn is_at_root(&self) -> bool {
        crate::storage::is_root(&self.root_dir, &self.current_dir)
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Moves the session to an already validated directory.
    pub fn set_current_dir(&mut self, dir: PathBuf) {
        debug_assert!(crate::storage::is_within_root(&self.root_dir, &dir));
        self.current_dir = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_at_root() {
        let session = Session::new(PathBuf::from("/home/user"), "alice".into());
        assert_eq!(session.current_dir(), Path::new("/home/user"));
        assert!(session.is_at_root());
        assert!(!session.is_input_suppressed());
        assert_eq!(session.user_name(), "alice");
    }

    #[test]
    fn test_suppression_flag_is_shared() {
        let session = Session::new(PathBuf::from("/home/user"), "alice".into());
        let flag = session.suppression_flag();
        flag.store(true, Ordering::SeqCst);
        assert!(session.is_input_suppressed());
    }

    #[test]
    fn test_set_current_dir() {
        let mut session = Session::new(PathBuf::from("/home/user"), "alice".into());
        session.set_current_dir(PathBuf::from("/home/user/docs"));
        assert_eq!(session.current_dir(), Path::new("/home/user/docs"));
        assert!(!session.is_at_root());
    }

    #[test]
    fn test_case_variant_of_root_counts_as_root() {
        let mut session = Session::new(PathBuf::from("/tmp/Root"), "alice".into());
        session.set_current_dir(PathBuf::from("/tmp/root"));
        assert!(session.is_at_root());
    }
}
