//! Single-subject focus session: a countdown bound to a subject, with
//! free-text notes and the block-list of distracting sites.
//!
//! The block-list is tracked only; enforcing it is an external
//! capability.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::events::Event;
use crate::timer::{TimerMachine, TimerStatus};

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;

pub fn default_blocked_sites() -> Vec<String> {
    [
        "facebook.com",
        "instagram.com",
        "twitter.com",
        "youtube.com",
        "netflix.com",
        "reddit.com",
    ]
    .map(String::from)
    .to_vec()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    timer: TimerMachine,
    notes: String,
    blocked_sites: Vec<String>,
}

impl FocusSession {
    /// A session with no subject yet; `configure` must run before `start`.
    pub fn new(duration_secs: u64, blocked_sites: Vec<String>) -> Result<Self, EngineError> {
        Ok(Self {
            timer: TimerMachine::new(duration_secs, None)?,
            notes: String::new(),
            blocked_sites,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subject(&self) -> Option<&str> {
        self.timer.label()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn blocked_sites(&self) -> &[String] {
        &self.blocked_sites
    }

    pub fn status(&self) -> TimerStatus {
        self.timer.status()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.timer.remaining_secs()
    }

    pub fn duration_secs(&self) -> u64 {
        self.timer.duration_secs()
    }

    pub fn progress(&self) -> f64 {
        self.timer.progress()
    }

    /// The "focus active" flag collaborators key off.
    pub fn is_active(&self) -> bool {
        self.timer.is_running()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set up the next session. The subject is required; rejected mid-run
    /// like any reconfiguration.
    pub fn configure(
        &mut self,
        subject: &str,
        duration_secs: u64,
        notes: &str,
    ) -> Result<(), EngineError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(EngineError::EmptySubject);
        }
        self.timer.configure(duration_secs, Some(subject.to_string()))?;
        self.notes = notes.to_string();
        Ok(())
    }

    pub fn start(&mut self) -> Result<Event, EngineError> {
        if self.timer.label().is_none() {
            return Err(EngineError::EmptySubject);
        }
        self.timer.start()
    }

    pub fn pause(&mut self) -> Result<Event, EngineError> {
        self.timer.pause()
    }

    pub fn stop(&mut self) -> Event {
        self.timer.stop()
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.timer.tick()
    }

    /// Add to the block-list; trimmed and de-duplicated. Returns whether
    /// the site was actually added.
    pub fn block_site(&mut self, site: &str) -> bool {
        let site = site.trim();
        if site.is_empty() || self.blocked_sites.iter().any(|s| s == site) {
            return false;
        }
        self.blocked_sites.push(site.to_string());
        true
    }

    /// Returns whether the site was present.
    pub fn unblock_site(&mut self, site: &str) -> bool {
        let before = self.blocked_sites.len();
        self.blocked_sites.retain(|s| s != site.trim());
        self.blocked_sites.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> FocusSession {
        FocusSession::new(DEFAULT_FOCUS_SECS, default_blocked_sites()).unwrap()
    }

    #[test]
    fn cannot_start_without_a_subject() {
        let mut s = session();
        assert_eq!(s.start().unwrap_err(), EngineError::EmptySubject);
    }

    #[test]
    fn configure_requires_a_subject() {
        let mut s = session();
        assert_eq!(
            s.configure("   ", 1500, "").unwrap_err(),
            EngineError::EmptySubject
        );
    }

    #[test]
    fn configured_session_runs_to_completion() {
        let mut s = session();
        s.configure("Accounting", 3, "chapter 4 problems").unwrap();
        s.start().unwrap();
        assert!(s.is_active());

        s.tick();
        s.tick();
        assert!(matches!(s.tick(), Some(Event::TimerCompleted { .. })));
        assert!(!s.is_active());
        assert_eq!(s.subject(), Some("Accounting"));
        assert_eq!(s.notes(), "chapter 4 problems");
    }

    #[test]
    fn block_list_deduplicates() {
        let mut s = session();
        let before = s.blocked_sites().len();
        assert!(s.block_site("news.example.com"));
        assert!(!s.block_site("  news.example.com "));
        assert!(!s.block_site("facebook.com")); // already a default
        assert_eq!(s.blocked_sites().len(), before + 1);
    }

    #[test]
    fn unblock_reports_presence() {
        let mut s = session();
        assert!(s.unblock_site("reddit.com"));
        assert!(!s.unblock_site("reddit.com"));
    }
}
