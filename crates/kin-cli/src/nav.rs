//! Navigation controller: which page the session is on and how it got there.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("nothing to go back to")]
    NothingToGoBackTo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Main,
    Detail { doc_id: String },
    MyQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Home,
    OpenDetail(String),
    OpenMyQuestions,
    Back,
}

/// Current page, back-stack and the questions the user chose to track.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Page,
    history: Vec<Page>,
    tracked: Vec<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Page::Main,
            history: Vec::new(),
            tracked: Vec::new(),
        }
    }

    pub fn current(&self) -> &Page {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Apply a transition. `exists` decides whether a doc_id can be opened.
    pub fn apply(
        &mut self,
        action: NavAction,
        exists: impl Fn(&str) -> bool,
    ) -> Result<&Page, NavError> {
        let next = match action {
            NavAction::Home => {
                self.history.clear();
                self.current = Page::Main;
                return Ok(&self.current);
            }
            NavAction::Back => {
                self.current = self.history.pop().ok_or(NavError::NothingToGoBackTo)?;
                return Ok(&self.current);
            }
            NavAction::OpenDetail(doc_id) => {
                if !exists(doc_id.as_str()) {
                    return Err(NavError::UnknownQuestion(doc_id));
                }
                Page::Detail { doc_id }
            }
            NavAction::OpenMyQuestions => Page::MyQuestions,
        };

        if next != self.current {
            let prev = std::mem::replace(&mut self.current, next);
            self.history.push(prev);
        }
        Ok(&self.current)
    }

    /// Add to "my questions". Returns false if already tracked.
    pub fn track(&mut self, doc_id: &str, exists: impl Fn(&str) -> bool) -> Result<bool, NavError> {
        if !exists(doc_id) {
            return Err(NavError::UnknownQuestion(doc_id.to_string()));
        }
        if self.tracked.iter().any(|d| d == doc_id) {
            return Ok(false);
        }
        self.tracked.push(doc_id.to_string());
        Ok(true)
    }

    pub fn untrack(&mut self, doc_id: &str) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|d| d != doc_id);
        before != self.tracked.len()
    }

    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Drop pages and tracked ids that no longer exist (after a reload).
    pub fn retain_known(&mut self, exists: impl Fn(&str) -> bool) {
        let keep = |page: &Page| match page {
            Page::Detail { doc_id } => exists(doc_id.as_str()),
            _ => true,
        };
        self.history.retain(|p| keep(p));
        if !keep(&self.current) {
            self.current = self.history.pop().unwrap_or(Page::Main);
        }
        self.tracked.retain(|d| exists(d.as_str()));
    }
}
