#![forbid(unsafe_code)]

//! Observer that records hook calls into a shared log.

use std::cell::RefCell;
use std::rc::Rc;

use slideover::{Dismissal, PresenterObserver};

use crate::tree::OpLog;

/// A hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    WillShow,
    DidShow,
    WillClose,
    DidClose,
    BackdropTapped,
}

/// Records every hook call. Clones share the same log, so a test keeps one
/// handle and boxes another into the presenter.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: Rc<RefCell<Vec<Hook>>>,
    marks: Rc<RefCell<Vec<(Hook, usize)>>>,
    tree_ops: Option<OpLog>,
    dismissal: Dismissal,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer backdrop taps with `dismissal`.
    pub fn dismissal(mut self, dismissal: Dismissal) -> Self {
        self.dismissal = dismissal;
        self
    }

    /// Also note how many tree calls had been issued when each hook ran.
    pub fn watching(mut self, ops: OpLog) -> Self {
        self.tree_ops = Some(ops);
        self
    }

    pub fn hooks(&self) -> Vec<Hook> {
        self.log.borrow().clone()
    }

    /// Each hook paired with the tree's call count at that moment. Empty
    /// unless built with [`watching`](Self::watching).
    pub fn marks(&self) -> Vec<(Hook, usize)> {
        self.marks.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
        self.marks.borrow_mut().clear();
    }

    fn record(&self, hook: Hook) {
        self.log.borrow_mut().push(hook);
        if let Some(ops) = &self.tree_ops {
            self.marks.borrow_mut().push((hook, ops.len()));
        }
    }
}

impl PresenterObserver for RecordingObserver {
    fn will_show(&mut self) {
        self.record(Hook::WillShow);
    }

    fn did_show(&mut self) {
        self.record(Hook::DidShow);
    }

    fn will_close(&mut self) {
        self.record(Hook::WillClose);
    }

    fn did_close(&mut self) {
        self.record(Hook::DidClose);
    }

    fn backdrop_tapped(&mut self) -> Dismissal {
        self.record(Hook::BackdropTapped);
        self.dismissal
    }
}
