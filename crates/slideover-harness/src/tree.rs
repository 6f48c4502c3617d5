#![forbid(unsafe_code)]

//! In-memory [`ViewTree`] that records every mutation.
//!
//! Animations are not run on a clock: they stay pending until a test calls
//! [`MockViewTree::complete`] (or [`settle`]), which applies their final
//! values and yields the completion event to feed back to the presenter.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ahash::AHashMap;
use slideover::{
    AnimationId, Constraint, PackedRgba, Presenter, PresenterAction, PresenterEvent,
    PropertyChange, Rect, Size, Translation, ViewId, ViewTree,
};
use tracing::trace;

/// Recorded state of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct MockView {
    pub parent: Option<ViewId>,
    pub bounds: Rect,
    pub natural_size: Size,
    pub hidden: bool,
    pub alpha: f32,
    pub background: Option<PackedRgba>,
    pub interactive: bool,
    pub transform: Translation,
    pub tappable: bool,
}

impl MockView {
    fn new(bounds: Rect, natural_size: Size) -> Self {
        Self {
            parent: None,
            bounds,
            natural_size,
            hidden: false,
            alpha: 1.0,
            background: None,
            interactive: false,
            transform: Translation::IDENTITY,
            tappable: false,
        }
    }

    /// Background as it would be composited: color scaled by view alpha.
    pub fn visible_background(&self) -> Option<PackedRgba> {
        self.background.map(|c| c.with_opacity(self.alpha))
    }
}

/// One recorded call on the tree, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreateView(ViewId),
    AddSubview { parent: ViewId, child: ViewId },
    Remove(ViewId),
    Activate(Constraint),
    SetHidden(ViewId, bool),
    SetAlpha(ViewId, f32),
    SetBackground(ViewId, PackedRgba),
    SetInteractive(ViewId, bool),
    SetTransform(ViewId, Translation),
    AddTap(ViewId),
    Animate(AnimationId),
}

/// Shared handle to a tree's call log.
///
/// Clones read the same log, so an observer boxed into the presenter can see
/// how many calls had been issued when each hook ran.
#[derive(Debug, Clone, Default)]
pub struct OpLog(Rc<RefCell<Vec<Op>>>);

impl OpLog {
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// An issued animation that has not completed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnimation {
    pub id: AnimationId,
    pub duration: Duration,
    pub changes: Vec<PropertyChange>,
}

#[derive(Debug, Default)]
pub struct MockViewTree {
    views: AHashMap<ViewId, MockView>,
    default_host: Option<ViewId>,
    next_view: u64,
    next_animation: u64,
    constraints: Vec<Constraint>,
    pending: Vec<PendingAnimation>,
    ops: OpLog,
}

impl MockViewTree {
    /// Empty tree without a default host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree whose default host is a window of `size`.
    pub fn with_window(size: Size) -> Self {
        let mut tree = Self::new();
        let window = tree.add_host(Rect::from_size(size));
        tree.default_host = Some(window);
        tree
    }

    pub fn window(&self) -> Option<ViewId> {
        self.default_host
    }

    /// Register a detached container view with the given bounds.
    pub fn add_host(&mut self, bounds: Rect) -> ViewId {
        self.insert(MockView::new(bounds, bounds.size()))
    }

    /// Register a detached content view reporting `natural_size`.
    pub fn add_view(&mut self, natural_size: Size) -> ViewId {
        self.insert(MockView::new(Rect::from_size(natural_size), natural_size))
    }

    fn insert(&mut self, view: MockView) -> ViewId {
        self.next_view += 1;
        let id = ViewId::new(self.next_view);
        self.views.insert(id, view);
        id
    }

    pub fn view(&self, id: ViewId) -> Option<&MockView> {
        self.views.get(&id)
    }

    pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(&id).and_then(|v| v.parent)
    }

    pub fn children_of(&self, parent: ViewId) -> Vec<ViewId> {
        let mut children: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, v)| v.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect();
        children.sort();
        children
    }

    /// Active constraints whose item is `view`.
    pub fn constraints_for(&self, view: ViewId) -> Vec<Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.item == view)
            .copied()
            .collect()
    }

    /// Calls issued so far, in order.
    pub fn ops(&self) -> Vec<Op> {
        self.ops.snapshot()
    }

    /// Handle onto the live call log.
    pub fn op_log(&self) -> OpLog {
        self.ops.clone()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn pending(&self) -> &[PendingAnimation] {
        &self.pending
    }

    /// Finish one pending animation, applying its end values.
    ///
    /// Returns the event to hand to the presenter, or `None` if `id` is not
    /// pending.
    pub fn complete(&mut self, id: AnimationId) -> Option<PresenterEvent> {
        let idx = self.pending.iter().position(|a| a.id == id)?;
        let animation = self.pending.remove(idx);
        for change in animation.changes {
            if let PropertyChange::Transform { view, to } = change
                && let Some(v) = self.views.get_mut(&view)
            {
                v.transform = to;
            }
        }
        trace!(animation = id.raw(), "animation completed");
        Some(PresenterEvent::AnimationFinished(id))
    }

    /// Simulate a tap. Only views with a tap recognizer that are visible
    /// and interactive produce an event.
    pub fn tap(&self, view: ViewId) -> Option<PresenterEvent> {
        let v = self.views.get(&view)?;
        (v.tappable && v.interactive && !v.hidden && v.parent.is_some())
            .then_some(PresenterEvent::Tapped(view))
    }

    fn with_view(&mut self, id: ViewId, f: impl FnOnce(&mut MockView)) {
        if let Some(view) = self.views.get_mut(&id) {
            f(view);
        }
    }
}

impl ViewTree for MockViewTree {
    fn default_host(&self) -> Option<ViewId> {
        self.default_host
    }

    fn bounds(&self, view: ViewId) -> Rect {
        self.views.get(&view).map_or(Rect::ZERO, |v| v.bounds)
    }

    fn natural_size(&self, view: ViewId) -> Size {
        self.views.get(&view).map_or(Size::ZERO, |v| v.natural_size)
    }

    fn create_view(&mut self) -> ViewId {
        let id = self.insert(MockView::new(Rect::ZERO, Size::ZERO));
        self.ops.push(Op::CreateView(id));
        id
    }

    fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        self.with_view(child, |v| v.parent = Some(parent));
        self.ops.push(Op::AddSubview { parent, child });
    }

    fn remove_from_superview(&mut self, view: ViewId) {
        self.with_view(view, |v| v.parent = None);
        self.constraints.retain(|c| c.item != view);
        self.ops.push(Op::Remove(view));
    }

    fn activate(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
        self.ops.push(Op::Activate(constraint));
    }

    fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        self.with_view(view, |v| v.hidden = hidden);
        self.ops.push(Op::SetHidden(view, hidden));
    }

    fn set_alpha(&mut self, view: ViewId, alpha: f32) {
        self.with_view(view, |v| v.alpha = alpha);
        self.ops.push(Op::SetAlpha(view, alpha));
    }

    fn set_background(&mut self, view: ViewId, color: PackedRgba) {
        self.with_view(view, |v| v.background = Some(color));
        self.ops.push(Op::SetBackground(view, color));
    }

    fn set_interactive(&mut self, view: ViewId, interactive: bool) {
        self.with_view(view, |v| v.interactive = interactive);
        self.ops.push(Op::SetInteractive(view, interactive));
    }

    fn set_transform(&mut self, view: ViewId, transform: Translation) {
        self.with_view(view, |v| v.transform = transform);
        self.ops.push(Op::SetTransform(view, transform));
    }

    fn add_tap_recognizer(&mut self, view: ViewId) {
        self.with_view(view, |v| v.tappable = true);
        self.ops.push(Op::AddTap(view));
    }

    fn animate(&mut self, duration: Duration, changes: Vec<PropertyChange>) -> AnimationId {
        self.next_animation += 1;
        let id = AnimationId::new(self.next_animation);
        for change in &changes {
            if let PropertyChange::Hidden { view, hidden } = *change {
                self.with_view(view, |v| v.hidden = hidden);
            }
        }
        self.pending.push(PendingAnimation {
            id,
            duration,
            changes,
        });
        self.ops.push(Op::Animate(id));
        id
    }
}

/// Complete every pending animation in issue order and feed the completions
/// to `presenter`, returning the actions it reported.
pub fn settle(tree: &mut MockViewTree, presenter: &mut Presenter) -> Vec<PresenterAction> {
    let ids: Vec<AnimationId> = tree.pending().iter().map(|a| a.id).collect();
    let mut actions = Vec::new();
    for id in ids {
        if let Some(event) = tree.complete(id)
            && let Some(action) = presenter.handle_event(tree, event)
        {
            actions.push(action);
        }
    }
    actions
}
