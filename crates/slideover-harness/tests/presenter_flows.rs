#![forbid(unsafe_code)]

//! Integration tests: full show/close flows against the mock view tree.

use std::time::Duration;

use proptest::prelude::*;
use slideover::{
    Anchor, BackdropRequest, CloseOutcome, Direction, Dismissal, Margin, PackedRgba, Phase,
    Presenter, PresenterAction, PresenterConfig, PresenterEvent, PresenterState,
    PresentationOptions, PropertyChange, Rect, Relation, ShowOutcome, ShowRequest, Size,
    Translation, ViewId,
};
use slideover_harness::{Hook, MockViewTree, Op, RecordingObserver, settle};

const WINDOW: Size = Size::new(400.0, 800.0);
const PANEL: Size = Size::new(400.0, 200.0);

fn rig() -> (MockViewTree, ViewId, Presenter) {
    let mut tree = MockViewTree::with_window(WINDOW);
    let panel = tree.add_view(PANEL);
    (tree, panel, Presenter::new())
}

fn window(tree: &MockViewTree) -> ViewId {
    tree.window().expect("mock tree has a window")
}

fn side_constant(tree: &MockViewTree, panel: ViewId, anchor: Anchor) -> Option<f64> {
    tree.constraints_for(panel)
        .into_iter()
        .find(|c| c.anchor == anchor)
        .and_then(|c| match c.relation {
            Relation::To { constant, .. } => Some(constant),
            Relation::Constant(_) => None,
        })
}

fn presented(outcome: ShowOutcome) -> slideover::AnimationId {
    match outcome {
        ShowOutcome::Presented { slide_in } => slide_in,
        other => panic!("expected presentation, got {other:?}"),
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn bottom_entry_offsets_by_panel_height() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));

    assert_eq!(presenter.state().offset(), Some(Translation::new(0.0, 200.0)));
    assert_eq!(
        tree.view(panel).unwrap().transform,
        Translation::new(0.0, 200.0)
    );
}

#[test]
fn centered_bottom_entry_offsets_by_half_host_plus_height() {
    let (mut tree, panel, mut presenter) = rig();
    let request = ShowRequest::new(panel).margin(Margin::new().centered(true));
    let _ = presenter.show(&mut tree, request);

    assert_eq!(presenter.state().offset(), Some(Translation::new(0.0, 600.0)));
    assert!(side_constant(&tree, panel, Anchor::CenterY).is_some());
    assert!(side_constant(&tree, panel, Anchor::Bottom).is_none());
}

#[test]
fn left_entry_offsets_by_width_minus_right_margin() {
    let (mut tree, panel, mut presenter) = rig();
    let request = ShowRequest::new(panel)
        .direction(Direction::Left)
        .margin(Margin::sides(0.0, 20.0));
    let _ = presenter.show(&mut tree, request);

    assert_eq!(presenter.state().offset(), Some(Translation::new(-380.0, 0.0)));
}

#[test]
fn side_anchors_follow_margins_for_every_direction() {
    for direction in Direction::ALL {
        let (mut tree, panel, mut presenter) = rig();
        let options = PresentationOptions::from_direction(direction)
            .margin(Margin::sides(12.0, 30.0).top(5.0).bottom(7.0));
        let _ = presenter.show(&mut tree, ShowRequest::new(panel).options(options));

        assert_eq!(side_constant(&tree, panel, Anchor::Left), Some(12.0), "{direction:?}");
        assert_eq!(side_constant(&tree, panel, Anchor::Right), Some(-30.0), "{direction:?}");
    }
}

#[test]
fn natural_height_is_pinned_when_margin_height_is_zero() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));

    let height = tree
        .constraints_for(panel)
        .into_iter()
        .find(|c| c.anchor == Anchor::Height)
        .map(|c| c.relation);
    assert_eq!(height, Some(Relation::Constant(200.0)));
}

// ============================================================================
// Show
// ============================================================================

#[test]
fn show_attaches_backdrop_below_panel_and_slides_in() {
    let (mut tree, panel, mut presenter) = rig();
    let slide_in = presented(presenter.show(&mut tree, ShowRequest::new(panel)));

    let backdrop = presenter.state().backdrop().expect("backdrop attached");
    let host = window(&tree);
    let adds: Vec<ViewId> = tree
        .ops()
        .iter()
        .filter_map(|op| match op {
            Op::AddSubview { parent, child } if *parent == host => Some(*child),
            _ => None,
        })
        .collect();
    assert_eq!(adds, vec![backdrop.view, panel]);

    let pending = &tree.pending()[0];
    assert_eq!(pending.id, slide_in);
    assert_eq!(pending.duration, Duration::from_millis(300));
    assert_eq!(
        pending.changes,
        vec![PropertyChange::Transform {
            view: panel,
            to: Translation::IDENTITY
        }]
    );
    assert!(!tree.view(panel).unwrap().hidden);

    let actions = settle(&mut tree, &mut presenter);
    assert_eq!(actions, vec![PresenterAction::SlideInFinished]);
    assert_eq!(tree.view(panel).unwrap().transform, Translation::IDENTITY);
    assert_eq!(presenter.state().phase(), Phase::Shown);
}

#[test]
fn panel_is_hidden_while_offset_is_applied() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));

    let ops = tree.ops();
    let hide = ops
        .iter()
        .position(|op| *op == Op::SetHidden(panel, true))
        .unwrap();
    let jump = ops
        .iter()
        .position(|op| matches!(op, Op::SetTransform(v, _) if *v == panel))
        .unwrap();
    let reveal = ops
        .iter()
        .position(|op| *op == Op::SetHidden(panel, false))
        .unwrap();
    let animate = ops
        .iter()
        .position(|op| matches!(op, Op::Animate(_)))
        .unwrap();
    assert!(hide < jump && jump < reveal && reveal < animate);
}

#[test]
fn second_show_changes_nothing() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new();
    presenter.set_observer(Box::new(observer.clone()));

    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let state = presenter.state().clone();
    let ops = tree.ops().len();

    let other = tree.add_view(PANEL);
    assert_eq!(
        presenter.show(&mut tree, ShowRequest::new(other)),
        ShowOutcome::AlreadyShown
    );
    assert_eq!(presenter.state(), &state);
    assert_eq!(tree.ops().len(), ops);
    assert_eq!(observer.hooks(), vec![Hook::WillShow, Hook::DidShow]);
    assert_eq!(tree.parent_of(other), None);
}

#[test]
fn show_while_closing_is_rejected() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let _ = presenter.close(&mut tree);

    assert_eq!(
        presenter.show(&mut tree, ShowRequest::new(panel)),
        ShowOutcome::AlreadyShown
    );
}

#[test]
fn will_show_runs_before_the_tree_is_touched() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new().watching(tree.op_log());
    presenter.set_observer(Box::new(observer.clone()));

    let _ = presenter.show(&mut tree, ShowRequest::new(panel));

    let issued = tree.ops().len();
    assert!(issued > 0);
    assert_eq!(
        observer.marks(),
        vec![(Hook::WillShow, 0), (Hook::DidShow, issued)]
    );
}

#[test]
fn explicit_host_takes_priority_over_window() {
    let (mut tree, panel, mut presenter) = rig();
    let sheet_host = tree.add_host(Rect::new(0.0, 0.0, 300.0, 600.0));
    let _ = presenter.show(&mut tree, ShowRequest::new(panel).host(sheet_host));

    assert_eq!(presenter.state().host(), Some(sheet_host));
    assert_eq!(tree.parent_of(panel), Some(sheet_host));
    assert!(tree.children_of(window(&tree)).is_empty());
}

#[test]
fn missing_host_is_a_silent_noop() {
    let mut tree = MockViewTree::new();
    let panel = tree.add_view(PANEL);
    let mut presenter = Presenter::new();
    let observer = RecordingObserver::new();
    presenter.set_observer(Box::new(observer.clone()));

    assert_eq!(
        presenter.show(&mut tree, ShowRequest::new(panel)),
        ShowOutcome::NoHost
    );
    assert!(tree.ops().is_empty());
    assert!(observer.hooks().is_empty());
    assert_eq!(presenter.state(), &PresenterState::default());
}

#[tracing_test::traced_test]
#[test]
fn zero_area_host_logs_warning_and_still_presents() {
    let (mut tree, panel, mut presenter) = rig();
    let collapsed = tree.add_host(Rect::ZERO);
    let outcome = presenter.show(&mut tree, ShowRequest::new(panel).host(collapsed));

    assert!(matches!(outcome, ShowOutcome::Presented { .. }));
    assert!(presenter.is_shown());
    assert!(logs_contain("host bounds are zero"));
}

#[test]
fn custom_show_duration_reaches_the_animation() {
    let (mut tree, panel, mut presenter) = rig();
    let request = ShowRequest::new(panel).duration(Duration::from_millis(450));
    let _ = presenter.show(&mut tree, request);
    assert_eq!(tree.pending()[0].duration, Duration::from_millis(450));
}

// ============================================================================
// Backdrop
// ============================================================================

#[test]
fn generated_backdrop_gets_configured_style_and_fills_host() {
    let mut tree = MockViewTree::with_window(WINDOW);
    let panel = tree.add_view(PANEL);
    let mut presenter = Presenter::with_config(
        PresenterConfig::new()
            .backdrop_color(PackedRgba::rgb(20, 20, 40))
            .backdrop_alpha(0.4),
    );
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));

    let backdrop = presenter.state().backdrop().unwrap();
    assert!(backdrop.generated);
    let view = tree.view(backdrop.view).unwrap();
    assert_eq!(view.background, Some(PackedRgba::rgb(20, 20, 40)));
    assert_eq!(view.alpha, 0.4);
    assert!(view.interactive);
    assert!(view.tappable);

    let anchors: Vec<Anchor> = tree
        .constraints_for(backdrop.view)
        .iter()
        .map(|c| c.anchor)
        .collect();
    assert_eq!(
        anchors,
        vec![Anchor::Left, Anchor::Right, Anchor::Top, Anchor::Bottom]
    );
}

#[test]
fn adopted_backdrop_keeps_its_own_style() {
    let (mut tree, panel, mut presenter) = rig();
    let custom = tree.add_view(Size::ZERO);
    let _ = presenter.show(&mut tree, ShowRequest::new(panel).backdrop(custom));

    let backdrop = presenter.state().backdrop().unwrap();
    assert_eq!(backdrop.view, custom);
    assert!(!backdrop.generated);
    let view = tree.view(custom).unwrap();
    assert_eq!(view.background, None);
    assert_eq!(view.alpha, 1.0);
    assert!(view.tappable);
    assert_eq!(tree.constraints_for(custom).len(), 4);
}

#[test]
fn styling_setters_restyle_generated_backdrop_immediately() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let backdrop = presenter.state().backdrop().unwrap().view;

    presenter.set_backdrop_alpha(&mut tree, 0.8);
    presenter.set_backdrop_color(&mut tree, PackedRgba::WHITE);

    let view = tree.view(backdrop).unwrap();
    assert_eq!(view.alpha, 0.8);
    assert_eq!(view.background, Some(PackedRgba::WHITE));
    assert_eq!(
        view.visible_background(),
        Some(PackedRgba::WHITE.with_opacity(0.8))
    );
}

#[test]
fn styling_setters_leave_adopted_backdrop_alone() {
    let (mut tree, panel, mut presenter) = rig();
    let custom = tree.add_view(Size::ZERO);
    let _ = presenter.show(&mut tree, ShowRequest::new(panel).backdrop(custom));
    tree.clear_ops();

    presenter.set_backdrop_alpha(&mut tree, 0.9);
    presenter.set_backdrop_color(&mut tree, PackedRgba::rgb(255, 0, 0));

    assert!(tree.ops().is_empty());
    assert_eq!(tree.view(custom).unwrap().background, None);
    assert_eq!(presenter.config().backdrop_alpha, 0.9);
}

#[test]
fn adopted_backdrop_is_tappable_again_after_reuse() {
    let (mut tree, panel, mut presenter) = rig();
    let custom = tree.add_view(Size::ZERO);

    let _ = presenter.show(&mut tree, ShowRequest::new(panel).backdrop(custom));
    let _ = presenter.close(&mut tree);
    assert!(tree.view(custom).unwrap().hidden);
    settle(&mut tree, &mut presenter);

    let _ = presenter.show(&mut tree, ShowRequest::new(panel).backdrop(custom));
    assert!(!tree.view(custom).unwrap().hidden);
    assert_eq!(tree.tap(custom), Some(PresenterEvent::Tapped(custom)));
    assert_eq!(tree.view(custom).unwrap().background, None);
}

#[test]
fn styling_applies_to_next_generated_backdrop() {
    let (mut tree, panel, mut presenter) = rig();
    presenter.set_backdrop_alpha(&mut tree, 0.25);
    assert!(tree.ops().is_empty());

    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let backdrop = presenter.state().backdrop().unwrap().view;
    assert_eq!(tree.view(backdrop).unwrap().alpha, 0.25);
}

#[test]
fn without_backdrop_nothing_is_tappable() {
    let (mut tree, panel, mut presenter) = rig();
    let request = ShowRequest::new(panel).without_backdrop();
    assert_eq!(request.backdrop, BackdropRequest::Disabled);
    let _ = presenter.show(&mut tree, request);

    assert!(presenter.state().backdrop().is_none());
    assert!(!tree.ops().iter().any(|op| matches!(op, Op::CreateView(_) | Op::AddTap(_))));
    assert_eq!(tree.children_of(window(&tree)), vec![panel]);

    let _ = presenter.close(&mut tree);
    settle(&mut tree, &mut presenter);
    assert_eq!(presenter.state(), &PresenterState::default());
}

// ============================================================================
// Close
// ============================================================================

#[test]
fn close_hides_backdrop_at_once_and_slides_back_to_offset() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    settle(&mut tree, &mut presenter);
    let backdrop = presenter.state().backdrop().unwrap().view;
    let offset = presenter.state().offset().unwrap();

    let CloseOutcome::Closing(id) = presenter.close(&mut tree) else {
        panic!("close should start");
    };
    assert!(tree.view(backdrop).unwrap().hidden);
    assert_eq!(tree.view(panel).unwrap().transform, Translation::IDENTITY);

    let pending = &tree.pending()[0];
    assert_eq!(pending.id, id);
    assert!(pending.changes.contains(&PropertyChange::Transform {
        view: panel,
        to: offset
    }));

    tree.complete(id);
    assert_eq!(tree.view(panel).unwrap().transform, offset);
}

#[test]
fn round_trip_returns_to_fresh_state() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let backdrop = presenter.state().backdrop().unwrap().view;
    let _ = presenter.close(&mut tree);

    let actions = settle(&mut tree, &mut presenter);
    assert!(actions.contains(&PresenterAction::TornDown));
    assert_eq!(presenter.state(), Presenter::new().state());
    assert!(!presenter.is_shown());
    assert_eq!(tree.parent_of(panel), None);
    assert_eq!(tree.parent_of(backdrop), None);
    assert!(tree.children_of(window(&tree)).is_empty());
}

#[test]
fn did_close_fires_before_teardown() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new();
    presenter.set_observer(Box::new(observer.clone()));

    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let _ = presenter.close(&mut tree);

    assert_eq!(
        observer.hooks(),
        vec![Hook::WillShow, Hook::DidShow, Hook::WillClose, Hook::DidClose]
    );
    assert_eq!(tree.parent_of(panel), Some(window(&tree)));
    assert!(presenter.is_shown());

    settle(&mut tree, &mut presenter);
    assert_eq!(tree.parent_of(panel), None);
    assert_eq!(observer.hooks().len(), 4);
}

#[test]
fn redundant_close_calls_are_noops() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new();
    presenter.set_observer(Box::new(observer.clone()));

    assert_eq!(presenter.close(&mut tree), CloseOutcome::NotShown);
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let _ = presenter.close(&mut tree);
    assert_eq!(presenter.close(&mut tree), CloseOutcome::AlreadyClosing);

    let closes = observer
        .hooks()
        .into_iter()
        .filter(|h| *h == Hook::WillClose)
        .count();
    assert_eq!(closes, 1);
}

#[test]
fn close_with_uses_given_duration() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    settle(&mut tree, &mut presenter);

    let _ = presenter.close_with(&mut tree, Duration::from_millis(120));
    assert_eq!(tree.pending()[0].duration, Duration::from_millis(120));
}

#[test]
fn close_mid_slide_in_ignores_late_slide_in_completion() {
    let (mut tree, panel, mut presenter) = rig();
    let slide_in = presented(presenter.show(&mut tree, ShowRequest::new(panel)));
    let CloseOutcome::Closing(closing) = presenter.close(&mut tree) else {
        panic!("close should start");
    };

    let event = tree.complete(slide_in).unwrap();
    assert_eq!(presenter.handle_event(&mut tree, event), None);
    assert_eq!(presenter.state().phase(), Phase::Closing);

    let event = tree.complete(closing).unwrap();
    assert_eq!(
        presenter.handle_event(&mut tree, event),
        Some(PresenterAction::TornDown)
    );
    assert_eq!(presenter.state(), &PresenterState::default());
}

// ============================================================================
// Tap dismissal
// ============================================================================

#[test]
fn backdrop_tap_without_observer_matches_direct_close() {
    let (mut tapped_tree, tapped_panel, mut tapped) = rig();
    let _ = tapped.show(&mut tapped_tree, ShowRequest::new(tapped_panel));
    let backdrop = tapped.state().backdrop().unwrap().view;
    let event = tapped_tree.tap(backdrop).expect("backdrop is tappable");
    let action = tapped.handle_event(&mut tapped_tree, event);
    assert!(matches!(
        action,
        Some(PresenterAction::BackdropTapped {
            dismissal: Dismissal::Close,
            close: Some(CloseOutcome::Closing(_))
        })
    ));
    settle(&mut tapped_tree, &mut tapped);

    let (mut closed_tree, closed_panel, mut closed) = rig();
    let _ = closed.show(&mut closed_tree, ShowRequest::new(closed_panel));
    let _ = closed.close(&mut closed_tree);
    settle(&mut closed_tree, &mut closed);

    assert_eq!(tapped.state(), closed.state());
    assert_eq!(tapped_tree.ops(), closed_tree.ops());
}

#[test]
fn observer_can_defer_dismissal() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new().dismissal(Dismissal::Defer);
    presenter.set_observer(Box::new(observer.clone()));
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    settle(&mut tree, &mut presenter);

    let backdrop = presenter.state().backdrop().unwrap().view;
    let event = tree.tap(backdrop).unwrap();
    assert_eq!(
        presenter.handle_event(&mut tree, event),
        Some(PresenterAction::BackdropTapped {
            dismissal: Dismissal::Defer,
            close: None
        })
    );
    assert_eq!(presenter.state().phase(), Phase::Shown);
    assert!(tree.pending().is_empty());
    assert_eq!(observer.hooks().last(), Some(&Hook::BackdropTapped));
}

#[test]
fn observer_can_choose_close_duration() {
    let (mut tree, panel, mut presenter) = rig();
    let observer = RecordingObserver::new().dismissal(Dismissal::CloseAfter(Duration::from_secs(1)));
    presenter.set_observer(Box::new(observer));
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    settle(&mut tree, &mut presenter);

    let backdrop = presenter.state().backdrop().unwrap().view;
    let event = tree.tap(backdrop).unwrap();
    let _ = presenter.handle_event(&mut tree, event);
    assert_eq!(tree.pending()[0].duration, Duration::from_secs(1));
}

#[test]
fn taps_elsewhere_or_while_closing_are_ignored() {
    let (mut tree, panel, mut presenter) = rig();
    let _ = presenter.show(&mut tree, ShowRequest::new(panel));
    let backdrop = presenter.state().backdrop().unwrap().view;

    assert_eq!(
        presenter.handle_event(&mut tree, PresenterEvent::Tapped(panel)),
        None
    );

    let _ = presenter.close(&mut tree);
    assert!(tree.tap(backdrop).is_none());
    assert_eq!(
        presenter.handle_event(&mut tree, PresenterEvent::Tapped(backdrop)),
        None
    );
}

#[test]
fn sessions_are_independent() {
    let mut tree = MockViewTree::with_window(WINDOW);
    let first_panel = tree.add_view(PANEL);
    let second_panel = tree.add_view(PANEL);
    let mut first = Presenter::new();
    let mut second = Presenter::new();

    let _ = first.show(&mut tree, ShowRequest::new(first_panel));
    let outcome = second.show(
        &mut tree,
        ShowRequest::new(second_panel).direction(Direction::Top),
    );
    assert!(matches!(outcome, ShowOutcome::Presented { .. }));

    let _ = first.close(&mut tree);
    settle(&mut tree, &mut first);
    assert!(!first.is_shown());
    assert!(second.is_shown());
    assert_eq!(tree.parent_of(second_panel), Some(window(&tree)));
}

// ============================================================================
// Properties
// ============================================================================

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn any_show_close_cycle_ends_idle(
        direction in direction_strategy(),
        left in 0u16..60,
        right in 0u16..60,
        height in 0u16..300,
        centered in any::<bool>(),
        backdrop in any::<bool>(),
    ) {
        let (mut tree, panel, mut presenter) = rig();
        let margin = Margin::sides(f64::from(left), f64::from(right))
            .with_height(f64::from(height))
            .centered(centered);
        let mut request = ShowRequest::new(panel).direction(direction).margin(margin);
        if !backdrop {
            request = request.without_backdrop();
        }

        let _ = presenter.show(&mut tree, request);
        prop_assert_eq!(
            Some(tree.view(panel).unwrap().transform),
            presenter.state().offset()
        );

        let _ = presenter.close(&mut tree);
        settle(&mut tree, &mut presenter);
        prop_assert_eq!(presenter.state(), &PresenterState::default());
        prop_assert!(tree.children_of(window(&tree)).is_empty());
    }
}
