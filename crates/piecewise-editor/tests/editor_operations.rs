//! Direct (non-debounced) facade operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use piecewise_core::{
    ActorContext, ControlPoint, DataRange, ImagesContext, Node, PiecewiseGaussian, StateEvent,
};
use piecewise_editor::{
    ColorStop, DispatchError, EditorConfig, EditorError, FlushOutcome, HeadlessWidget,
    OutboundStateEvents, PiecewiseEditor, StateService,
};

const EPSILON: f64 = 1e-9;

struct Harness {
    editor: PiecewiseEditor<HeadlessWidget>,
    images: Arc<RwLock<ImagesContext>>,
    outbound: Arc<OutboundStateEvents>,
}

fn harness(points: Vec<ControlPoint>) -> Harness {
    let mut images = ImagesContext::default();
    images.select_image(
        "ct",
        ActorContext::default().with_component_range(0, DataRange::new(0.0, 1000.0)),
    );
    images.piecewise_functions_ready = true;
    let images = Arc::new(RwLock::new(images));
    let outbound = Arc::new(OutboundStateEvents::default());

    let editor = PiecewiseEditor::new(
        HeadlessWidget::new(points),
        images.clone(),
        outbound.clone(),
        &EditorConfig::default(),
    )
    .expect("tokio runtime should be available");

    Harness {
        editor,
        images,
        outbound,
    }
}

/// State service that refuses points-changed events and counts every call.
#[derive(Default)]
struct RejectingPointsService {
    sends: AtomicUsize,
}

impl StateService for RejectingPointsService {
    fn send(&self, event: StateEvent) -> Result<(), DispatchError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        match event {
            StateEvent::PointsChanged(_) => Err(DispatchError::ServiceClosed {
                event: event.type_name(),
            }),
            _ => Ok(()),
        }
    }
}

fn ready_images() -> Arc<RwLock<ImagesContext>> {
    let mut images = ImagesContext::default();
    images.select_image("ct", ActorContext::default());
    images.piecewise_functions_ready = true;
    Arc::new(RwLock::new(images))
}

fn example_points() -> Vec<ControlPoint> {
    vec![ControlPoint::new(0.2, 0.1), ControlPoint::new(0.8, 0.9)]
}

fn assert_nodes_close(actual: &[Node], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "node count mismatch: {actual:?}");
    for (node, &(x, y)) in actual.iter().zip(expected) {
        assert!((node.x - x).abs() < EPSILON, "x mismatch: got {}, expected {x}", node.x);
        assert_eq!(node.y, y);
        assert_eq!(node.midpoint, 0.5);
        assert_eq!(node.sharpness, 0.0);
    }
}

#[test]
fn new_outside_runtime_fails() {
    let result = PiecewiseEditor::new(
        HeadlessWidget::default(),
        Arc::new(RwLock::new(ImagesContext::default())),
        Arc::new(OutboundStateEvents::default()),
        &EditorConfig::default(),
    );
    assert!(matches!(result, Err(EditorError::NoRuntime(_))));
}

#[tokio::test(start_paused = true)]
async fn set_points_dispatches_immediately_in_order() {
    let h = harness(Vec::new());

    let outcome = h.editor.set_points(example_points()).unwrap();
    assert_eq!(outcome, FlushOutcome::Dispatched);
    assert!(!h.editor.is_update_pending());

    let events = h.outbound.drain();
    assert_eq!(events.len(), 2);

    let StateEvent::PointsChanged(points) = &events[0] else {
        panic!("first event should be points-changed, got {:?}", events[0]);
    };
    assert_eq!(points.name, "ct");
    assert_eq!(points.component, 0);
    assert_eq!(points.points, example_points());

    let StateEvent::PiecewiseFunctionChanged(function) = &events[1] else {
        panic!("second event should be function-changed, got {:?}", events[1]);
    };
    assert_eq!(function.name, "ct");
    assert_eq!(function.component, 0);
    assert_nodes_close(&function.nodes, &[(200.0, 0.1), (800.0, 0.9)]);
    assert!((function.range.min() - 200.0).abs() < EPSILON);
    assert!((function.range.max() - 800.0).abs() < EPSILON);
}

#[tokio::test(start_paused = true)]
async fn set_points_then_points_round_trips() {
    let h = harness(Vec::new());
    let points = vec![
        ControlPoint::new(0.0, 0.0),
        ControlPoint::new(0.35, 0.6),
        ControlPoint::new(1.0, 1.0),
    ];
    h.editor.set_points(points.clone()).unwrap();
    assert_eq!(h.editor.points(), points);
}

#[tokio::test(start_paused = true)]
async fn single_point_resolves_to_data_range() {
    let h = harness(Vec::new());
    h.editor.set_points(vec![ControlPoint::new(0.5, 1.0)]).unwrap();

    let events = h.outbound.drain();
    let StateEvent::PiecewiseFunctionChanged(function) = &events[1] else {
        panic!("expected function-changed event");
    };
    assert_eq!(function.range, DataRange::new(0.0, 1000.0));
    assert_nodes_close(&function.nodes, &[(500.0, 1.0)]);
}

#[tokio::test(start_paused = true)]
async fn missing_component_bound_uses_fallback_range() {
    let h = harness(Vec::new());
    h.images.write().select_component(3);

    h.editor.set_points(example_points()).unwrap();

    let events = h.outbound.drain();
    let StateEvent::PiecewiseFunctionChanged(function) = &events[1] else {
        panic!("expected function-changed event");
    };
    assert_eq!(function.component, 3);
    assert_nodes_close(&function.nodes, &[(51.0, 0.1), (204.0, 0.9)]);
}

#[tokio::test(start_paused = true)]
async fn message_a_keeps_raw_points_message_b_windows_them() {
    let h = harness(Vec::new());
    let raw = vec![
        ControlPoint::new(0.8, 0.9),
        ControlPoint::new(0.2, 0.1),
        ControlPoint::new(0.8, 0.3),
    ];
    h.editor.set_points(raw.clone()).unwrap();

    let events = h.outbound.drain();
    let StateEvent::PointsChanged(points) = &events[0] else {
        panic!("expected points-changed event");
    };
    assert_eq!(points.points, raw);

    let StateEvent::PiecewiseFunctionChanged(function) = &events[1] else {
        panic!("expected function-changed event");
    };
    assert_nodes_close(&function.nodes, &[(200.0, 0.1), (800.0, 0.9)]);
}

#[tokio::test(start_paused = true)]
async fn not_ready_skips_dispatch_but_keeps_points() {
    let h = harness(Vec::new());
    h.images.write().piecewise_functions_ready = false;

    let outcome = h.editor.set_points(example_points()).unwrap();
    assert_eq!(outcome, FlushOutcome::NotReady);
    assert!(h.outbound.is_empty());
    assert_eq!(h.editor.points(), example_points());
}

#[tokio::test(start_paused = true)]
async fn no_selected_image_skips_dispatch() {
    let h = harness(Vec::new());
    h.images.write().selected_name = None;

    let outcome = h.editor.set_points(example_points()).unwrap();
    assert_eq!(outcome, FlushOutcome::NoSelection);
    assert!(h.outbound.is_empty());
}

#[tokio::test(start_paused = true)]
async fn closed_service_reports_error() {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<StateEvent>();
    drop(rx);

    let editor = PiecewiseEditor::new(
        HeadlessWidget::default(),
        ready_images(),
        Arc::new(tx),
        &EditorConfig::default(),
    )
    .unwrap();

    let err = editor.set_points(example_points()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::ServiceClosed {
            event: "IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED"
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn failed_points_event_stops_before_function_event() {
    let service = Arc::new(RejectingPointsService::default());
    let editor = PiecewiseEditor::new(
        HeadlessWidget::default(),
        ready_images(),
        service.clone(),
        &EditorConfig::default(),
    )
    .unwrap();

    let err = editor.set_points(example_points()).unwrap_err();
    let DispatchError::ServiceClosed { event } = err;
    assert_eq!(event, "IMAGE_PIECEWISE_FUNCTION_POINTS_CHANGED");
    assert_eq!(service.sends.load(Ordering::SeqCst), 1);

    // The widget still holds the new points.
    assert_eq!(editor.points(), example_points());
}

#[tokio::test(start_paused = true)]
async fn opacity_queries_are_pure() {
    let h = harness(example_points());

    assert_nodes_close(&h.editor.opacity_nodes(None), &[(200.0, 0.1), (800.0, 0.9)]);
    let range = h.editor.opacity_range(Some(DataRange::new(-100.0, 100.0)));
    assert!((range.min() + 60.0).abs() < EPSILON);
    assert!((range.max() - 60.0).abs() < EPSILON);

    assert!(h.outbound.is_empty());
    assert!(!h.editor.is_update_pending());
}

#[tokio::test(start_paused = true)]
async fn opacity_range_falls_back_with_one_point() {
    let h = harness(vec![ControlPoint::new(0.4, 0.4)]);
    assert_eq!(h.editor.opacity_range(None), DataRange::new(0.0, 1000.0));
    assert_eq!(
        h.editor.opacity_range(Some(DataRange::new(5.0, 6.0))),
        DataRange::new(5.0, 6.0)
    );
}

#[tokio::test(start_paused = true)]
async fn view_and_decorations_are_delegated() {
    let h = harness(Vec::new());
    let tf = vec![
        ColorStop {
            x: 0.0,
            rgb: [0.0, 0.0, 0.0],
        },
        ColorStop {
            x: 1000.0,
            rgb: [1.0, 1.0, 1.0],
        },
    ];

    h.editor.set_range_zoom(DataRange::new(100.0, 400.0));
    h.editor.set_color_transfer_function(tf.clone());
    h.editor.set_histogram(vec![4, 8, 15, 16, 23, 42]);

    h.editor.with_widget(|widget| {
        assert_eq!(widget.view_box(), Some((100.0, 400.0)));
        assert_eq!(widget.color_transfer_function(), tf.as_slice());
        assert_eq!(widget.histogram(), &[4, 8, 15, 16, 23, 42]);
    });
    assert!(h.outbound.is_empty());
}

#[tokio::test(start_paused = true)]
async fn gaussian_api_is_unsupported() {
    let h = harness(example_points());

    let gaussians = h.editor.gaussians();
    assert!(!gaussians.is_supported());
    assert!(gaussians.unwrap_or_default().is_empty());

    let result = h.editor.set_gaussians(&[PiecewiseGaussian {
        position: 0.5,
        height: 1.0,
        width: 0.2,
        x_bias: 0.0,
        y_bias: 0.0,
    }]);
    assert!(!result.is_supported());

    // Points are untouched and nothing is dispatched.
    assert_eq!(h.editor.points(), example_points());
    assert!(h.outbound.is_empty());
}
