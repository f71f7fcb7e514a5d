//! Render loop and teardown

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::support::*;
use crate::data::DateSelection;
use crate::input::HostEvent;
use crate::render::{LoopControl, RenderError, RenderLoop};
use crate::scene::BuildOutcome;
use crate::VisualizerError;

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + WAIT;
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_texture_completing_after_teardown_is_discarded() {
    let provider = Arc::new(GatedProvider::default());
    let (mut visualizer, _) = visualizer_with(RecordingBackend::default(), provider.clone());

    visualizer.teardown();
    provider.release();
    wait_until(|| provider.served() == 2);
    visualizer.tick(0.016).unwrap();

    assert!(visualizer.is_torn_down());
    assert!(visualizer.scene().central_body().is_none());
    assert!(visualizer.backend().frames.is_empty());
}

#[test]
fn test_tick_after_teardown_is_a_no_op() {
    let (mut visualizer, _) = visualizer();
    visualizer.await_assets(WAIT);
    visualizer.load_dataset(&feed("2023-09-12", vec![neo("1", 10.0, false, "1000000")]), &DateSelection::First);
    visualizer.tick(0.016).unwrap();

    visualizer.teardown();
    visualizer.teardown();
    visualizer.tick(0.016).unwrap();

    assert_eq!(visualizer.backend().frames.len(), 1);
    assert!(visualizer.scene().is_empty());
    assert!(visualizer.scene().central_body().is_none());
}

#[test]
fn test_events_after_teardown_are_ignored() {
    let (mut visualizer, selections) = visualizer();
    visualizer.teardown();

    let control = visualizer.handle_event(HostEvent::PointerMoved { x: 640.0, y: 250.0 }).unwrap();
    let report = visualizer.load_dataset(&feed("2023-09-12", vec![neo("1", 10.0, false, "1000000")]), &DateSelection::First);

    assert_eq!(control, LoopControl::Stop);
    assert_eq!(report.outcome, BuildOutcome::EmptyOrMissingDateSelection);
    assert!(visualizer.scene().is_empty());
    // The sink was released with the scene
    assert!(matches!(selections.try_recv(), Err(mpsc::TryRecvError::Disconnected)));
}

#[test]
fn test_lost_context_stops_the_loop() {
    let (mut visualizer, _) = visualizer_with(RecordingBackend::losing_context_at(2), Arc::new(textured_provider()));
    let (_events, receiver) = mpsc::channel::<HostEvent>();
    let mut render_loop = RenderLoop::new(1000.0);

    let result = render_loop.run(&mut visualizer, &receiver);

    assert!(matches!(
        result,
        Err(VisualizerError::RenderContextLost(RenderError::ContextLost(_)))
    ));
    assert_eq!(render_loop.stats().frames_drawn, 2);
    assert_eq!(visualizer.backend().frames.len(), 2);
}

#[test]
fn test_teardown_event_stops_the_loop() {
    let (mut visualizer, _) = visualizer();
    let (events, receiver) = mpsc::channel();
    events.send(HostEvent::Teardown).unwrap();

    let stats = RenderLoop::new(1000.0).run(&mut visualizer, &receiver).unwrap();

    assert_eq!(stats.frames_drawn, 0);
    assert!(visualizer.is_torn_down());
    drop(events);
}

#[test]
fn test_closed_channel_stops_after_one_frame() {
    let (mut visualizer, _) = visualizer();
    let (events, receiver) = mpsc::channel();
    events.send(HostEvent::PointerMoved { x: 10.0, y: 10.0 }).unwrap();
    drop(events);

    let stats = RenderLoop::new(1000.0).run(&mut visualizer, &receiver).unwrap();

    assert_eq!(stats.frames_drawn, 1);
    assert!(!visualizer.is_torn_down());
}

#[test]
fn test_frame_limit_bounds_the_run() {
    let (mut visualizer, _) = visualizer();
    let (_events, receiver) = mpsc::channel::<HostEvent>();

    let stats = RenderLoop::new(1000.0)
        .with_frame_limit(3)
        .run(&mut visualizer, &receiver)
        .unwrap();

    assert_eq!(stats.frames_drawn, 3);
    assert_eq!(visualizer.backend().frames.len(), 3);
}

#[test]
fn test_stop_handle_stops_from_another_thread() {
    let (mut visualizer, _) = visualizer();
    let (_events, receiver) = mpsc::channel::<HostEvent>();
    let mut render_loop = RenderLoop::new(200.0);
    let handle = render_loop.stop_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        handle.stop();
    });
    let stats = render_loop.run(&mut visualizer, &receiver).unwrap();
    stopper.join().unwrap();

    assert!(stats.frames_drawn >= 1);
    assert_eq!(visualizer.backend().frames.len() as u64, stats.frames_drawn);
}

#[test]
fn test_step_applies_queued_events_before_drawing() {
    let (mut visualizer, _) = visualizer();
    visualizer.await_assets(WAIT);
    let (events, receiver) = mpsc::channel();
    let mut render_loop = RenderLoop::new(60.0);

    events
        .send(HostEvent::LoadDataset {
            feed: Arc::new(feed("2023-09-12", vec![neo("1", 10.0, true, "1000000")])),
            selection: DateSelection::First,
        })
        .unwrap();
    assert_eq!(render_loop.step(&mut visualizer, &receiver).unwrap(), LoopControl::Continue);
    assert_eq!(visualizer.backend().last_frame().len(), 2);

    events.send(HostEvent::Teardown).unwrap();
    assert_eq!(render_loop.step(&mut visualizer, &receiver).unwrap(), LoopControl::Stop);
    assert_eq!(render_loop.stats().frames_drawn, 1);
}
