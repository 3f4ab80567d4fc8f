//! Landmark acquisition on a worker thread
//!
//! A [`LandmarkSource`] yields frames as they arrive (typically paced by the
//! camera). [`LandmarkWorker`] pulls from it on its own thread, runs the
//! gesture pipeline, and publishes into the shared state. Only the newest
//! frame matters, so there is no queue to back up.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::landmarks::LandmarkFrame;
use super::pipeline::GesturePipeline;
use crate::state::StateHandle;

/// Anything that can deliver landmark frames.
///
/// `next_frame` may block until a frame is ready. `None` means the source is
/// finished or unavailable (no camera, permission denied); the worker then
/// marks the hand absent and stops.
pub trait LandmarkSource: Send + 'static {
    fn next_frame(&mut self) -> Option<LandmarkFrame>;
}

/// Replays a fixed list of frames at a fixed interval
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
    interval: Duration,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>, interval: Duration) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            interval,
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        self.frames.pop_front()
    }
}

/// A source that never produces a hand (no camera, or access denied)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSource;

impl LandmarkSource for UnavailableSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        None
    }
}

/// Background landmark loop. Dropping it stops the loop. A source blocked
/// waiting for a frame is abandoned, not waited on; the thread exits on its
/// own once the source returns, without publishing anything further.
#[derive(Debug)]
pub struct LandmarkWorker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LandmarkWorker {
    pub fn spawn<S: LandmarkSource>(mut source: S, state: StateHandle) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            let mut pipeline = GesturePipeline::new();
            let mut frames = 0u64;
            while !stop_flag.load(Ordering::Relaxed) {
                let next = source.next_frame();
                // Stopped while waiting: whatever arrived is dropped
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }
                let Some(frame) = next else {
                    log::warn!("Landmark source ended after {} frames, hand tracking off", frames);
                    state.update(|s| pipeline.process(&LandmarkFrame::Absent, s));
                    return;
                };
                frames += 1;
                state.update(|s| pipeline.process(&frame, s));
            }
            log::info!("Landmark worker stopped after {} frames", frames);
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// True once the loop has exited (source ended or stop requested)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Stop the loop without waiting on in-flight acquisition
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let Some(handle) = self.handle.take() else {
            return;
        };
        if !handle.is_finished() {
            log::debug!("Landmark source busy, detaching worker");
            return;
        }
        if handle.join().is_err() {
            log::error!("Landmark worker panicked");
        }
    }
}

impl Drop for LandmarkWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Gesture, posed_hand};
    use crate::sim::ShapeKind;
    use crate::state::SharedState;
    use glam::Vec2;
    use std::sync::mpsc;
    use std::time::Instant;

    fn wait_for(worker: &LandmarkWorker) {
        for _ in 0..500 {
            if worker.is_finished() {
                return;
            }
            thread::sleep(Duration::from_millis(2));
        }
        panic!("worker did not finish");
    }

    #[test]
    fn test_scripted_source_commits_shape() {
        let state = StateHandle::default();
        let frames = vec![posed_hand(Gesture::PinchMiddle, Vec2::new(0.5, 0.5)); 12];
        let worker = LandmarkWorker::spawn(ScriptedSource::new(frames, Duration::ZERO), state.clone());
        wait_for(&worker);

        let s = state.load();
        assert_eq!(s.target_shape, ShapeKind::Saturn);
        // Source ran dry: hand is treated as gone
        assert!(!s.hand_detected);
    }

    #[test]
    fn test_unavailable_source_degrades_to_absent() {
        let state = StateHandle::new(SharedState {
            hand_detected: true,
            ..Default::default()
        });
        let worker = LandmarkWorker::spawn(UnavailableSource, state.clone());
        wait_for(&worker);
        assert!(!state.load().hand_detected);
    }

    /// Blocks until the test hands it a frame or hangs up
    struct ChannelSource(mpsc::Receiver<LandmarkFrame>);

    impl LandmarkSource for ChannelSource {
        fn next_frame(&mut self) -> Option<LandmarkFrame> {
            self.0.recv().ok()
        }
    }

    #[test]
    fn test_stop_does_not_wait_on_blocked_source() {
        let state = StateHandle::default();
        let (tx, rx) = mpsc::channel();
        let worker = LandmarkWorker::spawn(ChannelSource(rx), state.clone());

        let hand = posed_hand(Gesture::Open, Vec2::new(0.5, 0.5));
        tx.send(hand.clone()).unwrap();
        for _ in 0..500 {
            if state.load().hand_detected {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(state.load().hand_detected);

        // Source is now parked in recv()
        let started = Instant::now();
        worker.stop();
        assert!(started.elapsed() < Duration::from_millis(200));

        // A late frame is not published after stop
        state.update(|s| s.hand_detected = false);
        let _ = tx.send(hand);
        drop(tx);
        thread::sleep(Duration::from_millis(20));
        assert!(!state.load().hand_detected);
    }

    #[test]
    fn test_stop_interrupts_long_script() {
        let state = StateHandle::default();
        let frames = vec![posed_hand(Gesture::Open, Vec2::new(0.5, 0.5)); 10_000];
        let worker = LandmarkWorker::spawn(
            ScriptedSource::new(frames, Duration::from_millis(1)),
            state.clone(),
        );
        thread::sleep(Duration::from_millis(20));
        worker.stop();
        assert!(state.load().hand_detected);
    }
}
