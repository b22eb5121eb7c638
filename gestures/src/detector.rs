//! Drives all recognizers with the frames reduced from incoming motion events.
use itertools::Itertools;
use log::{debug, warn};
use massive_geometry::Point;

use crate::{
    ActionKind, Gesture, GestureConfig, GestureListener, Gestures, MotionEvent, Recognizer,
    TouchFrame,
    config::DEFAULT_ORDER,
    recognizers::{
        DoubleTapRecognizer, DragRecognizer, FlyRecognizer, RotateRecognizer, ScaleRecognizer,
        TapRecognizer,
    },
    velocity::EstimatorFactory,
};

/// Recognizes tap, double tap, drag, fly, scale, and rotate gestures.
///
/// Tap and fly are disabled by default. Each frame, every enabled and not skipped recognizer runs
/// in the configured order, regardless of whether a recognizer before it fired.
#[derive(Debug)]
pub struct GestureDetector<L> {
    listener: L,
    /// Gestures that are considered for detection.
    enabled: Gestures,
    /// Gestures skipped while the current stream lasts.
    skipped: Gestures,
    order: [Gesture; 6],
    recognizers: Recognizers,
    /// Kept for frames without any pointer left to average.
    last_pivot: Point,
}

#[derive(Debug)]
struct Recognizers {
    tap: TapRecognizer,
    double_tap: DoubleTapRecognizer,
    drag: DragRecognizer,
    fly: FlyRecognizer,
    scale: ScaleRecognizer,
    rotate: RotateRecognizer,
}

impl Recognizers {
    fn get_mut<L: GestureListener>(&mut self, gesture: Gesture) -> &mut dyn Recognizer<L> {
        match gesture {
            Gesture::Tap => &mut self.tap,
            Gesture::DoubleTap => &mut self.double_tap,
            Gesture::Drag => &mut self.drag,
            Gesture::Fly => &mut self.fly,
            Gesture::Scale => &mut self.scale,
            Gesture::Rotate => &mut self.rotate,
        }
    }
}

impl<L: GestureListener> GestureDetector<L> {
    pub fn new(config: &GestureConfig, listener: L) -> Self {
        let order = if config.order.iter().all_unique() {
            config.order
        } else {
            warn!(
                "Invalid recognizer order {:?}, using the default order",
                config.order
            );
            DEFAULT_ORDER
        };

        Self {
            listener,
            enabled: config.enabled_gestures(),
            skipped: Gestures::empty(),
            order,
            recognizers: Recognizers {
                tap: TapRecognizer::new(config.tap()),
                double_tap: DoubleTapRecognizer::new(config.double_tap()),
                drag: DragRecognizer::new(config.drag()),
                fly: FlyRecognizer::new(config.fly()),
                scale: ScaleRecognizer::new(config.scale()),
                rotate: RotateRecognizer::new(config.rotate()),
            },
            last_pivot: Point::default(),
        }
    }

    /// Use another source for the fly recognizer's velocity estimators.
    pub fn with_velocity_estimator(mut self, acquire: EstimatorFactory) -> Self {
        let config = *self.recognizers.fly.config();
        self.recognizers.fly = FlyRecognizer::with_estimator(config, acquire);
        self
    }

    /// Feeds a motion event to the recognizers.
    ///
    /// Returns `true` if a listener accepted a gesture, or if the event started a stream or added
    /// a pointer to it. The host has to return `true` for these to receive the rest of the stream.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !event.action.is_known() {
            warn!("Ignoring unknown action {}", event.action);
            return false;
        }

        let frame = TouchFrame::reduce(event, self.last_pivot);
        self.last_pivot = frame.pivot();

        if frame.is_down() {
            debug!("Stream started at {:?}", frame.pivot());
        }

        let mut handled = matches!(
            event.action,
            ActionKind::Down | ActionKind::PointerDown
        );

        for gesture in self.order {
            let recognizer = self.recognizers.get_mut::<L>(gesture);
            if self.enabled.has(gesture) && !self.skipped.has(gesture) {
                handled |= recognizer.on_frame(&frame, &mut self.listener);
            } else if frame.stream_completed() {
                recognizer.end_stream();
            }
        }

        if frame.stream_completed() {
            debug!("Stream completed with {}", frame.action());
            self.turn_all_on();
        }

        handled
    }

    pub fn enable_all(&mut self) -> &mut Self {
        self.enabled = Gestures::all();
        self
    }

    pub fn disable_all(&mut self) -> &mut Self {
        self.enabled = Gestures::empty();
        self
    }

    pub fn enable(&mut self, gestures: impl Into<Gestures>) -> &mut Self {
        self.enabled |= gestures.into();
        self
    }

    /// Disables the given gestures, others are not affected.
    pub fn disable(&mut self, gestures: impl Into<Gestures>) -> &mut Self {
        self.enabled &= !gestures.into();
        self
    }

    pub fn is_enabled(&self, gesture: Gesture) -> bool {
        self.enabled.has(gesture)
    }

    pub fn enabled(&self) -> Gestures {
        self.enabled
    }

    /// Stops skipping all gestures for the current stream.
    pub fn turn_all_on(&mut self) -> &mut Self {
        self.skipped = Gestures::empty();
        self
    }

    /// Skips all gestures until the current stream completes.
    pub fn turn_all_off(&mut self) -> &mut Self {
        self.skipped = Gestures::all();
        self
    }

    pub fn turn_on(&mut self, gestures: impl Into<Gestures>) -> &mut Self {
        self.skipped &= !gestures.into();
        self
    }

    /// Skips the given gestures until the current stream completes.
    pub fn turn_off(&mut self, gestures: impl Into<Gestures>) -> &mut Self {
        self.skipped |= gestures.into();
        self
    }

    pub fn is_skipped(&self, gesture: Gesture) -> bool {
        self.skipped.has(gesture)
    }

    pub fn skipped(&self) -> Gestures {
        self.skipped
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn set_listener(&mut self, listener: L) {
        self.listener = listener;
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn tap(&self) -> &TapRecognizer {
        &self.recognizers.tap
    }

    pub fn double_tap(&self) -> &DoubleTapRecognizer {
        &self.recognizers.double_tap
    }

    pub fn drag(&self) -> &DragRecognizer {
        &self.recognizers.drag
    }

    pub fn fly(&self) -> &FlyRecognizer {
        &self.recognizers.fly
    }

    pub fn scale(&self) -> &ScaleRecognizer {
        &self.recognizers.scale
    }

    pub fn rotate(&self) -> &RotateRecognizer {
        &self.recognizers.rotate
    }
}
