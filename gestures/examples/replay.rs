//! Replays a recorded touch script through a gesture detector and logs what it recognizes.
//!
//! ```sh
//! RUST_LOG=info cargo run -p massive-gestures --example replay -- gestures/scripts/pinch.toml
//! ```
//!
//! An optional second argument names a TOML gesture configuration.
use std::{
    env, fs,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use log::info;
use massive_geometry::Point;
use massive_gestures::{
    ActionKind, DoubleTapListener, DoubleTapRecognizer, DragListener, DragRecognizer, FlyListener,
    FlyRecognizer, GestureConfig, GestureDetector, MotionEvent, Pointer, PointerId,
    RotateListener, RotateRecognizer, ScaleListener, ScaleRecognizer, TapListener, TapRecognizer,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    event: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptEvent {
    /// Milliseconds since the start of the script.
    time: u64,
    action: ActionKind,
    #[serde(default)]
    action_index: usize,
    pointers: Vec<(PointerId, Point)>,
}

impl Script {
    fn load(path: &Path) -> Result<Self> {
        let toml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {path:?}"))?;
        toml::from_str(&toml).with_context(|| format!("Failed to parse script {path:?}"))
    }

    fn events(&self, origin: Instant) -> impl Iterator<Item = MotionEvent> + '_ {
        self.event.iter().map(move |event| {
            let pointers = event
                .pointers
                .iter()
                .map(|&(id, pos)| Pointer::new(id, pos))
                .collect();
            MotionEvent::new(
                event.action,
                pointers,
                origin + Duration::from_millis(event.time),
            )
            .with_action_index(event.action_index)
        })
    }
}

/// Logs every gesture and accepts all of them.
#[derive(Debug, Default)]
struct LoggingListener {
    detections: usize,
}

impl LoggingListener {
    fn detected(&mut self, gesture: &str, details: &dyn std::fmt::Display) -> bool {
        self.detections += 1;
        info!("{gesture}: {details}");
        true
    }
}

impl TapListener for LoggingListener {
    fn on_tap(&mut self, tap: &TapRecognizer) -> bool {
        self.detected("Tap", tap)
    }
}

impl DoubleTapListener for LoggingListener {
    fn on_double_tap(&mut self, double_tap: &DoubleTapRecognizer) -> bool {
        self.detected("Double tap", double_tap)
    }
}

impl DragListener for LoggingListener {
    fn on_drag(&mut self, drag: &DragRecognizer) -> bool {
        self.detected("Drag", drag)
    }
}

impl FlyListener for LoggingListener {
    fn on_fly(&mut self, fly: &FlyRecognizer) -> bool {
        self.detected("Fly", fly)
    }
}

impl ScaleListener for LoggingListener {
    fn on_scale(&mut self, scale: &ScaleRecognizer) -> bool {
        self.detected("Scale", scale)
    }
}

impl RotateListener for LoggingListener {
    fn on_rotate(&mut self, rotate: &RotateRecognizer) -> bool {
        self.detected("Rotate", rotate)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (script, config) = match args.as_slice() {
        [script] => (script, GestureConfig::default()),
        [script, config] => (script, GestureConfig::load(config)?),
        _ => bail!("Usage: replay <script.toml> [config.toml]"),
    };

    let script = Script::load(Path::new(script))?;
    let mut detector = GestureDetector::new(&config, LoggingListener::default());
    detector.enable_all();

    let origin = Instant::now();
    for event in script.events(origin) {
        let handled = detector.on_touch_event(&event);
        info!(
            "{} with {} pointer(s), handled: {handled}",
            event.action,
            event.pointer_count()
        );
    }

    info!("{} gesture(s) detected", detector.listener().detections);
    Ok(())
}
