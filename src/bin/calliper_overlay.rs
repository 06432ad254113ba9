use calliper::engine::Engine;
use calliper::measure::MeasurementSnapshot;
use calliper::render::{DrawCommand, RecordingBackend};
use calliper::scene::load_document;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct FrameReport {
    frame_index: u64,
    snapshot: Option<MeasurementSnapshot>,
    commands: Vec<DrawCommand>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("[calliper] error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: calliper_overlay <scene.json>")?;

    let document = load_document(&path)?;
    let backend = RecordingBackend::new();
    let mut engine = Engine::from_document(&document, Box::new(backend.clone()))?;
    let frame_index = engine.step().ok_or("overlay frame was not drawn")?;

    let report = FrameReport {
        frame_index,
        snapshot: engine.latest_snapshot().cloned(),
        commands: backend
            .last_frame()
            .map(|frame| frame.commands)
            .unwrap_or_default(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
