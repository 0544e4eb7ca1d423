//! Fade a card in while sliding it to rest, paced by the fallback frame pump.
//!
//! Run with `RUST_LOG=glide_animation=debug` to watch the driver's lifecycle
//! logging.

use std::sync::{mpsc, Arc, Mutex};

use anyhow::Result;
use glide_animation::{FramePump, TweenCallbacks, TweenDriver, TweenPreset};
use glide_core::{Node, Scene};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();
    let card = scene.insert(Node {
        x: -80.0,
        y: -40.0,
        opacity: 0.0,
        ..Node::default()
    });

    let mut driver = TweenDriver::new();
    driver.start(
        &mut scene,
        card,
        TweenPreset::fade_in(250.0),
        TweenCallbacks::new(),
    )?;
    let [slide_x, slide_y] = TweenPreset::slide_to(0.0, 120.0, 400.0);
    driver.start(&mut scene, card, slide_x, TweenCallbacks::new())?;
    driver.start(
        &mut scene,
        card,
        slide_y,
        TweenCallbacks::new().on_complete(|y| println!("card settled at y = {y}")),
    )?;

    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let mut pump = FramePump::spawn(
        60,
        Arc::new(move || {
            let _ = tx.lock().unwrap().send(());
        }),
    )?;

    while rx.recv().is_ok() {
        if !driver.advance(&mut scene) {
            break;
        }
    }
    pump.stop();

    if let Some(card) = scene.node(card) {
        println!(
            "final: opacity = {:.2}, x = {:.1}, y = {:.1}",
            card.opacity, card.x, card.y
        );
    }
    Ok(())
}
