//! Fishbowl: a small 3D fish-catching game
//!
//! Swim around the bowl and eat as many fish as you can before the clock
//! runs out. Bigger fish are worth more, and every meal makes you bigger.
//!
//! Usage: `fishbowl [scene.ron]`. Without an argument the built-in scene is
//! used. Tuning values come from `assets/config/fishbowl.ron`, or the file
//! named by `FISHBOWL_CONFIG`.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod scene;

use macroquad::prelude::*;

use config::GameConfig;
use game::renderer::draw_play_mode;
use game::{Events, PlayMode};
use input::poll_events;
use scene::{load_scene, load_scene_from_str, SceneDesc, SceneError, DEFAULT_SCENE};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Fishbowl v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_startup_scene() -> Result<SceneDesc, SceneError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading scene from {}", path);
            load_scene(path)
        }
        None => load_scene_from_str(DEFAULT_SCENE),
    }
}

/// Log what happened during the last update. Returns the final score on
/// the frame the session ends.
fn report_events(events: &Events) -> Option<u32> {
    for spawned in events.spawned.iter() {
        log::trace!(
            "{} spawned: {:?} {:?} at {}",
            spawned.fish, spawned.size, spawned.fish_type, spawned.position
        );
    }
    for meal in events.eaten.iter() {
        log::info!(
            "ate {} ({:?} {:?}, +{}) at {}, {} fled",
            meal.fish,
            meal.size,
            meal.fish_type,
            meal.size.points(),
            meal.position,
            meal.scared
        );
    }
    for gone in events.despawned.iter() {
        log::trace!("{} left the bowl at {}", gone.fish, gone.position);
    }
    events.session_ended.iter().map(|ended| ended.final_score).last()
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match GameConfig::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            log::error!("bad config: {}", e);
            std::process::exit(2);
        }
    };

    let scene = match load_startup_scene() {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut play = match PlayMode::new(&scene, config) {
        Ok(play) => play,
        Err(e) => {
            log::error!("cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut captured = false;
    let mut final_score = None;

    loop {
        let window = vec2(screen_width(), screen_height());
        for event in poll_events() {
            play.handle_event(&event, window);
        }

        // Mirror the capture flag onto the OS cursor
        if play.mouse_captured() != captured {
            captured = play.mouse_captured();
            set_cursor_grab(captured);
            show_mouse(!captured);
        }

        play.update(get_frame_time());
        if let Some(score) = report_events(play.events()) {
            final_score = Some(score);
        }
        draw_play_mode(&play, final_score);

        next_frame().await
    }
}
