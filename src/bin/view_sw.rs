use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use gridcaster::{Buttons, Config, Engine, InputCmd, Level, TextureBank};

/// Level used when no `--map` is given.
const DEMO_MAP: &str = include_str!("../../maps/demo.map");

/// Walk around a tile map, software ray-cast.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window width in pixels (even).
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Level text file; the built-in demo level otherwise.
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Texture pack (`TXPK`); the built-in procedural textures otherwise.
    #[arg(long, value_name = "FILE")]
    textures: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Which keys feed which button.
const KEYMAP: &[(Key, Buttons)] = &[
    (Key::Up, Buttons::FORWARD),
    (Key::W, Buttons::FORWARD),
    (Key::Down, Buttons::BACK),
    (Key::S, Buttons::BACK),
    (Key::Left, Buttons::TURN_LEFT),
    (Key::A, Buttons::TURN_LEFT),
    (Key::Right, Buttons::TURN_RIGHT),
    (Key::D, Buttons::TURN_RIGHT),
    (Key::Q, Buttons::STRAFE_LEFT),
    (Key::E, Buttons::STRAFE_RIGHT),
    (Key::PageUp, Buttons::LOOK_UP),
    (Key::PageDown, Buttons::LOOK_DOWN),
    (Key::Home, Buttons::RISE),
    (Key::End, Buttons::CROUCH),
    (Key::LeftShift, Buttons::RUN),
    (Key::RightShift, Buttons::RUN),
];

fn held_buttons(win: &Window) -> Buttons {
    KEYMAP
        .iter()
        .filter(|(key, _)| win.is_key_down(*key))
        .fold(Buttons::empty(), |acc, (_, b)| acc | *b)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    use simplelog::LevelFilter::{Debug, Info, Off};
    simplelog::TermLogger::init(
        if args.verbose { Debug } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let cfg = Config {
        screen_width: args.width,
        screen_height: args.height,
        ..Config::default()
    };

    // ─────────── assets ────────────
    let level = match &args.map {
        Some(path) => Level::from_file(path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => Level::parse(DEMO_MAP).context("parsing built-in demo level")?,
    };
    let textures = match &args.textures {
        Some(path) => TextureBank::from_file(path)
            .with_context(|| format!("loading texture pack {}", path.display()))?,
        None => TextureBank::procedural()?,
    };
    log::info!(
        "level {}×{}, {} sprites, {} textures",
        level.map.width(),
        level.map.height(),
        level.sprites.len(),
        textures.len()
    );
    for id in level.texture_ids() {
        if !textures.contains(id) {
            log::warn!("level uses texture {id}, which the bank does not have");
        }
    }

    let mut engine = Engine::from_level(cfg, level, textures).context("starting engine")?;

    let (w, h) = (engine.config().screen_width, engine.config().screen_height);
    let mut win = Window::new("gridcaster", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_frame = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let cmd = InputCmd::new(held_buttons(&win), (now - last_frame).as_secs_f32());
        last_frame = now;

        let fb = engine.frame(&cmd);
        acc_time += now.elapsed();
        acc_frames += 1;

        let mut shown = Ok(());
        fb.end_frame(|pixels, w, h| shown = win.update_with_buffer(pixels, w, h));
        shown?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            log::info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
