use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use yawcast::{
    ControlSource, ControlState, MapFile, MotionConfig, Projector, ProjectorConfig, Session,
};

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

// dimensions of screen
const WIDTH: usize = 640;
const HEIGHT: usize = 320;

const TARGET_FPS: u64 = 30;

const DEFAULT_MAP: &str = "map/default.map";

/// Level-triggered controls read from the set of held keys.
struct Keyboard<'keys>(&'keys HashSet<Keycode>);

impl ControlSource for Keyboard<'_> {
    fn poll(&mut self) -> ControlState {
        let held = |codes: &[Keycode]| codes.iter().any(|code| self.0.contains(code));
        ControlState {
            forward: held(&[Keycode::Up, Keycode::W]),
            backward: held(&[Keycode::Down, Keycode::S]),
            turn_left: held(&[Keycode::Left, Keycode::A]),
            turn_right: held(&[Keycode::Right, Keycode::D]),
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("YAWCAST_LOG");

    let map_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_MAP.into());
    let map = MapFile::load(&map_path)?;

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let window = video
        .window("YAWCAST", WIDTH as u32, HEIGHT as u32)
        .position_centered()
        .build()?;
    log::info!("creating canvas");
    let mut canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut keys = HashSet::new();

    let mut session = Session::new(
        map.grid,
        map.spawn,
        Projector::new(ProjectorConfig {
            screen_width: WIDTH,
            screen_height: HEIGHT,
            ..Default::default()
        }),
        MotionConfig::default(),
    );

    let delta = Duration::from_millis(1_000 / TARGET_FPS);
    let mut last = Instant::now();

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k), ..
                } => {
                    if k == Keycode::Escape {
                        break 'main_loop;
                    }
                    keys.insert(k);
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.remove(&k);
                }
                _ => {}
            }
        }

        let dt = prev.duration_since(last).as_secs_f64();
        last = prev;
        let columns = session.run_frame(&mut Keyboard(&keys), dt);

        // DRAW BACKGROUND
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();

        // DRAW WALLS
        for (i, column) in columns.iter().enumerate() {
            let Some((top, height)) = column.span(HEIGHT as u32) else {
                continue;
            };
            // slightly darken walls that face east or west for contrast
            let shade = match column.face {
                Some(face) if !face.is_horizontal() => column.shade.saturating_sub(0x22),
                _ => column.shade,
            };
            canvas.set_draw_color(Color::RGB(shade, shade, shade));
            canvas
                .fill_rect(Rect::new(i as i32, top as i32, 1, height))
                .ah()?;
        }

        canvas.present();

        let diff = Instant::now() - prev;
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    log::info!("exiting at {:?}", session.camera());
    Ok(())
}
