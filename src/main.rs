//! Spell Duel entry point
//!
//! Browser: mounts the duel on the page's canvas and wires pointer, slider and
//! color picker events into it. Native: runs a headless duel against a
//! wandering cursor and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, Event, HtmlCanvasElement, HtmlDialogElement, HtmlInputElement,
        MouseEvent, PageTransitionEvent,
    };

    use spell_duel::platform::web::{AnimationFrameScheduler, BrowserClock};
    use spell_duel::platform::{Clock, FrameLoop, SharedCursor};
    use spell_duel::renderer::CanvasSink;
    use spell_duel::sim::{Game, HeroCommand, Side};
    use spell_duel::{Color, DuelTuning, Settings, SliderRange};

    type DuelLoop = FrameLoop<AnimationFrameScheduler, BrowserClock, CanvasSink>;

    /// Look up an element by id and cast it to the expected type
    fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        console_log::init_with_level(settings.log_level.to_level())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Spell Duel starting (log level {})...", settings.log_level.as_str());

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = element(&document, "canvas")?;
        let (width, height) = settings.playfield_size(
            window.inner_width()?.as_f64().unwrap_or_default() as f32,
            window.inner_height()?.as_f64().unwrap_or_default() as f32,
        );
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let sink = CanvasSink::new(&canvas)?;
        let clock = BrowserClock::new(&window);
        let scheduler = AnimationFrameScheduler::new()?;

        let tuning = DuelTuning::for_playfield(width, height);
        let first_score: Element = element(&document, "score-first")?;
        let second_score: Element = element(&document, "score-second")?;
        let game = Game::new(&tuning, clock.now_ms())
            .observe(Side::First, move |_side: Side, score: u32| {
                first_score.set_text_content(Some(&score.to_string()));
            })
            .observe(Side::Second, move |_side: Side, score: u32| {
                second_score.set_text_content(Some(&score.to_string()));
            });

        let cursor = SharedCursor::default();
        let duel = Rc::new(FrameLoop::new(game, scheduler, clock, sink, cursor.clone()));

        setup_pointer(&canvas, cursor.clone());
        for side in Side::BOTH {
            setup_sliders(&document, &settings, side, duel.clone())?;
        }
        setup_color_picker(&canvas, &document, duel.clone(), cursor)?;
        setup_unmount(&window, duel.clone());

        duel.start();
        log::info!("Spell Duel running on a {}x{} playfield", width, height);
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, cursor: SharedCursor) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            cursor.set(Vec2::new(event.offset_x() as f32, event.offset_y() as f32));
        });
        let _ = canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Wire one slider: show the configured range and the hero's current
    /// value, then push every change as a command
    fn bind_slider(
        input: &HtmlInputElement,
        range: SliderRange,
        current: f64,
        duel: Rc<DuelLoop>,
        command: impl Fn(f64) -> HeroCommand + 'static,
    ) {
        for (name, value) in range.attributes() {
            let _ = input.set_attribute(name, &value);
        }
        input.set_value_as_number(current);

        let target = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let raw = target.value_as_number();
            if raw.is_nan() {
                log::warn!("Ignoring non-numeric slider value {:?}", target.value());
                return;
            }
            duel.apply(command(range.snap(raw)));
        });
        let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_sliders(
        document: &Document,
        settings: &Settings,
        side: Side,
        duel: Rc<DuelLoop>,
    ) -> Result<(), JsValue> {
        let prefix = side.as_str();
        let (speed, fire_rate) = duel.with_game(|g| {
            let hero = g.hero(side);
            (hero.speed() as f64, hero.fire_rate_ms())
        });

        let speed_input: HtmlInputElement = element(document, &format!("{prefix}-speed"))?;
        bind_slider(
            &speed_input,
            settings.speed_slider,
            speed,
            duel.clone(),
            move |value| HeroCommand::SetSpeed {
                side,
                speed: value as f32,
            },
        );

        let fire_rate_input: HtmlInputElement =
            element(document, &format!("{prefix}-fire-rate"))?;
        bind_slider(
            &fire_rate_input,
            settings.fire_rate_slider,
            fire_rate,
            duel,
            move |value| HeroCommand::SetFireRate {
                side,
                fire_rate_ms: value,
            },
        );
        Ok(())
    }

    /// Clicking a hero opens the spell color dialog for that hero
    fn setup_color_picker(
        canvas: &HtmlCanvasElement,
        document: &Document,
        duel: Rc<DuelLoop>,
        cursor: SharedCursor,
    ) -> Result<(), JsValue> {
        let dialog: HtmlDialogElement = element(document, "spell-color-dialog")?;
        let picker: HtmlInputElement = element(document, "spell-color")?;
        let selected: Rc<Cell<Option<Side>>> = Rc::new(Cell::new(None));

        {
            let duel = duel.clone();
            let selected = selected.clone();
            let picker = picker.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let Some(side) = duel.with_game(|g| g.hero_at(point)) else {
                    return;
                };
                selected.set(Some(side));
                picker.set_value(&duel.with_game(|g| g.hero(side).spell_color()).to_css());
                if let Err(e) = dialog.show_modal() {
                    log::warn!("Could not open the color dialog: {:?}", e);
                    return;
                }
                // The dialog covers the canvas; park the cursor so it stops deflecting
                cursor.set(Vec2::ZERO);
                log::debug!("Picking spell color for {} hero", side.as_str());
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let target = picker.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let Some(side) = selected.get() else {
                    return;
                };
                match Color::parse(&target.value()) {
                    Some(color) => duel.apply(HeroCommand::SetSpellColor { side, color }),
                    None => log::warn!("Ignoring unparsable color {:?}", target.value()),
                }
            });
            let _ = picker.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        Ok(())
    }

    /// Stop the loop when the page is unloaded. A page kept in the
    /// back/forward cache is only suspended and resumes on `pageshow`.
    fn setup_unmount(window: &web_sys::Window, duel: Rc<DuelLoop>) {
        {
            let duel = duel.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    log::info!("Page cached, suspending the duel");
                    duel.suspend();
                } else {
                    duel.stop();
                }
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if event.persisted() {
                log::info!("Page restored from cache, resuming the duel");
                duel.resume();
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_host::run() {
        web_sys::console::error_1(&e);
        log::error!("Spell Duel failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use spell_duel::DuelTuning;
    use spell_duel::platform::{Clock, FrameLoop, ManualClock, ManualScheduler, SharedCursor};
    use spell_duel::renderer::RecordingSink;
    use spell_duel::sim::{DuelEvent, Game, Side};

    /// Nominal 60 Hz frame interval
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest per-frame cursor move on each axis (pixels)
    const CURSOR_JITTER: f32 = 12.0;

    /// Read a tuning file, falling back to the defaults on any problem
    pub fn load_tuning(path: &str) -> DuelTuning {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Could not read {}: {}, using default tuning", path, e);
                return DuelTuning::default();
            }
        };
        match DuelTuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Invalid tuning in {}: {}, using defaults", path, e);
                DuelTuning::default()
            }
        }
    }

    pub fn run(tuning: DuelTuning, frames: u64, seed: u64) {
        let clock = ManualClock::new(0.0);
        let scheduler = ManualScheduler::new();
        let cursor = SharedCursor::new(Vec2::new(tuning.width / 2.0, tuning.height / 2.0));
        let score_changes = Rc::new(Cell::new(0u32));

        let game = Game::new(&tuning, clock.now_ms())
            .observe(Side::First, {
                let changes = score_changes.clone();
                move |side: Side, score: u32| {
                    changes.set(changes.get() + 1);
                    log::info!("{} hero scores: {}", side.as_str(), score);
                }
            })
            .observe(Side::Second, {
                let changes = score_changes.clone();
                move |side: Side, score: u32| {
                    changes.set(changes.get() + 1);
                    log::info!("{} hero scores: {}", side.as_str(), score);
                }
            });

        let duel = FrameLoop::new(
            game,
            scheduler.clone(),
            clock.clone(),
            RecordingSink::default(),
            cursor.clone(),
        );
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut fired = 0usize;
        let mut expired = 0usize;

        log::info!("Headless duel: {} frames, cursor seed {}", frames, seed);
        duel.start();
        for _ in 0..frames {
            let jitter = Vec2::new(
                rng.random_range(-CURSOR_JITTER..=CURSOR_JITTER),
                rng.random_range(-CURSOR_JITTER..=CURSOR_JITTER),
            );
            let max = Vec2::new(tuning.width, tuning.height);
            cursor.set((cursor.get() + jitter).clamp(Vec2::ZERO, max.max(Vec2::ZERO)));

            clock.advance(FRAME_MS);
            if !scheduler.run_next(clock.now_ms()) {
                log::warn!("Frame loop halted early");
                break;
            }
            duel.with_game(|g| {
                for event in g.events() {
                    match event {
                        DuelEvent::SpellFired { .. } => fired += 1,
                        DuelEvent::SpellExpired { .. } => expired += 1,
                        DuelEvent::Hit { .. } => {}
                    }
                }
            });
        }
        duel.stop();

        let (first, second, live, drawn) = duel.with_game(|g| {
            let (first, second) = g.scores();
            let live = g.player().spells().len() + g.enemy().spells().len();
            (first, second, live, g.frames())
        });
        let circles = duel.with_sink(|s| s.circles().count());

        println!("Frames run:     {drawn}");
        println!("Final score:    {first} : {second}");
        println!("Score changes:  {}", score_changes.get());
        println!("Spells cast:    {fired} ({expired} missed, {live} in flight)");
        println!("Last frame:     {circles} circles");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spell Duel (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first().map(String::as_str) {
        Some(path) if path != "-" => headless::load_tuning(path),
        _ => spell_duel::DuelTuning::default(),
    };
    let frames = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

    headless::run(tuning, frames, seed);
}
