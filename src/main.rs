//! Egg Catch entry point
//!
//! Browser builds drive the game from `requestAnimationFrame` and draw it
//! with plain DOM elements. Native builds run a headless autopilot round
//! and log what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent};

    use egg_catch::present::{game_over_text, missed_text, score_text};
    use egg_catch::sim::{Egg, EggId};
    use egg_catch::{Command, Game, GameConfig, Presenter};

    /// Set an inline style length in pixels
    fn set_px(el: &Element, prop: &str, value: f32) {
        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(prop, &format!("{}px", value));
        }
    }

    /// Draws the game with DOM elements
    struct DomPresenter {
        document: Document,
        container: Element,
        score: Element,
        missed: Element,
        game_over: Option<Element>,
        eggs: HashMap<EggId, Element>,
    }

    impl DomPresenter {
        fn new(document: Document) -> Option<Self> {
            Some(Self {
                container: document.get_element_by_id("game-container")?,
                score: document.get_element_by_id("score")?,
                missed: document.get_element_by_id("missed")?,
                game_over: document.get_element_by_id("game-over"),
                eggs: HashMap::new(),
                document,
            })
        }
    }

    impl Presenter for DomPresenter {
        fn egg_spawned(&mut self, egg: &Egg) {
            let Ok(el) = self.document.create_element("div") else {
                log::error!("Could not create egg element");
                return;
            };
            el.set_class_name("egg");
            set_px(&el, "left", egg.pos.x);
            set_px(&el, "top", egg.pos.y);
            let _ = self.container.append_child(&el);
            self.eggs.insert(egg.id, el);
        }

        fn egg_moved(&mut self, egg: &Egg) {
            if let Some(el) = self.eggs.get(&egg.id) {
                set_px(el, "top", egg.pos.y);
            }
        }

        fn egg_removed(&mut self, id: EggId) {
            if let Some(el) = self.eggs.remove(&id) {
                el.remove();
            }
        }

        fn score_changed(&mut self, score: u32) {
            self.score.set_text_content(Some(&score_text(score)));
        }

        fn miss_count_changed(&mut self, misses: u32, max_misses: u32) {
            self.missed
                .set_text_content(Some(&missed_text(misses, max_misses)));
        }

        fn game_over(&mut self, final_score: u32) {
            if let Some(el) = &self.game_over {
                el.set_text_content(Some(&game_over_text(final_score)));
                let _ = el.class_list().remove_1("hidden");
            }
        }

        fn reset(&mut self) {
            if let Some(el) = &self.game_over {
                let _ = el.class_list().add_1("hidden");
            }
        }
    }

    /// Game instance plus frame timing
    struct App {
        game: Game<DomPresenter>,
        catcher: Element,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            self.game.advance(dt);
            set_px(&self.catcher, "left", self.game.catcher().x());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Egg Catch starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(catcher) = document.get_element_by_id("player-box") else {
            log::error!("Missing #player-box");
            return;
        };
        let Some(presenter) = DomPresenter::new(document.clone()) else {
            log::error!("Missing #game-container, #score or #missed");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(GameConfig::default(), seed, presenter) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Bad configuration: {}", e);
                return;
            }
        };
        set_px(&catcher, "left", game.catcher().x());

        let app = Rc::new(RefCell::new(App {
            game,
            catcher,
            last_time: 0.0,
        }));

        setup_keyboard(&document, app.clone());
        setup_slider(&document, app.clone());
        request_animation_frame(app);

        log::info!("Egg Catch running!");
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(command) = Command::from_key(&event.key()) {
                let mut app = app.borrow_mut();
                app.game.apply(command);
                let x = app.game.catcher().x();
                set_px(&app.catcher, "left", x);
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Optional range input for absolute positioning
    fn setup_slider(document: &Document, app: Rc<RefCell<App>>) {
        let Some(slider) = document
            .get_element_by_id("player-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let input = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Ok(x) = input.value().parse::<f32>() {
                app.borrow_mut().game.apply(Command::SetPosition(x));
            }
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use egg_catch::present::{game_over_text, missed_text, score_text};
    use egg_catch::sim::{Egg, EggId};
    use egg_catch::{Command, Game, GameConfig, GamePhase, Presenter};

    /// Frame length for the simulated display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Presenter that writes HUD changes to the log
    struct LogPresenter;

    impl Presenter for LogPresenter {
        fn egg_spawned(&mut self, egg: &Egg) {
            log::debug!("egg {} appears at x={:.0}", egg.id.0, egg.pos.x);
        }

        fn egg_removed(&mut self, id: EggId) {
            log::trace!("egg {} gone", id.0);
        }

        fn score_changed(&mut self, score: u32) {
            log::info!("{}", score_text(score));
        }

        fn miss_count_changed(&mut self, misses: u32, max_misses: u32) {
            log::info!("{}", missed_text(misses, max_misses));
        }

        fn game_over(&mut self, final_score: u32) {
            log::info!("{}", game_over_text(final_score));
        }
    }

    /// Step toward the lowest egg, the way a player mashing arrow keys would
    fn autopilot(game: &Game<LogPresenter>) -> Option<Command> {
        let target = game
            .eggs()
            .all()
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;
        let egg_center = target.bounds().min.x + target.size.x / 2.0;
        let catcher = game.catcher().bounds();
        let catcher_center = (catcher.left() + catcher.right()) / 2.0;
        let slack = game.config().catcher_step / 2.0;

        if egg_center < catcher_center - slack {
            Some(Command::MoveLeft)
        } else if egg_center > catcher_center + slack {
            Some(Command::MoveRight)
        } else {
            None
        }
    }

    fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Loaded config from {}", path);
                Ok(GameConfig::from_json(&json)?)
            }
            None => Ok(GameConfig::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_config()?;
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut game = Game::new(config, seed, LogPresenter)?;

        let mut frames = 0;
        while game.phase() == GamePhase::Playing && frames < MAX_FRAMES {
            // Key repeat: one step every other frame
            if frames % 2 == 0
                && let Some(command) = autopilot(&game)
            {
                game.apply(command);
            }
            game.advance(FRAME_MS);
            frames += 1;
        }

        println!(
            "Seed {}: caught {} of {} eggs in {:.1}s",
            game.seed(),
            game.score(),
            game.total_spawned(),
            frames as f64 * FRAME_MS / 1000.0
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Egg Catch (native) starting...");
    log::info!("Native mode runs a headless autopilot round - use `trunk serve` to play");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
