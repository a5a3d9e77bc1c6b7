//! Mug Matcher entry point
//!
//! Binds the round to the page on the web; runs a scripted round natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use mug_matcher::game::{Feedback, Inmate, Role, RoundPhase};
    use mug_matcher::source::{HttpSource, InmateSource};
    use mug_matcher::storage::{KeyValueStore, LocalStore, MemoryStore};
    use mug_matcher::{PointsLedger, Round, Settings, format_elapsed};

    /// Below this width cards open the crime picker instead of selecting
    const MOBILE_BREAKPOINT_PX: f64 = 768.0;

    /// Game instance holding all state
    struct Game {
        round: Round,
        ledger: PointsLedger<Box<dyn KeyValueStore>>,
        settings: Settings,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    fn is_mobile() -> bool {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .map(|w| w < MOBILE_BREAKPOINT_PX)
            .unwrap_or(false)
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Mug Matcher starting...");

        let store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; points will not persist", e);
                Box::new(MemoryStore::new())
            }
        };
        let settings = Settings::load(&*store);
        let ledger = PointsLedger::load(store);

        let seed = now_ms() as u64;
        let game = Rc::new(RefCell::new(Game {
            round: Round::new(seed),
            ledger,
            settings,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_card_handlers(game.clone());
        setup_buttons(game.clone());
        setup_clock(game.clone());

        load_roster(game).await;
        log::info!("Mug Matcher running!");
    }

    /// Fetch the roster without holding a borrow across the await
    async fn load_roster(game: Rc<RefCell<Game>>) {
        let endpoint = {
            let mut g = game.borrow_mut();
            g.round.begin_load();
            g.settings.inmates_endpoint.clone()
        };
        render(&game.borrow());

        let fetched = HttpSource::new(endpoint).fetch_inmates().await;

        {
            let mut g = game.borrow_mut();
            g.round.finish_load(fetched, now_ms());
        }
        render(&game.borrow());
    }

    /// Find the `data-id` of the card an event landed on
    fn card_id(event: &MouseEvent) -> Option<String> {
        let target: Element = event.target()?.dyn_into().ok()?;
        target.closest("[data-id]").ok()??.get_attribute("data-id")
    }

    fn on_click(id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_card_handlers(game: Rc<RefCell<Game>>) {
        // Mugshot column
        {
            let game = game.clone();
            on_click("mugshots", move |event| {
                let Some(id) = card_id(&event) else { return };
                {
                    let mut g = game.borrow_mut();
                    if is_mobile() {
                        g.round.open_crime_picker(id);
                    } else {
                        g.round.select(Role::Mugshot, id);
                    }
                }
                render(&game.borrow());
            });
        }

        // Crime column
        {
            let game = game.clone();
            on_click("crimes", move |event| {
                let Some(id) = card_id(&event) else { return };
                {
                    let mut g = game.borrow_mut();
                    if is_mobile() {
                        g.round.open_crime_picker(id);
                    } else {
                        g.round.select(Role::Crime, id);
                    }
                }
                render(&game.borrow());
            });
        }

        // Mobile crime picker
        on_click("crime-picker-list", move |event| {
            let Some(id) = card_id(&event) else { return };
            game.borrow_mut().round.pick_crime(&id);
            render(&game.borrow());
        });
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("submit-btn", move |_event| {
                let feedback = {
                    let mut g = game.borrow_mut();
                    let Game { round, ledger, .. } = &mut *g;
                    round.submit(ledger).map(|outcome| outcome.feedback())
                };
                if let Some(feedback) = feedback {
                    show_feedback(&game.borrow().settings, &feedback);
                }
                render(&game.borrow());
            });
        }

        {
            let game = game.clone();
            on_click("reset-btn", move |_event| {
                {
                    let mut g = game.borrow_mut();
                    g.round.reset(now_ms());
                }
                log::info!("New round started");
                render(&game.borrow());
            });
        }

        {
            let game = game.clone();
            on_click("crime-picker-close", move |_event| {
                game.borrow_mut().round.close_crime_picker();
                render(&game.borrow());
            });
        }

        on_click("retry-btn", move |_event| {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(load_roster(game));
        });
    }

    fn setup_clock(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut()>::new(move || {
            let g = game.borrow();
            if g.round.is_playable() {
                if let Some(document) = document() {
                    set_text(&document, "hud-clock", &g.round.elapsed(now_ms()));
                }
            }
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        );
        closure.forget();
    }

    /// Show a toast and fire the haptic cue
    fn show_feedback(settings: &Settings, feedback: &Feedback) {
        let Some(document) = document() else { return };

        if let Some(toast) = document.get_element_by_id("toast") {
            set_text(&document, "toast-title", &feedback.toast.title);
            set_text(&document, "toast-description", &feedback.toast.description);
            let _ = toast.set_attribute("class", &format!("toast {}", feedback.toast.variant.as_str()));

            let hide = Closure::once(move || {
                let _ = toast.class_list().add_1("hidden");
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    hide.as_ref().unchecked_ref(),
                    settings.toast_duration_ms as i32,
                );
            }
            hide.forget();
        }

        if let Some(haptic) = feedback.haptic {
            log::info!("Haptic feedback: {}", haptic.as_str());
            if settings.haptics {
                if let Some(window) = web_sys::window() {
                    let pattern: js_sys::Array =
                        haptic.pattern_ms().iter().map(|&ms| JsValue::from(ms)).collect();
                    window.navigator().vibrate_with_pattern(&pattern);
                }
            }
        }
    }

    fn card(document: &Document, inmate: &Inmate, classes: &str) -> Option<Element> {
        let el = document.create_element("div").ok()?;
        el.set_class_name(classes);
        let _ = el.set_attribute("data-id", &inmate.key());
        Some(el)
    }

    fn mugshot_card(document: &Document, g: &Game, inmate: &Inmate) -> Option<Element> {
        let key = inmate.key();
        let matches = g.round.matches();
        let mut classes = String::from("card mugshot-card");
        if matches.selected(Role::Mugshot) == Some(key.as_str()) {
            classes.push_str(" selected");
        }
        if matches.crime_for_mugshot(&key).is_some() {
            classes.push_str(" matched");
        }

        let el = card(document, inmate, &classes)?;
        let img = document.create_element("img").ok()?;
        let _ = img.set_attribute("src", &inmate.image);
        let _ = img.set_attribute("alt", &inmate.name);
        let _ = el.append_child(&img);
        let name = document.create_element("span").ok()?;
        name.set_text_content(Some(&inmate.name));
        let _ = el.append_child(&name);
        Some(el)
    }

    fn crime_card(document: &Document, g: &Game, inmate: &Inmate) -> Option<Element> {
        let key = inmate.key();
        let matches = g.round.matches();
        let mut classes = String::from("card crime-card");
        if matches.selected(Role::Crime) == Some(key.as_str()) {
            classes.push_str(" selected");
        }
        if let Some(results) = g.round.results() {
            if results.correct_matches.contains(&inmate.id) {
                classes.push_str(" correct");
            } else {
                classes.push_str(" wrong");
            }
        }

        let el = card(document, inmate, &classes)?;
        let text = document.create_element("p").ok()?;
        text.set_text_content(Some(inmate.crime_text()));
        let _ = el.append_child(&text);

        if let Some(suspect) = matches.matched_mugshot(&key).and_then(|id| g.round.inmate(id)) {
            let tag = document.create_element("span").ok()?;
            tag.set_class_name("matched-suspect");
            let attempts = matches.attempts(&key);
            let label = if attempts > 1 {
                format!("{} (try {})", suspect.name, attempts)
            } else {
                suspect.name.clone()
            };
            tag.set_text_content(Some(&label));
            let _ = el.append_child(&tag);
        }
        Some(el)
    }

    fn fill(document: &Document, container_id: &str, cards: impl Iterator<Item = Option<Element>>) {
        let Some(container) = document.get_element_by_id(container_id) else {
            return;
        };
        container.set_inner_html("");
        for card in cards.flatten() {
            let _ = container.append_child(&card);
        }
    }

    /// Redraw the page from game state
    fn render(g: &Game) {
        let Some(document) = document() else { return };
        let phase = g.round.phase();

        set_hidden(&document, "loading", phase != RoundPhase::Loading);
        set_hidden(&document, "load-error", g.round.load_error().is_none());
        if let Some(message) = g.round.load_error() {
            set_text(&document, "load-error-message", message);
        }

        fill(
            &document,
            "mugshots",
            g.round.mugshots().iter().map(|i| mugshot_card(&document, g, i)),
        );
        fill(
            &document,
            "crimes",
            g.round.crimes().iter().map(|i| crime_card(&document, g, i)),
        );

        // Mobile crime picker
        let picker = g.round.crime_picker();
        set_hidden(&document, "crime-picker", picker.is_none());
        if let Some(mugshot) = picker {
            set_text(&document, "crime-picker-name", &mugshot.name);
            fill(
                &document,
                "crime-picker-list",
                g.round.crimes().iter().map(|i| crime_card(&document, g, i)),
            );
        }

        // HUD
        set_text(&document, "hud-points", &g.ledger.points().to_string());
        set_text(&document, "hud-high-score", &g.ledger.high_score().to_string());
        set_text(
            &document,
            "hud-matches",
            &format!("{}/{}", g.round.matched_count(), g.round.total()),
        );
        if let Some(bar) = document.get_element_by_id("progress-bar") {
            let _ = bar.set_attribute("style", &format!("width: {}%", g.round.progress_percent()));
        }

        // Controls
        let submitted = phase == RoundPhase::Submitted;
        set_hidden(&document, "submit-btn", submitted || !g.round.is_playable());
        set_hidden(&document, "reset-btn", !submitted);

        // Results
        set_hidden(&document, "results", !submitted);
        if let Some(results) = g.round.results() {
            set_text(
                &document,
                "results-score",
                &format!("{}/{}", results.score, results.total),
            );
            set_text(&document, "results-percentage", &format!("{}%", results.percentage));
            set_text(&document, "results-points", &g.ledger.points().to_string());
            set_text(
                &document,
                "results-time",
                &format_elapsed(now_ms() - g.round.started_at_ms()),
            );
            set_hidden(&document, "results-earned", results.points_earned == 0);
            set_text(
                &document,
                "results-earned",
                &format!("+{} Points Earned!", results.points_earned),
            );
            set_hidden(&document, "results-high-score", !g.ledger.is_new_high_score());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mug_matcher::game::{Role, placeholder_inmates};
    use mug_matcher::source::{JsonFileSource, StaticSource};
    use mug_matcher::storage::MemoryStore;
    use mug_matcher::{PointsLedger, Round};

    env_logger::init();
    log::info!("Mug Matcher (native) starting...");
    log::info!("Native mode plays one scripted round - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut round = Round::new(seed);
    let now_ms = seed as f64;

    match std::env::args().nth(1) {
        Some(path) => {
            futures::executor::block_on(round.load_from(&JsonFileSource::new(path), now_ms))
        }
        None => futures::executor::block_on(
            round.load_from(&StaticSource::new(placeholder_inmates()), now_ms),
        ),
    }
    if let Some(message) = round.load_error() {
        log::warn!("{}", message);
    }

    let mut ledger = PointsLedger::load(MemoryStore::new());

    // Guess: pair the columns in display order
    let guesses: Vec<(String, String)> = round
        .mugshots()
        .iter()
        .zip(round.crimes())
        .map(|(m, c)| (m.key(), c.key()))
        .collect();
    for (mugshot, crime) in guesses {
        round.select(Role::Mugshot, mugshot);
        round.select(Role::Crime, crime);
    }

    match round.submit(&mut ledger) {
        Some(outcome) => {
            let feedback = outcome.feedback();
            println!("{}", feedback.toast.title);
            println!("{}", feedback.toast.description);
        }
        None => println!("Round was not playable ({})", round.phase().as_str()),
    }
    println!(
        "Points: {}  High score: {}  ({} keys stored)",
        ledger.points(),
        ledger.high_score(),
        ledger.store().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
