//! Ocean Explorer entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement,
        IntersectionObserver, IntersectionObserverEntry, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use ocean_explorer::app::LandingPhase;
    use ocean_explorer::audio::{AudioCues, AudioManager};
    use ocean_explorer::renderer::{RenderState, TallySurface};
    use ocean_explorer::sim::{QuizPhase, Section};
    use ocean_explorer::{AppEvent, Explorer, Settings};

    /// Explorer plus the browser-side handles
    struct App {
        explorer: Explorer<AudioManager>,
        render_state: Option<RenderState>,
        /// Last state mirrored into the DOM
        shown_landing: Option<LandingPhase>,
        shown_quiz: Option<QuizPhase>,
        shown_zone: Option<&'static str>,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// Register an event listener for the page lifetime
    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn listen_id(document: &Document, id: &str, event: &str, handler: impl FnMut(Event) + 'static) {
        match document.get_element_by_id(id) {
            Some(el) => listen(&el, event, handler),
            None => log::warn!("Element #{id} not found"),
        }
    }

    fn elements(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn set_class(el: &Element, class: &str, on: bool) {
        let _ = if on {
            el.class_list().add_1(class)
        } else {
            el.class_list().remove_1(class)
        };
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Handle one event and mirror the result into the DOM
    fn dispatch(app: &Rc<RefCell<App>>, event: AppEvent) {
        let mut app = app.borrow_mut();
        app.explorer.handle(event, now_ms());
        sync_dom(&mut app);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ocean Explorer starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Optional JSON settings embedded in the page
        let settings = document
            .get_element_by_id("explorer-settings")
            .and_then(|el| el.text_content())
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);

        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(settings.master_volume);
        let explorer = Explorer::new(settings, audio, seed, width as f32, height as f32);
        log::info!("Explorer initialized with seed: {}", seed);

        let render_state = match document
            .get_element_by_id("deepCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => create_render_state(canvas, width, height).await,
            None => {
                log::warn!("No #deepCanvas - deep-sea view disabled");
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            explorer,
            render_state,
            shown_landing: None,
            shown_quiz: None,
            shown_zone: None,
        }));

        setup_landing(&document, app.clone());
        setup_navigation(&document, app.clone());
        setup_deep_sea(&document, app.clone());
        setup_zones(&document, app.clone());
        setup_quiz(&document, app.clone());
        setup_resize(app.clone());

        sync_dom(&mut app.borrow_mut());
        request_animation_frame(app);

        log::info!("Ocean Explorer running!");
    }

    async fn create_render_state(
        canvas: HtmlCanvasElement,
        width: f64,
        height: f64,
    ) -> Option<RenderState> {
        let dpr = web_sys::window()?.device_pixel_ratio();
        let physical_w = (width * dpr) as u32;
        let physical_h = (height * dpr) as u32;
        canvas.set_width(physical_w);
        canvas.set_height(physical_h);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| log::warn!("Failed to create surface: {e:?}"))
            .ok()?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("No adapter: {e:?}"))
            .ok()?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, physical_w, physical_h, dpr as f32).await
    }

    fn setup_landing(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            listen_id(document, "dive-btn", "click", move |_| {
                dispatch(&app, AppEvent::Dive);
            });
        }
        if let Some(indicator) = document
            .query_selector(".scroll-indicator")
            .ok()
            .flatten()
        {
            let app = app.clone();
            listen(&indicator, "click", move |_| dispatch(&app, AppEvent::Dive));
        }

        // Audio context needs a user gesture before it will play
        listen(document, "click", move |_| {
            if let Ok(app) = app.try_borrow() {
                app.explorer.audio().resume();
            }
        });
    }

    fn setup_navigation(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            listen_id(document, "enter-btn", "click", move |_| {
                dispatch(&app, AppEvent::Enter);
            });
        }

        for (index, dot) in elements(document, ".nav-dot").into_iter().enumerate() {
            let app = app.clone();
            listen(&dot, "click", move |_| dispatch(&app, AppEvent::NavMarker(index)));
        }

        {
            let app = app.clone();
            listen_id(document, "audio-toggle", "click", move |_| {
                dispatch(&app, AppEvent::AudioToggle);
            });
        }

        {
            let app = app.clone();
            listen(document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if key.starts_with("Arrow") {
                    event.prevent_default();
                }
                dispatch(&app, AppEvent::Key(key));
            });
        }

        // Swipes
        {
            let app = app.clone();
            listen(document, "touchstart", move |event| {
                if let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| e.changed_touches().get(0))
                {
                    let (x, y) = (touch.screen_x() as f32, touch.screen_y() as f32);
                    dispatch(&app, AppEvent::TouchStart { x, y });
                }
            });
        }
        listen(document, "touchend", move |event| {
            if let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.changed_touches().get(0))
            {
                let (x, y) = (touch.screen_x() as f32, touch.screen_y() as f32);
                dispatch(&app, AppEvent::TouchEnd { x, y });
            }
        });
    }

    fn setup_deep_sea(document: &Document, app: Rc<RefCell<App>>) {
        let Some(region) = document.get_element_by_id(Section::DeepSea.as_str()) else {
            log::warn!("Deep-sea section not found - effects stay inactive");
            return;
        };

        // Visibility gate
        {
            let app = app.clone();
            let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        dispatch(&app, AppEvent::DeepSeaVisible(entry.is_intersecting()));
                    }
                }
            });
            match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
                Ok(observer) => observer.observe(&region),
                Err(_) => log::warn!("IntersectionObserver unavailable"),
            }
            callback.forget();
        }

        let relative = |region: &Element, event: &MouseEvent| {
            let rect = region.get_bounding_client_rect();
            (
                event.client_x() as f32 - rect.left() as f32,
                event.client_y() as f32 - rect.top() as f32,
            )
        };

        {
            let app = app.clone();
            let target = region.clone();
            listen(&region, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = relative(&target, event);
                    dispatch(&app, AppEvent::PointerMove { x, y });
                }
            });
        }
        let target = region.clone();
        listen(&region, "click", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = relative(&target, event);
                dispatch(&app, AppEvent::PointerClick { x, y });
            }
        });
    }

    fn setup_zones(document: &Document, app: Rc<RefCell<App>>) {
        for zone in elements(document, ".zone") {
            if let Some(id) = zone.get_attribute("data-zone") {
                let app = app.clone();
                listen(&zone, "click", move |_| {
                    dispatch(&app, AppEvent::ZoneSelected(id.clone()));
                });
            }

            let creatures = zone.query_selector_all(".zone-creature").ok();
            let count = creatures.as_ref().map(|l| l.length()).unwrap_or(0);
            for i in 0..count {
                let Some(creature) = creatures
                    .as_ref()
                    .and_then(|l| l.get(i))
                    .and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    continue;
                };
                let Some(name) = creature.get_attribute("data-creature") else {
                    continue;
                };
                let app = app.clone();
                listen(&creature, "click", move |event| {
                    // Keep the enclosing zone from handling it too
                    event.stop_propagation();
                    dispatch(&app, AppEvent::ZoneCreature(name.clone()));
                });
            }
        }
    }

    fn setup_quiz(document: &Document, app: Rc<RefCell<App>>) {
        for (id, event) in [
            ("start-quiz", AppEvent::QuizStart),
            ("next-question", AppEvent::QuizNext),
            ("restart-quiz", AppEvent::QuizRestart),
        ] {
            let app = app.clone();
            listen_id(document, id, "click", move |_| dispatch(&app, event.clone()));
        }

        // Answers are rebuilt per question; one delegated listener reads data-index
        listen_id(document, "quiz-answers", "click", move |event| {
            let choice = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|i| i.parse::<usize>().ok());
            if let Some(choice) = choice {
                dispatch(&app, AppEvent::QuizAnswer(choice));
            }
        });
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let target = window.clone();
        listen(&window, "resize", move |_| {
            let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
            let (Some(w), Some(h)) = (size(target.inner_width()), size(target.inner_height()))
            else {
                return;
            };
            let mut app = app.borrow_mut();
            app.explorer.handle(
                AppEvent::Resize {
                    width: w as f32,
                    height: h as f32,
                },
                now_ms(),
            );
            let dpr = target.device_pixel_ratio();
            if let Some(render_state) = app.render_state.as_mut() {
                render_state.resize((w * dpr) as u32, (h * dpr) as u32);
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let state = &mut *guard;
            let drawn = match state.render_state.as_mut() {
                Some(render_state) => state.explorer.frame(time, render_state),
                None => state.explorer.frame(time, &mut TallySurface::default()),
            };
            if drawn {
                if let Some(document) = document() {
                    let depth = state.explorer.effects().depth_meters();
                    set_text(&document, "current-depth", &depth.to_string());
                }
            }
            sync_dom(state);
        }

        request_animation_frame(app);
    }

    /// Mirror explorer state into the page
    fn sync_dom(app: &mut App) {
        let Some(document) = document() else {
            return;
        };
        sync_landing(&document, app);
        sync_sections(&document, &app.explorer);
        sync_quiz(&document, app);
        sync_zone(&document, app);

        let muted = app.explorer.audio().volume() <= 0.0;
        if let Some(toggle) = document.get_element_by_id("audio-toggle") {
            toggle.set_text_content(Some(if muted { "🔇" } else { "🔊" }));
            set_class(&toggle, "muted", muted);
            let _ = toggle.set_attribute("title", if muted { "Audio Off" } else { "Audio On" });
        }
    }

    fn sync_landing(document: &Document, app: &mut App) {
        let landing = app.explorer.landing();
        if app.shown_landing == Some(landing) {
            return;
        }
        app.shown_landing = Some(landing);

        let page = document.get_element_by_id("landing-page");
        let main = document.get_element_by_id("main-experience");
        match landing {
            LandingPhase::Landing => {}
            LandingPhase::Diving { .. } => {
                if let Some(page) = &page {
                    set_class(page, "hidden", true);
                }
            }
            LandingPhase::Exploring => {
                set_display(document, "landing-page", "none");
                if let Some(main) = &main {
                    set_class(main, "hidden", false);
                    set_class(main, "active", true);
                }
            }
        }
    }

    fn sync_sections(document: &Document, explorer: &Explorer<AudioManager>) {
        let stage = explorer.stage();
        for section in Section::ALL {
            let Some(el) = document.get_element_by_id(section.as_str()) else {
                continue;
            };
            let style = stage.style(section);
            set_class(&el, "hidden", style.hidden);
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let css = el.style();
                let _ = css.set_property("opacity", &style.opacity.to_string());
                let _ = css.set_property("transform", &format!("translateY({}px)", style.offset_y));
            }
        }

        let active = explorer.active_marker();
        for (index, dot) in elements(document, ".nav-dot").iter().enumerate() {
            set_class(dot, "active", index == active);
        }
    }

    fn sync_quiz(document: &Document, app: &mut App) {
        let phase = app.explorer.quiz().phase();
        if app.shown_quiz == Some(phase) {
            return;
        }
        app.shown_quiz = Some(phase);
        let quiz = app.explorer.quiz();

        match phase {
            QuizPhase::Idle => {
                set_display(document, "quiz-question", "block");
                set_display(document, "quiz-answers", "grid");
                set_display(document, "quiz-score", "none");
                set_display(document, "restart-quiz", "none");
                set_display(document, "next-question", "none");
                set_display(document, "start-quiz", "inline-block");
            }
            QuizPhase::Asking { .. } => {
                let Some(question) = quiz.current_question() else {
                    return;
                };
                set_display(document, "start-quiz", "none");
                set_display(document, "quiz-score", "none");
                set_display(document, "next-question", "none");
                set_text(document, "question-text", question.question);
                if let Some(answers) = document.get_element_by_id("quiz-answers") {
                    answers.set_inner_html("");
                    for (index, text) in question.answers.iter().enumerate() {
                        let Ok(div) = document.create_element("div") else {
                            continue;
                        };
                        div.set_class_name("quiz-answer");
                        div.set_text_content(Some(text));
                        let _ = div.set_attribute("data-index", &index.to_string());
                        let _ = answers.append_child(&div);
                    }
                }
            }
            QuizPhase::Answered {
                selected, correct, ..
            } => {
                let Some(question) = quiz.current_question() else {
                    return;
                };
                for (index, answer) in elements(document, ".quiz-answer").iter().enumerate() {
                    if index == question.correct {
                        set_class(answer, "correct", true);
                    } else if index == selected && !correct {
                        set_class(answer, "incorrect", true);
                    }
                }
                if let Some(text) = document.get_element_by_id("question-text") {
                    text.set_inner_html(&format!(
                        "<strong>Answer:</strong> {}<br><br><em>{}</em>",
                        question.correct_answer(),
                        question.explanation
                    ));
                }
                set_display(document, "next-question", "inline-block");
            }
            QuizPhase::Finished => {
                set_display(document, "quiz-question", "none");
                set_display(document, "quiz-answers", "none");
                set_display(document, "next-question", "none");
                set_display(document, "quiz-score", "block");
                set_display(document, "restart-quiz", "inline-block");
                set_text(document, "score-value", &quiz.score_text());
                if let Some(feedback) = quiz.feedback() {
                    set_text(document, "score-feedback", feedback.message());
                }
            }
        }
    }

    fn sync_zone(document: &Document, app: &mut App) {
        let Some(zone) = app.explorer.active_zone() else {
            return;
        };
        if app.shown_zone == Some(zone.id) {
            return;
        }
        app.shown_zone = Some(zone.id);

        for el in elements(document, ".zone") {
            let active = el.get_attribute("data-zone").as_deref() == Some(zone.id);
            set_class(&el, "active", active);
        }
        if let Some(description) = document.get_element_by_id("zone-description") {
            description.set_inner_html(&format!(
                "<strong>{}</strong><br><em>Depth: {}</em><br><br>{}<br><br>\
                 <strong>Characteristics:</strong> {}<br><br>\
                 <strong>Marine Life:</strong> {}",
                zone.name,
                zone.depth,
                zone.description,
                zone.characteristics,
                zone.marine_life()
            ));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ocean_explorer::audio::Silent;
    use ocean_explorer::renderer::TallySurface;
    use ocean_explorer::{AppEvent, Explorer, Settings};

    env_logger::init();
    log::info!("Ocean Explorer (native) starting...");
    log::info!("Native mode runs a headless tour - run with `trunk serve` for the web version");

    let mut explorer = Explorer::new(Settings::default(), Silent, 42, 1280.0, 720.0);
    let mut surface = TallySurface::default();
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;

    explorer.handle(AppEvent::Dive, now);
    while now < 2000.0 {
        now += frame_ms;
        explorer.frame(now, &mut surface);
    }

    // Arrow through to the deep-sea section
    for _ in 0..4 {
        explorer.handle(AppEvent::Key("ArrowRight".into()), now);
    }
    explorer.handle(AppEvent::DeepSeaVisible(true), now);

    for i in 0..600u32 {
        let angle = i as f32 * 0.02;
        explorer.handle(
            AppEvent::PointerMove {
                x: 640.0 + angle.cos() * 200.0,
                y: 360.0 + angle.sin() * 200.0,
            },
            now,
        );
        if i % 45 == 0 {
            explorer.handle(AppEvent::PointerClick { x: 640.0, y: 360.0 }, now);
        }
        now += frame_ms;
        explorer.frame(now, &mut surface);
    }

    println!(
        "Section: {}  frames: {}  live primitives: {}  (added {}, updated {}, removed {})",
        explorer.current_section().as_str(),
        surface.frames,
        surface.live,
        surface.added,
        surface.updated,
        surface.removed
    );
    println!(
        "Depth gauge: {} m, ripples alive: {}",
        explorer.effects().depth_meters(),
        explorer.effects().ripples().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
