//! Explorer: the shared presentation context
//!
//! Every input handler goes through [`Explorer::handle`] and the animation
//! frame driver calls [`Explorer::frame`]. Components that need to reach
//! each other (navigation, audio, the deep-sea effects) do so through this
//! struct rather than through a global instance.

use glam::Vec2;

use crate::audio::{AudioCues, SoundEffect};
use crate::consts::DIVE_DURATION_MS;
use crate::content::{self, Zone};
use crate::renderer::scene::RenderSurface;
use crate::settings::Settings;
use crate::sim::{
    NavCommand, NavigationState, QuizSession, Section, SectionStage, Transition,
    VisualEffectsController,
};

/// Landing page -> main experience
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingPhase {
    /// Landing page showing
    Landing,
    /// Landing page fading out
    Diving { since_ms: f64 },
    /// Main experience visible
    Exploring,
}

/// Input events, already translated from the platform
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Dive button or scroll indicator
    Dive,
    /// Key press by DOM key name
    Key(String),
    TouchStart { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
    /// Navigation dot at the given position
    NavMarker(usize),
    /// The intro's "enter" control
    Enter,
    AudioToggle,
    /// Pointer over the deep-sea region (region-relative)
    PointerMove { x: f32, y: f32 },
    PointerClick { x: f32, y: f32 },
    /// Deep-sea region entered/left the viewport
    DeepSeaVisible(bool),
    ZoneSelected(String),
    /// Creature chip inside a zone
    ZoneCreature(String),
    QuizStart,
    QuizAnswer(usize),
    QuizNext,
    QuizRestart,
    Resize { width: f32, height: f32 },
}

pub struct Explorer<A: AudioCues> {
    settings: Settings,
    landing: LandingPhase,
    nav: NavigationState,
    stage: SectionStage,
    effects: VisualEffectsController,
    quiz: QuizSession,
    audio: A,
    touch_start: Option<Vec2>,
    active_zone: Option<&'static Zone>,
    last_transition: Option<Transition>,
}

impl<A: AudioCues> Explorer<A> {
    pub fn new(settings: Settings, audio: A, seed: u64, width: f32, height: f32) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        let effects = VisualEffectsController::new(&settings, seed, width, height);
        let stage = SectionStage::new(settings.tuning.reveal_delay_ms);
        Self {
            settings,
            landing: LandingPhase::Landing,
            nav: NavigationState::new(),
            stage,
            effects,
            quiz: QuizSession::default(),
            audio,
            touch_start: None,
            active_zone: None,
            last_transition: None,
        }
    }

    /// Dispatch one input event
    pub fn handle(&mut self, event: AppEvent, now_ms: f64) {
        match event {
            AppEvent::Dive => {
                if self.landing == LandingPhase::Landing {
                    self.landing = LandingPhase::Diving { since_ms: now_ms };
                }
            }
            AppEvent::Key(key) => {
                if let Some(command) = NavCommand::from_key(&key) {
                    self.navigate(command, now_ms);
                }
            }
            AppEvent::TouchStart { x, y } => {
                self.touch_start = Some(Vec2::new(x, y));
            }
            AppEvent::TouchEnd { x, y } => {
                let Some(start) = self.touch_start.take() else {
                    return;
                };
                let delta = Vec2::new(x, y) - start;
                let min = self.settings.tuning.swipe_min_distance;
                if let Some(command) = NavCommand::from_swipe(delta.x, delta.y, min) {
                    self.navigate(command, now_ms);
                }
            }
            AppEvent::NavMarker(index) => {
                if let Some(&section) = self.nav.sections().get(index) {
                    self.navigate(NavCommand::GoTo(section), now_ms);
                }
            }
            AppEvent::Enter => self.navigate(NavCommand::GoTo(Section::Overview), now_ms),
            AppEvent::AudioToggle => {
                let muted = self.audio.toggle_mute();
                log::info!("Audio {}", if muted { "off" } else { "on" });
            }
            AppEvent::PointerMove { x, y } => self.effects.pointer_move(x, y),
            AppEvent::PointerClick { x, y } => {
                self.effects.pointer_click(x, y, &mut self.audio);
            }
            AppEvent::DeepSeaVisible(visible) => self.effects.set_visible(visible),
            AppEvent::ZoneSelected(id) => {
                if let Some(zone) = content::zone(&id) {
                    self.active_zone = Some(zone);
                }
            }
            AppEvent::ZoneCreature(name) => {
                if content::in_gallery(&name) && self.landing == LandingPhase::Exploring {
                    self.audio.play(SoundEffect::Creature);
                    self.navigate(NavCommand::GoTo(Section::Gallery), now_ms);
                }
            }
            AppEvent::QuizStart => self.quiz.start(),
            AppEvent::QuizAnswer(choice) => {
                self.quiz.select(choice);
            }
            AppEvent::QuizNext => self.quiz.next(),
            AppEvent::QuizRestart => self.quiz.restart(),
            AppEvent::Resize { width, height } => self.effects.resize(width, height),
        }
    }

    /// One animation frame. Returns true when the effects surface was drawn.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn RenderSurface) -> bool {
        if let LandingPhase::Diving { since_ms } = self.landing {
            if now_ms - since_ms >= DIVE_DURATION_MS {
                self.landing = LandingPhase::Exploring;
                log::info!("Entering main experience");
            }
        }
        self.stage.update(now_ms);
        self.effects.tick(now_ms, surface)
    }

    fn navigate(&mut self, command: NavCommand, now_ms: f64) {
        if self.landing != LandingPhase::Exploring {
            return;
        }
        if let Some(transition) = self.nav.apply(command) {
            self.stage.begin(transition, now_ms);
            self.audio.play_transition_sound();
            if transition.to == Section::DeepSea {
                self.audio.play(SoundEffect::DeepSea);
            }
            self.last_transition = Some(transition);
        }
    }

    pub fn landing(&self) -> LandingPhase {
        self.landing
    }

    pub fn current_section(&self) -> Section {
        self.nav.current()
    }

    /// Index of the highlighted navigation dot
    pub fn active_marker(&self) -> usize {
        self.nav.index()
    }

    pub fn stage(&self) -> &SectionStage {
        &self.stage
    }

    pub fn effects(&self) -> &VisualEffectsController {
        &self.effects
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn active_zone(&self) -> Option<&'static Zone> {
        self.active_zone
    }

    /// Take the transition made since the last call, if any
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.last_transition.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::TallySurface;
    use crate::sim::QuizPhase;

    #[derive(Default)]
    struct Mixer {
        volume: f32,
        played: Vec<SoundEffect>,
    }

    impl AudioCues for Mixer {
        fn volume(&self) -> f32 {
            self.volume
        }
        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    fn explorer() -> Explorer<Mixer> {
        let audio = Mixer {
            volume: 0.2,
            ..Default::default()
        };
        Explorer::new(Settings::default(), audio, 77, 800.0, 600.0)
    }

    /// Past the landing page
    fn exploring() -> Explorer<Mixer> {
        let mut app = explorer();
        let mut surface = TallySurface::default();
        app.handle(AppEvent::Dive, 0.0);
        app.frame(DIVE_DURATION_MS, &mut surface);
        app
    }

    #[test]
    fn test_dive_sequence() {
        let mut app = explorer();
        let mut surface = TallySurface::default();
        assert_eq!(app.landing(), LandingPhase::Landing);

        app.handle(AppEvent::Dive, 100.0);
        assert_eq!(app.landing(), LandingPhase::Diving { since_ms: 100.0 });
        app.frame(1000.0, &mut surface);
        assert!(matches!(app.landing(), LandingPhase::Diving { .. }));
        app.frame(2100.0, &mut surface);
        assert_eq!(app.landing(), LandingPhase::Exploring);
    }

    #[test]
    fn test_navigation_ignored_on_landing() {
        let mut app = explorer();
        app.handle(AppEvent::Key("ArrowRight".into()), 0.0);
        assert_eq!(app.current_section(), Section::Intro);
        assert!(app.audio().played.is_empty());
    }

    #[test]
    fn test_keys_navigate_with_sound() {
        let mut app = exploring();
        app.handle(AppEvent::Key("ArrowRight".into()), 10.0);
        app.handle(AppEvent::Key("ArrowDown".into()), 20.0);
        assert_eq!(app.current_section(), Section::Gallery);
        assert_eq!(app.active_marker(), 2);
        app.handle(AppEvent::Key("ArrowUp".into()), 30.0);
        assert_eq!(app.current_section(), Section::Overview);
        assert_eq!(app.audio().played.len(), 3);
    }

    #[test]
    fn test_saturated_move_is_silent() {
        let mut app = exploring();
        app.handle(AppEvent::Key("ArrowLeft".into()), 10.0);
        assert_eq!(app.current_section(), Section::Intro);
        assert!(app.audio().played.is_empty());
        assert!(app.take_transition().is_none());
    }

    #[test]
    fn test_swipes() {
        let mut app = exploring();
        // Left swipe -> next
        app.handle(AppEvent::TouchStart { x: 300.0, y: 200.0 }, 0.0);
        app.handle(AppEvent::TouchEnd { x: 240.0, y: 210.0 }, 10.0);
        assert_eq!(app.current_section(), Section::Overview);

        // Vertical dominant -> nothing
        app.handle(AppEvent::TouchStart { x: 300.0, y: 200.0 }, 20.0);
        app.handle(AppEvent::TouchEnd { x: 310.0, y: 260.0 }, 30.0);
        assert_eq!(app.current_section(), Section::Overview);

        // Right swipe -> previous
        app.handle(AppEvent::TouchStart { x: 100.0, y: 200.0 }, 40.0);
        app.handle(AppEvent::TouchEnd { x: 160.0, y: 210.0 }, 50.0);
        assert_eq!(app.current_section(), Section::Intro);
    }

    #[test]
    fn test_touch_end_without_start() {
        let mut app = exploring();
        app.handle(AppEvent::TouchEnd { x: 0.0, y: 0.0 }, 0.0);
        assert_eq!(app.current_section(), Section::Intro);
    }

    #[test]
    fn test_markers_and_enter() {
        let mut app = exploring();
        app.handle(AppEvent::NavMarker(5), 0.0);
        assert_eq!(app.current_section(), Section::Quiz);
        app.handle(AppEvent::NavMarker(42), 0.0);
        assert_eq!(app.current_section(), Section::Quiz);
        app.handle(AppEvent::Enter, 0.0);
        assert_eq!(app.current_section(), Section::Overview);
        assert_eq!(app.active_marker(), 1);
    }

    #[test]
    fn test_transition_reveals_section() {
        let mut app = exploring();
        let mut surface = TallySurface::default();
        app.handle(AppEvent::NavMarker(3), 5000.0);
        assert_eq!(app.stage().style(Section::Zones).opacity, 0.0);
        app.frame(5100.0, &mut surface);
        assert_eq!(app.stage().style(Section::Zones).opacity, 1.0);
        assert_eq!(
            app.take_transition(),
            Some(Transition {
                from: Section::Intro,
                to: Section::Zones
            })
        );
    }

    #[test]
    fn test_audio_toggle() {
        let mut app = exploring();
        app.handle(AppEvent::AudioToggle, 0.0);
        assert_eq!(app.audio().volume(), 0.0);
        app.handle(AppEvent::AudioToggle, 0.0);
        assert_eq!(app.audio().volume(), 0.2);
    }

    #[test]
    fn test_deep_sea_gated_by_visibility() {
        let mut app = exploring();
        let mut surface = TallySurface::default();
        assert!(!app.frame(3000.0, &mut surface));
        assert_eq!(surface.frames, 0);

        app.handle(AppEvent::DeepSeaVisible(true), 3000.0);
        app.handle(AppEvent::PointerClick { x: 10.0, y: 10.0 }, 3000.0);
        assert!(app.frame(3016.0, &mut surface));
        assert_eq!(surface.live, 66);
        assert_eq!(app.audio().played, vec![SoundEffect::Bubble]);
    }

    #[test]
    fn test_zones() {
        let mut app = exploring();
        app.handle(AppEvent::ZoneSelected("bathypelagic".into()), 0.0);
        assert_eq!(app.active_zone().unwrap().id, "bathypelagic");
        app.handle(AppEvent::ZoneSelected("hadal".into()), 0.0);
        assert_eq!(app.active_zone().unwrap().id, "bathypelagic");

        app.handle(AppEvent::ZoneCreature("Kraken".into()), 0.0);
        assert_eq!(app.current_section(), Section::Intro);
        app.handle(AppEvent::ZoneCreature("Giant Squid".into()), 0.0);
        assert_eq!(app.current_section(), Section::Gallery);
        assert_eq!(
            app.audio().played,
            vec![SoundEffect::Creature, SoundEffect::Transition]
        );
    }

    #[test]
    fn test_deep_sea_arrival_rumbles() {
        let mut app = exploring();
        app.handle(AppEvent::NavMarker(4), 0.0);
        assert_eq!(app.current_section(), Section::DeepSea);
        assert_eq!(
            app.audio().played,
            vec![SoundEffect::Transition, SoundEffect::DeepSea]
        );
    }

    #[test]
    fn test_quiz_events() {
        let mut app = exploring();
        app.handle(AppEvent::QuizAnswer(0), 0.0);
        assert_eq!(app.quiz().phase(), QuizPhase::Idle);
        app.handle(AppEvent::QuizStart, 0.0);
        app.handle(AppEvent::QuizAnswer(1), 0.0);
        assert_eq!(app.quiz().score(), 1);
        app.handle(AppEvent::QuizNext, 0.0);
        assert_eq!(app.quiz().phase(), QuizPhase::Asking { index: 1 });
        app.handle(AppEvent::QuizRestart, 0.0);
        assert_eq!(app.quiz().phase(), QuizPhase::Idle);
    }
}
