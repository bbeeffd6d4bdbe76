//! Sound cues
//!
//! The core only talks to [`AudioCues`]. In the browser the cues are
//! synthesized with the Web Audio API - no external files needed. Where
//! audio is unavailable the volume reads as zero and every cue is a no-op.

use crate::consts::DEFAULT_VOLUME;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Moving between sections
    Transition,
    /// Click ripple in the deep-sea view
    Bubble,
    /// Creature card selected
    Creature,
    /// Deep-sea ambience rumble
    DeepSea,
}

/// Audio collaborator used by the core
pub trait AudioCues {
    /// Current master volume (0.0 - 1.0)
    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    fn play(&mut self, effect: SoundEffect);

    fn play_transition_sound(&mut self) {
        self.play(SoundEffect::Transition);
    }

    fn play_bubble_sound(&mut self) {
        self.play(SoundEffect::Bubble);
    }

    /// Mute if audible, otherwise restore the default level.
    /// Returns true when now muted.
    fn toggle_mute(&mut self) -> bool {
        if self.volume() > 0.0 {
            self.set_volume(0.0);
            true
        } else {
            self.set_volume(DEFAULT_VOLUME);
            false
        }
    }
}

/// Audio for environments without sound support
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioCues for Silent {
    fn volume(&self) -> f32 {
        0.0
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn play(&mut self, _effect: SoundEffect) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCues, SoundEffect};

    /// Web Audio implementation
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
    }

    impl AudioManager {
        pub fn new(master_volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: master_volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single decaying tone starting `delay` seconds from now
        fn tone(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            duration: f64,
            delay: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(self.master_volume, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration).ok();
        }
    }

    impl AudioCues for AudioManager {
        fn volume(&self) -> f32 {
            if self.ctx.is_some() {
                self.master_volume
            } else {
                0.0
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.master_volume = volume.clamp(0.0, 1.0);
        }

        fn play(&mut self, effect: SoundEffect) {
            if self.master_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();

            let jitter = js_sys::Math::random() as f32;
            match effect {
                SoundEffect::Transition => {
                    // Two rising swells
                    self.tone(ctx, 200.0, OscillatorType::Sine, 0.8, 0.0);
                    self.tone(ctx, 300.0, OscillatorType::Sine, 0.6, 0.15);
                }
                SoundEffect::Bubble => {
                    self.tone(ctx, 600.0 + jitter * 600.0, OscillatorType::Sine, 0.15, 0.0);
                }
                SoundEffect::Creature => {
                    self.tone(ctx, 300.0 + jitter * 200.0, OscillatorType::Triangle, 0.4, 0.0);
                }
                SoundEffect::DeepSea => {
                    self.tone(ctx, 80.0 + jitter * 40.0, OscillatorType::Sawtooth, 1.5, 0.0);
                }
            }
        }
    }
}
