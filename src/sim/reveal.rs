//! Section visibility with a two-phase reveal
//!
//! On every transition all sections except the intro are hidden at zero
//! opacity, the target is unhidden, and once the reveal delay has passed it
//! settles to full opacity with no vertical offset.

use std::collections::HashMap;

use super::navigation::{Section, Transition};
use crate::consts::REVEAL_OFFSET_Y;

/// Presentation style of one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub hidden: bool,
    pub opacity: f32,
    /// Vertical offset (px) from the resting position
    pub offset_y: f32,
}

impl SectionStyle {
    const HIDDEN: SectionStyle = SectionStyle {
        hidden: true,
        opacity: 0.0,
        offset_y: REVEAL_OFFSET_Y,
    };

    const RESTING: SectionStyle = SectionStyle {
        hidden: false,
        opacity: 1.0,
        offset_y: 0.0,
    };
}

#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    section: Section,
    at_ms: f64,
}

/// Visibility of every section plus the in-flight reveal
#[derive(Debug, Clone)]
pub struct SectionStage {
    styles: HashMap<Section, SectionStyle>,
    pending: Option<PendingReveal>,
    delay_ms: f64,
}

impl SectionStage {
    pub fn new(delay_ms: f64) -> Self {
        let styles = Section::ALL
            .into_iter()
            .map(|s| {
                let style = if s.always_visible() {
                    SectionStyle::RESTING
                } else {
                    SectionStyle::HIDDEN
                };
                (s, style)
            })
            .collect();
        Self {
            styles,
            pending: None,
            delay_ms,
        }
    }

    /// First phase: hide everything but the intro, unhide the target
    pub fn begin(&mut self, transition: Transition, now_ms: f64) {
        for (section, style) in self.styles.iter_mut() {
            if !section.always_visible() {
                *style = SectionStyle::HIDDEN;
            }
        }
        if let Some(style) = self.styles.get_mut(&transition.to) {
            style.hidden = false;
        }
        self.pending = Some(PendingReveal {
            section: transition.to,
            at_ms: now_ms + self.delay_ms,
        });
    }

    /// Second phase: settle the target once its delay has elapsed.
    /// Returns true when a style changed.
    pub fn update(&mut self, now_ms: f64) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now_ms < pending.at_ms {
            return false;
        }
        self.pending = None;
        if let Some(style) = self.styles.get_mut(&pending.section) {
            *style = SectionStyle::RESTING;
        }
        true
    }

    pub fn style(&self, section: Section) -> SectionStyle {
        self.styles
            .get(&section)
            .copied()
            .unwrap_or(SectionStyle::HIDDEN)
    }

    pub fn is_revealing(&self) -> bool {
        self.pending.is_some()
    }

    /// Sections currently not hidden
    pub fn visible(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.style(*s).hidden)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Section, to: Section) -> Transition {
        Transition { from, to }
    }

    #[test]
    fn test_initial_only_intro() {
        let stage = SectionStage::new(100.0);
        assert_eq!(stage.visible(), vec![Section::Intro]);
        assert_eq!(stage.style(Section::Intro).opacity, 1.0);
    }

    #[test]
    fn test_two_phase_reveal() {
        let mut stage = SectionStage::new(100.0);
        stage.begin(transition(Section::Intro, Section::Gallery), 1000.0);

        let style = stage.style(Section::Gallery);
        assert!(!style.hidden);
        assert_eq!(style.opacity, 0.0);
        assert!(stage.is_revealing());

        assert!(!stage.update(1050.0));
        assert_eq!(stage.style(Section::Gallery).opacity, 0.0);

        assert!(stage.update(1100.0));
        let style = stage.style(Section::Gallery);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.offset_y, 0.0);
        assert!(!stage.is_revealing());
        assert!(!stage.update(2000.0));
    }

    #[test]
    fn test_previous_section_hidden_but_intro_kept() {
        let mut stage = SectionStage::new(100.0);
        stage.begin(transition(Section::Intro, Section::Zones), 0.0);
        stage.update(100.0);
        stage.begin(transition(Section::Zones, Section::Quiz), 200.0);

        let zones = stage.style(Section::Zones);
        assert!(zones.hidden);
        assert_eq!(zones.opacity, 0.0);
        assert!(!stage.style(Section::Intro).hidden);
        assert_eq!(stage.visible(), vec![Section::Intro, Section::Quiz]);
    }

    #[test]
    fn test_interrupted_reveal_settles_latest_target() {
        let mut stage = SectionStage::new(100.0);
        stage.begin(transition(Section::Intro, Section::Overview), 0.0);
        stage.begin(transition(Section::Overview, Section::Gallery), 50.0);
        stage.update(150.0);

        assert!(stage.style(Section::Overview).hidden);
        assert_eq!(stage.style(Section::Gallery).opacity, 1.0);
    }
}
