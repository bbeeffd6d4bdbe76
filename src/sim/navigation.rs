//! Section navigation
//!
//! An ordered, fixed list of sections with a current index. Relative moves
//! saturate at both ends; jumps to unknown names are ignored.

use serde::{Deserialize, Serialize};

/// One screen of the presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Intro,
    Overview,
    Gallery,
    Zones,
    DeepSea,
    Quiz,
    About,
}

impl Section {
    /// Presentation order
    pub const ALL: [Section; 7] = [
        Section::Intro,
        Section::Overview,
        Section::Gallery,
        Section::Zones,
        Section::DeepSea,
        Section::Quiz,
        Section::About,
    ];

    /// DOM element id
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Intro => "intro",
            Section::Overview => "overview",
            Section::Gallery => "gallery",
            Section::Zones => "zones",
            Section::DeepSea => "deepsea",
            Section::Quiz => "quiz",
            Section::About => "about",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|section| section.as_str() == s)
    }

    /// The intro stays visible underneath every other section
    pub fn always_visible(&self) -> bool {
        *self == Section::Intro
    }
}

/// A relative or absolute navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    GoTo(Section),
}

impl NavCommand {
    /// Arrow keys: right/down advance, left/up retreat
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(NavCommand::Next),
            "ArrowLeft" | "ArrowUp" => Some(NavCommand::Previous),
            _ => None,
        }
    }

    /// Classify a touch gesture by its displacement.
    ///
    /// Only horizontally dominant swipes longer than `min_distance` count;
    /// swiping right goes back, swiping left goes forward.
    pub fn from_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<Self> {
        if dx.abs() <= dy.abs() || dx.abs() <= min_distance {
            return None;
        }
        if dx > 0.0 {
            Some(NavCommand::Previous)
        } else {
            Some(NavCommand::Next)
        }
    }
}

/// A completed move between sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Section,
    pub to: Section,
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    sections: Vec<Section>,
    index: usize,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            index: 0,
        }
    }

    pub fn current(&self) -> Section {
        self.sections[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Jump to a section by name; unknown names are ignored.
    ///
    /// Jumping to the current section still counts as a transition so the
    /// section is revealed again.
    pub fn go_to(&mut self, name: &str) -> Option<Transition> {
        let section = Section::from_str(name)?;
        self.go_to_section(section)
    }

    pub fn go_to_section(&mut self, section: Section) -> Option<Transition> {
        let index = self.sections.iter().position(|s| *s == section)?;
        self.go_to_index(index)
    }

    /// Jump by marker position (nav dots)
    pub fn go_to_index(&mut self, index: usize) -> Option<Transition> {
        if index >= self.sections.len() {
            return None;
        }
        Some(self.move_to(index))
    }

    pub fn next(&mut self) -> Option<Transition> {
        if self.index + 1 < self.sections.len() {
            Some(self.move_to(self.index + 1))
        } else {
            None
        }
    }

    pub fn previous(&mut self) -> Option<Transition> {
        if self.index > 0 {
            Some(self.move_to(self.index - 1))
        } else {
            None
        }
    }

    pub fn apply(&mut self, command: NavCommand) -> Option<Transition> {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Previous => self.previous(),
            NavCommand::GoTo(section) => self.go_to_section(section),
        }
    }

    fn move_to(&mut self, index: usize) -> Transition {
        let from = self.current();
        self.index = index;
        let to = self.current();
        log::info!("Section {} -> {}", from.as_str(), to.as_str());
        Transition { from, to }
    }
}
