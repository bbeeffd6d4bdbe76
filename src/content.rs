//! Static presentation content: ocean zones, gallery creatures, quiz questions

/// One depth band of the ocean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: &'static str,
    pub name: &'static str,
    pub depth: &'static str,
    pub description: &'static str,
    pub characteristics: &'static str,
    pub creatures: &'static [&'static str],
}

impl Zone {
    /// Creature list for display
    pub fn marine_life(&self) -> String {
        if self.creatures.is_empty() {
            "Limited due to extreme conditions".to_string()
        } else {
            self.creatures.join(", ")
        }
    }
}

pub const ZONES: [Zone; 4] = [
    Zone {
        id: "epipelagic",
        name: "Epipelagic Zone (Sunlit Zone)",
        depth: "0-200 meters",
        description: "The uppermost layer of the ocean where sunlight penetrates. This zone supports the highest concentration of marine life and is home to most familiar sea creatures. It receives enough sunlight for photosynthesis.",
        characteristics: "Warm water, high oxygen, abundant light, diverse marine life",
        creatures: &[
            "Great White Shark",
            "Hawksbill Sea Turtle",
            "Giant Pacific Octopus",
            "Vaquita",
        ],
    },
    Zone {
        id: "mesopelagic",
        name: "Mesopelagic Zone (Twilight Zone)",
        depth: "200-1,000 meters",
        description: "The 'twilight zone' where only faint light penetrates. This mysterious realm is home to many bioluminescent creatures and giant deep-sea dwellers. Pressure increases significantly here.",
        characteristics: "Dim light, increasing pressure, bioluminescent organisms, lower temperatures",
        creatures: &["Giant Squid", "Blue Whale"],
    },
    Zone {
        id: "bathypelagic",
        name: "Bathypelagic Zone (Midnight Zone)",
        depth: "1,000-4,000 meters",
        description: "The 'midnight zone' where no sunlight reaches. Creatures here have adapted to extreme pressure, darkness, and cold temperatures. Many species are bioluminescent or have developed unique hunting strategies.",
        characteristics: "Complete darkness, extreme pressure (up to 400 atm), near freezing temperatures",
        creatures: &[],
    },
    Zone {
        id: "abyssopelagic",
        name: "Abyssopelagic Zone (Abyssal Zone)",
        depth: "4,000-6,000 meters",
        description: "The deep ocean floor where only the hardiest creatures survive. This zone covers most of the ocean floor and experiences extreme pressure and cold. Life here is scarce but fascinating.",
        characteristics: "Extreme pressure (600+ atm), near freezing water, complete darkness, sparse food availability",
        creatures: &[],
    },
];

pub fn zone(id: &str) -> Option<&'static Zone> {
    ZONES.iter().find(|z| z.id == id)
}

/// Names of the creatures featured in the gallery
pub const GALLERY: [&str; 6] = [
    "Great White Shark",
    "Hawksbill Sea Turtle",
    "Giant Pacific Octopus",
    "Vaquita",
    "Giant Squid",
    "Blue Whale",
];

pub fn in_gallery(name: &str) -> bool {
    GALLERY.contains(&name)
}

/// A multiple-choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub question: &'static str,
    pub answers: [&'static str; 4],
    /// Index into `answers`
    pub correct: usize,
    pub explanation: &'static str,
}

impl Question {
    pub fn correct_answer(&self) -> &'static str {
        self.answers[self.correct]
    }
}

pub const QUESTIONS: [Question; 10] = [
    Question {
        question: "Which marine mammal is critically endangered with fewer than 10 individuals remaining?",
        answers: ["Blue Whale", "Vaquita", "Great White Shark", "Giant Pacific Octopus"],
        correct: 1,
        explanation: "The vaquita is the world's most endangered marine mammal, with only about 10 individuals left due to gillnet fishing.",
    },
    Question {
        question: "Which creature can change color in less than 1 second?",
        answers: ["Great White Shark", "Giant Pacific Octopus", "Blue Whale", "Hawksbill Sea Turtle"],
        correct: 1,
        explanation: "The giant Pacific octopus can change color instantly to camouflage itself from predators and prey.",
    },
    Question {
        question: "What is the largest animal ever known to exist?",
        answers: ["Giant Squid", "Great White Shark", "Blue Whale", "Giant Pacific Octopus"],
        correct: 2,
        explanation: "The blue whale is the largest animal ever known to exist, weighing up to 190 tons and measuring up to 30 meters.",
    },
    Question {
        question: "Which sea turtle species is critically endangered due to illegal trade in its shell?",
        answers: ["All sea turtles", "Hawksbill Sea Turtle", "Green Sea Turtle", "Loggerhead Sea Turtle"],
        correct: 1,
        explanation: "Hawksbill sea turtles are critically endangered because their beautiful shell (bekko) is highly valued in jewelry making.",
    },
    Question {
        question: "Which creature has eyes that are the largest in the animal kingdom?",
        answers: ["Great White Shark", "Giant Squid", "Blue Whale", "Vaquita"],
        correct: 1,
        explanation: "Giant squids have eyes up to 25cm in diameter - the largest eyes of any animal, adapted for detecting bioluminescent prey in the deep ocean.",
    },
    Question {
        question: "Which ocean zone is known as the 'midnight zone' with no sunlight?",
        answers: ["Epipelagic", "Mesopelagic", "Bathypelagic", "Abyssopelagic"],
        correct: 2,
        explanation: "The bathypelagic zone (1,000-4,000m) is called the midnight zone because no sunlight penetrates this deep.",
    },
    Question {
        question: "How many hearts does an octopus have?",
        answers: ["1", "2", "3", "4"],
        correct: 2,
        explanation: "Octopuses have three hearts - two pump blood through the gills, and one pumps blood through the rest of the body.",
    },
    Question {
        question: "Which creature can detect blood in water from 5km away?",
        answers: ["Giant Squid", "Great White Shark", "Blue Whale", "Vaquita"],
        correct: 1,
        explanation: "Great white sharks have an incredible sense of smell and can detect a single drop of blood in 25 gallons of water from up to 5km away.",
    },
    Question {
        question: "What zone of the ocean do most familiar sea creatures live in?",
        answers: ["Abyssopelagic", "Bathypelagic", "Mesopelagic", "Epipelagic"],
        correct: 3,
        explanation: "The epipelagic zone (0-200m) is where most familiar sea creatures live, as it receives enough sunlight for photosynthesis and marine life.",
    },
    Question {
        question: "Which marine mammal can dive deeper than 1,000 meters?",
        answers: ["Vaquita", "Blue Whale", "Great White Shark", "Hawksbill Sea Turtle"],
        correct: 1,
        explanation: "Blue whales can dive to depths of over 500 meters, and some individuals have been recorded diving as deep as 1,000+ meters.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_lookup() {
        assert_eq!(zone("mesopelagic").unwrap().creatures.len(), 2);
        assert!(zone("hadal").is_none());
    }

    #[test]
    fn test_marine_life_text() {
        assert_eq!(zone("mesopelagic").unwrap().marine_life(), "Giant Squid, Blue Whale");
        assert_eq!(
            zone("abyssopelagic").unwrap().marine_life(),
            "Limited due to extreme conditions"
        );
    }

    #[test]
    fn test_zone_creatures_are_in_gallery() {
        for zone in &ZONES {
            for creature in zone.creatures {
                assert!(in_gallery(creature), "{creature} missing from gallery");
            }
        }
    }

    #[test]
    fn test_questions_well_formed() {
        for q in &QUESTIONS {
            assert!(q.correct < q.answers.len());
        }
        assert_eq!(QUESTIONS[6].correct_answer(), "3");
    }
}
