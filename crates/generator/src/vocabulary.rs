//! Curated rhyme families, one bank per difficulty.
//!
//! A puzzle takes `group_count` families from its bank and fills three word
//! slots in each by cycling through the family's shuffled words.

use rhyme_mahjong_core::RandomSource;

use crate::error::GenerationError;
use crate::types::{Difficulty, GroupId, RhymeGroup, RhymeType};

/// One curated rhyme family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhymeFamily {
    pub pattern: &'static str,
    pub words: &'static [&'static str],
    pub rhyme_type: RhymeType,
    pub significance: f32,
}

const fn exact(pattern: &'static str, words: &'static [&'static str]) -> RhymeFamily {
    RhymeFamily {
        pattern,
        words,
        rhyme_type: RhymeType::Exact,
        significance: 1.0,
    }
}

const fn slant(pattern: &'static str, words: &'static [&'static str]) -> RhymeFamily {
    RhymeFamily {
        pattern,
        words,
        rhyme_type: RhymeType::Slant,
        significance: 0.75,
    }
}

const EASY: &[RhymeFamily] = &[
    exact("-at", &["cat", "hat", "bat", "mat", "rat"]),
    exact("-ay", &["day", "play", "way", "stay", "gray"]),
    exact("-ight", &["light", "night", "bright", "sight", "flight"]),
    exact("-ing", &["ring", "sing", "king", "wing", "spring"]),
    exact("-ake", &["cake", "lake", "make", "snake", "wake"]),
    exact("-ee", &["tree", "free", "see", "bee", "knee"]),
];

const MEDIUM: &[RhymeFamily] = &[
    exact("-ound", &["sound", "ground", "found", "round", "around"]),
    exact("-ain", &["rain", "train", "brain", "chain", "plain"]),
    exact("-ear", &["fear", "clear", "near", "year", "appear"]),
    exact("-ow", &["grow", "snow", "flow", "glow", "below"]),
    slant("-ove", &["love", "move", "prove", "glove", "above"]),
    slant("-ime/-ine", &["time", "shine", "climb", "mine", "rhyme"]),
    exact("-ire", &["fire", "wire", "tire", "desire", "inspire"]),
];

const HARD: &[RhymeFamily] = &[
    exact("-ation", &["nation", "station", "creation", "vacation", "relation"]),
    slant("-ind/-ine", &["mind", "find", "design", "divine", "behind"]),
    exact("-ember", &["remember", "december", "ember", "november", "member"]),
    slant("-eart/-art", &["heart", "start", "apart", "dark", "hard"]),
    slant("-ow/-ough", &["though", "dough", "slow", "throw", "below"]),
    exact("-ility", &["ability", "stability", "agility", "humility", "utility"]),
    slant("-orn/-orm", &["storm", "born", "warm", "form", "torn"]),
    slant("-ange", &["orange", "range", "change", "strange", "arrange"]),
];

/// Curated bank for a difficulty
pub fn bank(difficulty: Difficulty) -> &'static [RhymeFamily] {
    match difficulty {
        Difficulty::Easy => EASY,
        Difficulty::Medium => MEDIUM,
        Difficulty::Hard => HARD,
    }
}

/// Word slots per group (each slot becomes a pair of tiles)
pub fn slots_per_group(difficulty: Difficulty) -> usize {
    difficulty.tiles_per_group() / 2
}

/// Fill `slots` word slots by cycling through `words`.
///
/// Returns an empty list when there are no words to cycle.
pub fn round_robin(words: &[&str], slots: usize) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }
    (0..slots).map(|i| words[i % words.len()].to_string()).collect()
}

/// Build a group from a family, shuffling its words first.
pub fn family_group<R: RandomSource>(
    family: &RhymeFamily,
    id: GroupId,
    difficulty: Difficulty,
    slots: usize,
    rng: &mut R,
) -> RhymeGroup {
    let mut words: Vec<&str> = family.words.to_vec();
    rng.shuffle(&mut words);
    RhymeGroup {
        id,
        pattern: family.pattern.to_string(),
        words: round_robin(&words, slots),
        rhyme_type: family.rhyme_type,
        difficulty,
        significance: family.significance,
    }
}

/// Pick `group_count` families from the curated bank and build their groups.
pub fn curated_groups<R: RandomSource>(
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Vec<RhymeGroup>, GenerationError> {
    let families = bank(difficulty);
    let wanted = difficulty.group_count();
    if families.len() < wanted {
        return Err(GenerationError::VocabularyExhausted(difficulty));
    }

    let mut order: Vec<usize> = (0..families.len()).collect();
    rng.shuffle(&mut order);

    let slots = slots_per_group(difficulty);
    Ok(order
        .into_iter()
        .take(wanted)
        .enumerate()
        .map(|(i, f)| family_group(&families[f], GroupId(i as u16), difficulty, slots, rng))
        .collect())
}
