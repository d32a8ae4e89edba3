use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::path::PathBuf;

use crate::quiz::{GameSession, Question};

/// Every country we have a landmark photo for under `sites/`.
pub const COUNTRIES: [&str; 41] = [
    "Argentina",
    "Benin",
    "Bosnia and Herzegovina",
    "Cambodia",
    "Canada",
    "China",
    "Congo",
    "Democratic Republic of the Congo",
    "Eritrea",
    "Estonia",
    "Ethiopia",
    "Ireland",
    "Ivory Coast",
    "Jordan",
    "Lebanon",
    "Libya",
    "North Korea",
    "Poland",
    "Salvador",
    "South Africa",
    "Sudan",
    "Saudi Arabia",
    "Bahrain",
    "India",
    "Kazakhstan",
    "Kuwait",
    "Kyrgyzstan",
    "Maldives",
    "Mongolia",
    "Nepal",
    "Oman",
    "Pakistan",
    "Qatar",
    "Russia",
    "Sri Lanka",
    "Syria",
    "Tajikistan",
    "Turkmenistan",
    "United Arab Emirates",
    "Uzbekistan",
    "Vietnam",
];

pub const QUESTIONS_PER_SESSION: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Draws a fresh session: ten subjects sampled without replacement from the
/// catalog, each with three wrong options and a shuffled option order.
/// Callers pick the random source, so tests can seed it.
pub fn new_session<R: Rng>(rng: &mut R) -> GameSession {
    let mut subjects = COUNTRIES.to_vec();
    subjects.shuffle(rng);

    let questions = subjects
        .iter()
        .take(QUESTIONS_PER_SESSION)
        .map(|subject| generate_question(subject, rng))
        .collect();

    GameSession::new(questions)
}

fn generate_question<R: Rng>(subject: &str, rng: &mut R) -> Question {
    let mut options: Vec<String> = COUNTRIES
        .iter()
        .copied()
        .filter(|country| *country != subject)
        .map(|country| country.to_string())
        .choose_multiple(rng, OPTIONS_PER_QUESTION - 1);
    options.push(subject.to_string());
    // So the correct option isn't always the last one
    options.shuffle(rng);

    Question::new(subject.to_string(), options)
}

/// The landmark photo for a subject lives at a fixed, name-derived path.
pub fn image_path(subject: &str) -> PathBuf {
    PathBuf::from(format!("sites/{}.jfif", subject))
}
