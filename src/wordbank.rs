use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Fixed list of target words. Never empty once constructed.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    pub fn new(words: Vec<String>) -> io::Result<Self> {
        if words.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "word bank contains no words",
            ));
        }
        Ok(Self { words })
    }

    /// Word bank built from the list compiled into the binary.
    pub fn embedded() -> io::Result<Self> {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    /// Draws a word uniformly at random, with replacement.
    pub fn pick_word(&self) -> &str {
        self.pick_word_with(&mut rand::thread_rng())
    }

    pub fn pick_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` rejects empty lists, so `choose` always yields a word.
        self.words.choose(rng).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn parse_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        None
    } else {
        Some(word.to_string())
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(parse_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}
