//! Sliding-window key sequence detection (the Konami code easter egg).

use log::debug;
use std::collections::VecDeque;

pub const KONAMI: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Keeps the most recent keys, at most as many as the target sequence has.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    target: Vec<String>,
    buffer: VecDeque<String>,
}

impl SequenceMatcher {
    pub fn new<I, S>(target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target: Vec<String> = target.into_iter().map(Into::into).collect();
        let buffer = VecDeque::with_capacity(target.len() + 1);
        Self { target, buffer }
    }

    pub fn konami() -> Self {
        Self::new(KONAMI)
    }

    /// Push one key and report whether the buffer now equals the target.
    pub fn feed(&mut self, token: &str) -> bool {
        self.buffer.push_back(token.to_string());
        while self.buffer.len() > self.target.len() {
            self.buffer.pop_front();
        }

        let matched = !self.target.is_empty() && self.buffer.iter().eq(self.target.iter());
        if matched {
            debug!("Key sequence completed");
        }
        matched
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(matcher: &mut SequenceMatcher, keys: &[&str]) -> Vec<bool> {
        keys.iter().map(|k| matcher.feed(k)).collect()
    }

    #[test]
    fn matches_only_on_the_final_key() {
        let mut matcher = SequenceMatcher::konami();
        let results = feed_all(&mut matcher, &KONAMI);

        let (last, rest) = results.split_last().unwrap();
        assert!(*last);
        assert!(rest.iter().all(|r| !r));
    }

    #[test]
    fn any_altered_key_prevents_a_match() {
        for i in 0..KONAMI.len() {
            let mut keys = KONAMI.to_vec();
            keys[i] = "x";
            let mut matcher = SequenceMatcher::konami();
            assert!(
                feed_all(&mut matcher, &keys).iter().all(|r| !r),
                "matched with key {i} altered"
            );
        }
    }

    #[test]
    fn rearms_after_unrelated_keys() {
        let mut matcher = SequenceMatcher::konami();
        let mut keys = KONAMI.to_vec();
        keys.extend(["Enter", "q", "ArrowUp"]);
        keys.extend(KONAMI);

        let hits = feed_all(&mut matcher, &keys)
            .iter()
            .filter(|r| **r)
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn leading_noise_is_trimmed_away() {
        let mut matcher = SequenceMatcher::konami();
        feed_all(&mut matcher, &["a", "b", "ArrowUp", "ArrowUp", "ArrowUp"]);
        assert!(matcher.buffered() <= KONAMI.len());
        assert!(feed_all(&mut matcher, &KONAMI[2..]).last().copied().unwrap());
    }

    #[test]
    fn buffer_never_exceeds_target_length() {
        let mut matcher = SequenceMatcher::new(["a", "b"]);
        for key in ["a", "a", "a", "a"] {
            matcher.feed(key);
            assert!(matcher.buffered() <= 2);
        }
        assert!(matcher.feed("b"));
    }

    #[test]
    fn empty_target_never_matches() {
        let mut matcher = SequenceMatcher::new(Vec::<String>::new());
        assert!(!matcher.feed("a"));
        assert_eq!(matcher.buffered(), 0);
    }
}
