use std::collections::VecDeque;

pub const KONAMI_SEQUENCE: [&str; 10] = [
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

#[derive(Clone, Debug)]
pub struct KeySequenceBuffer {
    keys: VecDeque<String>,
    target: &'static [&'static str],
}

impl Default for KeySequenceBuffer {
    fn default() -> Self {
        Self::new(&KONAMI_SEQUENCE)
    }
}

impl KeySequenceBuffer {
    pub fn new(target: &'static [&'static str]) -> Self {
        Self {
            keys: VecDeque::with_capacity(target.len() + 1),
            target,
        }
    }

    /// Records a keydown and reports whether the window now equals the
    /// target. The window is kept after a match.
    pub fn push(&mut self, key: &str) -> bool {
        self.keys.push_back(key.to_string());
        while self.keys.len() > self.target.len() {
            self.keys.pop_front();
        }

        self.matches()
    }

    fn matches(&self) -> bool {
        self.keys.len() == self.target.len()
            && self.keys.iter().zip(self.target).all(|(key, want)| key == want)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(buffer: &mut KeySequenceBuffer, keys: &[&str]) -> usize {
        keys.iter().filter(|key| buffer.push(key)).count()
    }

    #[test]
    fn full_sequence_fires_once() {
        let mut buffer = KeySequenceBuffer::default();

        assert_eq!(feed(&mut buffer, &KONAMI_SEQUENCE), 1);
    }

    #[test]
    fn prefix_then_wrong_key_never_fires() {
        let mut buffer = KeySequenceBuffer::default();

        let fired = feed(&mut buffer, &KONAMI_SEQUENCE[..9]) + feed(&mut buffer, &["x"]);

        assert_eq!(fired, 0);
    }

    #[test]
    fn noise_before_sequence_is_discarded() {
        let mut buffer = KeySequenceBuffer::default();
        feed(&mut buffer, &["Shift", "q", "Enter"]);

        assert_eq!(feed(&mut buffer, &KONAMI_SEQUENCE), 1);
    }

    #[test]
    fn repeated_sequence_fires_again() {
        let mut buffer = KeySequenceBuffer::default();

        let fired = feed(&mut buffer, &KONAMI_SEQUENCE) + feed(&mut buffer, &KONAMI_SEQUENCE);

        assert_eq!(fired, 2);
    }
}
