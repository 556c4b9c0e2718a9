#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_speed_ms: u32,
    pub delete_speed_ms: u32,
    pub delay_between_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct TypingEngine {
    texts: Vec<Vec<char>>,
    timing: TypingTiming,
    text_index: usize,
    char_index: usize,
    deleting: bool,
}

impl TypingEngine {
    /// Empty strings are dropped since they can never be "fully typed".
    /// Returns `None` when nothing is left to type.
    pub fn new<I, T>(texts: I, timing: TypingTiming) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let texts: Vec<Vec<char>> = texts
            .into_iter()
            .map(|text| text.as_ref().chars().collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .collect();

        if texts.is_empty() {
            return None;
        }

        Some(Self {
            texts,
            timing,
            text_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    #[cfg(test)]
    fn text_index(&self) -> usize {
        self.text_index
    }

    #[cfg(test)]
    fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn tick(&mut self) -> TypingFrame {
        let current = &self.texts[self.text_index];

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(current.len());
        }
        let text: String = current[..self.char_index].iter().collect();

        let mut delay_ms = if self.deleting {
            self.timing.delete_speed_ms
        } else {
            self.timing.type_speed_ms
        };

        if !self.deleting && self.char_index == current.len() {
            delay_ms = self.timing.delay_between_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.text_index = (self.text_index + 1) % self.texts.len();
        }

        TypingFrame { text, delay_ms }
    }
}
