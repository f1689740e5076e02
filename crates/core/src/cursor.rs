/// Zero-based position in a deck with circular navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardCursor {
    index: usize,
    len: usize,
}

impl CardCursor {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Navigation only makes sense with two or more cards.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.len >= 2
    }

    pub fn next(&mut self) -> usize {
        if self.can_navigate() {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.can_navigate() {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        if self.len == 0 {
            return "0 / 0".to_owned();
        }
        format!("{} / {}", self.index + 1, self.len)
    }
}
