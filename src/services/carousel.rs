use crate::models::Prize;

/// Circular cursor over the prizes that still have stock.
///
/// Exhausted prizes drop out of the rotation, so the cursor always points at a
/// drawable prize or at nothing once every prize is gone.
#[derive(Debug, Clone, Default)]
pub struct PrizeCarousel {
    index: usize,
}

impl PrizeCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Prizes in rotation, in configured order
    pub fn entries(prizes: &[Prize]) -> Vec<&Prize> {
        prizes.iter().filter(|p| p.is_available()).collect()
    }

    pub fn current<'a>(&self, prizes: &'a [Prize]) -> Option<&'a Prize> {
        let entries = Self::entries(prizes);
        if entries.is_empty() {
            return None;
        }
        Some(entries[self.index % entries.len()])
    }

    /// Move forward, wrapping from the last prize to the first.
    /// Returns true when the current prize changed.
    pub fn next(&mut self, prizes: &[Prize]) -> bool {
        let len = Self::entries(prizes).len();
        if len <= 1 {
            self.normalize(prizes);
            return false;
        }
        self.index = (self.index % len + 1) % len;
        true
    }

    /// Move backward, wrapping from the first prize to the last.
    pub fn prev(&mut self, prizes: &[Prize]) -> bool {
        let len = Self::entries(prizes).len();
        if len <= 1 {
            self.normalize(prizes);
            return false;
        }
        self.index = (self.index % len + len - 1) % len;
        true
    }

    /// Wrap the index back into range after the rotation shrank
    pub fn normalize(&mut self, prizes: &[Prize]) {
        let len = Self::entries(prizes).len();
        self.index = if len == 0 { 0 } else { self.index % len };
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
