//! Label counters for access points and switches

use crate::models::DeviceCategory;

const FIRST_LETTER: char = 'A';
const LAST_LETTER: char = 'Z';

/// Next switch letter; `Z` wraps around to `A`.
///
/// Lower-case input is treated as its upper-case form. Characters outside
/// `A..=Z` restart the sequence at `A`.
#[must_use]
pub fn increment(letter: char) -> char {
    match letter.to_ascii_uppercase() {
        LAST_LETTER => FIRST_LETTER,
        c @ FIRST_LETTER..='Y' => char::from(c as u8 + 1),
        _ => FIRST_LETTER,
    }
}

/// Previous switch letter. `A` stays `A`.
#[must_use]
pub fn decrement(letter: char) -> char {
    match letter.to_ascii_uppercase() {
        c @ 'B'..=LAST_LETTER => char::from(c as u8 - 1),
        _ => FIRST_LETTER,
    }
}

/// Running label counters for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    ap: u32,
    switch: char,
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}

impl Counters {
    /// Counters at their initial values `(1, 'A')`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ap: 1,
            switch: FIRST_LETTER,
        }
    }

    #[must_use]
    pub fn ap(&self) -> u32 {
        self.ap
    }

    #[must_use]
    pub fn switch(&self) -> char {
        self.switch
    }

    /// Label the next device of `category` would receive.
    ///
    /// Returns `None` for invalid devices, which never get a label.
    #[must_use]
    pub fn label_for(&self, category: DeviceCategory) -> Option<String> {
        match category {
            DeviceCategory::AccessPoint => Some(format!("AP-{:02}", self.ap)),
            DeviceCategory::Switch => Some(self.switch.to_string()),
            DeviceCategory::Invalid => None,
        }
    }

    /// Move the counter of `category` forward by one label.
    pub fn advance(&mut self, category: DeviceCategory) {
        match category {
            DeviceCategory::AccessPoint => self.ap = self.ap.saturating_add(1),
            DeviceCategory::Switch => self.switch = increment(self.switch),
            DeviceCategory::Invalid => {}
        }
    }

    /// Undo one [`advance`](Self::advance) for `category`.
    ///
    /// The AP counter never drops below 1 and the switch letter never goes
    /// below `A`.
    pub fn roll_back(&mut self, category: DeviceCategory) {
        match category {
            DeviceCategory::AccessPoint => {
                if self.ap > 1 {
                    self.ap -= 1;
                }
            }
            DeviceCategory::Switch => {
                if self.switch > FIRST_LETTER {
                    self.switch = decrement(self.switch);
                }
            }
            DeviceCategory::Invalid => {}
        }
    }

    /// Return both counters to `(1, 'A')`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
