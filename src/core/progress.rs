use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_millis(200);
const STEP: u8 = 10;
const CEILING: u8 = 90;

/// Advisory progress for an in-flight analysis. Ticks never pass 90; only
/// `complete` reaches 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    value: u8,
    analyzing: bool,
}

impl Progress {
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn start(&mut self) {
        self.value = 0;
        self.analyzing = true;
    }

    pub fn tick(&mut self) -> u8 {
        if self.analyzing {
            self.value = (self.value + STEP).min(CEILING);
        }
        self.value
    }

    pub fn complete(&mut self) {
        self.value = 100;
        self.analyzing = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
