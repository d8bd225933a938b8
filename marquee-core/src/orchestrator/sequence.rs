use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued fetch. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tokens and answers whether a token is still the newest one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            value => Some(RequestToken(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_token_is_latest() {
        let sequencer = RequestSequencer::new();
        assert_eq!(sequencer.latest(), None);

        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(first < second);
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
        assert_eq!(sequencer.latest(), Some(second));
    }
}
