//! Overlay stack for things drawn on top of the listing.
//!
//! Transient messages live here until they expire, the help popup until any key closes it.
//!
//! Is used by the ui modules and by the app handlers.

use std::slice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    Message { text: String },
    Help,
}

#[derive(Debug)]
pub struct OverlayStack {
    overlays: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
        }
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn pop(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Overlay> {
        self.overlays.iter()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Overlay) -> bool,
    {
        self.overlays.retain(f);
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_drops_matching_overlays() {
        let mut stack = OverlayStack::new();
        stack.push(Overlay::Help);
        stack.push(Overlay::Message {
            text: "hi".to_string(),
        });
        assert_eq!(stack.len(), 2);

        stack.retain(|o| !matches!(o, Overlay::Help));
        assert_eq!(
            stack.top(),
            Some(&Overlay::Message {
                text: "hi".to_string()
            })
        );
        assert!(stack.pop().is_some());
        assert!(stack.is_empty());
    }
}
