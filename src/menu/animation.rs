//! Menu animations
//!
//! An animation is a list of frames, each a set of slots written over the
//! menu when the frame comes up. Nothing here schedules anything: the host
//! calls `MenuEngine::tick` (or `MenuInstance::tick`) from its own timer and
//! every running animation counts the ticks itself.

use crate::error::{MenuError, MenuResult};
use crate::slot::Slot;
use serde::{Deserialize, Serialize};

/// What happens after the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Play once and stop
    #[default]
    Normal,
    /// Start over from the first frame
    Repeated,
}

/// Slots written together when a frame is shown
#[derive(Debug, Clone, Default)]
pub struct Frame {
    slots: Vec<Slot>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot at its own index
    pub fn slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Add a slot at `index`
    pub fn set(self, index: usize, slot: Slot) -> Self {
        self.slot(slot.at(index))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Frame sequence with its own tick counter
#[derive(Debug, Clone)]
pub struct Animation {
    kind: AnimationKind,
    start_delay: u32,
    interval: u32,
    frames: Vec<Frame>,
    next_frame: usize,
    countdown: u32,
    running: bool,
}

impl Animation {
    /// `start_delay` ticks pass before the first frame, then one frame is
    /// shown every `interval` ticks
    pub fn new(kind: AnimationKind, start_delay: u32, interval: u32, frames: Vec<Frame>) -> MenuResult<Self> {
        if frames.is_empty() {
            return Err(MenuError::InvalidLayout("animation has no frames".to_string()));
        }
        if interval == 0 {
            return Err(MenuError::InvalidLayout("animation interval must be at least one tick".to_string()));
        }

        Ok(Self {
            kind,
            start_delay,
            interval,
            frames,
            next_frame: 0,
            countdown: start_delay,
            running: false,
        })
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn start_delay(&self) -> u32 {
        self.start_delay
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Index of the frame the next due tick shows
    pub fn frame_index(&self) -> usize {
        self.next_frame
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rewind to the first frame and start counting
    pub fn start(&mut self) {
        self.next_frame = 0;
        self.countdown = self.start_delay;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one tick; returns the frame to show, if one is due
    pub fn tick(&mut self) -> Option<&Frame> {
        if !self.running {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }

        let shown = self.next_frame;
        self.next_frame += 1;
        self.countdown = self.interval - 1;
        if self.next_frame == self.frames.len() {
            match self.kind {
                AnimationKind::Normal => self.running = false,
                AnimationKind::Repeated => self.next_frame = 0,
            }
        }
        self.frames.get(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Frame> {
        vec![
            Frame::new().set(0, Slot::new(0, "red")),
            Frame::new().set(0, Slot::new(0, "green")),
        ]
    }

    fn shown(animation: &mut Animation, ticks: usize) -> Vec<Option<String>> {
        (0..ticks)
            .map(|_| {
                animation
                    .tick()
                    .map(|frame| frame.slots()[0].payload().id().to_string())
            })
            .collect()
    }

    #[test]
    fn test_normal_plays_once() {
        let mut animation = Animation::new(AnimationKind::Normal, 1, 2, frames()).unwrap();
        assert_eq!(shown(&mut animation, 1), vec![None]);

        animation.start();
        let seen = shown(&mut animation, 6);
        assert_eq!(
            seen,
            vec![None, Some("red".to_string()), None, Some("green".to_string()), None, None]
        );
        assert!(!animation.is_running());
    }

    #[test]
    fn test_repeated_loops() {
        let mut animation = Animation::new(AnimationKind::Repeated, 0, 1, frames()).unwrap();
        animation.start();
        let seen: Vec<String> = shown(&mut animation, 5).into_iter().flatten().collect();
        assert_eq!(seen, vec!["red", "green", "red", "green", "red"]);
        assert!(animation.is_running());
    }

    #[test]
    fn test_invalid_animations() {
        assert!(Animation::new(AnimationKind::Normal, 0, 1, Vec::new()).is_err());
        assert!(Animation::new(AnimationKind::Normal, 0, 0, frames()).is_err());
    }
}
