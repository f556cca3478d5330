//! Scripted player input for headless runs.

use game_core::{AbilityKind, Direction};

/// One player input, applied before the frame's tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Option<Direction>),
    Ability(AbilityKind),
    Consumable(usize),
}

/// Inputs keyed by the frame they fire on, sorted by frame.
pub struct Script {
    steps: Vec<(u32, Input)>,
    cursor: usize,
}

impl Script {
    pub fn new(mut steps: Vec<(u32, Input)>) -> Self {
        steps.sort_by_key(|(frame, _)| *frame);
        Self { steps, cursor: 0 }
    }

    /// A short skirmish exercising movement, every ability and a few items.
    pub fn skirmish() -> Self {
        use AbilityKind::*;
        use Input::*;

        Self::new(vec![
            (0, Move(Some(Direction::Right))),
            (20, Move(None)),
            (25, Ability(Fireball)),
            (60, Ability(ChaosOrb)),
            (90, Ability(Fireball)),
            (120, Ability(Nova)),
            (140, Move(Some(Direction::Down))),
            (170, Move(None)),
            (175, Ability(PoisonCloud)),
            (210, Consumable(3)),
            (240, Move(Some(Direction::Right))),
            (300, Move(None)),
            (305, Ability(Fireball)),
            (340, Ability(Heal)),
            (360, Ability(Rest)),
            (420, Consumable(0)),
            (450, Ability(Fireball)),
            (480, Consumable(1)),
            (500, Ability(ChaosOrb)),
            (560, Consumable(4)),
            (600, Move(Some(Direction::Up))),
            (640, Move(None)),
            (650, Ability(Nova)),
            (700, Consumable(2)),
            (720, Ability(Fireball)),
        ])
    }

    /// Inputs scheduled at or before `frame` that have not fired yet.
    pub fn due(&mut self, frame: u32) -> &[(u32, Input)] {
        let start = self.cursor;
        while self
            .steps
            .get(self.cursor)
            .is_some_and(|(at, _)| *at <= frame)
        {
            self.cursor += 1;
        }
        &self.steps[start..self.cursor]
    }
}
