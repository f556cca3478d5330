use super::common::{Direction, Rect, Size, SpriteId, Vec2};

/// Physical presence of anything that moves and collides in the world.
///
/// Embedded by value in [`crate::Enemy`], [`crate::Projectile`] and
/// [`crate::PlayerState`]; the owner decides when it moves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldEntity {
    /// Top-left corner in world units.
    pub position: Vec2,
    pub size: Size,
    pub direction: Option<Direction>,
    /// World units per millisecond.
    pub speed: f32,
    pub sprite: SpriteId,
}

impl WorldEntity {
    pub fn new(position: Vec2, size: Size, speed: f32, sprite: SpriteId) -> Self {
        Self {
            position,
            size,
            direction: None,
            speed,
            sprite,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Top-left corner this entity would have with its center on `center`.
    pub fn origin_centered_on(&self, center: Vec2) -> Vec2 {
        center.offset(-self.size.w / 2.0, -self.size.h / 2.0)
    }

    pub fn intersects(&self, other: &WorldEntity) -> bool {
        self.rect().intersects(&other.rect())
    }

    /// Rectangle this entity would occupy after moving `elapsed_ms` in `direction`.
    pub fn projected_rect(&self, direction: Direction, elapsed_ms: u32) -> Rect {
        let (ux, uy) = direction.unit();
        let distance = self.speed * elapsed_ms as f32;
        Rect::new(
            self.position.offset(ux * distance, uy * distance),
            self.size,
        )
    }

    /// Moves along the current direction for `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if let Some(direction) = self.direction {
            self.position = self.projected_rect(direction, elapsed_ms).origin;
        }
    }
}
