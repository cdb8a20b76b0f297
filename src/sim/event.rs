/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten { x: i32, y: i32, score: u32 },
    HitWall { score: u32 },
    HitSelf { score: u32 },
    BoardFilled { score: u32 },
}

impl GameEvent {
    /// Does this event end the game?
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameEvent::FoodEaten { .. })
    }
}
