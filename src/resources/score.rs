use bevy_ecs::prelude::Resource;

/// Coins collected this level.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub coins: u32,
}

impl Score {
    /// Every fifth coin grants a power-up.
    pub const COINS_PER_POWERUP: u32 = 5;

    /// Count one coin; true when it completes a power-up.
    pub fn add_coin(&mut self) -> bool {
        self.coins += 1;
        self.coins % Self::COINS_PER_POWERUP == 0
    }
}
