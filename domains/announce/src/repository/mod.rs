pub mod cooldowns;

use sqlx::PgPool;

pub use cooldowns::CooldownRepository;

#[derive(Clone)]
pub struct AnnounceRepositories {
    pub cooldowns: CooldownRepository,
}

impl AnnounceRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cooldowns: CooldownRepository::new(pool),
        }
    }
}
