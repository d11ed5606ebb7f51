pub mod activities;
pub mod transactions;

use sqlx::PgPool;

pub use activities::ActivityRepository;
pub use transactions::append_activity_tx;

#[derive(Clone)]
pub struct ActivityRepositories {
    pub activities: ActivityRepository,
}

impl ActivityRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            activities: ActivityRepository::new(pool),
        }
    }
}
