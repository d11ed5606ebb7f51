pub mod memberships;
pub mod sales;
pub mod squads;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use memberships::MembershipRepository;
pub use sales::SaleRepository;
pub use squads::SquadRepository;
pub use transactions::{
    count_members_for_update_tx, get_squad_for_update_tx, replace_membership_tx,
};

#[derive(Clone)]
pub struct SquadRepositories {
    pool: PgPool,
    pub squads: SquadRepository,
    pub memberships: MembershipRepository,
    pub sales: SaleRepository,
}

impl SquadRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            squads: SquadRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            sales: SaleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
