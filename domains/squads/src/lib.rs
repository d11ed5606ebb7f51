//! Squads domain: team membership gated by bytes, join/switch pricing, sales.

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::{
    apply_discount, CampaignGate, ConfigCampaignGate, JoinResult, NoCampaign, SaleKind, Squad,
    SquadError, SquadListing, SquadMemberEntry, SquadMembership, SquadSale, SquadService,
    UserSquadResponse,
};
pub use api::SquadsState;
pub use repository::SquadRepositories;
