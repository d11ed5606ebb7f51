pub mod campaign;
pub mod entities;
pub mod errors;
pub mod service;

pub use campaign::{CampaignGate, ConfigCampaignGate, NoCampaign};
pub use entities::{
    apply_discount, JoinResult, SaleKind, Squad, SquadListing, SquadMemberEntry, SquadMembership,
    SquadSale, UserSquadResponse,
};
pub use errors::SquadError;
pub use service::SquadService;
