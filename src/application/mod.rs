//! Application Layer - Use Cases
//!
//! Orchestrates the domain services behind the email settings panel:
//!
//! - `store` - Profile Store (load, edit, dirty tracking, save, revert)
//! - `connectivity` - Connectivity test coordinator
//! - `domain_key` - Signing-key verification coordinator

pub mod connectivity;
pub mod domain_key;
pub mod store;

pub use connectivity::{ConnectivityTestCoordinator, TestTicket};
pub use domain_key::{CheckTicket, DomainKeyCoordinator};
pub use store::{
    LoadTicket, ProfileStore, SaveCall, SaveFailure, SavePayload, SavePlan, SaveReport,
    SaveStage, SaveStrategy, SaveTicket, StoreOperation, Tolerance,
};
