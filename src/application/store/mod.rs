//! Profile Store Module
//!
//! ## Structure
//!
//! - `use_case` - The store itself (`ProfileStore`)
//! - `payload` - Mapping between wire DTOs and profiles
//! - `save_plan` - Ordered save strategies (`SavePlan`, `SaveReport`)
//!
//! ## Usage
//!
//! ```ignore
//! use mailconf::application::store::ProfileStore;
//!
//! let mut store = ProfileStore::new(backend, notices, &config);
//! store.load()?;
//! store.apply_preset(Purpose::Alerts, "gmail")?;
//! if store.can_save() {
//!     store.save()?;
//! }
//! ```

mod payload;
mod save_plan;
mod use_case;

pub use save_plan::{
    SaveCall, SaveFailure, SavePayload, SavePlan, SaveReport, SaveStage, SaveStrategy, Tolerance,
};
pub use use_case::{LoadTicket, ProfileStore, SaveTicket, StoreOperation};
