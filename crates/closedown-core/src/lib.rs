pub mod anchor;
pub mod classify;
pub mod clipboard;
pub mod export;
pub mod filter;
pub mod order;
pub mod record;
pub mod render;
pub mod view;

pub use anchor::{anchor_for, slugify};
pub use classify::{ShutdownStatus, early_close_yes, shutdown_status};
pub use filter::{Criteria, ParseSelectionError};
pub use order::SortOrder;
pub use record::{Agreement, Dataset, EntityType};
pub use render::{TableView, render};
pub use view::{Action, ScrollRequest, ViewState};
