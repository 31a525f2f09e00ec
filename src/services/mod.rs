// Service exports
pub mod appwrite;
pub mod reasoning;
pub mod store;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use reasoning::{ReasoningClient, ReasoningError};
pub use store::{PgMatchStore, StoreError};
