pub mod context;
pub mod storage;

pub use context::{use_role, use_session, SessionProvider};
