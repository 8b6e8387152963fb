pub mod constants;
pub mod depth;
pub mod error;
pub mod intro;
pub mod morph;
pub mod stage;
pub mod state;
pub mod timeline;
pub mod visibility;

pub use depth::*;
pub use error::{CoreError, Result};
pub use intro::*;
pub use morph::*;
pub use stage::*;
pub use state::*;
pub use timeline::*;
pub use visibility::*;
