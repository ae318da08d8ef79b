pub mod error;
pub mod models;
pub mod traits;
pub mod window;

pub use error::*;
pub use models::*;
pub use traits::*;
pub use window::*;
