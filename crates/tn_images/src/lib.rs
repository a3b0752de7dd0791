pub mod providers;

pub use providers::{available_providers, create_provider, ImageConfig};

pub mod prelude {
    pub use super::providers::create_provider;
    pub use tn_core::{ImageProvider, Result};
}
