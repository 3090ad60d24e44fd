pub mod app;
pub mod campaigns;
pub mod health;

pub use app::index;
pub use campaigns::generate_campaign;
pub use health::health_check;
