pub mod state;
pub mod messages;
pub mod update;
pub mod view;

pub use state::App;
pub use messages::Message;