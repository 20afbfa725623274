pub mod compose;
pub mod proxy;
pub mod settings;
pub mod share_link;
pub mod store;
