pub mod bootstrap;

pub use bootstrap::{connect, open_profile_form};
