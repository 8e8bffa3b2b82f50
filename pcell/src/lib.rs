pub mod component;
pub mod data;
pub mod error;
pub mod io;
pub mod layout;
pub mod pdk;
pub mod units;

pub(crate) mod log;

pub use arcstr;
