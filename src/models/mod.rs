pub mod profile;
pub mod profile_patch;

pub use profile::*;
pub use profile_patch::*;
