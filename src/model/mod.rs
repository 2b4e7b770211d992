//! Доменные объекты, с которыми работают репозитории.

pub mod area;
pub mod onboarding;
pub mod profile;
pub mod spot;
pub mod types;

pub use area::*;
pub use onboarding::*;
pub use profile::*;
pub use spot::*;
pub use types::*;
