//! Organizational queries over the directory API.
//!
//! The resolvers walk the membership graph formed by relationships
//! (member -> group) in both directions, honoring group activation and
//! tolerating cycles. Each resolution is given a [`GroupSnapshot`] taken
//! for that call; everything else is read live through a [`Directory`].

pub use currency::Currency;
pub use directory::Directory;
pub use employment::{employed_between, employment_date};
pub use error::EngineError;
pub use managers::{ManagerCounts, manager_counts};
pub use members::MemberResolver;
pub use membership::MembershipResolver;
pub use money::Money;
pub use payroll::{salary_in_sek, total_salary_in_sek};
pub use snapshot::{GroupSnapshot, MemberKind, classify};

mod currency;
mod directory;
mod employment;
mod error;
mod managers;
mod members;
mod membership;
mod money;
mod payroll;
mod snapshot;
#[cfg(test)]
mod test_support;

pub type ResultEngine<T> = Result<T, EngineError>;
