pub mod contact;
pub mod rapier;
pub mod sling;
