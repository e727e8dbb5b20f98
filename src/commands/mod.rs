//! Typed argument structs for the external programs aixsuma drives.

pub mod suma;
pub mod system;
