pub mod contact_number;

pub use contact_number::is_valid_contact_number;
