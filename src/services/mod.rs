mod email;

pub use email::{EmailError, EmailService};
