//! External service clients: payments and notifications.

pub mod email;
pub mod stripe;
