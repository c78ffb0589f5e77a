pub mod error;

mod change_password;
mod change_username;
mod federated_login;
mod login;
mod logout;
mod register;
mod reset_password;
mod verify_session;
mod verify_token;

pub use change_password::change_password;
pub use change_username::change_username;
pub use federated_login::federated_login;
pub use login::login;
pub use logout::logout;
pub use register::register;
pub use reset_password::reset_password;
pub use verify_session::verify_session;
pub use verify_token::verify_token;
