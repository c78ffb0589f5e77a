pub mod use_cases;

pub use use_cases::{
    NotificationSettings,
    change_password::ChangePasswordUseCase,
    change_username::ChangeUsernameUseCase,
    federated_login::{FederatedLogin, FederatedLoginUseCase},
    login::{LocalLogin, LoginUseCase},
    logout::LogoutUseCase,
    register::{Registration, RegisterUseCase},
    reset_password::ResetPasswordUseCase,
    session_auth::SessionAuthUseCase,
    token_auth::{TokenAuthUseCase, TokenCredentials},
};
