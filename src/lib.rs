//! # Gateward - Authentication Gateway Library
//!
//! This is a facade crate that re-exports all public APIs from the gateway
//! components. Use this crate to get access to the whole authentication
//! gateway in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `User`, `Email`, `Username`, `Password`,
//!   `ApiToken`, `SessionId`, `Principal`, the `AuthError` taxonomy and the
//!   `CredentialHasher`
//! - **Ports**: `UserRepository`, `SessionStore`, `Notifier`
//! - **Use cases**: `TokenAuthUseCase`, `LoginUseCase`, `RegisterUseCase`, etc.
//! - **Adapters**: `HashMapUserRepository`, `DashMapSessionStore`,
//!   `JobQueueEmailClient`, `MockEmailClient`, `Settings`
//! - **Service**: `AuthService` - the assembled gateway

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gateward_core::*;
}

// Re-export most commonly used core types at the root level
pub use gateward_core::{
    ApiToken, AuthError, CredentialHasher, Email, FederatedIdentity, Password, Principal,
    Provider, SessionId, User, UserId, Username,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gateward_core::{
        Notification, Notifier, NotifierError, SessionStore, SessionStoreError, UniqueField,
        UserRepository, UserRepositoryError,
    };
}

// Re-export port traits at root level
pub use gateward_core::{Notification, Notifier, SessionStore, UserRepository};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gateward_application::*;
}

// Re-export use cases at root level
pub use gateward_application::{
    ChangePasswordUseCase, ChangeUsernameUseCase, FederatedLoginUseCase, LoginUseCase,
    LogoutUseCase, NotificationSettings, RegisterUseCase, Registration, ResetPasswordUseCase,
    SessionAuthUseCase, TokenAuthUseCase, TokenCredentials,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use gateward_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gateward_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use gateward_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gateward_adapters::{
    DashMapSessionStore, HashMapUserRepository, JobQueueEmailClient, MockEmailClient, Settings,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gateward_service::{AuthService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use axum;
pub use http;
