/// 認証機能のモジュール
pub mod models;
pub mod service;
pub mod session;

pub use models::{AuthError, AuthUser, TokenResponse};
pub use service::AuthService;
pub use session::{ActiveSession, AuthStateListener, SessionManager};
