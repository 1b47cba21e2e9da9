//! サブスクリプション管理アプリのコアライブラリ
//!
//! ユーザーごとのサブスクリプション一覧の管理（追加・更新・削除）、
//! 次回請求日の算出、支出集計を提供する。認証は外部の認証プロバイダ、
//! 永続化は外部のドキュメントストア（ユーザーごとに1ドキュメント）に
//! 委譲し、それぞれHTTPクライアント経由でアクセスする。

pub mod config;
pub mod features;
pub mod services;
pub mod shared;

// 公開インターフェース
pub use config::{
    initialize_logging_system, load_environment_variables, BackendConfig, EnvironmentConfig,
};
pub use features::auth::{AuthService, AuthUser, SessionManager};
pub use features::billing::{days_until_next_charge, next_billing_date, NextCharge};
pub use features::metrics::{calculate_metrics, SubscriptionMetrics};
pub use features::subscriptions::{
    BillingFrequency, Category, Currency, Subscription, SubscriptionDto, SubscriptionService,
    SubscriptionStatus, UserData, SUBSCRIPTION_LIMIT,
};
pub use services::store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore};
pub use shared::errors::{AppError, AppResult, ErrorSeverity};
