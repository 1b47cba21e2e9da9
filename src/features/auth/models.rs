use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};

/// 認証済みユーザー情報を表す構造体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// 認証プロバイダが発行するユーザーID
    pub user_id: String,
    /// メールアドレス
    pub email: String,
    /// IDトークン
    pub id_token: String,
    /// リフレッシュトークン
    pub refresh_token: String,
}

/// 認証プロバイダへのサインアップ／サインインリクエスト本文
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialsRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}

/// 認証プロバイダから返るトークンレスポンス
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// ユーザーID
    pub local_id: String,
    /// メールアドレス
    pub email: String,
    /// IDトークン
    pub id_token: String,
    /// リフレッシュトークン
    pub refresh_token: String,
    /// IDトークンの有効期間（秒、文字列表現）
    pub expires_in: String,
}

impl From<TokenResponse> for AuthUser {
    fn from(response: TokenResponse) -> Self {
        Self {
            user_id: response.local_id,
            email: response.email,
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        }
    }
}

/// 認証プロバイダのエラーレスポンス本文
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorResponse {
    pub error: ProviderErrorBody,
}

/// 認証プロバイダのエラー詳細
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    pub message: String,
}

/// 認証エラーの種類
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 認証設定エラー
    #[error("認証設定エラー: {0}")]
    ConfigError(String),

    /// 入力値のバリデーションエラー
    #[error("{0}")]
    ValidationError(String),

    /// メールアドレスが登録済み
    #[error("このメールアドレスは既に登録されています")]
    EmailAlreadyExists,

    /// メールアドレスまたはパスワードの不一致
    #[error("メールアドレスまたはパスワードが正しくありません")]
    InvalidCredentials,

    /// パスワード強度不足
    #[error("パスワードは6文字以上で入力してください")]
    WeakPassword,

    /// アカウント無効化済み
    #[error("このアカウントは無効化されています")]
    UserDisabled,

    /// 試行回数超過
    #[error("試行回数が多すぎます。しばらくしてから再試行してください")]
    TooManyAttempts,

    /// その他のプロバイダエラー
    #[error("認証プロバイダエラー: {0}")]
    ProviderError(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    NetworkError(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        AuthError::NetworkError(error.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::NetworkError(msg) => AppError::Network(msg),
            AuthError::ConfigError(msg) => AppError::Configuration(msg),
            other => AppError::Auth(other.to_string()),
        }
    }
}
