use crate::config::environment::BackendConfig;
use crate::features::auth::models::{
    AuthError, AuthUser, CredentialsRequest, ProviderErrorResponse, TokenResponse,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// メールアドレス形式の簡易チェック用正規表現
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("メールアドレス正規表現が不正です")
});

/// パスワードの最小文字数
const PASSWORD_MIN_LENGTH: usize = 6;

/// 外部認証プロバイダに対するメール・パスワード認証クライアント
#[derive(Clone)]
pub struct AuthService {
    /// HTTPクライアント
    http_client: reqwest::Client,
    /// 認証プロバイダのベースURL
    auth_base_url: String,
    /// APIキー
    api_key: String,
}

impl AuthService {
    /// 新しいAuthServiceを作成する
    ///
    /// # 引数
    /// * `config` - バックエンド設定
    ///
    /// # 戻り値
    /// AuthServiceインスタンス
    pub fn new(config: &BackendConfig) -> Result<Self, AuthError> {
        config
            .validate()
            .map_err(AuthError::ConfigError)?;

        log::info!("AuthServiceを初期化しました");

        Ok(Self {
            http_client: reqwest::Client::new(),
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// アカウントを新規作成する
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード（6文字以上）
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    pub async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        validate_credentials(email, password)?;

        log::info!("アカウントを作成しています: email={email}");
        let user = self.request_token("accounts:signUp", email, password).await?;
        log::info!("アカウントを作成しました: user_id={}", user.user_id);

        Ok(user)
    }

    /// メールアドレスとパスワードで認証する
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        validate_credentials(email, password)?;

        log::info!("認証を開始します: email={email}");
        let user = self
            .request_token("accounts:signInWithPassword", email, password)
            .await?;
        log::info!("認証が完了しました: user_id={}", user.user_id);

        Ok(user)
    }

    /// 認証プロバイダのエンドポイントURLを構築する
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/v1/{endpoint}?key={}", self.auth_base_url, self.api_key)
    }

    /// 認証プロバイダへ認証情報を送信し、トークンを取得する
    ///
    /// # 引数
    /// * `endpoint` - プロバイダのエンドポイント名
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    async fn request_token(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let request = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let response = self
            .http_client
            .post(self.endpoint_url(endpoint))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            // エラー本文からプロバイダのエラーコードを取り出す
            let error = match response.json::<ProviderErrorResponse>().await {
                Ok(body) => map_provider_error(&body.error.message),
                Err(_) => AuthError::NetworkError(format!(
                    "認証プロバイダエラー: status={status}"
                )),
            };
            log::warn!("認証リクエストが失敗しました: endpoint={endpoint}, {error}");
            return Err(error);
        }

        let token: TokenResponse = response.json().await?;
        Ok(AuthUser::from(token))
    }
}

/// 認証情報の入力チェック
///
/// # 引数
/// * `email` - メールアドレス
/// * `password` - パスワード
///
/// # 戻り値
/// 成功時はOk(())、失敗時はAuthError::ValidationError
fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    // バリデーション: メールアドレスの形式
    if !EMAIL_PATTERN.is_match(email) {
        return Err(AuthError::ValidationError(
            "メールアドレスの形式が正しくありません".to_string(),
        ));
    }

    // バリデーション: パスワードは6文字以上
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AuthError::ValidationError(
            "パスワードは6文字以上で入力してください".to_string(),
        ));
    }

    Ok(())
}

/// プロバイダのエラーコードをAuthErrorへ対応付ける
///
/// コードには「WEAK_PASSWORD : ...」のように補足が続く場合があるため、
/// 先頭トークンで判定する。
fn map_provider_error(message: &str) -> AuthError {
    let code = message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .unwrap_or_default();

    match code {
        "EMAIL_EXISTS" => AuthError::EmailAlreadyExists,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "USER_DISABLED" => AuthError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::ProviderError(message.to_string()),
    }
}
