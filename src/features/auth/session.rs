use crate::features::auth::models::AuthUser;
use crate::features::auth::service::AuthService;
use crate::features::subscriptions::service::SubscriptionService;
use crate::services::store::DocumentStore;
use crate::shared::errors::AppResult;
use std::sync::Arc;

/// 認証状態の変化を受け取るリスナー
///
/// サインイン時は現在のユーザーID、サインアウト時はNoneが渡される。
pub type AuthStateListener = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// サインイン中のユーザー1人分のセッション
///
/// サインインで生成され、サインアウトで破棄される。サブスクリプション
/// 操作はこのセッション経由でのみ行う。
pub struct ActiveSession<S: DocumentStore> {
    /// 認証済みユーザー情報
    pub user: AuthUser,
    /// このユーザーのサブスクリプションサービス
    pub subscriptions: SubscriptionService<S>,
}

/// セッションのライフサイクルを管理する構造体
///
/// グローバルな共有状態は持たず、呼び出し側が明示的にこのハンドルを
/// 引き回す。
pub struct SessionManager<S: DocumentStore> {
    /// 認証プロバイダクライアント
    auth_service: AuthService,
    /// ドキュメントストア
    store: Arc<S>,
    /// 現在のセッション
    current: Option<ActiveSession<S>>,
    /// 認証状態リスナー
    listeners: Vec<AuthStateListener>,
}

impl<S: DocumentStore> SessionManager<S> {
    /// 新しいSessionManagerを作成する
    ///
    /// # 引数
    /// * `auth_service` - 認証プロバイダクライアント
    /// * `store` - ドキュメントストア
    ///
    /// # 戻り値
    /// セッションを持たない状態のSessionManagerインスタンス
    pub fn new(auth_service: AuthService, store: Arc<S>) -> Self {
        Self {
            auth_service,
            store,
            current: None,
            listeners: Vec::new(),
        }
    }

    /// 認証状態リスナーを登録する
    ///
    /// # 引数
    /// * `listener` - 認証状態の変化ごとに呼び出されるリスナー
    pub fn on_auth_state_changed(
        &mut self,
        listener: impl Fn(Option<&str>) + Send + Sync + 'static,
    ) {
        self.listeners.push(Box::new(listener));
    }

    /// アカウントを新規作成してサインインする
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    pub async fn sign_up(&mut self, email: &str, password: &str) -> AppResult<AuthUser> {
        let user = self.auth_service.create_account(email, password).await?;
        self.establish(user).await
    }

    /// 既存アカウントでサインインする
    ///
    /// # 引数
    /// * `email` - メールアドレス
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AppResult<AuthUser> {
        let user = self.auth_service.authenticate(email, password).await?;
        self.establish(user).await
    }

    /// 認証済みユーザーからセッションを復元する
    ///
    /// アプリ再起動時など、プロバイダとの再認証を経ずに保存済みの
    /// 認証情報からセッションを立ち上げる場合に使用する。
    ///
    /// # 引数
    /// * `user` - 認証済みユーザー情報
    ///
    /// # 戻り値
    /// 認証済みユーザー情報
    pub async fn restore_session(&mut self, user: AuthUser) -> AppResult<AuthUser> {
        self.establish(user).await
    }

    /// サインアウトしてセッションを破棄する
    pub fn sign_out(&mut self) {
        if let Some(session) = self.current.take() {
            log::info!("サインアウトしました: user_id={}", session.user.user_id);
        }
        self.notify_listeners();
    }

    /// 現在のユーザーを取得する
    ///
    /// # 戻り値
    /// サインイン中のユーザー情報、未サインインの場合はNone
    pub fn current_user(&self) -> Option<&AuthUser> {
        self.current.as_ref().map(|session| &session.user)
    }

    /// サインイン中かどうかを判定する
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// 現在のセッションを取得する
    pub fn session(&self) -> Option<&ActiveSession<S>> {
        self.current.as_ref()
    }

    /// 現在のセッションを可変で取得する（サブスクリプション操作用）
    pub fn session_mut(&mut self) -> Option<&mut ActiveSession<S>> {
        self.current.as_mut()
    }

    /// ユーザーのドキュメントを読み込んでセッションを確立する
    async fn establish(&mut self, user: AuthUser) -> AppResult<AuthUser> {
        let subscriptions =
            SubscriptionService::load(Arc::clone(&self.store), user.user_id.clone()).await?;

        log::info!("セッションを確立しました: user_id={}", user.user_id);

        self.current = Some(ActiveSession {
            user: user.clone(),
            subscriptions,
        });
        self.notify_listeners();

        Ok(user)
    }

    /// 登録済みリスナーへ現在の認証状態を通知する
    fn notify_listeners(&self) {
        let user_id = self
            .current
            .as_ref()
            .map(|session| session.user.user_id.as_str());

        log::debug!("認証状態を通知します: user_id={user_id:?}");
        for listener in &self.listeners {
            listener(user_id);
        }
    }
}
