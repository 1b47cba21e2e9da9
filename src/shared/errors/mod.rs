use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// サブスクリプション登録数の上限超過エラー
    #[error("登録上限エラー: サブスクリプションは{0}件までしか登録できません")]
    LimitExceeded(usize),

    /// 日付文字列が解析できない場合のエラー
    #[error("日付解析エラー: {0}")]
    InvalidDate(String),

    /// ドキュメントストア関連のエラー
    #[error("ドキュメントストアエラー: {0}")]
    Store(String),

    /// 認証関連のエラー
    #[error("認証エラー: {0}")]
    Auth(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// ネットワーク関連のエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
    /// 最重要（認証エラーなど）
    Critical,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::LimitExceeded(limit) => {
                format!("サブスクリプションは{limit}件までしか登録できません")
            }
            AppError::InvalidDate(_) => "日付の形式が正しくありません".to_string(),
            AppError::Store(_) => "データの保存に失敗しました".to_string(),
            AppError::Auth(msg) => msg.clone(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Network(_) => "外部サービスとの通信でエラーが発生しました".to_string(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
            AppError::Json(_) => "データ形式の解析でエラーが発生しました".to_string(),
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Low,
            AppError::LimitExceeded(_) => ErrorSeverity::Low,
            AppError::InvalidDate(_) => ErrorSeverity::Low,
            AppError::Store(_) => ErrorSeverity::Medium,
            AppError::Auth(_) => ErrorSeverity::Critical,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Network(_) => ErrorSeverity::Medium,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    ///
    /// # 戻り値
    /// バリデーションエラー
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    ///
    /// # 戻り値
    /// リソース未発見エラー
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// 日付解析エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `date` - 解析できなかった日付文字列
    ///
    /// # 戻り値
    /// 日付解析エラー
    pub fn invalid_date<S: Into<String>>(date: S) -> Self {
        AppError::InvalidDate(date.into())
    }

    /// ドキュメントストアエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - ストアエラーメッセージ
    ///
    /// # 戻り値
    /// ドキュメントストアエラー
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// 認証エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 認証エラーメッセージ
    ///
    /// # 戻り値
    /// 認証エラー
    pub fn auth<S: Into<String>>(message: S) -> Self {
        AppError::Auth(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    ///
    /// # 戻り値
    /// 設定エラー
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// AppErrorからStringへの変換（プレゼンテーション層への受け渡しのため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

/// reqwest::ErrorからAppErrorへの変換
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Network(error.to_string())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
