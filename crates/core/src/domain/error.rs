use serde::Serialize;

/// アプリケーション共通エラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "E_VALIDATION")]
    Validation,
    #[serde(rename = "E_CREDENTIAL")]
    MissingCredential,
    #[serde(rename = "E_PROVIDER")]
    Provider,
    #[serde(rename = "E_TIMEOUT")]
    Timeout,
    #[serde(rename = "E_STORAGE")]
    Storage,
    #[serde(rename = "E_OUTPUT")]
    Output,
    #[serde(rename = "E_INVALID_STATE")]
    InvalidState,
    #[serde(rename = "E_INTERNAL")]
    Internal,
}

/// アプリケーションエラー（通知ペイロード兼用）
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub recoverable: bool,
}

impl AppError {
    /// 入力不備（トピック/URL 未入力など）
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Validation,
            message: msg.into(),
            recoverable: true,
        }
    }

    /// API キー未設定
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::MissingCredential,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Provider,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Timeout,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidState,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Output,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: msg.into(),
            recoverable: false,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Storage,
            message: msg.into(),
            recoverable: false,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
