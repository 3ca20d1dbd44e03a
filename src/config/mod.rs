//! 설정 모듈
//!
//! 환경 변수에서 런타임 설정을 읽습니다. 값이 없으면 기본값을
//! 사용하고, 어떤 경우에도 패닉하지 않습니다. 청킹 파라미터는
//! CLI 플래그로 덮어쓸 수 있습니다.

use std::env;
use std::path::PathBuf;

// ============================================================================
// Environment Keys
// ============================================================================

/// 문서 디렉토리 경로
const ENV_DOCUMENTS_PATH: &str = "DOCUMENTS_PATH";

/// 수집할 텍스트 파일 확장자 (점 제외)
const ENV_TEXT_EXTENSION: &str = "DOCQA_TEXT_EXTENSION";

/// 기본 문서 디렉토리
const DEFAULT_DOCUMENTS_PATH: &str = "./documents";

/// 기본 확장자
const DEFAULT_TEXT_EXTENSION: &str = "txt";

// ============================================================================
// Config
// ============================================================================

/// 런타임 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 문서 디렉토리
    pub documents_path: PathBuf,
    /// 수집 대상 확장자
    pub text_extension: String,
}

impl Config {
    /// 환경 변수에서 설정 읽기
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 조회 함수로 설정 구성 (테스트에서 환경 변수 대신 사용)
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let documents_path = lookup(ENV_DOCUMENTS_PATH)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENTS_PATH));

        let text_extension = lookup(ENV_TEXT_EXTENSION)
            .map(|v| v.trim().trim_start_matches('.').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TEXT_EXTENSION.to_string());

        Self {
            documents_path,
            text_extension,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents_path: PathBuf::from(DEFAULT_DOCUMENTS_PATH),
            text_extension: DEFAULT_TEXT_EXTENSION.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.documents_path, PathBuf::from("./documents"));
        assert_eq!(config.text_extension, "txt");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(|key| match key {
            ENV_DOCUMENTS_PATH => Some("/data/docs".to_string()),
            ENV_TEXT_EXTENSION => Some("md".to_string()),
            _ => None,
        });
        assert_eq!(config.documents_path, PathBuf::from("/data/docs"));
        assert_eq!(config.text_extension, "md");
    }

    #[test]
    fn test_extension_leading_dot_stripped() {
        let config = Config::from_lookup(|key| {
            (key == ENV_TEXT_EXTENSION).then(|| ".text".to_string())
        });
        assert_eq!(config.text_extension, "text");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.documents_path, PathBuf::from("./documents"));
        assert_eq!(config.text_extension, "txt");
    }
}
