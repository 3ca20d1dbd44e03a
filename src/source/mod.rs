//! 문서 소스 모듈
//!
//! 파일 읽기와 디렉토리 목록 조회를 트레이트 뒤로 숨깁니다.
//! 코퍼스는 이 트레이트만 사용하므로 테스트에서 실제 파일시스템
//! 없이 인메모리 소스로 대체할 수 있습니다.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::collector::{CollectorConfig, FileCollector};

// ============================================================================
// DocumentSource Trait
// ============================================================================

/// 문서 소스 트레이트
///
/// I/O 실패는 변형 없이 그대로 전파됩니다. 재시도하지 않습니다.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// 파일 전체를 텍스트로 읽기
    async fn read_document(&self, path: &Path) -> io::Result<String>;

    /// 디렉토리에서 수집 대상 문서 목록 조회 (이름순 정렬)
    async fn list_documents(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

// ============================================================================
// FileSystemSource
// ============================================================================

/// 로컬 파일시스템 소스
pub struct FileSystemSource {
    collector: FileCollector,
}

impl FileSystemSource {
    /// 수집기 설정으로 생성
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            collector: FileCollector::new(config),
        }
    }

    /// 기본 설정(.txt)으로 생성
    pub fn with_defaults() -> Self {
        Self::new(CollectorConfig::default())
    }
}

#[async_trait]
impl DocumentSource for FileSystemSource {
    async fn read_document(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn list_documents(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.collector.collect_directory(dir)
    }
}

// ============================================================================
// Tests
// ============================================================================
