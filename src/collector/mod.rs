//! 파일 수집 모듈
//!
//! 문서 디렉토리에서 수집 대상 텍스트 파일을 골라냅니다.
//! 지정된 확장자만 남기고, 결과를 파일 이름순으로 정렬해
//! 로드 순서가 플랫폼에 관계없이 결정적이 되도록 합니다.

use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

// ============================================================================
// Collector Configuration
// ============================================================================

/// 파일 수집기 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 수집할 파일 확장자 (점 제외)
    pub extension: String,
    /// 숨김 파일 포함 여부
    pub include_hidden: bool,
    /// .gitignore 패턴 존중 여부
    pub respect_gitignore: bool,
    /// 최대 파일 크기 (바이트, 0이면 제한 없음)
    pub max_file_size: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            include_hidden: false,
            respect_gitignore: false,
            max_file_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

// ============================================================================
// File Collector
// ============================================================================

/// 문서 파일 수집기
///
/// 디렉토리 바로 아래(재귀 없음)의 파일 중 설정된 확장자를 가진
/// 것만 반환합니다.
pub struct FileCollector {
    config: CollectorConfig,
}

impl FileCollector {
    /// 설정으로 생성
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// 기본 설정(.txt)으로 생성
    pub fn with_defaults() -> Self {
        Self::new(CollectorConfig::default())
    }

    /// 디렉토리에서 수집 대상 파일 목록 조회
    ///
    /// 디렉토리가 없거나 읽을 수 없으면 I/O 오류를 그대로
    /// 전파합니다. 개별 엔트리 오류는 경고만 남기고 건너뜁니다.
    pub fn collect_directory(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(dir)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", dir.display()),
            ));
        }

        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(!self.config.include_hidden)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .build();

        let mut files = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("디렉토리 엔트리를 읽지 못했습니다: {}", e);
                    continue;
                }
            };

            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path().to_path_buf();
            if self.should_include(&path, &entry) {
                files.push(path);
            }
        }

        // 로드 순서 고정
        files.sort();

        tracing::debug!("{}에서 {}개 파일 수집", dir.display(), files.len());
        Ok(files)
    }

    /// 파일이 필터 조건을 만족하는지 확인
    fn should_include(&self, path: &Path, entry: &ignore::DirEntry) -> bool {
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.config.extension))
            .unwrap_or(false);

        if !matches_ext {
            return false;
        }

        if self.config.max_file_size > 0 {
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.config.max_file_size {
                    tracing::debug!(
                        "크기 제한 초과로 건너뜀: {} ({} bytes)",
                        path.display(),
                        metadata.len()
                    );
                    return false;
                }
            }
        }

        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_collects_only_matching_extension_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.txt", "bravo");
        write(dir.path(), "a.txt", "alpha");
        write(dir.path(), "notes.md", "markdown");

        let collector = FileCollector::with_defaults();
        let files = collector.collect_directory(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_skips_hidden_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "visible.txt", "text");
        write(dir.path(), ".hidden.txt", "secret");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        write(&dir.path().join("sub"), "nested.txt", "nested");

        let collector = FileCollector::with_defaults();
        let files = collector.collect_directory(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.txt"));
    }

    #[test]
    fn test_skips_oversized_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "small.txt", "ok");
        write(dir.path(), "large.txt", &"x".repeat(64));

        let collector = FileCollector::new(CollectorConfig {
            max_file_size: 16,
            ..Default::default()
        });
        let files = collector.collect_directory(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.txt"));
    }

    #[test]
    fn test_missing_directory_propagates_error() {
        let collector = FileCollector::with_defaults();
        let result = collector.collect_directory(Path::new("/no/such/dir"));
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "doc.md", "markdown");
        write(dir.path(), "doc.txt", "text");

        let collector = FileCollector::new(CollectorConfig {
            extension: "md".to_string(),
            ..Default::default()
        });
        let files = collector.collect_directory(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("doc.md"));
    }
}
