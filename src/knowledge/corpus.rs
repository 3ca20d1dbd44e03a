//! 문서 코퍼스 모듈
//!
//! 모든 `load_document` 호출이 만들어낸 청크의 순서 있는 목록과
//! 문서 이름 집합을 하나의 구조체로 캡슐화합니다. 수명 주기는
//! 단순합니다: 초기 로드 단계에서 append-only로 쌓고, 그 뒤로는
//! 읽기 전용으로 질의합니다. 인덱스는 재시작 전까지만 유지되며
//! 디스크에 저장되지 않습니다.
//!
//! 동시성: 로드는 `&mut self`, 질의는 `&self`를 요구하므로
//! 진행 중인 로드와 질의가 겹치는 상태는 타입 수준에서
//! 만들어지지 않습니다.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::source::{DocumentSource, FileSystemSource};

use super::chunker::{ChunkConfig, ChunkMetadata, Chunker, DocumentChunk, ParagraphChunker};
use super::relevance::{self, ScoredChunk};
use super::terms::extract_key_terms;

// ============================================================================
// Errors
// ============================================================================

/// 코퍼스 적재 오류
///
/// I/O 실패는 변형 없이 감싸서 전파합니다. 재시도나 부분 복구는
/// 하지 않습니다. 실패한 파일은 청크를 남기지 않습니다.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no file name in document path: {0}")]
    InvalidPath(PathBuf),
}

// ============================================================================
// Statistics
// ============================================================================

/// 코퍼스 통계
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub document_count: usize,
    pub chunk_count: usize,
    pub total_content_bytes: usize,
}

// ============================================================================
// DocumentCorpus
// ============================================================================

/// 문서 코퍼스
///
/// 문서를 청크로 분해해 쌓고, TF-IDF로 관련 청크를 찾습니다.
pub struct DocumentCorpus {
    chunks: Vec<DocumentChunk>,
    documents: HashSet<String>,
    chunker: Box<dyn Chunker>,
    source: Box<dyn DocumentSource>,
}

impl DocumentCorpus {
    /// 청킹 설정으로 생성 (로컬 파일시스템 소스, .txt)
    pub fn new(config: ChunkConfig) -> Self {
        Self::with_source(
            Box::new(ParagraphChunker::new(config)),
            Box::new(FileSystemSource::with_defaults()),
        )
    }

    /// 청커와 문서 소스를 직접 지정해 생성
    pub fn with_source(chunker: Box<dyn Chunker>, source: Box<dyn DocumentSource>) -> Self {
        Self {
            chunks: Vec::new(),
            documents: HashSet::new(),
            chunker,
            source,
        }
    }

    /// 문서 한 개를 적재
    ///
    /// 파일을 읽어 청크로 분해하고 코퍼스 끝에 덧붙입니다.
    /// 같은 로드 패스에서 방출된 이웃 청크끼리만
    /// previous/next 링크가 연결됩니다.
    pub async fn load_document(&mut self, path: &Path) -> Result<(), CorpusError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CorpusError::InvalidPath(path.to_path_buf()))?;

        // 읽기에 실패한 문서도 문서 집합에는 남습니다.
        self.documents.insert(file_name.clone());
        let content = self.source.read_document(path).await?;

        let drafts = self.chunker.chunk(&content);
        if drafts.is_empty() {
            tracing::warn!("청크가 생성되지 않았습니다: {}", file_name);
            return Ok(());
        }

        let base = self.chunks.len();

        for (index, draft) in drafts.into_iter().enumerate() {
            let key_terms = extract_key_terms(&draft.content);
            self.chunks.push(DocumentChunk {
                content: draft.content,
                index,
                source: file_name.clone(),
                metadata: ChunkMetadata {
                    paragraph_count: draft.paragraph_count,
                    sentence_count: draft.sentence_count,
                    previous_chunk_id: None,
                    next_chunk_id: None,
                    key_terms,
                    semantic_score: None,
                },
            });
        }

        // 이번 패스의 청크끼리 방출 순서대로 링크
        for i in base + 1..self.chunks.len() {
            let prev_index = self.chunks[i - 1].index;
            let next_index = self.chunks[i].index;
            self.chunks[i].metadata.previous_chunk_id = Some(prev_index);
            self.chunks[i - 1].metadata.next_chunk_id = Some(next_index);
        }

        tracing::info!(
            "문서 로드 완료: {} (청크 {}개, 누적 {}개)",
            file_name,
            self.chunks.len() - base,
            self.chunks.len()
        );

        Ok(())
    }

    /// 디렉토리의 문서를 목록 순서대로 모두 적재
    ///
    /// 소스가 걸러낸 파일 목록(이름순)을 차례로 적재합니다.
    /// 중간에 실패하면 그 지점에서 중단하고 오류를 전파합니다.
    pub async fn load_documents_from_directory(&mut self, dir: &Path) -> Result<(), CorpusError> {
        let files = self.source.list_documents(dir).await?;
        tracing::info!("{}: 문서 파일 {}개 발견", dir.display(), files.len());

        for file in files {
            self.load_document(&file).await?;
        }

        Ok(())
    }

    /// 쿼리와 관련 있는 청크 상위 `limit`개
    ///
    /// 코퍼스 상태는 변경되지 않습니다. 결과는 스코어 내림차순이고
    /// 동점은 코퍼스 순서를 유지합니다.
    pub fn find_relevant_chunks(&self, query: &str, limit: usize) -> Vec<ScoredChunk> {
        relevance::find_relevant_chunks(&self.chunks, query, limit)
    }

    /// 적재된 문서 수
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// 코퍼스의 청크 수
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// 전체 청크 (방출 순서)
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    /// 코퍼스 통계
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            document_count: self.document_count(),
            chunk_count: self.chunk_count(),
            total_content_bytes: self.chunks.iter().map(|c| c.content.len()).sum(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
