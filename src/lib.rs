//! docqa-rag - 문서 청킹 + TF-IDF 검색 코어
//!
//! 질문-응답 파이프라인의 검색 백본입니다. 플레인 텍스트 문서를
//! 크기 제한이 있는 청크로 분해해 코퍼스에 쌓고, 자유 텍스트
//! 쿼리에 대해 TF-IDF로 관련 청크를 찾아 돌려줍니다.
//! 프롬프트 조립, LLM 호출, HTTP 전송은 외부 협력자의 몫이며
//! 이 크레이트는 로컬 텍스트 파일 읽기 외의 I/O를 하지 않습니다.

pub mod cli;
pub mod collector;
pub mod config;
pub mod knowledge;
pub mod source;

// Re-exports
pub use collector::{CollectorConfig, FileCollector};
pub use config::Config;
pub use knowledge::{
    extract_key_terms, find_relevant_chunks, normalize, split_paragraphs, split_sentences,
    ChunkConfig, ChunkMetadata, Chunker, CorpusError, CorpusStats, DocumentChunk, DocumentCorpus,
    ParagraphChunker, ScoredChunk, DEFAULT_QUERY_LIMIT, MAX_KEY_TERMS,
};
pub use source::{DocumentSource, FileSystemSource};
