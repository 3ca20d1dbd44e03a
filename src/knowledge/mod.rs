//! Knowledge 모듈 - 청킹 및 검색 코어
//!
//! - text: 공백 정규화, 문단/문장 분할, 검색 전처리
//! - chunker: 크기 제한 그리디 청킹 (문단 → 문장 폴백)
//! - terms: 청크 메타데이터용 키 텀 추출
//! - relevance: TF-IDF 스코어링 및 상위 K 선택
//! - corpus: 청크 목록과 문서 집합을 소유하는 적재/질의 표면

pub mod chunker;
pub mod corpus;
pub mod relevance;
pub mod terms;
pub mod text;

// Re-exports
pub use chunker::{ChunkConfig, ChunkDraft, ChunkMetadata, Chunker, DocumentChunk, ParagraphChunker};
pub use corpus::{CorpusError, CorpusStats, DocumentCorpus};
pub use relevance::{find_relevant_chunks, ScoredChunk, DEFAULT_QUERY_LIMIT};
pub use terms::{extract_key_terms, MAX_KEY_TERMS};
pub use text::{normalize, preprocess, split_paragraphs, split_sentences};
