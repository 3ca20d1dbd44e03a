//! 문서 청킹 모듈
//!
//! 문단 단위 그리디 패킹으로 크기 제한을 지키는 청크를 만듭니다.
//! 문단 하나가 최대 크기를 넘으면 문장 단위로 내려가서 다시
//! 패킹합니다. 두 상태(문단 누적 / 문장 누적)를 가진 작은
//! 상태 기계로 구현되어 있습니다.
//!
//! 주의: 청크 방출 순서는 문서 내 원래 위치와 다를 수 있습니다.
//! 최소 크기에 못 미친 버퍼가 남아 있는 상태에서 초과 크기 문단이
//! 문장 청크로 먼저 방출되는 경우가 그렇습니다. 링크 메타데이터는
//! 방출 순서 기준입니다.

use serde::{Deserialize, Serialize};

use super::text::{split_paragraphs, split_sentences};

// ============================================================================
// Chunk Configuration
// ============================================================================

/// 청킹 설정
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 최소 청크 크기 (문자 수). 이보다 작은 버퍼는 버려집니다.
    pub min_characters: usize,
    /// 최대 청크 크기 (문자 수)
    pub max_characters: usize,
    /// 직전 청크 꼬리와의 최대 오버랩 (문자 수, 0이면 비활성)
    pub overlap_characters: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_characters: 500,
            max_characters: 1000,
            overlap_characters: 100,
        }
    }
}

// ============================================================================
// Chunk Types
// ============================================================================

/// 청크 메타데이터
///
/// `previous_chunk_id`/`next_chunk_id`는 같은 문서 로드 패스에서
/// 방출 순서 기준 이웃 청크의 `index`를 가리킵니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    /// 청크에 포함된 문단 수
    pub paragraph_count: usize,
    /// 청크에 포함된 문장 수
    pub sentence_count: usize,
    /// 직전 청크의 index (같은 문서 내)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_chunk_id: Option<usize>,
    /// 다음 청크의 index (같은 문서 내)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_chunk_id: Option<usize>,
    /// 추출된 키 텀 (순서 유지, 중복 허용)
    pub key_terms: Vec<String>,
    /// 쿼리 시점에 계산되는 TF-IDF 스코어.
    /// 반환되는 사본에만 채워지며 코퍼스 상태는 변경되지 않습니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f64>,
}

/// 검색 단위가 되는 문서 청크
///
/// `index`는 문서마다 0부터 다시 시작하므로 코퍼스 전체에서
/// 유일하지 않습니다. `(source, index)` 쌍이 실질적인 식별자입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// 정규화된 청크 텍스트
    pub content: String,
    /// 원본 문서 내 청크 위치 (문서별 0부터)
    pub index: usize,
    /// 원본 문서 식별자 (파일 이름)
    pub source: String,
    /// 청크 메타데이터
    pub metadata: ChunkMetadata,
}

/// 청커가 방출하는 중간 결과
///
/// index/source/키 텀/링크는 로드 패스에서 채워집니다.
#[derive(Debug, Clone)]
pub struct ChunkDraft {
    pub content: String,
    pub paragraph_count: usize,
    pub sentence_count: usize,
}

// ============================================================================
// Chunker Trait
// ============================================================================

/// 텍스트 청킹 전략 트레이트
pub trait Chunker: Send + Sync {
    /// 텍스트를 청크 드래프트로 분할
    fn chunk(&self, text: &str) -> Vec<ChunkDraft>;

    /// 청커 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// ParagraphChunker
// ============================================================================

/// 문단 누적 상태의 버퍼
#[derive(Debug, Default)]
struct ParagraphBuffer {
    content: String,
    paragraphs: usize,
    sentences: usize,
}

impl ParagraphBuffer {
    fn append(&mut self, paragraph: &str) {
        if !self.content.is_empty() {
            self.content.push_str("\n\n");
        }
        self.content.push_str(paragraph);
        self.paragraphs += 1;
        self.sentences += split_sentences(paragraph).len();
    }

    fn replace_with(&mut self, paragraph: &str) {
        self.content = paragraph.to_string();
        self.paragraphs = 1;
        self.sentences = split_sentences(paragraph).len();
    }

    fn reset(&mut self) {
        self.content.clear();
        self.paragraphs = 0;
        self.sentences = 0;
    }
}

/// 문단 우선 청커
///
/// 문단을 그리디하게 누적하다가 최대 크기를 넘기면 방출하고,
/// 최대 크기를 넘는 문단은 문장 단위로 재패킹합니다.
/// 최소 크기에 못 미친 내용은 방출하지 않고 버립니다.
pub struct ParagraphChunker {
    config: ChunkConfig,
}

impl ParagraphChunker {
    /// 설정으로 생성
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// 기본 설정으로 생성
    pub fn with_defaults() -> Self {
        Self::new(ChunkConfig::default())
    }

    /// 설정 참조
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// 버퍼를 드래프트로 방출
    fn emit(&self, drafts: &mut Vec<ChunkDraft>, buffer: &mut ParagraphBuffer) {
        let content = self.strip_overlap(&buffer.content, drafts.last());
        drafts.push(ChunkDraft {
            content: content.trim().to_string(),
            paragraph_count: buffer.paragraphs,
            sentence_count: buffer.sentences,
        });
        buffer.reset();
    }

    /// 초과 크기 문단을 문장 단위로 재패킹 (문장 누적 상태)
    fn chunk_oversized_paragraph(&self, paragraph: &str, drafts: &mut Vec<ChunkDraft>) {
        let mut sentence_chunk = String::new();

        for sentence in split_sentences(paragraph) {
            if sentence_chunk.len() + sentence.len() > self.config.max_characters {
                if sentence_chunk.len() >= self.config.min_characters {
                    self.emit_sentence_chunk(drafts, &sentence_chunk);
                }
                // 최소 크기 미달이면 버려짐. 문장 하나가 최대 크기를
                // 넘더라도 자르지 않고 다음 턴에 통째로 방출됩니다.
                sentence_chunk = sentence;
            } else {
                if !sentence_chunk.is_empty() {
                    sentence_chunk.push(' ');
                }
                sentence_chunk.push_str(&sentence);
            }
        }

        if sentence_chunk.len() >= self.config.min_characters {
            self.emit_sentence_chunk(drafts, &sentence_chunk);
        }
    }

    fn emit_sentence_chunk(&self, drafts: &mut Vec<ChunkDraft>, content: &str) {
        let content = self.strip_overlap(content, drafts.last());
        let content = content.trim().to_string();
        let sentence_count = split_sentences(&content).len();
        drafts.push(ChunkDraft {
            content,
            paragraph_count: 1,
            sentence_count,
        });
    }

    /// 직전 청크와의 오버랩 제거
    ///
    /// 직전 청크의 꼬리 `overlap_characters`자를 새 콘텐츠 안에서
    /// 찾아, 그 지점까지(오버랩 포함)를 잘라냅니다. 꼬리가 그대로
    /// 들어 있지 않으면 콘텐츠를 건드리지 않습니다.
    fn strip_overlap(&self, content: &str, previous: Option<&ChunkDraft>) -> String {
        let overlap_len = self.config.overlap_characters;
        let prev = match previous {
            Some(p) if overlap_len > 0 => &p.content,
            _ => return content.to_string(),
        };

        let tail_start = floor_char_boundary(prev, prev.len().saturating_sub(overlap_len));
        let overlap = &prev[tail_start..];
        if overlap.is_empty() {
            return content.to_string();
        }

        match content.find(overlap) {
            Some(pos) => content[pos + overlap.len()..].to_string(),
            None => content.to_string(),
        }
    }
}

impl Chunker for ParagraphChunker {
    fn chunk(&self, text: &str) -> Vec<ChunkDraft> {
        let mut drafts = Vec::new();
        let mut buffer = ParagraphBuffer::default();

        for paragraph in split_paragraphs(text) {
            if buffer.content.len() + paragraph.len() > self.config.max_characters {
                if buffer.content.len() >= self.config.min_characters {
                    self.emit(&mut drafts, &mut buffer);
                }

                if paragraph.len() > self.config.max_characters {
                    // 문장 누적 상태로 전환. 최소 크기 미달 버퍼는 그대로
                    // 남아 다음 문단을 계속 받습니다.
                    self.chunk_oversized_paragraph(&paragraph, &mut drafts);
                } else {
                    // 미달 버퍼가 남아 있었다면 여기서 버려집니다.
                    buffer.replace_with(&paragraph);
                }
            } else {
                buffer.append(&paragraph);
            }
        }

        if buffer.content.len() >= self.config.min_characters {
            self.emit(&mut drafts, &mut buffer);
        }

        drafts
    }

    fn name(&self) -> &'static str {
        "ParagraphChunker"
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// UTF-8 경계 조정 (인덱스 이하로)
#[inline]
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

// ============================================================================
// Tests
// ============================================================================
