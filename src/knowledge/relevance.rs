//! TF-IDF 스코어링 및 랭킹 모듈
//!
//! 살아 있는 청크 코퍼스 전체를 쿼리와 대조해 스코어를 매기고
//! 상위 K개를 돌려줍니다. 인덱스를 따로 유지하지 않고 매 쿼리마다
//! 전체를 다시 계산합니다 (코퍼스 크기에 선형).
//!
//! - `tf(t, c)` = 청크 c의 전처리 단어 중 t의 출현 수 / 전체 단어 수
//! - `df(t)` = 전처리 콘텐츠에 t가 부분 문자열로 나타나는 청크 수
//! - `idf(t)` = ln(코퍼스 크기 / max(df, 1))
//! - 청크 스코어 = Σ_t tf × idf
//!
//! `df`가 토큰 일치가 아니라 부분 문자열 포함으로 계산되는 것은
//! 관측 가능한 계약입니다. 동점은 코퍼스 원래 순서를 유지합니다
//! (stable sort). 같은 코퍼스와 쿼리에 대해 결과는 항상 같습니다.

use serde::Serialize;

use super::chunker::DocumentChunk;
use super::text::preprocess;

/// 쿼리 결과 기본 개수
pub const DEFAULT_QUERY_LIMIT: usize = 3;

// ============================================================================
// Types
// ============================================================================

/// 스코어가 붙은 쿼리 결과
///
/// 코퍼스의 청크를 복사해 돌려주므로 쿼리끼리 상태를 공유하지
/// 않습니다. `chunk.metadata.semantic_score`에도 같은 값이 실립니다.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    /// 청크 사본
    pub chunk: DocumentChunk,
    /// TF-IDF 스코어
    pub score: f64,
}

// ============================================================================
// Ranking
// ============================================================================

/// 쿼리와 가장 관련 있는 청크를 찾습니다.
///
/// 쿼리는 청크 콘텐츠와 동일하게 전처리됩니다.
/// 반환 길이는 `limit`과 코퍼스 크기 중 작은 쪽 이하입니다.
/// 인식 가능한 쿼리 텀이 없으면 모든 스코어가 0이 되고,
/// 코퍼스 순서 그대로 앞에서 `limit`개가 반환됩니다.
pub fn find_relevant_chunks(
    chunks: &[DocumentChunk],
    query: &str,
    limit: usize,
) -> Vec<ScoredChunk> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let processed_query = preprocess(query);
    let query_terms: Vec<&str> = processed_query.split_whitespace().collect();

    // 청크별 전처리 결과를 한 번만 계산
    let processed: Vec<String> = chunks.iter().map(|c| preprocess(&c.content)).collect();
    let corpus_size = chunks.len() as f64;

    let mut scored: Vec<ScoredChunk> = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let words: Vec<&str> = processed[i].split_whitespace().collect();
            let score = query_terms
                .iter()
                .map(|term| {
                    term_frequency(term, &words)
                        * inverse_document_frequency(term, &processed, corpus_size)
                })
                .sum();

            let mut chunk = chunk.clone();
            chunk.metadata.semantic_score = Some(score);
            ScoredChunk { chunk, score }
        })
        .collect();

    // stable sort: 동점은 코퍼스 순서 유지
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// 단어 빈도: 전처리 단어 목록에서 term의 비율
fn term_frequency(term: &str, words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let occurrences = words.iter().filter(|&&w| w == term).count();
    occurrences as f64 / words.len() as f64
}

/// 역문서 빈도: 부분 문자열 포함 기준 df로 계산
fn inverse_document_frequency(term: &str, processed: &[String], corpus_size: f64) -> f64 {
    let df = processed.iter().filter(|p| p.contains(term)).count();
    (corpus_size / (df.max(1)) as f64).ln()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::chunker::ChunkMetadata;

    fn chunk(content: &str, index: usize) -> DocumentChunk {
        DocumentChunk {
            content: content.to_string(),
            index,
            source: "test.txt".to_string(),
            metadata: ChunkMetadata::default(),
        }
    }

    fn corpus() -> Vec<DocumentChunk> {
        vec![
            chunk(
                "Python is great for data science. Python powers data science work everywhere.",
                0,
            ),
            chunk("JavaScript rules web development and browser scripting.", 1),
            chunk(
                "Python is great for data science. Python powers data science work everywhere.",
                2,
            ),
        ]
    }

    #[test]
    fn test_ranking_prefers_matching_content() {
        let results = find_relevant_chunks(&corpus(), "Python data science", 3);
        assert_eq!(results.len(), 3);

        let top = results[0].chunk.content.to_lowercase();
        assert!(top.contains("python"));
        assert!(top.contains("data science"));
        assert!(results[0].score > results[2].score || results[0].score > 0.0);
        // 자바스크립트 청크가 1위가 아님
        assert!(!results[0].chunk.content.contains("JavaScript"));
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let results = find_relevant_chunks(&corpus(), "Python data science", 3);
        // 청크 0과 2는 내용이 같아 동점 — 원래 순서 유지
        assert_eq!(results[0].chunk.index, 0);
        assert_eq!(results[1].chunk.index, 2);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let chunks = corpus();
        let a = find_relevant_chunks(&chunks, "web development", 3);
        let b = find_relevant_chunks(&chunks, "web development", 3);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.chunk.index, y.chunk.index);
            assert_eq!(x.chunk.content, y.chunk.content);
            assert_eq!(x.score, y.score);
        }
    }

    #[test]
    fn test_empty_corpus() {
        let results = find_relevant_chunks(&[], "anything", 3);
        assert!(results.is_empty());
    }

    #[test]
    fn test_limit_caps_results() {
        let results = find_relevant_chunks(&corpus(), "Python", 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_degenerate_query_returns_corpus_prefix() {
        // 전부 2자 이하 단어 → 쿼리 텀 없음 → 스코어 0, 코퍼스 순서
        let results = find_relevant_chunks(&corpus(), "a an it", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.index, 0);
        assert_eq!(results[1].chunk.index, 1);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_semantic_score_populated_on_copy() {
        let chunks = corpus();
        let results = find_relevant_chunks(&chunks, "Python", 3);

        for result in &results {
            assert_eq!(result.chunk.metadata.semantic_score, Some(result.score));
        }
        // 코퍼스 원본은 변경되지 않음
        assert!(chunks.iter().all(|c| c.metadata.semantic_score.is_none()));
    }

    #[test]
    fn test_idf_zero_when_term_everywhere() {
        let processed: Vec<String> =
            vec!["python data".to_string(), "python web".to_string()];
        let idf = inverse_document_frequency("python", &processed, 2.0);
        assert!(idf.abs() < f64::EPSILON);

        // 한 청크에만 있으면 ln(2)
        let idf = inverse_document_frequency("data", &processed, 2.0);
        assert!((idf - 2.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_term_frequency() {
        let words = vec!["python", "data", "python", "science"];
        assert!((term_frequency("python", &words) - 0.5).abs() < 1e-9);
        assert_eq!(term_frequency("rust", &words), 0.0);
        assert_eq!(term_frequency("python", &[]), 0.0);
    }
}
