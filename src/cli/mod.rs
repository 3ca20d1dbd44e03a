//! CLI 모듈
//!
//! docqa-rag CLI 명령어 정의 및 구현.
//! 인덱스를 디스크에 저장하지 않으므로 모든 명령이
//! 적재-후-실행 형태로 동작합니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::collector::CollectorConfig;
use crate::config::Config;
use crate::knowledge::{
    ChunkConfig, DocumentCorpus, ParagraphChunker, ScoredChunk, DEFAULT_QUERY_LIMIT,
};
use crate::source::FileSystemSource;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "docqa-rag")]
#[command(version, about = "문서 청킹 + TF-IDF 검색 코어", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 문서 디렉토리를 적재하고 쿼리와 관련 있는 청크 검색
    Query {
        /// 검색 쿼리
        query: String,

        /// 문서 디렉토리 (기본: DOCUMENTS_PATH 또는 ./documents)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// 결과 개수 제한
        #[arg(short, long, default_value_t = DEFAULT_QUERY_LIMIT)]
        limit: usize,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        chunking: ChunkingArgs,
    },

    /// 파일 한 개를 청킹해 경계와 메타데이터 확인
    Chunks {
        /// 대상 파일
        #[arg(short, long)]
        file: PathBuf,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        chunking: ChunkingArgs,
    },

    /// 문서 디렉토리를 적재하고 코퍼스 상태 보고
    Status {
        /// 문서 디렉토리 (기본: DOCUMENTS_PATH 또는 ./documents)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        chunking: ChunkingArgs,
    },
}

/// 청킹 파라미터 (모든 명령 공통)
#[derive(Args)]
pub struct ChunkingArgs {
    /// 최소 청크 크기 (문자)
    #[arg(long, default_value_t = ChunkConfig::default().min_characters)]
    pub min_chunk_size: usize,

    /// 최대 청크 크기 (문자)
    #[arg(long, default_value_t = ChunkConfig::default().max_characters)]
    pub max_chunk_size: usize,

    /// 직전 청크와의 최대 오버랩 (문자, 0이면 비활성)
    #[arg(long, default_value_t = ChunkConfig::default().overlap_characters)]
    pub max_overlap: usize,
}

impl ChunkingArgs {
    fn to_config(&self) -> ChunkConfig {
        ChunkConfig {
            min_characters: self.min_chunk_size,
            max_characters: self.max_chunk_size,
            overlap_characters: self.max_overlap,
        }
    }
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Query {
            query,
            dir,
            limit,
            json,
            chunking,
        } => cmd_query(&query, dir, limit, json, &chunking).await,
        Commands::Chunks {
            file,
            json,
            chunking,
        } => cmd_chunks(&file, json, &chunking).await,
        Commands::Status { dir, chunking } => cmd_status(dir, &chunking).await,
    }
}

/// 코퍼스 구성 (파일시스템 소스 + 설정된 확장자)
fn build_corpus(chunk_config: ChunkConfig, extension: &str) -> DocumentCorpus {
    let collector = CollectorConfig {
        extension: extension.to_string(),
        ..Default::default()
    };
    DocumentCorpus::with_source(
        Box::new(ParagraphChunker::new(chunk_config)),
        Box::new(FileSystemSource::new(collector)),
    )
}

fn resolve_dir(dir: Option<PathBuf>, config: &Config) -> PathBuf {
    dir.unwrap_or_else(|| config.documents_path.clone())
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 검색 명령어 (query)
async fn cmd_query(
    query: &str,
    dir: Option<PathBuf>,
    limit: usize,
    json: bool,
    chunking: &ChunkingArgs,
) -> Result<()> {
    let config = Config::from_env();
    let dir = resolve_dir(dir, &config);

    let mut corpus = build_corpus(chunking.to_config(), &config.text_extension);
    corpus
        .load_documents_from_directory(&dir)
        .await
        .with_context(|| format!("문서 디렉토리 적재 실패: {}", dir.display()))?;

    if corpus.chunk_count() == 0 {
        println!("[!] 적재된 청크가 없습니다: {}", dir.display());
        return Ok(());
    }

    let results = corpus.find_relevant_chunks(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!(
        "[OK] \"{}\" 검색 결과 ({}건, 코퍼스 청크 {}개):\n",
        query,
        results.len(),
        corpus.chunk_count()
    );

    for (i, result) in results.iter().enumerate() {
        print_result(i + 1, result);
    }

    Ok(())
}

fn print_result(rank: usize, result: &ScoredChunk) {
    let chunk = &result.chunk;
    println!(
        "{}. [점수: {:.4}] {} #{}",
        rank, result.score, chunk.source, chunk.index
    );

    if !chunk.metadata.key_terms.is_empty() {
        println!("   키 텀: {}", chunk.metadata.key_terms.join(", "));
    }

    println!("   내용: {}", truncate_text(&chunk.content, 200));
    println!();
}

/// 청킹 확인 명령어 (chunks)
async fn cmd_chunks(file: &PathBuf, json: bool, chunking: &ChunkingArgs) -> Result<()> {
    let config = Config::from_env();

    let mut corpus = build_corpus(chunking.to_config(), &config.text_extension);
    corpus
        .load_document(file)
        .await
        .with_context(|| format!("문서 적재 실패: {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(corpus.chunks())?);
        return Ok(());
    }

    if corpus.chunk_count() == 0 {
        println!("[!] 청크가 생성되지 않았습니다 (최소 크기 미달)");
        return Ok(());
    }

    println!("[OK] {} → 청크 {}개:\n", file.display(), corpus.chunk_count());

    for chunk in corpus.chunks() {
        let meta = &chunk.metadata;
        println!(
            "  #{:<3} {} chars | 문단 {} | 문장 {} | prev {} | next {}",
            chunk.index,
            chunk.content.len(),
            meta.paragraph_count,
            meta.sentence_count,
            format_link(meta.previous_chunk_id),
            format_link(meta.next_chunk_id),
        );
        if !meta.key_terms.is_empty() {
            println!("       키 텀: {}", meta.key_terms.join(", "));
        }
        println!("       {}", truncate_text(&chunk.content, 120));
        println!();
    }

    Ok(())
}

fn format_link(id: Option<usize>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())
}

/// 상태 명령어 (status)
async fn cmd_status(dir: Option<PathBuf>, chunking: &ChunkingArgs) -> Result<()> {
    println!("docqa-rag v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = Config::from_env();
    let dir = resolve_dir(dir, &config);

    println!("[*] 문서 디렉토리: {}", dir.display());
    println!("[*] 수집 확장자: .{}", config.text_extension);

    let mut corpus = build_corpus(chunking.to_config(), &config.text_extension);
    corpus
        .load_documents_from_directory(&dir)
        .await
        .with_context(|| format!("문서 디렉토리 적재 실패: {}", dir.display()))?;

    let stats = corpus.stats();
    println!("[OK] 문서: {}건", stats.document_count);
    println!("[OK] 청크: {}개", stats.chunk_count);
    println!("     총 콘텐츠: {}", format_bytes(stats.total_content_bytes));

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 텍스트 자르기 (UTF-8 안전)
fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace('\n', " ").replace('\r', "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_chars {
        cleaned.to_string()
    } else {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// 바이트 크기 포맷팅
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("hello\nworld", 20), "hello world");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
    }

    #[test]
    fn test_format_link() {
        assert_eq!(format_link(Some(3)), "3");
        assert_eq!(format_link(None), "-");
    }

    #[test]
    fn test_chunking_args_to_config() {
        let args = ChunkingArgs {
            min_chunk_size: 10,
            max_chunk_size: 50,
            max_overlap: 5,
        };
        let config = args.to_config();
        assert_eq!(config.min_characters, 10);
        assert_eq!(config.max_characters, 50);
        assert_eq!(config.overlap_characters, 5);
    }
}
