use std::env;
use std::sync::Arc;

use rankfuse_core::config::Settings;
use rankfuse_core::gate::AdmissionGate;
use rankfuse_core::types::{ChunkRecord, QueryMode};
use rankfuse_embed::{default_embedder, EmbeddingProvider};
use rankfuse_hybrid::HybridQueryEngine;
use rankfuse_lexical::{LexicalRetriever, MemoryTextStore};
use rankfuse_rerank::{Reranker, TokenOverlapEncoder};
use rankfuse_semantic::{MemoryVectorStore, SemanticRetriever};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <query|rerank> \"<text>\" [mode] [k]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn fixture_corpus() -> Vec<ChunkRecord> {
    let texts = [
        (1, 1, "Starting tomato seedlings indoors six weeks before the last frost"),
        (2, 1, "Transplanting tomato seedlings into beds amended with compost"),
        (3, 2, "Raising laying hens through their first winter"),
        (4, 2, "Building a predator-proof run for laying hens"),
        (5, 3, "Sizing an off-grid battery bank for a small cabin"),
        (6, 3, "Wiring solar panels in series versus parallel"),
        (7, 4, "Pressure canning green beans safely at altitude"),
        (8, 4, "Fermenting vegetables without added starter cultures"),
    ];
    texts
        .iter()
        .map(|(chunk_id, document_id, content)| ChunkRecord {
            chunk_id: *chunk_id,
            document_id: *document_id,
            content: content.to_string(),
            source_title: Some(format!("Homestead notes #{document_id}")),
            source_url: Some(format!("https://notes.example/{document_id}")),
        })
        .collect()
}

fn build_engine(settings: &Settings) -> anyhow::Result<HybridQueryEngine> {
    let embedder = default_embedder(&settings.embedding);
    let entries = fixture_corpus()
        .into_iter()
        .map(|record| {
            let vector = embedder.embed(&record.content)?;
            Ok((record, vector))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(HybridQueryEngine::new(
        LexicalRetriever::new(Arc::new(MemoryTextStore::new(fixture_corpus()))),
        SemanticRetriever::new(Arc::new(MemoryVectorStore::new(entries)?)),
        EmbeddingProvider::new(embedder, AdmissionGate::new(settings.embedding.concurrency)),
        settings,
    ))
}

fn parse_mode(raw: Option<&String>) -> anyhow::Result<QueryMode> {
    match raw.map(String::as_str) {
        None | Some("hybrid") => Ok(QueryMode::Hybrid),
        Some("lexical") => Ok(QueryMode::Lexical),
        Some("semantic") => Ok(QueryMode::Semantic),
        Some(other) => anyhow::bail!("unknown mode '{other}' (lexical|semantic|hybrid)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log.level.clone())),
        )
        .init();

    let (cmd, args) = parse_args();
    let text = args.first().cloned().unwrap_or_else(|| {
        eprintln!("Usage: rankfuse {cmd} \"<text>\" [mode] [k]");
        std::process::exit(1)
    });
    let mode = parse_mode(args.get(1))?;
    let k = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => settings.query.default_k,
    };

    let engine = build_engine(&settings)?;
    match cmd.as_str() {
        "query" => {
            let response = engine.query(&text, mode, k).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "rerank" => {
            // Retrieve a wider candidate set, then let the cross-encoder
            // pick the precision top-k.
            let candidate_k = (k * 4).min(settings.rerank.max_candidates);
            let response = engine.query(&text, mode, candidate_k).await?;
            let candidates = response
                .results
                .into_iter()
                .map(|r| rankfuse_core::types::Candidate {
                    chunk_id: r.chunk_id,
                    document_id: r.document_id,
                    content: r.content,
                    score: r.original_score,
                    source_title: r.source_title,
                    source_url: r.source_url,
                })
                .collect::<Vec<_>>();
            if candidates.is_empty() {
                println!("no candidates retrieved for {text:?}");
                return Ok(());
            }

            let reranker = Reranker::new(
                Arc::new(TokenOverlapEncoder),
                AdmissionGate::new(settings.rerank.concurrency),
                settings.rerank.max_candidates,
            );
            reranker.warmup().await;
            let outcome = reranker.rerank(&text, candidates, k).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            std::process::exit(1);
        }
    }
    Ok(())
}
