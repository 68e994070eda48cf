//! Property-style checks on RRF fusion: commutativity, determinism, and
//! rank-only sensitivity.

use rankfuse_core::types::{Candidate, ChunkRecord};
use rankfuse_fusion::{fuse, RrfConfig};

fn candidate(chunk_id: i64, score: f32) -> Candidate {
    Candidate::from_record(
        ChunkRecord {
            chunk_id,
            document_id: chunk_id / 10,
            content: format!("content of chunk {chunk_id}"),
            source_title: Some(format!("doc {}", chunk_id / 10)),
            source_url: None,
        },
        score,
    )
}

fn list(ids_and_scores: &[(i64, f32)]) -> Vec<Candidate> {
    ids_and_scores
        .iter()
        .map(|(id, s)| candidate(*id, *s))
        .collect()
}

#[test]
fn fusion_is_commutative_in_its_lists() {
    let a = list(&[(11, 9.0), (12, 7.0), (13, 5.0), (14, 2.0)]);
    let b = list(&[(13, 0.95), (11, 0.90), (15, 0.60)]);
    let config = RrfConfig::default();

    let ab = fuse(&a, &b, 10, &config);
    let ba = fuse(&b, &a, 10, &config);

    assert_eq!(ab.len(), ba.len());
    for (x, y) in ab.iter().zip(ba.iter()) {
        assert_eq!(x.candidate.chunk_id, y.candidate.chunk_id);
        assert!((x.fused_score - y.fused_score).abs() < 1e-12);
    }
}

#[test]
fn fusion_depends_on_ranks_not_scores() {
    let config = RrfConfig::default();
    let a1 = list(&[(1, 100.0), (2, 50.0)]);
    let a2 = list(&[(1, 0.2), (2, 0.1)]);
    let b = list(&[(2, 0.9), (1, 0.4)]);

    let first = fuse(&a1, &b, 10, &config);
    let second = fuse(&a2, &b, 10, &config);
    for (x, y) in first.iter().zip(second.iter()) {
        assert_eq!(x.candidate.chunk_id, y.candidate.chunk_id);
        assert!((x.fused_score - y.fused_score).abs() < 1e-12);
    }
}

#[test]
fn repeated_fusion_is_deterministic() {
    let a = list(&[(7, 3.0), (8, 2.0), (9, 1.0)]);
    let b = list(&[(9, 0.8), (7, 0.7), (10, 0.6)]);
    let config = RrfConfig { k: 10.0 };

    let baseline: Vec<i64> = fuse(&a, &b, 10, &config)
        .iter()
        .map(|f| f.candidate.chunk_id)
        .collect();
    for _ in 0..50 {
        let run: Vec<i64> = fuse(&a, &b, 10, &config)
            .iter()
            .map(|f| f.candidate.chunk_id)
            .collect();
        assert_eq!(run, baseline);
    }
}

#[test]
fn dual_source_candidates_keep_both_ranks() {
    let a = list(&[(1, 2.0), (2, 1.0)]);
    let b = list(&[(2, 0.9), (3, 0.8)]);
    let fused = fuse(&a, &b, 10, &RrfConfig::default());

    let two = fused
        .iter()
        .find(|f| f.candidate.chunk_id == 2)
        .expect("present");
    assert_eq!(two.lexical_rank, Some(2));
    assert_eq!(two.semantic_rank, Some(1));
    assert_eq!(fused[0].candidate.chunk_id, 2, "consensus chunk wins");

    let three = fused
        .iter()
        .find(|f| f.candidate.chunk_id == 3)
        .expect("present");
    assert_eq!(three.lexical_rank, None);
    assert_eq!(three.semantic_rank, Some(2));
}

#[test]
fn empty_lists_fuse_to_empty() {
    let fused = fuse(&[], &[], 10, &RrfConfig::default());
    assert!(fused.is_empty());
}
