use search_server::{
    compare_documents, Document, DocumentStatus, Error, ExecutionPolicy, SearchServer,
    MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON,
};

fn ids(documents: &[Document]) -> Vec<i32> {
    documents.iter().map(|document| document.id).collect()
}

fn assert_ranked(documents: &[Document]) {
    for pair in documents.windows(2) {
        let (lhs, rhs) = (&pair[0], &pair[1]);
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            assert!(lhs.rating >= rhs.rating, "{lhs} before {rhs}");
        } else {
            assert!(lhs.relevance > rhs.relevance, "{lhs} before {rhs}");
        }
    }
}

#[test]
fn stop_word_only_query_finds_nothing() {
    let mut server = SearchServer::new("in the").unwrap();
    server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    assert!(server.find_top_documents("in").unwrap().is_empty());
    assert_eq!(ids(&server.find_top_documents("cat").unwrap()), vec![42]);
}

#[test]
fn relevance_follows_tf_idf() {
    let mut server = SearchServer::new("").unwrap();
    server.add_document(1, "white cat and fashion collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(3, "well-groomed dog expressive eyes", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    let found = server.find_top_documents("fluffy well-groomed cat").unwrap();
    assert_eq!(ids(&found), vec![2, 3, 1]);
    for (document, expected) in found.iter().zip([0.65, 0.27, 0.08]) {
        assert!((document.relevance - expected).abs() < 0.01, "{document}");
        assert_eq!(document.rating, 2);
    }
}

#[test]
fn minus_word_excludes_document() {
    let mut server = SearchServer::new("").unwrap();
    server.add_document(1, "black white red yellow", DocumentStatus::Actual, &[1]).unwrap();
    server.add_document(2, "black blue green purple", DocumentStatus::Actual, &[1]).unwrap();

    assert_eq!(ids(&server.find_top_documents("black -blue").unwrap()), vec![1]);
    assert_eq!(
        server.match_document("black -blue", 2).unwrap(),
        (Vec::new(), DocumentStatus::Actual)
    );
    assert_eq!(
        server.match_document("black -blue", 1).unwrap(),
        (vec!["black".to_string()], DocumentStatus::Actual)
    );
}

#[test]
fn id_can_be_reused_after_removal() {
    let mut server = SearchServer::new("").unwrap();
    server.add_document(1, "tiny grey mouse", DocumentStatus::Actual, &[4]).unwrap();
    assert_eq!(
        server.add_document(1, "tiny grey mouse", DocumentStatus::Actual, &[4]),
        Err(Error::InvalidDocumentId(1))
    );

    server.remove_document(1);
    assert_eq!(server.document_count(), 0);
    assert!(server.find_top_documents("mouse").unwrap().is_empty());

    server.add_document(1, "big brown bear", DocumentStatus::Banned, &[2]).unwrap();
    assert_eq!(server.document_count(), 1);
    assert!(server.find_top_documents("mouse").unwrap().is_empty());
    assert_eq!(
        ids(&server.find_top_documents_by_status("bear", DocumentStatus::Banned).unwrap()),
        vec![1]
    );
}

#[test]
fn removal_is_idempotent() {
    let mut server = SearchServer::new("").unwrap();
    server.add_document(1, "red fox", DocumentStatus::Actual, &[1]).unwrap();
    server.add_document(2, "red deer", DocumentStatus::Actual, &[1]).unwrap();

    server.remove_document_with(ExecutionPolicy::Parallel, 1);
    let once = server.clone();
    server.remove_document(1);
    server.remove_document_with(ExecutionPolicy::Parallel, 1);

    assert_eq!(server.document_count(), once.document_count());
    assert!(server.word_frequencies(1).is_empty());
    assert!(server.find_top_documents("fox").unwrap().is_empty());
    assert_eq!(ids(&server.find_top_documents("red").unwrap()), vec![2]);
    assert_eq!(
        server.match_document("red", 1),
        Err(Error::DocumentNotFound(1))
    );
}

fn corpus() -> SearchServer {
    let mut server = SearchServer::new("a the of").unwrap();
    let words = ["river", "stone", "moss", "cloud", "birch", "otter", "heron", "fern"];
    for id in 0..60 {
        let text: Vec<&str> = (0..6)
            .map(|offset| words[(id as usize * 7 + offset * offset) % words.len()])
            .collect();
        let status = match id % 4 {
            3 => DocumentStatus::Irrelevant,
            _ => DocumentStatus::Actual,
        };
        server
            .add_document(id, &text.join(" "), status, &[id, id + 1, id + 2])
            .unwrap();
    }
    server
}

#[test]
fn results_are_capped_and_ranked() {
    let server = corpus();
    for query in ["river", "stone moss -fern", "cloud birch otter heron", "the river of stone"] {
        let found = server.find_top_documents(query).unwrap();
        assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
        assert_ranked(&found);

        let mut sorted = found.clone();
        sorted.sort_by(compare_documents);
        assert_eq!(ids(&sorted), ids(&found));
    }
}

#[test]
fn policies_agree() {
    let server = corpus().with_shard_count(3);
    for query in ["river", "stone moss -fern", "cloud birch otter heron -river", "-moss"] {
        let sequential = server
            .find_top_documents_with(ExecutionPolicy::Sequential, query, |id, _, rating| id % 2 == 0 || rating > 2)
            .unwrap();
        let parallel = server
            .find_top_documents_with(ExecutionPolicy::Parallel, query, |id, _, rating| id % 2 == 0 || rating > 2)
            .unwrap();
        assert_eq!(ids(&sequential), ids(&parallel), "query {query:?}");
        for (lhs, rhs) in sequential.iter().zip(&parallel) {
            assert!((lhs.relevance - rhs.relevance).abs() < 1e-12);
            assert_eq!(lhs.rating, rhs.rating);
        }

        for id in server.iter().take(10) {
            assert_eq!(
                server.match_document_with(ExecutionPolicy::Sequential, query, id),
                server.match_document_with(ExecutionPolicy::Parallel, query, id)
            );
        }
    }
}

#[test]
fn frequencies_sum_to_one() {
    let server = corpus();
    for id in &server {
        let total: f64 = server.word_frequencies(id).values().sum();
        assert!((total - 1.0).abs() < 1e-6, "document {id}");
    }
}
