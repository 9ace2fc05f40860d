use authorship_vectorizer::features::FeatureFamily;
use authorship_vectorizer::{
    AnalysisConfig, AuthorshipAnalyzer, CandidateCorpus, SnowballLemmatizer, TargetDocument, TextNormalizer,
    Tokenizer, WhitespaceTokenizer,
};
use rstest::rstest;

const TARGET: &str = "honestly i think the build is broken again, can someone check the deploy logs? \
                      <@1234> said it works on their machine lol https://ci.example.com/run/42";

fn corpus_with_twins() -> CandidateCorpus {
    let mut corpus = CandidateCorpus::new();
    corpus.push_message("1001", "We should schedule the quarterly review for Tuesday afternoon.");
    corpus.push_message("1002", TARGET);
    corpus.push_message("1003", "Pizza tonight? I'm buying if anyone wants pepperoni.");
    corpus.push_message("1004", TARGET);
    corpus
}

#[test]
fn test_identical_writing_ranks_top_with_snowball_model() {
    let tokenizer = SnowballLemmatizer::english();
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, AnalysisConfig::default());
    let hits = analyzer
        .run(&corpus_with_twins(), &TargetDocument::new(TARGET))
        .unwrap();

    assert_eq!(hits.len(), 4);
    let top: Vec<&str> = hits.top(2).iter().map(|h| h.key.as_str()).collect();
    assert_eq!(top, vec!["1002", "1004"]);
    for hit in hits.top(2) {
        assert!((hit.score - 1.0).abs() < 1e-9, "score was {}", hit.score);
    }
    for hit in &hits.list[2..] {
        assert!(hit.score < 0.999);
        assert!((0.0..=1.0).contains(&hit.score));
    }
}

#[test]
fn test_scores_are_sorted_descending() {
    let tokenizer = SnowballLemmatizer::english();
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, AnalysisConfig::default());
    let hits = analyzer
        .run(&corpus_with_twins(), &TargetDocument::new(TARGET))
        .unwrap();
    assert!(hits.list.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_message_count_does_not_change_score() {
    let tokenizer = WhitespaceTokenizer::new(&["the", "is", "a"]);
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, AnalysisConfig::default());

    let mut one = CandidateCorpus::new();
    one.push_message("x", "the cat is a good cat");
    one.push_message("y", "the dog is a loud dog");
    let hits_one = analyzer.run(&one, &TargetDocument::new("the cat is a cat")).unwrap();

    let mut two = CandidateCorpus::new();
    two.insert(authorship_vectorizer::Candidate {
        id: "x".to_string(),
        text: "the cat is a good cat".to_string(),
        message_count: 999,
    });
    two.push_message("y", "the dog is a loud dog");
    let hits_two = analyzer.run(&two, &TargetDocument::new("the cat is a cat")).unwrap();

    let score = |hits: &authorship_vectorizer::Hits<String>, id: &str| {
        hits.iter().find(|h| h.key == id).map(|h| h.score).unwrap()
    };
    assert_eq!(score(&hits_one, "x"), score(&hits_two, "x"));
    assert_eq!(hits_two.iter().find(|h| h.key == "x").unwrap().message_count, 999);
}

#[rstest]
#[case("check `inline` and ```block``` now", &["[inline_code]", "[code_block]"])]
#[case("hey <@!42> look <:pog:123>", &["[mention]", "[emoji]"])]
#[case("see http://a.b/c and https://d.e", &["[url]"])]
fn test_normalizer_then_tokenizer_keep_placeholders(#[case] raw: &str, #[case] expected: &[&str]) {
    let cleaned = TextNormalizer::new().normalize(raw);
    assert!(!cleaned.contains('`'));
    let tokens = SnowballLemmatizer::english().tokenize(&cleaned);
    for placeholder in expected {
        assert!(tokens.iter().any(|t| t == placeholder), "{placeholder} missing from {tokens:?}");
    }
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(3, 4)]
fn test_matrix_width_matches_families(#[case] char_min_df: usize, #[case] word_min_df: usize) {
    let tokenizer = SnowballLemmatizer::english();
    let config = AnalysisConfig {
        char_min_df,
        word_min_df,
        ..Default::default()
    };
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, config);
    let (_, space) = analyzer
        .analyze(&corpus_with_twins(), &TargetDocument::new(TARGET))
        .unwrap();

    let matrix = &space.matrix;
    assert_eq!(matrix.n_rows(), 5);
    assert!(matrix.rows().iter().all(|r| r.len() == matrix.n_cols()));
    let fw = matrix.columns_of(FeatureFamily::FunctionWord).unwrap();
    assert_eq!(fw.end, matrix.n_cols());
    assert_eq!(fw.len(), space.function_words.len());
    let chars = matrix.columns_of(FeatureFamily::CharNgram).unwrap();
    assert_eq!(chars.start, 0);
    assert_eq!(chars.len(), space.char_ngrams.n_features());
}

#[test]
fn test_noise_only_target_scores_zero_everywhere() {
    let tokenizer = SnowballLemmatizer::english();
    let analyzer = AuthorshipAnalyzer::new(&tokenizer, AnalysisConfig::default());

    let mut corpus = CandidateCorpus::new();
    corpus.push_message("a", "the meeting is moved to the afternoon");
    corpus.push_message("b", "the release is moving to the evening");
    corpus.push_message("c", "the standup is moved to the morning");

    let hits = analyzer.run(&corpus, &TargetDocument::new("!!! 123")).unwrap();

    assert_eq!(hits.len(), 3);
    for hit in hits.iter() {
        assert!(!hit.score.is_nan());
        assert_eq!(hit.score, 0.0, "{} scored {}", hit.key, hit.score);
    }
    let keys: Vec<&str> = hits.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}
