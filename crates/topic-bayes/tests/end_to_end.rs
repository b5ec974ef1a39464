use std::io::Write;

use topic_bayes::{Classifier, CorpusReader, Document, FrequencyModel, LoadError, TokenizerParams};

const TRAIN: &str = r#"sport,"The home team scored twice before halftime, and the coach praised the defence."
sport,"A thrilling final: the league leaders won after extra time!"
sport,"Injury worries for the captain ahead of the cup match."
business,"Shares in the bank rallied after quarterly profits beat forecasts."
business,"Investors fear rising interest rates will hurt company profits."
business,"The market closed higher as retail sales figures improved."
politics,"The minister defended the budget during a heated parliament debate."
politics,"Voters head to the polls in a closely fought election."
politics,"Opposition leaders demand an inquiry into government spending."
"#;

const TEST: &str = r#"sport,"The coach expects the team to win the next match."
business,"Bank shares and company profits rose as the market recovered."
politics,"Parliament will debate the election results and the budget."
"#;

fn write_corpus(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn train_and_evaluate_from_files() {
    let train = write_corpus(TRAIN);
    let test = write_corpus(TEST);
    let reader = CorpusReader::new();

    let training = reader.read_path(train.path()).unwrap();
    let held_out = reader.read_path(test.path()).unwrap();
    assert_eq!(training.len(), 9);
    assert_eq!(held_out.len(), 3);

    let classifier = Classifier::fit(&training, reader.tokenizer().clone());
    let model = classifier.model();
    assert_eq!(model.num_labels(), 3);
    for label in model.labels() {
        assert_eq!(model.document_count(label), 3);
        let table = model.word_counts(label).unwrap();
        assert_eq!(model.total_word_count(label), table.values().sum::<usize>());
    }

    let evaluation = classifier.evaluate(&held_out);
    assert_eq!(evaluation.hit_count(), 3, "misses: {:?}", evaluation.misses());
    assert_eq!(evaluation.miss_count(), 0);
}

#[test]
fn predictions_are_distributions_over_trained_labels() {
    let training = CorpusReader::new().read(TRAIN.as_bytes()).unwrap();
    let classifier = Classifier::fit(&training, TokenizerParams::default());

    for text in ["completely unrelated words", "goal", "", "profits profits profits"] {
        let prediction = classifier.predict(text);
        assert_eq!(prediction.len(), 3);
        let total = prediction.iter().map(|(_, p)| p).sum::<f64>();
        assert!((total - 1.0).abs() < 1e-9, "{text:?} sums to {total}");
        assert!(prediction.iter().all(|(_, p)| p > 0.0 && p < 1.0));
    }
}

#[test]
fn model_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrequencyModel>();
    assert_send_sync::<Classifier>();

    let training = CorpusReader::new().read(TRAIN.as_bytes()).unwrap();
    let classifier = Classifier::fit(&training, TokenizerParams::default());
    let texts = vec!["the election debate"; 64];

    let labels = classifier.classify_batch(&texts);
    assert!(labels.iter().all(|label| label.as_deref() == Some("politics")));
}

#[test]
fn large_corpus_trains_like_small_one() {
    let base = CorpusReader::new().read(TRAIN.as_bytes()).unwrap();
    let repeated = base
        .iter()
        .cycle()
        .take(base.len() * 200)
        .cloned()
        .collect::<Vec<Document>>();

    let small = FrequencyModel::fit(&base);
    let large = FrequencyModel::fit(&repeated);
    assert_eq!(small.vocabulary_size(), large.vocabulary_size());
    for label in small.labels() {
        assert_eq!(large.total_word_count(label), small.total_word_count(label) * 200);
        assert_eq!(large.document_count(label), small.document_count(label) * 200);
    }
}

#[test]
fn malformed_corpus_is_rejected() {
    let corpus = format!("{TRAIN}this line has no label column\n");
    let err = CorpusReader::new().read(corpus.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MalformedRecord { line: 10, .. }), "{err}");
}

#[test]
fn label_with_only_short_words_never_wins() {
    let corpus = "sport,\"great goal from the team\"\nsport,\"team wins league\"\nmisc,\"a b c\"\n";
    let reader = CorpusReader::new();
    let training = reader.read(corpus.as_bytes()).unwrap();
    assert_eq!(training.len(), 3);
    assert!(training[2].is_empty());

    let model = FrequencyModel::fit(&training);
    assert_eq!(model.labels().collect::<Vec<_>>(), vec!["sport"]);
    let prediction = model.predict(&["election"]);
    assert_eq!(prediction.top_label(), Some("sport"));
    assert_eq!(prediction.probability("misc"), None);
}
