use bagofwords::{BagOfWords, RegexTokenizer, SparseVector, DEFAULT_PATTERN};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tokenizer = RegexTokenizer::new(DEFAULT_PATTERN)?.with_lowercase(true);

    let training = [
        "The quick brown fox jumps over the lazy dog.",
        "The dog sleeps; the fox runs.",
    ];

    let mut bow = BagOfWords::new()
        .with_maximum_occurrence(3)
        .with_parallelism(2)?;
    bow.learn_texts(&training, &tokenizer)?;

    println!("Vocabulary ({} words):", bow.number_of_words());
    for (code, token) in bow.codebook().iter() {
        println!("  {code:>2} -> {token}");
    }

    let queries = ["the the the the fox", "an unseen sentence"];
    let dense: Vec<Vec<i32>> = bow.transform_texts(&queries, &tokenizer)?;
    let sparse: Vec<SparseVector> = bow.transform_texts(&queries, &tokenizer)?;

    for ((query, d), s) in queries.iter().zip(&dense).zip(&sparse) {
        println!("\n{query:?}");
        println!("  dense:  {d:?}");
        println!("  sparse: {:?}", s.iter().collect::<Vec<_>>());
    }

    Ok(())
}
