use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use pfx_core::index::{BuildError, BuildStrategy, IndexBuilder, IndexStats, PrefixIndex};
use pfx_core::settings::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Word list used by `pfxtool demo`.
pub const DEMO_WORDS: &[&str] = &[
    "apple",
    "application",
    "apply",
    "apricot",
    "banana",
    "band",
    "bandana",
    "bank",
    "cat",
    "car",
    "card",
    "care",
    "careful",
    "dog",
    "door",
    "double",
    "elephant",
    "eleven",
    "elevator",
];

const DEMO_QUERIES: &[&str] = &["app", "ban", "car", "el", "z", "do"];
const DEMO_CASE_QUERIES: &[&str] = &["APP", "Car", "EL"];
const DEMO_SAMPLE_PREFIXES: &[&str] = &["a", "ap", "app", "car", "el"];
const DEMO_LIMIT: usize = 3;

/// Read a word list: one word per line, line terminators stripped.
pub fn load_words(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let words: Vec<String> = text.lines().map(str::to_string).collect();
    debug!(path = %path.display(), words = words.len(), "loaded word list");
    Ok(words)
}

/// Build with the configured settings, optionally overriding the strategy.
pub fn build_index<S: AsRef<str>>(
    words: &[S],
    strategy: Option<BuildStrategy>,
) -> Result<PrefixIndex, BuildError> {
    let mut builder = IndexBuilder::from_settings(&settings().build);
    if let Some(strategy) = strategy {
        builder = builder.strategy(strategy);
    }
    builder.build(words)
}

fn open_index(words_file: &str, strategy: Option<BuildStrategy>) -> (Vec<String>, PrefixIndex) {
    let words = die!(
        load_words(Path::new(words_file)),
        "Error reading {words_file}: {}"
    );
    let index = die!(build_index(&words, strategy), "Error building index: {}");
    (words, index)
}

pub fn search(
    words_file: &str,
    query: &str,
    limit: Option<usize>,
    all: bool,
    json: bool,
    strategy: Option<BuildStrategy>,
) {
    let (_, index) = open_index(words_file, strategy);
    let results = if all {
        index.search(query)
    } else {
        let limit = limit.unwrap_or(settings().query.default_limit);
        index.search_with_limit(query, limit)
    };
    if json {
        println!("{}", format_results_json(&results));
    } else {
        print!("{}", format_results(&results));
    }
}

pub fn prefixes(words_file: &str, strategy: Option<BuildStrategy>) {
    let (_, index) = open_index(words_file, strategy);
    print!("{}", format_results(&index.all_prefixes()));
}

pub fn dump(words_file: &str, json: bool, strategy: Option<BuildStrategy>) {
    let (_, index) = open_index(words_file, strategy);
    let entries = index.entries();
    if json {
        println!("{}", format_dump_json(&entries));
    } else {
        print!("{}", format_dump(&entries));
    }
}

pub fn info(words_file: &str, strategy: Option<BuildStrategy>) {
    let words = die!(
        load_words(Path::new(words_file)),
        "Error reading {words_file}: {}"
    );
    let start = Instant::now();
    let index = die!(build_index(&words, strategy), "Error building index: {}");
    let elapsed = start.elapsed();
    print!("{}", format_info(words.len(), &index.stats(), elapsed));
}

pub fn demo(strategy: Option<BuildStrategy>) {
    println!("Building prefix index...");
    let index = die!(build_index(DEMO_WORDS, strategy), "Error building index: {}");
    print!("{}", format_demo(&index));
}

/// `[a, b, c]`
fn bracketed(words: &[String]) -> String {
    format!("[{}]", words.join(", "))
}

/// One word per line.
pub fn format_results(results: &[String]) -> String {
    let mut out = String::new();
    for word in results {
        out.push_str(word);
        out.push('\n');
    }
    out
}

pub fn format_results_json(results: &[String]) -> String {
    serde_json::to_string_pretty(results).expect("JSON serialization failed")
}

/// `prefix -> [words]`, prefixes padded to a common display width.
pub fn format_dump(entries: &[(String, Vec<String>)]) -> String {
    let pad_width = entries
        .iter()
        .map(|(prefix, _)| UnicodeWidthStr::width(prefix.as_str()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (prefix, words) in entries {
        let display_width = UnicodeWidthStr::width(prefix.as_str());
        out.push_str(&format!(
            "'{}'{} -> {}\n",
            prefix,
            " ".repeat(pad_width - display_width),
            bracketed(words)
        ));
    }
    out
}

pub fn format_dump_json(entries: &[(String, Vec<String>)]) -> String {
    let map: BTreeMap<&str, &Vec<String>> = entries
        .iter()
        .map(|(prefix, words)| (prefix.as_str(), words))
        .collect();
    serde_json::to_string_pretty(&map).expect("JSON serialization failed")
}

pub fn format_info(word_count: usize, stats: &IndexStats, elapsed: Duration) -> String {
    format!(
        "Words:         {}\nPrefixes:      {}\nStored values: {}\nLargest entry: {}\nBuild time:    {:.3} ms\n",
        word_count,
        stats.prefixes,
        stats.values,
        stats.longest_entry,
        elapsed.as_secs_f64() * 1000.0
    )
}

pub fn format_demo(index: &PrefixIndex) -> String {
    let mut out = format!("Index built with {} prefixes\n\n", index.len());

    for query in DEMO_QUERIES {
        out.push_str(&format!(
            "Search '{}': {}\n",
            query,
            bracketed(&index.search(query))
        ));
    }

    out.push_str(&format!("\n--- Limited Results (max {DEMO_LIMIT}) ---\n"));
    for query in DEMO_QUERIES {
        out.push_str(&format!(
            "Search '{}' (limit {}): {}\n",
            query,
            DEMO_LIMIT,
            bracketed(&index.search_with_limit(query, DEMO_LIMIT))
        ));
    }

    out.push_str("\n--- Case Insensitive Search ---\n");
    for query in DEMO_CASE_QUERIES {
        out.push_str(&format!(
            "Search '{}': {}\n",
            query,
            bracketed(&index.search(query))
        ));
    }

    out.push_str("\n--- Sample Entries ---\n");
    for prefix in DEMO_SAMPLE_PREFIXES {
        if index.contains_prefix(prefix) {
            out.push_str(&format!(
                "'{}' -> {}\n",
                prefix,
                bracketed(&index.search(prefix))
            ));
        }
    }
    out
}
