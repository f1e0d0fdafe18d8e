mod report;

use anyhow::{bail, Context};
use clap::Parser;
use report::Report;
use std::path::PathBuf;
use syn_aggregate::{aggregate_by_directory, ConllFormat};
use syn_compare::{compare_corpora, pairwise_compare, CompareError};
use syn_protocol::Corpus;

#[derive(Parser)]
#[command(author, version, about = "Attachment and label agreement between dependency annotations")]
struct Cli {
    /// Two CoNLL-X files, or with --dirs one directory per annotator
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Aggregate per-document files from annotator directories
    #[arg(long)]
    dirs: bool,

    /// Extension of the per-document files in --dirs mode
    #[arg(long, value_name = "EXT", default_value = "conll")]
    extension: String,

    /// Reject sentences whose heads form a cycle
    #[arg(long)]
    strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log progress (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn check_trees(corpus: &Corpus) -> anyhow::Result<()> {
    for (index, slot) in corpus.iter().enumerate() {
        if let Some(sentence) = slot.as_present() {
            sentence
                .check_acyclic()
                .with_context(|| format!("{}: sentence {} is not a tree", corpus.name, index + 1))?;
        }
    }
    Ok(())
}

fn compare_files(cli: &Cli) -> anyhow::Result<Report> {
    let [a, b] = cli.paths.as_slice() else {
        bail!("expected exactly two files to compare, got {}", cli.paths.len());
    };

    let corpus_a = syn_conll::read_corpus(a)?;
    let corpus_b = syn_conll::read_corpus(b)?;
    if cli.strict {
        check_trees(&corpus_a)?;
        check_trees(&corpus_b)?;
    }

    if corpus_a.len() != corpus_b.len() {
        bail!("Corpora have different lengths ({} vs. {})", corpus_a.len(), corpus_b.len());
    }

    let scores = compare_corpora(&corpus_a, &corpus_b)
        .with_context(|| format!("comparing {} with {}", a.display(), b.display()))?;

    Ok(Report::Pair {
        files: [corpus_a.name, corpus_b.name],
        sentences: corpus_a.slots.len(),
        scores,
    })
}

fn compare_directories(cli: &Cli) -> anyhow::Result<Report> {
    let corpora = aggregate_by_directory(&cli.paths, &ConllFormat::new(cli.extension.as_str()))?;
    if cli.strict {
        for corpus in &corpora {
            check_trees(corpus)?;
        }
    }

    let scores = match pairwise_compare(&corpora) {
        Err(CompareError::Empty { ignored }) if ignored > 0 => {
            bail!("Ignored {} sentences in accuracy computation; nothing left to score", ignored)
        }
        result => result.context("pairwise comparison")?,
    };

    Ok(Report::Directories {
        sentences: corpora.first().map_or(0, Corpus::len),
        annotators: corpora.into_iter().map(|corpus| corpus.name).collect(),
        scores,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let report = if cli.dirs {
        compare_directories(&cli)?
    } else {
        compare_files(&cli)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SENTENCE: &str = "1\ta\t_\t_\t_\t_\t0\troot\t_\t_\n2\tb\t_\t_\t_\t_\t1\tobj\t_\t_\n\n";
    const CYCLE: &str = "1\ta\t_\t_\t_\t_\t2\troot\t_\t_\n2\tb\t_\t_\t_\t_\t1\tobj\t_\t_\n\n";

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compare_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.conll");
        let b = dir.path().join("b.conll");
        fs::write(&a, SENTENCE).unwrap();
        fs::write(&b, SENTENCE).unwrap();

        let cli = Cli::parse_from(["syn-agreement", a.to_str().unwrap(), b.to_str().unwrap()]);
        match compare_files(&cli).unwrap() {
            Report::Pair { scores, sentences, .. } => {
                assert_eq!(sentences, 1);
                assert_eq!(scores.uas, 1.0);
            }
            other => panic!("Expected a pair report, got {:?}", other),
        }
    }

    #[test]
    fn test_different_lengths_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.conll");
        let b = dir.path().join("b.conll");
        fs::write(&a, SENTENCE.repeat(2)).unwrap();
        fs::write(&b, SENTENCE).unwrap();

        let cli = Cli::parse_from(["syn-agreement", a.to_str().unwrap(), b.to_str().unwrap()]);
        let err = compare_files(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Corpora have different lengths"));
    }

    #[test]
    fn test_strict_rejects_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.conll");
        fs::write(&a, CYCLE).unwrap();

        let lenient = Cli::parse_from(["syn-agreement", a.to_str().unwrap(), a.to_str().unwrap()]);
        assert!(compare_files(&lenient).is_ok());

        let strict = Cli::parse_from(["syn-agreement", "--strict", a.to_str().unwrap(), a.to_str().unwrap()]);
        assert!(compare_files(&strict).is_err());
    }

    #[test]
    fn test_directories_mode() {
        let root = tempfile::tempdir().unwrap();
        let mut args = vec!["syn-agreement".to_string(), "--dirs".to_string()];
        for name in ["ann1", "ann2"] {
            let dir = root.path().join(name);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join(format!("doc1{}.conll", name)), SENTENCE).unwrap();
            args.push(dir.to_str().unwrap().to_string());
        }

        let cli = Cli::parse_from(args);
        match compare_directories(&cli).unwrap() {
            Report::Directories { annotators, sentences, scores } => {
                assert_eq!(annotators, vec!["ann1", "ann2"]);
                assert_eq!(sentences, 1);
                assert_eq!(scores.ignored, 0);
                assert_eq!(scores.scores.las, 1.0);
            }
            other => panic!("Expected a directories report, got {:?}", other),
        }
    }

    #[test]
    fn test_directories_all_ignored_reports_count() {
        let root = tempfile::tempdir().unwrap();
        let mut args = vec!["syn-agreement".to_string(), "--dirs".to_string()];
        for (name, text) in [("ann1", SENTENCE), ("ann2", "1\ta\t_\t_\t_\t_\t0\troot\t_\t_\n\n")] {
            let dir = root.path().join(name);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join(format!("doc1{}.conll", name)), text).unwrap();
            args.push(dir.to_str().unwrap().to_string());
        }

        let cli = Cli::parse_from(args);
        let err = compare_directories(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Ignored 1 sentences in accuracy computation"));
    }
}
