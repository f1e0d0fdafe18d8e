use serde::Serialize;
use std::fmt;
use syn_compare::{AccuracyScores, PairwiseScores};

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Report {
    /// Two complete annotations compared sentence by sentence.
    Pair {
        files: [String; 2],
        sentences: usize,
        scores: AccuracyScores,
    },
    /// Several annotators, aggregated from per-document files.
    Directories {
        annotators: Vec<String>,
        sentences: usize,
        scores: PairwiseScores,
    },
}

fn write_scores(f: &mut fmt::Formatter<'_>, scores: &AccuracyScores) -> fmt::Result {
    writeln!(f, "UAS: {}", scores.uas)?;
    writeln!(f, "LAS: {}", scores.las)?;
    writeln!(f, "lbl: {}", scores.lbl)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Pair { scores, .. } => write_scores(f, scores),
            Report::Directories { scores, .. } => {
                write_scores(f, &scores.scores)?;
                if scores.ignored > 0 {
                    writeln!(f, "Ignored {} sentences in accuracy computation", scores.ignored)?;
                }
                Ok(())
            }
        }
    }
}
