use crate::error::AggregateError;
use crate::format::DocumentFormat;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use syn_protocol::{Corpus, TokenCount};

/// One annotator: a directory whose files end in the directory's own name.
#[derive(Debug, Clone)]
struct Annotator {
    dir: PathBuf,
    name: String,
}

impl Annotator {
    fn new(dir: &Path) -> Result<Self, AggregateError> {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| AggregateError::UnnamedDirectory {
                path: dir.to_path_buf(),
            })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            name,
        })
    }

    fn file_for(&self, document: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", document, self.name, extension))
    }
}

/// Document ids in `dir`: every file named `<document><annotator>.<extension>`
/// contributes its `<document>` prefix.
pub fn discover_documents(dir: &Path, annotator: &str, extension: &str) -> Result<BTreeSet<String>, AggregateError> {
    let io_error = |source| AggregateError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let suffix = format!("{}.{}", annotator, extension);

    let mut documents = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            log::debug!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        if let Some(document) = file_name.strip_suffix(&suffix) {
            documents.insert(document.to_string());
        }
    }

    log::debug!("{}: {} documents", dir.display(), documents.len());
    Ok(documents)
}

/// Number of leading positions on which every copy has the same token count.
fn leading_agreement<T: TokenCount>(copies: &[&Vec<T>]) -> usize {
    let shortest = copies.iter().map(|copy| copy.len()).min().unwrap_or(0);
    (0..shortest)
        .take_while(|&i| {
            let expected = copies[0][i].token_count();
            copies.iter().all(|copy| copy[i].token_count() == expected)
        })
        .count()
}

/// Assemble one corpus per annotator directory, aligned by document.
///
/// Documents are the sorted union of ids found in every directory. Where an
/// annotator lacks a document, its corpus gets as many gaps as the document
/// has sentences in the first directory that has it; every directory that
/// has the document must agree on that count. Corpora are returned in the
/// order of `dirs` and named after each directory.
pub fn aggregate_by_directory<F, P>(dirs: &[P], format: &F) -> Result<Vec<Corpus<F::Item>>, AggregateError>
where
    F: DocumentFormat,
    P: AsRef<Path>,
{
    if dirs.is_empty() {
        return Err(AggregateError::NoDirectories);
    }

    let annotators = dirs
        .iter()
        .map(|dir| Annotator::new(dir.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let extension = format.extension();
    let mut documents = BTreeSet::new();
    for annotator in &annotators {
        documents.extend(discover_documents(&annotator.dir, &annotator.name, extension)?);
    }
    let documents: Vec<String> = documents.into_iter().collect();
    log::info!(
        "Aggregating {} documents across {} annotators",
        documents.len(),
        annotators.len()
    );

    // data[annotator][document]
    let mut data = Vec::with_capacity(annotators.len());
    for annotator in &annotators {
        let mut per_document = Vec::with_capacity(documents.len());
        for document in &documents {
            let loaded = format.load(&annotator.file_for(document, extension))?;
            if loaded.is_none() {
                log::debug!("{} has no annotation of {}", annotator.name, document);
            }
            per_document.push(loaded);
        }
        data.push(per_document);
    }

    let mut lengths = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        let copies: Vec<&Vec<F::Item>> = data.iter().filter_map(|per| per[index].as_ref()).collect();
        let reference = copies.first().map_or(0, |copy| copy.len());
        if copies.iter().any(|copy| copy.len() != reference) {
            return Err(AggregateError::DifferingLengths {
                document: document.clone(),
                agreeing: leading_agreement(&copies),
            });
        }
        lengths.push(reference);
    }

    let corpora = annotators
        .into_iter()
        .zip(data)
        .map(|(annotator, per_document)| {
            let mut corpus = Corpus::new(annotator.name);
            for (loaded, &length) in per_document.into_iter().zip(&lengths) {
                match loaded {
                    Some(items) => corpus.extend_present(items),
                    None => corpus.extend_missing(length),
                }
            }
            corpus
        })
        .collect();

    Ok(corpora)
}
