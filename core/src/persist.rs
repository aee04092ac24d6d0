use crate::{Document, InvertedIndex};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn index(&self) -> PathBuf { self.root.join("index.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// Write `index.bin` and `meta.json` under the snapshot root.
pub fn save_snapshot(paths: &IndexPaths, index: &InvertedIndex) -> Result<MetaFile> {
    create_dir_all(&paths.root).with_context(|| format!("creating {}", paths.root.display()))?;
    let num_docs = u32::try_from(index.document_count()).context("document count does not fit the snapshot format")?;
    let num_terms = u32::try_from(index.term_count()).context("term count does not fit the snapshot format")?;
    let bytes = bincode::serialize(index).context("encoding index snapshot")?;
    let mut f = File::create(paths.index()).with_context(|| format!("creating {}", paths.index().display()))?;
    f.write_all(&bytes).with_context(|| format!("writing {}", paths.index().display()))?;

    let meta = MetaFile {
        num_docs,
        num_terms,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: SNAPSHOT_VERSION,
    };
    save_meta(paths, &meta)?;
    tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, "saved snapshot");
    Ok(meta)
}

pub fn load_snapshot(paths: &IndexPaths) -> Result<InvertedIndex> {
    let meta = load_meta(paths)?;
    if meta.version != SNAPSHOT_VERSION {
        anyhow::bail!("snapshot version {} is not supported (expected {SNAPSHOT_VERSION})", meta.version);
    }
    let mut f = File::open(paths.index()).with_context(|| format!("opening {}", paths.index().display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index: InvertedIndex = bincode::deserialize(&buf).context("decoding index snapshot")?;
    tracing::info!(root = %paths.root.display(), num_docs = index.document_count(), "loaded snapshot");
    Ok(index)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta()).with_context(|| format!("creating {}", paths.meta().display()))?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes()).with_context(|| format!("writing {}", paths.meta().display()))?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("opening {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Read a corpus from a `.json` file (array or single object), a `.jsonl`
/// file, or a directory of such files.
pub fn load_documents<P: AsRef<Path>>(input: P) -> Result<Vec<Document>> {
    let input = input.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("corpus path {} does not exist", input.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::info!(input = %input.display(), num_docs = docs.len(), "loaded documents");
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("document in {}", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("document in {}", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping json file that is neither an array nor an object"),
    }
    Ok(())
}
