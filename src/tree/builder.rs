//! Tree builder for constructing directory digest trees

use crate::error::DigestError;
use crate::ignore::ExclusionSet;
use crate::tree::digester::{self, Entry, PendingDirectory};
use crate::tree::node::{DigestNode, DirectoryNode};
use crate::tree::walker::{self, ListedEntry};
use crate::types::Digest;
use rayon::prelude::*;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Worker stack size; recursion depth follows directory depth
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Options controlling a build
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Base-name patterns skipped at every depth
    pub exclusions: ExclusionSet,
    /// Sibling fan-out: 1 = sequential, 0 = all cores, N = N workers
    pub parallelism: usize,
    /// Log every digested entry at info level with throughput
    pub verbose: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            parallelism: 1,
            verbose: false,
        }
    }
}

/// Builds a complete digest tree rooted at a path.
///
/// A build is all-or-nothing: the first stat, listing or read failure aborts
/// it and no partial tree is returned.
pub struct TreeBuilder {
    root: PathBuf,
    options: BuilderOptions,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: BuilderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.options.exclusions = exclusions;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.options.parallelism = parallelism;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Build the complete digest tree.
    ///
    /// Subdirectories are digested before their parent; each directory's size
    /// and digest are aggregated from its path-sorted children. A symlinked
    /// root is resolved to its target; if the root is not a directory the
    /// result is a single leaf.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<DigestNode, DigestError> {
        let start = Instant::now();
        info!(
            version = env!("CARGO_PKG_VERSION"),
            parallelism = self.options.parallelism,
            "Starting digest tree build"
        );

        let result = walker::root_metadata(&self.root).and_then(|metadata| {
            if self.options.parallelism == 1 {
                self.build_entry(&self.root, &metadata)
            } else {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.options.parallelism)
                    .stack_size(WORKER_STACK_SIZE)
                    .thread_name(|i| format!("dirdigest-worker-{}", i))
                    .build()
                    .map_err(|e| {
                        DigestError::Config(format!("Failed to start worker pool: {}", e))
                    })?;
                pool.install(|| self.build_entry(&self.root, &metadata))
            }
        });

        let node = match result {
            Ok(node) => node,
            Err(e) => {
                error!("Digest tree build failed: {}", e);
                return Err(e);
            }
        };

        let elapsed = start.elapsed();
        let size_mb = node.size() as f64 / 1024.0 / 1024.0;
        info!(
            root_digest = %node.digest(),
            node_count = node.node_count(),
            children = node.children().len(),
            size_mb = %format!("{:.2}", size_mb),
            duration_ms = elapsed.as_millis() as u64,
            rate_mb_s = %format!("{:.2}", rate(size_mb, elapsed.as_secs_f64())),
            "Digest tree build completed"
        );

        Ok(node)
    }

    /// Build the tree and return only the root digest
    pub fn compute_root(&self) -> Result<Digest, DigestError> {
        Ok(*self.build()?.digest())
    }

    /// Digest one entry: leaves directly, directories recursively
    fn build_entry(&self, path: &Path, metadata: &Metadata) -> Result<DigestNode, DigestError> {
        let start = Instant::now();
        match digester::digest_entry(path, metadata)? {
            Entry::Leaf(node) => {
                if self.options.verbose {
                    let elapsed = start.elapsed().as_secs_f64();
                    let size_mb = node.size as f64 / 1024.0 / 1024.0;
                    info!(
                        path = %node.path.display(),
                        digest = %node.digest,
                        size_mb = %format!("{:.2}", size_mb),
                        elapsed_s = %format!("{:.2}", elapsed),
                        rate_mb_s = %format!("{:.2}", rate(size_mb, elapsed)),
                        "Digested leaf"
                    );
                } else {
                    trace!(path = %node.path.display(), digest = %node.digest, "Digested leaf");
                }
                Ok(DigestNode::File(node))
            }
            Entry::Directory(pending) => self.build_directory(pending).map(DigestNode::Directory),
        }
    }

    /// List, filter, recurse, then aggregate one directory
    fn build_directory(&self, pending: PendingDirectory) -> Result<DirectoryNode, DigestError> {
        trace!(path = %pending.path.display(), "Building directory");

        let entries: Vec<ListedEntry> = walker::list_directory(&pending.path)?
            .into_iter()
            .filter(|entry| {
                let excluded = self.options.exclusions.is_excluded(&entry.name);
                if excluded {
                    debug!(path = %entry.path.display(), "Excluded entry");
                }
                !excluded
            })
            .collect();

        let children = if self.options.parallelism == 1 {
            entries
                .iter()
                .map(|entry| self.build_entry(&entry.path, &entry.metadata))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            entries
                .par_iter()
                .map(|entry| self.build_entry(&entry.path, &entry.metadata))
                .collect::<Result<Vec<_>, _>>()?
        };

        let dir = pending.complete(children);

        if self.options.verbose {
            info!(
                path = %dir.path.display(),
                digest = %dir.digest,
                children = dir.children.len(),
                size = dir.size,
                "Digested directory"
            );
        } else {
            debug!(
                path = %dir.path.display(),
                digest = %dir.digest,
                children = dir.children.len(),
                size = dir.size,
                "Digested directory"
            );
        }

        Ok(dir)
    }
}

/// Build a digest tree with default options
pub fn build_tree(root: impl AsRef<Path>) -> Result<DigestNode, DigestError> {
    TreeBuilder::new(root.as_ref()).build()
}

fn rate(size_mb: f64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        size_mb / seconds
    } else {
        0.0
    }
}
