//! # Dependency Closure
//!
//! Computes the full set of libraries a project needs. The dependency graph
//! is not known upfront: a library's own dependencies are only visible once
//! it has been fetched and its `embuild.yaml` can be read. The engine
//! therefore discovers the graph while fetching it.
//!
//! ## Process
//!
//! 1.  **Seeding**: every reference of the root project is resolved, then
//!     fetched, then queued.
//! 2.  **Expansion**: the next queued library is taken. If its checkout
//!     contains a descriptor, that descriptor's preconditions run in the
//!     checkout, and each reference it declares whose library is not yet in
//!     the closure is resolved, fetched and queued. The library is then
//!     marked visited.
//! 3.  **Termination**: every insertion is deduplicated by canonical name,
//!     so each library is fetched and expanded at most once and the loop
//!     ends when the queue is empty, cycles included.
//!
//! ## Ordering
//!
//! The queue is first-in first-out. Roots keep their declaration order and
//! children are queued in the order their descriptor lists them, so the
//! visit order (and with it the generated manifest) is the same on every
//! run over the same descriptors.
//!
//! Within one batch (the root list, or one library's list) all references
//! are resolved before any of them is fetched. An unknown name therefore
//! aborts the run before that batch touches the disk.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::catalog::Catalog;
use crate::descriptor::ProjectDescriptor;
use crate::error::{Error, Result};
use crate::process::{run_preconditions, ProcessRunner};
use crate::repository::{FetchAction, SourceFetcher};
use crate::resolver::{resolve, LibraryReference, ResolvedLibrary};

/// The resolved library set of one update run.
#[derive(Debug, Default)]
pub struct Closure {
    libraries: HashMap<String, ResolvedLibrary>,
    visit_order: Vec<String>,
    fetches: Vec<(String, FetchAction)>,
}

impl Closure {
    /// Looks up a library by canonical name.
    pub fn get(&self, name: &str) -> Option<&ResolvedLibrary> {
        self.libraries.get(name)
    }

    /// Whether `name` is in the closure.
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.contains_key(name)
    }

    /// Number of libraries in the closure.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the closure is empty.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Canonical names in the order they were expanded.
    pub fn visit_order(&self) -> &[String] {
        &self.visit_order
    }

    /// Whether `name` has been expanded.
    pub fn is_visited(&self, name: &str) -> bool {
        self.visit_order.iter().any(|visited| visited == name)
    }

    /// Libraries in visit order.
    pub fn libraries(&self) -> impl Iterator<Item = &ResolvedLibrary> {
        self.visit_order
            .iter()
            .filter_map(|name| self.libraries.get(name))
    }

    /// Destination directories of every library.
    pub fn destinations(&self) -> HashSet<PathBuf> {
        self.libraries
            .values()
            .map(|library| library.destination.clone())
            .collect()
    }

    /// Fetch actions in the order they happened.
    pub fn fetches(&self) -> &[(String, FetchAction)] {
        &self.fetches
    }
}

/// Walks the dependency graph, fetching as it goes.
pub struct ClosureEngine<'a> {
    catalog: &'a Catalog,
    fetcher: &'a SourceFetcher,
    runner: &'a dyn ProcessRunner,
}

impl<'a> ClosureEngine<'a> {
    pub fn new(
        catalog: &'a Catalog,
        fetcher: &'a SourceFetcher,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            runner,
        }
    }

    /// Resolves, fetches and expands everything reachable from
    /// `root_references`, placing each library under `destination_root`.
    pub fn resolve_closure(
        &self,
        root_references: &[String],
        destination_root: &Path,
    ) -> Result<Closure> {
        let mut closure = Closure::default();
        let mut frontier: VecDeque<String> = VecDeque::new();

        let roots = self.admit(&mut closure, "root project", root_references, destination_root)?;
        frontier.extend(roots);

        while let Some(name) = frontier.pop_front() {
            let destination = match closure.get(&name) {
                Some(library) => library.destination.clone(),
                None => continue,
            };

            if let Some(descriptor) = ProjectDescriptor::load_from_dir(&destination)? {
                debug!(
                    "{} declares {} libraries",
                    name,
                    descriptor.libraries.len()
                );
                run_preconditions(self.runner, &name, &descriptor.preconditions, &destination)?;
                let discovered =
                    self.admit(&mut closure, &name, &descriptor.libraries, destination_root)?;
                frontier.extend(discovered);
            }

            closure.visit_order.push(name);
        }

        info!("Resolved {} libraries", closure.len());
        Ok(closure)
    }

    /// Resolves one batch of references, then fetches and inserts the ones
    /// that are new. Returns the canonical names that were inserted.
    fn admit(
        &self,
        closure: &mut Closure,
        declared_by: &str,
        references: &[String],
        destination_root: &Path,
    ) -> Result<Vec<String>> {
        let mut batch: Vec<ResolvedLibrary> = Vec::new();

        for reference in references {
            // A bare name that is already a key is the same library.
            if let LibraryReference::Catalog(name) = LibraryReference::parse(reference)? {
                if closure.contains(&name) || batch.iter().any(|l| l.name == name) {
                    debug!("{} (from {}) already resolved", name, declared_by);
                    continue;
                }
            }

            let resolved = resolve(reference, destination_root, self.catalog)?;
            let known = closure
                .get(&resolved.name)
                .or_else(|| batch.iter().find(|l| l.name == resolved.name));
            if let Some(existing) = known {
                if !existing.same_repository(&resolved) {
                    return Err(Error::NameCollision {
                        name: resolved.name,
                        existing: existing.locator.clone(),
                        incoming: resolved.locator,
                    });
                }
                debug!("{} (from {}) already resolved", resolved.name, declared_by);
                continue;
            }
            batch.push(resolved);
        }

        let mut inserted = Vec::with_capacity(batch.len());
        for library in batch {
            let action = self.fetcher.fetch(&library.locator, &library.destination)?;
            debug!("{} {} (required by {})", library.name, action, declared_by);
            closure.fetches.push((library.name.clone(), action));
            inserted.push(library.name.clone());
            closure.libraries.insert(library.name.clone(), library);
        }
        Ok(inserted)
    }
}
