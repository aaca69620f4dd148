//! Throwaway repositories for tests.

use super::StContext;
use crate::config::StConfig;
use git2::{
    build::CheckoutBuilder, BranchType, IndexAddOption, Oid, Repository, RepositoryInitOptions,
    Signature,
};
use std::path::Path;
use tempfile::TempDir;

/// A non-bare repository in a temporary directory, on an unborn `master`.
pub(crate) struct TestRepo {
    pub(crate) dir: TempDir,
    pub(crate) repo: Repository,
}

/// A bare repository in a temporary directory, registered as a remote of a [TestRepo].
pub(crate) struct BareRemote {
    _dir: TempDir,
    pub(crate) repo: Repository,
}

impl TestRepo {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_opts(
            dir.path(),
            RepositoryInitOptions::new().initial_head("master"),
        )
        .unwrap();
        Self { dir, repo }
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn ctx(&self) -> StContext<'_> {
        self.ctx_with(StConfig::default())
    }

    pub(crate) fn ctx_with(&self, config: StConfig) -> StContext<'_> {
        StContext::new(&self.repo, config)
    }

    /// Writes `files` to the working tree and commits them on top of `HEAD`.
    pub(crate) fn commit(&self, files: &[(&str, &str)], message: &str) -> Oid {
        for (name, contents) in files {
            std::fs::write(self.path().join(name), contents).unwrap();
        }

        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let signature = Signature::now("Test", "test@example.com").unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents = parent.iter().collect::<Vec<_>>();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    pub(crate) fn initial_commit(&self) -> Oid {
        self.commit(&[(".gitignore", "*.sw?")], "Add .gitignore")
    }

    /// Creates `name` at `HEAD` and checks it out.
    pub(crate) fn create_branch(&self, name: &str) {
        self.create_branch_without_checkout(name);
        self.repo.set_head(&format!("refs/heads/{}", name)).unwrap();
    }

    pub(crate) fn create_branch_without_checkout(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).unwrap();
    }

    pub(crate) fn checkout(&self, name: &str) {
        let reference = format!("refs/heads/{}", name);
        let target = self.repo.revparse_single(&reference).unwrap();
        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().force()))
            .unwrap();
        self.repo.set_head(&reference).unwrap();
    }

    /// Returns the short name of the checked out branch.
    pub(crate) fn head_branch(&self) -> String {
        self.repo
            .head()
            .unwrap()
            .shorthand()
            .unwrap()
            .to_string()
    }

    pub(crate) fn tip(&self, branch: &str) -> Oid {
        self.repo
            .find_branch(branch, BranchType::Local)
            .unwrap()
            .get()
            .target()
            .unwrap()
    }

    pub(crate) fn has_branch(&self, branch: &str) -> bool {
        self.repo.find_branch(branch, BranchType::Local).is_ok()
    }

    /// The stacks `kb3456` (one branch) and `kb1234` (three branches), with `HEAD` at
    /// `kb1234/003_ui`.
    pub(crate) fn three_layer_stack(&self) {
        self.initial_commit();
        self.create_branch("kb3456/001_migration");
        self.commit(&[("001_create.sql", "SELECT 1;")], "Add 001_create.sql");
        self.create_branch("kb1234/001_docs");
        self.commit(&[("README.md", "Hello world")], "Add README.md");
        self.create_branch("kb1234/002_api");
        self.commit(&[("api.js", "function api() {}")], "Add api.js");
        self.create_branch("kb1234/003_ui");
        self.commit(&[("ui.js", "function ui() {}")], "Add ui.js");
    }

    /// Creates a bare repository and registers it as remote `name`.
    pub(crate) fn add_bare_remote(&self, name: &str) -> BareRemote {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_bare(dir.path()).unwrap();
        self.repo
            .remote(name, dir.path().to_str().unwrap())
            .unwrap();
        BareRemote { _dir: dir, repo }
    }

    /// Pushes `branch` to remote `name` without going through the stack engine.
    pub(crate) fn push_branch(&self, name: &str, branch: &str) {
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        self.repo
            .find_remote(name)
            .unwrap()
            .push(&[refspec.as_str()], None)
            .unwrap();
    }
}

impl BareRemote {
    /// Returns the short names of every branch on the remote, sorted.
    pub(crate) fn branches(&self) -> Vec<String> {
        let mut names = self
            .repo
            .branches(Some(BranchType::Local))
            .unwrap()
            .map(|b| b.unwrap().0.name().unwrap().unwrap().to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    pub(crate) fn tip(&self, branch: &str) -> Option<Oid> {
        self.repo
            .find_branch(branch, BranchType::Local)
            .ok()
            .and_then(|b| b.get().target())
    }

    /// Points `branch` on the remote at `target`, as if someone else had pushed.
    pub(crate) fn force_ref(&self, branch: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", branch), target, true, "test")
            .unwrap();
    }
}
