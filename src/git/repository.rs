use crate::error::{BranchCiError, Result};
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::{Path, PathBuf};

const HEADS_PREFIX: &str = "refs/heads/";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            BranchCiError::no_repository(format!("{}: {}", path.display(), e.message()))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Branch `HEAD` points at when it has no commits yet
    fn unborn_branch(&self) -> Result<String> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| BranchCiError::no_head(e.message().to_string()))?;

        head.symbolic_target()
            .map(|target| target.strip_prefix(HEADS_PREFIX).unwrap_or(target).to_string())
            .ok_or_else(|| BranchCiError::no_head("HEAD is not a symbolic reference"))
    }
}

impl super::BranchSource for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => head
                .shorthand()
                .map(|name| name.to_string())
                .ok_or_else(|| BranchCiError::no_head("HEAD name is not valid UTF-8")),
            Err(e) if e.code() == ErrorCode::UnbornBranch => self.unborn_branch(),
            Err(e) => Err(BranchCiError::no_head(e.message().to_string())),
        }
    }

    fn root(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }
}
