use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::HookRunner;
use crate::{BuildError, Hook};

/// Runs hooks through the platform shell, inheriting stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellHookRunner;

impl ShellHookRunner {
    fn command(line: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
    }
}

#[async_trait]
impl HookRunner for ShellHookRunner {
    async fn run(&self, hook: &Hook, cwd: &Path) -> Result<(), BuildError> {
        info!(kind = %hook.kind, command = %hook.command, "running hook");

        let status = Self::command(&hook.command)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|err| BuildError::Hook {
                kind: hook.kind,
                command: hook.command.clone(),
                reason: err.to_string(),
            })?;

        if !status.success() {
            return Err(BuildError::Hook {
                kind: hook.kind,
                command: hook.command.clone(),
                reason: format!("exited with {status}"),
            });
        }

        debug!(kind = %hook.kind, "hook finished");
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::HookKind;

    fn hook(command: &str) -> Hook {
        Hook::new(HookKind::Prebuild, command).unwrap()
    }

    #[tokio::test]
    async fn test_runs_in_project_root() {
        let dir = TempDir::new().unwrap();

        ShellHookRunner
            .run(&hook("echo generated > marker.txt"), dir.path())
            .await
            .unwrap();

        assert!(dir.path().join("marker.txt").exists());
    }

    #[tokio::test]
    async fn test_non_zero_exit_fails() {
        let dir = TempDir::new().unwrap();

        let err = ShellHookRunner
            .run(&hook("exit 3"), dir.path())
            .await
            .unwrap_err();

        match err {
            BuildError::Hook { kind, command, .. } => {
                assert_eq!(kind, HookKind::Prebuild);
                assert_eq!(command, "exit 3");
            }
            other => panic!("expected hook error, got {other:?}"),
        }
    }
}
