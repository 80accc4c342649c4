
use crate::{
    config::{ConfigErrors, SweeperConfig},
    sweep::Combination,
};
use std::io::{self, Write};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Failed to write job output")]
    Output(#[from] io::Error),
}

/// outcome reported by a launcher for a single job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReturn {
    pub job_idx: usize,
    pub parameters: Combination,
}

/// All possible launcher variants
/// (this is deliberately not made with dynamic dispatch to avoid the headache)
#[derive(Debug)]
pub enum Launchers {
    /// prints every job on stdout without executing anything
    Console(ConsoleLauncher),
}

impl Launchers {
    pub fn load(config: &SweeperConfig) -> Result<Self, ConfigErrors> {
        match config.launcher.name.as_str() {
            "console" => Ok(Self::Console(ConsoleLauncher)),
            _ => Err(ConfigErrors::UnsupportedLauncher(
                config.launcher.name.clone(),
            )),
        }
    }

    /// hand a batch of jobs to the launcher, numbered from `initial_job_idx`
    pub fn launch(
        &mut self,
        batch: Vec<Combination>,
        initial_job_idx: usize,
    ) -> Result<Vec<JobReturn>, LauncherError> {
        match self {
            Self::Console(launcher) => launcher.launch(batch, initial_job_idx),
        }
    }
}

#[derive(Debug)]
pub struct ConsoleLauncher;

impl ConsoleLauncher {
    fn launch(
        &mut self,
        batch: Vec<Combination>,
        initial_job_idx: usize,
    ) -> Result<Vec<JobReturn>, LauncherError> {
        let mut stdout = io::stdout().lock();
        let mut returns = Vec::with_capacity(batch.len());

        for (offset, parameters) in batch.into_iter().enumerate() {
            let job_idx = initial_job_idx + offset;
            writeln!(stdout, "#{job_idx} {}", parameters.join(" "))?;

            returns.push(JobReturn {
                job_idx,
                parameters,
            });
        }

        info!("Launched {} jobs", returns.len());

        Ok(returns)
    }
}
